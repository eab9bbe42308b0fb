use geotxt_application::use_cases::HandleGeoQueryUseCase;
use geotxt_domain::{Question, RecordClass, RecordType};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::rdata::TXT;
use hickory_proto::rr::{RData, Record};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error};

/// Transport adapter: parses the wire question, runs the query use case and
/// answers with exactly one TTL-0 TXT record echoing the query name.
#[derive(Clone)]
pub struct GeoTxtHandler {
    use_case: Arc<HandleGeoQueryUseCase>,
}

impl GeoTxtHandler {
    pub fn new(use_case: Arc<HandleGeoQueryUseCase>) -> Self {
        Self { use_case }
    }
}

#[async_trait::async_trait]
impl RequestHandler for GeoTxtHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let query = &request_info.query;
        let question = Question::new(
            query.name().to_string(),
            RecordType::from(u16::from(query.query_type())),
            RecordClass::from(u16::from(query.query_class())),
        );

        let txt = match self.use_case.execute(&question).await {
            Ok(txt) => txt,
            Err(e) => {
                let code = if e.is_name_error() {
                    ResponseCode::NXDomain
                } else {
                    ResponseCode::ServFail
                };
                return send_error_response(request, &mut response_handle, code).await;
            }
        };

        let answers = vec![Record::from_rdata(
            query.original().name().clone(),
            0,
            RData::TXT(TXT::new(txt)),
        )];

        let builder = MessageResponseBuilder::from_message_request(request);
        let header = *request.header();
        let response = builder.build(header, answers.iter(), &[], &[], &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = *request.header();
    header.set_response_code(code);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}
