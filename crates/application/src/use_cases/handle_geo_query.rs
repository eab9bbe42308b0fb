use crate::ports::{AddressPicker, GeoReader, HostnameResolver};
use geotxt_domain::{DomainError, Question, RecordClass, RecordType, ResponseRecord, TxtEncoding};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Turns one DNS question into TXT payload strings.
///
/// Pipeline: validate TXT+IN, extract the target token (suffix-stripped),
/// resolve it to an address (literal IP or forward lookup with a uniform
/// random pick), look the address up in the geo database, format.
pub struct HandleGeoQueryUseCase {
    db: Arc<dyn GeoReader>,
    resolver: Arc<dyn HostnameResolver>,
    picker: Arc<dyn AddressPicker>,
    language: String,
    domain: Option<String>,
    encoding: TxtEncoding,
    silent: bool,
}

impl HandleGeoQueryUseCase {
    pub fn new(
        db: Arc<dyn GeoReader>,
        resolver: Arc<dyn HostnameResolver>,
        picker: Arc<dyn AddressPicker>,
    ) -> Self {
        Self {
            db,
            resolver,
            picker,
            language: "en".to_string(),
            domain: None,
            encoding: TxtEncoding::Joined,
            silent: false,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Zone suffix stripped from question names, e.g. `geo.example.com`.
    pub fn with_domain(mut self, domain: Option<String>) -> Self {
        self.domain = domain.map(|d| d.trim_end_matches('.').to_ascii_lowercase());
        self
    }

    pub fn with_encoding(mut self, encoding: TxtEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Suppress the per-request log line.
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub async fn execute(&self, question: &Question) -> Result<Vec<String>, DomainError> {
        let start = Instant::now();
        let result = self.answer(question).await;

        if !self.silent {
            let outcome = match &result {
                Ok(_) => "NOERROR",
                Err(e) if e.is_name_error() => "NXDOMAIN",
                Err(_) => "SERVFAIL",
            };
            info!(
                name = %question.name,
                record_type = %question.record_type,
                class = %question.class,
                outcome,
                latency_us = start.elapsed().as_micros() as u64,
                "query handled"
            );
        }

        result
    }

    async fn answer(&self, question: &Question) -> Result<Vec<String>, DomainError> {
        if question.record_type != RecordType::Txt || question.class != RecordClass::In {
            return Err(DomainError::UnsupportedQuery(format!(
                "{} {}",
                question.record_type, question.class
            )));
        }

        let token = self.target_token(&question.name);
        let ip = self.resolve_target(&token).await?;
        let record = self.db.lookup(ip)?;

        Ok(ResponseRecord::new(&record, &self.language, ip).into_txt(self.encoding))
    }

    /// The left-hand label(s) once the configured zone suffix is stripped,
    /// or the whole name (sans trailing dot) when no suffix is set.
    fn target_token(&self, name: &str) -> String {
        let name = name.trim_end_matches('.');
        match &self.domain {
            Some(domain) => {
                let lowered = name.to_ascii_lowercase();
                match lowered.strip_suffix(&format!(".{}", domain)) {
                    Some(stripped) => name[..stripped.len()].to_string(),
                    None => name.to_string(),
                }
            }
            None => name.to_string(),
        }
    }

    async fn resolve_target(&self, token: &str) -> Result<IpAddr, DomainError> {
        if let Ok(ip) = token.parse::<IpAddr>() {
            return Ok(ip);
        }

        let addresses = self
            .resolver
            .resolve(token)
            .await
            .map_err(|_| DomainError::HostUnresolved(token.to_string()))?;

        if addresses.is_empty() {
            return Err(DomainError::HostUnresolved(token.to_string()));
        }
        Ok(addresses[self.picker.pick(addresses.len())])
    }
}
