use async_trait::async_trait;
use geotxt_application::ports::HostnameResolver;
use geotxt_domain::DomainError;
use hickory_resolver::TokioResolver;
use std::net::IpAddr;
use tracing::debug;

/// Forward resolution through the system's configured nameservers.
pub struct ForwardHostnameResolver {
    resolver: TokioResolver,
}

impl ForwardHostnameResolver {
    pub fn from_system() -> Result<Self, DomainError> {
        let resolver = TokioResolver::builder_tokio()
            .map_err(|e| DomainError::ConfigError(format!("failed to create resolver: {e}")))?
            .build();
        Ok(Self { resolver })
    }
}

#[async_trait]
impl HostnameResolver for ForwardHostnameResolver {
    async fn resolve(&self, hostname: &str) -> Result<Vec<IpAddr>, DomainError> {
        match self.resolver.lookup_ip(hostname).await {
            Ok(lookup) => Ok(lookup.iter().collect()),
            Err(e) => {
                debug!(hostname, error = %e, "forward lookup failed");
                Err(DomainError::HostUnresolved(hostname.to_string()))
            }
        }
    }
}
