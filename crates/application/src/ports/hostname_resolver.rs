use async_trait::async_trait;
use geotxt_domain::DomainError;
use std::net::IpAddr;

/// Forward resolution of a hostname token embedded in a query name.
#[async_trait]
pub trait HostnameResolver: Send + Sync {
    /// Resolve a hostname to its addresses. An empty vector and an error are
    /// both treated as "host could not be resolved" by the router.
    async fn resolve(&self, hostname: &str) -> Result<Vec<IpAddr>, DomainError>;
}
