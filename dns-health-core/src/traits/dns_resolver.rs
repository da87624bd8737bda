//! DNS 解析抽象 Trait

use async_trait::async_trait;

use dns_health_toolbox::{TokioResolver, ToolboxService};

use crate::error::{CoreError, CoreResult};
use crate::types::DnsResult;

/// Best-effort DNS lookup of one name.
///
/// Implementations never fail: NXDOMAIN, timeouts and resolver errors all
/// degrade to empty lists in the returned [`DnsResult`].
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, name: &str) -> DnsResult;
}

/// Resolver backed by the host (or explicitly configured) nameservers.
#[derive(Clone)]
pub struct SystemDnsResolver {
    resolver: TokioResolver,
}

impl SystemDnsResolver {
    /// An empty `nameservers` list uses the system configuration.
    pub fn new(nameservers: &[String]) -> CoreResult<Self> {
        let resolver = ToolboxService::build_resolver(nameservers)
            .map_err(|e| CoreError::ValidationError(e.to_string()))?;
        Ok(Self { resolver })
    }
}

#[async_trait]
impl DnsResolver for SystemDnsResolver {
    async fn resolve(&self, name: &str) -> DnsResult {
        ToolboxService::resolve_domain(&self.resolver, name).await
    }
}
