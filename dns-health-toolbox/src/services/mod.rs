//! Stateless service façade exposing all toolbox operations.
//!
//! Every method on [`ToolboxService`] is an associated function; no instance needed.

mod dns;
mod resolver;

use hickory_resolver::TokioResolver;

use crate::error::ToolboxResult;
use crate::types::DnsResult;

/// Entry point for DNS verification.
///
/// ```rust,no_run
/// use dns_health_toolbox::ToolboxService;
/// # async fn demo() -> dns_health_toolbox::ToolboxResult<()> {
/// let resolver = ToolboxService::build_resolver(&[])?;
/// let result = ToolboxService::resolve_domain(&resolver, "example.com").await;
/// println!("{:?} {:?}", result.a_records, result.cnames);
/// # Ok(())
/// # }
/// ```
pub struct ToolboxService;

impl ToolboxService {
    /// Build a resolver for the given nameserver IPs.
    ///
    /// An empty list uses the host system configuration, falling back to
    /// Hickory's default upstream set when it cannot be read.
    pub fn build_resolver(nameservers: &[String]) -> ToolboxResult<TokioResolver> {
        resolver::build_resolver(nameservers)
    }

    /// Resolve A records and the CNAME chain of `name`.
    ///
    /// Never fails: lookup errors degrade to empty lists.
    pub async fn resolve_domain(resolver: &TokioResolver, name: &str) -> DnsResult {
        dns::resolve_domain(resolver, name).await
    }
}
