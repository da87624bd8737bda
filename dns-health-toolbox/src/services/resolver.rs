//! DNS resolver construction.

use std::net::IpAddr;

use hickory_resolver::{
    TokioResolver,
    config::{NameServerConfigGroup, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
};

use crate::error::{ToolboxError, ToolboxResult};

/// Deduplicate nameserver IP addresses from a resolver configuration.
pub(crate) fn dedup_ips(config: &ResolverConfig) -> Vec<String> {
    let mut ips: Vec<String> = Vec::new();
    for ns in config.name_servers() {
        let ip = ns.socket_addr.ip().to_string();
        if !ips.contains(&ip) {
            ips.push(ip);
        }
    }
    ips
}

/// Parse a list of nameserver IPs, rejecting the first invalid entry.
fn parse_nameservers(nameservers: &[String]) -> ToolboxResult<Vec<IpAddr>> {
    nameservers
        .iter()
        .map(|ns| {
            ns.trim().parse::<IpAddr>().map_err(|_| {
                ToolboxError::ValidationError(format!("无效的 DNS 服务器地址: {ns}"))
            })
        })
        .collect()
}

/// Build a resolver that targets the given nameserver IPs (port 53), or the
/// system configuration when the list is empty.
pub(crate) fn build_resolver(nameservers: &[String]) -> ToolboxResult<TokioResolver> {
    let ips = parse_nameservers(nameservers)?;
    if ips.is_empty() {
        return Ok(build_system_resolver());
    }

    Ok(build_resolver_with_opts(&ips, ResolverOpts::default()))
}

/// Build a resolver for explicit nameserver IPs (port 53) with custom options.
pub(crate) fn build_resolver_with_opts(ips: &[IpAddr], opts: ResolverOpts) -> TokioResolver {
    let config = ResolverConfig::from_parts(
        None,
        vec![],
        NameServerConfigGroup::from_ips_clear(ips, 53, true),
    );
    log::debug!("Using nameservers: {}", dedup_ips(&config).join(", "));
    TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
        .with_options(opts)
        .build()
}

/// Build a resolver using the host system DNS configuration (with fallback).
fn build_system_resolver() -> TokioResolver {
    #[cfg(any(unix, target_os = "windows"))]
    {
        match TokioResolver::builder_tokio() {
            Ok(builder) => return builder.build(),
            Err(e) => {
                log::warn!(
                    "Failed to load system DNS configuration, falling back to defaults: {e}"
                );
            }
        }
    }

    TokioResolver::builder_with_config(
        ResolverConfig::default(),
        TokioConnectionProvider::default(),
    )
    .with_options(ResolverOpts::default())
    .build()
}
