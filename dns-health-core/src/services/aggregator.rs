//! 汇总：判定每个域名并折叠为 site / 全局统计

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use dns_health_provider::normalize_domain_name;

use crate::services::classifier::{classify, is_system, DomainIndex};
use crate::types::{DnsResult, DomainReport, Install, ProviderFingerprints, SiteReport, Snapshot};

/// Classify every domain of every install and build the snapshot.
///
/// Each report's `domain.is_system` is set from the fingerprints. System
/// domains never get a DNS result attached, even if one was looked up.
pub fn aggregate(
    installs: Vec<Install>,
    dns: &HashMap<String, DnsResult>,
    index: &DomainIndex,
    fingerprints: &ProviderFingerprints,
    generated_at: DateTime<Utc>,
) -> Snapshot {
    let sites = installs
        .into_iter()
        .map(|mut install| {
            let domains = std::mem::take(&mut install.domains);
            let reports: Vec<DomainReport> = domains
                .into_iter()
                .map(|mut domain| {
                    domain.is_system = is_system(&domain, fingerprints);
                    let result = if domain.is_system {
                        None
                    } else {
                        dns.get(&normalize_domain_name(&domain.name))
                    };
                    let classification = classify(
                        &domain,
                        result,
                        install.cname.as_deref(),
                        index,
                        fingerprints,
                    );
                    DomainReport {
                        domain,
                        dns: result.cloned(),
                        verdict: classification.verdict,
                        detail: classification.detail,
                        original_verdict: None,
                        original_detail: None,
                        confirmed_at: None,
                    }
                })
                .collect();
            SiteReport::from_install(install, reports)
        })
        .collect();

    Snapshot::from_sites(sites, Some(generated_at))
}
