//! 域名状态判定
//!
//! Pure functions: the verdict of a domain depends only on its declared
//! provider state, the live DNS result and the cross-install domain index.

use std::collections::HashSet;

use dns_health_provider::{has_domain_suffix, normalize_domain_name};

use crate::types::{DnsResult, Domain, Install, NetworkStatus, ProviderFingerprints, Verdict};

pub(crate) const DETAIL_SYSTEM: &str = "System domain";
pub(crate) const DETAIL_ACTIVE_POINTED: &str = "Active & DNS pointed";
pub(crate) const DETAIL_NOT_POINTED: &str = "DNS not pointed to WPE";
pub(crate) const DETAIL_NOT_RESOLVING: &str = "DNS not resolving";
pub(crate) const DETAIL_ACTIVE_API: &str = "Active (API)";
pub(crate) const DETAIL_PENDING: &str = "Pending setup";
pub(crate) const DETAIL_DELETED: &str = "Network deleted";
pub(crate) const DETAIL_LEGACY_POINTED: &str = "DNS pointed (Legacy)";
pub(crate) const DETAIL_NO_STATUS: &str = "No status data";

/// Every domain name fetched in one refresh cycle, system and custom.
///
/// Built once after all domain listings finish; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct DomainIndex {
    names: HashSet<String>,
}

impl DomainIndex {
    pub fn from_installs(installs: &[Install]) -> Self {
        installs
            .iter()
            .flat_map(|install| install.domains.iter().map(|d| d.name.as_str()))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize_domain_name(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for DomainIndex {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(normalize_domain_name)
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }
}

/// Verdict plus the human-readable reason shown next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub verdict: Verdict,
    pub detail: String,
}

impl Classification {
    fn new(verdict: Verdict, detail: impl Into<String>) -> Self {
        Self {
            verdict,
            detail: detail.into(),
        }
    }
}

/// Whether `name` is a provider-internal domain.
pub fn is_system_domain(name: &str, fingerprints: &ProviderFingerprints) -> bool {
    fingerprints
        .system_suffixes
        .iter()
        .any(|suffix| has_domain_suffix(name, suffix))
}

/// System flag from the provider, or a provider-internal suffix.
pub(crate) fn is_system(domain: &Domain, fingerprints: &ProviderFingerprints) -> bool {
    domain.is_system || is_system_domain(&domain.name, fingerprints)
}

/// Whether a live DNS answer points at the hosting provider.
///
/// Any of: a CNAME with a provider suffix, a CNAME equal to the install's
/// canonical CNAME, a CNAME to another domain of the account, an A record
/// with a provider IP prefix.
pub fn matches_provider(
    result: &DnsResult,
    install_cname: Option<&str>,
    index: &DomainIndex,
    fingerprints: &ProviderFingerprints,
) -> bool {
    let install_cname = install_cname
        .map(normalize_domain_name)
        .filter(|c| !c.is_empty());

    let cname_match = result.cnames.iter().any(|cname| {
        fingerprints
            .cname_suffixes
            .iter()
            .any(|suffix| has_domain_suffix(cname, suffix))
            || install_cname
                .as_deref()
                .is_some_and(|ic| normalize_domain_name(cname) == ic)
            || index.contains(cname)
    });

    cname_match
        || result.a_records.iter().any(|ip| {
            fingerprints
                .ip_prefixes
                .iter()
                .any(|prefix| !prefix.is_empty() && ip.starts_with(prefix.as_str()))
        })
}

/// Whether DNS lands on the targets the provider declared for this domain.
fn matches_expected(domain: &Domain, result: &DnsResult) -> bool {
    let expected = &domain.expected;
    let a_match = result
        .a_records
        .iter()
        .any(|ip| expected.a_records.iter().any(|e| e.trim() == ip));
    let cname_match = expected.cname.as_deref().is_some_and(|target| {
        let target = normalize_domain_name(target);
        result
            .cnames
            .iter()
            .any(|c| normalize_domain_name(c) == target)
    });
    a_match || cname_match
}

/// 判定单个域名
///
/// Rules, first match wins:
/// 1. provider-internal name → `system`
/// 2. `ACTIVE` → `good` when DNS points at the provider or its declared
///    targets, `issue` when DNS resolves elsewhere or not at all.
///    Without any DNS result the declared state is trusted (`good`).
/// 3. `PENDING` → `pending`, DNS ignored
/// 4. `DELETED` → `issue`
/// 5. no declared status (legacy) → decided by DNS alone; `unknown` without a result
/// 6. any other status → `unknown` with the raw status as reason
pub fn classify(
    domain: &Domain,
    dns: Option<&DnsResult>,
    install_cname: Option<&str>,
    index: &DomainIndex,
    fingerprints: &ProviderFingerprints,
) -> Classification {
    if is_system(domain, fingerprints) {
        return Classification::new(Verdict::System, DETAIL_SYSTEM);
    }

    let points_at_provider =
        |result: &DnsResult| matches_provider(result, install_cname, index, fingerprints);

    match &domain.network_status {
        Some(NetworkStatus::Active) => match dns {
            Some(result) if points_at_provider(result) || matches_expected(domain, result) => {
                Classification::new(Verdict::Good, DETAIL_ACTIVE_POINTED)
            }
            Some(result) if result.resolved => {
                Classification::new(Verdict::Issue, DETAIL_NOT_POINTED)
            }
            Some(_) => Classification::new(Verdict::Issue, DETAIL_NOT_RESOLVING),
            // 未做 DNS 检查：信任 provider 声明的状态
            None => Classification::new(Verdict::Good, DETAIL_ACTIVE_API),
        },
        Some(NetworkStatus::Pending) => Classification::new(Verdict::Pending, DETAIL_PENDING),
        Some(NetworkStatus::Deleted) => Classification::new(Verdict::Issue, DETAIL_DELETED),
        None => match dns {
            Some(result) if points_at_provider(result) => {
                Classification::new(Verdict::Good, DETAIL_LEGACY_POINTED)
            }
            Some(result) if result.resolved => {
                Classification::new(Verdict::Issue, DETAIL_NOT_POINTED)
            }
            Some(_) => Classification::new(Verdict::Issue, DETAIL_NOT_RESOLVING),
            None => Classification::new(Verdict::Unknown, DETAIL_NO_STATUS),
        },
        Some(NetworkStatus::Other(raw)) => {
            let raw = raw.trim();
            Classification::new(
                Verdict::Unknown,
                if raw.is_empty() { "Unknown" } else { raw },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{dns, domain, unresolved};

    fn fp() -> ProviderFingerprints {
        ProviderFingerprints::default()
    }

    fn classify_simple(d: &Domain, result: Option<&DnsResult>) -> Classification {
        classify(d, result, Some("mysite.wpengine.com"), &DomainIndex::default(), &fp())
    }

    #[test]
    fn system_domain_always_wins() {
        let statuses = [
            Some(NetworkStatus::Active),
            Some(NetworkStatus::Pending),
            Some(NetworkStatus::Deleted),
            Some(NetworkStatus::Other("WEIRD".to_string())),
            None,
        ];
        let results = [
            None,
            Some(unresolved()),
            Some(dns(&["203.0.113.9"], &["cdn.unrelated.net"])),
            Some(dns(&["141.193.213.10"], &[])),
        ];

        for status in &statuses {
            for result in &results {
                let mut d = domain("mysite.wpengine.com", status.clone());
                d.is_system = false;
                let c = classify_simple(&d, result.as_ref());
                assert_eq!(c.verdict, Verdict::System, "status={status:?} dns={result:?}");
                assert_eq!(c.detail, DETAIL_SYSTEM);

                let mut flagged = domain("internal.example.com", status.clone());
                flagged.is_system = true;
                assert_eq!(
                    classify_simple(&flagged, result.as_ref()).verdict,
                    Verdict::System
                );
            }
        }
    }

    #[test]
    fn pending_ignores_dns() {
        let d = domain("shop.example.com", Some(NetworkStatus::Pending));
        let matching = dns(&["141.193.213.10"], &["mysite.wpengine.com"]);
        assert!(matches_provider(
            &matching,
            Some("mysite.wpengine.com"),
            &DomainIndex::default(),
            &fp()
        ));

        for result in [None, Some(&matching), Some(&unresolved())] {
            let c = classify_simple(&d, result);
            assert_eq!(c.verdict, Verdict::Pending);
            assert_eq!(c.detail, DETAIL_PENDING);
        }
    }

    #[test]
    fn active_with_expected_a_record_is_good() {
        let mut d = domain("a.example.com", Some(NetworkStatus::Active));
        d.expected.a_records = vec!["203.0.113.5".to_string()];
        let result = dns(&["203.0.113.5"], &[]);

        let c = classify_simple(&d, Some(&result));
        assert_eq!(c.verdict, Verdict::Good);
        assert_eq!(c.detail, "Active & DNS pointed");
    }

    #[test]
    fn active_with_expected_cname_is_good() {
        let mut d = domain("a.example.com", Some(NetworkStatus::Active));
        d.expected.cname = Some("edge.example-cdn.net".to_string());
        let result = dns(&["198.51.100.7"], &["edge.example-cdn.net"]);

        assert_eq!(classify_simple(&d, Some(&result)).verdict, Verdict::Good);
    }

    #[test]
    fn active_with_unrelated_cname_is_issue() {
        let d = domain("b.example.com", Some(NetworkStatus::Active));
        let result = dns(&[], &["cdn.unrelated.net"]);

        let c = classify_simple(&d, Some(&result));
        assert_eq!(c.verdict, Verdict::Issue);
        assert_eq!(c.detail, "DNS not pointed to WPE");
    }

    #[test]
    fn active_not_resolving_is_issue() {
        let d = domain("b.example.com", Some(NetworkStatus::Active));
        let c = classify_simple(&d, Some(&unresolved()));
        assert_eq!(c.verdict, Verdict::Issue);
        assert_eq!(c.detail, DETAIL_NOT_RESOLVING);
    }

    #[test]
    fn active_without_check_trusts_provider() {
        let d = domain("b.example.com", Some(NetworkStatus::Active));
        let c = classify_simple(&d, None);
        assert_eq!(c.verdict, Verdict::Good);
        assert_eq!(c.detail, DETAIL_ACTIVE_API);
    }

    #[test]
    fn deleted_is_issue() {
        let d = domain("gone.example.com", Some(NetworkStatus::Deleted));
        let result = dns(&["141.193.213.10"], &[]);
        let c = classify_simple(&d, Some(&result));
        assert_eq!(c.verdict, Verdict::Issue);
        assert_eq!(c.detail, DETAIL_DELETED);
    }

    #[test]
    fn legacy_domain_decided_by_dns() {
        let d = domain("old.example.com", None);

        let pointed = dns(&["141.193.212.4"], &[]);
        let c = classify_simple(&d, Some(&pointed));
        assert_eq!((c.verdict, c.detail.as_str()), (Verdict::Good, DETAIL_LEGACY_POINTED));

        let elsewhere = dns(&["203.0.113.9"], &[]);
        let c = classify_simple(&d, Some(&elsewhere));
        assert_eq!((c.verdict, c.detail.as_str()), (Verdict::Issue, DETAIL_NOT_POINTED));

        let c = classify_simple(&d, Some(&unresolved()));
        assert_eq!((c.verdict, c.detail.as_str()), (Verdict::Issue, DETAIL_NOT_RESOLVING));
    }

    #[test]
    fn legacy_domain_without_dns_is_unknown() {
        let d = domain("c.example.com", None);
        let c = classify_simple(&d, None);
        assert_eq!(c.verdict, Verdict::Unknown);
        assert_eq!(c.detail, "No status data");
    }

    #[test]
    fn other_status_reports_raw_value() {
        let d = domain("m.example.com", Some(NetworkStatus::Other("MIGRATING".to_string())));
        let c = classify_simple(&d, Some(&dns(&["141.193.213.1"], &[])));
        assert_eq!(c.verdict, Verdict::Unknown);
        assert_eq!(c.detail, "MIGRATING");

        let d = domain("m.example.com", Some(NetworkStatus::Other("  ".to_string())));
        assert_eq!(classify_simple(&d, None).detail, "Unknown");
    }

    #[test]
    fn matches_provider_cname_suffix_is_label_aligned() {
        let index = DomainIndex::default();
        assert!(matches_provider(
            &dns(&[], &["edge.wpeproxy.com"]),
            None,
            &index,
            &fp()
        ));
        assert!(!matches_provider(
            &dns(&[], &["notwpengine.com"]),
            None,
            &index,
            &fp()
        ));
    }

    #[test]
    fn matches_provider_install_cname() {
        let custom = ProviderFingerprints {
            cname_suffixes: Vec::new(),
            ip_prefixes: Vec::new(),
            system_suffixes: Vec::new(),
        };
        let result = dns(&[], &["MySite.example-host.net."]);
        assert!(matches_provider(
            &result,
            Some("mysite.example-host.net"),
            &DomainIndex::default(),
            &custom
        ));
        assert!(!matches_provider(&result, None, &DomainIndex::default(), &custom));
    }

    #[test]
    fn matches_provider_cross_domain_chain() {
        let index: DomainIndex = ["www.example.com", "example.com"].into_iter().collect();
        let result = dns(&["203.0.113.9"], &["example.com"]);
        assert!(matches_provider(&result, None, &index, &fp()));
        assert!(!matches_provider(&result, None, &DomainIndex::default(), &fp()));
    }

    #[test]
    fn matches_provider_ip_prefix() {
        let index = DomainIndex::default();
        assert!(matches_provider(&dns(&["141.193.213.21"], &[]), None, &index, &fp()));
        assert!(!matches_provider(&dns(&["141.193.2.1"], &[]), None, &index, &fp()));
        assert!(!matches_provider(&unresolved(), None, &index, &fp()));
    }

    #[test]
    fn domain_index_normalizes_names() {
        let index: DomainIndex = ["WWW.Example.com.", ""].into_iter().collect();
        assert_eq!(index.len(), 1);
        assert!(index.contains("www.example.com"));
        assert!(index.contains("www.EXAMPLE.com."));
    }
}
