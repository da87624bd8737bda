//! Snapshot 类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dns_health_provider::{Domain, Install};
use dns_health_toolbox::DnsResult;

/// Health verdict of one domain.
///
/// `Confirmed` is never produced by the classifier; it only appears when an
/// operator override is projected over an `Issue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Good,
    Issue,
    Pending,
    System,
    Confirmed,
    Unknown,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Issue => "issue",
            Self::Pending => "pending",
            Self::System => "system",
            Self::Confirmed => "confirmed",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-verdict domain counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictCounts {
    pub good: usize,
    pub issue: usize,
    pub pending: usize,
    pub system: usize,
    pub confirmed: usize,
    pub unknown: usize,
}

impl VerdictCounts {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Good => self.good += 1,
            Verdict::Issue => self.issue += 1,
            Verdict::Pending => self.pending += 1,
            Verdict::System => self.system += 1,
            Verdict::Confirmed => self.confirmed += 1,
            Verdict::Unknown => self.unknown += 1,
        }
    }

    pub fn merge(&mut self, other: &Self) {
        self.good += other.good;
        self.issue += other.issue;
        self.pending += other.pending;
        self.system += other.system;
        self.confirmed += other.confirmed;
        self.unknown += other.unknown;
    }

    pub fn get(&self, verdict: Verdict) -> usize {
        match verdict {
            Verdict::Good => self.good,
            Verdict::Issue => self.issue,
            Verdict::Pending => self.pending,
            Verdict::System => self.system,
            Verdict::Confirmed => self.confirmed,
            Verdict::Unknown => self.unknown,
        }
    }

    pub fn total(&self) -> usize {
        self.good + self.issue + self.pending + self.system + self.confirmed + self.unknown
    }

    pub fn from_reports<'a>(reports: impl IntoIterator<Item = &'a DomainReport>) -> Self {
        let mut counts = Self::default();
        for report in reports {
            counts.record(report.verdict);
        }
        counts
    }
}

/// A classified domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainReport {
    #[serde(flatten)]
    pub domain: Domain,
    /// Live lookup; `None` for system domains and names that were not checked.
    pub dns: Option<DnsResult>,
    pub verdict: Verdict,
    pub detail: String,
    /// 覆盖前的判定（仅 `Confirmed` 时有值）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_verdict: Option<Verdict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// An install with its classified domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteReport {
    pub id: String,
    pub name: String,
    pub environment: Option<String>,
    pub primary_domain: Option<String>,
    pub cname: Option<String>,
    pub domains: Vec<DomainReport>,
    pub counts: VerdictCounts,
}

impl SiteReport {
    /// `install.domains` is ignored; `domains` are the classified replacements.
    pub fn from_install(install: Install, domains: Vec<DomainReport>) -> Self {
        let counts = VerdictCounts::from_reports(&domains);
        Self {
            id: install.id,
            name: install.name,
            environment: install.environment,
            primary_domain: install.primary_domain,
            cname: install.cname,
            domains,
            counts,
        }
    }

    /// Recompute `counts` from `domains`.
    #[must_use]
    pub fn recounted(mut self) -> Self {
        self.counts = VerdictCounts::from_reports(&self.domains);
        self
    }
}

/// Global rollup of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub site_count: usize,
    pub domain_count: usize,
    /// Domains that are not provider-internal.
    pub custom_domain_count: usize,
    pub counts: VerdictCounts,
    /// `None` until the first refresh completes.
    pub generated_at: Option<DateTime<Utc>>,
}

/// The full classified state served to readers. Replaced wholesale, never edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub sites: Vec<SiteReport>,
    pub statistics: Statistics,
}

impl Snapshot {
    /// The snapshot served before the first refresh.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot, deriving every statistic from the site reports.
    pub fn from_sites(sites: Vec<SiteReport>, generated_at: Option<DateTime<Utc>>) -> Self {
        let mut counts = VerdictCounts::default();
        let mut domain_count = 0;
        for site in &sites {
            counts.merge(&site.counts);
            domain_count += site.domains.len();
        }
        let statistics = Statistics {
            site_count: sites.len(),
            domain_count,
            custom_domain_count: domain_count.saturating_sub(counts.system),
            counts,
            generated_at,
        };
        Self { sites, statistics }
    }

    pub fn is_empty(&self) -> bool {
        self.statistics.generated_at.is_none() && self.sites.is_empty()
    }

    /// All domain reports, site by site.
    pub fn domains(&self) -> impl Iterator<Item = &DomainReport> {
        self.sites.iter().flat_map(|s| s.domains.iter())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use dns_health_provider::ExpectedTargets;

    fn report(name: &str, verdict: Verdict) -> DomainReport {
        DomainReport {
            domain: Domain {
                id: name.to_string(),
                name: name.to_string(),
                primary: false,
                network_type: None,
                redirects_to: None,
                is_system: verdict == Verdict::System,
                network_status: None,
                ssl_status: None,
                expected: ExpectedTargets::default(),
            },
            dns: None,
            verdict,
            detail: String::new(),
            original_verdict: None,
            original_detail: None,
            confirmed_at: None,
        }
    }

    fn install(id: &str) -> Install {
        Install {
            id: id.to_string(),
            name: id.to_string(),
            environment: None,
            primary_domain: None,
            cname: None,
            domains: Vec::new(),
        }
    }

    #[test]
    fn site_counts_per_verdict() {
        let site = SiteReport::from_install(
            install("one"),
            vec![
                report("a.example.com", Verdict::Good),
                report("b.example.com", Verdict::Issue),
                report("c.example.com", Verdict::Issue),
                report("one.wpengine.com", Verdict::System),
            ],
        );
        assert_eq!(site.counts.good, 1);
        assert_eq!(site.counts.issue, 2);
        assert_eq!(site.counts.system, 1);
        assert_eq!(site.counts.total(), 4);
    }

    #[test]
    fn snapshot_statistics_roll_up_sites() {
        let sites = vec![
            SiteReport::from_install(
                install("one"),
                vec![
                    report("a.example.com", Verdict::Good),
                    report("one.wpengine.com", Verdict::System),
                ],
            ),
            SiteReport::from_install(
                install("two"),
                vec![report("b.example.com", Verdict::Pending)],
            ),
        ];
        let snapshot = Snapshot::from_sites(sites, Some(Utc::now()));

        assert_eq!(snapshot.statistics.site_count, 2);
        assert_eq!(snapshot.statistics.domain_count, 3);
        assert_eq!(snapshot.statistics.custom_domain_count, 2);
        assert_eq!(snapshot.statistics.counts.get(Verdict::Pending), 1);
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = Snapshot::empty();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.statistics.domain_count, 0);
        assert_eq!(snapshot.domains().count(), 0);
    }

    #[test]
    fn domain_report_flattens_domain() {
        let json = serde_json::to_value(report("a.example.com", Verdict::Issue)).unwrap();
        assert_eq!(json["name"], "a.example.com");
        assert_eq!(json["verdict"], "issue");
        assert!(json.get("originalVerdict").is_none());
    }
}
