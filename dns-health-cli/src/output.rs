//! 终端输出格式化

use std::fmt::Write as _;

use dns_health_core::types::{OverrideMap, Snapshot, Verdict, VerdictCounts};

const VERDICTS: [Verdict; 6] = [
    Verdict::Good,
    Verdict::Issue,
    Verdict::Pending,
    Verdict::Confirmed,
    Verdict::Unknown,
    Verdict::System,
];

fn counts_line(counts: &VerdictCounts) -> String {
    VERDICTS
        .iter()
        .map(|v| format!("{v}={}", counts.get(*v)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn dns_summary(report: &dns_health_core::types::DomainReport) -> String {
    match &report.dns {
        None => "-".to_string(),
        Some(dns) if !dns.resolved => "unresolved".to_string(),
        Some(dns) => dns
            .cnames
            .iter()
            .chain(dns.a_records.iter())
            .cloned()
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// One-line roll-up of a snapshot.
pub fn format_statistics(snapshot: &Snapshot) -> String {
    let stats = &snapshot.statistics;
    let generated = stats
        .generated_at
        .map_or_else(|| "never".to_string(), |t| t.to_rfc3339());
    format!(
        "{} sites, {} domains ({} custom) | {} | generated {generated}",
        stats.site_count,
        stats.domain_count,
        stats.custom_domain_count,
        counts_line(&stats.counts),
    )
}

/// Per-site verdict counts.
pub fn format_site_table(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<32} {:<12} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5}",
        "SITE", "ENV", "GOOD", "ISSUE", "PEND", "CONF", "UNKN", "SYS"
    );
    for site in &snapshot.sites {
        let c = &site.counts;
        let _ = writeln!(
            out,
            "{:<32} {:<12} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5}",
            site.name,
            site.environment.as_deref().unwrap_or("-"),
            c.good,
            c.issue,
            c.pending,
            c.confirmed,
            c.unknown,
            c.system
        );
    }
    out.push_str(&format_statistics(snapshot));
    out
}

/// Every domain with its verdict, grouped by site.
pub fn format_domain_table(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for site in &snapshot.sites {
        let _ = writeln!(out, "{} ({})", site.name, site.id);
        for report in &site.domains {
            let _ = writeln!(
                out,
                "  {:<10} {:<40} {:<24} {}",
                report.verdict.as_str(),
                report.domain.name,
                report.detail,
                dns_summary(report)
            );
        }
    }
    out.push_str(&format_statistics(snapshot));
    out
}

pub fn format_overrides(overrides: &OverrideMap) -> String {
    if overrides.is_empty() {
        return "No confirmed domains".to_string();
    }
    overrides
        .iter()
        .map(|(name, record)| format!("{name:<40} {}", record.confirmed_at.to_rfc3339()))
        .collect::<Vec<_>>()
        .join("\n")
}
