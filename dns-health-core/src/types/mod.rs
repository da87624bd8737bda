//! 类型定义模块

mod fingerprint;
mod override_record;
mod refresh;
mod snapshot;

pub use fingerprint::ProviderFingerprints;
pub use override_record::{ConfirmationState, OverrideMap, OverrideRecord};
pub use refresh::{RefreshOptions, RefreshProgress};
pub use snapshot::{DomainReport, SiteReport, Snapshot, Statistics, Verdict, VerdictCounts};

// Re-export provider / toolbox 库的公共类型
pub use dns_health_provider::{Domain, ExpectedTargets, Install, NetworkStatus};
pub use dns_health_toolbox::DnsResult;
