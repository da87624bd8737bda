//! Refresh 相关类型

use serde::{Deserialize, Serialize};

/// Concurrency limits of the refresh pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefreshOptions {
    /// Concurrent per-install domain listings.
    pub install_concurrency: usize,
    /// Concurrent DNS lookups.
    pub dns_concurrency: usize,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            install_concurrency: 10,
            dns_concurrency: 30,
        }
    }
}

/// What the refresh pipeline is doing right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshProgress {
    pub in_progress: bool,
    pub message: String,
}

impl Default for RefreshProgress {
    fn default() -> Self {
        Self {
            in_progress: false,
            message: "Idle".to_string(),
        }
    }
}
