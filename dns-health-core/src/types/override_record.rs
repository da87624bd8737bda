//! Override 类型定义

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A manual "confirmed okay" marker for one domain name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideRecord {
    /// 确认时间（首次确认后不再修改）
    pub confirmed_at: DateTime<Utc>,
}

impl OverrideRecord {
    #[must_use]
    pub fn now() -> Self {
        Self {
            confirmed_at: Utc::now(),
        }
    }
}

/// Normalized domain name → override. Ordered so persisted files are stable.
pub type OverrideMap = BTreeMap<String, OverrideRecord>;

/// Result of a confirm / unconfirm call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationState {
    pub domain: String,
    pub confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
}
