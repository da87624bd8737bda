//! Provider fingerprint 定义

use serde::{Deserialize, Serialize};

/// Markers that identify DNS answers pointing at the hosting provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderFingerprints {
    /// A CNAME ending in one of these (label-aligned) points at the provider.
    pub cname_suffixes: Vec<String>,
    /// An A record starting with one of these points at the provider.
    pub ip_prefixes: Vec<String>,
    /// Domain names ending in one of these are provider-internal.
    pub system_suffixes: Vec<String>,
}

impl Default for ProviderFingerprints {
    fn default() -> Self {
        Self::wpengine()
    }
}

impl ProviderFingerprints {
    /// WP Engine 默认指纹
    pub fn wpengine() -> Self {
        Self {
            cname_suffixes: ["wpengine.com", "wpenginepowered.com", "wpeproxy.com"]
                .into_iter()
                .map(String::from)
                .collect(),
            ip_prefixes: ["141.193.213.", "141.193.212."]
                .into_iter()
                .map(String::from)
                .collect(),
            system_suffixes: [".wpengine.com", ".wpenginepowered.com"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
