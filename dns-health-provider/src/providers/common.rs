//! Provider 公共工具函数

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};

// ============ HTTP Client ============

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(provider: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .user_agent(concat!("dns-health/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

// ============ 域名名称处理 ============

/// 规范化域名：去空白、小写、去掉末尾的点
pub fn normalize_domain_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// 判断 `name` 是否以 `suffix` 结尾（按标签边界对齐）
///
/// `"www.wpengine.com"` 和 `"wpengine.com"` 都匹配 `"wpengine.com"`，
/// `"notwpengine.com"` 不匹配。`suffix` 可带前导点。
pub fn has_domain_suffix(name: &str, suffix: &str) -> bool {
    let name = normalize_domain_name(name);
    let suffix = normalize_domain_name(suffix.trim_start_matches('.'));
    if suffix.is_empty() {
        return false;
    }
    name == suffix || name.ends_with(&format!(".{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_case_and_trailing_dot() {
        assert_eq!(normalize_domain_name(" WWW.Example.COM. "), "www.example.com");
    }

    #[test]
    fn suffix_is_label_aligned() {
        assert!(has_domain_suffix("site.wpengine.com", "wpengine.com"));
        assert!(has_domain_suffix("site.wpengine.com", ".wpengine.com"));
        assert!(has_domain_suffix("wpengine.com.", "wpengine.com"));
        assert!(!has_domain_suffix("notwpengine.com", "wpengine.com"));
        assert!(!has_domain_suffix("example.com", ""));
    }
}
