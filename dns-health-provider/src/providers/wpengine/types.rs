//! WP Engine API 响应类型

use serde::Deserialize;

/// 列表接口统一响应包装
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct WpeListResponse<T> {
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default)]
    pub count: u32,
    /// 下一页 URL；最后一页为 null
    #[serde(default)]
    pub next: Option<String>,
}

/// 错误响应
#[derive(Debug, Deserialize)]
pub struct WpeErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WpeInstall {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub primary_domain: Option<String>,
    #[serde(default)]
    pub cname: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WpeDomain {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub network_type: Option<String>,
    #[serde(default)]
    pub redirects_to: Option<WpeRedirect>,
    #[serde(default)]
    pub network_details: Option<WpeNetworkDetails>,
}

#[derive(Debug, Deserialize)]
pub struct WpeRedirect {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WpeNetworkDetails {
    #[serde(default)]
    pub dns_config_info: Option<WpeDnsConfigInfo>,
    #[serde(default)]
    pub network_info: Option<WpeNetworkInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WpeDnsConfigInfo {
    #[serde(default)]
    pub cname: Option<String>,
    #[serde(default)]
    pub a_records: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WpeNetworkInfo {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ssl: Option<WpeSslInfo>,
}

#[derive(Debug, Deserialize)]
pub struct WpeSslInfo {
    #[serde(default)]
    pub status: Option<String>,
}
