//! WP Engine hosting provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;

pub(crate) use types::{WpeDomain, WpeInstall, WpeListResponse};

pub(crate) const WPE_API_BASE: &str = "https://api.wpengineapi.com/v1";

/// WP Engine hosting provider
pub struct WpEngineProvider {
    pub(crate) client: Client,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) base_url: String,
}

impl WpEngineProvider {
    pub fn new(username: String, password: String) -> Result<Self> {
        Self::with_base_url(username, password, WPE_API_BASE)
    }

    /// Point the provider at a different API root (staging endpoint, test server).
    pub fn with_base_url(username: String, password: String, base_url: &str) -> Result<Self> {
        Ok(Self {
            client: create_http_client("wpengine")?,
            username,
            password,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}
