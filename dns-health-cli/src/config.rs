//! Configuration file handling
//!
//! ```toml
//! log_level = "info"
//!
//! [provider]
//! username = "api-user"
//! password = "api-password"
//!
//! [refresh]
//! install_concurrency = 10
//! dns_concurrency = 30
//! watch_interval_secs = 300
//!
//! [dns]
//! nameservers = ["1.1.1.1"]
//!
//! [storage]
//! overrides_path = "/var/lib/dns-health/overrides.json"
//!
//! [fingerprints]
//! cnameSuffixes = ["wpengine.com", "wpenginepowered.com", "wpeproxy.com"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Deserialize;

use dns_health_core::types::{ProviderFingerprints, RefreshOptions};
use dns_health_provider::{mask_secret, ProviderCredentials};

const APP_DIR: &str = "dns-health";
const CONFIG_FILE: &str = "config.toml";
const OVERRIDES_FILE: &str = "overrides.json";

pub const ENV_API_USER: &str = "WPE_API_USER";
pub const ENV_API_PASSWORD: &str = "WPE_API_PASSWORD";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub provider: ProviderConfig,
    pub fingerprints: ProviderFingerprints,
    pub refresh: RefreshConfig,
    pub dns: DnsConfig,
    pub storage: StorageConfig,
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub base_url: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_deref().map(mask_secret))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub install_concurrency: usize,
    pub dns_concurrency: usize,
    /// `watch` 命令的默认刷新间隔（秒）
    pub watch_interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        let options = RefreshOptions::default();
        Self {
            install_concurrency: options.install_concurrency,
            dns_concurrency: options.dns_concurrency,
            watch_interval_secs: 300,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DnsConfig {
    /// Empty means the system resolver configuration.
    pub nameservers: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub overrides_path: Option<PathBuf>,
}

/// `~/.config/dns-health/config.toml` (platform equivalent).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

impl Config {
    /// Load from `path`, or the default location when `None`.
    ///
    /// A missing file yields the defaults. Credentials from the environment
    /// are applied on top.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.map(Path::to_path_buf).or_else(default_config_path);
        let mut config = match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::from_toml_str(&content)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            _ => Self::default(),
        };
        config.apply_credentials(
            std::env::var(ENV_API_USER).ok(),
            std::env::var(ENV_API_PASSWORD).ok(),
        );
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Non-empty values replace the ones read from the file.
    pub fn apply_credentials(&mut self, username: Option<String>, password: Option<String>) {
        if let Some(username) = username.filter(|v| !v.trim().is_empty()) {
            self.provider.username = Some(username);
        }
        if let Some(password) = password.filter(|v| !v.trim().is_empty()) {
            self.provider.password = Some(password);
        }
    }

    pub fn credentials(&self) -> anyhow::Result<ProviderCredentials> {
        let (Some(username), Some(password)) = (
            self.provider.username.clone(),
            self.provider.password.clone(),
        ) else {
            bail!(
                "WP Engine credentials missing: set [provider] username/password \
                 or {ENV_API_USER}/{ENV_API_PASSWORD}"
            );
        };
        Ok(ProviderCredentials::WpEngine {
            username,
            password,
            base_url: self.provider.base_url.clone(),
        })
    }

    pub fn refresh_options(&self) -> RefreshOptions {
        RefreshOptions {
            install_concurrency: self.refresh.install_concurrency,
            dns_concurrency: self.refresh.dns_concurrency,
        }
    }

    pub fn overrides_path(&self) -> PathBuf {
        self.storage.overrides_path.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join(OVERRIDES_FILE)
        })
    }

    /// `RUST_LOG` wins over `log_level`.
    pub fn log_filter(&self) -> String {
        std::env::var("RUST_LOG")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.log_level.clone())
            .unwrap_or_else(|| "info".to_string())
    }
}
