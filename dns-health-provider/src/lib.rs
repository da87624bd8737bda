//! # dns-health-provider
//!
//! Hosting provider abstraction for DNS health monitoring. A provider is the
//! source of *declared* state: which installs exist, which domains they own,
//! and what network status and DNS targets the provider believes each domain has.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [WP Engine](https://wpengineapi.com/) | `wpengine` | HTTP Basic |
//!
//! ## Feature Flags
//!
//! - **`wpengine`** *(default)*: WP Engine hosting API.
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls instead.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_health_provider::{create_provider, HostingProvider, ProviderCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ProviderCredentials::WpEngine {
//!         username: "api-user".to_string(),
//!         password: "api-password".to_string(),
//!         base_url: None,
//!     })?;
//!
//!     for install in provider.list_installs().await? {
//!         let domains = provider.list_domains(&install.id).await?;
//!         println!("{}: {} domains", install.name, domains.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! Requests are never retried; callers decide whether a failure is fatal.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use factory::create_provider;

// Internal traits (error mapper) are not exported
pub use traits::HostingProvider;

pub use types::{
    Domain, ExpectedTargets, Install, MAX_PAGE_SIZE, NetworkStatus, Page, PageParams,
    ProviderCredentials,
};

pub use providers::common::{has_domain_suffix, normalize_domain_name};
pub use utils::log_sanitizer::mask_secret;

#[cfg(feature = "wpengine")]
pub use providers::WpEngineProvider;
