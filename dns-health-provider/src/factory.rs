//! Provider factory functions.

use std::sync::Arc;

use crate::error::Result;
use crate::traits::HostingProvider;
use crate::types::ProviderCredentials;

#[cfg(feature = "wpengine")]
use crate::providers::WpEngineProvider;

/// Creates a [`HostingProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`] variant.
///
/// # Examples
///
/// ```rust,no_run
/// use dns_health_provider::{create_provider, ProviderCredentials};
///
/// let provider = create_provider(ProviderCredentials::WpEngine {
///     username: "api-user".to_string(),
///     password: "api-password".to_string(),
///     base_url: None,
/// }).unwrap();
/// ```
pub fn create_provider(credentials: ProviderCredentials) -> Result<Arc<dyn HostingProvider>> {
    match credentials {
        #[cfg(feature = "wpengine")]
        ProviderCredentials::WpEngine {
            username,
            password,
            base_url,
        } => {
            let provider = match base_url {
                Some(url) => WpEngineProvider::with_base_url(username, password, &url)?,
                None => WpEngineProvider::new(username, password)?,
            };
            Ok(Arc::new(provider))
        }
    }
}
