//! WP Engine error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::WpEngineProvider;

/// WP Engine reports failures through HTTP status codes; the body only carries a message.
/// Reference: <https://wpengineapi.com/reference>
impl ProviderErrorMapper for WpEngineProvider {
    fn provider_name(&self) -> &'static str {
        "wpengine"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.status {
            401 => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            403 => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            404 => match context.install_id {
                Some(install_id) => ProviderError::InstallNotFound {
                    provider: self.provider_name().to_string(),
                    install_id,
                    raw_message: Some(raw.message),
                },
                None => self.unknown_error(raw),
            },
            429 => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            },
            _ => self.unknown_error(raw),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn provider() -> WpEngineProvider {
        WpEngineProvider::new(String::new(), String::new()).unwrap()
    }

    #[test]
    fn unauthorized_is_invalid_credentials() {
        let err = provider().map_error(RawApiError::new(401, "Bad credentials"), ErrorContext::default());
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
    }

    #[test]
    fn forbidden_is_permission_denied() {
        let err = provider().map_error(RawApiError::new(403, "Forbidden"), ErrorContext::default());
        assert!(matches!(err, ProviderError::PermissionDenied { .. }));
    }

    #[test]
    fn not_found_with_install_context() {
        let err = provider().map_error(
            RawApiError::new(404, "Not found"),
            ErrorContext::install("abc-123"),
        );
        assert!(
            matches!(&err, ProviderError::InstallNotFound { install_id, .. } if install_id == "abc-123"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn not_found_without_context_is_unknown() {
        let err = provider().map_error(RawApiError::new(404, "Not found"), ErrorContext::default());
        assert!(
            matches!(&err, ProviderError::Unknown { raw_code: Some(code), .. } if code == "404"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn other_status_falls_back_to_unknown() {
        let err = provider().map_error(RawApiError::new(500, "oops"), ErrorContext::default());
        assert!(matches!(err, ProviderError::Unknown { .. }));
    }
}
