//! Platform-agnostic application bootstrap for DNS Health.
//!
//! Provides `AppState` (service container) and `AppStateBuilder` (adapter injection).
//! Every frontend reads snapshots through `AppState` so operator overrides are
//! always projected onto what it displays.

pub mod adapters;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dns_health_core::error::{CoreError, CoreResult};
use dns_health_core::services::{OverrideService, RefreshService, ServiceContext};
use dns_health_core::traits::{
    DnsResolver, InMemoryOverrideRepository, OverrideRepository, SystemDnsResolver,
};
use dns_health_core::types::{
    ConfirmationState, OverrideMap, ProviderFingerprints, RefreshOptions, RefreshProgress,
    Snapshot,
};
use dns_health_provider::{create_provider, HostingProvider, ProviderCredentials};

/// Platform-agnostic application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (provider, resolver, override storage)
    pub ctx: Arc<ServiceContext>,
    /// Single-flight refresh orchestrator
    pub refresh_service: RefreshService,
    /// Operator overrides
    pub override_service: Arc<OverrideService>,
    /// Whether persisted overrides have been loaded
    pub startup_completed: AtomicBool,
}

impl AppState {
    /// Run the startup sequence: load persisted overrides.
    ///
    /// An unreadable override store is logged and treated as empty.
    pub async fn run_startup(&self) {
        let count = self.override_service.load().await;
        log::info!("Startup complete: {count} overrides restored");
        self.startup_completed.store(true, Ordering::SeqCst);
    }

    /// Check the configured provider credentials.
    pub async fn validate_credentials(&self) -> CoreResult<bool> {
        Ok(self.ctx.provider.validate_credentials().await?)
    }

    /// Latest snapshot with overrides applied. Never triggers a refresh.
    pub async fn get_current_snapshot(&self) -> Snapshot {
        let snapshot = self.refresh_service.current_snapshot().await;
        self.override_service.project(&snapshot).await
    }

    /// Run (or join) a refresh and return its snapshot with overrides applied.
    ///
    /// On failure the previous snapshot stays current.
    pub async fn trigger_refresh(&self) -> CoreResult<Snapshot> {
        let snapshot = self.refresh_service.refresh().await?;
        Ok(self.override_service.project(&snapshot).await)
    }

    pub async fn get_refresh_progress(&self) -> RefreshProgress {
        self.refresh_service.progress().await
    }

    /// Error from the most recent refresh, cleared by the next success.
    pub async fn last_refresh_error(&self) -> Option<CoreError> {
        self.refresh_service.last_error().await
    }

    pub async fn confirm_domain(&self, name: &str) -> CoreResult<ConfirmationState> {
        self.override_service.confirm(name).await
    }

    pub async fn unconfirm_domain(&self, name: &str) -> CoreResult<ConfirmationState> {
        self.override_service.unconfirm(name).await
    }

    pub async fn list_overrides(&self) -> OverrideMap {
        self.override_service.list().await
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required
/// - `provider` or `credentials`: source of declared state
///
/// # Optional
/// - `resolver`: defaults to `SystemDnsResolver` with system nameservers
/// - `override_repository`: defaults to `InMemoryOverrideRepository`
/// - `fingerprints` / `options`: default WP Engine fingerprints, 10/30 concurrency
pub struct AppStateBuilder {
    provider: Option<Arc<dyn HostingProvider>>,
    credentials: Option<ProviderCredentials>,
    resolver: Option<Arc<dyn DnsResolver>>,
    override_repository: Option<Arc<dyn OverrideRepository>>,
    fingerprints: ProviderFingerprints,
    options: RefreshOptions,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            provider: None,
            credentials: None,
            resolver: None,
            override_repository: None,
            fingerprints: ProviderFingerprints::default(),
            options: RefreshOptions::default(),
        }
    }

    /// Use an already constructed provider. Takes precedence over `credentials`.
    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn HostingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Build the provider from credentials at `build()` time.
    #[must_use]
    pub fn credentials(mut self, credentials: ProviderCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    #[must_use]
    pub fn resolver(mut self, resolver: Arc<dyn DnsResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn override_repository(mut self, repo: Arc<dyn OverrideRepository>) -> Self {
        self.override_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn fingerprints(mut self, fingerprints: ProviderFingerprints) -> Self {
        self.fingerprints = fingerprints;
        self
    }

    #[must_use]
    pub fn options(mut self, options: RefreshOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if neither a provider nor credentials
    /// were given, or a concurrency limit is zero. Provider construction errors
    /// are passed through.
    pub fn build(self) -> CoreResult<AppState> {
        if self.options.install_concurrency == 0 || self.options.dns_concurrency == 0 {
            return Err(CoreError::ValidationError(
                "concurrency limits must be at least 1".to_string(),
            ));
        }

        let provider = match (self.provider, self.credentials) {
            (Some(provider), _) => provider,
            (None, Some(credentials)) => create_provider(credentials)?,
            (None, None) => {
                return Err(CoreError::ValidationError(
                    "provider or credentials is required".to_string(),
                ));
            }
        };
        let resolver: Arc<dyn DnsResolver> = match self.resolver {
            Some(resolver) => resolver,
            None => Arc::new(SystemDnsResolver::new(&[])?),
        };
        let override_repository = self
            .override_repository
            .unwrap_or_else(|| Arc::new(InMemoryOverrideRepository::new()));

        let ctx = Arc::new(
            ServiceContext::new(provider, resolver, Arc::clone(&override_repository))
                .with_fingerprints(self.fingerprints)
                .with_options(self.options),
        );

        let refresh_service = RefreshService::new(Arc::clone(&ctx));
        let override_service = Arc::new(OverrideService::new(override_repository));

        Ok(AppState {
            ctx,
            refresh_service,
            override_service,
            startup_completed: AtomicBool::new(false),
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
