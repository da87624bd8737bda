//! 业务逻辑服务层

mod aggregator;
mod classifier;
mod override_service;
mod refresh_service;

pub use aggregator::aggregate;
pub use classifier::{classify, is_system_domain, matches_provider, Classification, DomainIndex};
pub use override_service::{project_overrides, OverrideService, CONFIRMED_DETAIL};
pub use refresh_service::RefreshService;

use std::sync::Arc;

use dns_health_provider::HostingProvider;

use crate::traits::{DnsResolver, OverrideRepository};
use crate::types::{ProviderFingerprints, RefreshOptions};

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的实现。
pub struct ServiceContext {
    /// Hosting provider（声明状态的来源）
    pub provider: Arc<dyn HostingProvider>,
    /// DNS 解析器
    pub resolver: Arc<dyn DnsResolver>,
    /// Override 持久化仓库
    pub override_repository: Arc<dyn OverrideRepository>,
    pub fingerprints: ProviderFingerprints,
    pub options: RefreshOptions,
}

impl ServiceContext {
    /// 创建服务上下文（默认指纹与并发配置）
    #[must_use]
    pub fn new(
        provider: Arc<dyn HostingProvider>,
        resolver: Arc<dyn DnsResolver>,
        override_repository: Arc<dyn OverrideRepository>,
    ) -> Self {
        Self {
            provider,
            resolver,
            override_repository,
            fingerprints: ProviderFingerprints::default(),
            options: RefreshOptions::default(),
        }
    }

    #[must_use]
    pub fn with_fingerprints(mut self, fingerprints: ProviderFingerprints) -> Self {
        self.fingerprints = fingerprints;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: RefreshOptions) -> Self {
        self.options = options;
        self
    }
}
