//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dns_health_provider::{
    Domain, ExpectedTargets, HostingProvider, Install, NetworkStatus, Page, PageParams,
    ProviderError,
};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{DnsResolver, OverrideRepository};
use crate::types::{DnsResult, DomainReport, OverrideMap, SiteReport, Snapshot, Verdict};

// ===== Builders =====

pub fn dns(a_records: &[&str], cnames: &[&str]) -> DnsResult {
    DnsResult::new(
        a_records.iter().map(ToString::to_string).collect(),
        cnames.iter().map(ToString::to_string).collect(),
    )
}

pub fn unresolved() -> DnsResult {
    DnsResult::unresolved()
}

pub fn domain(name: &str, status: Option<NetworkStatus>) -> Domain {
    Domain {
        id: format!("id-{name}"),
        name: name.to_string(),
        primary: false,
        network_type: Some("AN".to_string()),
        redirects_to: None,
        is_system: false,
        network_status: status,
        ssl_status: None,
        expected: ExpectedTargets::default(),
    }
}

pub fn install(id: &str, cname: Option<&str>, domains: Vec<Domain>) -> Install {
    Install {
        id: id.to_string(),
        name: format!("site-{id}"),
        environment: Some("production".to_string()),
        primary_domain: domains.first().map(|d| d.name.clone()),
        cname: cname.map(String::from),
        domains,
    }
}

/// 单 site、单个 `issue` 域名的快照
pub fn issue_snapshot(name: &str) -> Snapshot {
    let report = DomainReport {
        domain: domain(name, Some(NetworkStatus::Active)),
        dns: Some(dns(&[], &["cdn.unrelated.net"])),
        verdict: Verdict::Issue,
        detail: "DNS not pointed to WPE".to_string(),
        original_verdict: None,
        original_detail: None,
        confirmed_at: None,
    };
    let site = SiteReport::from_install(install("one", None, Vec::new()), vec![report]);
    Snapshot::from_sites(vec![site], Some(Utc::now()))
}

/// Tracks how many calls overlap.
#[derive(Default)]
pub struct ConcurrencyProbe {
    current: AtomicUsize,
    max: AtomicUsize,
}

impl ConcurrencyProbe {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.max.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn max(&self) -> usize {
        self.max.load(Ordering::SeqCst)
    }
}

// ===== MockHostingProvider =====

pub struct MockHostingProvider {
    installs: RwLock<Vec<Install>>,
    /// list_domains 对这些 install 返回错误
    failing_installs: RwLock<HashSet<String>>,
    /// 如果 Some，list_installs_page 返回此错误
    list_error: RwLock<Option<ProviderError>>,
    delay: Duration,
    list_calls: AtomicUsize,
    pub domain_probe: ConcurrencyProbe,
}

impl MockHostingProvider {
    pub fn new(installs: Vec<Install>) -> Self {
        Self {
            installs: RwLock::new(installs),
            failing_installs: RwLock::new(HashSet::new()),
            list_error: RwLock::new(None),
            delay: Duration::from_millis(5),
            list_calls: AtomicUsize::new(0),
            domain_probe: ConcurrencyProbe::default(),
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn set_installs(&self, installs: Vec<Install>) {
        *self.installs.write().await = installs;
    }

    pub async fn fail_domains_for(&self, install_id: &str) {
        self.failing_installs
            .write()
            .await
            .insert(install_id.to_string());
    }

    pub async fn set_list_error(&self, err: Option<ProviderError>) {
        *self.list_error.write().await = err;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostingProvider for MockHostingProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn validate_credentials(&self) -> dns_health_provider::Result<bool> {
        Ok(true)
    }

    async fn list_installs_page(
        &self,
        _params: &PageParams,
    ) -> dns_health_provider::Result<Page<Install>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if let Some(err) = self.list_error.read().await.clone() {
            return Err(err);
        }
        let items: Vec<Install> = self
            .installs
            .read()
            .await
            .iter()
            .map(|i| Install {
                domains: Vec::new(),
                ..i.clone()
            })
            .collect();
        let total = u32::try_from(items.len()).unwrap_or(u32::MAX);
        Ok(Page::last(items, total))
    }

    async fn list_domains(&self, install_id: &str) -> dns_health_provider::Result<Vec<Domain>> {
        self.domain_probe.enter();
        tokio::time::sleep(self.delay).await;
        self.domain_probe.exit();

        if self.failing_installs.read().await.contains(install_id) {
            return Err(ProviderError::NetworkError {
                provider: "mock".to_string(),
                detail: "connection reset".to_string(),
            });
        }
        Ok(self
            .installs
            .read()
            .await
            .iter()
            .find(|i| i.id == install_id)
            .map(|i| i.domains.clone())
            .unwrap_or_default())
    }
}

// ===== MockDnsResolver =====

pub struct MockDnsResolver {
    results: HashMap<String, DnsResult>,
    queried: std::sync::Mutex<Vec<String>>,
    pub probe: ConcurrencyProbe,
}

impl MockDnsResolver {
    /// Names missing from `results` resolve to nothing.
    pub fn new(results: HashMap<String, DnsResult>) -> Self {
        Self {
            results,
            queried: std::sync::Mutex::new(Vec::new()),
            probe: ConcurrencyProbe::default(),
        }
    }

    pub fn queried(&self) -> Vec<String> {
        let mut names = self
            .queried
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default();
        names.sort();
        names
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, name: &str) -> DnsResult {
        if let Ok(mut q) = self.queried.lock() {
            q.push(name.to_string());
        }
        self.probe.enter();
        tokio::time::sleep(Duration::from_millis(2)).await;
        self.probe.exit();
        self.results.get(name).cloned().unwrap_or_default()
    }
}

// ===== MockOverrideRepository =====

pub struct MockOverrideRepository {
    overrides: RwLock<OverrideMap>,
    /// 如果 Some，save_all 时返回此错误
    save_error: RwLock<Option<String>>,
    /// 如果 Some，load_all 时返回此错误
    load_error: RwLock<Option<String>>,
    saves: AtomicUsize,
}

impl MockOverrideRepository {
    pub fn new() -> Self {
        Self {
            overrides: RwLock::new(OverrideMap::new()),
            save_error: RwLock::new(None),
            load_error: RwLock::new(None),
            saves: AtomicUsize::new(0),
        }
    }

    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }

    pub async fn set_load_error(&self, err: Option<String>) {
        *self.load_error.write().await = err;
    }

    pub async fn seed(&self, overrides: OverrideMap) {
        *self.overrides.write().await = overrides;
    }

    pub async fn stored(&self) -> OverrideMap {
        self.overrides.read().await.clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OverrideRepository for MockOverrideRepository {
    async fn load_all(&self) -> CoreResult<OverrideMap> {
        if let Some(ref msg) = *self.load_error.read().await {
            return Err(CoreError::SerializationError(msg.clone()));
        }
        Ok(self.overrides.read().await.clone())
    }

    async fn save_all(&self, overrides: &OverrideMap) -> CoreResult<()> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.overrides.write().await = overrides.clone();
        Ok(())
    }
}

// ===== 工厂方法 =====

/// 创建测试用 `ServiceContext`
pub fn create_test_context(
    provider: Arc<MockHostingProvider>,
    resolver: Arc<MockDnsResolver>,
) -> (Arc<ServiceContext>, Arc<MockOverrideRepository>) {
    let override_repo = Arc::new(MockOverrideRepository::new());
    let ctx = Arc::new(ServiceContext::new(
        provider,
        resolver,
        override_repo.clone(),
    ));
    (ctx, override_repo)
}
