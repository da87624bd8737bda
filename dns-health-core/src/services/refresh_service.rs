//! 刷新流水线
//!
//! list installs → list domains (bounded) → build index → DNS (bounded) →
//! classify → aggregate. Each stage is a full barrier.
//!
//! At most one pipeline runs at a time. Callers arriving mid-refresh subscribe
//! to the in-flight run's completion signal and receive its result.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tokio::sync::{watch, Mutex, RwLock};

use dns_health_provider::normalize_domain_name;

use crate::error::{CoreError, CoreResult};
use crate::services::aggregator::aggregate;
use crate::services::classifier::{is_system, DomainIndex};
use crate::services::ServiceContext;
use crate::types::{DnsResult, Install, RefreshProgress, Snapshot};

/// `None` while the run is in flight.
type RefreshOutcome = Option<CoreResult<Arc<Snapshot>>>;

/// 刷新服务
#[derive(Clone)]
pub struct RefreshService {
    inner: Arc<RefreshInner>,
}

struct RefreshInner {
    ctx: Arc<ServiceContext>,
    /// 当前快照（刷新成功后整体替换）
    snapshot: RwLock<Arc<Snapshot>>,
    progress: RwLock<RefreshProgress>,
    last_error: RwLock<Option<CoreError>>,
    /// 正在进行的刷新的完成信号
    in_flight: Mutex<Option<watch::Receiver<RefreshOutcome>>>,
    completed_runs: AtomicUsize,
}

impl RefreshService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            inner: Arc::new(RefreshInner {
                ctx,
                snapshot: RwLock::new(Arc::new(Snapshot::empty())),
                progress: RwLock::new(RefreshProgress::default()),
                last_error: RwLock::new(None),
                in_flight: Mutex::new(None),
                completed_runs: AtomicUsize::new(0),
            }),
        }
    }

    /// Run a refresh, or join the one already running.
    ///
    /// The pipeline runs on its own task and completes even if every caller
    /// goes away. On failure the previous snapshot stays live.
    pub async fn refresh(&self) -> CoreResult<Arc<Snapshot>> {
        let mut rx = {
            let mut slot = self.inner.in_flight.lock().await;
            match slot.as_ref() {
                // 发送端已销毁说明上一次任务异常退出，重新开始
                Some(rx) if rx.has_changed().is_ok() => {
                    log::debug!("Refresh already in progress, waiting for it");
                    rx.clone()
                }
                _ => {
                    let (tx, rx) = watch::channel(None);
                    *slot = Some(rx.clone());
                    let inner = Arc::clone(&self.inner);
                    tokio::spawn(async move { inner.run_and_publish(tx).await });
                    rx
                }
            }
        };

        let outcome = match rx.wait_for(Option::is_some).await {
            Ok(outcome) => (*outcome).clone(),
            Err(_) => None,
        };
        outcome.unwrap_or_else(|| {
            Err(CoreError::RefreshAborted(
                "refresh task ended without a result".to_string(),
            ))
        })
    }

    /// The live snapshot (empty before the first successful refresh).
    pub async fn current_snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.inner.snapshot.read().await)
    }

    pub async fn progress(&self) -> RefreshProgress {
        self.inner.progress.read().await.clone()
    }

    /// Error of the most recent refresh, cleared by the next success.
    pub async fn last_error(&self) -> Option<CoreError> {
        self.inner.last_error.read().await.clone()
    }

    /// Number of pipeline executions that have finished.
    pub fn completed_runs(&self) -> usize {
        self.inner.completed_runs.load(Ordering::SeqCst)
    }
}

impl RefreshInner {
    async fn run_and_publish(self: Arc<Self>, tx: watch::Sender<RefreshOutcome>) {
        let started = std::time::Instant::now();
        let result = self.run_pipeline().await.map(Arc::new);

        match &result {
            Ok(snapshot) => {
                *self.snapshot.write().await = Arc::clone(snapshot);
                *self.last_error.write().await = None;
                log::info!(
                    "Refresh complete: {} sites, {} domains in {:?}",
                    snapshot.statistics.site_count,
                    snapshot.statistics.domain_count,
                    started.elapsed()
                );
                self.set_progress(false, "Refresh complete").await;
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Refresh failed: {e}");
                } else {
                    log::error!("Refresh failed: {e}");
                }
                *self.last_error.write().await = Some(e.clone());
                self.set_progress(false, format!("Refresh failed: {e}")).await;
            }
        }

        self.completed_runs.fetch_add(1, Ordering::SeqCst);
        *self.in_flight.lock().await = None;
        // 没有等待者时发送失败，可以忽略
        let _ = tx.send(Some(result));
    }

    async fn run_pipeline(&self) -> CoreResult<Snapshot> {
        let ctx = &self.ctx;

        self.set_progress(true, "Fetching installs").await;
        let installs = ctx.provider.list_installs().await?;

        self.set_progress(true, format!("Fetching domains for {} installs", installs.len()))
            .await;
        let installs = self.fetch_domains(installs).await;

        let index = DomainIndex::from_installs(&installs);

        // 跨 install 重名的域名只查询一次
        let names: BTreeSet<String> = installs
            .iter()
            .flat_map(|install| install.domains.iter())
            .filter(|domain| !is_system(domain, &ctx.fingerprints))
            .map(|domain| normalize_domain_name(&domain.name))
            .collect();

        self.set_progress(true, format!("Checking DNS for {} domains", names.len()))
            .await;
        let dns = self.resolve_all(names).await;

        self.set_progress(true, "Classifying").await;
        Ok(aggregate(
            installs,
            &dns,
            &index,
            &ctx.fingerprints,
            Utc::now(),
        ))
    }

    /// A failed listing leaves the install with no domains.
    async fn fetch_domains(&self, installs: Vec<Install>) -> Vec<Install> {
        let provider = Arc::clone(&self.ctx.provider);
        stream::iter(installs)
            .map(move |mut install| {
                let provider = Arc::clone(&provider);
                async move {
                    match provider.list_domains(&install.id).await {
                        Ok(domains) => install.domains = domains,
                        Err(e) => {
                            log::warn!(
                                "Failed to list domains for install {} ({}): {e}",
                                install.name,
                                install.id
                            );
                            install.domains = Vec::new();
                        }
                    }
                    install
                }
            })
            .buffered(self.ctx.options.install_concurrency.max(1))
            .collect()
            .await
    }

    async fn resolve_all(&self, names: BTreeSet<String>) -> HashMap<String, DnsResult> {
        let resolver = Arc::clone(&self.ctx.resolver);
        stream::iter(names)
            .map(move |name| {
                let resolver = Arc::clone(&resolver);
                async move {
                    let result = resolver.resolve(&name).await;
                    (name, result)
                }
            })
            .buffer_unordered(self.ctx.options.dns_concurrency.max(1))
            .collect()
            .await
    }

    async fn set_progress(&self, in_progress: bool, message: impl Into<String>) {
        let message = message.into();
        log::debug!("Refresh progress: {message}");
        *self.progress.write().await = RefreshProgress {
            in_progress,
            message,
        };
    }
}
