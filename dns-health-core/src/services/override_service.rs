//! 人工确认（override）管理服务

use std::sync::Arc;

use tokio::sync::RwLock;

use dns_health_provider::normalize_domain_name;

use crate::error::{CoreError, CoreResult};
use crate::traits::OverrideRepository;
use crate::types::{ConfirmationState, OverrideMap, OverrideRecord, Snapshot, Verdict};

/// Detail shown for a domain whose `issue` verdict was overridden.
pub const CONFIRMED_DETAIL: &str = "Manually confirmed";

/// 最长域名长度
const MAX_DOMAIN_NAME_LEN: usize = 253;

/// Override 管理服务
///
/// Keeps the override map in memory and rewrites the whole map through the
/// repository on every change.
pub struct OverrideService {
    repository: Arc<dyn OverrideRepository>,
    overrides: RwLock<OverrideMap>,
}

impl OverrideService {
    #[must_use]
    pub fn new(repository: Arc<dyn OverrideRepository>) -> Self {
        Self {
            repository,
            overrides: RwLock::new(OverrideMap::new()),
        }
    }

    /// Read persisted overrides, replacing the in-memory map.
    ///
    /// A read failure degrades to an empty map. Returns the number loaded.
    pub async fn load(&self) -> usize {
        let loaded = match self.repository.load_all().await {
            Ok(map) => map,
            Err(e) => {
                log::warn!("Failed to load overrides, starting with none: {e}");
                OverrideMap::new()
            }
        };
        let count = loaded.len();
        *self.overrides.write().await = loaded;
        log::info!("Loaded {count} domain overrides");
        count
    }

    /// Mark `name` as manually confirmed.
    ///
    /// Confirming an already-confirmed name keeps its original timestamp.
    pub async fn confirm(&self, name: &str) -> CoreResult<ConfirmationState> {
        let name = validate_name(name)?;
        let mut overrides = self.overrides.write().await;

        if let Some(existing) = overrides.get(&name) {
            return Ok(ConfirmationState {
                confirmed_at: Some(existing.confirmed_at),
                domain: name,
                confirmed: true,
            });
        }

        let record = OverrideRecord::now();
        overrides.insert(name.clone(), record.clone());
        if let Err(e) = self.repository.save_all(&overrides).await {
            overrides.remove(&name);
            log::error!("Failed to persist confirmation of {name}: {e}");
            return Err(into_storage_error(e));
        }

        log::info!("Domain {name} confirmed");
        Ok(ConfirmationState {
            domain: name,
            confirmed: true,
            confirmed_at: Some(record.confirmed_at),
        })
    }

    /// Remove the override of `name`. A never-confirmed name is a no-op.
    pub async fn unconfirm(&self, name: &str) -> CoreResult<ConfirmationState> {
        let name = validate_name(name)?;
        let mut overrides = self.overrides.write().await;

        let Some(previous) = overrides.remove(&name) else {
            return Ok(ConfirmationState {
                domain: name,
                confirmed: false,
                confirmed_at: None,
            });
        };

        if let Err(e) = self.repository.save_all(&overrides).await {
            overrides.insert(name.clone(), previous);
            log::error!("Failed to persist removal of {name}: {e}");
            return Err(into_storage_error(e));
        }

        log::info!("Domain {name} unconfirmed");
        Ok(ConfirmationState {
            domain: name,
            confirmed: false,
            confirmed_at: None,
        })
    }

    pub async fn is_confirmed(&self, name: &str) -> bool {
        self.overrides
            .read()
            .await
            .contains_key(&normalize_domain_name(name))
    }

    pub async fn list(&self) -> OverrideMap {
        self.overrides.read().await.clone()
    }

    /// Apply the current overrides to `snapshot` without modifying it.
    pub async fn project(&self, snapshot: &Snapshot) -> Snapshot {
        let overrides = self.overrides.read().await;
        project_overrides(snapshot, &overrides)
    }
}

/// Rewrite every `issue` domain with an override to `confirmed`, keeping the
/// classifier's verdict and reason in the `original_*` fields, and recount.
pub fn project_overrides(snapshot: &Snapshot, overrides: &OverrideMap) -> Snapshot {
    if overrides.is_empty() {
        return snapshot.clone();
    }

    let sites = snapshot
        .sites
        .iter()
        .map(|site| {
            let mut site = site.clone();
            for report in &mut site.domains {
                if report.verdict != Verdict::Issue {
                    continue;
                }
                if let Some(record) = overrides.get(&normalize_domain_name(&report.domain.name)) {
                    report.original_verdict = Some(report.verdict);
                    report.original_detail =
                        Some(std::mem::replace(&mut report.detail, CONFIRMED_DETAIL.to_string()));
                    report.verdict = Verdict::Confirmed;
                    report.confirmed_at = Some(record.confirmed_at);
                }
            }
            site.recounted()
        })
        .collect();

    Snapshot::from_sites(sites, snapshot.statistics.generated_at)
}

fn validate_name(name: &str) -> CoreResult<String> {
    let name = normalize_domain_name(name);
    if name.is_empty() {
        return Err(CoreError::ValidationError(
            "Domain name is required".to_string(),
        ));
    }
    if name.len() > MAX_DOMAIN_NAME_LEN {
        return Err(CoreError::ValidationError(format!(
            "Domain name exceeds maximum length of {MAX_DOMAIN_NAME_LEN} characters"
        )));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(CoreError::ValidationError(format!(
            "Invalid domain name: {name}"
        )));
    }
    Ok(name)
}

fn into_storage_error(e: CoreError) -> CoreError {
    match e {
        CoreError::StorageError(_) => e,
        other => CoreError::StorageError(other.to_string()),
    }
}
