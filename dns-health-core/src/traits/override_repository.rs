//! Override 持久化抽象 Trait

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CoreResult;
use crate::types::OverrideMap;

/// Override 仓库 Trait
///
/// The whole map is read at startup and rewritten on every change.
///
/// 平台实现:
/// - CLI / app: `JsonFileOverrideRepository` (JSON file)
/// - Tests: [`InMemoryOverrideRepository`]
#[async_trait]
pub trait OverrideRepository: Send + Sync {
    /// 读取全部 override
    ///
    /// A store that does not exist yet yields an empty map, not an error.
    async fn load_all(&self) -> CoreResult<OverrideMap>;

    /// 整体覆盖写入
    async fn save_all(&self, overrides: &OverrideMap) -> CoreResult<()>;
}

/// In-memory override repository
///
/// Non-durable; default for tests and ephemeral runs.
#[derive(Clone, Default)]
pub struct InMemoryOverrideRepository {
    overrides: Arc<RwLock<OverrideMap>>,
}

impl InMemoryOverrideRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OverrideRepository for InMemoryOverrideRepository {
    async fn load_all(&self) -> CoreResult<OverrideMap> {
        Ok(self.overrides.read().await.clone())
    }

    async fn save_all(&self, overrides: &OverrideMap) -> CoreResult<()> {
        *self.overrides.write().await = overrides.clone();
        Ok(())
    }
}
