//! JSON file-backed override repository
//!
//! File layout:
//!
//! ```json
//! { "overrides": { "shop.example.com": { "confirmedAt": "2026-01-01T00:00:00Z" } } }
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use dns_health_core::error::{CoreError, CoreResult};
use dns_health_core::traits::OverrideRepository;
use dns_health_core::types::OverrideMap;

const MAX_STORE_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10MB

#[derive(Debug, Default, Serialize, Deserialize)]
struct OverrideFile {
    #[serde(default)]
    overrides: OverrideMap,
}

/// Override repository persisted as a single JSON file.
///
/// Writes go to a sibling temp file that is then renamed over the target, so a
/// crash mid-write leaves the previous file intact.
pub struct JsonFileOverrideRepository {
    path: PathBuf,
}

impl JsonFileOverrideRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl OverrideRepository for JsonFileOverrideRepository {
    async fn load_all(&self) -> CoreResult<OverrideMap> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to access store file: {e}")))?;
        if !exists {
            log::debug!("Override file does not exist: {}", self.path.display());
            return Ok(OverrideMap::new());
        }

        // Check file size before reading
        let metadata = tokio::fs::metadata(&self.path).await.map_err(|e| {
            CoreError::StorageError(format!("Failed to read store file metadata: {e}"))
        })?;
        if metadata.len() > MAX_STORE_FILE_SIZE {
            return Err(CoreError::StorageError(format!(
                "Store file too large: {} bytes (max: {} bytes)",
                metadata.len(),
                MAX_STORE_FILE_SIZE
            )));
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to read store file: {e}")))?;
        if content.trim().is_empty() {
            return Ok(OverrideMap::new());
        }

        let file: OverrideFile = serde_json::from_str(&content)
            .map_err(|e| CoreError::SerializationError(format!("Invalid store format: {e}")))?;
        Ok(file.overrides)
    }

    async fn save_all(&self, overrides: &OverrideMap) -> CoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                CoreError::StorageError(format!("Failed to create store directory: {e}"))
            })?;
        }

        let file = OverrideFile {
            overrides: overrides.clone(),
        };
        let content = serde_json::to_string_pretty(&file)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, content)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to write store file: {e}")))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to replace store file: {e}")))?;

        log::debug!(
            "Saved {} overrides to {}",
            overrides.len(),
            self.path.display()
        );
        Ok(())
    }
}
