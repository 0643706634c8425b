//! Plan Store — the single persisted slot holding the last generated plan.
//!
//! One value lives in process memory and is mirrored into one JSON file so a
//! service restart restores the last result (but a deliberate file wipe does
//! not). `set` always overwrites; `clear` runs at the start of every new
//! generation attempt so a failed attempt never exposes a stale plan
//! alongside a fresh error.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to persist slot: {0}")]
    Persist(String),
}

/// The stored plan value. `text` is canonical markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPlan {
    pub text: String,
    pub saved_at: DateTime<Utc>,
}

impl StoredPlan {
    pub fn new(text: String) -> Self {
        Self {
            text,
            saved_at: Utc::now(),
        }
    }
}

/// Pluggable slot store. The service uses `FileSlotStore`; tests may swap in
/// their own.
#[async_trait]
pub trait SlotStore: Send + Sync {
    async fn set(&self, plan: StoredPlan) -> Result<(), StoreError>;
    async fn get(&self) -> Option<StoredPlan>;
    async fn clear(&self) -> Result<(), StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// File-backed implementation
// ────────────────────────────────────────────────────────────────────────────

/// Single-slot store backed by one JSON file, written atomically
/// (temp file + rename in the slot's directory).
pub struct FileSlotStore {
    path: PathBuf,
    current: RwLock<Option<StoredPlan>>,
}

impl FileSlotStore {
    /// Opens the store, restoring the slot from disk if present.
    ///
    /// A corrupt slot file is logged and treated as empty rather than failing
    /// startup — the slot is a convenience mirror, not a source of truth.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let restored = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<StoredPlan>(&raw) {
                Ok(plan) => {
                    info!(path = %path.display(), "Restored previous plan from slot");
                    Some(plan)
                }
                Err(e) => {
                    warn!(path = %path.display(), "Slot file unreadable, starting empty: {e}");
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(Self {
            path,
            current: RwLock::new(restored),
        })
    }

    fn write_slot(&self, plan: &StoredPlan) -> Result<(), StoreError> {
        let parent = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let json = serde_json::to_string_pretty(plan)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::Persist(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl SlotStore for FileSlotStore {
    async fn set(&self, plan: StoredPlan) -> Result<(), StoreError> {
        self.write_slot(&plan)?;
        *self.current.write().await = Some(plan);
        Ok(())
    }

    async fn get(&self) -> Option<StoredPlan> {
        self.current.read().await.clone()
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::Io(e)),
        }
        *self.current.write().await = None;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn slot_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("current_plan.json")
    }

    #[tokio::test]
    async fn test_set_get_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::open(slot_path(&dir)).unwrap();

        assert!(store.get().await.is_none());

        let plan = StoredPlan::new("# Plan body".to_string());
        store.set(plan.clone()).await.unwrap();
        assert_eq!(store.get().await.unwrap().text, "# Plan body");

        store.clear().await.unwrap();
        assert!(store.get().await.is_none());
        assert!(!slot_path(&dir).exists());
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::open(slot_path(&dir)).unwrap();

        store.set(StoredPlan::new("first".to_string())).await.unwrap();
        store.set(StoredPlan::new("second".to_string())).await.unwrap();

        assert_eq!(store.get().await.unwrap().text, "second");
    }

    #[tokio::test]
    async fn test_reopen_restores_slot_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = slot_path(&dir);

        {
            let store = FileSlotStore::open(&path).unwrap();
            store
                .set(StoredPlan::new("persisted plan".to_string()))
                .await
                .unwrap();
        }

        let reopened = FileSlotStore::open(&path).unwrap();
        assert_eq!(reopened.get().await.unwrap().text, "persisted plan");
    }

    #[tokio::test]
    async fn test_corrupt_slot_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = slot_path(&dir);
        std::fs::write(&path, "not json at all").unwrap();

        let store = FileSlotStore::open(&path).unwrap();
        assert!(store.get().await.is_none());
    }

    #[tokio::test]
    async fn test_clear_on_empty_slot_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::open(slot_path(&dir)).unwrap();
        store.clear().await.unwrap();
        assert!(store.get().await.is_none());
    }
}
