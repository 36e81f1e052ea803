//! Draft persistence: one snapshot, one slot
//!
//! The draft store is a single shared mutable slot with overwrite
//! semantics. The latest write fully replaces the prior value; there is
//! no history and no merge. Reads fail open: a missing, corrupt, or
//! unreadable draft loads as `None` so the wizard behaves as if no draft
//! exists.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use plankit_core::{FormSnapshot, PlanError, Result};
use tracing::warn;

/// Fixed key the serialized snapshot is stored under.
pub const DRAFT_KEY: &str = "mvp-form-draft";

/// Single-slot persistence for an in-progress plan.
pub trait DraftStore: Send + Sync {
    /// Serialize and write the snapshot, replacing any prior draft.
    fn save(&self, snapshot: &FormSnapshot) -> Result<()>;

    /// Read the stored draft. Absent or corrupt content loads as `None`;
    /// corruption is logged, never surfaced.
    fn load(&self) -> Option<FormSnapshot>;

    /// Delete the stored draft. Clearing an empty slot succeeds.
    fn clear(&self) -> Result<()>;
}

/// Draft store backed by one JSON file in a state directory.
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    /// Store the draft as `<dir>/mvp-form-draft.json`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", DRAFT_KEY)),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DraftStore for FileDraftStore {
    fn save(&self, snapshot: &FormSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn load(&self) -> Option<FormSnapshot> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("draft read failed (fail-open): {}", e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("discarding corrupt draft {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PlanError::Storage(format!(
                "failed to clear draft {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// In-memory draft store for tests and headless embedding.
///
/// Holds the serialized form so save/load exercises the same round-trip
/// as the file store, and counts writes so debounce coalescing is
/// observable.
#[derive(Default)]
pub struct MemDraftStore {
    slot: Mutex<Option<String>>,
    saves: Mutex<usize>,
}

impl MemDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed writes.
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or(0)
    }

    /// Replace the stored content with raw text, bypassing serialization.
    /// Lets tests plant a corrupt draft.
    pub fn put_raw(&self, content: impl Into<String>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(content.into());
        }
    }
}

impl DraftStore for MemDraftStore {
    fn save(&self, snapshot: &FormSnapshot) -> Result<()> {
        let content = serde_json::to_string(snapshot)?;
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(content);
        }
        if let Ok(mut saves) = self.saves.lock() {
            *saves += 1;
        }
        Ok(())
    }

    fn load(&self) -> Option<FormSnapshot> {
        let content = self.slot.lock().ok()?.clone()?;
        match serde_json::from_str(&content) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("discarding corrupt draft under {}: {}", DRAFT_KEY, e);
                None
            }
        }
    }

    fn clear(&self) -> Result<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}
