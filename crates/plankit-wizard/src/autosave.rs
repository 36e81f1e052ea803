//! Debounced autosave of the in-progress plan
//!
//! Every change notification cancels the pending save and schedules a new
//! one after a fixed quiet period, so a burst of edits produces exactly
//! one write reflecting the last edit (last-write-wins, not a queue).
//! Saves fail open: a failed write is logged and the wizard keeps going.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use plankit_core::FormSnapshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::draft::DraftStore;

/// Quiet period before a change is persisted.
pub const AUTOSAVE_QUIET_PERIOD: Duration = Duration::from_secs(2);

type SaveCallback = dyn Fn(&FormSnapshot) + Send + Sync;

/// Schedules draft writes behind a cancellable debounce timer.
///
/// Requires a tokio runtime: [`Autosave::notify_change`] spawns the timer
/// task. Dropping the scheduler aborts any pending timer, so no stray
/// save runs after disposal.
pub struct Autosave {
    store: Arc<dyn DraftStore>,
    on_save: Option<Arc<SaveCallback>>,
    last_saved: Arc<Mutex<Option<DateTime<Utc>>>>,
    pending: Option<JoinHandle<()>>,
}

impl Autosave {
    pub fn new(store: Arc<dyn DraftStore>) -> Self {
        Self {
            store,
            on_save: None,
            last_saved: Arc::new(Mutex::new(None)),
            pending: None,
        }
    }

    /// Attach a side-effect callback invoked after every completed save.
    pub fn with_callback(
        store: Arc<dyn DraftStore>,
        on_save: impl Fn(&FormSnapshot) + Send + Sync + 'static,
    ) -> Self {
        Self {
            store,
            on_save: Some(Arc::new(on_save)),
            last_saved: Arc::new(Mutex::new(None)),
            pending: None,
        }
    }

    /// Record a form change: cancel any pending save and restart the
    /// quiet-period timer with this snapshot.
    pub fn notify_change(&mut self, snapshot: FormSnapshot) {
        self.cancel_pending();

        let store = Arc::clone(&self.store);
        let on_save = self.on_save.clone();
        let last_saved = Arc::clone(&self.last_saved);

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(AUTOSAVE_QUIET_PERIOD).await;
            persist(&*store, on_save.as_deref(), &last_saved, &snapshot);
        }));
    }

    /// Persist immediately (the explicit "save draft" action), cancelling
    /// any pending timer first.
    pub fn save_now(&mut self, snapshot: &FormSnapshot) {
        self.cancel_pending();
        persist(&*self.store, self.on_save.as_deref(), &self.last_saved, snapshot);
    }

    /// Read the stored draft, or None if absent or corrupt.
    pub fn load_draft(&self) -> Option<FormSnapshot> {
        self.store.load()
    }

    /// Delete the stored draft and unset the last-saved timestamp.
    pub fn clear_draft(&mut self) {
        self.cancel_pending();
        if let Err(e) = self.store.clear() {
            warn!("draft clear failed (fail-open): {}", e);
        }
        if let Ok(mut last) = self.last_saved.lock() {
            *last = None;
        }
    }

    /// When the draft was last written in this session, if ever.
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved.lock().ok().and_then(|last| *last)
    }

    /// Human-readable save status relative to now.
    pub fn format_last_saved(&self) -> String {
        format_relative(self.last_saved(), Utc::now())
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Autosave {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

fn persist(
    store: &dyn DraftStore,
    on_save: Option<&SaveCallback>,
    last_saved: &Mutex<Option<DateTime<Utc>>>,
    snapshot: &FormSnapshot,
) {
    if let Err(e) = store.save(snapshot) {
        warn!("draft autosave failed (fail-open): {}", e);
        return;
    }
    debug!("draft autosaved");
    if let Some(callback) = on_save {
        callback(snapshot);
    }
    if let Ok(mut last) = last_saved.lock() {
        *last = Some(Utc::now());
    }
}

/// Pure relative-time rendering of the last-saved timestamp.
pub fn format_relative(last_saved: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(saved) = last_saved else {
        return "Not saved".to_string();
    };

    let diff = now.signed_duration_since(saved).num_seconds();
    if diff < 60 {
        "Auto-saved now".to_string()
    } else if diff < 3600 {
        format!("Auto-saved {} min ago", diff / 60)
    } else if diff < 86400 {
        format!("Auto-saved {} hr ago", diff / 3600)
    } else {
        format!("Auto-saved {}", saved.format("%Y-%m-%d"))
    }
}
