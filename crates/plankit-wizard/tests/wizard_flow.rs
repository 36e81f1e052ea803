//! Full wizard lifecycle: restore a draft, edit with autosave, walk the
//! steps, submit, clear the draft, start over.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use plankit_core::{step_count, Field, FormSnapshot, PlanError, Result};
use plankit_wizard::{Autosave, DraftStore, MemDraftStore, SubmitSink, WizardController};

struct AcceptingSink;

#[async_trait]
impl SubmitSink for AcceptingSink {
    async fn submit(&self, _snapshot: &FormSnapshot) -> Result<()> {
        Ok(())
    }
}

struct RejectingSink;

#[async_trait]
impl SubmitSink for RejectingSink {
    async fn submit(&self, _snapshot: &FormSnapshot) -> Result<()> {
        Err(PlanError::SubmitFailed("service unavailable".to_string()))
    }
}

#[tokio::test(start_paused = true)]
async fn plan_lifecycle_from_draft_to_submission() {
    let store = Arc::new(MemDraftStore::new());
    let mut autosave = Autosave::new(store.clone());
    let mut wizard = WizardController::new();

    // A previous session left a half-finished draft behind
    let mut earlier = FormSnapshot::default();
    earlier.problem = "People waste time splitting bills".to_string();
    earlier.solution = "An app that calculates splits".to_string();
    store.save(&earlier).unwrap();

    let draft = autosave.load_draft().expect("draft should restore");
    wizard.restore(draft);
    assert_eq!(wizard.snapshot().problem, "People waste time splitting bills");

    // Finish step 0; every edit notifies the autosave scheduler
    wizard.set_text(Field::TargetUser, "young professionals").unwrap();
    autosave.notify_change(wizard.snapshot().clone());
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(store.load().unwrap().target_user, "young professionals");

    // Shortcut the remaining steps with a template, then walk to review
    wizard.apply_template(&plankit_core::template("ecommerce").unwrap());
    autosave.notify_change(wizard.snapshot().clone());
    tokio::time::sleep(Duration::from_secs(3)).await;

    while !wizard.on_last_step() {
        wizard.advance().unwrap();
    }
    assert_eq!(wizard.current_step(), step_count() - 1);

    // A rejected submit preserves everything for a retry
    let err = wizard.submit(&RejectingSink).await.unwrap_err();
    assert!(matches!(err, PlanError::SubmitFailed(_)));
    assert!(wizard.on_last_step());
    assert!(autosave.load_draft().is_some());

    // A successful submit lets the caller clear the draft and start over
    wizard.submit(&AcceptingSink).await.unwrap();
    autosave.clear_draft();
    assert!(autosave.load_draft().is_none());
    assert_eq!(autosave.format_last_saved(), "Not saved");

    wizard.reset();
    assert_eq!(wizard.current_step(), 0);
    assert_eq!(wizard.snapshot(), &FormSnapshot::default());
}
