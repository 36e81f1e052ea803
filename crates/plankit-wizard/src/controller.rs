//! Wizard controller: the step state machine
//!
//! Each controller instance owns its own step index, snapshot, and
//! touched markers. Nothing is ambient or static, so several wizards can
//! run side by side and unit tests need no global setup.
//!
//! States are the step indices 0..=4. `advance` moves forward only when
//! the current step validates, `retreat` is unconditional, and `jump_to`
//! validates every step strictly before the target. There is no terminal
//! state: completion is signaled externally through [`WizardController::submit`],
//! after which [`WizardController::reset`] starts a new plan.

use async_trait::async_trait;
use plankit_core::{
    step_count, step_errors, steps, validate_step, Field, FormSnapshot, PlanError, PlanTemplate,
    Result, StepValidation, TouchedFields,
};
use tracing::debug;

/// External collaborator that receives the completed plan.
#[async_trait]
pub trait SubmitSink: Send + Sync {
    /// Accept or reject the finished snapshot. On rejection the caller
    /// keeps all form state and offers a retry.
    async fn submit(&self, snapshot: &FormSnapshot) -> Result<()>;
}

/// Per-instance wizard state machine.
pub struct WizardController {
    current_step: usize,
    snapshot: FormSnapshot,
    touched: TouchedFields,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardController {
    /// Fresh wizard at step 0 with a blank form.
    pub fn new() -> Self {
        Self {
            current_step: 0,
            snapshot: FormSnapshot::default(),
            touched: TouchedFields::new(),
        }
    }

    /// Current step index, always in `[0, step_count)`.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Whether the wizard is on the final (review) step.
    pub fn on_last_step(&self) -> bool {
        self.current_step == step_count() - 1
    }

    /// Completion percentage for the progress bar.
    pub fn progress(&self) -> f32 {
        (self.current_step + 1) as f32 / step_count() as f32 * 100.0
    }

    /// The in-progress form value.
    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    /// Replace the form with a restored draft. The step index is left
    /// alone and touched markers are cleared, matching a fresh mount
    /// that offers draft restoration.
    pub fn restore(&mut self, draft: FormSnapshot) {
        self.snapshot = draft;
        self.touched.clear();
    }

    /// Fill the planning fields from a template, keeping whatever the
    /// user already entered for title and the optional prose fields.
    pub fn apply_template(&mut self, template: &PlanTemplate) {
        let t = &template.snapshot;
        self.snapshot.problem = t.problem.clone();
        self.snapshot.solution = t.solution.clone();
        self.snapshot.target_user = t.target_user.clone();
        self.snapshot.main_feature = t.main_feature.clone();
        self.snapshot.supporting_features = t.supporting_features.clone();
        self.snapshot.user_steps = t.user_steps.clone();
        self.snapshot.platform = t.platform.clone();
        self.snapshot.tech_needs = t.tech_needs.clone();
        self.snapshot.timeframe = t.timeframe.clone();
    }

    /// Set a text field and mark it touched.
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) -> Result<()> {
        let slot = self
            .snapshot
            .text_mut(field)
            .ok_or_else(|| PlanError::ValidationFailed(format!("{} is not a text field", field)))?;
        *slot = value.into();
        self.touched.mark(field);
        Ok(())
    }

    /// Append an entry to a sequence field and mark it touched.
    pub fn append_item(&mut self, field: Field, value: impl Into<String>) -> Result<()> {
        let list = self.list_field(field)?;
        list.push(value.into());
        self.touched.mark(field);
        Ok(())
    }

    /// Remove the entry at `index` from a sequence field.
    pub fn remove_item(&mut self, field: Field, index: usize) -> Result<()> {
        let list = self.list_field(field)?;
        if index >= list.len() {
            return Err(PlanError::OutOfRange {
                index,
                limit: list.len(),
            });
        }
        list.remove(index);
        self.touched.mark(field);
        Ok(())
    }

    /// Replace the entry at `index` in a sequence field.
    pub fn replace_item(&mut self, field: Field, index: usize, value: impl Into<String>) -> Result<()> {
        let list = self.list_field(field)?;
        let limit = list.len();
        let slot = list
            .get_mut(index)
            .ok_or(PlanError::OutOfRange { index, limit })?;
        *slot = value.into();
        self.touched.mark(field);
        Ok(())
    }

    /// Validity and touched status for one step.
    pub fn step_validation(&self, step_index: usize) -> Result<StepValidation> {
        validate_step(&self.snapshot, &self.touched, step_index)
    }

    /// Move to the next step if the current one validates.
    ///
    /// On a validation failure the step index is unchanged and the
    /// failing rules are reported. Advancing from the last step is a
    /// successful no-op (the index stays capped).
    pub fn advance(&mut self) -> Result<()> {
        let validation = self.step_validation(self.current_step)?;
        if !validation.is_valid {
            let messages: Vec<String> = step_errors(&self.snapshot, self.current_step)?
                .into_iter()
                .map(|(_, message)| message)
                .collect();
            return Err(PlanError::ValidationFailed(messages.join("; ")));
        }

        if self.current_step < step_count() - 1 {
            self.current_step += 1;
        }
        debug!("advanced to step {}", self.current_step);
        Ok(())
    }

    /// Move back one step, floored at 0. Backward navigation never
    /// validates.
    pub fn retreat(&mut self) {
        self.current_step = self.current_step.saturating_sub(1);
    }

    /// Jump directly to `target` after validating every step strictly
    /// before it, in order. The first failing step aborts without moving.
    ///
    /// The target step itself is not validated, so jumping into an
    /// incomplete step to fix it is allowed.
    pub fn jump_to(&mut self, target: usize) -> Result<()> {
        if target >= step_count() {
            return Err(PlanError::OutOfRange {
                index: target,
                limit: step_count(),
            });
        }

        for step in 0..target {
            let validation = self.step_validation(step)?;
            if !validation.is_valid {
                return Err(PlanError::ValidationFailed(format!(
                    "step {} (\"{}\") is incomplete",
                    step,
                    steps()[step].title
                )));
            }
        }

        self.current_step = target;
        Ok(())
    }

    /// Hand the completed snapshot to the submit collaborator and report
    /// its result. The step index is untouched either way; on failure
    /// the whole form state is preserved for a retry.
    pub async fn submit(&self, sink: &dyn SubmitSink) -> Result<()> {
        debug!("submitting plan \"{}\"", self.snapshot.title);
        sink.submit(&self.snapshot).await
    }

    /// Start over: step 0, blank form, nothing touched.
    pub fn reset(&mut self) {
        self.current_step = 0;
        self.snapshot = FormSnapshot::default();
        self.touched.clear();
    }

    fn list_field(&mut self, field: Field) -> Result<&mut Vec<String>> {
        self.snapshot
            .list_mut(field)
            .ok_or_else(|| PlanError::ValidationFailed(format!("{} is not a sequence field", field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingSink {
        accepted: Mutex<Vec<FormSnapshot>>,
        reject: bool,
    }

    impl RecordingSink {
        fn new(reject: bool) -> Self {
            Self {
                accepted: Mutex::new(Vec::new()),
                reject,
            }
        }
    }

    #[async_trait]
    impl SubmitSink for RecordingSink {
        async fn submit(&self, snapshot: &FormSnapshot) -> Result<()> {
            if self.reject {
                return Err(PlanError::SubmitFailed("backend said no".to_string()));
            }
            self.accepted.lock().unwrap().push(snapshot.clone());
            Ok(())
        }
    }

    fn fill_idea_step(wizard: &mut WizardController) {
        wizard
            .set_text(Field::Problem, "People waste time splitting bills")
            .unwrap();
        wizard
            .set_text(Field::Solution, "An app that calculates splits")
            .unwrap();
        wizard.set_text(Field::TargetUser, "young professionals").unwrap();
    }

    fn fill_features_step(wizard: &mut WizardController) {
        wizard
            .set_text(Field::MainFeature, "Scan a receipt and split it")
            .unwrap();
        wizard
            .replace_item(Field::SupportingFeatures, 0, "Payment reminders")
            .unwrap();
    }

    #[test]
    fn advance_is_blocked_while_the_step_is_invalid() {
        let mut wizard = WizardController::new();
        let err = wizard.advance().unwrap_err();
        assert!(matches!(err, PlanError::ValidationFailed(_)));
        assert_eq!(wizard.current_step(), 0);

        fill_idea_step(&mut wizard);
        wizard.advance().unwrap();
        assert_eq!(wizard.current_step(), 1);
    }

    #[test]
    fn retreat_floors_at_step_zero() {
        let mut wizard = WizardController::new();
        wizard.retreat();
        assert_eq!(wizard.current_step(), 0);

        fill_idea_step(&mut wizard);
        wizard.advance().unwrap();
        wizard.retreat();
        assert_eq!(wizard.current_step(), 0);
    }

    #[test]
    fn retreat_never_validates() {
        let mut wizard = WizardController::new();
        fill_idea_step(&mut wizard);
        wizard.advance().unwrap();

        // Break step 0, then walk back into it
        wizard.set_text(Field::Problem, "short").unwrap();
        wizard.retreat();
        assert_eq!(wizard.current_step(), 0);
    }

    #[test]
    fn jump_aborts_on_the_first_invalid_intervening_step() {
        let mut wizard = WizardController::new();
        fill_idea_step(&mut wizard);

        // Step 1 is still blank, so a jump past it must fail in place
        let err = wizard.jump_to(3).unwrap_err();
        assert!(matches!(err, PlanError::ValidationFailed(_)));
        assert_eq!(wizard.current_step(), 0);
    }

    #[test]
    fn jump_allows_entering_an_incomplete_target_step() {
        // Deliberate quirk: steps before the target are validated, the
        // target itself is not, so the user can jump into a step to fix it.
        let mut wizard = WizardController::new();
        fill_idea_step(&mut wizard);

        wizard.jump_to(1).unwrap();
        assert_eq!(wizard.current_step(), 1);
        assert!(!wizard.step_validation(1).unwrap().is_valid);
    }

    #[test]
    fn jump_rejects_out_of_range_targets_without_moving() {
        let mut wizard = WizardController::new();
        let err = wizard.jump_to(5).unwrap_err();
        assert!(matches!(err, PlanError::OutOfRange { index: 5, limit: 5 }));
        assert_eq!(wizard.current_step(), 0);
    }

    #[test]
    fn advance_caps_at_the_last_step() {
        let mut wizard = WizardController::new();
        wizard.restore(plankit_core::template("ecommerce").unwrap().snapshot);

        for _ in 0..10 {
            wizard.advance().unwrap();
        }
        assert!(wizard.on_last_step());
        assert_eq!(wizard.current_step(), step_count() - 1);
        assert_eq!(wizard.progress(), 100.0);
    }

    #[test]
    fn list_edits_enforce_bounds_and_mark_touched() {
        let mut wizard = WizardController::new();

        let err = wizard.remove_item(Field::Platform, 0).unwrap_err();
        assert!(matches!(err, PlanError::OutOfRange { .. }));

        wizard.append_item(Field::Platform, "Web app").unwrap();
        assert!(wizard.step_validation(3).unwrap().has_been_touched);

        let err = wizard.replace_item(Field::Platform, 3, "CLI").unwrap_err();
        assert!(matches!(err, PlanError::OutOfRange { index: 3, limit: 1 }));
    }

    #[test]
    fn text_and_list_edits_reject_mismatched_fields() {
        let mut wizard = WizardController::new();
        assert!(wizard.set_text(Field::Platform, "Web app").is_err());
        assert!(wizard.append_item(Field::Problem, "oops").is_err());
    }

    #[test]
    fn template_fill_keeps_user_entered_title() {
        let mut wizard = WizardController::new();
        wizard.set_text(Field::Title, "Bill Splitter").unwrap();
        wizard.apply_template(&plankit_core::template("social").unwrap());

        assert_eq!(wizard.snapshot().title, "Bill Splitter");
        assert!(wizard.step_validation(0).unwrap().is_valid);
    }

    #[tokio::test]
    async fn submit_delegates_and_preserves_state() {
        let mut wizard = WizardController::new();
        wizard.restore(plankit_core::template("productivity").unwrap().snapshot);
        wizard.jump_to(step_count() - 1).unwrap();

        let sink = RecordingSink::new(false);
        wizard.submit(&sink).await.unwrap();
        assert_eq!(sink.accepted.lock().unwrap().len(), 1);
        assert!(wizard.on_last_step(), "submit must not move the wizard");
    }

    #[tokio::test]
    async fn rejected_submit_keeps_the_form_for_retry() {
        let mut wizard = WizardController::new();
        wizard.restore(plankit_core::template("ecommerce").unwrap().snapshot);

        let sink = RecordingSink::new(true);
        let err = wizard.submit(&sink).await.unwrap_err();
        assert!(matches!(err, PlanError::SubmitFailed(_)));
        assert_eq!(wizard.snapshot().problem.is_empty(), false);

        // Retry against a working sink succeeds with the same snapshot
        let sink = RecordingSink::new(false);
        wizard.submit(&sink).await.unwrap();
    }

    #[test]
    fn reset_starts_a_new_plan() {
        let mut wizard = WizardController::new();
        fill_idea_step(&mut wizard);
        wizard.advance().unwrap();
        fill_features_step(&mut wizard);

        wizard.reset();
        assert_eq!(wizard.current_step(), 0);
        assert_eq!(wizard.snapshot(), &FormSnapshot::default());
        assert!(!wizard.step_validation(0).unwrap().has_been_touched);
    }
}
