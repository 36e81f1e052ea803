//! Validation gate for the wizard
//!
//! Purely functional: the same snapshot, touched set, and step index
//! always produce the same result. No hidden state, no I/O.

use std::collections::HashSet;

use crate::steps::fields_for_step;
use crate::types::{Field, FormSnapshot};
use crate::Result;

/// Derived validity of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepValidation {
    /// All required fields for the step currently pass their rules.
    pub is_valid: bool,
    /// At least one required field has received user input.
    pub has_been_touched: bool,
}

/// Set of fields the user has interacted with at least once.
///
/// Used to decide whether validation errors should be shown; a pristine
/// field can be invalid without being surfaced.
#[derive(Debug, Clone, Default)]
pub struct TouchedFields(HashSet<Field>);

impl TouchedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, field: Field) {
        self.0.insert(field);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.0.contains(&field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Check a single field against its declared rule.
///
/// Returns the user-facing message on failure. Rules mirror the plan
/// schema: minimum lengths for prose fields, minimum cardinality of
/// non-blank entries for sequence fields, non-empty single choices.
pub fn check_field(snapshot: &FormSnapshot, field: Field) -> std::result::Result<(), String> {
    match field {
        Field::Problem => require_min_chars(
            &snapshot.problem,
            10,
            "Problem description must be at least 10 characters",
        ),
        Field::Solution => require_min_chars(
            &snapshot.solution,
            10,
            "Solution description must be at least 10 characters",
        ),
        Field::TargetUser => require_min_chars(
            &snapshot.target_user,
            5,
            "Target user description must be at least 5 characters",
        ),
        Field::MainFeature => require_min_chars(
            &snapshot.main_feature,
            5,
            "Main feature description is required",
        ),
        Field::SupportingFeatures => require_non_blank_entries(
            &snapshot.supporting_features,
            1,
            "At least one supporting feature is required",
        ),
        Field::UserSteps => require_non_blank_entries(
            &snapshot.user_steps,
            3,
            "At least 3 user steps are required",
        ),
        Field::Platform => require_non_blank_entries(
            &snapshot.platform,
            1,
            "At least one platform must be selected",
        ),
        Field::TechNeeds => require_min_chars(
            &snapshot.tech_needs,
            10,
            "Technical requirements description is required",
        ),
        Field::Timeframe => {
            require_min_chars(&snapshot.timeframe, 1, "Timeframe selection is required")
        }
        Field::Title => require_min_chars(&snapshot.title, 1, "Project title is required"),
    }
}

/// Validate one step: AND over field validity, OR over touched markers.
pub fn validate_step(
    snapshot: &FormSnapshot,
    touched: &TouchedFields,
    step_index: usize,
) -> Result<StepValidation> {
    let fields = fields_for_step(step_index)?;

    let is_valid = fields
        .iter()
        .all(|&field| check_field(snapshot, field).is_ok());
    let has_been_touched = fields.iter().any(|&field| touched.is_touched(field));

    Ok(StepValidation {
        is_valid,
        has_been_touched,
    })
}

/// Collect failure messages for every invalid field of a step.
pub fn step_errors(snapshot: &FormSnapshot, step_index: usize) -> Result<Vec<(Field, String)>> {
    let fields = fields_for_step(step_index)?;
    Ok(fields
        .iter()
        .filter_map(|&field| check_field(snapshot, field).err().map(|msg| (field, msg)))
        .collect())
}

fn require_min_chars(value: &str, min: usize, message: &str) -> std::result::Result<(), String> {
    if value.chars().count() >= min {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

/// A sequence passes when at least `min` of its entries are non-blank.
/// Array length alone is not enough: ["", ""] counts as zero entries.
fn require_non_blank_entries(
    values: &[String],
    min: usize,
    message: &str,
) -> std::result::Result<(), String> {
    let filled = values.iter().filter(|v| !v.trim().is_empty()).count();
    if filled >= min {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_idea_step() -> FormSnapshot {
        FormSnapshot {
            problem: "People waste time splitting bills".to_string(),
            solution: "An app that calculates splits".to_string(),
            target_user: "young professionals".to_string(),
            ..FormSnapshot::default()
        }
    }

    #[test]
    fn blank_snapshot_fails_step_zero() {
        let snapshot = FormSnapshot::default();
        let result = validate_step(&snapshot, &TouchedFields::new(), 0).unwrap();
        assert!(!result.is_valid);
        assert!(!result.has_been_touched);
    }

    #[test]
    fn filled_idea_fields_pass_step_zero() {
        let snapshot = filled_idea_step();
        let result = validate_step(&snapshot, &TouchedFields::new(), 0).unwrap();
        assert!(result.is_valid);
    }

    #[test]
    fn min_length_counts_chars_not_bytes() {
        let snapshot = FormSnapshot {
            target_user: "日本人旅行者".to_string(), // 6 chars, 18 bytes
            ..FormSnapshot::default()
        };
        assert!(check_field(&snapshot, Field::TargetUser).is_ok());
    }

    #[test]
    fn blank_entries_do_not_count_toward_cardinality() {
        let snapshot = FormSnapshot {
            supporting_features: vec!["".to_string(), "  ".to_string()],
            ..FormSnapshot::default()
        };
        // Length is 2, but every entry is blank
        assert!(check_field(&snapshot, Field::SupportingFeatures).is_err());

        let snapshot = FormSnapshot {
            supporting_features: vec!["".to_string(), "User reviews".to_string()],
            ..FormSnapshot::default()
        };
        assert!(check_field(&snapshot, Field::SupportingFeatures).is_ok());
    }

    #[test]
    fn user_steps_need_three_non_blank_entries() {
        let mut snapshot = FormSnapshot::default();
        snapshot.user_steps = vec![
            "Sign up".to_string(),
            "Add expenses".to_string(),
            "".to_string(),
        ];
        assert!(check_field(&snapshot, Field::UserSteps).is_err());

        snapshot.user_steps[2] = "Split the bill".to_string();
        assert!(check_field(&snapshot, Field::UserSteps).is_ok());
    }

    #[test]
    fn touched_is_or_over_step_fields() {
        let snapshot = FormSnapshot::default();
        let mut touched = TouchedFields::new();
        touched.mark(Field::Solution);

        let step0 = validate_step(&snapshot, &touched, 0).unwrap();
        assert!(step0.has_been_touched);

        let step1 = validate_step(&snapshot, &touched, 1).unwrap();
        assert!(!step1.has_been_touched);
    }

    #[test]
    fn step_errors_lists_only_failing_fields() {
        let snapshot = filled_idea_step();
        assert!(step_errors(&snapshot, 0).unwrap().is_empty());

        let errors = step_errors(&FormSnapshot::default(), 0).unwrap();
        let fields: Vec<Field> = errors.iter().map(|(f, _)| *f).collect();
        assert_eq!(
            fields,
            vec![Field::Problem, Field::Solution, Field::TargetUser]
        );
    }

    #[test]
    fn validate_step_rejects_out_of_range_index() {
        let snapshot = FormSnapshot::default();
        assert!(validate_step(&snapshot, &TouchedFields::new(), 9).is_err());
    }
}
