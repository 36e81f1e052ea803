//! Static wizard step registry
//!
//! Five steps, created once, never mutated. Each step owns the subset of
//! snapshot fields that must pass validation before it counts as complete.

use crate::types::Field;
use crate::{PlanError, Result};

/// Immutable definition of one wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    /// Display title
    pub title: &'static str,
    /// One-line description shown under the title
    pub description: &'static str,
    /// Icon tag for the UI layer
    pub icon: &'static str,
    /// Fields that must validate before this step is complete
    pub fields: &'static [Field],
}

/// Number of wizard steps.
pub const STEP_COUNT: usize = 5;

static STEPS: [StepDefinition; STEP_COUNT] = [
    StepDefinition {
        title: "Your Idea",
        description: "What are you building?",
        icon: "lightbulb",
        fields: &[Field::Problem, Field::Solution, Field::TargetUser],
    },
    StepDefinition {
        title: "Core Features",
        description: "What does it need to do?",
        icon: "settings",
        fields: &[Field::MainFeature, Field::SupportingFeatures],
    },
    StepDefinition {
        title: "User Flow",
        description: "How do people use it?",
        icon: "map",
        fields: &[Field::UserSteps],
    },
    StepDefinition {
        title: "Technical Specs",
        description: "How will you build it?",
        icon: "code",
        fields: &[Field::Platform, Field::TechNeeds, Field::Timeframe],
    },
    StepDefinition {
        title: "Review & Export",
        description: "Your complete MVP plan",
        icon: "file-text",
        fields: &[Field::Title],
    },
];

/// All step definitions, in wizard order.
pub fn steps() -> &'static [StepDefinition] {
    &STEPS
}

/// Total number of steps.
pub fn step_count() -> usize {
    STEP_COUNT
}

/// The ordered set of fields required for step `index`.
pub fn fields_for_step(index: usize) -> Result<&'static [Field]> {
    STEPS
        .get(index)
        .map(|step| step.fields)
        .ok_or(PlanError::OutOfRange {
            index,
            limit: STEP_COUNT,
        })
}
