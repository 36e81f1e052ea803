//! # plankit-core
//!
//! Core types for the Plankit MVP plan builder.
//!
//! A plan is filled in across five sequential wizard steps. This crate owns
//! the pieces the rest of the workspace builds on:
//!
//! - [`FormSnapshot`] — the complete in-progress value of the form
//! - [`Field`] — typed identifiers for every validated field
//! - the static step registry ([`steps`], [`fields_for_step`])
//! - the purely functional validation gate ([`validate_step`], [`check_field`])
//! - built-in plan templates ([`templates`])
//! - the unified [`PlanError`] type

mod error;
pub mod steps;
pub mod templates;
mod types;
pub mod validation;

pub use error::{PlanError, Result};
pub use steps::{fields_for_step, step_count, steps, StepDefinition, STEP_COUNT};
pub use templates::{template, templates, PlanTemplate};
pub use types::{Field, FormSnapshot};
pub use validation::{check_field, step_errors, validate_step, StepValidation, TouchedFields};
