//! # plankit-wizard
//!
//! The interactive core of the MVP plan builder: a per-instance step
//! state machine ([`WizardController`]), single-slot draft persistence
//! ([`DraftStore`]), and a debounced autosave scheduler ([`Autosave`]).
//!
//! Control flow: an edit marks its field touched and notifies the
//! autosave scheduler, which resets its quiet-period timer; navigation
//! consults the validation gate before committing a step change; on the
//! final step the snapshot is handed to a [`SubmitSink`], after which the
//! caller clears the draft and may reset the wizard for a new plan.

pub mod autosave;
pub mod controller;
pub mod draft;

pub use autosave::{format_relative, Autosave, AUTOSAVE_QUIET_PERIOD};
pub use controller::{SubmitSink, WizardController};
pub use draft::{DraftStore, FileDraftStore, MemDraftStore, DRAFT_KEY};
