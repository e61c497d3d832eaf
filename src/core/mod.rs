//! Core form state types and logic.
//!
//! This module contains the pure functional core of a form:
//! - Field entries and field maps
//! - Immutable snapshots with a cached validity aggregate
//! - The reducer that maps a snapshot and an action to the next snapshot
//! - Immutable history tracking
//!
//! Nothing in this module performs side effects.

mod field;
mod history;
mod reducer;
mod snapshot;
mod value;

pub use field::{FieldEntry, FormInputs};
pub use history::{FormHistory, FormTransition};
pub use reducer::{apply_input_change, apply_replace_all, initialize, reduce, ActionKind, FormAction};
pub use snapshot::{FormSnapshot, InvalidField};
pub use value::FieldValue;
