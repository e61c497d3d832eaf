//! Formstate: a pure functional form-state reducer
//!
//! Formstate follows the "pure core, imperative shell" philosophy. The core is
//! a reducer that maps an immutable form snapshot and an action to the next
//! snapshot. The shell is a store that owns the current snapshot, applies
//! actions one at a time and notifies observers.
//!
//! # Core Concepts
//!
//! - **Field entries**: per-field value plus a validity flag judged by the caller
//! - **Snapshots**: immutable field maps with a cached overall validity flag
//! - **Actions**: a single-field edit, or a replacement of all form data
//! - **History**: immutable tracking of applied transitions, used for undo
//! - **Checkpoints**: serializable captures of a store for save and restore
//!
//! # Example
//!
//! ```rust
//! use formstate::core::FormInputs;
//! use formstate::form_inputs;
//! use formstate::store::use_form;
//!
//! let inputs: FormInputs<String> = form_inputs! {
//!     "title" => (None::<String>, false),
//!     "description" => (None::<String>, false),
//! };
//! let (form, on_input, set_form_data) = use_form(inputs, false);
//!
//! on_input.handle("title", "Hello".to_string(), true);
//! assert!(!form.snapshot().is_valid());
//!
//! on_input.handle("description", "World".to_string(), true);
//! assert!(form.snapshot().is_valid());
//!
//! set_form_data.handle(FormInputs::new(), false);
//! assert!(form.snapshot().inputs().is_empty());
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod store;

// Re-export commonly used types
pub use crate::core::{FieldEntry, FieldValue, FormAction, FormInputs, FormSnapshot};
pub use crate::store::{use_form, FormHandle, FormStore};
