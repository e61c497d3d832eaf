//! Builder API for ergonomic form construction.
//!
//! This module provides a fluent builder and a macro for creating forms
//! with minimal boilerplate while maintaining type safety.

pub mod error;
pub mod macros;
pub mod store;

pub use error::BuildError;
pub use store::FormStoreBuilder;

use crate::core::{FieldValue, FormInputs};
use crate::store::FormStore;

/// Create a store whose initial validity is computed from its inputs.
///
/// # Example
///
/// ```
/// use formstate::builder::derived_store;
/// use formstate::form_inputs;
///
/// let store = derived_store::<String>(form_inputs! {
///     "name" => ("Ada".to_string(), true),
///     "email" => (None::<String>, false),
/// });
///
/// assert!(!store.snapshot().is_valid());
/// ```
pub fn derived_store<V: FieldValue>(inputs: FormInputs<V>) -> FormStore<V> {
    let is_valid = inputs.all_valid();
    FormStore::new(inputs, is_valid)
}
