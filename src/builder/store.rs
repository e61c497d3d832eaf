//! Builder for constructing form stores.

use crate::builder::error::BuildError;
use crate::core::{FieldEntry, FieldValue, FormHistory, FormInputs, FormSnapshot};
use crate::store::{FormHandle, FormStore, Observer, DEFAULT_HISTORY_LIMIT};

#[derive(Clone, Copy, Debug, PartialEq)]
enum InitialValidity {
    Given(bool),
    Derived,
}

/// Builder for constructing form stores with a fluent API.
///
/// # Example
///
/// ```rust
/// use formstate::builder::FormStoreBuilder;
///
/// let store = FormStoreBuilder::<String>::new()
///     .field("email", None::<String>, false)
///     .field("name", "Ada".to_string(), true)
///     .derive_validity()
///     .history_limit(20)
///     .build()
///     .unwrap();
///
/// assert!(!store.snapshot().is_valid());
/// ```
pub struct FormStoreBuilder<V: FieldValue> {
    inputs: FormInputs<V>,
    validity: Option<InitialValidity>,
    history_limit: usize,
    observers: Vec<Observer<V>>,
}

impl<V: FieldValue> FormStoreBuilder<V> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            inputs: FormInputs::new(),
            validity: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            observers: Vec::new(),
        }
    }

    /// Replace the initial inputs.
    pub fn inputs(mut self, inputs: FormInputs<V>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Add one initial field.
    pub fn field(mut self, id: impl Into<String>, value: impl Into<Option<V>>, is_valid: bool) -> Self {
        self.inputs.insert(id, FieldEntry::new(value, is_valid));
        self
    }

    /// Declare a field id without an entry.
    pub fn vacant(mut self, id: impl Into<String>) -> Self {
        self.inputs.insert_vacant(id);
        self
    }

    /// Set the initial overall validity explicitly.
    pub fn initially_valid(mut self, is_valid: bool) -> Self {
        self.validity = Some(InitialValidity::Given(is_valid));
        self
    }

    /// Compute the initial overall validity from the initial inputs.
    pub fn derive_validity(mut self) -> Self {
        self.validity = Some(InitialValidity::Derived);
        self
    }

    /// Maximum number of transitions kept for undo.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Register an observer before the store is built.
    pub fn observe<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&FormSnapshot<V>) + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    /// Build the store.
    /// Returns an error if the initial validity policy is missing or the
    /// history limit is zero.
    pub fn build(self) -> Result<FormStore<V>, BuildError> {
        let validity = self.validity.ok_or(BuildError::MissingInitialValidity)?;

        if self.history_limit == 0 {
            return Err(BuildError::ZeroHistoryLimit);
        }

        let is_valid = match validity {
            InitialValidity::Given(is_valid) => is_valid,
            InitialValidity::Derived => self.inputs.all_valid(),
        };

        let mut store = FormStore::from_snapshot(
            FormSnapshot::new(self.inputs, is_valid),
            FormHistory::new(),
            self.history_limit,
        );
        for observer in self.observers {
            store.subscribe_boxed(observer);
        }

        Ok(store)
    }

    /// Build the store and wrap it in a shared handle.
    pub fn build_handle(self) -> Result<FormHandle<V>, BuildError> {
        Ok(FormHandle::new(self.build()?))
    }
}

impl<V: FieldValue> Default for FormStoreBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}
