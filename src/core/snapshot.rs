//! Immutable snapshots of a form's state.

use super::field::{FieldEntry, FormInputs};
use super::value::FieldValue;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A field that failed validation, as reported by [`FormSnapshot::validate`].
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Field '{field_id}' is invalid")]
pub struct InvalidField {
    pub field_id: String,
}

/// All field entries of a form plus the overall validity flag, at one point
/// in time.
///
/// Snapshots are never mutated after creation. Every update produces a new
/// snapshot, so callers may keep old ones for comparison or undo.
///
/// `is_valid` is a cached aggregate maintained by the reducer. It can lag
/// behind the entries for one update when a field is added by its first edit.
/// [`computed_validity`](Self::computed_validity) evaluates the aggregate from
/// the entries as they are now.
///
/// # Example
///
/// ```rust
/// use formstate::core::{FieldEntry, FormInputs, FormSnapshot};
///
/// let inputs = FormInputs::new().with_field("name", FieldEntry::<String>::new("A".to_string(), true));
/// let snapshot = FormSnapshot::new(inputs, true);
///
/// assert!(snapshot.is_valid());
/// assert_eq!(snapshot.value("name").map(String::as_str), Some("A"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "", rename_all = "camelCase")]
pub struct FormSnapshot<V: FieldValue> {
    inputs: FormInputs<V>,
    is_valid: bool,
}

impl<V: FieldValue> FormSnapshot<V> {
    /// Create a snapshot with exactly the given inputs and validity.
    ///
    /// The validity flag is taken as-is, never recomputed.
    pub fn new(inputs: FormInputs<V>, is_valid: bool) -> Self {
        Self { inputs, is_valid }
    }

    pub fn inputs(&self) -> &FormInputs<V> {
        &self.inputs
    }

    /// The cached overall validity flag.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn field(&self, id: &str) -> Option<&FieldEntry<V>> {
        self.inputs.get(id)
    }

    /// Value of field `id`, if the field is present and has a value.
    pub fn value(&self, id: &str) -> Option<&V> {
        self.field(id).and_then(|entry| entry.value.as_ref())
    }

    /// Overall validity recomputed from the current entries.
    pub fn computed_validity(&self) -> bool {
        self.inputs.all_valid()
    }

    /// Ids of present fields whose entry is invalid, in id order.
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.inputs
            .entries()
            .filter(|(_, entry)| !entry.is_valid)
            .map(|(id, _)| id)
            .collect()
    }

    /// Check every present field, accumulating ALL invalid ones.
    ///
    /// Returns `Validation::Success(())` when every present field is valid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use formstate::core::{FieldEntry, FormInputs, FormSnapshot};
    ///
    /// let inputs = FormInputs::new()
    ///     .with_field("email", FieldEntry::<String>::new("".to_string(), false))
    ///     .with_field("name", FieldEntry::<String>::new("".to_string(), false));
    /// let snapshot = FormSnapshot::new(inputs, false);
    ///
    /// assert!(snapshot.validate().is_failure());
    /// ```
    pub fn validate(&self) -> Validation<(), NonEmptyVec<InvalidField>> {
        let checks: Vec<Validation<(), NonEmptyVec<InvalidField>>> = self
            .inputs
            .entries()
            .map(|(id, entry)| {
                if entry.is_valid {
                    Validation::success(())
                } else {
                    Validation::fail(InvalidField {
                        field_id: id.to_string(),
                    })
                }
            })
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str, is_valid: bool) -> FieldEntry<String> {
        FieldEntry::new(value.to_string(), is_valid)
    }

    #[test]
    fn new_keeps_validity_as_given() {
        let inputs = FormInputs::new().with_field("name", text("", false));
        let snapshot = FormSnapshot::new(inputs.clone(), true);

        assert!(snapshot.is_valid());
        assert!(!snapshot.computed_validity());
        assert_eq!(snapshot.inputs(), &inputs);
    }

    #[test]
    fn value_lookup_handles_missing_and_vacant_fields() {
        let inputs = FormInputs::new()
            .with_field("name", text("A", true))
            .with_field("bio", FieldEntry::new(None::<String>, true))
            .with_vacant("later");
        let snapshot = FormSnapshot::new(inputs, true);

        assert_eq!(snapshot.value("name"), Some(&"A".to_string()));
        assert_eq!(snapshot.value("bio"), None);
        assert!(snapshot.field("bio").is_some());
        assert!(snapshot.field("later").is_none());
        assert!(snapshot.field("unknown").is_none());
    }

    #[test]
    fn invalid_fields_lists_only_present_invalid_entries() {
        let inputs = FormInputs::new()
            .with_field("b", text("", false))
            .with_field("a", text("", false))
            .with_field("c", text("ok", true))
            .with_vacant("d");
        let snapshot = FormSnapshot::new(inputs, false);

        assert_eq!(snapshot.invalid_fields(), vec!["a", "b"]);
    }

    #[test]
    fn validate_accumulates_all_invalid_fields() {
        let inputs = FormInputs::new()
            .with_field("email", text("", false))
            .with_field("name", text("", false))
            .with_field("age", text("30", true));
        let snapshot = FormSnapshot::new(inputs, false);

        match snapshot.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().any(|e| e.field_id == "email"));
                assert!(errors.iter().any(|e| e.field_id == "name"));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn validate_succeeds_when_all_fields_valid() {
        let inputs = FormInputs::new()
            .with_field("name", text("A", true))
            .with_vacant("skipped");
        let snapshot = FormSnapshot::new(inputs, true);

        assert!(snapshot.validate().is_success());
    }

    #[test]
    fn invalid_field_error_message_names_field() {
        let error = InvalidField {
            field_id: "email".to_string(),
        };
        assert_eq!(error.to_string(), "Field 'email' is invalid");
    }

    #[test]
    fn snapshot_serializes_correctly() {
        let inputs = FormInputs::new().with_field("name", text("A", true));
        let snapshot = FormSnapshot::new(inputs, true);

        let json = serde_json::to_string(&snapshot).unwrap();
        let deserialized: FormSnapshot<String> = serde_json::from_str(&json).unwrap();

        assert_eq!(snapshot, deserialized);
        assert!(json.contains("\"isValid\":true"));
    }
}
