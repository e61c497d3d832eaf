//! The pure transition function of a form.
//!
//! `reduce` maps a snapshot and an action to the next snapshot. Nothing here
//! mutates its input or performs I/O.

use super::field::{FieldEntry, FormInputs};
use super::snapshot::FormSnapshot;
use super::value::FieldValue;
use serde::{Deserialize, Serialize};

/// Update request accepted by a form.
#[derive(Clone, Debug, PartialEq)]
pub enum FormAction<V: FieldValue> {
    /// One field was edited
    InputChange {
        field_id: String,
        value: Option<V>,
        is_valid: bool,
    },

    /// The whole form's data is replaced, with externally computed validity
    SetData {
        inputs: FormInputs<V>,
        form_is_valid: bool,
    },
}

impl<V: FieldValue> FormAction<V> {
    pub fn input_change(field_id: impl Into<String>, value: impl Into<Option<V>>, is_valid: bool) -> Self {
        Self::InputChange {
            field_id: field_id.into(),
            value: value.into(),
            is_valid,
        }
    }

    pub fn set_data(inputs: FormInputs<V>, form_is_valid: bool) -> Self {
        Self::SetData {
            inputs,
            form_is_valid,
        }
    }

    /// Payload-free description of this action, for history records.
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::InputChange { field_id, .. } => ActionKind::InputChange {
                field_id: field_id.clone(),
            },
            Self::SetData { .. } => ActionKind::SetData,
        }
    }
}

/// Which kind of action produced a transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    InputChange { field_id: String },
    SetData,
}

/// Create the initial snapshot of a form.
pub fn initialize<V: FieldValue>(initial_inputs: FormInputs<V>, initial_validity: bool) -> FormSnapshot<V> {
    FormSnapshot::new(initial_inputs, initial_validity)
}

/// Apply an edit of one field.
///
/// The new aggregate is the AND over every slot of `current`: vacant slots are
/// skipped, `field_id` contributes the new `is_valid` and every other field its
/// existing flag. A field that is not yet present in `current` is only added
/// to the map, so its validity is first reflected by the next update.
///
/// # Example
///
/// ```rust
/// use formstate::core::{apply_input_change, initialize, FieldEntry, FormInputs};
///
/// let start = initialize(
///     FormInputs::new().with_field("name", FieldEntry::<String>::new("A".to_string(), true)),
///     true,
/// );
///
/// let next = apply_input_change(&start, "name", "".to_string(), false);
///
/// assert!(!next.is_valid());
/// assert!(start.is_valid()); // Original unchanged
/// ```
pub fn apply_input_change<V: FieldValue>(
    current: &FormSnapshot<V>,
    field_id: &str,
    value: impl Into<Option<V>>,
    is_valid: bool,
) -> FormSnapshot<V> {
    let form_is_valid = current
        .inputs()
        .slots()
        .filter_map(|(id, slot)| slot.map(|entry| (id, entry)))
        .all(|(id, entry)| {
            if id == field_id {
                is_valid
            } else {
                entry.is_valid
            }
        });

    let mut inputs = current.inputs().clone();
    inputs.insert(field_id, FieldEntry::new(value, is_valid));

    FormSnapshot::new(inputs, form_is_valid)
}

/// Replace all of the form's data. The previous snapshot is discarded.
pub fn apply_replace_all<V: FieldValue>(inputs: FormInputs<V>, form_is_valid: bool) -> FormSnapshot<V> {
    FormSnapshot::new(inputs, form_is_valid)
}

/// Compute the snapshot that follows `current` under `action`.
pub fn reduce<V: FieldValue>(current: &FormSnapshot<V>, action: FormAction<V>) -> FormSnapshot<V> {
    match action {
        FormAction::InputChange {
            field_id,
            value,
            is_valid,
        } => apply_input_change(current, &field_id, value, is_valid),
        FormAction::SetData {
            inputs,
            form_is_valid,
        } => apply_replace_all(inputs, form_is_valid),
    }
}
