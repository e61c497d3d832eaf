//! Field entries and the field map of a form.

use super::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current content of one form field and whether it passed validation.
///
/// Entries are plain values. Updating a field replaces its entry wholesale.
///
/// # Example
///
/// ```rust
/// use formstate::core::FieldEntry;
///
/// let entry = FieldEntry::<String>::new("alice".to_string(), true);
/// assert_eq!(entry.value.as_deref(), Some("alice"));
/// assert!(entry.is_valid);
///
/// let empty: FieldEntry<String> = FieldEntry::new(None::<String>, false);
/// assert!(empty.value.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "", rename_all = "camelCase")]
pub struct FieldEntry<V: FieldValue> {
    /// The field's content, `None` when the field has no value yet
    pub value: Option<V>,
    /// Validity as judged by the caller
    pub is_valid: bool,
}

impl<V: FieldValue> FieldEntry<V> {
    /// Create an entry from a value (or `None`) and a validity flag.
    pub fn new(value: impl Into<Option<V>>, is_valid: bool) -> Self {
        Self {
            value: value.into(),
            is_valid,
        }
    }
}

/// Mapping from field id to entry.
///
/// A field id may map to a *vacant* slot: the key is known but holds no entry.
/// Vacant slots are skipped when form validity is aggregated. Iteration is
/// ordered by field id.
///
/// # Example
///
/// ```rust
/// use formstate::core::{FieldEntry, FormInputs};
///
/// let inputs = FormInputs::new()
///     .with_field("email", FieldEntry::<String>::new("a@b.c".to_string(), true))
///     .with_vacant("nickname");
///
/// assert_eq!(inputs.len(), 2);
/// assert!(inputs.contains("nickname"));
/// assert!(inputs.get("nickname").is_none());
/// assert_eq!(inputs.entries().count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "", transparent)]
pub struct FormInputs<V: FieldValue> {
    slots: BTreeMap<String, Option<FieldEntry<V>>>,
}

impl<V: FieldValue> Default for FormInputs<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: FieldValue> FormInputs<V> {
    /// Create an empty field map.
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    /// Return a new map with `id` set to `entry`.
    pub fn with_field(mut self, id: impl Into<String>, entry: FieldEntry<V>) -> Self {
        self.insert(id, entry);
        self
    }

    /// Return a new map with a vacant slot for `id`.
    pub fn with_vacant(mut self, id: impl Into<String>) -> Self {
        self.insert_vacant(id);
        self
    }

    /// Set `id` to `entry`, returning the previous entry if there was one.
    pub fn insert(&mut self, id: impl Into<String>, entry: FieldEntry<V>) -> Option<FieldEntry<V>> {
        self.slots.insert(id.into(), Some(entry)).flatten()
    }

    /// Declare `id` without an entry, returning the previous entry if there was one.
    pub fn insert_vacant(&mut self, id: impl Into<String>) -> Option<FieldEntry<V>> {
        self.slots.insert(id.into(), None).flatten()
    }

    /// Entry for `id`, `None` when the id is unknown or its slot is vacant.
    pub fn get(&self, id: &str) -> Option<&FieldEntry<V>> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    /// Whether `id` is a known field id, vacant or not.
    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Number of known field ids, vacant slots included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots in field id order, vacant ones as `None`.
    pub fn slots(&self) -> impl Iterator<Item = (&str, Option<&FieldEntry<V>>)> {
        self.slots.iter().map(|(id, slot)| (id.as_str(), slot.as_ref()))
    }

    /// Present entries in field id order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &FieldEntry<V>)> {
        self.slots
            .iter()
            .filter_map(|(id, slot)| slot.as_ref().map(|entry| (id.as_str(), entry)))
    }

    /// Logical AND over the validity of every present entry.
    pub fn all_valid(&self) -> bool {
        self.entries().all(|(_, entry)| entry.is_valid)
    }
}

impl<V: FieldValue, K: Into<String>> FromIterator<(K, FieldEntry<V>)> for FormInputs<V> {
    fn from_iter<I: IntoIterator<Item = (K, FieldEntry<V>)>>(iter: I) -> Self {
        let mut inputs = Self::new();
        for (id, entry) in iter {
            inputs.insert(id, entry);
        }
        inputs
    }
}
