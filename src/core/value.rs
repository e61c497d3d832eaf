//! Bound for the opaque payload stored in each form field.
//!
//! Field content is opaque to the store: it only copies values around and never
//! inspects them. Validity is tracked separately as a boolean.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for values held by form fields.
///
/// # Required Traits
///
/// - `Clone`: snapshots copy entries when a new snapshot is produced
/// - `PartialEq`: snapshots must be comparable for change detection and undo
/// - `Debug`: values must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: values must be serializable for checkpoints
///
/// Every type meeting these bounds implements `FieldValue` automatically, so
/// `String`, integers, `serde_json::Value` or an application enum all work.
///
/// # Example
///
/// ```rust
/// use formstate::core::FieldValue;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Content {
///     Text(String),
///     Number(i64),
/// }
///
/// fn accepts<V: FieldValue>(_value: V) {}
///
/// accepts(Content::Number(3));
/// accepts("plain text".to_string());
/// ```
pub trait FieldValue:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
}

impl<T> FieldValue for T where
    T: Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
}
