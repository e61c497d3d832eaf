//! Macros for ergonomic form construction.

/// Build a [`FormInputs`](crate::core::FormInputs) map.
///
/// Each entry is either `id => (value, is_valid)` or `id => vacant`. The value
/// may be `None` for a field without content.
///
/// # Example
///
/// ```
/// use formstate::core::FormInputs;
/// use formstate::form_inputs;
///
/// let inputs: FormInputs<String> = form_inputs! {
///     "name" => ("Ada".to_string(), true),
///     "email" => (None::<String>, false),
///     "nickname" => vacant,
/// };
///
/// assert_eq!(inputs.len(), 3);
/// assert!(inputs.get("nickname").is_none());
/// assert!(!inputs.all_valid());
/// ```
#[macro_export]
macro_rules! form_inputs {
    (@entry $inputs:ident, $id:expr, vacant) => {
        $inputs.insert_vacant($id);
    };
    (@entry $inputs:ident, $id:expr, ($value:expr, $valid:expr)) => {
        $inputs.insert($id, $crate::core::FieldEntry::new($value, $valid));
    };
    ($($id:expr => $entry:tt),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut inputs = $crate::core::FormInputs::new();
        $($crate::form_inputs!(@entry inputs, $id, $entry);)*
        inputs
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::{FieldEntry, FormInputs};

    #[test]
    fn form_inputs_macro_builds_entries() {
        let inputs: FormInputs<i64> = form_inputs! {
            "a" => (1_i64, true),
            "b" => (2_i64, false),
        };

        assert_eq!(inputs.get("a"), Some(&FieldEntry::new(1_i64, true)));
        assert_eq!(inputs.get("b"), Some(&FieldEntry::new(2_i64, false)));
        assert!(!inputs.all_valid());
    }

    #[test]
    fn form_inputs_macro_supports_vacant_slots() {
        let inputs: FormInputs<String> = form_inputs! {
            "name" => ("A".to_string(), true),
            "later" => vacant
        };

        assert!(inputs.contains("later"));
        assert!(inputs.get("later").is_none());
        assert!(inputs.all_valid());
    }

    #[test]
    fn form_inputs_macro_accepts_empty_input() {
        let inputs: FormInputs<String> = form_inputs! {};

        assert!(inputs.is_empty());
    }
}
