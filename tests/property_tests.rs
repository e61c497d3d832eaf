//! Property-based tests for the form reducer and store.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use formstate::core::{
    apply_input_change, apply_replace_all, initialize, FieldEntry, FormHistory, FormInputs,
    FormSnapshot,
};
use formstate::store::FormStore;
use proptest::prelude::*;

const FIELD_IDS: [&str; 5] = ["name", "email", "age", "bio", "city"];

prop_compose! {
    fn arbitrary_entry()(value in prop::option::of(0..100i64), is_valid in any::<bool>()) -> FieldEntry<i64> {
        FieldEntry::new(value, is_valid)
    }
}

prop_compose! {
    fn arbitrary_slot()(entry in prop::option::of(arbitrary_entry())) -> Option<FieldEntry<i64>> {
        entry
    }
}

prop_compose! {
    fn arbitrary_inputs()(slots in prop::collection::vec(arbitrary_slot(), FIELD_IDS.len())) -> FormInputs<i64> {
        let mut inputs = FormInputs::new();
        for (id, slot) in FIELD_IDS.iter().zip(slots) {
            match slot {
                Some(entry) => inputs.insert(*id, entry),
                None => inputs.insert_vacant(*id),
            };
        }
        inputs
    }
}

prop_compose! {
    fn arbitrary_snapshot()(inputs in arbitrary_inputs(), is_valid in any::<bool>()) -> FormSnapshot<i64> {
        FormSnapshot::new(inputs, is_valid)
    }
}

prop_compose! {
    fn arbitrary_field_id()(index in 0..FIELD_IDS.len()) -> &'static str {
        FIELD_IDS[index]
    }
}

proptest! {
    #[test]
    fn initialize_preserves_contents(inputs in arbitrary_inputs(), is_valid in any::<bool>()) {
        let snapshot = initialize(inputs.clone(), is_valid);
        prop_assert_eq!(snapshot.inputs(), &inputs);
        prop_assert_eq!(snapshot.is_valid(), is_valid);
    }

    #[test]
    fn valid_edit_validates_iff_others_valid(
        start in arbitrary_snapshot(),
        field_id in arbitrary_field_id(),
        value in 0..100i64,
    ) {
        let others_valid = start
            .inputs()
            .entries()
            .filter(|(id, _)| *id != field_id)
            .all(|(_, entry)| entry.is_valid);

        let next = apply_input_change(&start, field_id, value, true);

        prop_assert_eq!(next.is_valid(), others_valid);
    }

    #[test]
    fn input_change_is_deterministic(
        start in arbitrary_snapshot(),
        field_id in arbitrary_field_id(),
        value in prop::option::of(0..100i64),
        is_valid in any::<bool>(),
    ) {
        let first = apply_input_change(&start, field_id, value, is_valid);
        let second = apply_input_change(&start, field_id, value, is_valid);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn input_change_leaves_start_untouched(
        start in arbitrary_snapshot(),
        field_id in arbitrary_field_id(),
        is_valid in any::<bool>(),
    ) {
        let before = start.clone();
        let next = apply_input_change(&start, field_id, 7i64, is_valid);

        prop_assert_eq!(&start, &before);
        prop_assert_eq!(next.field(field_id), Some(&FieldEntry::new(7i64, is_valid)));
    }

    #[test]
    fn edit_of_present_field_keeps_cache_exact(
        inputs in arbitrary_inputs(),
        field_id in arbitrary_field_id(),
        is_valid in any::<bool>(),
    ) {
        let mut inputs = inputs;
        inputs.insert(field_id, FieldEntry::new(0i64, true));
        let start = initialize(inputs, true);

        let next = apply_input_change(&start, field_id, 1i64, is_valid);

        prop_assert_eq!(next.is_valid(), next.computed_validity());
    }

    #[test]
    fn replace_all_ignores_prior_state(
        first in arbitrary_snapshot(),
        second in arbitrary_snapshot(),
        inputs in arbitrary_inputs(),
        is_valid in any::<bool>(),
    ) {
        let mut store_a = FormStore::new(first.inputs().clone(), first.is_valid());
        let mut store_b = FormStore::new(second.inputs().clone(), second.is_valid());

        let a = store_a.set_form_data(inputs.clone(), is_valid).clone();
        let b = store_b.set_form_data(inputs.clone(), is_valid).clone();

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a, apply_replace_all(inputs, is_valid));
    }

    #[test]
    fn store_history_path_matches_applied_edits(
        start in arbitrary_snapshot(),
        edits in prop::collection::vec((arbitrary_field_id(), 0..100i64, any::<bool>()), 1..10),
    ) {
        let mut store = FormStore::new(start.inputs().clone(), start.is_valid());
        let mut expected = vec![start.clone()];

        for (field_id, value, is_valid) in &edits {
            let next = store.input_changed(*field_id, *value, *is_valid).clone();
            expected.push(next);
        }

        let path = store.history().get_path();
        prop_assert_eq!(path.len(), expected.len());
        for (snapshot, expected) in path.iter().zip(&expected) {
            prop_assert_eq!(*snapshot, expected);
        }
    }

    #[test]
    fn undo_walks_back_every_edit(
        start in arbitrary_snapshot(),
        edits in prop::collection::vec((arbitrary_field_id(), 0..100i64, any::<bool>()), 0..8),
    ) {
        let mut store = FormStore::new(start.inputs().clone(), start.is_valid());
        for (field_id, value, is_valid) in &edits {
            store.input_changed(*field_id, *value, *is_valid);
        }

        for _ in 0..edits.len() {
            prop_assert!(store.undo());
        }

        prop_assert_eq!(store.snapshot(), &start);
        prop_assert!(!store.undo());
    }

    #[test]
    fn history_record_is_pure(start in arbitrary_snapshot(), field_id in arbitrary_field_id()) {
        let mut store = FormStore::new(start.inputs().clone(), start.is_valid());
        store.input_changed(field_id, 1i64, true);
        let transition = store.history().last().cloned().unwrap();

        let history = FormHistory::new();
        let new_history = history.record(transition);

        prop_assert_eq!(history.len(), 0);
        prop_assert_eq!(new_history.len(), 1);
    }
}
