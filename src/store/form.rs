//! Form store that applies actions and notifies observers.

use crate::core::{reduce, FieldValue, FormAction, FormHistory, FormInputs, FormSnapshot, FormTransition};
use chrono::Utc;
use tracing::{debug, trace};

/// Default number of transitions kept in a store's history.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Callback invoked with every newly installed snapshot.
pub type Observer<V> = Box<dyn FnMut(&FormSnapshot<V>)>;

/// Identifies an observer registered with [`FormStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owner of a form's current snapshot.
///
/// Actions are applied one at a time through the pure reducer. Each update
/// installs the new snapshot, records the transition and then notifies
/// observers in subscription order.
///
/// # Example
///
/// ```rust
/// use formstate::core::{FieldEntry, FormInputs};
/// use formstate::store::FormStore;
///
/// let inputs = FormInputs::new().with_field("name", FieldEntry::<String>::new("A".to_string(), true));
/// let mut store = FormStore::new(inputs, true);
///
/// store.input_changed("name", "".to_string(), false);
///
/// assert!(!store.snapshot().is_valid());
/// assert_eq!(store.history().len(), 1);
/// ```
pub struct FormStore<V: FieldValue> {
    current: FormSnapshot<V>,
    history: FormHistory<V>,
    history_limit: usize,
    observers: Vec<(SubscriptionId, Observer<V>)>,
    next_subscription: u64,
}

impl<V: FieldValue> FormStore<V> {
    /// Create a store whose snapshot is exactly `{initial_inputs, initial_validity}`.
    pub fn new(initial_inputs: FormInputs<V>, initial_validity: bool) -> Self {
        Self::from_snapshot(
            FormSnapshot::new(initial_inputs, initial_validity),
            FormHistory::new(),
            DEFAULT_HISTORY_LIMIT,
        )
    }

    pub(crate) fn from_snapshot(
        current: FormSnapshot<V>,
        history: FormHistory<V>,
        history_limit: usize,
    ) -> Self {
        Self {
            current,
            history,
            history_limit,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Get the current snapshot (pure)
    pub fn snapshot(&self) -> &FormSnapshot<V> {
        &self.current
    }

    /// Get transition history (pure)
    pub fn history(&self) -> &FormHistory<V> {
        &self.history
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Apply an action, install the resulting snapshot and notify observers.
    pub fn dispatch(&mut self, action: FormAction<V>) -> &FormSnapshot<V> {
        self.apply(action);
        self.notify();
        &self.current
    }

    /// Apply an action and record the transition without notifying anyone.
    pub(crate) fn apply(&mut self, action: FormAction<V>) -> &FormSnapshot<V> {
        let kind = action.kind();
        let next = reduce(&self.current, action);

        debug!(
            action = ?kind,
            form_is_valid = next.is_valid(),
            fields = next.inputs().len(),
            "applied form action"
        );

        let previous = std::mem::replace(&mut self.current, next);
        self.history.push_bounded(
            FormTransition {
                from: previous,
                to: self.current.clone(),
                action: kind,
                timestamp: Utc::now(),
            },
            self.history_limit,
        );

        &self.current
    }

    /// Record an edit of one field.
    pub fn input_changed(
        &mut self,
        field_id: impl Into<String>,
        value: impl Into<Option<V>>,
        is_valid: bool,
    ) -> &FormSnapshot<V> {
        self.dispatch(FormAction::input_change(field_id, value, is_valid))
    }

    /// Replace all of the form's data with externally computed validity.
    pub fn set_form_data(&mut self, inputs: FormInputs<V>, form_is_valid: bool) -> &FormSnapshot<V> {
        self.dispatch(FormAction::set_data(inputs, form_is_valid))
    }

    /// Reinstall the snapshot that preceded the most recent transition.
    ///
    /// Returns `false` when the history is empty.
    pub fn undo(&mut self) -> bool {
        let undone = self.rewind();
        if undone {
            self.notify();
        }
        undone
    }

    /// Pop the most recent transition and reinstall its `from` snapshot.
    pub(crate) fn rewind(&mut self) -> bool {
        let Some(last) = self.history.pop_last() else {
            return false;
        };
        self.current = last.from;

        debug!(remaining = self.history.len(), "undid form action");
        true
    }

    /// Register an observer for every future snapshot.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&FormSnapshot<V>) + 'static,
    {
        self.subscribe_boxed(Box::new(observer))
    }

    pub(crate) fn subscribe_boxed(&mut self, observer: Observer<V>) -> SubscriptionId {
        let id = self.next_subscription_id();
        self.observers.push((id, observer));
        id
    }

    pub(crate) fn next_subscription_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        id
    }

    /// Hand every registered observer over to the caller.
    pub(crate) fn take_observers(&mut self) -> Vec<(SubscriptionId, Observer<V>)> {
        std::mem::take(&mut self.observers)
    }

    /// Remove an observer. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    fn notify(&mut self) {
        trace!(observers = self.observers.len(), "notifying form observers");
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.current);
        }
    }
}
