//! Form transition history tracking.
//!
//! Provides immutable tracking of the snapshots a form moved through,
//! following functional programming principles.

use super::reducer::ActionKind;
use super::snapshot::FormSnapshot;
use super::value::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{vec_deque, VecDeque};
use std::time::Duration;

/// Record of a single applied action.
///
/// Transitions are immutable values representing a move from one snapshot
/// to the next at a specific point in time.
///
/// # Example
///
/// ```rust
/// use formstate::core::{ActionKind, FormInputs, FormSnapshot, FormTransition};
/// use chrono::Utc;
///
/// let transition: FormTransition<String> = FormTransition {
///     from: FormSnapshot::new(FormInputs::new(), false),
///     to: FormSnapshot::new(FormInputs::new(), true),
///     action: ActionKind::SetData,
///     timestamp: Utc::now(),
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FormTransition<V: FieldValue> {
    /// The snapshot the action was applied to
    pub from: FormSnapshot<V>,
    /// The snapshot the action produced
    pub to: FormSnapshot<V>,
    /// Which action produced the transition
    pub action: ActionKind,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of form transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition added. The store appends to its own history in place.
///
/// # Example
///
/// ```rust
/// use formstate::core::{apply_input_change, initialize, ActionKind, FieldEntry, FormHistory, FormInputs, FormTransition};
/// use chrono::Utc;
///
/// let start = initialize(
///     FormInputs::new().with_field("name", FieldEntry::<String>::new("A".to_string(), true)),
///     true,
/// );
/// let next = apply_input_change(&start, "name", "".to_string(), false);
///
/// let history = FormHistory::new().record(FormTransition {
///     from: start,
///     to: next,
///     action: ActionKind::InputChange { field_id: "name".to_string() },
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FormHistory<V: FieldValue> {
    transitions: VecDeque<FormTransition<V>>,
}

impl<V: FieldValue> Default for FormHistory<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: FieldValue> FormHistory<V> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// This is a pure function - it does not mutate the existing history
    /// but returns a new one with the transition added.
    pub fn record(&self, transition: FormTransition<V>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push_back(transition);
        Self { transitions }
    }

    /// Keep only the most recent `n` transitions, returning a new history.
    pub fn retain_last(&self, n: usize) -> Self {
        let skip = self.transitions.len().saturating_sub(n);
        Self {
            transitions: self.transitions.iter().skip(skip).cloned().collect(),
        }
    }

    /// History without its most recent transition.
    pub fn without_last(&self) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.pop_back();
        Self { transitions }
    }

    /// Append a transition in place, dropping the oldest ones beyond `limit`.
    pub(crate) fn push_bounded(&mut self, transition: FormTransition<V>, limit: usize) {
        self.transitions.push_back(transition);
        while self.transitions.len() > limit {
            self.transitions.pop_front();
        }
    }

    /// Remove and return the most recent transition in place.
    pub(crate) fn pop_last(&mut self) -> Option<FormTransition<V>> {
        self.transitions.pop_back()
    }

    /// Drop the oldest transitions in place until at most `limit` remain.
    pub(crate) fn truncate_front(&mut self, limit: usize) {
        let excess = self.transitions.len().saturating_sub(limit);
        self.transitions.drain(..excess);
    }

    /// Get the path of snapshots traversed.
    ///
    /// Returns references in order: the first `from` snapshot, then
    /// the `to` snapshot of each transition.
    pub fn get_path(&self) -> Vec<&FormSnapshot<V>> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn first(&self) -> Option<&FormTransition<V>> {
        self.transitions.front()
    }

    pub fn last(&self) -> Option<&FormTransition<V>> {
        self.transitions.back()
    }

    /// Transitions from oldest to newest.
    pub fn transitions(&self) -> vec_deque::Iter<'_, FormTransition<V>> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::{FieldEntry, FormInputs};

    fn snapshot(name: &str, is_valid: bool) -> FormSnapshot<String> {
        let inputs = FormInputs::new().with_field("name", FieldEntry::new(name.to_string(), is_valid));
        FormSnapshot::new(inputs, is_valid)
    }

    fn transition(from: &str, to: &str) -> FormTransition<String> {
        FormTransition {
            from: snapshot(from, true),
            to: snapshot(to, true),
            action: ActionKind::InputChange {
                field_id: "name".to_string(),
            },
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: FormHistory<String> = FormHistory::new();
        assert_eq!(history.transitions().len(), 0);
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = FormHistory::new();

        let new_history = history.record(transition("A", "B"));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn get_path_returns_snapshot_sequence() {
        let history = FormHistory::new()
            .record(transition("A", "B"))
            .record(transition("B", "C"));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &snapshot("A", true));
        assert_eq!(path[1], &snapshot("B", true));
        assert_eq!(path[2], &snapshot("C", true));
    }

    #[test]
    fn retain_last_drops_oldest_transitions() {
        let history = FormHistory::new()
            .record(transition("A", "B"))
            .record(transition("B", "C"))
            .record(transition("C", "D"));

        let trimmed = history.retain_last(2);

        assert_eq!(trimmed.len(), 2);
        assert_eq!(trimmed.get_path()[0], &snapshot("B", true));
        assert_eq!(history.len(), 3);
        assert_eq!(history.retain_last(10).len(), 3);
    }

    #[test]
    fn without_last_drops_most_recent_transition() {
        let history = FormHistory::new()
            .record(transition("A", "B"))
            .record(transition("B", "C"));

        let rewound = history.without_last();

        assert_eq!(rewound.len(), 1);
        assert_eq!(rewound.last().map(|t| &t.to), Some(&snapshot("B", true)));
        assert!(FormHistory::<String>::new().without_last().is_empty());
    }

    #[test]
    fn push_bounded_drops_oldest_in_place() {
        let mut history = FormHistory::new();

        history.push_bounded(transition("A", "B"), 2);
        history.push_bounded(transition("B", "C"), 2);
        history.push_bounded(transition("C", "D"), 2);

        assert_eq!(history.len(), 2);
        assert_eq!(history.first().map(|t| &t.from), Some(&snapshot("B", true)));
        assert_eq!(history.last().map(|t| &t.to), Some(&snapshot("D", true)));
    }

    #[test]
    fn pop_last_returns_most_recent_transition() {
        let mut history = FormHistory::new()
            .record(transition("A", "B"))
            .record(transition("B", "C"));

        let popped = history.pop_last();

        assert_eq!(popped.map(|t| t.to), Some(snapshot("C", true)));
        assert_eq!(history.len(), 1);
        assert!(FormHistory::<String>::new().pop_last().is_none());
    }

    #[test]
    fn truncate_front_matches_retain_last() {
        let history = FormHistory::new()
            .record(transition("A", "B"))
            .record(transition("B", "C"))
            .record(transition("C", "D"));

        let mut truncated = history.clone();
        truncated.truncate_front(1);

        assert_eq!(truncated, history.retain_last(1));
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let history = FormHistory::new().record(transition("A", "B"));

        std::thread::sleep(std::time::Duration::from_millis(10));

        let history = history.record(transition("B", "C"));

        let duration = history.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let history = FormHistory::new().record(transition("A", "B"));

        assert_eq!(history.duration(), Some(std::time::Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = FormHistory::new().record(transition("A", "B"));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: FormHistory<String> = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
