//! Shared handle and update handlers for a form store.
//!
//! `use_form` returns the triple a form-rendering layer works with: a handle
//! to read the current snapshot, a handler for single-field edits and a
//! handler that replaces all of the form's data.
//!
//! The handle owns the form. Handlers and [`WeakFormHandle`] only refer to it,
//! so observers may capture them without keeping the form alive.

use super::form::{FormStore, Observer, SubscriptionId};
use crate::checkpoint::FormCheckpoint;
use crate::core::{FieldValue, FormAction, FormHistory, FormInputs, FormSnapshot};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use tracing::trace;

/// Work applied to the store strictly one item at a time.
enum Command<V: FieldValue> {
    Apply(FormAction<V>),
    Undo,
    Subscribe(SubscriptionId, Observer<V>),
    Unsubscribe(SubscriptionId),
}

struct Shared<V: FieldValue> {
    store: RefCell<FormStore<V>>,
    observers: RefCell<Vec<(SubscriptionId, Observer<V>)>>,
    // Registered ids, including ones whose registration is still queued.
    active: RefCell<Vec<SubscriptionId>>,
    pending: RefCell<VecDeque<Command<V>>>,
    draining: Cell<bool>,
}

impl<V: FieldValue> Shared<V> {
    fn execute(&self, command: Command<V>) {
        match command {
            Command::Apply(action) => {
                let snapshot = self.store.borrow_mut().apply(action).clone();
                self.notify(&snapshot);
            }
            Command::Undo => {
                if self.store.borrow_mut().rewind() {
                    let snapshot = self.store.borrow().snapshot().clone();
                    self.notify(&snapshot);
                }
            }
            Command::Subscribe(id, observer) => {
                self.observers.borrow_mut().push((id, observer));
            }
            Command::Unsubscribe(id) => {
                self.observers
                    .borrow_mut()
                    .retain(|(registered, _)| *registered != id);
            }
        }
    }

    // The store is not borrowed while observers run, so they may read it.
    fn notify(&self, snapshot: &FormSnapshot<V>) {
        let mut observers = self.observers.borrow_mut();
        trace!(observers = observers.len(), "notifying form observers");
        for (_, observer) in observers.iter_mut() {
            observer(snapshot);
        }
    }
}

struct DrainGuard<'a>(&'a Cell<bool>);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Cloneable, single-threaded handle to a [`FormStore`].
///
/// Every call is serialized: an update, undo or (un)subscription issued while
/// another update is being applied, for example from an observer callback,
/// is queued and applied after it in the order it was issued. Reads never
/// wait and see the snapshot the in-flight update installed.
///
/// The form lives as long as at least one `FormHandle` does.
pub struct FormHandle<V: FieldValue> {
    shared: Rc<Shared<V>>,
}

impl<V: FieldValue> Clone for FormHandle<V> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<V: FieldValue> FormHandle<V> {
    /// Wrap `store`. Observers already registered on it move to the handle.
    pub fn new(mut store: FormStore<V>) -> Self {
        let observers = store.take_observers();
        let active: Vec<SubscriptionId> = observers.iter().map(|(id, _)| *id).collect();

        Self {
            shared: Rc::new(Shared {
                store: RefCell::new(store),
                observers: RefCell::new(observers),
                active: RefCell::new(active),
                pending: RefCell::new(VecDeque::new()),
                draining: Cell::new(false),
            }),
        }
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> FormSnapshot<V> {
        self.shared.store.borrow().snapshot().clone()
    }

    /// Copy of the recorded transition history.
    pub fn history(&self) -> FormHistory<V> {
        self.shared.store.borrow().history().clone()
    }

    /// Capture the form. See [`FormStore::checkpoint`].
    pub fn checkpoint(&self) -> FormCheckpoint<V> {
        self.shared.store.borrow().checkpoint()
    }

    /// Apply `action` now, or queue it behind the update in flight.
    pub fn dispatch(&self, action: FormAction<V>) {
        self.run(Command::Apply(action));
    }

    /// Reinstall the snapshot that preceded the most recent transition.
    ///
    /// Returns `false` when the history was empty at the time of the call.
    /// An undo requested from an observer is applied after the update in
    /// flight.
    pub fn undo(&self) -> bool {
        let available = !self.shared.store.borrow().history().is_empty();
        if available {
            self.run(Command::Undo);
        }
        available
    }

    /// Register an observer for every future snapshot.
    ///
    /// An observer registered from inside another observer is first called
    /// for the update after the one in flight.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: FnMut(&FormSnapshot<V>) + 'static,
    {
        let id = self.shared.store.borrow_mut().next_subscription_id();
        self.shared.active.borrow_mut().push(id);
        self.run(Command::Subscribe(id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = {
            let mut active = self.shared.active.borrow_mut();
            let before = active.len();
            active.retain(|registered| *registered != id);
            active.len() != before
        };
        if removed {
            self.run(Command::Unsubscribe(id));
        }
        removed
    }

    pub fn input_handler(&self) -> InputHandler<V> {
        InputHandler {
            form: self.downgrade(),
        }
    }

    pub fn set_data_handler(&self) -> SetDataHandler<V> {
        SetDataHandler {
            form: self.downgrade(),
        }
    }

    /// Non-owning reference to this form, safe to capture in observers.
    pub fn downgrade(&self) -> WeakFormHandle<V> {
        WeakFormHandle {
            shared: Rc::downgrade(&self.shared),
        }
    }

    fn run(&self, command: Command<V>) {
        self.shared.pending.borrow_mut().push_back(command);

        if self.shared.draining.replace(true) {
            trace!("queued form command behind in-flight update");
            return;
        }
        let _guard = DrainGuard(&self.shared.draining);

        loop {
            let next = self.shared.pending.borrow_mut().pop_front();
            let Some(command) = next else {
                break;
            };
            self.shared.execute(command);
        }
    }
}

/// Non-owning reference to a form, obtained from [`FormHandle::downgrade`].
pub struct WeakFormHandle<V: FieldValue> {
    shared: Weak<Shared<V>>,
}

impl<V: FieldValue> Clone for WeakFormHandle<V> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
        }
    }
}

impl<V: FieldValue> WeakFormHandle<V> {
    /// The form, unless every [`FormHandle`] to it has been dropped.
    pub fn upgrade(&self) -> Option<FormHandle<V>> {
        self.shared.upgrade().map(|shared| FormHandle { shared })
    }

    fn dispatch(&self, action: FormAction<V>) {
        match self.upgrade() {
            Some(form) => form.dispatch(action),
            None => trace!(action = ?action.kind(), "form dropped, ignoring action"),
        }
    }
}

/// Handler for single-field edits.
///
/// Calls made after the form has been dropped are ignored.
pub struct InputHandler<V: FieldValue> {
    form: WeakFormHandle<V>,
}

impl<V: FieldValue> Clone for InputHandler<V> {
    fn clone(&self) -> Self {
        Self {
            form: self.form.clone(),
        }
    }
}

impl<V: FieldValue> InputHandler<V> {
    pub fn handle(&self, field_id: impl Into<String>, value: impl Into<Option<V>>, is_valid: bool) {
        self.form
            .dispatch(FormAction::input_change(field_id, value, is_valid));
    }
}

/// Handler that replaces all of the form's data.
///
/// Calls made after the form has been dropped are ignored.
pub struct SetDataHandler<V: FieldValue> {
    form: WeakFormHandle<V>,
}

impl<V: FieldValue> Clone for SetDataHandler<V> {
    fn clone(&self) -> Self {
        Self {
            form: self.form.clone(),
        }
    }
}

impl<V: FieldValue> SetDataHandler<V> {
    pub fn handle(&self, inputs: FormInputs<V>, form_is_valid: bool) {
        self.form.dispatch(FormAction::set_data(inputs, form_is_valid));
    }
}

/// Create a form and return its handle together with its two update handlers.
///
/// The handle owns the form; keep it alive for as long as the handlers are
/// used.
///
/// # Example
///
/// ```rust
/// use formstate::core::{FieldEntry, FormInputs};
/// use formstate::store::use_form;
///
/// let inputs = FormInputs::new().with_field("title", FieldEntry::new(None::<String>, false));
/// let (form, on_input, set_form_data) = use_form(inputs, false);
///
/// on_input.handle("title", "Hello".to_string(), true);
/// assert!(form.snapshot().is_valid());
///
/// set_form_data.handle(FormInputs::new(), false);
/// assert!(form.snapshot().inputs().is_empty());
/// ```
pub fn use_form<V: FieldValue>(
    initial_inputs: FormInputs<V>,
    initial_validity: bool,
) -> (FormHandle<V>, InputHandler<V>, SetDataHandler<V>) {
    let handle = FormHandle::new(FormStore::new(initial_inputs, initial_validity));
    let input_handler = handle.input_handler();
    let set_data_handler = handle.set_data_handler();
    (handle, input_handler, set_data_handler)
}
