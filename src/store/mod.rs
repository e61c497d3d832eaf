//! The imperative shell around the pure core.
//!
//! [`FormStore`] owns the current snapshot, applies actions through the
//! reducer and pushes every new snapshot to its observers. [`FormHandle`]
//! and [`use_form`] wrap a store for a single-threaded UI layer.

mod form;
mod handle;

pub use form::{FormStore, Observer, SubscriptionId, DEFAULT_HISTORY_LIMIT};
pub use handle::{use_form, FormHandle, InputHandler, SetDataHandler, WeakFormHandle};
