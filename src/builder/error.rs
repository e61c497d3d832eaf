//! Build errors for the form store builder.

use thiserror::Error;

/// Errors that can occur when building a form store.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial validity not specified. Call .initially_valid(bool) or .derive_validity() before .build()")]
    MissingInitialValidity,

    #[error("History limit must be at least 1")]
    ZeroHistoryLimit,
}
