//! Errors raised while saving or restoring a form.

use std::fmt;
use thiserror::Error;

/// Wire format of a checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckpointFormat {
    Json,
    Binary,
}

impl fmt::Display for CheckpointFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckpointFormat::Json => f.write_str("JSON"),
            CheckpointFormat::Binary => f.write_str("binary"),
        }
    }
}

/// How a checkpoint's snapshots disagree with its recorded history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum HistoryMismatch {
    /// The first transition does not start at `initial`
    #[error("history does not start at the initial snapshot")]
    StartsElsewhere,

    /// The last transition does not end at `current`
    #[error("history does not end at the current snapshot")]
    EndsElsewhere,

    /// No transitions were recorded, yet `initial` and `current` differ
    #[error("no transitions recorded but initial and current snapshots differ")]
    UnrecordedChange,
}

/// Errors from encoding, decoding or resuming a form checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Could not encode checkpoint as {format}: {message}")]
    Encode {
        format: CheckpointFormat,
        message: String,
    },

    #[error("Could not decode {format} checkpoint: {message}")]
    Decode {
        format: CheckpointFormat,
        message: String,
    },

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The snapshots and history of the checkpoint do not line up
    #[error("Inconsistent checkpoint: {0}")]
    Inconsistent(#[from] HistoryMismatch),

    /// A resumed form must keep at least one transition
    #[error("History limit must be at least 1")]
    ZeroHistoryLimit,
}

impl CheckpointError {
    pub(crate) fn encode(format: CheckpointFormat, error: impl fmt::Display) -> Self {
        CheckpointError::Encode {
            format,
            message: error.to_string(),
        }
    }

    pub(crate) fn decode(format: CheckpointFormat, error: impl fmt::Display) -> Self {
        CheckpointError::Decode {
            format,
            message: error.to_string(),
        }
    }
}
