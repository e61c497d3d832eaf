//! Checkpoint and resume functionality for forms.
//!
//! A checkpoint captures a store's current snapshot and its history so a
//! partially filled form can be saved and restored later. Observers are not
//! part of a checkpoint.

use crate::core::{FieldValue, FormHistory, FormSnapshot};
use crate::store::FormStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::{CheckpointError, CheckpointFormat, HistoryMismatch};

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of a form store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FormCheckpoint<V: FieldValue> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Oldest snapshot still covered by the history
    pub initial: FormSnapshot<V>,

    /// Current snapshot of the form
    pub current: FormSnapshot<V>,

    /// Recorded transition history
    pub history: FormHistory<V>,
}

impl<V: FieldValue> FormCheckpoint<V> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::encode(CheckpointFormat::Json, e))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::decode(CheckpointFormat::Json, e))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::encode(CheckpointFormat::Binary, e))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::decode(CheckpointFormat::Binary, e))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Check the version and that the history ends at the current snapshot.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let mismatch = match (self.history.first(), self.history.last()) {
            (Some(first), _) if first.from != self.initial => Some(HistoryMismatch::StartsElsewhere),
            (_, Some(last)) if last.to != self.current => Some(HistoryMismatch::EndsElsewhere),
            (None, None) if self.initial != self.current => Some(HistoryMismatch::UnrecordedChange),
            _ => None,
        };

        match mismatch {
            Some(mismatch) => Err(mismatch.into()),
            None => Ok(()),
        }
    }
}

impl<V: FieldValue> FormStore<V> {
    /// Capture the current snapshot and history.
    pub fn checkpoint(&self) -> FormCheckpoint<V> {
        let current = self.snapshot().clone();
        let initial = self
            .history()
            .first()
            .map(|transition| transition.from.clone())
            .unwrap_or_else(|| current.clone());

        FormCheckpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            initial,
            current,
            history: self.history().clone(),
        }
    }

    /// Rebuild a store from a checkpoint. Observers must be registered again.
    pub fn resume(checkpoint: FormCheckpoint<V>, history_limit: usize) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;

        if history_limit == 0 {
            return Err(CheckpointError::ZeroHistoryLimit);
        }

        debug!(
            checkpoint = %checkpoint.id,
            transitions = checkpoint.history.len(),
            "resuming form from checkpoint"
        );

        let mut history = checkpoint.history;
        history.truncate_front(history_limit);

        Ok(Self::from_snapshot(checkpoint.current, history, history_limit))
    }
}
