pub mod detector;
pub mod differ;
pub mod loader;
pub mod validator;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::{SchemaValidationError, State};
use crate::storage::StorageError;

pub use detector::{detect_drift, perform_drift_detection, run_drift_detection, DriftRequest};
pub use differ::{decompose_field, decompose_row, diff};
pub use loader::{load_shortcuts, load_state};
pub use validator::{check_comparable, StateMismatchError};

/// A drifted field: the raw string, or its `|`-separated parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DriftField {
    Value(String),
    Parts(Vec<String>),
}

impl DriftField {
    /// Joins parts back into the stored representation.
    pub fn joined(&self) -> String {
        match self {
            Self::Value(v) => v.clone(),
            Self::Parts(parts) => parts.join(differ::FIELD_DELIMITER),
        }
    }
}

pub type DriftRow = Vec<DriftField>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftOutcome {
    /// Rows present in the end state only.
    pub additions: Vec<DriftRow>,
    /// Rows present in the start state only.
    pub removals: Vec<DriftRow>,
    pub end_state: State,
}

impl DriftOutcome {
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn to_report(&self) -> DriftReport {
        DriftReport {
            name: self.end_state.name.clone(),
            properties: self.end_state.properties.clone(),
            additions: self.additions.clone(),
            removals: self.removals.clone(),
            detected_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftReport {
    pub name: String,
    pub properties: Vec<String>,
    pub additions: Vec<DriftRow>,
    pub removals: Vec<DriftRow>,
    pub detected_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum DriftError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),
    #[error(transparent)]
    Mismatch(#[from] StateMismatchError),
}
