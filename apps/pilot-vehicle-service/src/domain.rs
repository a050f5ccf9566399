//! Vehicle domain model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Assigned by the repository on first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub make: String,
    pub model: String,
    pub year: u16,
}

impl Vehicle {
    #[must_use]
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: u16) -> Self {
        Self {
            id: None,
            make: make.into(),
            model: model.into(),
            year,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VehicleError {
    #[error("vehicle {id} not found")]
    NotFound { id: u64 },

    #[error("vehicle rejected: {reason}")]
    Rejected { reason: String },
}
