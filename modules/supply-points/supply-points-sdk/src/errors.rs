//! Public error types for the `supply-points` module.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;

use crate::models::SupplyPointId;

/// Errors that can be returned by the `SupplyPointsClient`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SupplyPointsError {
    /// No document is stored under the given id.
    #[error("Supply point not found: {id}")]
    NotFound { id: SupplyPointId },

    /// The submitted form was rejected before anything was written.
    #[error("Validation error on '{field}': {message}")]
    Validation { field: String, message: String },

    /// The document store could not be reached or refused the call.
    #[error("Document store unavailable: {message}")]
    Unavailable { message: String },

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl SupplyPointsError {
    #[must_use]
    pub fn not_found(id: SupplyPointId) -> Self {
        Self::NotFound { id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
