use supply_points_sdk::{SupplyPointId, SupplyPointsError};
use thiserror::Error;

use crate::domain::ports::StoreError;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Supply point not found: {id}")]
    NotFound { id: SupplyPointId },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Document store error: {message}")]
    Store { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
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

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

impl From<time::error::Format> for DomainError {
    fn from(e: time::error::Format) -> Self {
        Self::Internal {
            message: format!("timestamp formatting failed: {e}"),
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { id, .. } => Self::not_found(id),
            other => Self::store(other.to_string()),
        }
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for SupplyPointsError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::NotFound { id } => SupplyPointsError::not_found(id),
            DomainError::Validation { field, message } => {
                SupplyPointsError::validation(field, message)
            }
            DomainError::Store { message } => SupplyPointsError::unavailable(message),
            DomainError::Internal { .. } => SupplyPointsError::internal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_keeps_the_id() {
        let err: DomainError = StoreError::NotFound {
            collection: "supplyPoints".to_owned(),
            id: SupplyPointId::from("abc"),
        }
        .into();
        assert_eq!(err, DomainError::not_found(SupplyPointId::from("abc")));
    }

    #[test]
    fn transport_failure_becomes_unavailable() {
        let err: DomainError = StoreError::Transport("connection reset".to_owned()).into();
        let sdk: SupplyPointsError = err.into();
        assert!(matches!(sdk, SupplyPointsError::Unavailable { message } if message.contains("connection reset")));
    }
}
