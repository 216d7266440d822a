use neeru_errors::Problem;

use crate::domain::error::DomainError;
use crate::errors::ErrorCode;

/// Map domain error to RFC9457 Problem using the catalog
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let trace_id = tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string());

    match e {
        DomainError::NotFound { id } => ErrorCode::supply_point_not_found_v1().with_context(
            format!("Supply point with id {id} was not found"),
            instance,
            trace_id,
        ),
        DomainError::Validation { field, message } => ErrorCode::supply_point_validation_v1()
            .with_context(format!("{field}: {message}"), instance, trace_id)
            .with_violation(field.as_str(), message.as_str()),
        DomainError::Store { .. } => {
            // Log the store details but keep them out of the response
            tracing::error!(error = ?e, "Document store error");
            ErrorCode::store_unavailable_v1().with_context(
                "The document store could not complete the request",
                instance,
                trace_id,
            )
        }
        DomainError::Internal { .. } => {
            tracing::error!(error = ?e, "Internal error");
            ErrorCode::internal_v1().with_context(
                "The request could not be completed",
                instance,
                trace_id,
            )
        }
    }
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}
