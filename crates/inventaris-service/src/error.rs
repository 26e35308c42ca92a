//! # Service Error Types
//!
//! The error surface callers of the services see.
//!
//! ## Propagation Policy
//! Every service operation converts underlying failures into one typed
//! `ServiceError` instead of raising raw database errors: callers match on
//! the variant (or use [`ServiceError::code`]) rather than parse messages.
//! No retries happen anywhere; a failed write surfaces immediately and the
//! enclosing transaction rolls back. Nothing here is fatal to the process -
//! every failure is scoped to the single call.

use thiserror::Error;

use inventaris_core::{CoreError, ValidationError};
use inventaris_db::DbError;

/// Errors returned by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A domain rule was violated (insufficient stock, unknown barcode,
    /// warehouse not configured, bad input, ...).
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Catch-all for persistence failures. The transaction that hit this
    /// has already rolled back; no partial state is visible.
    #[error("Operation failed: {0}")]
    Operation(#[from] DbError),
}

impl ServiceError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Stable machine-readable code for UI dispatch.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Domain(CoreError::Validation(_)) => "VALIDATION",
            ServiceError::Domain(CoreError::InsufficientStock { .. }) => "INSUFFICIENT_STOCK",
            ServiceError::Domain(CoreError::WarehouseNotConfigured(_)) => {
                "WAREHOUSE_NOT_CONFIGURED"
            }
            ServiceError::Domain(CoreError::UnknownItem(_)) => "UNKNOWN_ITEM",
            ServiceError::Domain(CoreError::AlreadyReturned(_)) => "ALREADY_RETURNED",
            ServiceError::Domain(CoreError::ItemNotFoundAtLocation { .. })
            | ServiceError::Domain(CoreError::BorrowingNotFound(_))
            | ServiceError::NotFound { .. } => "NOT_FOUND",
            ServiceError::Operation(_) => "OPERATION_FAILED",
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Domain(CoreError::Validation(err))
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err: ServiceError = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into();
        assert_eq!(err.code(), "VALIDATION");

        let err = ServiceError::Domain(CoreError::InsufficientStock {
            barcode: "899".to_string(),
            available: 1,
            requested: 2,
        });
        assert_eq!(err.code(), "INSUFFICIENT_STOCK");

        let err = ServiceError::not_found("Item", "some-id");
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "Item not found: some-id");
    }
}
