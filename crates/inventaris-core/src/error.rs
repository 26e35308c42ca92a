//! # Error Types
//!
//! Domain-specific error types for inventaris-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  inventaris-core errors (this file)                                    │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  inventaris-db errors (separate crate)                                 │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  inventaris-service errors (separate crate)                            │
//! │  └── ServiceError     - What callers of the services see               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (barcode, ID, counts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// These represent business rule violations in the stock/ledger model.
/// Services translate them into user-facing failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No item row carries this barcode at the given location.
    ///
    /// ## When This Occurs
    /// - Stock-out scanned for a barcode the warehouse has never held
    /// - Move requested from a room that has no row for the barcode
    #[error("Item with barcode {barcode} not found at location {location_id}")]
    ItemNotFoundAtLocation { barcode: String, location_id: String },

    /// The barcode exists nowhere in the catalog.
    ///
    /// The caller must create the catalog entry before stocking it in.
    #[error("No item with barcode {0} exists in the catalog")]
    UnknownItem(String),

    /// A stock change would drive an item's quantity below zero.
    ///
    /// ## When This Occurs
    /// - Warehouse OUT larger than the warehouse row's quantity
    /// - Move larger than the source row's quantity
    /// - Borrowing an item whose stock is already exhausted
    #[error("Insufficient stock for {barcode}: available {available}, requested {requested}")]
    InsufficientStock {
        barcode: String,
        available: i64,
        requested: i64,
    },

    /// The reserved warehouse location is missing.
    ///
    /// Every deployment must seed a location with the reserved name
    /// before warehouse transactions can run.
    #[error("Warehouse location '{0}' is not configured")]
    WarehouseNotConfigured(String),

    /// Borrowing record does not exist.
    #[error("Borrowing not found: {0}")]
    BorrowingNotFound(String),

    /// Borrowing is already in the terminal RETURNED state.
    ///
    /// The loan state machine is ACTIVE -> RETURNED, terminal. A loan is
    /// never reopened.
    #[error("Borrowing {0} has already been returned")]
    AlreadyReturned(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any database read happens.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative (zero allowed).
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Two fields that must differ are equal (e.g. source == target location).
    #[error("{field} must differ from {other}")]
    MustDiffer { field: String, other: String },

    /// A collection exceeds its allowed size.
    #[error("{field} cannot contain more than {max} entries")]
    TooMany { field: String, max: usize },

    /// Invalid format (e.g. unparseable condition tag).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            barcode: "8991234".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for 8991234: available 3, requested 5"
        );

        let err = CoreError::WarehouseNotConfigured("Gudang".to_string());
        assert_eq!(err.to_string(), "Warehouse location 'Gudang' is not configured");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "studentName".to_string(),
        };
        assert_eq!(err.to_string(), "studentName is required");

        let err = ValidationError::MustDiffer {
            field: "toLocationId".to_string(),
            other: "fromLocationId".to_string(),
        };
        assert_eq!(err.to_string(), "toLocationId must differ from fromLocationId");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
