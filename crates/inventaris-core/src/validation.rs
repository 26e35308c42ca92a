//! # Validation Module
//!
//! Input validation utilities for the inventory services.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (UI / scan handler)                                   │
//! │  ├── Basic format checks, immediate feedback                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - before any database read                       │
//! │  ├── Required fields, positive quantities, length caps                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE / CHECK / foreign key constraints               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_BARCODE_LEN, MAX_BORROW_ITEMS, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a barcode string.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most [`MAX_BARCODE_LEN`] characters
///
/// Scanners emit opaque strings; beyond the length cap no format is assumed,
/// so hand-typed codes and EAN-13 scans are treated alike.
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if barcode.len() > MAX_BARCODE_LEN {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: MAX_BARCODE_LEN,
        });
    }

    Ok(())
}

/// Validates a display name (item, location, student).
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock movement quantity: must be strictly positive.
///
/// The ledger stores unsigned magnitudes; direction is carried by the
/// transaction type, so a zero or negative quantity is always caller error.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a count that may be zero but never negative (initial stock,
/// minimum stock threshold).
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a borrow cart: non-empty and capped at [`MAX_BORROW_ITEMS`].
pub fn validate_borrow_cart(item_ids: &[String]) -> ValidationResult<()> {
    if item_ids.is_empty() {
        return Err(ValidationError::Required {
            field: "itemIds".to_string(),
        });
    }

    if item_ids.len() > MAX_BORROW_ITEMS {
        return Err(ValidationError::TooMany {
            field: "itemIds".to_string(),
            max: MAX_BORROW_ITEMS,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_barcode() {
        assert!(validate_barcode("8991001").is_ok());
        assert!(validate_barcode("  8991001  ").is_ok());
        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("   ").is_err());
        assert!(validate_barcode(&"9".repeat(MAX_BARCODE_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Proyektor Epson").is_ok());
        assert!(validate_name("studentName", "").is_err());
        assert!(validate_name("name", &"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("minStock", 0).is_ok());
        assert!(validate_non_negative("minStock", 7).is_ok());
        assert!(validate_non_negative("minStock", -1).is_err());
    }

    #[test]
    fn test_validate_borrow_cart() {
        assert!(validate_borrow_cart(&["a".to_string()]).is_ok());
        assert!(validate_borrow_cart(&[]).is_err());

        let oversized: Vec<String> = (0..=MAX_BORROW_ITEMS).map(|i| i.to_string()).collect();
        assert!(validate_borrow_cart(&oversized).is_err());
    }
}
