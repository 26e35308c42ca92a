//! # Domain Types
//!
//! Core domain types for the school inventory system.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │      Item       │   │ StockTransaction │   │    Borrowing    │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  id (UUID)      │   │  id (UUID)       │   │  id (UUID)      │      │
//! │  │  barcode        │   │  tx_type IN/OUT  │   │  student_name   │      │
//! │  │  quantity       │   │  quantity        │   │  status         │      │
//! │  │  location_id    │   │  item_id (FK)    │   │  due_date       │      │
//! │  └─────────────────┘   └──────────────────┘   └─────────────────┘      │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │    Location     │   │ TransactionType  │   │  ItemCondition  │      │
//! │  │  name (unique)  │   │  In / Out        │   │  Good/Damaged/  │      │
//! │  │  'Gudang' = WH  │   └──────────────────┘   │  Lost           │      │
//! │  └─────────────────┘                          └─────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Barcode Identity Pattern
//! The barcode is the LOGICAL identity of an item type; it is NOT unique in
//! the `items` table. One logical item may have many location-scoped stock
//! rows sharing the same barcode, one per location. The row at the reserved
//! warehouse location ("Gudang") is the authoritative pool.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Location
// =============================================================================

/// A physical location items can be stored at (warehouse, lab, classroom).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Location {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Unique display name. The name in [`crate::WAREHOUSE_LOCATION_NAME`]
    /// is reserved for the canonical warehouse.
    pub name: String,

    /// Optional free-text description.
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    /// Checks whether this is the reserved warehouse location.
    #[inline]
    pub fn is_warehouse(&self) -> bool {
        self.name == crate::WAREHOUSE_LOCATION_NAME
    }
}

// =============================================================================
// Category
// =============================================================================

/// Static reference data grouping items (Elektronik, Furniture, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Item
// =============================================================================

/// A location-scoped stock row for one logical item type.
///
/// Invariant: `quantity >= 0` always. The service layer enforces this by
/// rejecting operations that would make it negative; the database CHECK is
/// only a backstop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Item {
    /// Unique identifier of this row (UUID v4), NOT of the logical item.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Logical item identity. Shared by every location-scoped row of the
    /// same item type.
    pub barcode: String,

    /// Stock count at this row's location. Never negative.
    pub quantity: i64,

    /// Threshold below which the item counts as low stock.
    pub min_stock: i64,

    /// Optional technical specification text.
    pub specification: Option<String>,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Optional image URL for the catalog UI.
    pub image_url: Option<String>,

    pub category_id: String,
    pub location_id: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Checks whether stock has fallen to or below the minimum threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }

    /// Builds a new stock row for the same logical item at another location.
    ///
    /// ## Copy Semantics
    /// Descriptive attributes (name, barcode, description, min_stock,
    /// image_url, specification, category) are copied; the new row gets a
    /// fresh UUID, the given location, the given starting quantity, and
    /// fresh timestamps. Used when stock first arrives at a location.
    pub fn copy_to_location(&self, location_id: &str, quantity: i64) -> Item {
        let now = Utc::now();
        Item {
            id: Uuid::new_v4().to_string(),
            name: self.name.clone(),
            barcode: self.barcode.clone(),
            quantity,
            min_stock: self.min_stock,
            specification: self.specification.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            category_id: self.category_id.clone(),
            location_id: location_id.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Transaction Type
// =============================================================================

/// Direction of a stock movement event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Stock entering a location.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "IN"))]
    In,
    /// Stock leaving a location.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "OUT"))]
    Out,
}

impl TransactionType {
    /// Converts an unsigned quantity into the signed stock delta this
    /// direction applies: IN adds, OUT subtracts.
    #[inline]
    pub const fn signed(self, quantity: i64) -> i64 {
        match self {
            TransactionType::In => quantity,
            TransactionType::Out => -quantity,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::In => write!(f, "IN"),
            TransactionType::Out => write!(f, "OUT"),
        }
    }
}

// =============================================================================
// Stock Transaction (Ledger Entry)
// =============================================================================

/// One stock movement event in the append-only ledger.
///
/// Never mutated or deleted. Always inserted in the same database
/// transaction as the `Item.quantity` change it documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockTransaction {
    pub id: String,
    pub tx_type: TransactionType,
    /// Unsigned magnitude of the movement; direction lives in `tx_type`.
    pub quantity: i64,
    /// Free-text context (destination of a move, borrower identity, ...).
    pub note: Option<String>,
    pub item_id: String,
    pub date: DateTime<Utc>,
}

// =============================================================================
// Borrowing
// =============================================================================

/// Status of a loan record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[serde(rename_all = "UPPERCASE")]
pub enum BorrowStatus {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "ACTIVE"))]
    Active,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "RETURNED"))]
    Returned,
}

impl Default for BorrowStatus {
    fn default() -> Self {
        BorrowStatus::Active
    }
}

/// Condition tag recorded when a borrowed item comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum ItemCondition {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Good"))]
    Good,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Damaged"))]
    Damaged,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Lost"))]
    Lost,
}

impl std::fmt::Display for ItemCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemCondition::Good => write!(f, "Good"),
            ItemCondition::Damaged => write!(f, "Damaged"),
            ItemCondition::Lost => write!(f, "Lost"),
        }
    }
}

impl std::str::FromStr for ItemCondition {
    type Err = crate::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Good" => Ok(ItemCondition::Good),
            "Damaged" => Ok(ItemCondition::Damaged),
            "Lost" => Ok(ItemCondition::Lost),
            other => Err(crate::ValidationError::InvalidFormat {
                field: "condition".to_string(),
                reason: format!("unknown condition '{}'", other),
            }),
        }
    }
}

/// A loan record linking a student to one specific item row for a bounded
/// period.
///
/// State machine: ACTIVE -> RETURNED (terminal). A borrowing is never
/// deleted or reopened. One borrowing maps to exactly one ledger OUT and,
/// once returned, one ledger IN.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Borrowing {
    pub id: String,
    pub student_name: String,
    pub student_id: Option<String>,
    pub item_id: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub status: BorrowStatus,
    pub return_date: Option<DateTime<Utc>>,
    pub condition: Option<ItemCondition>,
}

impl Borrowing {
    /// Checks whether the loan is still out.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == BorrowStatus::Active
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> Item {
        let now = Utc::now();
        Item {
            id: "item-1".to_string(),
            name: "Proyektor Epson".to_string(),
            barcode: "8991001".to_string(),
            quantity: 4,
            min_stock: 2,
            specification: Some("EB-X500".to_string()),
            description: None,
            image_url: None,
            category_id: "cat-1".to_string(),
            location_id: "loc-gudang".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_signed_delta() {
        assert_eq!(TransactionType::In.signed(5), 5);
        assert_eq!(TransactionType::Out.signed(5), -5);
    }

    #[test]
    fn test_low_stock_threshold_is_inclusive() {
        let mut item = sample_item();
        assert!(!item.is_low_stock());

        item.quantity = 2;
        assert!(item.is_low_stock());
    }

    #[test]
    fn test_copy_to_location_copies_descriptive_fields() {
        let item = sample_item();
        let copy = item.copy_to_location("loc-lab1", 3);

        assert_ne!(copy.id, item.id);
        assert_eq!(copy.barcode, item.barcode);
        assert_eq!(copy.name, item.name);
        assert_eq!(copy.min_stock, item.min_stock);
        assert_eq!(copy.specification, item.specification);
        assert_eq!(copy.category_id, item.category_id);
        assert_eq!(copy.location_id, "loc-lab1");
        assert_eq!(copy.quantity, 3);
    }

    #[test]
    fn test_condition_parse_round_trip() {
        for cond in [ItemCondition::Good, ItemCondition::Damaged, ItemCondition::Lost] {
            let parsed: ItemCondition = cond.to_string().parse().unwrap();
            assert_eq!(parsed, cond);
        }
        assert!("Broken".parse::<ItemCondition>().is_err());
    }

    #[test]
    fn test_borrow_status_default() {
        assert_eq!(BorrowStatus::default(), BorrowStatus::Active);
    }

    #[test]
    fn test_enum_wire_format() {
        assert_eq!(serde_json::to_string(&TransactionType::In).unwrap(), "\"IN\"");
        assert_eq!(serde_json::to_string(&TransactionType::Out).unwrap(), "\"OUT\"");
        assert_eq!(serde_json::to_string(&BorrowStatus::Active).unwrap(), "\"ACTIVE\"");

        let parsed: TransactionType = serde_json::from_str("\"OUT\"").unwrap();
        assert_eq!(parsed, TransactionType::Out);
    }
}
