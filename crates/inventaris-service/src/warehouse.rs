//! # Warehouse Service
//!
//! Stock movements in and out of the central warehouse ("Gudang").
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     WAREHOUSE TRANSACTION FLOW                          │
//! │                                                                         │
//! │  request { barcode, quantity, txType, note }                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve "Gudang" location ──── missing ──► WarehouseNotConfigured     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  item at Gudang?                                                        │
//! │   ├── yes ──► StockMutator.apply_to(±quantity)                         │
//! │   │                                                                     │
//! │   └── no ───► OUT: ItemNotFoundAtLocation                              │
//! │               IN:  known barcode elsewhere?                             │
//! │                     ├── yes ──► copy row to Gudang + IN ledger entry   │
//! │                     └── no ───► UnknownItem                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::info;

use crate::error::ServiceResult;
use crate::stock::{commit, StockMutator};
use inventaris_core::validation::{validate_barcode, validate_quantity};
use inventaris_core::{CoreError, Item, Location, TransactionType, WAREHOUSE_LOCATION_NAME};
use inventaris_db::Database;

/// One warehouse stock movement, as submitted by the scanner form.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseRequest {
    pub barcode: String,
    pub quantity: i64,
    pub tx_type: TransactionType,
    #[serde(default)]
    pub note: Option<String>,
}

/// Handles IN/OUT movements at the central warehouse.
#[derive(Debug, Clone)]
pub struct WarehouseService {
    db: Database,
    stock: StockMutator,
}

impl WarehouseService {
    pub fn new(db: Database) -> Self {
        let stock = StockMutator::new(db.clone());
        WarehouseService { db, stock }
    }

    /// Processes one warehouse movement atomically.
    ///
    /// OUT requires the item to exist at the warehouse with enough stock.
    /// IN increments an existing warehouse row, or, for a barcode known at
    /// another location, creates the warehouse row by copying the item's
    /// descriptive fields. A barcode the catalog has never seen is rejected.
    pub async fn process_transaction(&self, req: &WarehouseRequest) -> ServiceResult<Item> {
        validate_barcode(&req.barcode)?;
        validate_quantity(req.quantity)?;
        let barcode = req.barcode.trim();

        let warehouse = self.warehouse_location().await?;

        let mut tx = self.stock.begin().await?;

        let existing = self
            .db
            .items()
            .find_at_location(&mut *tx, barcode, &warehouse.id)
            .await?;

        let item = match (existing, req.tx_type) {
            (Some(item), tx_type) => {
                let delta = tx_type.signed(req.quantity);
                self.stock
                    .apply_to(&mut tx, &item, delta, tx_type, req.note.as_deref())
                    .await?;
                Item {
                    quantity: item.quantity + delta,
                    ..item
                }
            }
            (None, TransactionType::Out) => {
                return Err(CoreError::ItemNotFoundAtLocation {
                    barcode: barcode.to_string(),
                    location_id: warehouse.id.clone(),
                }
                .into());
            }
            (None, TransactionType::In) => {
                // First delivery of a barcode the catalog knows from another
                // location: materialize its warehouse row.
                let template = self
                    .db
                    .items()
                    .find_any(&mut *tx, barcode)
                    .await?
                    .ok_or_else(|| CoreError::UnknownItem(barcode.to_string()))?;

                let copy = template.copy_to_location(&warehouse.id, req.quantity);
                self.db.items().insert(&mut *tx, &copy).await?;
                self.db
                    .ledger()
                    .record(
                        &mut *tx,
                        TransactionType::In,
                        req.quantity,
                        req.note.as_deref(),
                        &copy.id,
                    )
                    .await?;
                copy
            }
        };

        commit(tx).await?;

        info!(
            barcode,
            tx_type = %req.tx_type,
            quantity = req.quantity,
            "Warehouse transaction recorded"
        );

        Ok(item)
    }

    /// Resolves the reserved warehouse location row.
    pub(crate) async fn warehouse_location(&self) -> ServiceResult<Location> {
        self.db
            .locations()
            .get_by_name(WAREHOUSE_LOCATION_NAME)
            .await?
            .ok_or_else(|| {
                CoreError::WarehouseNotConfigured(WAREHOUSE_LOCATION_NAME.to_string()).into()
            })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_db;
    use inventaris_db::{Database, DbConfig};

    fn out_request(barcode: &str, quantity: i64) -> WarehouseRequest {
        WarehouseRequest {
            barcode: barcode.to_string(),
            quantity,
            tx_type: TransactionType::Out,
            note: None,
        }
    }

    fn in_request(barcode: &str, quantity: i64) -> WarehouseRequest {
        WarehouseRequest {
            barcode: barcode.to_string(),
            quantity,
            tx_type: TransactionType::In,
            note: Some("Delivery".to_string()),
        }
    }

    #[tokio::test]
    async fn test_stock_out_decrements_and_writes_ledger() {
        let fixture = test_db().await;
        let item = fixture.seed_item("8990000000001", &fixture.warehouse.id, 10).await;
        let service = WarehouseService::new(fixture.db.clone());

        let updated = service.process_transaction(&out_request(&item.barcode, 3)).await.unwrap();

        assert_eq!(updated.quantity, 7);
        assert_eq!(fixture.quantity(&item.id).await, 7);

        let history = fixture.db.ledger().for_item(&item.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].tx_type, TransactionType::Out);
        assert_eq!(history[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_stock_out_beyond_available_changes_nothing() {
        let fixture = test_db().await;
        let item = fixture.seed_item("8990000000001", &fixture.warehouse.id, 5).await;
        let service = WarehouseService::new(fixture.db.clone());

        let err = service.process_transaction(&out_request(&item.barcode, 6)).await.unwrap_err();

        assert_eq!(err.code(), "INSUFFICIENT_STOCK");
        assert_eq!(fixture.quantity(&item.id).await, 5);
        assert_eq!(fixture.ledger_count(&item.id).await, 0);
    }

    #[tokio::test]
    async fn test_stock_in_increments_existing_row() {
        let fixture = test_db().await;
        let item = fixture.seed_item("8990000000001", &fixture.warehouse.id, 5).await;
        let service = WarehouseService::new(fixture.db.clone());

        let updated = service.process_transaction(&in_request(&item.barcode, 4)).await.unwrap();

        assert_eq!(updated.quantity, 9);
        let history = fixture.db.ledger().for_item(&item.id).await.unwrap();
        assert_eq!(history[0].tx_type, TransactionType::In);
        assert_eq!(history[0].note.as_deref(), Some("Delivery"));
    }

    #[tokio::test]
    async fn test_stock_in_copies_row_from_other_location() {
        let fixture = test_db().await;
        let lab_item = fixture.seed_item("8990000000002", &fixture.lab.id, 3).await;
        let service = WarehouseService::new(fixture.db.clone());

        let created = service.process_transaction(&in_request(&lab_item.barcode, 8)).await.unwrap();

        assert_ne!(created.id, lab_item.id);
        assert_eq!(created.location_id, fixture.warehouse.id);
        assert_eq!(created.quantity, 8);
        assert_eq!(created.name, lab_item.name);
        // The lab row is untouched.
        assert_eq!(fixture.quantity(&lab_item.id).await, 3);
        assert_eq!(fixture.ledger_count(&created.id).await, 1);
    }

    #[tokio::test]
    async fn test_stock_in_unknown_barcode_rejected() {
        let fixture = test_db().await;
        let service = WarehouseService::new(fixture.db.clone());

        let err = service.process_transaction(&in_request("99999", 1)).await.unwrap_err();

        assert_eq!(err.code(), "UNKNOWN_ITEM");
        assert!(fixture.db.items().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stock_out_missing_warehouse_row_rejected() {
        let fixture = test_db().await;
        fixture.seed_item("8990000000002", &fixture.lab.id, 3).await;
        let service = WarehouseService::new(fixture.db.clone());

        let err = service
            .process_transaction(&out_request("8990000000002", 1))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_missing_warehouse_location() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let service = WarehouseService::new(db);

        let err = service.process_transaction(&out_request("123", 1)).await.unwrap_err();

        assert_eq!(err.code(), "WAREHOUSE_NOT_CONFIGURED");
    }

    #[test]
    fn test_request_parses_from_camel_case_json() {
        let req: WarehouseRequest = serde_json::from_str(
            r#"{"barcode":"8991001","quantity":3,"txType":"OUT"}"#,
        )
        .unwrap();

        assert_eq!(req.barcode, "8991001");
        assert_eq!(req.tx_type, TransactionType::Out);
        assert!(req.note.is_none());
    }

    #[tokio::test]
    async fn test_zero_quantity_rejected() {
        let fixture = test_db().await;
        let service = WarehouseService::new(fixture.db.clone());

        let err = service.process_transaction(&out_request("123", 0)).await.unwrap_err();

        assert_eq!(err.code(), "VALIDATION");
    }
}
