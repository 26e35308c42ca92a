//! # Move Service
//!
//! Relocates stock between two locations atomically.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          MOVE FLOW                                      │
//! │                                                                         │
//! │  request { barcode, sourceLocationId, targetLocationId, quantity }      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                 │
//! │    ├── source row (barcode, source)  ── missing ──► error, rollback    │
//! │    ├── OUT  at source: −quantity + ledger "Moved to {target}"          │
//! │    ├── target row (barcode, target)?                                    │
//! │    │     ├── yes ──► +quantity                                         │
//! │    │     └── no ───► copy row to target with quantity                  │
//! │    └── IN   at target: ledger "Moved from {source}"                    │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Both ledger entries reference the row at their own location, so       │
//! │  per-location histories each tell the full story.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::info;

use crate::error::{ServiceError, ServiceResult};
use crate::stock::{commit, StockMutator};
use inventaris_core::validation::{validate_barcode, validate_quantity};
use inventaris_core::{CoreError, Item, Location, TransactionType, ValidationError};
use inventaris_db::Database;

/// One inter-location stock move.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub barcode: String,
    pub source_location_id: String,
    pub target_location_id: String,
    pub quantity: i64,
    #[serde(default)]
    pub note: Option<String>,
}

/// Moves stock between locations.
#[derive(Debug, Clone)]
pub struct MoveService {
    db: Database,
    stock: StockMutator,
}

impl MoveService {
    pub fn new(db: Database) -> Self {
        let stock = StockMutator::new(db.clone());
        MoveService { db, stock }
    }

    /// Moves `quantity` units of a barcode from one location to another.
    ///
    /// Decrement at the source, increment (or row creation) at the target,
    /// and one ledger entry per side, all in a single transaction.
    ///
    /// ## Returns
    /// The target-location row with its post-move quantity.
    pub async fn move_item(&self, req: &MoveRequest) -> ServiceResult<Item> {
        validate_barcode(&req.barcode)?;
        validate_quantity(req.quantity)?;
        let barcode = req.barcode.trim();

        if req.source_location_id == req.target_location_id {
            return Err(ValidationError::MustDiffer {
                field: "targetLocationId".to_string(),
                other: "sourceLocationId".to_string(),
            }
            .into());
        }

        let source = self.location(&req.source_location_id).await?;
        let target = self.location(&req.target_location_id).await?;

        let mut tx = self.stock.begin().await?;

        let source_item = self
            .db
            .items()
            .find_at_location(&mut *tx, barcode, &source.id)
            .await?
            .ok_or_else(|| CoreError::ItemNotFoundAtLocation {
                barcode: barcode.to_string(),
                location_id: source.id.clone(),
            })?;

        let out_note = match &req.note {
            Some(note) => format!("Moved to {}: {}", target.name, note),
            None => format!("Moved to {}", target.name),
        };
        self.stock
            .apply_to(
                &mut tx,
                &source_item,
                -req.quantity,
                TransactionType::Out,
                Some(&out_note),
            )
            .await?;

        let in_note = format!("Moved from {}", source.name);
        let target_item = match self
            .db
            .items()
            .find_at_location(&mut *tx, barcode, &target.id)
            .await?
        {
            Some(item) => {
                self.stock
                    .apply_to(&mut tx, &item, req.quantity, TransactionType::In, Some(&in_note))
                    .await?;
                Item {
                    quantity: item.quantity + req.quantity,
                    ..item
                }
            }
            None => {
                let copy = source_item.copy_to_location(&target.id, req.quantity);
                self.db.items().insert(&mut *tx, &copy).await?;
                self.db
                    .ledger()
                    .record(
                        &mut *tx,
                        TransactionType::In,
                        req.quantity,
                        Some(&in_note),
                        &copy.id,
                    )
                    .await?;
                copy
            }
        };

        commit(tx).await?;

        info!(
            barcode,
            from = %source.name,
            to = %target.name,
            quantity = req.quantity,
            "Item moved"
        );

        Ok(target_item)
    }

    async fn location(&self, id: &str) -> ServiceResult<Location> {
        self.db
            .locations()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Location", id))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_db;

    fn request(barcode: &str, from: &str, to: &str, quantity: i64) -> MoveRequest {
        MoveRequest {
            barcode: barcode.to_string(),
            source_location_id: from.to_string(),
            target_location_id: to.to_string(),
            quantity,
            note: None,
        }
    }

    #[tokio::test]
    async fn test_move_into_existing_target_row() {
        let fixture = test_db().await;
        let source = fixture.seed_item("899001", &fixture.warehouse.id, 10).await;
        let target = fixture.seed_item("899001", &fixture.lab.id, 2).await;
        let service = MoveService::new(fixture.db.clone());

        let moved = service
            .move_item(&request("899001", &fixture.warehouse.id, &fixture.lab.id, 4))
            .await
            .unwrap();

        assert_eq!(moved.id, target.id);
        assert_eq!(moved.quantity, 6);
        assert_eq!(fixture.quantity(&source.id).await, 6);
        assert_eq!(fixture.quantity(&target.id).await, 6);

        let out = fixture.db.ledger().for_item(&source.id).await.unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].tx_type, TransactionType::Out);
        assert_eq!(out[0].note.as_deref(), Some("Moved to Lab Komputer 1"));

        let inn = fixture.db.ledger().for_item(&target.id).await.unwrap();
        assert_eq!(inn.len(), 1);
        assert_eq!(inn[0].tx_type, TransactionType::In);
        assert_eq!(inn[0].note.as_deref(), Some("Moved from Gudang"));
    }

    #[tokio::test]
    async fn test_move_creates_target_row() {
        let fixture = test_db().await;
        let source = fixture.seed_item("899002", &fixture.warehouse.id, 5).await;
        let service = MoveService::new(fixture.db.clone());

        let moved = service
            .move_item(&request("899002", &fixture.warehouse.id, &fixture.library.id, 2))
            .await
            .unwrap();

        assert_ne!(moved.id, source.id);
        assert_eq!(moved.location_id, fixture.library.id);
        assert_eq!(moved.quantity, 2);
        assert_eq!(moved.barcode, source.barcode);
        assert_eq!(fixture.quantity(&source.id).await, 3);
        assert_eq!(fixture.ledger_count(&moved.id).await, 1);
    }

    #[tokio::test]
    async fn test_move_same_location_rejected() {
        let fixture = test_db().await;
        fixture.seed_item("899003", &fixture.lab.id, 5).await;
        let service = MoveService::new(fixture.db.clone());

        let err = service
            .move_item(&request("899003", &fixture.lab.id, &fixture.lab.id, 1))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "VALIDATION");
    }

    #[tokio::test]
    async fn test_move_beyond_source_stock_changes_nothing() {
        let fixture = test_db().await;
        let source = fixture.seed_item("899004", &fixture.warehouse.id, 2).await;
        let service = MoveService::new(fixture.db.clone());

        let err = service
            .move_item(&request("899004", &fixture.warehouse.id, &fixture.lab.id, 3))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "INSUFFICIENT_STOCK");
        assert_eq!(fixture.quantity(&source.id).await, 2);
        assert_eq!(fixture.ledger_count(&source.id).await, 0);
    }

    #[tokio::test]
    async fn test_move_missing_source_row_rejected() {
        let fixture = test_db().await;
        let service = MoveService::new(fixture.db.clone());

        let err = service
            .move_item(&request("899005", &fixture.warehouse.id, &fixture.lab.id, 1))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_move_unknown_location_rejected() {
        let fixture = test_db().await;
        fixture.seed_item("899006", &fixture.warehouse.id, 5).await;
        let service = MoveService::new(fixture.db.clone());

        let err = service
            .move_item(&request("899006", &fixture.warehouse.id, "no-such-location", 1))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "NOT_FOUND");
    }
}
