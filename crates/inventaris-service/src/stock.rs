//! # Stock Mutator
//!
//! Applies a signed quantity delta to one item row and writes the paired
//! ledger entry, as a single atomic unit.
//!
//! ## The One Real Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              quantity >= 0, quantity change ⟺ ledger row               │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    │                                                                    │
//! │    ├── precondition: current + delta >= 0   (else InsufficientStock)   │
//! │    │                                                                    │
//! │    ├── UPDATE items SET quantity = quantity + δ                        │
//! │    │   WHERE id = ? AND quantity + δ >= 0   ← guard re-checked in SQL  │
//! │    │                                                                    │
//! │    └── INSERT INTO transactions (tx_type, |δ|, note, item_id, date)    │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Any failure between BEGIN and COMMIT rolls back both writes.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The SQL guard closes the window between the precondition read and the
//! commit: two concurrent OUTs that both read enough stock cannot both
//! apply, the slower one affects zero rows and its transaction aborts.

use sqlx::{Sqlite, SqliteConnection, Transaction};
use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};
use inventaris_core::{CoreError, Item, StockTransaction, TransactionType};
use inventaris_db::{Database, DbError};

/// Applies quantity deltas with their paired ledger entries.
#[derive(Debug, Clone)]
pub struct StockMutator {
    db: Database,
}

impl StockMutator {
    /// Creates a new StockMutator.
    pub fn new(db: Database) -> Self {
        StockMutator { db }
    }

    /// Applies one delta as its own transaction.
    ///
    /// ## Arguments
    /// * `item_id` - target item row
    /// * `delta` - signed quantity change; must agree with `tx_type`
    /// * `tx_type` - ledger direction (IN adds, OUT subtracts)
    /// * `note` - optional free-text context for the ledger entry
    ///
    /// ## Returns
    /// The item with its post-commit quantity.
    pub async fn apply(
        &self,
        item_id: &str,
        delta: i64,
        tx_type: TransactionType,
        note: Option<&str>,
    ) -> ServiceResult<Item> {
        let mut tx = self.begin().await?;

        let item = self
            .db
            .items()
            .get_by_id(&mut *tx, item_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Item", item_id))?;

        self.apply_to(&mut tx, &item, delta, tx_type, note).await?;

        commit(tx).await?;

        info!(item_id = %item.id, barcode = %item.barcode, delta, "Stock adjusted");

        Ok(Item {
            quantity: item.quantity + delta,
            ..item
        })
    }

    /// Applies one delta inside an already open transaction.
    ///
    /// Used by the warehouse, move, and borrow services to compose larger
    /// atomic units. The caller commits; any error here must make the
    /// caller drop the transaction (rollback).
    ///
    /// `item` is the row as loaded in the same transaction; its quantity is
    /// the precondition input.
    pub(crate) async fn apply_to(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        item: &Item,
        delta: i64,
        tx_type: TransactionType,
        note: Option<&str>,
    ) -> ServiceResult<StockTransaction> {
        debug!(item_id = %item.id, delta, %tx_type, "Applying stock delta");

        if delta < 0 && item.quantity + delta < 0 {
            return Err(insufficient(item, delta));
        }

        let conn: &mut SqliteConnection = &mut *tx;

        let updated = self.db.items().adjust_quantity(&mut *conn, &item.id, delta).await?;
        if !updated {
            // The row existed moments ago in this transaction, so a failed
            // guard means a concurrent writer drained the stock first.
            return Err(insufficient(item, delta));
        }

        let entry = self
            .db
            .ledger()
            .record(&mut *conn, tx_type, delta.abs(), note, &item.id)
            .await?;

        Ok(entry)
    }

    /// Begins a service-level transaction.
    pub(crate) async fn begin(&self) -> ServiceResult<Transaction<'static, Sqlite>> {
        self.db
            .pool()
            .begin()
            .await
            .map_err(|e| ServiceError::from(DbError::TransactionFailed(e.to_string())))
    }
}

/// Commits a service-level transaction.
pub(crate) async fn commit(tx: Transaction<'static, Sqlite>) -> ServiceResult<()> {
    tx.commit()
        .await
        .map_err(|e| ServiceError::from(DbError::TransactionFailed(e.to_string())))
}

fn insufficient(item: &Item, delta: i64) -> ServiceError {
    ServiceError::Domain(CoreError::InsufficientStock {
        barcode: item.barcode.clone(),
        available: item.quantity,
        requested: -delta,
    })
}

// =============================================================================
// Tests
// =============================================================================
