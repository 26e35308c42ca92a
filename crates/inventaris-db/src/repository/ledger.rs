//! # Ledger Repository
//!
//! Database operations for the append-only stock movement ledger.
//!
//! ## Append-Only Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Ledger Contract                                   │
//! │                                                                         │
//! │  Every Item.quantity change ──► exactly one ledger INSERT              │
//! │  in the SAME database transaction.                                     │
//! │                                                                         │
//! │  Rows are never updated, never deleted. History queries (reports,      │
//! │  recent activity, per-item audit) are plain SELECTs over this table.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use inventaris_core::{LedgerView, StockTransaction, TransactionType};

/// Shared SELECT for ledger rows joined with their item.
const LEDGER_VIEW_SELECT: &str = "SELECT t.id, t.tx_type, t.quantity, t.note, t.date, t.item_id, \
     i.name AS item_name, i.barcode, l.name AS location_name, c.name AS category_name \
     FROM transactions t \
     INNER JOIN items i ON i.id = t.item_id \
     INNER JOIN locations l ON l.id = i.location_id \
     INNER JOIN categories c ON c.id = i.category_id";

/// Repository for ledger database operations.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LedgerRepository { pool }
    }

    /// Appends one movement event to the ledger.
    ///
    /// Executor-generic: the services call this inside the same transaction
    /// as the quantity change the entry documents.
    pub async fn record<'e, E>(
        &self,
        exec: E,
        tx_type: TransactionType,
        quantity: i64,
        note: Option<&str>,
        item_id: &str,
    ) -> DbResult<StockTransaction>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        debug!(item_id = %item_id, %tx_type, quantity = %quantity, "Recording ledger entry");

        let entry = StockTransaction {
            id: Uuid::new_v4().to_string(),
            tx_type,
            quantity,
            note: note.map(str::to_string),
            item_id: item_id.to_string(),
            date: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO transactions (id, tx_type, quantity, note, item_id, date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&entry.id)
        .bind(entry.tx_type)
        .bind(entry.quantity)
        .bind(&entry.note)
        .bind(&entry.item_id)
        .bind(entry.date)
        .execute(exec)
        .await?;

        Ok(entry)
    }

    /// Full movement history for one item row, oldest first.
    pub async fn for_item(&self, item_id: &str) -> DbResult<Vec<StockTransaction>> {
        let entries = sqlx::query_as::<_, StockTransaction>(
            "SELECT id, tx_type, quantity, note, item_id, date \
             FROM transactions WHERE item_id = ?1 ORDER BY date, id",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// The most recent movement events, for the dashboard activity feed.
    pub async fn recent(&self, limit: u32) -> DbResult<Vec<LedgerView>> {
        let entries = sqlx::query_as::<_, LedgerView>(&format!(
            "{LEDGER_VIEW_SELECT} ORDER BY t.date DESC LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Ledger report rows, newest first.
    ///
    /// All filters are optional: date range bounds and a direction filter.
    /// `NULL` binds make the corresponding predicate a no-op, which keeps
    /// this a single prepared statement for every filter combination.
    pub async fn report(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        tx_type: Option<TransactionType>,
    ) -> DbResult<Vec<LedgerView>> {
        let entries = sqlx::query_as::<_, LedgerView>(&format!(
            "{LEDGER_VIEW_SELECT} \
             WHERE (?1 IS NULL OR t.date >= ?1) \
               AND (?2 IS NULL OR t.date <= ?2) \
               AND (?3 IS NULL OR t.tx_type = ?3) \
             ORDER BY t.date DESC"
        ))
        .bind(start)
        .bind(end)
        .bind(tx_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Counts movement events on or after the given instant.
    ///
    /// Used for the "today's transactions" dashboard counter.
    pub async fn count_since(&self, since: DateTime<Utc>) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE date >= ?1")
            .bind(since)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
