//! # Item Repository
//!
//! Database operations for item rows.
//!
//! ## Key Operations
//! - Barcode lookups, per location and "anywhere" (first found)
//! - Guarded stock adjustment (the quantity >= 0 invariant)
//! - Catalog CRUD and low-stock queries
//!
//! ## Guarded Adjustment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Update Strategy                                │
//! │                                                                         │
//! │  ❌ Absolute update (lost-update race between check and commit)        │
//! │     UPDATE items SET quantity = 7 WHERE id = ?                         │
//! │                                                                         │
//! │  ✅ Guarded delta update                                               │
//! │     UPDATE items SET quantity = quantity + ?delta                      │
//! │     WHERE id = ? AND quantity + ?delta >= 0                            │
//! │                                                                         │
//! │  Two concurrent OUTs that both passed a stale read cannot both         │
//! │  commit: the second one affects zero rows and the caller rolls back.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use inventaris_core::{Item, ItemView};

/// Shared column list for item SELECTs.
const ITEM_COLUMNS: &str = "id, name, barcode, quantity, min_stock, specification, \
     description, image_url, category_id, location_id, created_at, updated_at";

/// Shared SELECT for the joined item view (catalog listing, reports).
const ITEM_VIEW_SELECT: &str = "SELECT i.id, i.name, i.barcode, i.quantity, i.min_stock, \
     i.specification, i.description, i.image_url, i.category_id, i.location_id, \
     c.name AS category_name, l.name AS location_name, i.created_at, i.updated_at \
     FROM items i \
     INNER JOIN categories c ON c.id = i.category_id \
     INNER JOIN locations l ON l.id = i.location_id";

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    // =========================================================================
    // Lookups (executor-generic: usable inside service transactions)
    // =========================================================================

    /// Gets an item row by its ID.
    pub async fn get_by_id<'e, E>(&self, exec: E, id: &str) -> DbResult<Option<Item>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(exec)
        .await?;

        Ok(item)
    }

    /// Finds the stock row for (barcode, location), if any.
    ///
    /// At most one row exists per pair (UNIQUE index).
    pub async fn find_at_location<'e, E>(
        &self,
        exec: E,
        barcode: &str,
        location_id: &str,
    ) -> DbResult<Option<Item>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE barcode = ?1 AND location_id = ?2"
        ))
        .bind(barcode)
        .bind(location_id)
        .fetch_optional(exec)
        .await?;

        Ok(item)
    }

    /// Finds any stock row carrying this barcode, at whatever location.
    ///
    /// "First found" is made deterministic by ordering on creation time:
    /// the oldest row for a barcode is its original catalog entry and the
    /// best template for attribute copies.
    pub async fn find_any<'e, E>(&self, exec: E, barcode: &str) -> DbResult<Option<Item>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE barcode = ?1 ORDER BY created_at, id LIMIT 1"
        ))
        .bind(barcode)
        .fetch_optional(exec)
        .await?;

        Ok(item)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a new item row.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` if a row for (barcode, location) exists.
    pub async fn insert<'e, E>(&self, exec: E, item: &Item) -> DbResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        debug!(barcode = %item.barcode, location_id = %item.location_id, "Inserting item row");

        sqlx::query(
            r#"
            INSERT INTO items (
                id, name, barcode, quantity, min_stock,
                specification, description, image_url,
                category_id, location_id, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.barcode)
        .bind(item.quantity)
        .bind(item.min_stock)
        .bind(&item.specification)
        .bind(&item.description)
        .bind(&item.image_url)
        .bind(&item.category_id)
        .bind(&item.location_id)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(exec)
        .await?;

        Ok(())
    }

    /// Applies a signed quantity delta, guarded so the result can never go
    /// negative.
    ///
    /// ## Returns
    /// * `Ok(true)` - row updated
    /// * `Ok(false)` - guard failed: the row is missing or the delta would
    ///   drive quantity below zero. The caller decides which it is (it has
    ///   usually just loaded the row in the same transaction).
    pub async fn adjust_quantity<'e, E>(&self, exec: E, id: &str, delta: i64) -> DbResult<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        debug!(id = %id, delta = %delta, "Adjusting item quantity");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE items
            SET quantity = quantity + ?1, updated_at = ?2
            WHERE id = ?3 AND quantity + ?1 >= 0
            "#,
        )
        .bind(delta)
        .bind(now)
        .bind(id)
        .execute(exec)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Updates an item's catalog fields (not its quantity).
    ///
    /// Quantity changes go through [`Self::adjust_quantity`] so they stay
    /// paired with a ledger entry.
    pub async fn update(&self, item: &Item) -> DbResult<()> {
        debug!(id = %item.id, "Updating item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = ?2,
                barcode = ?3,
                min_stock = ?4,
                specification = ?5,
                description = ?6,
                image_url = ?7,
                category_id = ?8,
                location_id = ?9,
                updated_at = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.barcode)
        .bind(item.min_stock)
        .bind(&item.specification)
        .bind(&item.description)
        .bind(&item.image_url)
        .bind(&item.category_id)
        .bind(&item.location_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", &item.id));
        }

        Ok(())
    }

    /// Deletes an item row.
    ///
    /// Fails with a foreign key violation while ledger or borrowing rows
    /// still reference it; migrating history is a maintenance-script task.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting item");

        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    // =========================================================================
    // Listings & Counters
    // =========================================================================

    /// Lists all items with category/location names, newest change first.
    pub async fn list(&self) -> DbResult<Vec<ItemView>> {
        let items = sqlx::query_as::<_, ItemView>(&format!(
            "{ITEM_VIEW_SELECT} ORDER BY i.updated_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists items ordered for the stock report: location, category, name.
    pub async fn stock_report(&self) -> DbResult<Vec<ItemView>> {
        let items = sqlx::query_as::<_, ItemView>(&format!(
            "{ITEM_VIEW_SELECT} ORDER BY l.name, c.name, i.name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists items at or below their minimum stock threshold.
    pub async fn low_stock(&self, limit: u32) -> DbResult<Vec<ItemView>> {
        let items = sqlx::query_as::<_, ItemView>(&format!(
            "{ITEM_VIEW_SELECT} WHERE i.quantity <= i.min_stock ORDER BY i.quantity LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Counts all item rows.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts items at or below their minimum stock threshold.
    pub async fn count_low_stock(&self) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE quantity <= min_stock")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
