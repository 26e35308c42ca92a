//! # Borrowing Repository
//!
//! Database operations for loan records.
//!
//! ## Loan Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Borrowing Lifecycle                                │
//! │                                                                         │
//! │  1. BORROW                                                             │
//! │     └── insert() → Borrowing { status: ACTIVE }                        │
//! │         (ledger OUT + stock decrement in the same transaction)         │
//! │                                                                         │
//! │  2. RETURN (terminal)                                                  │
//! │     └── mark_returned() → status RETURNED, return_date, condition      │
//! │         (ledger IN + stock increment in the same transaction)          │
//! │                                                                         │
//! │  A borrowing is never deleted and never reopened.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use inventaris_core::{Borrowing, ItemCondition, LoanView};

const BORROWING_COLUMNS: &str = "id, student_name, student_id, item_id, borrow_date, due_date, \
     status, return_date, condition";

/// Shared SELECT for borrowings joined with their item.
const LOAN_VIEW_SELECT: &str = "SELECT b.id, b.student_name, b.student_id, b.item_id, \
     b.borrow_date, b.due_date, b.status, b.return_date, b.condition, \
     i.name AS item_name, i.barcode, l.name AS location_name \
     FROM borrowings b \
     INNER JOIN items i ON i.id = b.item_id \
     INNER JOIN locations l ON l.id = i.location_id";

/// Repository for borrowing database operations.
#[derive(Debug, Clone)]
pub struct BorrowingRepository {
    pool: SqlitePool,
}

impl BorrowingRepository {
    /// Creates a new BorrowingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BorrowingRepository { pool }
    }

    /// Inserts a new loan record.
    ///
    /// Executor-generic: the borrow service inserts the record in the same
    /// transaction as the ledger OUT and the stock decrement.
    pub async fn insert<'e, E>(&self, exec: E, borrowing: &Borrowing) -> DbResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        debug!(
            id = %borrowing.id,
            student = %borrowing.student_name,
            item_id = %borrowing.item_id,
            "Inserting borrowing"
        );

        sqlx::query(
            r#"
            INSERT INTO borrowings (
                id, student_name, student_id, item_id,
                borrow_date, due_date, status, return_date, condition
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&borrowing.id)
        .bind(&borrowing.student_name)
        .bind(&borrowing.student_id)
        .bind(&borrowing.item_id)
        .bind(borrowing.borrow_date)
        .bind(borrowing.due_date)
        .bind(borrowing.status)
        .bind(borrowing.return_date)
        .bind(borrowing.condition)
        .execute(exec)
        .await?;

        Ok(())
    }

    /// Gets a borrowing by ID.
    pub async fn get_by_id<'e, E>(&self, exec: E, id: &str) -> DbResult<Option<Borrowing>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let borrowing = sqlx::query_as::<_, Borrowing>(&format!(
            "SELECT {BORROWING_COLUMNS} FROM borrowings WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(exec)
        .await?;

        Ok(borrowing)
    }

    /// Flips an ACTIVE borrowing into the terminal RETURNED state.
    ///
    /// ## Returns
    /// * `Ok(true)` - the loan was ACTIVE and is now RETURNED
    /// * `Ok(false)` - no ACTIVE row with this ID (missing, or already
    ///   returned); nothing written
    pub async fn mark_returned<'e, E>(
        &self,
        exec: E,
        id: &str,
        condition: ItemCondition,
        return_date: DateTime<Utc>,
    ) -> DbResult<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        debug!(id = %id, ?condition, "Marking borrowing returned");

        let result = sqlx::query(
            r#"
            UPDATE borrowings
            SET status = 'RETURNED', return_date = ?2, condition = ?3
            WHERE id = ?1 AND status = 'ACTIVE'
            "#,
        )
        .bind(id)
        .bind(return_date)
        .bind(condition)
        .execute(exec)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Finds the first ACTIVE loan whose item carries this barcode.
    ///
    /// If several rows across locations share the barcode and more than one
    /// is out, the oldest loan wins. First-match semantics; scan flows
    /// usually have exactly one candidate.
    pub async fn find_active_by_barcode(&self, barcode: &str) -> DbResult<Option<LoanView>> {
        let loan = sqlx::query_as::<_, LoanView>(&format!(
            "{LOAN_VIEW_SELECT} WHERE i.barcode = ?1 AND b.status = 'ACTIVE' \
             ORDER BY b.borrow_date, b.id LIMIT 1"
        ))
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(loan)
    }

    /// All ACTIVE loans ordered by due date ascending (most urgent first).
    pub async fn active_loans(&self) -> DbResult<Vec<LoanView>> {
        let loans = sqlx::query_as::<_, LoanView>(&format!(
            "{LOAN_VIEW_SELECT} WHERE b.status = 'ACTIVE' ORDER BY b.due_date"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    /// Counts ACTIVE loans.
    pub async fn count_active(&self) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM borrowings WHERE status = 'ACTIVE'")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Borrowing report rows, newest borrow first.
    ///
    /// The optional range filters on the borrow date.
    pub async fn report(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> DbResult<Vec<LoanView>> {
        let loans = sqlx::query_as::<_, LoanView>(&format!(
            "{LOAN_VIEW_SELECT} \
             WHERE (?1 IS NULL OR b.borrow_date >= ?1) \
               AND (?2 IS NULL OR b.borrow_date <= ?2) \
             ORDER BY b.borrow_date DESC"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }
}
