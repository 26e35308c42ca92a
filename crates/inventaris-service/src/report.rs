//! # Report Service
//!
//! Read-only aggregates: dashboard counters, activity feed, and the three
//! report views (stock, ledger, borrowings).
//!
//! Everything here is a plain SELECT against committed state; no report
//! query ever joins a service transaction.

use chrono::{DateTime, NaiveTime, Utc};

use crate::error::ServiceResult;
use inventaris_core::{DashboardStats, ItemView, LedgerView, LoanView, TransactionType};
use inventaris_db::Database;

/// Default row cap for dashboard lists.
const DASHBOARD_LIST_LIMIT: u32 = 5;

/// Read-only report and dashboard queries.
#[derive(Debug, Clone)]
pub struct ReportService {
    db: Database,
}

impl ReportService {
    pub fn new(db: Database) -> Self {
        ReportService { db }
    }

    /// The four dashboard counters.
    ///
    /// "Today" is the current UTC calendar day; the counter resets at
    /// midnight UTC, matching the timestamps the ledger stores.
    pub async fn dashboard_stats(&self) -> ServiceResult<DashboardStats> {
        let midnight = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();

        let total_items = self.db.items().count().await?;
        let low_stock_items = self.db.items().count_low_stock().await?;
        let active_loans = self.db.borrowings().count_active().await?;
        let today_transactions = self.db.ledger().count_since(midnight).await?;

        Ok(DashboardStats {
            total_items,
            low_stock_items,
            active_loans,
            today_transactions,
        })
    }

    /// The most recent ledger entries, newest first.
    pub async fn recent_activity(&self, limit: Option<u32>) -> ServiceResult<Vec<LedgerView>> {
        let entries = self
            .db
            .ledger()
            .recent(limit.unwrap_or(DASHBOARD_LIST_LIMIT))
            .await?;
        Ok(entries)
    }

    /// Items at or below their minimum stock threshold, emptiest first.
    pub async fn low_stock(&self, limit: Option<u32>) -> ServiceResult<Vec<ItemView>> {
        let items = self
            .db
            .items()
            .low_stock(limit.unwrap_or(DASHBOARD_LIST_LIMIT))
            .await?;
        Ok(items)
    }

    /// Full catalog snapshot ordered by location, category, name.
    pub async fn stock_report(&self) -> ServiceResult<Vec<ItemView>> {
        let items = self.db.items().stock_report().await?;
        Ok(items)
    }

    /// Movement history, newest first, with optional date range and
    /// direction filter. The direction filter carves the incoming and
    /// outgoing report variants out of the same query.
    pub async fn ledger_report(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        tx_type: Option<TransactionType>,
    ) -> ServiceResult<Vec<LedgerView>> {
        let entries = self.db.ledger().report(start, end, tx_type).await?;
        Ok(entries)
    }

    /// Loan history, newest borrow first, with an optional borrow-date
    /// range.
    pub async fn borrowing_report(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> ServiceResult<Vec<LoanView>> {
        let loans = self.db.borrowings().report(start, end).await?;
        Ok(loans)
    }

    /// Full movement history for one item row, oldest first.
    pub async fn item_history(
        &self,
        item_id: &str,
    ) -> ServiceResult<Vec<inventaris_core::StockTransaction>> {
        let entries = self.db.ledger().for_item(item_id).await?;
        Ok(entries)
    }
}

// =============================================================================
// Tests
// =============================================================================
