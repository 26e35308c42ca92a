//! # Read Models
//!
//! Flat, join-shaped views returned by list/report queries.
//!
//! The entity types in [`crate::types`] mirror single tables; the views here
//! carry the display names the UI layer needs (item name on a ledger row,
//! location name on a loan) so callers never chase foreign keys themselves.
//! Each maps to one aliased SELECT in the db layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{BorrowStatus, ItemCondition, TransactionType};

/// An item row joined with its category and location names.
///
/// Used by the stock report and the catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: String,
    pub name: String,
    pub barcode: String,
    pub quantity: i64,
    pub min_stock: i64,
    pub specification: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: String,
    pub location_id: String,
    pub category_name: String,
    pub location_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A ledger entry joined with its item, for activity feeds and reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct LedgerView {
    pub id: String,
    pub tx_type: TransactionType,
    pub quantity: i64,
    pub note: Option<String>,
    pub date: DateTime<Utc>,
    pub item_id: String,
    pub item_name: String,
    pub barcode: String,
    pub location_name: String,
    pub category_name: String,
}

/// A borrowing joined with its item, for loan lists and the borrowing report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct LoanView {
    pub id: String,
    pub student_name: String,
    pub student_id: Option<String>,
    pub item_id: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub status: BorrowStatus,
    pub return_date: Option<DateTime<Utc>>,
    pub condition: Option<ItemCondition>,
    pub item_name: String,
    pub barcode: String,
    pub location_name: String,
}

/// Aggregate counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_items: i64,
    pub low_stock_items: i64,
    pub active_loans: i64,
    pub today_transactions: i64,
}
