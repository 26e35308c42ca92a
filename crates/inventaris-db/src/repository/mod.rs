//! # Repository Module
//!
//! Database repository implementations for the inventory schema.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Service call                                                          │
//! │       │                                                                 │
//! │       │  db.items().find_at_location(db.pool(), barcode, loc)          │
//! │       ▼                                                                 │
//! │  ItemRepository                                                        │
//! │  ├── find_at_location(exec, barcode, location_id)                      │
//! │  ├── adjust_quantity(exec, id, delta)                                  │
//! │  └── list() / low_stock(limit) / ...                                   │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Executor-Generic Write Steps
//! Methods that participate in the services' atomic units take an
//! `impl Executor<'_, Database = Sqlite>` so the same SQL runs against the
//! pool (standalone call) or against an open transaction (composite unit
//! such as a move or a borrow cart). Plain list/report reads go through the
//! repository's own pool.
//!
//! ## Available Repositories
//!
//! - [`item::ItemRepository`] - Item catalog rows and stock adjustments
//! - [`location::LocationRepository`] - Physical locations
//! - [`category::CategoryRepository`] - Reference categories
//! - [`ledger::LedgerRepository`] - Append-only stock movement ledger
//! - [`borrowing::BorrowingRepository`] - Loan records

pub mod borrowing;
pub mod category;
pub mod item;
pub mod ledger;
pub mod location;
