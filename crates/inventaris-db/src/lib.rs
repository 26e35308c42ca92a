//! # inventaris-db: Database Layer for the School Inventory System
//!
//! This crate provides database access for the inventory system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Inventaris Data Flow                              │
//! │                                                                         │
//! │  Service call (process_transaction, move_item, ...)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  inventaris-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │  (item.rs,    │    │  (embedded)  │   │   │
//! │  │   │               │    │   ledger.rs,  │    │              │   │   │
//! │  │   │ SqlitePool    │◄───│   borrowing,  │    │ 001_init.sql │   │   │
//! │  │   │ Management    │    │   ...)        │    │ 002_idx.sql  │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (WAL mode, foreign keys on)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (item, ledger, borrowing, ...)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inventaris_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/inventaris.db")).await?;
//!
//! let items = db.items().list().await?;
//! let loans = db.borrowings().active_loans().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::borrowing::BorrowingRepository;
pub use repository::category::CategoryRepository;
pub use repository::item::ItemRepository;
pub use repository::ledger::LedgerRepository;
pub use repository::location::LocationRepository;
