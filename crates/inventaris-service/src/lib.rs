//! # Inventaris Service
//!
//! Transactional service layer for the school inventory system.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        inventaris-service                               │
//! │                                                                         │
//! │  WarehouseService   IN/OUT movements at the central warehouse          │
//! │  MoveService        inter-location relocation                          │
//! │  BorrowService      loans and returns                                  │
//! │  CatalogService     barcode resolution, catalog CRUD                   │
//! │  ReportService      dashboard counters and report queries             │
//! │                                                                         │
//! │  StockMutator (internal): every quantity change + its ledger entry    │
//! │  as one atomic unit. The write services compose it inside their own   │
//! │  transactions.                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use inventaris_db::{Database, DbConfig};
//! use inventaris_service::Services;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new(DbConfig::new("inventaris.db")).await?;
//! let services = Services::new(db);
//! let stats = services.reports.dashboard_stats().await?;
//! println!("{} items in catalog", stats.total_items);
//! # Ok(())
//! # }
//! ```

pub mod borrow;
pub mod catalog;
pub mod error;
pub mod movement;
pub mod report;
pub mod stock;
pub mod warehouse;

#[cfg(test)]
pub(crate) mod testutil;

pub use borrow::{BorrowRequest, BorrowService};
pub use catalog::{CatalogService, CreateItemRequest, UpdateItemRequest};
pub use error::{ServiceError, ServiceResult};
pub use movement::{MoveRequest, MoveService};
pub use report::ReportService;
pub use stock::StockMutator;
pub use warehouse::{WarehouseRequest, WarehouseService};

use inventaris_db::Database;

/// All services over one shared database handle.
#[derive(Debug, Clone)]
pub struct Services {
    pub warehouse: WarehouseService,
    pub moves: MoveService,
    pub borrowing: BorrowService,
    pub catalog: CatalogService,
    pub reports: ReportService,
}

impl Services {
    /// Wires every service to the same pool.
    pub fn new(db: Database) -> Self {
        Services {
            warehouse: WarehouseService::new(db.clone()),
            moves: MoveService::new(db.clone()),
            borrowing: BorrowService::new(db.clone()),
            catalog: CatalogService::new(db.clone()),
            reports: ReportService::new(db),
        }
    }
}
