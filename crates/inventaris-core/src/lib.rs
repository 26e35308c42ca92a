//! # inventaris-core: Pure Domain Logic for the School Inventory System
//!
//! This crate is the **heart** of the inventory system. It contains the
//! domain model and validation rules as pure code with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Inventaris Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            External collaborators (out of scope)                │   │
//! │  │    Web UI ── scan handler ── label printing ── auth             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  inventaris-service                             │   │
//! │  │    warehouse / move / borrow / catalog / report services        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ inventaris-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   views   │  │   error   │  │validation │   │   │
//! │  │   │   Item    │  │ LoanView  │  │ CoreError │  │  rules    │   │   │
//! │  │   │ Borrowing │  │LedgerView │  │           │  │  checks   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                inventaris-db (Database Layer)                   │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, StockTransaction, Borrowing, ...)
//! - [`views`] - Join-shaped read models for lists and reports
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function here is deterministic
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Barcode Identity**: the barcode names a logical item type; an `Item`
//!    row is one location-scoped stock count of that type
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;
pub mod views;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use inventaris_core::Item` instead of
// `use inventaris_core::types::Item`

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;
pub use views::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Reserved name of the canonical warehouse location.
///
/// ## Why a constant?
/// The warehouse row for a barcode is the single source of truth for stock
/// that hasn't been placed in a room. Every deployment seeds exactly one
/// location with this name; warehouse transactions resolve it by name at
/// call time rather than caching its ID.
pub const WAREHOUSE_LOCATION_NAME: &str = "Gudang";

/// Maximum items allowed in a single borrow cart.
///
/// ## Business Reason
/// Keeps one loan transaction reviewable and bounds the size of the atomic
/// unit the borrow service commits.
pub const MAX_BORROW_ITEMS: usize = 50;

/// Maximum barcode length accepted from scanners or manual entry.
pub const MAX_BARCODE_LEN: usize = 64;

/// Maximum length for display names (items, locations, students).
pub const MAX_NAME_LEN: usize = 200;
