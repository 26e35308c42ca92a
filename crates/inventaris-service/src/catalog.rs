//! # Catalog Service
//!
//! Item catalog queries and CRUD, plus barcode identity resolution.
//!
//! ## Barcode Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              item_by_barcode(barcode, location?)                        │
//! │                                                                         │
//! │  location given ──► the row at that location, or None                  │
//! │                                                                         │
//! │  no location:                                                           │
//! │    1. the warehouse ("Gudang") row, if one exists                      │
//! │    2. else any row carrying the barcode (oldest first)                 │
//! │    3. else None                                                         │
//! │                                                                         │
//! │  The warehouse row is the authoritative answer for a bare scan.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use inventaris_core::validation::{
    validate_barcode, validate_name, validate_non_negative,
};
use inventaris_core::{Category, Item, ItemView, Location, WAREHOUSE_LOCATION_NAME};
use inventaris_db::Database;

/// Fields for a new catalog entry.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: String,
    pub barcode: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub min_stock: i64,
    #[serde(default)]
    pub specification: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category_id: String,
    pub location_id: String,
}

/// Catalog fields that can change after creation.
///
/// Quantity is deliberately absent: stock only moves through the warehouse,
/// move, and borrow services, which pair every change with a ledger entry.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub name: String,
    pub barcode: String,
    pub min_stock: i64,
    #[serde(default)]
    pub specification: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category_id: String,
    pub location_id: String,
}

/// Catalog queries and CRUD.
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: Database,
}

impl CatalogService {
    pub fn new(db: Database) -> Self {
        CatalogService { db }
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Resolves a scanned barcode to an item row.
    ///
    /// With a location the answer is that location's row. Without one the
    /// warehouse row wins; only when the warehouse has no row does the
    /// oldest row anywhere stand in.
    pub async fn item_by_barcode(
        &self,
        barcode: &str,
        location_id: Option<&str>,
    ) -> ServiceResult<Option<Item>> {
        validate_barcode(barcode)?;
        let barcode = barcode.trim();
        let pool = self.db.pool();

        if let Some(location_id) = location_id {
            let item = self
                .db
                .items()
                .find_at_location(pool, barcode, location_id)
                .await?;
            return Ok(item);
        }

        if let Some(warehouse) = self
            .db
            .locations()
            .get_by_name(WAREHOUSE_LOCATION_NAME)
            .await?
        {
            if let Some(item) = self
                .db
                .items()
                .find_at_location(pool, barcode, &warehouse.id)
                .await?
            {
                return Ok(Some(item));
            }
        }

        let item = self.db.items().find_any(pool, barcode).await?;
        Ok(item)
    }

    /// All catalog entries with category/location names, newest change first.
    pub async fn items(&self) -> ServiceResult<Vec<ItemView>> {
        let items = self.db.items().list().await?;
        Ok(items)
    }

    /// All categories, ordered by name.
    pub async fn categories(&self) -> ServiceResult<Vec<Category>> {
        let categories = self.db.categories().list().await?;
        Ok(categories)
    }

    /// All locations, ordered by name.
    pub async fn locations(&self) -> ServiceResult<Vec<Location>> {
        let locations = self.db.locations().list().await?;
        Ok(locations)
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Creates a catalog entry.
    ///
    /// The initial quantity is catalog data, not a movement, so no ledger
    /// entry is written; the first IN/OUT starts the item's history.
    pub async fn create_item(&self, req: &CreateItemRequest) -> ServiceResult<Item> {
        validate_name("name", &req.name)?;
        validate_barcode(&req.barcode)?;
        validate_non_negative("quantity", req.quantity)?;
        validate_non_negative("minStock", req.min_stock)?;

        let now = Utc::now();
        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: req.name.trim().to_string(),
            barcode: req.barcode.trim().to_string(),
            quantity: req.quantity,
            min_stock: req.min_stock,
            specification: req.specification.clone(),
            description: req.description.clone(),
            image_url: req.image_url.clone(),
            category_id: req.category_id.clone(),
            location_id: req.location_id.clone(),
            created_at: now,
            updated_at: now,
        };

        self.db.items().insert(self.db.pool(), &item).await?;

        info!(barcode = %item.barcode, name = %item.name, "Item created");

        Ok(item)
    }

    /// Updates an item's catalog fields.
    pub async fn update_item(&self, id: &str, req: &UpdateItemRequest) -> ServiceResult<Item> {
        validate_name("name", &req.name)?;
        validate_barcode(&req.barcode)?;
        validate_non_negative("minStock", req.min_stock)?;

        let existing = self
            .db
            .items()
            .get_by_id(self.db.pool(), id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Item", id))?;

        let item = Item {
            name: req.name.trim().to_string(),
            barcode: req.barcode.trim().to_string(),
            min_stock: req.min_stock,
            specification: req.specification.clone(),
            description: req.description.clone(),
            image_url: req.image_url.clone(),
            category_id: req.category_id.clone(),
            location_id: req.location_id.clone(),
            updated_at: Utc::now(),
            ..existing
        };

        self.db.items().update(&item).await?;

        info!(id, "Item updated");

        Ok(item)
    }

    /// Deletes a catalog entry.
    ///
    /// Rows with ledger or loan history are protected by foreign keys and
    /// fail with a foreign key violation.
    pub async fn delete_item(&self, id: &str) -> ServiceResult<()> {
        self.db.items().delete(id).await?;

        info!(id, "Item deleted");

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_db;
    use inventaris_core::TransactionType;

    #[tokio::test]
    async fn test_barcode_resolution_prefers_warehouse_row() {
        let fixture = test_db().await;
        let lab_row = fixture.seed_item("899201", &fixture.lab.id, 2).await;
        let warehouse_row = fixture.seed_item("899201", &fixture.warehouse.id, 9).await;
        let service = CatalogService::new(fixture.db.clone());

        // Bare scan: the warehouse row wins even though the lab row is older.
        let hit = service.item_by_barcode("899201", None).await.unwrap().unwrap();
        assert_eq!(hit.id, warehouse_row.id);

        // Scoped scan: the requested location's row.
        let hit = service
            .item_by_barcode("899201", Some(&fixture.lab.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hit.id, lab_row.id);
    }

    #[tokio::test]
    async fn test_barcode_resolution_falls_back_to_any_row() {
        let fixture = test_db().await;
        let lab_row = fixture.seed_item("899202", &fixture.lab.id, 2).await;
        let service = CatalogService::new(fixture.db.clone());

        let hit = service.item_by_barcode("899202", None).await.unwrap().unwrap();
        assert_eq!(hit.id, lab_row.id);

        assert!(service.item_by_barcode("899999", None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_item_writes_no_ledger_entry() {
        let fixture = test_db().await;
        let service = CatalogService::new(fixture.db.clone());

        let item = service
            .create_item(&CreateItemRequest {
                name: "Proyektor Epson".to_string(),
                barcode: "899203".to_string(),
                quantity: 4,
                min_stock: 1,
                specification: Some("EB-X500".to_string()),
                description: None,
                image_url: None,
                category_id: fixture.category_id.clone(),
                location_id: fixture.warehouse.id.clone(),
            })
            .await
            .unwrap();

        assert_eq!(item.quantity, 4);
        assert_eq!(fixture.ledger_count(&item.id).await, 0);
        assert_eq!(service.items().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_barcode_at_location_rejected() {
        let fixture = test_db().await;
        fixture.seed_item("899204", &fixture.warehouse.id, 1).await;
        let service = CatalogService::new(fixture.db.clone());

        let err = service
            .create_item(&CreateItemRequest {
                name: "Duplicate".to_string(),
                barcode: "899204".to_string(),
                quantity: 0,
                min_stock: 0,
                specification: None,
                description: None,
                image_url: None,
                category_id: fixture.category_id.clone(),
                location_id: fixture.warehouse.id.clone(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), "OPERATION_FAILED");
    }

    #[tokio::test]
    async fn test_update_item_leaves_quantity_alone() {
        let fixture = test_db().await;
        let item = fixture.seed_item("899205", &fixture.warehouse.id, 7).await;
        let service = CatalogService::new(fixture.db.clone());

        let updated = service
            .update_item(
                &item.id,
                &UpdateItemRequest {
                    name: "Renamed".to_string(),
                    barcode: item.barcode.clone(),
                    min_stock: 3,
                    specification: None,
                    description: Some("Moved shelf".to_string()),
                    image_url: None,
                    category_id: item.category_id.clone(),
                    location_id: item.location_id.clone(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.min_stock, 3);
        assert_eq!(updated.quantity, 7);
        assert_eq!(fixture.quantity(&item.id).await, 7);
    }

    #[tokio::test]
    async fn test_delete_item_with_history_rejected() {
        let fixture = test_db().await;
        let item = fixture.seed_item("899206", &fixture.warehouse.id, 3).await;
        fixture
            .db
            .ledger()
            .record(fixture.db.pool(), TransactionType::In, 3, None, &item.id)
            .await
            .unwrap();
        let service = CatalogService::new(fixture.db.clone());

        let err = service.delete_item(&item.id).await.unwrap_err();
        assert_eq!(err.code(), "OPERATION_FAILED");

        // Without history the row goes away.
        let fresh = fixture.seed_item("899207", &fixture.warehouse.id, 1).await;
        service.delete_item(&fresh.id).await.unwrap();
        assert!(service.item_by_barcode("899207", None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reference_data_listings() {
        let fixture = test_db().await;
        let service = CatalogService::new(fixture.db.clone());

        let locations = service.locations().await.unwrap();
        assert_eq!(locations.len(), 3);
        // Ordered by name.
        assert_eq!(locations[0].name, "Gudang");

        let categories = service.categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Elektronik");
    }
}
