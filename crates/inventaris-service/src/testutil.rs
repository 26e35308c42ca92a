//! Shared fixtures for the service test modules: an in-memory database with
//! the reserved warehouse location, a couple of rooms, and seed items.

use chrono::Utc;
use uuid::Uuid;

use inventaris_core::{Item, Location, WAREHOUSE_LOCATION_NAME};
use inventaris_db::{Database, DbConfig};

/// A migrated in-memory database with the warehouse, two rooms, and one
/// category.
pub(crate) struct TestDb {
    pub db: Database,
    pub warehouse: Location,
    pub lab: Location,
    pub library: Location,
    pub category_id: String,
}

pub(crate) async fn test_db() -> TestDb {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let warehouse = db
        .locations()
        .ensure(WAREHOUSE_LOCATION_NAME, Some("Central storage"))
        .await
        .unwrap();
    let lab = db.locations().ensure("Lab Komputer 1", None).await.unwrap();
    let library = db.locations().ensure("Perpustakaan", None).await.unwrap();
    let category = db.categories().ensure("Elektronik").await.unwrap();

    TestDb {
        db,
        warehouse,
        lab,
        library,
        category_id: category.id,
    }
}

impl TestDb {
    /// Inserts an item row at the given location and returns it.
    pub async fn seed_item(&self, barcode: &str, location_id: &str, quantity: i64) -> Item {
        let now = Utc::now();
        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: format!("Item {barcode}"),
            barcode: barcode.to_string(),
            quantity,
            min_stock: 2,
            specification: None,
            description: None,
            image_url: None,
            category_id: self.category_id.clone(),
            location_id: location_id.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.db.items().insert(self.db.pool(), &item).await.unwrap();
        item
    }

    /// Current quantity of an item row.
    pub async fn quantity(&self, item_id: &str) -> i64 {
        self.db
            .items()
            .get_by_id(self.db.pool(), item_id)
            .await
            .unwrap()
            .unwrap()
            .quantity
    }

    /// Number of ledger rows for an item.
    pub async fn ledger_count(&self, item_id: &str) -> usize {
        self.db.ledger().for_item(item_id).await.unwrap().len()
    }
}
