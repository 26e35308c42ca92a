//! # Seed Data Generator
//!
//! Populates the database with reference data (locations, categories) and
//! demo items for development.
//!
//! ## Usage
//! ```bash
//! # Seed into the default dev database
//! cargo run -p inventaris-db --bin seed
//!
//! # Specify database path
//! cargo run -p inventaris-db --bin seed -- --db ./data/inventaris.db
//! ```
//!
//! ## Seeded Data
//! - Locations: the reserved "Gudang" warehouse plus the lab rooms
//! - Categories: Elektronik, Furniture, Buku, Alat Tulis, Alat Peraga
//! - Demo items, all stocked into Gudang (rooms receive stock via moves)
//!
//! Locations and categories are upserted by name, so re-running the seed is
//! safe; items are only generated into an empty catalog.

use std::env;

use chrono::Utc;
use uuid::Uuid;

use inventaris_core::{Item, WAREHOUSE_LOCATION_NAME};
use inventaris_db::{Database, DbConfig};

/// Locations every deployment starts with. Gudang must exist before any
/// warehouse transaction can run.
const LOCATIONS: &[(&str, &str)] = &[
    (WAREHOUSE_LOCATION_NAME, "Gudang Utama"),
    ("R. Maintenance", "Ruang Maintenance"),
    ("Lab. Software1", "Laboratorium Software 1"),
    ("Lab. Software2", "Laboratorium Software 2"),
    ("Lab. Simdig1", "Laboratorium Simulasi Digital 1"),
    ("Lab. Simdig2", "Laboratorium Simulasi Digital 2"),
    ("Lab. Grafis", "Laboratorium Grafis"),
    ("Lab. Lan", "Laboratorium LAN"),
    ("Lab. Wan", "Laboratorium WAN"),
    ("Lab. Hardware", "Laboratorium Hardware"),
];

const CATEGORIES: &[&str] = &["Elektronik", "Furniture", "Buku", "Alat Tulis", "Alat Peraga"];

/// Demo items: (name, specification, category, quantity, min_stock).
const ITEMS: &[(&str, &str, &str, i64, i64)] = &[
    ("Proyektor Epson EB-X500", "3LCD, XGA", "Elektronik", 8, 2),
    ("Laptop Lenovo ThinkPad L14", "i5 / 16GB / 512GB", "Elektronik", 20, 5),
    ("Mouse Logitech B100", "USB optical", "Elektronik", 40, 10),
    ("Keyboard Logitech K120", "USB", "Elektronik", 40, 10),
    ("Router MikroTik hEX", "RB750Gr3", "Elektronik", 12, 3),
    ("Switch TP-Link 24 Port", "TL-SG1024", "Elektronik", 10, 2),
    ("Kabel LAN Cat6 305m", "Belden roll", "Elektronik", 6, 1),
    ("Crimping Tool", "RJ45/RJ11", "Alat Tulis", 15, 3),
    ("Obeng Set 32-in-1", "Magnetic bits", "Alat Tulis", 18, 4),
    ("Multimeter Digital", "Sanwa CD800a", "Alat Peraga", 10, 2),
    ("Meja Komputer", "120x60cm", "Furniture", 30, 5),
    ("Kursi Lab", "Adjustable", "Furniture", 60, 10),
    ("Buku Jaringan Dasar", "Kelas X", "Buku", 35, 5),
    ("Buku Pemrograman Web", "Kelas XI", "Buku", 35, 5),
    ("Papan Tulis Portabel", "90x120cm", "Alat Peraga", 5, 1),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./inventaris_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Inventaris Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./inventaris_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Inventaris Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("* Connected, migrations applied");

    // Locations and categories are idempotent upserts.
    for (name, description) in LOCATIONS {
        db.locations().ensure(name, Some(description)).await?;
    }
    println!("* {} locations ensured", LOCATIONS.len());

    for name in CATEGORIES {
        db.categories().ensure(name).await?;
    }
    println!("* {} categories ensured", CATEGORIES.len());

    // Items only go into an empty catalog.
    let existing = db.items().count().await?;
    if existing > 0 {
        println!("! Catalog already has {} items, skipping item seed", existing);
        db.close().await;
        return Ok(());
    }

    let gudang = db
        .locations()
        .get_by_name(WAREHOUSE_LOCATION_NAME)
        .await?
        .expect("Gudang was just ensured");

    let mut generated = 0;
    for (idx, (name, spec, category_name, quantity, min_stock)) in ITEMS.iter().enumerate() {
        let category = db.categories().ensure(category_name).await?;
        let now = Utc::now();

        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            // EAN-13-shaped demo barcode, not a valid checksum
            barcode: format!("899{:010}", idx + 1),
            quantity: *quantity,
            min_stock: *min_stock,
            specification: Some(spec.to_string()),
            description: None,
            image_url: None,
            category_id: category.id,
            location_id: gudang.id.clone(),
            created_at: now,
            updated_at: now,
        };

        db.items().insert(db.pool(), &item).await?;
        generated += 1;
    }

    println!("* Generated {} items in {}", generated, WAREHOUSE_LOCATION_NAME);
    println!();
    println!("Seed complete.");

    db.close().await;
    Ok(())
}
