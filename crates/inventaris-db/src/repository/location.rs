//! # Location Repository
//!
//! Database operations for physical locations.
//!
//! Locations are near-static reference data: seeded once per deployment,
//! occasionally extended by an admin. Deleting a location requires migrating
//! its items first (a maintenance-script task, the foreign key enforces it).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use inventaris_core::Location;

const LOCATION_COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Repository for location database operations.
#[derive(Debug, Clone)]
pub struct LocationRepository {
    pool: SqlitePool,
}

impl LocationRepository {
    /// Creates a new LocationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LocationRepository { pool }
    }

    /// Gets a location by its unique name.
    ///
    /// The warehouse services resolve the reserved "Gudang" location
    /// through this lookup on every call.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Location>> {
        let location = sqlx::query_as::<_, Location>(&format!(
            "SELECT {LOCATION_COLUMNS} FROM locations WHERE name = ?1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    /// Gets a location by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Location>> {
        let location = sqlx::query_as::<_, Location>(&format!(
            "SELECT {LOCATION_COLUMNS} FROM locations WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    /// Lists all locations ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(&format!(
            "SELECT {LOCATION_COLUMNS} FROM locations ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    /// Inserts a new location.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` if the name is taken.
    pub async fn insert(&self, location: &Location) -> DbResult<()> {
        debug!(name = %location.name, "Inserting location");

        sqlx::query(
            r#"
            INSERT INTO locations (id, name, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&location.id)
        .bind(&location.name)
        .bind(&location.description)
        .bind(location.created_at)
        .bind(location.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Creates the location if no row with this name exists yet.
    ///
    /// Used by the seed binary; existing rows are left untouched.
    pub async fn ensure(&self, name: &str, description: Option<&str>) -> DbResult<Location> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO locations (id, name, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(description)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get_by_name(name)
            .await?
            .ok_or_else(|| DbError::not_found("Location", name))
    }
}
