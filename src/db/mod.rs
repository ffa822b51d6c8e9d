mod aggregations;
mod cabinets;
mod hardware;
pub(crate) mod row_helpers;
mod seeds;

use anyhow::{Context, Result};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

use crate::models::*;

/// Typed error for "resource not found" — enables reliable downcast
/// in the API error handler instead of fragile string matching.
#[derive(Debug)]
pub struct NotFoundError {
    pub resource: String,
    pub id: String,
}

impl NotFoundError {
    pub fn new(resource: &str, id: &str) -> Self {
        Self {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }
}

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} not found: {}", self.resource, self.id)
    }
}

impl std::error::Error for NotFoundError {}

/// Typed error for a write refused because of dependent rows
#[derive(Debug)]
pub struct ConflictError {
    pub message: String,
}

impl ConflictError {
    pub fn cabinet_not_empty(id: i64) -> Self {
        Self {
            message: format!(
                "Cabinet {} is not empty and cannot be deleted. Remove all of its hardware first.",
                id
            ),
        }
    }
}

impl std::fmt::Display for ConflictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConflictError {}

/// Store handles all database operations, delegating to per-entity repo modules.
///
/// Every public operation runs in its own transaction: it is committed when the
/// operation succeeds and rolled back when the transaction is dropped on any
/// error path.
#[derive(Clone)]
pub struct Store {
    pool: Pool<Sqlite>,
}

impl Store {
    /// Create a new database store with a specific pool size
    pub async fn with_pool_size(db_path: &str, max_connections: u32) -> Result<Self> {
        let db_url = format!("sqlite:{}?mode=rwc", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&db_url)
            .await
            .context("Failed to connect to database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Private in-memory database on a single pinned connection
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Run database migrations
    async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Insert the demo cabinets and hardware if no cabinet exists yet.
    /// Returns the number of hardware units created.
    pub async fn seed_fixtures_if_empty(&self) -> Result<usize> {
        let mut tx = self.pool.begin().await?;
        if cabinets::CabinetRepo::count(&mut tx).await? > 0 {
            return Ok(0);
        }

        let mut cabinet_ids = Vec::new();
        for record in seeds::seed_cabinet_params() {
            let cabinet = cabinets::CabinetRepo::create(&mut tx, &record).await?;
            cabinet_ids.push(cabinet.id);
        }

        let mut created = 0;
        for (cabinet_index, mut record) in seeds::seed_hardware_params() {
            record.cabinet_id = cabinet_ids[cabinet_index];
            hardware::HardwareRepo::create(&mut tx, &record).await?;
            created += 1;
        }

        tx.commit().await?;
        tracing::info!(
            "Seeded {} cabinets and {} hardware units",
            cabinet_ids.len(),
            created
        );
        Ok(created)
    }

    // ========== Cabinet Operations ==========

    pub async fn list_cabinets(&self) -> Result<Vec<Cabinet>> {
        let mut tx = self.pool.begin().await?;
        let cabinets = cabinets::CabinetRepo::list(&mut tx).await?;
        tx.commit().await?;
        Ok(cabinets)
    }

    /// Cabinet with its mounted hardware, read in one transaction
    pub async fn get_cabinet_detail(&self, id: i64) -> Result<Option<CabinetDetail>> {
        let mut tx = self.pool.begin().await?;
        let detail = match cabinets::CabinetRepo::get(&mut tx, id).await? {
            Some(cabinet) => {
                let hardware = hardware::HardwareRepo::list_by_cabinet(&mut tx, id).await?;
                Some(CabinetDetail { cabinet, hardware })
            }
            None => None,
        };
        tx.commit().await?;
        Ok(detail)
    }

    pub async fn create_cabinet(&self, record: &CabinetRecord) -> Result<Cabinet> {
        let mut tx = self.pool.begin().await?;
        let cabinet = cabinets::CabinetRepo::create(&mut tx, record).await?;
        tx.commit().await?;
        Ok(cabinet)
    }

    pub async fn update_cabinet(&self, id: i64, patch: CabinetPatch) -> Result<Cabinet> {
        let mut tx = self.pool.begin().await?;
        let cabinet = cabinets::CabinetRepo::update(&mut tx, id, patch).await?;
        tx.commit().await?;
        Ok(cabinet)
    }

    pub async fn delete_cabinet(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        cabinets::CabinetRepo::delete(&mut tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    // ========== Hardware Operations ==========

    pub async fn list_hardware(&self) -> Result<Vec<HardwareUnit>> {
        let mut tx = self.pool.begin().await?;
        let units = hardware::HardwareRepo::list(&mut tx).await?;
        tx.commit().await?;
        Ok(units)
    }

    pub async fn get_hardware(&self, id: i64) -> Result<Option<HardwareUnit>> {
        let mut tx = self.pool.begin().await?;
        let unit = hardware::HardwareRepo::get(&mut tx, id).await?;
        tx.commit().await?;
        Ok(unit)
    }

    pub async fn create_hardware(&self, record: &HardwareRecord) -> Result<HardwareUnit> {
        let mut tx = self.pool.begin().await?;
        let unit = hardware::HardwareRepo::create(&mut tx, record).await?;
        tx.commit().await?;
        Ok(unit)
    }

    pub async fn update_hardware(&self, id: i64, patch: HardwarePatch) -> Result<HardwareUnit> {
        let mut tx = self.pool.begin().await?;
        let unit = hardware::HardwareRepo::update(&mut tx, id, patch).await?;
        tx.commit().await?;
        Ok(unit)
    }

    pub async fn delete_hardware(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        hardware::HardwareRepo::delete(&mut tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    // ========== Aggregations ==========

    pub async fn status_counts(&self) -> Result<StatusCounts> {
        let mut tx = self.pool.begin().await?;
        let counts = aggregations::AggregationRepo::status_counts(&mut tx).await?;
        tx.commit().await?;
        Ok(counts)
    }

    pub async fn occupancy(&self) -> Result<Vec<CabinetOccupancy>> {
        let mut tx = self.pool.begin().await?;
        let report = aggregations::AggregationRepo::occupancy(&mut tx).await?;
        tx.commit().await?;
        Ok(report)
    }
}
