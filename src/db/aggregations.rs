use anyhow::Result;
use sqlx::{Row, SqliteConnection};

use crate::models::*;

/// Read-only reporting queries over cabinets and hardware
pub struct AggregationRepo;

impl AggregationRepo {
    /// Hardware count per status label
    pub async fn status_counts(conn: &mut SqliteConnection) -> Result<StatusCounts> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM hardware_units GROUP BY status ORDER BY status",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Rack units consumed per cabinet, empty cabinets included
    pub async fn occupancy(conn: &mut SqliteConnection) -> Result<Vec<CabinetOccupancy>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.name, c.total_rack_units,
                   COALESCE(SUM(h.rack_unit_span), 0) AS used_rack_units
            FROM cabinets c
            LEFT JOIN hardware_units h ON h.cabinet_id = c.id
            GROUP BY c.id
            ORDER BY c.id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                CabinetOccupancy::new(
                    row.get("id"),
                    row.get("name"),
                    row.get("total_rack_units"),
                    row.get("used_rack_units"),
                )
            })
            .collect())
    }
}
