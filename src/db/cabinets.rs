use anyhow::{Context, Result};
use sqlx::SqliteConnection;

use crate::models::*;

use super::row_helpers::{constraint_violation, map_cabinet_row, ConstraintKind};
use super::{ConflictError, NotFoundError};

const SELECT_CABINET: &str = r#"
    SELECT id, name, row_position, column_position, total_rack_units, location
    FROM cabinets
"#;

/// Cabinet database operations
pub struct CabinetRepo;

impl CabinetRepo {
    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Cabinet>> {
        let rows = sqlx::query(&format!("{} ORDER BY id", SELECT_CABINET))
            .fetch_all(&mut *conn)
            .await?;

        Ok(rows.iter().map(map_cabinet_row).collect())
    }

    pub async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Option<Cabinet>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_CABINET))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row.as_ref().map(map_cabinet_row))
    }

    pub async fn exists(conn: &mut SqliteConnection, id: i64) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM cabinets WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(found.is_some())
    }

    pub async fn count(conn: &mut SqliteConnection) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cabinets")
            .fetch_one(&mut *conn)
            .await?;
        Ok(count)
    }

    pub async fn create(conn: &mut SqliteConnection, record: &CabinetRecord) -> Result<Cabinet> {
        let result = sqlx::query(
            r#"
            INSERT INTO cabinets (name, row_position, column_position, total_rack_units, location)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.name)
        .bind(record.row_position)
        .bind(record.column_position)
        .bind(record.total_rack_units)
        .bind(&record.location)
        .execute(&mut *conn)
        .await?;

        let new_id = result.last_insert_rowid();
        Self::get(conn, new_id)
            .await?
            .context("Cabinet not found after creation")
    }

    /// Merge `patch` into the stored row and write it back
    pub async fn update(conn: &mut SqliteConnection, id: i64, patch: CabinetPatch) -> Result<Cabinet> {
        let current = Self::get(conn, id)
            .await?
            .ok_or_else(|| NotFoundError::new("Cabinet", &id.to_string()))?;

        let mut record = CabinetRecord::from(current);
        patch.apply(&mut record);

        sqlx::query(
            r#"
            UPDATE cabinets SET name = ?, row_position = ?, column_position = ?,
                                total_rack_units = ?, location = ?
            WHERE id = ?
            "#,
        )
        .bind(&record.name)
        .bind(record.row_position)
        .bind(record.column_position)
        .bind(record.total_rack_units)
        .bind(&record.location)
        .bind(id)
        .execute(&mut *conn)
        .await?;

        Self::get(conn, id)
            .await?
            .context("Cabinet not found after update")
    }

    /// Delete an empty cabinet. Cabinets still holding hardware are refused.
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
        if !Self::exists(conn, id).await? {
            return Err(NotFoundError::new("Cabinet", &id.to_string()).into());
        }

        let mounted: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hardware_units WHERE cabinet_id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
        if mounted > 0 {
            return Err(ConflictError::cabinet_not_empty(id).into());
        }

        let result = sqlx::query("DELETE FROM cabinets WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await;

        match result {
            Ok(_) => Ok(()),
            // ON DELETE RESTRICT backstop for rows inserted behind our back
            Err(e) if constraint_violation(&e) == Some(ConstraintKind::ForeignKey) => {
                Err(ConflictError::cabinet_not_empty(id).into())
            }
            Err(e) => Err(e.into()),
        }
    }
}
