use anyhow::{Context, Result};
use sqlx::SqliteConnection;

use crate::models::*;

use super::cabinets::CabinetRepo;
use super::row_helpers::{constraint_violation, map_hardware_row, ConstraintKind};
use super::NotFoundError;

const SELECT_HARDWARE: &str = r#"
    SELECT h.id, h.equipment_type, h.manufacturer, h.model, h.serial_number,
           h.install_date, h.status, h.service_date, h.slot_position, h.rack_unit_span,
           c.id AS cabinet_id, c.name AS cabinet_name,
           c.row_position AS cabinet_row_position, c.column_position AS cabinet_column_position,
           c.total_rack_units AS cabinet_total_rack_units, c.location AS cabinet_location
    FROM hardware_units h
    JOIN cabinets c ON c.id = h.cabinet_id
"#;

/// Hardware unit database operations
pub struct HardwareRepo;

impl HardwareRepo {
    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<HardwareUnit>> {
        let rows = sqlx::query(&format!("{} ORDER BY h.id", SELECT_HARDWARE))
            .fetch_all(&mut *conn)
            .await?;

        Ok(rows.iter().map(map_hardware_row).collect())
    }

    pub async fn list_by_cabinet(conn: &mut SqliteConnection, cabinet_id: i64) -> Result<Vec<HardwareUnit>> {
        let rows = sqlx::query(&format!(
            "{} WHERE h.cabinet_id = ? ORDER BY h.slot_position, h.id",
            SELECT_HARDWARE
        ))
        .bind(cabinet_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.iter().map(map_hardware_row).collect())
    }

    pub async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Option<HardwareUnit>> {
        let row = sqlx::query(&format!("{} WHERE h.id = ?", SELECT_HARDWARE))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row.as_ref().map(map_hardware_row))
    }

    pub async fn create(conn: &mut SqliteConnection, record: &HardwareRecord) -> Result<HardwareUnit> {
        ensure_cabinet(conn, record.cabinet_id).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO hardware_units (equipment_type, manufacturer, model, serial_number,
                                        install_date, status, service_date, slot_position,
                                        rack_unit_span, cabinet_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.equipment_type)
        .bind(&record.manufacturer)
        .bind(&record.model)
        .bind(record.serial_number)
        .bind(record.install_date)
        .bind(&record.status)
        .bind(record.service_date)
        .bind(record.slot_position)
        .bind(record.rack_unit_span)
        .bind(record.cabinet_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| write_error(e, record))?;

        let new_id = result.last_insert_rowid();
        Self::get(conn, new_id)
            .await?
            .context("Hardware unit not found after creation")
    }

    /// Merge `patch` into the stored row and write it back
    pub async fn update(conn: &mut SqliteConnection, id: i64, patch: HardwarePatch) -> Result<HardwareUnit> {
        let current = Self::get(conn, id)
            .await?
            .ok_or_else(|| NotFoundError::new("Hardware unit", &id.to_string()))?;

        if let Some(cabinet_id) = patch.cabinet_id {
            ensure_cabinet(conn, cabinet_id).await?;
        }

        let mut record = HardwareRecord::from(current);
        patch.apply(&mut record);

        sqlx::query(
            r#"
            UPDATE hardware_units SET equipment_type = ?, manufacturer = ?, model = ?,
                                      serial_number = ?, install_date = ?, status = ?,
                                      service_date = ?, slot_position = ?, rack_unit_span = ?,
                                      cabinet_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&record.equipment_type)
        .bind(&record.manufacturer)
        .bind(&record.model)
        .bind(record.serial_number)
        .bind(record.install_date)
        .bind(&record.status)
        .bind(record.service_date)
        .bind(record.slot_position)
        .bind(record.rack_unit_span)
        .bind(record.cabinet_id)
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| write_error(e, &record))?;

        Self::get(conn, id)
            .await?
            .context("Hardware unit not found after update")
    }

    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM hardware_units WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(NotFoundError::new("Hardware unit", &id.to_string()).into());
        }
        Ok(())
    }
}

async fn ensure_cabinet(conn: &mut SqliteConnection, cabinet_id: i64) -> Result<()> {
    if !CabinetRepo::exists(conn, cabinet_id).await? {
        return Err(NotFoundError::new("Cabinet", &cabinet_id.to_string()).into());
    }
    Ok(())
}

/// Translate constraint failures on hardware_units into client-facing errors
fn write_error(err: sqlx::Error, record: &HardwareRecord) -> anyhow::Error {
    match constraint_violation(&err) {
        Some(ConstraintKind::Unique) => ValidationError::new(format!(
            "serial_number {} is already assigned to another hardware unit",
            record.serial_number
        ))
        .into(),
        Some(ConstraintKind::ForeignKey) => {
            NotFoundError::new("Cabinet", &record.cabinet_id.to_string()).into()
        }
        Some(ConstraintKind::Check) => {
            ValidationError::new("rack_unit_span must be a positive integer").into()
        }
        None => err.into(),
    }
}
