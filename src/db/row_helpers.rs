use sqlx::{sqlite::SqliteRow, Row};

use crate::models::*;

/// Map a SQLite row to a Cabinet struct
pub fn map_cabinet_row(row: &SqliteRow) -> Cabinet {
    Cabinet {
        id: row.get("id"),
        name: row.get("name"),
        row_position: row.get("row_position"),
        column_position: row.get("column_position"),
        total_rack_units: row.get("total_rack_units"),
        location: row.get("location"),
    }
}

/// Map a joined hardware_units/cabinets row to a HardwareUnit struct.
/// Cabinet columns carry a `cabinet_` prefix.
pub fn map_hardware_row(row: &SqliteRow) -> HardwareUnit {
    HardwareUnit {
        id: row.get("id"),
        equipment_type: row.get("equipment_type"),
        manufacturer: row.get("manufacturer"),
        model: row.get("model"),
        serial_number: row.get("serial_number"),
        install_date: row.get("install_date"),
        status: row.get("status"),
        service_date: row.get("service_date"),
        slot_position: row.get("slot_position"),
        rack_unit_span: row.get("rack_unit_span"),
        cabinet: Cabinet {
            id: row.get("cabinet_id"),
            name: row.get("cabinet_name"),
            row_position: row.get("cabinet_row_position"),
            column_position: row.get("cabinet_column_position"),
            total_rack_units: row.get("cabinet_total_rack_units"),
            location: row.get("cabinet_location"),
        },
    }
}

/// Constraint a failed write tripped over, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    Check,
}

/// Classify a sqlx error as a constraint violation
pub fn constraint_violation(err: &sqlx::Error) -> Option<ConstraintKind> {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => Some(ConstraintKind::Unique),
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => Some(ConstraintKind::ForeignKey),
        sqlx::Error::Database(db) if db.is_check_violation() => Some(ConstraintKind::Check),
        _ => None,
    }
}
