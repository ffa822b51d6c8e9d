use chrono::{DateTime, TimeZone, Utc};

use crate::models::*;

/// Demo cabinets inserted into an empty store
pub(super) fn seed_cabinet_params() -> Vec<CabinetRecord> {
    vec![
        CabinetRecord {
            name: "ORMAR-A1".to_string(),
            row_position: 1,
            column_position: 1,
            total_rack_units: 42,
            location: "Podatkovni Centar 1".to_string(),
        },
        CabinetRecord {
            name: "ORMAR-B2".to_string(),
            row_position: 1,
            column_position: 2,
            total_rack_units: 42,
            location: "Podatkovni Centar 1".to_string(),
        },
    ]
}

/// Demo hardware as (index into seed_cabinet_params, record without cabinet).
/// The `cabinet_id` of each record is filled in once the cabinet row exists.
pub(super) fn seed_hardware_params() -> Vec<(usize, HardwareRecord)> {
    vec![
        (0, hardware("Server", "HP", "ProLiant DL380 Gen10", 1001, date(2023, 1, 15), "Aktivan", Some(date(2024, 1, 15)), 1, 2)),
        (0, hardware("Switch", "Cisco", "Catalyst 9300", 1002, date(2023, 2, 20), "Aktivan", None, 3, 1)),
        (0, hardware("Firewall", "Palo Alto", "PA-440", 1003, date(2023, 5, 10), "Aktivan", None, 5, 1)),
        (1, hardware("Server", "Dell", "PowerEdge R750", 2001, date(2023, 3, 5), "Servis", Some(date(2024, 3, 5)), 1, 2)),
        (1, hardware("Router", "Juniper", "MX104", 2002, date(2023, 7, 1), "Aktivan", None, 4, 2)),
    ]
}

#[allow(clippy::too_many_arguments)]
fn hardware(
    equipment_type: &str,
    manufacturer: &str,
    model: &str,
    serial_number: i64,
    install_date: DateTime<Utc>,
    status: &str,
    service_date: Option<DateTime<Utc>>,
    slot_position: i64,
    rack_unit_span: i64,
) -> HardwareRecord {
    HardwareRecord {
        equipment_type: equipment_type.to_string(),
        manufacturer: manufacturer.to_string(),
        model: model.to_string(),
        serial_number,
        install_date,
        status: status.to_string(),
        service_date,
        slot_position,
        rack_unit_span,
        cabinet_id: 0,
    }
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}
