use serde::Serialize;
use std::collections::BTreeMap;

/// Hardware count per status label, keys in ascending order
pub type StatusCounts = BTreeMap<String, i64>;

/// CabinetOccupancy reports how many rack units a cabinet's hardware consumes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CabinetOccupancy {
    pub cabinet_id: i64,
    pub name: String,
    pub total_rack_units: i64,
    pub used_rack_units: i64,
    pub occupancy_percent: f64,
}

impl CabinetOccupancy {
    pub fn new(cabinet_id: i64, name: String, total_rack_units: i64, used_rack_units: i64) -> Self {
        let occupancy_percent = if total_rack_units > 0 {
            let pct = used_rack_units as f64 / total_rack_units as f64 * 100.0;
            (pct * 100.0).round() / 100.0
        } else {
            0.0
        };
        Self {
            cabinet_id,
            name,
            total_rack_units,
            used_rack_units,
            occupancy_percent,
        }
    }
}
