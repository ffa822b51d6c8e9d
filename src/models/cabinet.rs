use serde::{Deserialize, Serialize};

use super::{HardwareUnit, ValidationError};
use crate::utils::{check_positive, check_text, require_text};

/// Cabinet represents a physical rack enclosure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cabinet {
    pub id: i64,
    pub name: String,
    pub row_position: i64,
    pub column_position: i64,
    pub total_rack_units: i64,
    pub location: String,
}

/// CabinetDetail is a cabinet together with the hardware mounted in it
#[derive(Debug, Clone, Serialize)]
pub struct CabinetDetail {
    #[serde(flatten)]
    pub cabinet: Cabinet,
    pub hardware: Vec<HardwareUnit>,
}

/// Column values of a cabinet row, without its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CabinetRecord {
    pub name: String,
    pub row_position: i64,
    pub column_position: i64,
    pub total_rack_units: i64,
    pub location: String,
}

impl From<Cabinet> for CabinetRecord {
    fn from(c: Cabinet) -> Self {
        Self {
            name: c.name,
            row_position: c.row_position,
            column_position: c.column_position,
            total_rack_units: c.total_rack_units,
            location: c.location,
        }
    }
}

/// CabinetRequest is the body accepted by POST and PUT on cabinets.
/// Unknown keys are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CabinetRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub row_position: Option<i64>,
    #[serde(default)]
    pub column_position: Option<i64>,
    #[serde(default)]
    pub total_rack_units: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
}

/// CabinetPatch lists the fields a PUT replaces; `None` leaves a column as is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CabinetPatch {
    pub name: Option<String>,
    pub row_position: Option<i64>,
    pub column_position: Option<i64>,
    pub total_rack_units: Option<i64>,
    pub location: Option<String>,
}

impl CabinetRequest {
    /// Validate a create request: every field is required
    pub fn into_record(self) -> Result<CabinetRecord, ValidationError> {
        Ok(CabinetRecord {
            name: require_text("name", self.name)?,
            row_position: self
                .row_position
                .ok_or_else(|| ValidationError::required("row_position"))?,
            column_position: self
                .column_position
                .ok_or_else(|| ValidationError::required("column_position"))?,
            total_rack_units: check_positive(
                "total_rack_units",
                self.total_rack_units
                    .ok_or_else(|| ValidationError::required("total_rack_units"))?,
            )?,
            location: require_text("location", self.location)?,
        })
    }

    /// Validate an update request: only the fields that are present
    pub fn into_patch(self) -> Result<CabinetPatch, ValidationError> {
        Ok(CabinetPatch {
            name: self.name.map(|v| check_text("name", v)).transpose()?,
            row_position: self.row_position,
            column_position: self.column_position,
            total_rack_units: self
                .total_rack_units
                .map(|v| check_positive("total_rack_units", v))
                .transpose()?,
            location: self.location.map(|v| check_text("location", v)).transpose()?,
        })
    }
}

impl CabinetPatch {
    pub fn apply(self, record: &mut CabinetRecord) {
        if let Some(v) = self.name {
            record.name = v;
        }
        if let Some(v) = self.row_position {
            record.row_position = v;
        }
        if let Some(v) = self.column_position {
            record.column_position = v;
        }
        if let Some(v) = self.total_rack_units {
            record.total_rack_units = v;
        }
        if let Some(v) = self.location {
            record.location = v;
        }
    }
}
