use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{double_option, Cabinet, FieldUpdate, ValidationError};
use crate::utils::{check_positive, check_text, parse_timestamp, require_text};

/// HardwareUnit is a device mounted in a cabinet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareUnit {
    pub id: i64,
    pub equipment_type: String,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: i64,
    pub install_date: DateTime<Utc>,
    pub status: String,
    pub service_date: Option<DateTime<Utc>>,
    pub slot_position: i64,
    pub rack_unit_span: i64,
    pub cabinet: Cabinet,
}

/// Column values of a hardware_units row, without its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareRecord {
    pub equipment_type: String,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: i64,
    pub install_date: DateTime<Utc>,
    pub status: String,
    pub service_date: Option<DateTime<Utc>>,
    pub slot_position: i64,
    pub rack_unit_span: i64,
    pub cabinet_id: i64,
}

impl From<HardwareUnit> for HardwareRecord {
    fn from(h: HardwareUnit) -> Self {
        Self {
            equipment_type: h.equipment_type,
            manufacturer: h.manufacturer,
            model: h.model,
            serial_number: h.serial_number,
            install_date: h.install_date,
            status: h.status,
            service_date: h.service_date,
            slot_position: h.slot_position,
            rack_unit_span: h.rack_unit_span,
            cabinet_id: h.cabinet.id,
        }
    }
}

/// HardwareRequest is the body accepted by POST and PUT on hardware.
/// Timestamps arrive as ISO-8601 strings. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HardwareRequest {
    #[serde(default)]
    pub equipment_type: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial_number: Option<i64>,
    #[serde(default)]
    pub install_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Absent: `None`; explicit null: `Some(None)`
    #[serde(default, deserialize_with = "double_option")]
    pub service_date: Option<Option<String>>,
    #[serde(default)]
    pub slot_position: Option<i64>,
    #[serde(default)]
    pub rack_unit_span: Option<i64>,
    #[serde(default)]
    pub cabinet_id: Option<i64>,
}

/// HardwarePatch lists the fields a PUT replaces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HardwarePatch {
    pub equipment_type: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<i64>,
    pub install_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub service_date: FieldUpdate<DateTime<Utc>>,
    pub slot_position: Option<i64>,
    pub rack_unit_span: Option<i64>,
    pub cabinet_id: Option<i64>,
}

impl HardwareRequest {
    /// Validate a create request. `service_date` may be absent or null.
    pub fn into_record(self) -> Result<HardwareRecord, ValidationError> {
        let install_date = self
            .install_date
            .ok_or_else(|| ValidationError::required("install_date"))?;
        let service_date = self
            .service_date
            .flatten()
            .map(|raw| parse_timestamp("service_date", &raw))
            .transpose()?;

        Ok(HardwareRecord {
            equipment_type: require_text("equipment_type", self.equipment_type)?,
            manufacturer: require_text("manufacturer", self.manufacturer)?,
            model: require_text("model", self.model)?,
            serial_number: self
                .serial_number
                .ok_or_else(|| ValidationError::required("serial_number"))?,
            install_date: parse_timestamp("install_date", &install_date)?,
            status: require_text("status", self.status)?,
            service_date,
            slot_position: self
                .slot_position
                .ok_or_else(|| ValidationError::required("slot_position"))?,
            rack_unit_span: check_positive(
                "rack_unit_span",
                self.rack_unit_span
                    .ok_or_else(|| ValidationError::required("rack_unit_span"))?,
            )?,
            cabinet_id: self
                .cabinet_id
                .ok_or_else(|| ValidationError::required("cabinet_id"))?,
        })
    }

    /// Validate an update request.
    ///
    /// `install_date` absent or null leaves the stored value alone.
    /// `service_date` absent keeps the stored value, null clears it; with
    /// `clear_service_date_on_omit` an absent key clears it as well.
    pub fn into_patch(self, clear_service_date_on_omit: bool) -> Result<HardwarePatch, ValidationError> {
        let service_date = match self.service_date {
            Some(Some(raw)) => FieldUpdate::Set(parse_timestamp("service_date", &raw)?),
            Some(None) => FieldUpdate::Clear,
            None if clear_service_date_on_omit => FieldUpdate::Clear,
            None => FieldUpdate::Keep,
        };

        Ok(HardwarePatch {
            equipment_type: self
                .equipment_type
                .map(|v| check_text("equipment_type", v))
                .transpose()?,
            manufacturer: self
                .manufacturer
                .map(|v| check_text("manufacturer", v))
                .transpose()?,
            model: self.model.map(|v| check_text("model", v)).transpose()?,
            serial_number: self.serial_number,
            install_date: self
                .install_date
                .map(|raw| parse_timestamp("install_date", &raw))
                .transpose()?,
            status: self.status.map(|v| check_text("status", v)).transpose()?,
            service_date,
            slot_position: self.slot_position,
            rack_unit_span: self
                .rack_unit_span
                .map(|v| check_positive("rack_unit_span", v))
                .transpose()?,
            cabinet_id: self.cabinet_id,
        })
    }
}

impl HardwarePatch {
    pub fn apply(self, record: &mut HardwareRecord) {
        if let Some(v) = self.equipment_type {
            record.equipment_type = v;
        }
        if let Some(v) = self.manufacturer {
            record.manufacturer = v;
        }
        if let Some(v) = self.model {
            record.model = v;
        }
        if let Some(v) = self.serial_number {
            record.serial_number = v;
        }
        if let Some(v) = self.install_date {
            record.install_date = v;
        }
        if let Some(v) = self.status {
            record.status = v;
        }
        self.service_date.apply(&mut record.service_date);
        if let Some(v) = self.slot_position {
            record.slot_position = v;
        }
        if let Some(v) = self.rack_unit_span {
            record.rack_unit_span = v;
        }
        if let Some(v) = self.cabinet_id {
            record.cabinet_id = v;
        }
    }
}
