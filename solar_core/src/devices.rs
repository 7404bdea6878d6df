//! # Devices
//!
//! The user's list of electrical loads, the input to the energy summary.
//!
//! ## Structure
//!
//! ```text
//! DeviceList
//! └── devices: Vec<Device>
//!     ├── id (uuid v4 unless imported with one)
//!     ├── name
//!     ├── power_w             ≥ 0
//!     ├── duty_hours_per_day  0..=24
//!     └── count               ≥ 0
//! ```
//!
//! ## Import
//!
//! [`import_devices`] accepts either a bare JSON array of device-like objects
//! or an object with a `devices` array. Rows are normalized before
//! validation: a missing `id` gets a fresh uuid, `name` defaults to
//! "Unnamed", `power_w` falls back to `power`, `duty_hours_per_day` falls
//! back to `duty`, and `count` defaults to 1. Numbers may be given as strings.
//!
//! ```rust
//! use solar_core::devices::{import_devices, DeviceList, ImportMode};
//!
//! let rows = import_devices(r#"{"devices": [{"name": "Fridge", "power": 120, "duty": 8}]}"#).unwrap();
//! let mut list = DeviceList::default();
//! list.apply_import(rows, ImportMode::Append);
//! assert_eq!(list.total_wh_per_day(), 960.0);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};
use crate::units::{KilowattHours, WattHours};

/// Hours in a day; upper bound for the duty cycle
pub const HOURS_PER_DAY: f64 = 24.0;

fn new_device_id() -> String {
    Uuid::new_v4().to_string()
}

/// A single electrical load.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "5b1c3f0e-8a4e-4c49-9a3b-1f2d7f6b2a10",
///   "name": "LED Bulb",
///   "power_w": 10.0,
///   "duty_hours_per_day": 5.0,
///   "count": 6
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Stable identifier
    #[serde(default = "new_device_id")]
    pub id: String,

    /// User label (e.g., "Fridge")
    pub name: String,

    /// Power draw while running (W)
    pub power_w: f64,

    /// Average running hours per day
    pub duty_hours_per_day: f64,

    /// Number of identical units
    pub count: u32,
}

impl Device {
    /// Create a validated device with a fresh id.
    pub fn new(name: impl Into<String>, power_w: f64, duty_hours_per_day: f64, count: u32) -> CalcResult<Self> {
        let device = Device {
            id: new_device_id(),
            name: name.into(),
            power_w,
            duty_hours_per_day,
            count,
        };
        device.validate()?;
        Ok(device)
    }

    /// Validate device parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.power_w >= 0.0 && self.power_w.is_finite()) {
            return Err(CalcError::invalid_input(
                "power_w",
                self.power_w.to_string(),
                "Power cannot be negative",
            ));
        }
        if !(0.0..=HOURS_PER_DAY).contains(&self.duty_hours_per_day) {
            return Err(CalcError::invalid_input(
                "duty_hours_per_day",
                self.duty_hours_per_day.to_string(),
                "Duty must be between 0 and 24 hours",
            ));
        }
        Ok(())
    }

    /// Daily energy: power × duty × count
    pub fn daily_energy(&self) -> WattHours {
        WattHours(self.power_w * self.duty_hours_per_day * f64::from(self.count))
    }

    /// Daily energy in Wh
    pub fn daily_wh(&self) -> f64 {
        self.daily_energy().value()
    }
}

/// How imported devices combine with the existing list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ImportMode {
    /// Keep existing devices and add the imported ones after them
    #[default]
    Append,
    /// Discard existing devices
    Replace,
}

/// Ordered list of devices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceList {
    #[serde(default)]
    pub devices: Vec<Device>,
}

impl DeviceList {
    /// Wrap an existing vector of devices
    pub fn new(devices: Vec<Device>) -> Self {
        DeviceList { devices }
    }

    /// Add a device, returning its id
    pub fn add(&mut self, device: Device) -> String {
        let id = device.id.clone();
        self.devices.push(device);
        id
    }

    /// Remove a device by id.
    ///
    /// Returns the removed device if it existed.
    pub fn remove(&mut self, id: &str) -> Option<Device> {
        let pos = self.devices.iter().position(|d| d.id == id)?;
        Some(self.devices.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Device> {
        self.devices.iter()
    }

    /// Merge imported devices. Returns the number imported.
    pub fn apply_import(&mut self, imported: Vec<Device>, mode: ImportMode) -> usize {
        let count = imported.len();
        match mode {
            ImportMode::Append => self.devices.extend(imported),
            ImportMode::Replace => self.devices = imported,
        }
        count
    }

    /// Validate every device (used after loading from disk)
    pub fn validate(&self) -> CalcResult<()> {
        self.devices.iter().try_for_each(Device::validate)
    }

    /// Total daily energy
    pub fn total_energy(&self) -> WattHours {
        self.devices.iter().map(Device::daily_energy).sum()
    }

    /// Total daily energy in Wh
    pub fn total_wh_per_day(&self) -> f64 {
        self.total_energy().value()
    }

    /// Total daily energy in kWh
    pub fn total_kwh_per_day(&self) -> f64 {
        KilowattHours::from(self.total_energy()).value()
    }

    /// Average power over 24 h (W)
    pub fn avg_power_w(&self) -> f64 {
        self.total_wh_per_day() / HOURS_PER_DAY
    }
}

// ============================================================================
// JSON import / export
// ============================================================================

/// Parse and normalize devices from an import payload.
///
/// # Returns
///
/// * `Ok(Vec<Device>)` - Normalized, validated devices in file order
/// * `Err(CalcError::SerializationError)` - Not valid JSON
/// * `Err(CalcError::InvalidInput)` - Unsupported shape or a bad row
pub fn import_devices(json: &str) -> CalcResult<Vec<Device>> {
    let payload: Value = serde_json::from_str(json).map_err(CalcError::serialization)?;

    let rows = match &payload {
        Value::Array(rows) => rows,
        Value::Object(obj) => match obj.get("devices") {
            Some(Value::Array(rows)) => rows,
            _ => return Err(unsupported_shape()),
        },
        _ => return Err(unsupported_shape()),
    };

    rows.iter()
        .enumerate()
        .map(|(i, row)| match row {
            Value::Object(obj) => normalize_row(i, obj),
            other => Err(CalcError::invalid_input(
                format!("devices[{i}]"),
                other.to_string(),
                "Each device must be a JSON object",
            )),
        })
        .collect()
}

/// Serialize devices as a pretty-printed JSON array
pub fn export_devices(list: &DeviceList) -> CalcResult<String> {
    serde_json::to_string_pretty(&list.devices).map_err(CalcError::serialization)
}

fn unsupported_shape() -> CalcError {
    CalcError::invalid_input(
        "payload",
        "json",
        "Unsupported JSON shape. Expect a list or {devices: [...]}.",
    )
}

fn normalize_row(index: usize, row: &Map<String, Value>) -> CalcResult<Device> {
    let id = match row.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => new_device_id(),
    };
    let name = match row.get("name") {
        Some(Value::String(s)) => s.clone(),
        _ => "Unnamed".to_string(),
    };
    let power_w = number_field(index, row, &["power_w", "power"])?.unwrap_or(0.0);
    let duty_hours_per_day = number_field(index, row, &["duty_hours_per_day", "duty"])?.unwrap_or(0.0);
    let count = number_field(index, row, &["count"])?.unwrap_or(1.0);
    if !(count >= 0.0 && count <= f64::from(u32::MAX)) {
        return Err(CalcError::invalid_input(
            format!("devices[{index}].count"),
            count.to_string(),
            "Count cannot be negative",
        ));
    }

    let device = Device {
        id,
        name,
        power_w,
        duty_hours_per_day,
        count: count.trunc() as u32,
    };
    device.validate().map_err(|e| match e {
        CalcError::InvalidInput { field, value, reason } => CalcError::InvalidInput {
            field: format!("devices[{index}].{field}"),
            value,
            reason,
        },
        other => other,
    })?;
    Ok(device)
}

/// First present key among `keys`, as a number. Strings are parsed; null
/// counts as absent.
fn number_field(index: usize, row: &Map<String, Value>, keys: &[&str]) -> CalcResult<Option<f64>> {
    for key in keys {
        let bad = |value: &Value| {
            CalcError::invalid_input(format!("devices[{index}].{key}"), value.to_string(), "expected a number")
        };
        match row.get(*key) {
            None | Some(Value::Null) => continue,
            Some(Value::Number(n)) => return n.as_f64().map(Some).ok_or_else(|| bad(&Value::Number(n.clone()))),
            Some(Value::String(s)) => {
                return s
                    .trim()
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| bad(&Value::String(s.clone())))
            }
            Some(other) => return Err(bad(other)),
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_validation() {
        assert!(Device::new("Fridge", 120.0, 8.0, 1).is_ok());
        assert!(Device::new("Idle", 0.0, 0.0, 0).is_ok());
        assert!(Device::new("Always on", 5.0, 24.0, 1).is_ok());

        let err = Device::new("Bad", -1.0, 2.0, 1).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(Device::new("Bad", 1.0, 24.5, 1).is_err());
        assert!(Device::new("Bad", 1.0, -0.5, 1).is_err());
        assert!(Device::new("Bad", f64::NAN, 1.0, 1).is_err());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Device::new("A", 1.0, 1.0, 1).unwrap();
        let b = Device::new("A", 1.0, 1.0, 1).unwrap();
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_daily_energy() {
        let bulbs = Device::new("LED Bulb", 10.0, 5.0, 6).unwrap();
        assert_eq!(bulbs.daily_wh(), 300.0);
    }

    #[test]
    fn test_list_add_remove() {
        let mut list = DeviceList::default();
        let id = list.add(Device::new("Fridge", 120.0, 8.0, 1).unwrap());
        list.add(Device::new("Router", 12.0, 24.0, 1).unwrap());
        assert_eq!(list.len(), 2);
        assert_eq!(list.devices[0].id, id);

        let removed = list.remove(&id).unwrap();
        assert_eq!(removed.name, "Fridge");
        assert_eq!(list.len(), 1);
        assert!(list.remove(&id).is_none());
    }

    #[test]
    fn test_list_totals() {
        let list = DeviceList::new(vec![
            Device::new("LED Bulb", 10.0, 5.0, 6).unwrap(),
            Device::new("Fridge", 120.0, 8.0, 1).unwrap(),
        ]);
        assert!((list.total_wh_per_day() - 1260.0).abs() < 1e-9);
        assert!((list.total_kwh_per_day() - 1.26).abs() < 1e-9);
        assert!((list.avg_power_w() - 52.5).abs() < 1e-9);
    }

    #[test]
    fn test_import_bare_list() {
        let json = r#"[
            {"id": "a1", "name": "LED Bulb", "power_w": 10, "duty_hours_per_day": 5, "count": 6},
            {"name": "Fridge", "power_w": 120.0, "duty_hours_per_day": 8.0, "count": 1}
        ]"#;
        let devices = import_devices(json).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].id, "a1");
        assert_eq!(devices[0].count, 6);
        assert!(!devices[1].id.is_empty());
    }

    #[test]
    fn test_import_wrapped_with_aliases_and_defaults() {
        let json = r#"{"devices": [
            {"power": "60", "duty": 2.5},
            {"name": "Pump", "power_w": 250, "duty": "1", "count": null}
        ]}"#;
        let devices = import_devices(json).unwrap();
        assert_eq!(devices[0].name, "Unnamed");
        assert_eq!(devices[0].power_w, 60.0);
        assert_eq!(devices[0].duty_hours_per_day, 2.5);
        assert_eq!(devices[0].count, 1);
        assert_eq!(devices[1].count, 1);
        assert_eq!(devices[1].duty_hours_per_day, 1.0);
    }

    #[test]
    fn test_import_missing_numbers_default_to_zero() {
        let devices = import_devices(r#"[{"name": "Placeholder"}]"#).unwrap();
        assert_eq!(devices[0].power_w, 0.0);
        assert_eq!(devices[0].duty_hours_per_day, 0.0);
        assert_eq!(devices[0].daily_wh(), 0.0);
    }

    #[test]
    fn test_import_prefers_canonical_keys() {
        let devices = import_devices(r#"[{"power_w": 5, "power": 50}]"#).unwrap();
        assert_eq!(devices[0].power_w, 5.0);
    }

    #[test]
    fn test_import_rejects_bad_shapes() {
        for json in [r#"{"items": []}"#, r#""devices""#, "42", r#"{"devices": {}}"#] {
            let err = import_devices(json).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT", "{json}");
        }
        assert_eq!(import_devices("not json").unwrap_err().error_code(), "SERIALIZATION_ERROR");
        assert!(import_devices("[1, 2]").is_err());
    }

    #[test]
    fn test_import_rejects_bad_rows() {
        let err = import_devices(r#"[{"name": "ok"}, {"name": "x", "duty": 30}]"#).unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "devices[1].duty_hours_per_day"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(import_devices(r#"[{"count": -2}]"#).is_err());
        assert!(import_devices(r#"[{"power": "lots"}]"#).is_err());
        assert!(import_devices(r#"[{"power": true}]"#).is_err());
    }

    #[test]
    fn test_import_empty_list() {
        assert!(import_devices("[]").unwrap().is_empty());
        assert!(import_devices(r#"{"devices": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_apply_import_modes() {
        let mut list = DeviceList::new(vec![Device::new("Old", 1.0, 1.0, 1).unwrap()]);
        let imported = vec![Device::new("New", 2.0, 1.0, 1).unwrap()];

        assert_eq!(list.apply_import(imported.clone(), ImportMode::Append), 1);
        assert_eq!(list.len(), 2);

        list.apply_import(imported, ImportMode::Replace);
        assert_eq!(list.len(), 1);
        assert_eq!(list.devices[0].name, "New");
    }

    #[test]
    fn test_export_reimports() {
        let list = DeviceList::new(vec![
            Device::new("LED Bulb", 10.0, 5.0, 6).unwrap(),
            Device::new("Fridge", 120.0, 8.0, 1).unwrap(),
        ]);
        let json = export_devices(&list).unwrap();
        assert!(json.trim_start().starts_with('['));
        let back = import_devices(&json).unwrap();
        assert_eq!(back, list.devices);
    }

    #[test]
    fn test_deserialize_without_id() {
        let device: Device =
            serde_json::from_str(r#"{"name": "Fan", "power_w": 40, "duty_hours_per_day": 6, "count": 2}"#).unwrap();
        assert!(!device.id.is_empty());
        assert_eq!(device.daily_wh(), 480.0);
    }
}
