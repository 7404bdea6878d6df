//! # Store Document
//!
//! The root container persisted by the data store. It holds exactly two
//! records, each replaced wholesale when saved:
//!
//! ```text
//! StoreDocument
//! ├── meta: StoreMetadata (schema version, timestamps)
//! ├── devices: DeviceList
//! └── settings: Settings
//! ```
//!
//! ## Example
//!
//! ```rust
//! use solar_core::document::StoreDocument;
//! use solar_core::devices::Device;
//!
//! let mut doc = StoreDocument::new();
//! let mut devices = doc.devices.clone();
//! devices.add(Device::new("Fridge", 120.0, 8.0, 1).unwrap());
//! doc.replace_devices(devices);
//!
//! let json = serde_json::to_string_pretty(&doc).unwrap();
//! assert!(json.contains("Fridge"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::devices::DeviceList;
use crate::settings::Settings;

/// Current schema version for store files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root store container, serialized as pretty JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDocument {
    /// Schema version and timestamps
    pub meta: StoreMetadata,

    /// The `devices` record
    #[serde(default)]
    pub devices: DeviceList,

    /// The `settings` record
    #[serde(default)]
    pub settings: Settings,
}

impl StoreDocument {
    /// Create an empty document stamped with the current time.
    pub fn new() -> Self {
        let now = Utc::now();
        StoreDocument {
            meta: StoreMetadata {
                version: SCHEMA_VERSION.to_string(),
                created: now,
                modified: now,
            },
            devices: DeviceList::default(),
            settings: Settings::default(),
        }
    }

    /// Replace the whole `devices` record.
    pub fn replace_devices(&mut self, devices: DeviceList) {
        self.devices = devices;
        self.touch();
    }

    /// Replace the whole `settings` record.
    pub fn replace_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.touch();
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for StoreDocument {
    fn default() -> Self {
        StoreDocument::new()
    }
}

/// Metadata stored in the document header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// When the store was created
    pub created: DateTime<Utc>,

    /// When a record was last replaced
    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::Device;

    #[test]
    fn test_document_creation() {
        let doc = StoreDocument::new();
        assert_eq!(doc.meta.version, SCHEMA_VERSION);
        assert!(doc.devices.is_empty());
        assert_eq!(doc.settings, Settings::default());
        assert_eq!(doc.meta.created, doc.meta.modified);
    }

    #[test]
    fn test_replace_records_touches() {
        let mut doc = StoreDocument::new();
        let created = doc.meta.created;

        doc.replace_devices(DeviceList::new(vec![Device::new("Fan", 40.0, 6.0, 2).unwrap()]));
        assert_eq!(doc.devices.len(), 1);
        assert!(doc.meta.modified >= created);

        doc.replace_settings(Settings {
            voltage_v: 48.0,
            ..Settings::default()
        });
        assert_eq!(doc.settings.voltage_v, 48.0);
        assert_eq!(doc.devices.len(), 1);
    }

    #[test]
    fn test_document_serialization() {
        let mut doc = StoreDocument::new();
        doc.replace_devices(DeviceList::new(vec![Device::new("Router", 12.0, 24.0, 1).unwrap()]));
        let json = serde_json::to_string_pretty(&doc).unwrap();

        assert!(json.contains("\"devices\""));
        assert!(json.contains("\"settings\""));
        assert!(json.contains("Router"));

        let roundtrip: StoreDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.devices, doc.devices);
        assert_eq!(roundtrip.meta.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_missing_records_default() {
        let json = r#"{"meta": {"version": "0.1.0", "created": "2025-01-01T00:00:00Z", "modified": "2025-01-01T00:00:00Z"}}"#;
        let doc: StoreDocument = serde_json::from_str(json).unwrap();
        assert!(doc.devices.is_empty());
        assert_eq!(doc.settings, Settings::default());
    }
}
