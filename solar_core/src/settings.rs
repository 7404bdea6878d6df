//! # Settings
//!
//! Persisted defaults for the cable sizing form. Front ends fill any value
//! the user leaves out from here.
//!
//! ```rust
//! use solar_core::settings::Settings;
//!
//! let settings = Settings::default();
//! let input = settings.cable_input(15.0, 800.0);
//! assert_eq!(input.voltage_v, 24.0);
//! assert_eq!(input.drop_pct, 3.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::cable::{CableInput, InstallType};
use crate::conductors::ConductorMaterial;
use crate::errors::CalcResult;

/// Default sizing parameters.
///
/// Every field has a serde default, so settings written by an older version
/// with fewer fields still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Circuit type
    pub install_type: InstallType,
    /// System voltage (V)
    pub voltage_v: f64,
    /// Allowable drop (%)
    pub drop_pct: f64,
    /// Conductor material
    pub material: ConductorMaterial,
    /// Ambient temperature (°C)
    pub ambient_c: f64,
    /// Power factor
    pub power_factor: f64,
    /// Efficiency factor
    pub efficiency: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            install_type: InstallType::Dc,
            voltage_v: 24.0,
            drop_pct: 3.0,
            material: ConductorMaterial::Copper,
            ambient_c: 30.0,
            power_factor: 1.0,
            efficiency: 1.0,
        }
    }
}

impl Settings {
    /// Build a sizing input from these defaults for a given run and load.
    pub fn cable_input(&self, distance_m: f64, load_w: f64) -> CableInput {
        CableInput::new(
            self.install_type,
            distance_m,
            load_w,
            self.voltage_v,
            self.drop_pct,
            self.material,
        )
        .with_ambient(self.ambient_c)
        .with_power_factor(self.power_factor)
        .with_efficiency(self.efficiency)
    }

    /// Check the defaults would produce a valid sizing request.
    ///
    /// Uses a placeholder 1 m / 1 W circuit so only the stored fields are
    /// exercised.
    pub fn validate(&self) -> CalcResult<()> {
        self.cable_input(1.0, 1.0).validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_settings() {
        let settings = Settings {
            drop_pct: 12.0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            voltage_v: 0.0,
            ..Settings::default()
        };
        assert_eq!(settings.validate().unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_ambient_outside_range_rejected() {
        for ambient_c in [-20.1, 80.1, 1000.0] {
            let settings = Settings {
                ambient_c,
                ..Settings::default()
            };
            assert!(settings.validate().is_err(), "ambient {ambient_c}");
        }
        for ambient_c in [-20.0, 80.0] {
            let settings = Settings {
                ambient_c,
                ..Settings::default()
            };
            assert!(settings.validate().is_ok(), "ambient {ambient_c}");
        }
    }

    #[test]
    fn test_cable_input_carries_defaults() {
        let settings = Settings {
            install_type: InstallType::ThreePhase,
            voltage_v: 400.0,
            material: ConductorMaterial::Aluminum,
            ambient_c: 45.0,
            power_factor: 0.9,
            ..Settings::default()
        };
        let input = settings.cable_input(30.0, 10000.0);
        assert_eq!(input.install_type, InstallType::ThreePhase);
        assert_eq!(input.distance_m, 30.0);
        assert_eq!(input.load_w, 10000.0);
        assert_eq!(input.material, ConductorMaterial::Aluminum);
        assert_eq!(input.ambient_c, 45.0);
        assert_eq!(input.power_factor, 0.9);
        assert_eq!(input.ocpd_a, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"voltage_v": 48.0}"#).unwrap();
        assert_eq!(settings.voltage_v, 48.0);
        assert_eq!(settings.drop_pct, 3.0);
        assert_eq!(settings.install_type, InstallType::Dc);
    }
}
