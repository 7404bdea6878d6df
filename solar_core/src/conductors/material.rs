//! Conductor materials and the linear resistivity model.
//!
//! ```text
//! ρ(T) = ρ20 × (1 + α × (T − 20 °C))
//! ```
//!
//! | Material | ρ20 (Ω·m)  | α (1/°C) |
//! |----------|------------|----------|
//! | Copper   | 1.724e-8   | 0.00393  |
//! | Aluminum | 2.826e-8   | 0.00403  |
//!
//! The model is linear and unbounded; callers restrict ambient temperature
//! at the input boundary.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Reference temperature for the tabulated resistivities (°C)
pub const REFERENCE_TEMP_C: f64 = 20.0;

/// Conductor material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConductorMaterial {
    /// Copper
    #[default]
    #[serde(rename = "Cu")]
    Copper,
    /// Aluminum
    #[serde(rename = "Al")]
    Aluminum,
}

impl ConductorMaterial {
    /// All materials for UI selection
    pub const ALL: [ConductorMaterial; 2] = [ConductorMaterial::Copper, ConductorMaterial::Aluminum];

    /// Resistivity at 20 °C (Ω·m)
    pub fn rho20_ohm_m(&self) -> f64 {
        match self {
            ConductorMaterial::Copper => 1.724e-8,
            ConductorMaterial::Aluminum => 2.826e-8,
        }
    }

    /// Temperature coefficient of resistance α (1/°C)
    pub fn alpha_per_c(&self) -> f64 {
        match self {
            ConductorMaterial::Copper => 0.00393,
            ConductorMaterial::Aluminum => 0.00403,
        }
    }

    /// Flat ampacity derate relative to the copper table
    pub fn ampacity_factor(&self) -> f64 {
        match self {
            ConductorMaterial::Copper => 1.0,
            ConductorMaterial::Aluminum => 0.8,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "Copper",
            ConductorMaterial::Aluminum => "Aluminum",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "CU" | "COPPER" => Ok(ConductorMaterial::Copper),
            "AL" | "ALU" | "ALUMINUM" | "ALUMINIUM" => Ok(ConductorMaterial::Aluminum),
            _ => Err(CalcError::invalid_input("material", s, "expected Cu or Al")),
        }
    }
}

impl std::fmt::Display for ConductorMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Resistivity of `material` at `temperature_c` (Ω·m).
pub fn resistivity(material: ConductorMaterial, temperature_c: f64) -> f64 {
    material.rho20_ohm_m() * (1.0 + material.alpha_per_c() * (temperature_c - REFERENCE_TEMP_C))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values_at_20c() {
        assert_eq!(resistivity(ConductorMaterial::Copper, 20.0), 1.724e-8);
        assert_eq!(resistivity(ConductorMaterial::Aluminum, 20.0), 2.826e-8);
    }

    #[test]
    fn test_temperature_coefficient() {
        // Cu at 30 °C: 1.724e-8 × 1.0393
        let rho = resistivity(ConductorMaterial::Copper, 30.0);
        assert!((rho - 1.724e-8 * 1.0393).abs() < 1e-18);

        // Al at 0 °C drops below its 20 °C value
        let rho_cold = resistivity(ConductorMaterial::Aluminum, 0.0);
        assert!((rho_cold - 2.826e-8 * (1.0 - 0.0806)).abs() < 1e-18);
    }

    #[test]
    fn test_aluminum_more_resistive_than_copper() {
        for t in [-20.0, 0.0, 30.0, 80.0] {
            assert!(
                resistivity(ConductorMaterial::Aluminum, t) > resistivity(ConductorMaterial::Copper, t)
            );
        }
    }

    #[test]
    fn test_material_parsing_and_serde() {
        assert_eq!(ConductorMaterial::from_str_flexible("cu").unwrap(), ConductorMaterial::Copper);
        assert_eq!(
            ConductorMaterial::from_str_flexible("Aluminium").unwrap(),
            ConductorMaterial::Aluminum
        );
        assert!(ConductorMaterial::from_str_flexible("gold").is_err());

        let json = serde_json::to_string(&ConductorMaterial::Aluminum).unwrap();
        assert_eq!(json, "\"Al\"");
    }
}
