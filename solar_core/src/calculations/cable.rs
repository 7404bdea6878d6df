//! # Cable Sizing
//!
//! Selects the smallest AWG conductor for a DC, single-phase or three-phase
//! circuit that satisfies both a voltage-drop limit and a continuous-load
//! ampacity check, and suggests a grounding conductor.
//!
//! ## Method
//!
//! ```text
//! I      = P / (V × PF × η)            DC, 1φ
//! I      = P / (√3 × V × PF × η)       3φ
//! A_min  = ρ(T) × k × L × I / ΔV_max   k = 2 (DC, 1φ) or √3 (3φ)
//! ```
//!
//! 1. Pick the smallest catalog gauge with area ≥ `A_min`.
//! 2. Walk up the catalog until the gauge carries 125% of `I` at the given
//!    ambient and material, and its own drop (from its fixed area) is within
//!    the limit.
//!
//! The area estimate is continuous but gauges are discrete, and ampacity
//! derating is a step function of temperature, so the second pass is needed.
//!
//! ## Assumptions
//!
//! - Resistive drop only (no reactance or skin effect)
//! - Uniform current over the whole run
//! - Conductor at ambient temperature
//!
//! ## Example
//!
//! ```rust
//! use solar_core::calculations::cable::{size_cable, CableInput, InstallType};
//! use solar_core::conductors::{AwgSize, ConductorMaterial};
//!
//! let input = CableInput::new(InstallType::Dc, 10.0, 500.0, 24.0, 3.0, ConductorMaterial::Copper)
//!     .with_ocpd(30.0);
//!
//! let result = size_cable(&input).unwrap();
//! assert_eq!(result.awg, AwgSize::Awg6);
//! assert!(result.drop_pct <= 3.0);
//! assert_eq!(result.grounding_awg, Some(AwgSize::Awg10));
//! ```

use serde::{Deserialize, Serialize};

use crate::conductors::{ampacity, recommend_ground, resistivity, AwgSize, ConductorMaterial};
use crate::errors::{CalcError, CalcResult};
use crate::units::{SqM, SqMm};

/// Conductors are sized for 125% of the continuous load current
pub const CONTINUOUS_LOAD_FACTOR: f64 = 1.25;

/// Upper bound for the allowable voltage drop (%)
pub const MAX_DROP_PCT: f64 = 10.0;

/// Accepted ambient range (°C). The linear resistivity model is only used
/// inside it.
pub const MIN_AMBIENT_C: f64 = -20.0;
pub const MAX_AMBIENT_C: f64 = 80.0;

/// Circuit type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InstallType {
    /// Two-wire DC circuit
    #[default]
    #[serde(rename = "DC")]
    Dc,
    /// Single-phase AC
    #[serde(rename = "AC_1PH")]
    SinglePhase,
    /// Balanced three-phase AC
    #[serde(rename = "AC_3PH")]
    ThreePhase,
}

impl InstallType {
    /// All install types for UI selection
    pub const ALL: [InstallType; 3] = [
        InstallType::Dc,
        InstallType::SinglePhase,
        InstallType::ThreePhase,
    ];

    /// Multiplier from one-way distance to effective conductor length.
    ///
    /// Round trip (2.0) for DC and single-phase, √3 for three-phase.
    pub fn path_factor(&self) -> f64 {
        match self {
            InstallType::Dc | InstallType::SinglePhase => 2.0,
            InstallType::ThreePhase => 3f64.sqrt(),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            InstallType::Dc => "DC",
            InstallType::SinglePhase => "Single-phase AC",
            InstallType::ThreePhase => "Three-phase AC",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "DC" => Ok(InstallType::Dc),
            "AC_1PH" | "AC1" | "AC1PH" | "1PH" | "SINGLE" | "SINGLE_PHASE" => Ok(InstallType::SinglePhase),
            "AC_3PH" | "AC3" | "AC3PH" | "3PH" | "THREE" | "THREE_PHASE" => Ok(InstallType::ThreePhase),
            _ => Err(CalcError::invalid_input(
                "install_type",
                s,
                "expected DC, AC_1PH or AC_3PH",
            )),
        }
    }
}

impl std::fmt::Display for InstallType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn default_ambient_c() -> f64 {
    30.0
}

fn default_unity() -> f64 {
    1.0
}

/// Circuit parameters for a sizing request.
///
/// ## JSON Example
///
/// ```json
/// {
///   "install_type": "DC",
///   "distance_m": 10.0,
///   "load_w": 500.0,
///   "voltage_v": 24.0,
///   "drop_pct": 3.0,
///   "material": "Cu",
///   "ambient_c": 30.0,
///   "power_factor": 1.0,
///   "efficiency": 1.0,
///   "ocpd_a": 30.0
/// }
/// ```
///
/// `ambient_c`, `power_factor`, `efficiency` and `ocpd_a` may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableInput {
    /// Circuit type
    pub install_type: InstallType,

    /// One-way run length in meters
    pub distance_m: f64,

    /// Load power in watts
    pub load_w: f64,

    /// Nominal circuit voltage in volts
    pub voltage_v: f64,

    /// Allowable voltage drop in percent, (0, 10]
    pub drop_pct: f64,

    /// Conductor material
    pub material: ConductorMaterial,

    /// Ambient temperature in °C
    #[serde(default = "default_ambient_c")]
    pub ambient_c: f64,

    /// Power factor, (0, 1]. Use 1.0 for DC.
    #[serde(default = "default_unity")]
    pub power_factor: f64,

    /// Additional efficiency factor (inverter, controller), (0, 1]
    #[serde(default = "default_unity")]
    pub efficiency: f64,

    /// Overcurrent protection device rating in amperes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocpd_a: Option<f64>,
}

impl CableInput {
    /// Create an input with default ambient (30 °C), unity power factor and
    /// efficiency, and no OCPD.
    pub fn new(
        install_type: InstallType,
        distance_m: f64,
        load_w: f64,
        voltage_v: f64,
        drop_pct: f64,
        material: ConductorMaterial,
    ) -> Self {
        CableInput {
            install_type,
            distance_m,
            load_w,
            voltage_v,
            drop_pct,
            material,
            ambient_c: default_ambient_c(),
            power_factor: 1.0,
            efficiency: 1.0,
            ocpd_a: None,
        }
    }

    /// Set the ambient temperature (°C)
    pub fn with_ambient(mut self, ambient_c: f64) -> Self {
        self.ambient_c = ambient_c;
        self
    }

    /// Set the power factor
    pub fn with_power_factor(mut self, power_factor: f64) -> Self {
        self.power_factor = power_factor;
        self
    }

    /// Set the efficiency factor
    pub fn with_efficiency(mut self, efficiency: f64) -> Self {
        self.efficiency = efficiency;
        self
    }

    /// Set the OCPD rating (A) used for the grounding suggestion
    pub fn with_ocpd(mut self, ocpd_a: f64) -> Self {
        self.ocpd_a = Some(ocpd_a);
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("distance_m", self.distance_m),
            ("load_w", self.load_w),
            ("voltage_v", self.voltage_v),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), "must be > 0"));
            }
        }
        if !(self.drop_pct > 0.0 && self.drop_pct <= MAX_DROP_PCT) {
            return Err(CalcError::invalid_input(
                "drop_pct",
                self.drop_pct.to_string(),
                "Allowable drop must be between 0 and 10%",
            ));
        }
        for (field, value) in [
            ("power_factor", self.power_factor),
            ("efficiency", self.efficiency),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "must be in (0, 1]",
                ));
            }
        }
        if !(MIN_AMBIENT_C..=MAX_AMBIENT_C).contains(&self.ambient_c) {
            return Err(CalcError::invalid_input(
                "ambient_c",
                self.ambient_c.to_string(),
                "Ambient temperature must be between -20 and 80 °C",
            ));
        }
        Ok(())
    }

    /// Maximum allowed drop in volts
    pub fn max_drop_v(&self) -> f64 {
        self.voltage_v * (self.drop_pct / 100.0)
    }

    /// Effective conductor length (m) the current flows through
    pub fn path_length_m(&self) -> f64 {
        self.install_type.path_factor() * self.distance_m
    }
}

/// Results from a cable sizing request.
///
/// ## JSON Example
///
/// ```json
/// {
///   "awg": "6",
///   "area_mm2": 13.3,
///   "current_a": 20.83,
///   "drop_pct": 2.34,
///   "ampacity_a": 65.0,
///   "required_ampacity_a": 26.04,
///   "ampacity_margin_pct": 149.6,
///   "grounding_awg": "10"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableResult {
    /// Selected conductor size
    pub awg: AwgSize,

    /// Area of the selected conductor (mm²)
    pub area_mm2: f64,

    /// Load current (A)
    pub current_a: f64,

    /// Achieved voltage drop with the selected conductor (%)
    pub drop_pct: f64,

    /// Ampacity of the selected conductor at ambient and material (A)
    pub ampacity_a: f64,

    /// Continuous-load requirement, 125% of the load current (A)
    pub required_ampacity_a: f64,

    /// (ampacity − required) / required × 100
    pub ampacity_margin_pct: f64,

    /// Suggested copper grounding conductor, when an OCPD rating was given
    pub grounding_awg: Option<AwgSize>,
}

/// Load current (A), never negative.
pub fn load_current(input: &CableInput) -> f64 {
    let denom = match input.install_type {
        InstallType::ThreePhase => 3f64.sqrt() * input.voltage_v * input.power_factor * input.efficiency,
        InstallType::Dc | InstallType::SinglePhase => {
            input.voltage_v * input.power_factor * input.efficiency
        }
    };
    (input.load_w / denom).max(0.0)
}

/// Minimum conductor area (mm²) that keeps the drop within the limit.
pub fn required_area_mm2(input: &CableInput, current_a: f64) -> f64 {
    let rho = resistivity(input.material, input.ambient_c);
    let area = SqM(rho * input.path_length_m() * current_a / input.max_drop_v());
    SqMm::from(area).value()
}

/// Total loop resistance (Ω) of `size` for resistivity `rho_ohm_m`.
pub fn loop_resistance_ohm(input: &CableInput, size: AwgSize, rho_ohm_m: f64) -> f64 {
    let area = SqM::from(size.area());
    rho_ohm_m * input.path_length_m() / area.value()
}

/// Voltage drop (%) produced by `current_a` through conductor `size`.
pub fn drop_pct_for_gauge(input: &CableInput, current_a: f64, size: AwgSize) -> f64 {
    let rho = resistivity(input.material, input.ambient_c);
    let v_drop = current_a * loop_resistance_ohm(input, size, rho);
    v_drop / input.voltage_v * 100.0
}

/// Size a cable.
///
/// # Returns
///
/// * `Ok(CableResult)` - Smallest gauge meeting drop and ampacity
/// * `Err(CalcError::InvalidInput)` - Parameters out of range
/// * `Err(CalcError::DropInfeasible)` - Even 4/0 is too small for the drop limit
/// * `Err(CalcError::ConstraintsUnmet)` - Upsizing ran out of catalog sizes
pub fn size_cable(input: &CableInput) -> CalcResult<CableResult> {
    input.validate()?;

    let current_a = load_current(input);
    let area_needed = required_area_mm2(input, current_a);
    let first = AwgSize::smallest_with_area(area_needed).ok_or(CalcError::DropInfeasible {
        area_needed_mm2: area_needed,
        largest_area_mm2: AwgSize::LARGEST.area_mm2(),
    })?;

    let required_ampacity_a = CONTINUOUS_LOAD_FACTOR * current_a;

    let mut candidate = Some(first);
    while let Some(awg) = candidate {
        let ampacity_a = ampacity(awg, input.ambient_c, input.material);
        let drop_pct = drop_pct_for_gauge(input, current_a, awg);
        if ampacity_a >= required_ampacity_a && drop_pct <= input.drop_pct {
            return Ok(CableResult {
                awg,
                area_mm2: awg.area_mm2(),
                current_a,
                drop_pct,
                ampacity_a,
                required_ampacity_a,
                ampacity_margin_pct: (ampacity_a - required_ampacity_a) / required_ampacity_a * 100.0,
                grounding_awg: recommend_ground(input.ocpd_a),
            });
        }
        candidate = awg.next_larger();
    }

    Err(CalcError::ConstraintsUnmet {
        required_ampacity_a,
        allowed_drop_pct: input.drop_pct,
    })
}
