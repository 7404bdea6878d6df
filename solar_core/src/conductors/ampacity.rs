//! Conductor ampacity
//!
//! Base ratings are a deliberately conservative single-conductor copper THHN
//! table at a 30 °C reference ambient. Aluminum takes a flat 0.8 derate
//! instead of its own table.
//!
//! ## Temperature Correction
//!
//! Stepped, never interpolated. Each tier includes its upper bound:
//!
//! | Ambient (°C)   | Factor |
//! |----------------|--------|
//! | ≤ 30           | 1.00   |
//! | 30 < T ≤ 40    | 0.91   |
//! | 40 < T ≤ 50    | 0.82   |
//! | 50 < T ≤ 60    | 0.71   |
//! | > 60           | 0.60   |
//!
//! ## Reference
//!
//! Approximates NEC 310.15(B)(1) ambient correction for 90 °C insulation.
//! Values must be verified against local code before use.

use super::awg::AwgSize;
use super::material::ConductorMaterial;

/// Reference ambient for the base table (°C)
pub const BASE_AMBIENT_C: f64 = 30.0;

/// Base ampacity (A) for copper THHN at 30 °C.
pub fn base_ampacity_a(size: AwgSize) -> f64 {
    match size {
        AwgSize::Awg14 => 20.0,
        AwgSize::Awg12 => 25.0,
        AwgSize::Awg10 => 35.0,
        AwgSize::Awg8 => 50.0,
        AwgSize::Awg6 => 65.0,
        AwgSize::Awg4 => 85.0,
        AwgSize::Awg3 => 100.0,
        AwgSize::Awg2 => 115.0,
        AwgSize::Awg1 => 130.0,
        AwgSize::Awg0 => 150.0,
        AwgSize::Awg00 => 175.0,
        AwgSize::Awg000 => 200.0,
        AwgSize::Awg0000 => 230.0,
    }
}

/// Ambient temperature correction factor.
pub fn temperature_factor(ambient_c: f64) -> f64 {
    if ambient_c <= BASE_AMBIENT_C {
        1.0
    } else if ambient_c <= 40.0 {
        0.91
    } else if ambient_c <= 50.0 {
        0.82
    } else if ambient_c <= 60.0 {
        0.71
    } else {
        0.6
    }
}

/// Derated ampacity (A) of `size` at `ambient_c` for `material`.
pub fn ampacity(size: AwgSize, ambient_c: f64, material: ConductorMaterial) -> f64 {
    base_ampacity_a(size) * temperature_factor(ambient_c) * material.ampacity_factor()
}

/// Ampacity looked up by gauge label. Labels outside the catalog rate as 0 A,
/// which no positive current requirement can satisfy.
pub fn ampacity_for_label(label: &str, ambient_c: f64, material: ConductorMaterial) -> f64 {
    AwgSize::from_label(label).map_or(0.0, |size| ampacity(size, ambient_c, material))
}
