//! # Unit Types
//!
//! Type-safe wrappers for the electrical and energy units used by the
//! planner. They are plain f64 newtypes: cheap, `Copy`, and serialized as
//! bare numbers.
//!
//! ## SI Units
//!
//! The planner works in SI throughout:
//! - Length: meters (m)
//! - Area: square millimeters (mm²) for conductors, square meters (m²) in formulas
//! - Resistivity: ohm-meters (Ω·m)
//! - Power: watts (W)
//! - Energy: watt-hours (Wh), kilowatt-hours (kWh)
//!
//! ## Example
//!
//! ```rust
//! use solar_core::units::{SqMm, SqM, WattHours, KilowattHours};
//!
//! let area: SqM = SqMm(13.30).into();
//! assert!((area.0 - 13.30e-6).abs() < 1e-15);
//!
//! let daily: KilowattHours = WattHours(1260.0).into();
//! assert!((daily.0 - 1.26).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Area Units
// ============================================================================

/// Area in square millimeters (conductor catalogs)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMm(pub f64);

/// Area in square meters (resistance formulas)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqM(pub f64);

impl From<SqMm> for SqM {
    fn from(mm2: SqMm) -> Self {
        SqM(mm2.0 / 1e6)
    }
}

impl From<SqM> for SqMm {
    fn from(m2: SqM) -> Self {
        SqMm(m2.0 * 1e6)
    }
}

// ============================================================================
// Energy Units
// ============================================================================

/// Energy in watt-hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WattHours(pub f64);

/// Energy in kilowatt-hours (1 kWh = 1000 Wh)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilowattHours(pub f64);

impl From<WattHours> for KilowattHours {
    fn from(wh: WattHours) -> Self {
        KilowattHours(wh.0 / 1000.0)
    }
}

impl From<KilowattHours> for WattHours {
    fn from(kwh: KilowattHours) -> Self {
        WattHours(kwh.0 * 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(SqMm);
impl_arithmetic!(SqM);
impl_arithmetic!(WattHours);
impl_arithmetic!(KilowattHours);

impl std::iter::Sum for WattHours {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(WattHours(0.0), |acc, wh| acc + wh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_conversion() {
        let m2: SqM = SqMm(107.2).into();
        assert!((m2.0 - 1.072e-4).abs() < 1e-12);

        let back: SqMm = m2.into();
        assert!((back.0 - 107.2).abs() < 1e-9);
    }

    #[test]
    fn test_energy_conversion() {
        let kwh: KilowattHours = WattHours(2500.0).into();
        assert_eq!(kwh.0, 2.5);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = WattHours(300.0);
        let b = WattHours(960.0);
        assert_eq!((a + b).0, 1260.0);
        assert_eq!((b - a).0, 660.0);
        assert_eq!((a * 2.0).0, 600.0);
        assert_eq!((b / 24.0).0, 40.0);

        let total: WattHours = vec![a, b].into_iter().sum();
        assert_eq!(total.0, 1260.0);
    }

    #[test]
    fn test_serialization() {
        let area = SqMm(13.3);
        let json = serde_json::to_string(&area).unwrap();
        assert_eq!(json, "13.3");

        let roundtrip: SqMm = serde_json::from_str(&json).unwrap();
        assert_eq!(area, roundtrip);
    }
}
