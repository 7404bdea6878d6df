//! American Wire Gauge catalog
//!
//! The power-conductor sizes the planner selects from, ordered from the
//! smallest conductor (14 AWG) to the largest (4/0 AWG). Selection scans this
//! order, so `AwgSize::ALL` must stay ascending by area.
//!
//! | Size | Area (mm²) |   | Size | Area (mm²) |
//! |------|-----------:|---|------|-----------:|
//! | 14   | 2.08       |   | 1    | 42.41      |
//! | 12   | 3.31       |   | 1/0  | 53.49      |
//! | 10   | 5.26       |   | 2/0  | 67.43      |
//! | 8    | 8.37       |   | 3/0  | 85.01      |
//! | 6    | 13.30      |   | 4/0  | 107.2      |
//! | 4    | 21.15      |   |      |            |
//! | 3    | 26.67      |   |      |            |
//! | 2    | 33.62      |   |      |            |

use serde::{Deserialize, Serialize};

use crate::units::SqMm;

/// Standard AWG conductor size.
///
/// Variants are declared in catalog order; the discriminant is the catalog
/// index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AwgSize {
    #[serde(rename = "14")]
    Awg14,
    #[serde(rename = "12")]
    Awg12,
    #[serde(rename = "10")]
    Awg10,
    #[serde(rename = "8")]
    Awg8,
    #[serde(rename = "6")]
    Awg6,
    #[serde(rename = "4")]
    Awg4,
    #[serde(rename = "3")]
    Awg3,
    #[serde(rename = "2")]
    Awg2,
    #[serde(rename = "1")]
    Awg1,
    /// 1/0 ("one aught")
    #[serde(rename = "1/0")]
    Awg0,
    /// 2/0
    #[serde(rename = "2/0")]
    Awg00,
    /// 3/0
    #[serde(rename = "3/0")]
    Awg000,
    /// 4/0
    #[serde(rename = "4/0")]
    Awg0000,
}

impl AwgSize {
    /// Full catalog, smallest to largest conductor
    pub const ALL: [AwgSize; 13] = [
        AwgSize::Awg14,
        AwgSize::Awg12,
        AwgSize::Awg10,
        AwgSize::Awg8,
        AwgSize::Awg6,
        AwgSize::Awg4,
        AwgSize::Awg3,
        AwgSize::Awg2,
        AwgSize::Awg1,
        AwgSize::Awg0,
        AwgSize::Awg00,
        AwgSize::Awg000,
        AwgSize::Awg0000,
    ];

    /// Largest size in the catalog
    pub const LARGEST: AwgSize = AwgSize::Awg0000;

    /// Trade label, e.g. "12" or "4/0"
    pub fn label(&self) -> &'static str {
        match self {
            AwgSize::Awg14 => "14",
            AwgSize::Awg12 => "12",
            AwgSize::Awg10 => "10",
            AwgSize::Awg8 => "8",
            AwgSize::Awg6 => "6",
            AwgSize::Awg4 => "4",
            AwgSize::Awg3 => "3",
            AwgSize::Awg2 => "2",
            AwgSize::Awg1 => "1",
            AwgSize::Awg0 => "1/0",
            AwgSize::Awg00 => "2/0",
            AwgSize::Awg000 => "3/0",
            AwgSize::Awg0000 => "4/0",
        }
    }

    /// Nominal cross-sectional area in mm²
    pub fn area_mm2(&self) -> f64 {
        match self {
            AwgSize::Awg14 => 2.08,
            AwgSize::Awg12 => 3.31,
            AwgSize::Awg10 => 5.26,
            AwgSize::Awg8 => 8.37,
            AwgSize::Awg6 => 13.30,
            AwgSize::Awg4 => 21.15,
            AwgSize::Awg3 => 26.67,
            AwgSize::Awg2 => 33.62,
            AwgSize::Awg1 => 42.41,
            AwgSize::Awg0 => 53.49,
            AwgSize::Awg00 => 67.43,
            AwgSize::Awg000 => 85.01,
            AwgSize::Awg0000 => 107.2,
        }
    }

    /// Nominal area as a typed value
    pub fn area(&self) -> SqMm {
        SqMm(self.area_mm2())
    }

    /// Position in the catalog (0 = smallest conductor)
    pub fn index(self) -> usize {
        self as usize
    }

    /// The next larger conductor, or `None` at the top of the catalog
    pub fn next_larger(self) -> Option<AwgSize> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Smallest catalog size whose area is at least `area_mm2`.
    ///
    /// Returns `None` when even the largest size is too small.
    pub fn smallest_with_area(area_mm2: f64) -> Option<AwgSize> {
        Self::ALL.iter().copied().find(|size| size.area_mm2() >= area_mm2)
    }

    /// Look up a size by its label.
    ///
    /// Accepts "4/0", "4/0 AWG", "AWG 4/0", "#4", and the aught spellings
    /// "0", "00", "000", "0000".
    pub fn from_label(s: &str) -> Option<AwgSize> {
        let normalized = s
            .trim()
            .to_uppercase()
            .replace("AWG", "")
            .replace(['#', ' '], "");
        let size = match normalized.as_str() {
            "14" => AwgSize::Awg14,
            "12" => AwgSize::Awg12,
            "10" => AwgSize::Awg10,
            "8" => AwgSize::Awg8,
            "6" => AwgSize::Awg6,
            "4" => AwgSize::Awg4,
            "3" => AwgSize::Awg3,
            "2" => AwgSize::Awg2,
            "1" => AwgSize::Awg1,
            "1/0" | "0" => AwgSize::Awg0,
            "2/0" | "00" => AwgSize::Awg00,
            "3/0" | "000" => AwgSize::Awg000,
            "4/0" | "0000" => AwgSize::Awg0000,
            _ => return None,
        };
        Some(size)
    }
}

impl std::fmt::Display for AwgSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_ascending() {
        for pair in AwgSize::ALL.windows(2) {
            assert!(pair[0].area_mm2() < pair[1].area_mm2());
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(AwgSize::ALL.last().copied(), Some(AwgSize::LARGEST));
    }

    #[test]
    fn test_index_matches_catalog_position() {
        for (i, size) in AwgSize::ALL.iter().enumerate() {
            assert_eq!(size.index(), i);
        }
    }

    #[test]
    fn test_next_larger() {
        assert_eq!(AwgSize::Awg14.next_larger(), Some(AwgSize::Awg12));
        assert_eq!(AwgSize::Awg1.next_larger(), Some(AwgSize::Awg0));
        assert_eq!(AwgSize::Awg0000.next_larger(), None);
    }

    #[test]
    fn test_smallest_with_area() {
        assert_eq!(AwgSize::smallest_with_area(0.0), Some(AwgSize::Awg14));
        assert_eq!(AwgSize::smallest_with_area(2.08), Some(AwgSize::Awg14));
        assert_eq!(AwgSize::smallest_with_area(2.09), Some(AwgSize::Awg12));
        assert_eq!(AwgSize::smallest_with_area(100.0), Some(AwgSize::Awg0000));
        assert_eq!(AwgSize::smallest_with_area(107.3), None);
    }

    #[test]
    fn test_label_parsing() {
        for size in AwgSize::ALL {
            assert_eq!(AwgSize::from_label(size.label()), Some(size));
        }
        assert_eq!(AwgSize::from_label("4/0 AWG"), Some(AwgSize::Awg0000));
        assert_eq!(AwgSize::from_label("awg 10"), Some(AwgSize::Awg10));
        assert_eq!(AwgSize::from_label("#6"), Some(AwgSize::Awg6));
        assert_eq!(AwgSize::from_label("00"), Some(AwgSize::Awg00));
        assert_eq!(AwgSize::from_label("18"), None);
        assert_eq!(AwgSize::from_label("5/0"), None);
    }

    #[test]
    fn test_serialization_uses_labels() {
        let json = serde_json::to_string(&AwgSize::Awg00).unwrap();
        assert_eq!(json, "\"2/0\"");
        let roundtrip: AwgSize = serde_json::from_str("\"1/0\"").unwrap();
        assert_eq!(roundtrip, AwgSize::Awg0);
    }
}
