//! Equipment grounding conductor suggestion
//!
//! Maps the overcurrent protection device (OCPD) rating to a minimum copper
//! grounding conductor, loosely after NEC Table 250.122. The table is scanned
//! in ascending ceiling order; ratings above the last ceiling get 2/0.

use super::awg::AwgSize;

/// (OCPD ceiling in amperes, minimum Cu grounding conductor)
pub const GROUND_CU_FOR_OCPD: [(f64, AwgSize); 9] = [
    (20.0, AwgSize::Awg12),
    (60.0, AwgSize::Awg10),
    (100.0, AwgSize::Awg8),
    (200.0, AwgSize::Awg6),
    (300.0, AwgSize::Awg4),
    (400.0, AwgSize::Awg3),
    (600.0, AwgSize::Awg2),
    (800.0, AwgSize::Awg1),
    (1100.0, AwgSize::Awg0),
];

/// Used above the largest tabulated ceiling
pub const GROUND_FALLBACK: AwgSize = AwgSize::Awg00;

/// Recommend a copper grounding conductor for an OCPD rating.
///
/// Absent, zero, negative or NaN ratings give `None`.
pub fn recommend_ground(ocpd_a: Option<f64>) -> Option<AwgSize> {
    let ocpd_a = ocpd_a.filter(|a| *a > 0.0)?;
    let size = GROUND_CU_FOR_OCPD
        .iter()
        .find(|(ceiling, _)| ocpd_a <= *ceiling)
        .map_or(GROUND_FALLBACK, |(_, size)| *size);
    Some(size)
}
