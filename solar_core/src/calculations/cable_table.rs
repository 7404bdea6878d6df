//! # Per-Gauge Comparison Table
//!
//! Evaluates every catalog size against a circuit so a front end can show
//! why the engine picked what it picked. Uses the same primitives as
//! [`size_cable`](super::cable::size_cable), but it only reports and never
//! feeds back into the selection.

use serde::{Deserialize, Serialize};

use super::cable::{drop_pct_for_gauge, load_current, loop_resistance_ohm, CableInput, CONTINUOUS_LOAD_FACTOR};
use crate::conductors::{ampacity, resistivity, AwgSize};
use crate::errors::CalcResult;

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeReportRow {
    /// Conductor size
    pub awg: AwgSize,
    /// Nominal area (mm²)
    pub area_mm2: f64,
    /// Loop resistance at 20 °C (Ω)
    pub r20_total_ohm: f64,
    /// Loop resistance at ambient (Ω)
    pub rt_total_ohm: f64,
    /// Voltage drop (V)
    pub drop_v: f64,
    /// Voltage drop (%)
    pub drop_pct: f64,
    /// Derated ampacity (A)
    pub ampacity_a: f64,
    /// Meets both the drop limit and the 125% ampacity check
    pub passes: bool,
}

/// Build the comparison table for all catalog sizes, smallest first.
pub fn gauge_report(input: &CableInput) -> CalcResult<Vec<GaugeReportRow>> {
    input.validate()?;

    let current_a = load_current(input);
    let rho20 = input.material.rho20_ohm_m();
    let rho_t = resistivity(input.material, input.ambient_c);
    let required_ampacity_a = CONTINUOUS_LOAD_FACTOR * current_a;

    let rows = AwgSize::ALL
        .iter()
        .map(|&awg| {
            let rt_total_ohm = loop_resistance_ohm(input, awg, rho_t);
            let drop_pct = drop_pct_for_gauge(input, current_a, awg);
            let ampacity_a = ampacity(awg, input.ambient_c, input.material);
            GaugeReportRow {
                awg,
                area_mm2: awg.area_mm2(),
                r20_total_ohm: loop_resistance_ohm(input, awg, rho20),
                rt_total_ohm,
                drop_v: current_a * rt_total_ohm,
                drop_pct,
                ampacity_a,
                passes: drop_pct <= input.drop_pct && ampacity_a >= required_ampacity_a,
            }
        })
        .collect();

    Ok(rows)
}

/// Rows that pass both checks.
pub fn passing_rows(rows: &[GaugeReportRow]) -> Vec<&GaugeReportRow> {
    rows.iter().filter(|row| row.passes).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::cable::{size_cable, InstallType};
    use crate::conductors::ConductorMaterial;

    fn reference_dc() -> CableInput {
        CableInput::new(InstallType::Dc, 10.0, 500.0, 24.0, 3.0, ConductorMaterial::Copper)
    }

    #[test]
    fn test_covers_whole_catalog_in_order() {
        let rows = gauge_report(&reference_dc()).unwrap();
        assert_eq!(rows.len(), AwgSize::ALL.len());
        for (row, size) in rows.iter().zip(AwgSize::ALL) {
            assert_eq!(row.awg, size);
        }
    }

    #[test]
    fn test_smallest_passing_row_matches_engine() {
        let inputs = [
            reference_dc(),
            reference_dc().with_ambient(65.0),
            CableInput::new(InstallType::ThreePhase, 40.0, 15000.0, 400.0, 2.0, ConductorMaterial::Aluminum)
                .with_power_factor(0.85),
        ];
        for input in inputs {
            let rows = gauge_report(&input).unwrap();
            let first_pass = passing_rows(&rows).first().map(|row| row.awg);
            assert_eq!(first_pass, Some(size_cable(&input).unwrap().awg));
        }
    }

    #[test]
    fn test_row_values() {
        let rows = gauge_report(&reference_dc()).unwrap();
        let row = rows.iter().find(|r| r.awg == AwgSize::Awg6).unwrap();

        // 20 m of 13.30 mm² copper at 20 °C
        let r20 = 1.724e-8 * 20.0 / 13.30e-6;
        assert!((row.r20_total_ohm - r20).abs() < 1e-9);
        assert!(row.rt_total_ohm > row.r20_total_ohm);
        assert!((row.drop_pct - row.drop_v / 24.0 * 100.0).abs() < 1e-9);
        assert_eq!(row.ampacity_a, 65.0);
        assert!(row.passes);

        // 14 AWG fails both checks here
        assert!(!rows[0].passes);
    }

    #[test]
    fn test_no_passing_rows_when_infeasible() {
        let input = CableInput::new(InstallType::Dc, 100.0, 10000.0, 1.0, 0.1, ConductorMaterial::Copper);
        let rows = gauge_report(&input).unwrap();
        assert_eq!(rows.len(), 13);
        assert!(passing_rows(&rows).is_empty());
    }

    #[test]
    fn test_rejects_invalid_input() {
        let input = CableInput {
            voltage_v: -1.0,
            ..reference_dc()
        };
        assert!(gauge_report(&input).is_err());
        assert!(gauge_report(&reference_dc().with_ambient(-300.0)).is_err());
    }
}
