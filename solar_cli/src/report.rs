//! Plain-text reports for the terminal.

use std::io::{self, Write};

use solar_core::calculations::cable::{CableInput, CableResult};
use solar_core::calculations::cable_table::{passing_rows, GaugeReportRow};
use solar_core::calculations::energy::EnergySummary;
use solar_core::devices::DeviceList;
use solar_core::settings::Settings;

const RULE: &str = "═══════════════════════════════════════";

pub fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

fn banner(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "  {title}")?;
    writeln!(out, "{RULE}")
}

pub fn cable_report(
    out: &mut impl Write,
    input: &CableInput,
    result: &CableResult,
) -> io::Result<()> {
    banner(out, "CABLE SIZING RESULTS")?;
    writeln!(out)?;
    writeln!(out, "Input:")?;
    writeln!(out, "  Circuit:    {}", input.install_type)?;
    writeln!(out, "  Load:       {:.0} W @ {:.1} V", input.load_w, input.voltage_v)?;
    writeln!(out, "  Distance:   {:.1} m one-way", input.distance_m)?;
    writeln!(out, "  Material:   {}", input.material)?;
    writeln!(out, "  Ambient:    {:.1} °C", input.ambient_c)?;
    writeln!(out, "  PF / eff:   {:.2} / {:.2}", input.power_factor, input.efficiency)?;
    writeln!(out, "  Drop limit: {:.2} %", input.drop_pct)?;
    writeln!(out)?;
    writeln!(out, "Checks:")?;
    writeln!(
        out,
        "  Voltage drop: {:.2} % (limit {:.2} %) {}",
        result.drop_pct,
        input.drop_pct,
        status_icon(result.drop_pct <= input.drop_pct)
    )?;
    writeln!(
        out,
        "  Ampacity:     {:.1} A (need {:.1} A, margin {:.1} %) {}",
        result.ampacity_a,
        result.required_ampacity_a,
        result.ampacity_margin_pct,
        status_icon(result.ampacity_a >= result.required_ampacity_a)
    )?;
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "  RESULT: {} AWG ({:.2} mm²), I = {:.2} A",
        result.awg, result.area_mm2, result.current_a
    )?;
    if let Some(ground) = result.grounding_awg {
        writeln!(out, "  Grounding: {} AWG Cu", ground)?;
    }
    writeln!(out, "{RULE}")
}

/// Comparison table. Shows passing rows only unless `all` is set; when
/// nothing passes, every row is shown with a warning line.
pub fn gauge_table(out: &mut impl Write, rows: &[GaugeReportRow], all: bool) -> io::Result<()> {
    let passing = passing_rows(rows);
    let shown: Vec<&GaugeReportRow> = if all || passing.is_empty() {
        rows.iter().collect()
    } else {
        passing
    };

    if !all && shown.iter().all(|row| !row.passes) {
        writeln!(out, "WARNING: no gauge meets both checks; showing all sizes")?;
    }

    writeln!(
        out,
        "{:>5}  {:>8}  {:>9}  {:>9}  {:>8}  {:>7}  {:>8}  Status",
        "AWG", "mm²", "R20 (Ω)", "RT (Ω)", "Drop V", "Drop %", "Amp (A)"
    )?;
    for row in shown {
        writeln!(
            out,
            "{:>5}  {:>8.2}  {:>9.4}  {:>9.4}  {:>8.3}  {:>7.2}  {:>8.1}  {}",
            row.awg.label(),
            row.area_mm2,
            row.r20_total_ohm,
            row.rt_total_ohm,
            row.drop_v,
            row.drop_pct,
            row.ampacity_a,
            status_icon(row.passes)
        )?;
    }
    Ok(())
}

pub fn device_table(out: &mut impl Write, devices: &DeviceList) -> io::Result<()> {
    if devices.is_empty() {
        return writeln!(out, "No devices.");
    }
    writeln!(
        out,
        "{:<36}  {:<20}  {:>8}  {:>6}  {:>5}  {:>9}",
        "ID", "Name", "Power W", "h/day", "Count", "Wh/day"
    )?;
    for device in devices.iter() {
        writeln!(
            out,
            "{:<36}  {:<20}  {:>8.1}  {:>6.2}  {:>5}  {:>9.1}",
            device.id,
            device.name,
            device.power_w,
            device.duty_hours_per_day,
            device.count,
            device.daily_wh()
        )?;
    }
    Ok(())
}

pub fn energy_report(
    out: &mut impl Write,
    devices: &DeviceList,
    summary: &EnergySummary,
) -> io::Result<()> {
    banner(out, "DAILY ENERGY SUMMARY")?;
    writeln!(out)?;
    device_table(out, devices)?;
    writeln!(out)?;
    writeln!(out, "Totals:")?;
    writeln!(
        out,
        "  Energy:        {:.1} Wh/day ({:.3} kWh/day)",
        summary.total_wh_per_day, summary.total_kwh_per_day
    )?;
    writeln!(out, "  Average power: {:.1} W", summary.avg_power_w)?;
    writeln!(out, "  Devices:       {}", summary.device_count)
}

pub fn settings_report(out: &mut impl Write, settings: &Settings) -> io::Result<()> {
    writeln!(out, "Sizing defaults:")?;
    writeln!(out, "  Circuit:      {}", settings.install_type)?;
    writeln!(out, "  Voltage:      {:.1} V", settings.voltage_v)?;
    writeln!(out, "  Drop limit:   {:.2} %", settings.drop_pct)?;
    writeln!(out, "  Material:     {}", settings.material)?;
    writeln!(out, "  Ambient:      {:.1} °C", settings.ambient_c)?;
    writeln!(out, "  Power factor: {:.2}", settings.power_factor)?;
    writeln!(out, "  Efficiency:   {:.2}", settings.efficiency)
}
