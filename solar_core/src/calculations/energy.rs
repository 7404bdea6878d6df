//! # Daily Energy Summary
//!
//! Totals a device list into daily energy and average power.
//!
//! ```text
//! E_device = P × duty_hours × count      (Wh/day)
//! E_total  = Σ E_device
//! P_avg    = E_total / 24 h
//! ```
//!
//! Device values are validated when the devices are built, so summarizing
//! cannot fail.

use serde::{Deserialize, Serialize};

use crate::devices::{Device, DeviceList, HOURS_PER_DAY};
use crate::units::{KilowattHours, WattHours};

/// Summary of a device list.
///
/// ## JSON Example
///
/// ```json
/// {
///   "total_wh_per_day": 1260.0,
///   "total_kwh_per_day": 1.26,
///   "avg_power_w": 52.5,
///   "device_count": 2
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergySummary {
    pub total_wh_per_day: f64,
    pub total_kwh_per_day: f64,
    pub avg_power_w: f64,
    /// Number of device entries (not units)
    pub device_count: usize,
}

/// Summarize a device list.
pub fn summarize(list: &DeviceList) -> EnergySummary {
    summarize_devices(&list.devices)
}

/// Summarize a slice of devices.
pub fn summarize_devices(devices: &[Device]) -> EnergySummary {
    let total: WattHours = devices.iter().map(Device::daily_energy).sum();
    EnergySummary {
        total_wh_per_day: total.value(),
        total_kwh_per_day: KilowattHours::from(total).value(),
        avg_power_w: total.value() / HOURS_PER_DAY,
        device_count: devices.len(),
    }
}
