//! # Planning Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` / `*Summary` - Results (JSON-serializable)
//! - a pure function from input to result
//!
//! All functions are stateless and hold no shared state, so they can be
//! called from any number of threads at once.
//!
//! ## Available Calculations
//!
//! - [`cable`] - Minimum AWG conductor for voltage drop and ampacity
//! - [`cable_table`] - Per-gauge comparison table for a circuit
//! - [`energy`] - Daily energy summary of a device list

pub mod cable;
pub mod cable_table;
pub mod energy;

// Re-export commonly used types
pub use cable::{
    drop_pct_for_gauge, load_current, required_area_mm2, size_cable, CableInput, CableResult, InstallType,
};
pub use cable_table::{gauge_report, passing_rows, GaugeReportRow};
pub use energy::{summarize, summarize_devices, EnergySummary};
