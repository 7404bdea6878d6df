//! # solar_core - Off-Grid Solar Planning Engine
//!
//! `solar_core` is the computational heart of Solar Planner: conductor sizing
//! for DC and AC circuits, and daily energy budgeting from a device list.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Calculations are pure functions from input to result
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use solar_core::calculations::cable::{size_cable, CableInput, InstallType};
//! use solar_core::conductors::ConductorMaterial;
//!
//! let input = CableInput::new(InstallType::Dc, 10.0, 500.0, 24.0, 3.0, ConductorMaterial::Copper);
//! let result = size_cable(&input).unwrap();
//! println!("Use {} AWG ({:.2}% drop)", result.awg, result.drop_pct);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Cable sizing, per-gauge table, energy summary
//! - [`conductors`] - AWG, ampacity and grounding tables; resistivity model
//! - [`devices`] - Device list and JSON import/export
//! - [`settings`] - Persisted sizing defaults
//! - [`document`] - Store document container
//! - [`file_io`] - Data store with atomic saves and locking
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod conductors;
pub mod devices;
pub mod document;
pub mod errors;
pub mod file_io;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{size_cable, summarize, CableInput, CableResult, EnergySummary, InstallType};
pub use conductors::{AwgSize, ConductorMaterial};
pub use devices::{Device, DeviceList, ImportMode};
pub use errors::{CalcError, CalcResult};
pub use file_io::{DataStore, FileLock};
pub use settings::Settings;
