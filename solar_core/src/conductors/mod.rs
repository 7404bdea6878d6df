//! # Conductor Reference Data
//!
//! Static lookup data and material models used by the cable sizing engine.
//!
//! - [`awg`] - AWG catalog (labels, areas, catalog order)
//! - [`ampacity`] - Base ampacity table with temperature and material derating
//! - [`grounding`] - OCPD rating to grounding conductor mapping
//! - [`material`] - Copper/aluminum resistivity model
//!
//! ## Example
//!
//! ```rust
//! use solar_core::conductors::{ampacity, resistivity, AwgSize, ConductorMaterial};
//!
//! let size = AwgSize::from_label("6").unwrap();
//! let amps = ampacity(size, 35.0, ConductorMaterial::Copper);
//! assert!((amps - 65.0 * 0.91).abs() < 1e-9);
//!
//! let rho = resistivity(ConductorMaterial::Copper, 20.0);
//! assert_eq!(rho, 1.724e-8);
//! ```

pub mod ampacity;
pub mod awg;
pub mod grounding;
pub mod material;

pub use ampacity::{ampacity, ampacity_for_label, base_ampacity_a, temperature_factor};
pub use awg::AwgSize;
pub use grounding::recommend_ground;
pub use material::{resistivity, ConductorMaterial};
