//! # Error Types
//!
//! Structured error types for solar_core. Every failure carries enough
//! context for a front end to tell the user what to change, and the whole
//! enum serializes to JSON so it can be handed to other tools verbatim.
//!
//! ## Example
//!
//! ```rust
//! use solar_core::errors::{CalcError, CalcResult};
//!
//! fn validate_distance(distance_m: f64) -> CalcResult<()> {
//!     if distance_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "distance_m",
//!             distance_m.to_string(),
//!             "must be > 0",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_distance(-1.0).unwrap_err().is_validation());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for solar_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for sizing, device and store operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong shape, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// No catalog gauge is large enough to meet the voltage-drop limit
    #[error(
        "Voltage drop requirement cannot be met with available AWG sizes \
         (needs {area_needed_mm2:.2} mm², largest is {largest_area_mm2:.2} mm²). \
         Increase voltage or drop limit."
    )]
    DropInfeasible {
        area_needed_mm2: f64,
        largest_area_mm2: f64,
    },

    /// Upsizing ran off the end of the catalog
    #[error(
        "Constraints cannot be met even with largest AWG \
         (needs {required_ampacity_a:.1} A at <= {allowed_drop_pct}% drop)"
    )]
    ConstraintsUnmet {
        required_ampacity_a: f64,
        allowed_drop_pct: f64,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError from anything displayable
    pub fn serialization(reason: impl std::fmt::Display) -> Self {
        CalcError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// True for the "validation failed with reason" family: bad inputs and
    /// infeasible sizing requests. The caller must change the inputs.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::DropInfeasible { .. }
                | CalcError::ConstraintsUnmet { .. }
        )
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DropInfeasible { .. } => "DROP_INFEASIBLE",
            CalcError::ConstraintsUnmet { .. } => "CONSTRAINTS_UNMET",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
