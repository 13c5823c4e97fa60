//! Shared primitive types used across the flow model.

/// An airport identifier as it appears in the input. Case-sensitive.
pub type AirportCode = String;

/// Dense, zero-based position of an airport in the linear system.
pub type AirportIndex = usize;

/// Dense row-major coefficient matrix.
pub type Matrix = Vec<Vec<f64>>;

/// The canonical run identifier used by the run history.
pub type RunId = String;
