//! Steady-state passenger volumes for an airport flow network.
//!
//! Records describe direct arrivals and percentage flows between airports.
//! [`model::ModelBuilder`] turns them into a dense linear system and
//! [`solver`] solves it by Gaussian elimination with partial pivoting.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod record;
pub mod report;
pub mod solver;
pub mod store;
pub mod synth;
pub mod types;
