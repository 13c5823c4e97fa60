//! The run engine — one case file in, one report out.
//!
//! EXECUTION ORDER (fixed):
//!   1. Parse records from the source
//!   2. Register records with the model builder, in input order
//!   3. Build the dense system
//!   4. Solve a copy of the system (the original is kept for the residual)
//!   5. Check the residual and finiteness, build the report

use crate::{
    config::RunConfig,
    error::FlowResult,
    model::ModelBuilder,
    record::{self, Record},
    report::FlowReport,
    solver,
};
use serde::Serialize;
use std::io::BufRead;

#[derive(Debug, Clone, Serialize)]
pub struct FlowOutcome {
    pub report:   FlowReport,
    /// Largest absolute component of `A·x − b` on the unmodified system.
    pub residual: f64,
}

pub struct FlowEngine {
    pub config: RunConfig,
}

impl FlowEngine {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn run<R: BufRead>(&self, source: R) -> FlowResult<FlowOutcome> {
        let records = record::parse_records(source)?;
        self.run_records(&records)
    }

    pub fn run_records(&self, records: &[Record]) -> FlowResult<FlowOutcome> {
        let system = ModelBuilder::from_records(records).build_system();
        let n = system.len();

        let x = if self.config.strict_pivots {
            solver::solve_checked(system.a.clone(), system.b.clone())?
        } else {
            solver::solve(system.a.clone(), system.b.clone())
        };

        let residual = solver::residual(&system.a, &x, &system.b);
        let report = FlowReport::from_solution(&system.order, &x);

        if !report.is_finite() {
            log::warn!("solution has non-finite volumes; the system is likely singular");
        } else {
            let scale = system.b.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
            if residual > self.config.residual_tolerance * scale {
                log::warn!("residual {residual:.3e} exceeds tolerance for {n} airports");
            }
        }

        log::info!("solved {n} airports, residual {residual:.3e}");
        Ok(FlowOutcome { report, residual })
    }
}
