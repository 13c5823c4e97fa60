//! Deterministic synthetic networks.
//!
//! RULE: Generation never touches a platform RNG. The same seed always
//! yields the same records, so generated case files are reproducible.
//!
//! Every origin routes strictly less than 100% of its volume outward,
//! which makes each column of the system diagonally dominant. Generated
//! systems are therefore always non-singular.

use crate::record::Record;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Upper bound on an origin's total outbound percentage.
pub const MAX_OUTBOUND_PERCENT: f64 = 90.0;

pub struct NetworkGenerator {
    inner: Pcg64Mcg,
}

impl NetworkGenerator {
    pub fn new(seed: u64) -> Self {
        Self { inner: Pcg64Mcg::seed_from_u64(seed) }
    }

    /// Stable airport code for index `i`: A000, A001, …
    pub fn code(i: usize) -> String {
        format!("A{i:03}")
    }

    /// Direct-arrival records for every airport, then flow records
    /// grouped by origin. Percentages are rounded to two decimals.
    pub fn generate(&mut self, airports: usize, routes_per_airport: usize) -> Vec<Record> {
        let mut records = Vec::with_capacity(airports * (1 + routes_per_airport));

        for i in 0..airports {
            let amount = (self.inner.gen::<f64>() * 1000.0).round();
            records.push(Record::DirectArrival { code: Self::code(i), amount });
        }

        if airports < 2 {
            return records;
        }

        let routes = routes_per_airport.min(airports - 1);
        for origin in 0..airports {
            let dests = self.pick_destinations(origin, airports, routes);
            let budget = self.inner.gen_range(0.0..MAX_OUTBOUND_PERCENT);
            let weights: Vec<f64> = dests.iter().map(|_| self.inner.gen_range(0.1..1.0)).collect();
            let total: f64 = weights.iter().sum();

            for (dest, w) in dests.into_iter().zip(weights) {
                // Floor keeps the rounded shares inside the budget.
                let percent = (budget * w / total * 100.0).floor() / 100.0;
                records.push(Record::Flow {
                    origin: Self::code(origin),
                    dest: Self::code(dest),
                    percent,
                });
            }
        }

        log::debug!("generated {} records for {airports} airports", records.len());
        records
    }

    fn pick_destinations(&mut self, origin: usize, airports: usize, count: usize) -> Vec<usize> {
        let mut picked = Vec::with_capacity(count);
        while picked.len() < count {
            let candidate = self.inner.gen_range(0..airports);
            if candidate != origin && !picked.contains(&candidate) {
                picked.push(candidate);
            }
        }
        picked
    }
}

/// Render records as a case file, one record per line.
pub fn to_text(records: &[Record]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&record.to_line());
        out.push('\n');
    }
    out
}
