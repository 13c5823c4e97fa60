//! Model builder — turns records into a square linear system.
//!
//! Row i of the system is the balance of airport i:
//!
//!   x_i − Σ_j f(j→i) · x_j = direct_i
//!
//! RULES:
//!   - Indices are assigned in first-seen order and never change.
//!   - Duplicate direct arrivals and duplicate (origin, dest) flows
//!     overwrite the earlier value. Nothing accumulates.
//!   - Percentages are stored as fractions (percent / 100) and are
//!     not range-checked.

use crate::{
    record::Record,
    types::{AirportCode, AirportIndex, Matrix},
};
use std::collections::HashMap;

/// A fraction of one airport's volume routed to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flow {
    pub origin:   AirportIndex,
    pub dest:     AirportIndex,
    pub fraction: f64,
}

/// The assembled system `a · x = b`. `order[i]` is the airport in row i.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    pub a:     Matrix,
    pub b:     Vec<f64>,
    pub order: Vec<AirportCode>,
}

impl LinearSystem {
    pub fn len(&self) -> usize {
        self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ModelBuilder {
    codes:      Vec<AirportCode>,
    index:      HashMap<AirportCode, AirportIndex>,
    direct:     Vec<f64>,
    flows:      Vec<Flow>,
    flow_slots: HashMap<(AirportIndex, AirportIndex), usize>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed every record in order.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut builder = Self::new();
        for record in records {
            builder.register(record);
        }
        builder
    }

    pub fn register(&mut self, record: &Record) {
        match record {
            Record::DirectArrival { code, amount } => {
                self.register_direct_arrival(code, *amount);
            }
            Record::Flow { origin, dest, percent } => {
                self.register_flow(origin, dest, *percent);
            }
        }
    }

    /// Set the direct arrivals of `code`, creating the airport if needed.
    pub fn register_direct_arrival(&mut self, code: &str, amount: f64) {
        let idx = self.ensure(code);
        self.direct[idx] = amount;
    }

    /// Record that `percent`% of `origin`'s volume flows to `dest`.
    /// Origin is indexed before destination when both are new.
    pub fn register_flow(&mut self, origin: &str, dest: &str, percent: f64) {
        let origin = self.ensure(origin);
        let dest = self.ensure(dest);
        let fraction = percent / 100.0;

        match self.flow_slots.get(&(origin, dest)) {
            Some(&slot) => self.flows[slot].fraction = fraction,
            None => {
                self.flow_slots.insert((origin, dest), self.flows.len());
                self.flows.push(Flow { origin, dest, fraction });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Airport codes in index order.
    pub fn order(&self) -> &[AirportCode] {
        &self.codes
    }

    pub fn index_of(&self, code: &str) -> Option<AirportIndex> {
        self.index.get(code).copied()
    }

    pub fn direct_arrival(&self, code: &str) -> Option<f64> {
        self.index_of(code).map(|i| self.direct[i])
    }

    pub fn flow_fraction(&self, origin: &str, dest: &str) -> Option<f64> {
        let key = (self.index_of(origin)?, self.index_of(dest)?);
        self.flow_slots.get(&key).map(|&slot| self.flows[slot].fraction)
    }

    /// Stored flows in first-insertion order.
    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    /// Consume the builder and assemble the dense system.
    pub fn build_system(self) -> LinearSystem {
        let n = self.codes.len();
        let mut a = vec![vec![0.0; n]; n];
        for (i, row) in a.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        for flow in &self.flows {
            a[flow.dest][flow.origin] -= flow.fraction;
        }

        log::debug!(
            "built {n}x{n} system from {} flows",
            self.flows.len()
        );

        LinearSystem {
            a,
            b: self.direct,
            order: self.codes,
        }
    }

    fn ensure(&mut self, code: &str) -> AirportIndex {
        if let Some(&idx) = self.index.get(code) {
            return idx;
        }
        let idx = self.codes.len();
        self.codes.push(code.to_string());
        self.index.insert(code.to_string(), idx);
        self.direct.push(0.0);
        log::trace!("airport {code} -> index {idx}");
        idx
    }
}
