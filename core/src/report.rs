//! Per-airport volumes and the busiest / quietest airport.

use crate::types::AirportCode;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportVolume {
    pub code:   AirportCode,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowReport {
    pub volumes: Vec<AirportVolume>,
    pub min:     Option<AirportVolume>,
    pub max:     Option<AirportVolume>,
}

impl FlowReport {
    /// Pair each solution component with its airport and find the extremes.
    /// Strict comparisons: on ties the first airport in index order wins.
    /// NaN volumes never become an extreme.
    pub fn from_solution(order: &[AirportCode], x: &[f64]) -> Self {
        let volumes: Vec<AirportVolume> = order
            .iter()
            .zip(x)
            .map(|(code, &volume)| AirportVolume { code: code.clone(), volume })
            .collect();

        let mut min: Option<&AirportVolume> = None;
        let mut max: Option<&AirportVolume> = None;
        for entry in volumes.iter().filter(|v| !v.volume.is_nan()) {
            if min.map_or(true, |m| entry.volume < m.volume) {
                min = Some(entry);
            }
            if max.map_or(true, |m| entry.volume > m.volume) {
                max = Some(entry);
            }
        }

        Self {
            min: min.cloned(),
            max: max.cloned(),
            volumes,
        }
    }

    /// True when every volume is a finite number.
    pub fn is_finite(&self) -> bool {
        self.volumes.iter().all(|v| v.volume.is_finite())
    }

    pub fn volume_of(&self, code: &str) -> Option<f64> {
        self.volumes.iter().find(|v| v.code == code).map(|v| v.volume)
    }

    pub fn render_text(&self, precision: usize) -> String {
        let mut out = String::from("Passengers at each airport:\n");
        for v in &self.volumes {
            let _ = writeln!(out, "{}: {:.*} passengers", v.code, precision, v.volume);
        }
        if let (Some(min), Some(max)) = (&self.min, &self.max) {
            let _ = writeln!(out);
            let _ = writeln!(out, "Lowest volume {}: {:.*}", min.code, precision, min.volume);
            let _ = writeln!(out, "Highest volume {}: {:.*}", max.code, precision, max.volume);
        }
        out
    }
}
