use serde::{Deserialize, Serialize};

/// Settings for a single solve. Every field has a default, so a config
/// file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Decimal places in the text report.
    pub precision: usize,
    /// Reject an exactly-zero pivot instead of returning non-finite volumes.
    pub strict_pivots: bool,
    /// Residual above which the engine logs a warning, relative to the
    /// largest direct arrival (or absolute when all arrivals are zero).
    pub residual_tolerance: f64,
    /// Outbound routes per airport for generated networks.
    pub routes_per_airport: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            precision:          2,
            strict_pivots:      false,
            residual_tolerance: 1e-9,
            routes_per_airport: 3,
        }
    }
}

impl RunConfig {
    /// Load from a JSON file.
    /// In tests, use RunConfig::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: RunConfig = serde_json::from_str(content)?;
        if config.residual_tolerance.is_nan() || config.residual_tolerance < 0.0 {
            anyhow::bail!(
                "residual_tolerance must be non-negative, got {}",
                config.residual_tolerance
            );
        }
        Ok(config)
    }
}
