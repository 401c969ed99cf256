//! JSON configuration for command-line runs

use crate::bounds::BoundSpec;
use crate::{SSOConfig, SSOConfigBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A complete run loaded from JSON.
///
/// ```json
/// { "function": "rastrigin", "dim": 5, "lower": -5.12, "upper": 5.12,
///   "population": 40, "maxiter": 300, "seed": 7 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Registry name of the benchmark function
    pub function: String,
    /// Problem dimension; defaults to the length of a per-dimension bound, else 2
    #[serde(default)]
    pub dim: Option<usize>,
    /// Lower bound(s); defaults to the function's usual box
    #[serde(default)]
    pub lower: Option<BoundSpec>,
    /// Upper bound(s); defaults to the function's usual box
    #[serde(default)]
    pub upper: Option<BoundSpec>,
    /// Number of spiders
    #[serde(default = "default_population")]
    pub population: usize,
    /// Number of iterations
    #[serde(default = "default_maxiter")]
    pub maxiter: usize,
    /// Random seed
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_population() -> usize {
    SSOConfig::default().popsize
}

fn default_maxiter() -> usize {
    SSOConfig::default().maxiter
}

impl RunConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        Ok(Self::from_json(&content)?)
    }

    /// Problem dimension implied by this configuration.
    pub fn resolved_dim(&self) -> usize {
        if let Some(dim) = self.dim {
            return dim;
        }
        for spec in [&self.lower, &self.upper].into_iter().flatten() {
            if let BoundSpec::PerDim(values) = spec {
                return values.len();
            }
        }
        2
    }

    /// Builder preloaded with the run budget and seed.
    pub fn to_builder(&self) -> SSOConfigBuilder {
        let builder = SSOConfigBuilder::new()
            .popsize(self.population)
            .maxiter(self.maxiter);
        match self.seed {
            Some(seed) => builder.seed(seed),
            None => builder,
        }
    }
}
