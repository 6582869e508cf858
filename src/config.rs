//! Solver configuration.
//!
//! Everything the solver would otherwise keep as process-wide state (debug
//! tracing, tolerances, the jerk perturbation used to stay clear of
//! ill-conditioned roots) is passed explicitly through [`SolverConfig`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tolerance::Tolerance;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SolverConfig {
    /// Tolerance for phase durations, velocities and acceleration limits.
    #[serde(default = "default_tolerance")]
    pub tolerance: Tolerance,
    /// Tolerance for comparing covered distance against the requested one.
    #[serde(default = "default_distance_tolerance")]
    pub distance_tolerance: Tolerance,
    /// Fraction by which partial-profile solvers lower the jerk ceiling
    /// before solving.
    #[serde(default = "default_jerk_perturbation")]
    pub jerk_perturbation: f64,
    /// Emit a trace event for every case solver attempt.
    #[serde(default)]
    pub trace: bool,
}

fn default_tolerance() -> Tolerance {
    Tolerance::GENERIC
}
fn default_distance_tolerance() -> Tolerance {
    Tolerance::DISTANCE
}
fn default_jerk_perturbation() -> f64 {
    1e-2
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            distance_tolerance: default_distance_tolerance(),
            jerk_perturbation: default_jerk_perturbation(),
            trace: false,
        }
    }
}

impl SolverConfig {
    /// Parses a TOML document. Missing keys fall back to the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            tracing::error!("Failed to read solver config '{}': {}", path.display(), e);
            e
        })?;
        Self::from_toml_str(&content).map_err(|e| {
            tracing::error!("Failed to parse solver config '{}': {}", path.display(), e);
            e
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "tolerance must be finite and non-negative: {:?}",
                self.tolerance
            )));
        }
        if !self.distance_tolerance.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "distance_tolerance must be finite and non-negative: {:?}",
                self.distance_tolerance
            )));
        }
        if !(0.0..1.0).contains(&self.jerk_perturbation) {
            return Err(ConfigError::Invalid(format!(
                "jerk_perturbation must be in [0, 1): {}",
                self.jerk_perturbation
            )));
        }
        Ok(())
    }

    /// Factor applied to the jerk ceiling by the partial-profile solvers.
    pub fn jerk_scale(&self) -> f64 {
        1.0 - self.jerk_perturbation
    }
}
