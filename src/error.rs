use thiserror::Error;

use crate::plan::SolutionKind;

/// Caller contract violations, detected by [`MotionConstraints::validate`].
///
/// [`MotionConstraints::validate`]: crate::MotionConstraints::validate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintError {
    #[error("{name} is not finite: {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("{name} must be positive: {value}")]
    NonPositiveLimit { name: &'static str, value: f64 },
    #[error("{name} = {value} outside [0, {vel_lim}]")]
    VelocityOutOfRange {
        name: &'static str,
        value: f64,
        vel_lim: f64,
    },
    #[error("distance must be non-negative: {0}")]
    NegativeDistance(f64),
}

/// Outcome of [`try_solve`](crate::try_solve) when no plan is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("invalid constraints: {0}")]
    InvalidConstraints(#[from] ConstraintError),
    #[error("no feasible profile in either orientation")]
    Infeasible,
}

/// A solved plan that fails its own post-hoc checks. Unlike
/// [`SolveError::Infeasible`] this always indicates a solver bug.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanDefect {
    #[error("{kind}: wrong distance: {actual} vs {expected}")]
    WrongDistance {
        kind: SolutionKind,
        actual: f64,
        expected: f64,
    },
    #[error("{kind}: wrong final velocity: {actual} vs {expected}")]
    WrongFinalVelocity {
        kind: SolutionKind,
        actual: f64,
        expected: f64,
    },
    #[error("{kind}: phase {phase} has negative duration {value}")]
    NegativePhase {
        kind: SolutionKind,
        phase: usize,
        value: f64,
    },
    #[error("{kind}: peak velocity over limit: {peak} vs {vel_lim}")]
    PeakOverLimit {
        kind: SolutionKind,
        peak: f64,
        vel_lim: f64,
    },
    #[error("{kind}: cruise velocity should equal the limit: {peak} vs {vel_lim}")]
    CruiseOffLimit {
        kind: SolutionKind,
        peak: f64,
        vel_lim: f64,
    },
}

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid solver config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    #[error("sampling frequency must be positive and finite: {0}")]
    InvalidFrequency(f64),
}
