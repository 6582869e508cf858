//! # scurve_solver
//!
//! Closed-form solver for jerk-limited (seven-phase S-curve) motion profiles.
//!
//! Given velocity, acceleration, deceleration and jerk ceilings, a distance and
//! the initial and exit velocities, [`solve`] returns the phase durations of a
//! profile that covers exactly that distance, or `None` when no profile fits.
//!
//! This library provides the following modules:
//! - `constraints` for the problem description and its mirrored
//!   (deceleration-first) form.
//! - `cases` for the ten profile shapes and their closed-form case solvers.
//! - `solve` for the dispatcher that tries the shapes in priority order.
//! - `phases` and `motion_polynomial` for evaluating a profile.
//! - `plan` for the solved profile and its verification.
//! - `sampler` for walking a plan in discrete ticks.
//! - `poly` for the quadratic, cubic and quartic root solvers.
//! - `tolerance` and `config` for numeric tolerances and solver settings.

pub mod cases;
pub mod config;
pub mod constraints;
pub mod error;
pub mod motion_polynomial;
pub mod phases;
pub mod plan;
pub mod poly;
pub mod sampler;
pub mod solve;
pub mod tolerance;

// Re-export main structs for convenience:
pub use cases::{ProfileShape, RampKind};
pub use config::SolverConfig;
pub use constraints::{MotionConstraints, Orientation};
pub use error::{ConfigError, ConstraintError, PlanDefect, SampleError, SolveError};
pub use motion_polynomial::{MotionPolynomial, MotionState};
pub use phases::{Phase, PhaseDurations};
pub use plan::{SolutionKind, TrajectoryPlan};
pub use sampler::{PlanSampler, Sample};
pub use solve::{solve, solve_with, try_solve, try_solve_with};
pub use tolerance::Tolerance;
