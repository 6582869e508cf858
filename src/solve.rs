//! Top-level dispatch over the case solvers.

use crate::cases::ProfileShape;
use crate::config::SolverConfig;
use crate::constraints::MotionConstraints;
use crate::error::SolveError;
use crate::plan::TrajectoryPlan;

/// Solves with the default configuration.
pub fn solve(constraints: &MotionConstraints) -> Option<TrajectoryPlan> {
    solve_with(constraints, &SolverConfig::default())
}

/// Tries every shape in [`ProfileShape::PRIORITY`] order; if none fits, tries
/// them again on the mirrored (deceleration-first) problem. Returns the first
/// plan found, or `None` when neither orientation has one.
///
/// Inputs are not validated, see [`try_solve_with`].
pub fn solve_with(
    constraints: &MotionConstraints,
    config: &SolverConfig,
) -> Option<TrajectoryPlan> {
    if let Some(plan) = solve_oriented(constraints, config) {
        return Some(plan);
    }

    let mirrored = constraints.mirrored();
    tracing::debug!(
        "No {} profile for [{}], retrying as {}",
        constraints.orientation(),
        constraints,
        mirrored.orientation()
    );
    let plan = solve_oriented(&mirrored, config);
    if plan.is_none() {
        tracing::debug!("No profile for [{}] in either orientation", constraints);
    }
    plan
}

/// Validates the constraints, then solves with the default configuration.
pub fn try_solve(constraints: &MotionConstraints) -> Result<TrajectoryPlan, SolveError> {
    try_solve_with(constraints, &SolverConfig::default())
}

pub fn try_solve_with(
    constraints: &MotionConstraints,
    config: &SolverConfig,
) -> Result<TrajectoryPlan, SolveError> {
    constraints.validate()?;
    solve_with(constraints, config).ok_or(SolveError::Infeasible)
}

fn solve_oriented(
    constraints: &MotionConstraints,
    config: &SolverConfig,
) -> Option<TrajectoryPlan> {
    ProfileShape::PRIORITY.into_iter().find_map(|shape| {
        let plan = shape.solve(constraints, config);
        if config.trace {
            match &plan {
                Some(plan) => tracing::trace!("{}: solved, {}", shape, plan.phases),
                None => tracing::trace!("{}: no solution", shape),
            }
        }
        plan
    })
}
