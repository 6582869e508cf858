//! Profiles that reach the velocity ceiling.
//!
//! With the peak pinned to the ceiling both ramps are fully determined, so no
//! polynomial is involved: whatever distance the ramps leave over is covered
//! at constant velocity.

use super::{accept, ramps_around, ProfileShape, RampKind};
use crate::config::SolverConfig;
use crate::constraints::MotionConstraints;
use crate::phases::PhaseDurations;
use crate::plan::TrajectoryPlan;

pub(super) fn solve(
    constraints: &MotionConstraints,
    accel: RampKind,
    decel: RampKind,
    config: &SolverConfig,
) -> Option<TrajectoryPlan> {
    let c = constraints;
    let tol = &config.tolerance;

    // deceleration-first problems have no room to cruise
    let vel = c.vel_ceiling();
    if vel <= 0.0 {
        return None;
    }

    let (up, down) = ramps_around(c, vel, accel, decel, tol)?;
    let up_time = 2.0 * up.0 + up.1;
    let down_time = 2.0 * down.0 + down.1;
    let ramp_dist = 0.5 * (c.vel_init + vel) * up_time + 0.5 * (vel + c.vel_exit) * down_time;

    let cruise = (c.dist - ramp_dist) / vel;
    if !tol.ge(cruise, 0.0) {
        return None;
    }

    let phases = PhaseDurations::from_ramps(up, cruise.max(0.0), down);
    accept(c, phases, ProfileShape::Cruise { accel, decel }, config)
}
