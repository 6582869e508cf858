//! Profiles that peak below the velocity ceiling and still reach the exit
//! velocity.
//!
//! The unknown is either the peak velocity itself or the jerk time of a
//! jerk-only ramp, from which the peak follows as `v + J*t^2`. Symbols below:
//! `A`/`D` acceleration and deceleration ceilings, `J` jerk, `L` distance,
//! `v0`/`vf` initial and exit velocity.

use num_complex::Complex;

use super::{accept, in_band, jerk_only_ramp, ramps_around, real_candidates};
use super::{ProfileShape, RampKind};
use crate::config::SolverConfig;
use crate::constraints::MotionConstraints;
use crate::phases::PhaseDurations;
use crate::plan::TrajectoryPlan;
use crate::poly::{is_sentinel, solve_quadratic, solve_quartic};

/// Both ramps hold their acceleration ceiling. Quadratic in the peak `p`:
///
/// `(1/2A + 1/2D) p^2 + (A + D)/2J p
///   - v0^2/2A - vf^2/2D + A v0/2J + D vf/2J - L = 0`
pub(super) fn limited_limited(
    constraints: &MotionConstraints,
    config: &SolverConfig,
) -> Option<TrajectoryPlan> {
    let MotionConstraints {
        acc_lim: a,
        dec_lim: d,
        jrk_lim: j,
        dist,
        vel_init: v0,
        vel_exit: vf,
        ..
    } = *constraints;

    let roots = solve_quadratic(
        0.5 / a + 0.5 / d,
        (a + d) / (2.0 * j),
        -v0 * v0 / (2.0 * a) - vf * vf / (2.0 * d) + a * v0 / (2.0 * j) + d * vf / (2.0 * j)
            - dist,
    );
    if is_sentinel(&roots) {
        return None;
    }

    let (accel, decel) = (RampKind::Limited, RampKind::Limited);
    real_candidates(roots).find_map(|peak| {
        let (up, down) = ramps_around(constraints, peak, accel, decel, &config.tolerance)?;
        finish(constraints, peak, up, down, accel, decel, config)
    })
}

/// Limited acceleration, jerk-only deceleration. Quartic in the deceleration
/// jerk time `w`, with `p = vf + J w^2`:
///
/// `J^2/2A w^4 + J w^3 + (vf J/A + A/2) w^2 + 2 vf w
///   + (vf^2 - v0^2)/2A + A (v0 + vf)/2J - L = 0`
pub(super) fn limited_jerk_only(
    constraints: &MotionConstraints,
    config: &SolverConfig,
) -> Option<TrajectoryPlan> {
    let MotionConstraints {
        acc_lim: a,
        dec_lim: d,
        jrk_lim: j,
        dist,
        vel_init: v0,
        vel_exit: vf,
        ..
    } = *constraints;

    let roots = one_sided_quartic(a, j, dist, vf, v0);
    if is_sentinel(&roots) {
        return None;
    }

    let tol = &config.tolerance;
    real_candidates(roots).find_map(|w| {
        let down = jerk_only_ramp(w, d, j, tol)?;
        let rise = j * down.0 * down.0;
        let up = RampKind::Limited.durations((vf - v0) + rise, a, j, tol)?;
        finish(
            constraints,
            vf + rise,
            up,
            down,
            RampKind::Limited,
            RampKind::JerkOnly,
            config,
        )
    })
}

/// Jerk-only acceleration, limited deceleration. The mirror image of
/// [`limited_jerk_only`]: quartic in the acceleration jerk time `u`, with
/// `p = v0 + J u^2`.
pub(super) fn jerk_only_limited(
    constraints: &MotionConstraints,
    config: &SolverConfig,
) -> Option<TrajectoryPlan> {
    let MotionConstraints {
        acc_lim: a,
        dec_lim: d,
        jrk_lim: j,
        dist,
        vel_init: v0,
        vel_exit: vf,
        ..
    } = *constraints;

    let roots = one_sided_quartic(d, j, dist, v0, vf);
    if is_sentinel(&roots) {
        return None;
    }

    let tol = &config.tolerance;
    real_candidates(roots).find_map(|u| {
        let up = jerk_only_ramp(u, a, j, tol)?;
        let rise = j * up.0 * up.0;
        let down = RampKind::Limited.durations((v0 - vf) + rise, d, j, tol)?;
        finish(
            constraints,
            v0 + rise,
            up,
            down,
            RampKind::JerkOnly,
            RampKind::Limited,
            config,
        )
    })
}

/// Neither ramp reaches its acceleration ceiling. With `s = u + w` and
/// `k = (vf - v0)/J = u^2 - w^2`:
///
/// `s^4 + 4 (v0 + vf)/J s^2 - 4L/J s - (vf - v0)^2/J^2 = 0`, `s > 0`
///
/// and then `u = (s + k/s)/2`, `w = (s - k/s)/2`.
pub(super) fn jerk_only_jerk_only(
    constraints: &MotionConstraints,
    config: &SolverConfig,
) -> Option<TrajectoryPlan> {
    let MotionConstraints {
        acc_lim: a,
        dec_lim: d,
        jrk_lim: j,
        dist,
        vel_init: v0,
        vel_exit: vf,
        ..
    } = *constraints;

    let k = (vf - v0) / j;
    let roots = solve_quartic(1.0, 0.0, 4.0 * (v0 + vf) / j, -4.0 * dist / j, -k * k);
    if is_sentinel(&roots) {
        return None;
    }

    let tol = &config.tolerance;
    real_candidates(roots)
        .filter(|&s| s > 0.0)
        .find_map(|s| {
            let up = jerk_only_ramp(0.5 * (s + k / s), a, j, tol)?;
            let down = jerk_only_ramp(0.5 * (s - k / s), d, j, tol)?;
            finish(
                constraints,
                v0 + j * up.0 * up.0,
                up,
                down,
                RampKind::JerkOnly,
                RampKind::JerkOnly,
                config,
            )
        })
}

/// Quartic shared by the two mixed shapes, written for the jerk time `t` of
/// the jerk-only ramp. `lim` is the ceiling of the limited ramp, `near` the
/// velocity at the jerk-only end and `far` the one at the limited end.
fn one_sided_quartic(lim: f64, j: f64, dist: f64, near: f64, far: f64) -> [Complex<f64>; 4] {
    solve_quartic(
        j * j / (2.0 * lim),
        j,
        near * j / lim + 0.5 * lim,
        2.0 * near,
        (near * near - far * far) / (2.0 * lim) + lim * (far + near) / (2.0 * j) - dist,
    )
}

/// Checks the peak against the velocity band and the rebuilt profile against
/// the distance.
fn finish(
    constraints: &MotionConstraints,
    peak: f64,
    up: (f64, f64),
    down: (f64, f64),
    accel: RampKind,
    decel: RampKind,
    config: &SolverConfig,
) -> Option<TrajectoryPlan> {
    if !in_band(constraints, peak, &config.tolerance) {
        return None;
    }
    let phases = PhaseDurations::from_ramps(up, 0.0, down);
    accept(constraints, phases, ProfileShape::Peak { accel, decel }, config)
}
