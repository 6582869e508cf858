//! Profiles that run out of distance before reaching the exit velocity.
//!
//! Only the acceleration ramp is present and the profile ends wherever it
//! stops, at or below `vel_exit`. Both solvers first lower the jerk ceiling by
//! [`SolverConfig::jerk_scale`]: the cubic has a near-double root exactly
//! where the partial and peak shapes meet, and the slower jerk moves the
//! partial solution off it. The returned plan carries the lowered ceiling.

use super::{accept, in_band, jerk_only_ramp, limited_ramp, real_candidates};
use super::{ProfileShape, RampKind};
use crate::config::SolverConfig;
use crate::constraints::MotionConstraints;
use crate::phases::PhaseDurations;
use crate::plan::TrajectoryPlan;
use crate::poly::{is_sentinel, solve_cubic, solve_quadratic};

/// Jerk-only ramp. With `x = T1 + T3` and `T1 = T3`, the distance is
/// `v0 x + J x^3/8`, so
///
/// `x^3 + 8 v0/J x - 8L/J = 0`
///
/// and the reached velocity is `v0 + J x^2/4`.
pub(super) fn jerk_only(
    constraints: &MotionConstraints,
    config: &SolverConfig,
) -> Option<TrajectoryPlan> {
    let c = constraints.with_jerk_scaled(config.jerk_scale());
    let (a, j, v0) = (c.acc_lim, c.jrk_lim, c.vel_init);

    let roots = solve_cubic(1.0, 0.0, 8.0 * v0 / j, -8.0 * c.dist / j);
    if is_sentinel(&roots) {
        return None;
    }

    let tol = &config.tolerance;
    real_candidates(roots).find_map(|x| {
        let ramp = jerk_only_ramp(0.5 * x, a, j, tol)?;
        let peak = v0 + j * ramp.0 * ramp.0;
        finish(&c, peak, ramp, RampKind::JerkOnly, config)
    })
}

/// Ramp holding the acceleration ceiling. With `tau = T1 + T2 + T3` and
/// `T1 = T3 = A/J`:
///
/// `A/2 tau^2 + (v0 - A^2/2J) tau - L = 0`
///
/// and the reached velocity is `v0 + A tau - A^2/J`.
pub(super) fn limited(
    constraints: &MotionConstraints,
    config: &SolverConfig,
) -> Option<TrajectoryPlan> {
    let c = constraints.with_jerk_scaled(config.jerk_scale());
    let (a, j, v0) = (c.acc_lim, c.jrk_lim, c.vel_init);

    let roots = solve_quadratic(0.5 * a, v0 - a * a / (2.0 * j), -c.dist);
    if is_sentinel(&roots) {
        return None;
    }

    let tol = &config.tolerance;
    real_candidates(roots).find_map(|tau| {
        let ramp = limited_ramp(tau, a, j, tol)?;
        let peak = v0 + a * (ramp.0 + ramp.1);
        finish(&c, peak, ramp, RampKind::Limited, config)
    })
}

/// The end velocity must not overshoot `vel_exit`; the ramp comes straight
/// from the root and is checked like every other shape.
fn finish(
    constraints: &MotionConstraints,
    peak: f64,
    (t_jerk, t_const): (f64, f64),
    ramp: RampKind,
    config: &SolverConfig,
) -> Option<TrajectoryPlan> {
    let c = constraints;
    let tol = &config.tolerance;
    if !tol.le(peak, c.vel_exit) || !in_band(c, peak, tol) {
        return None;
    }

    accept(
        c,
        PhaseDurations::accel_only(t_jerk, t_const),
        ProfileShape::Partial(ramp),
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jerk_only_ramp_short_of_exit_velocity() {
        let c = MotionConstraints::new(1.0, 1.0, 1.0, 1.0, 0.1, 0.0, 1.0);
        let config = SolverConfig::default();
        let plan = jerk_only(&c, &config).unwrap();

        assert!((plan.constraints.jrk_lim - 0.99).abs() < 1e-15);
        let x = (0.8 / 0.99f64).cbrt();
        assert!((plan.phases.0[0] - 0.5 * x).abs() < 1e-9);
        assert!((plan.phases.0[2] - 0.5 * x).abs() < 1e-9);
        assert_eq!(plan.phases.0[1], 0.0);
        assert!((plan.distance() - 0.1).abs() < 1e-9);
        assert!(plan.final_velocity() < 1.0);
    }

    #[test]
    fn without_perturbation_jerk_is_untouched() {
        let c = MotionConstraints::new(1.0, 1.0, 1.0, 1.0, 0.1, 0.0, 1.0);
        let config = SolverConfig {
            jerk_perturbation: 0.0,
            ..SolverConfig::default()
        };
        let plan = jerk_only(&c, &config).unwrap();
        assert_eq!(plan.constraints.jrk_lim, 1.0);
        assert!((plan.phases.0[0] - 0.5 * 0.8f64.cbrt()).abs() < 1e-9);
    }

    #[test]
    fn overshooting_exit_velocity_is_rejected() {
        let c = MotionConstraints::new(1.0, 1.0, 1.0, 1.0, 0.1, 0.0, 0.0);
        let config = SolverConfig::default();
        assert!(jerk_only(&c, &config).is_none());
        assert!(limited(&c, &config).is_none());
    }

    #[test]
    fn limited_ramp_short_of_exit_velocity() {
        // A = 1, J = 10: the knee is only 0.1, the ramp to about 0.74 holds A
        let c = MotionConstraints::new(2.0, 1.0, 1.0, 10.0, 0.3, 0.2, 2.0);
        let config = SolverConfig::default();
        assert!(jerk_only(&c, &config).is_none());

        let plan = limited(&c, &config).unwrap();
        assert!(plan.phases.0[1] > 0.0);
        assert!((plan.distance() - 0.3).abs() < 1e-9);
        assert!(plan.final_velocity() <= 2.0);
    }

    #[test]
    fn short_brake_at_high_speed() {
        // about 3.7e-6 s of jerk at -527 m/s: the reached velocity sits within
        // 1e-11 of the start
        let c = MotionConstraints::new(643.15, 0.6006, 8.264, 1.2963, 0.0019437, 527.5, 82.49)
            .mirrored();
        let config = SolverConfig::default();
        let plan = jerk_only(&c, &config).unwrap();

        let x = 2.0 * plan.phases.0[0];
        let j = plan.constraints.jrk_lim;
        let dist = -527.5 * x + j * x.powi(3) / 8.0;
        assert!((dist + 0.0019437).abs() < 1e-11);
        assert!((plan.distance() + 0.0019437).abs() < 1e-11);
    }

    #[test]
    fn mirrored_deceleration() {
        // slows from 1.5 with only 0.2 of distance left; reaching 0.5 takes 2.0
        let c = MotionConstraints::new(2.0, 1.0, 1.0, 1.0, 0.2, 1.5, 0.5).mirrored();
        let plan = jerk_only(&c, &SolverConfig::default()).unwrap();
        let fv = plan.final_velocity();
        assert!(fv > -1.5 && fv < -0.5);
        assert!((plan.distance() + 0.2).abs() < 1e-9);
    }
}
