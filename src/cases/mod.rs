//! Case solvers.
//!
//! Each feasible profile falls into one of ten shapes. A shape is a hypothesis
//! about which limits the profile touches; under that hypothesis the distance
//! equation collapses to a polynomial in one unknown, solved in closed form.
//! Every root is then checked against the hypothesis it was derived from and
//! the first self-consistent one wins.
//!
//! All solvers work on signed quantities, so the same code serves a mirrored
//! (deceleration-first) problem: only the allowed velocity band changes, see
//! [`MotionConstraints::vel_floor`] and [`MotionConstraints::vel_ceiling`].

use std::fmt;

use num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::constraints::MotionConstraints;
use crate::phases::PhaseDurations;
use crate::plan::TrajectoryPlan;
use crate::tolerance::Tolerance;

mod cruise;
mod partial;
mod peak;

/// How a single velocity ramp (three jerk phases) is shaped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RampKind {
    /// Acceleration reaches its ceiling and holds it for a while.
    Limited,
    /// Acceleration peaks below the ceiling; only jerk is limiting.
    JerkOnly,
}

impl RampKind {
    /// Durations `(t_jerk, t_const)` of a symmetric ramp changing velocity by
    /// `dv` under acceleration ceiling `lim` and jerk `jrk`, or `None` when the
    /// ramp does not have this shape.
    ///
    /// The knee `lim^2 / jrk` is the velocity change at which the acceleration
    /// just touches the ceiling. Both shapes accept a `dv` on the knee within
    /// tolerance, so the two hypotheses overlap instead of leaving a gap.
    pub fn durations(
        self,
        dv: f64,
        lim: f64,
        jrk: f64,
        tol: &Tolerance,
    ) -> Option<(f64, f64)> {
        if !tol.ge(dv, 0.0) {
            return None;
        }
        let dv = dv.max(0.0);
        let knee = lim * lim / jrk;

        let holds = match self {
            RampKind::Limited => tol.ge(dv, knee),
            RampKind::JerkOnly => tol.le(dv, knee),
        };
        if !holds {
            return None;
        }

        if self == RampKind::Limited && dv > knee {
            Some((lim / jrk, (dv - knee) / lim))
        } else {
            Some(((dv / jrk).sqrt(), 0.0))
        }
    }
}

impl fmt::Display for RampKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RampKind::Limited => "limited",
            RampKind::JerkOnly => "jerk-only",
        })
    }
}

/// The closed set of profile shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileShape {
    /// Reaches the velocity ceiling and cruises on it.
    Cruise { accel: RampKind, decel: RampKind },
    /// Peaks below the velocity ceiling and still ends at the exit velocity.
    Peak { accel: RampKind, decel: RampKind },
    /// Runs out of distance before reaching the exit velocity: a single ramp
    /// towards it.
    Partial(RampKind),
}

impl ProfileShape {
    /// Order in which the dispatcher tries the shapes: closed-form cruise
    /// checks first, then the partial ramps (which must win over a peak with a
    /// vanishing tail), then the peak shapes by polynomial degree.
    pub const PRIORITY: [ProfileShape; 10] = [
        ProfileShape::Cruise {
            accel: RampKind::Limited,
            decel: RampKind::Limited,
        },
        ProfileShape::Cruise {
            accel: RampKind::Limited,
            decel: RampKind::JerkOnly,
        },
        ProfileShape::Cruise {
            accel: RampKind::JerkOnly,
            decel: RampKind::Limited,
        },
        ProfileShape::Cruise {
            accel: RampKind::JerkOnly,
            decel: RampKind::JerkOnly,
        },
        ProfileShape::Partial(RampKind::JerkOnly),
        ProfileShape::Partial(RampKind::Limited),
        ProfileShape::Peak {
            accel: RampKind::Limited,
            decel: RampKind::Limited,
        },
        ProfileShape::Peak {
            accel: RampKind::Limited,
            decel: RampKind::JerkOnly,
        },
        ProfileShape::Peak {
            accel: RampKind::JerkOnly,
            decel: RampKind::Limited,
        },
        ProfileShape::Peak {
            accel: RampKind::JerkOnly,
            decel: RampKind::JerkOnly,
        },
    ];

    /// Partial profiles end short of the exit velocity.
    pub fn is_partial(self) -> bool {
        matches!(self, ProfileShape::Partial(_))
    }

    pub fn is_cruise(self) -> bool {
        matches!(self, ProfileShape::Cruise { .. })
    }

    /// Runs the case solver for this shape.
    pub fn solve(
        self,
        constraints: &MotionConstraints,
        config: &SolverConfig,
    ) -> Option<TrajectoryPlan> {
        use RampKind::{JerkOnly, Limited};

        match self {
            ProfileShape::Cruise { accel, decel } => {
                cruise::solve(constraints, accel, decel, config)
            }
            ProfileShape::Partial(JerkOnly) => partial::jerk_only(constraints, config),
            ProfileShape::Partial(Limited) => partial::limited(constraints, config),
            ProfileShape::Peak {
                accel: Limited,
                decel: Limited,
            } => peak::limited_limited(constraints, config),
            ProfileShape::Peak {
                accel: Limited,
                decel: JerkOnly,
            } => peak::limited_jerk_only(constraints, config),
            ProfileShape::Peak {
                accel: JerkOnly,
                decel: Limited,
            } => peak::jerk_only_limited(constraints, config),
            ProfileShape::Peak {
                accel: JerkOnly,
                decel: JerkOnly,
            } => peak::jerk_only_jerk_only(constraints, config),
        }
    }
}

impl fmt::Display for ProfileShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileShape::Cruise { accel, decel } => {
                write!(f, "cruise [accel: {accel}, decel: {decel}]")
            }
            ProfileShape::Peak { accel, decel } => {
                write!(f, "peak [accel: {accel}, decel: {decel}]")
            }
            ProfileShape::Partial(ramp) => write!(f, "partial [accel: {ramp}]"),
        }
    }
}

/// Real parts of the finite roots, in root order.
fn real_candidates<const N: usize>(roots: [Complex<f64>; N]) -> impl Iterator<Item = f64> {
    roots
        .into_iter()
        .filter(|root| root.is_finite())
        .map(|root| root.re)
}

/// True when `vel` lies inside the orientation's velocity band.
fn in_band(constraints: &MotionConstraints, vel: f64, tol: &Tolerance) -> bool {
    tol.ge(vel, constraints.vel_floor()) && tol.le(vel, constraints.vel_ceiling())
}

/// Acceleration and deceleration ramps around `peak`, each checked against
/// its hypothesis.
fn ramps_around(
    constraints: &MotionConstraints,
    peak: f64,
    accel: RampKind,
    decel: RampKind,
    tol: &Tolerance,
) -> Option<((f64, f64), (f64, f64))> {
    if !in_band(constraints, peak, tol) {
        return None;
    }
    let c = constraints;
    let up = accel.durations(peak - c.vel_init, c.acc_lim, c.jrk_lim, tol)?;
    let down = decel.durations(peak - c.vel_exit, c.dec_lim, c.jrk_lim, tol)?;
    Some((up, down))
}

/// Jerk-only ramp that keeps the jerk time of a root as is; the hypothesis is
/// checked on the acceleration it reaches.
fn jerk_only_ramp(t_jerk: f64, lim: f64, jrk: f64, tol: &Tolerance) -> Option<(f64, f64)> {
    if !tol.ge(t_jerk, 0.0) || !tol.le(jrk * t_jerk, lim) {
        return None;
    }
    Some((t_jerk.max(0.0), 0.0))
}

/// Limited ramp lasting `total` in all, holding `lim` for whatever the two
/// jerk phases leave over.
fn limited_ramp(total: f64, lim: f64, jrk: f64, tol: &Tolerance) -> Option<(f64, f64)> {
    let t_jerk = lim / jrk;
    let t_const = total - 2.0 * t_jerk;
    if !tol.ge(t_const, 0.0) {
        return None;
    }
    Some((t_jerk, t_const.max(0.0)))
}

/// Final gate shared by every case: the rebuilt profile must cover the
/// requested distance.
fn accept(
    constraints: &MotionConstraints,
    phases: PhaseDurations,
    shape: ProfileShape,
    config: &SolverConfig,
) -> Option<TrajectoryPlan> {
    let distance = phases.distance(constraints);
    if !config.distance_tolerance.is_close(distance, constraints.dist) {
        return None;
    }
    Some(TrajectoryPlan::new(*constraints, phases, shape))
}
