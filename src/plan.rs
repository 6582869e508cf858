use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cases::ProfileShape;
use crate::config::SolverConfig;
use crate::constraints::{MotionConstraints, Orientation};
use crate::error::PlanDefect;
use crate::motion_polynomial::{MotionPolynomial, MotionState};
use crate::phases::PhaseDurations;

/// Which case solver produced a plan, and in which orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolutionKind {
    pub shape: ProfileShape,
    pub orientation: Orientation,
}

impl SolutionKind {
    pub fn new(shape: ProfileShape, orientation: Orientation) -> Self {
        Self { shape, orientation }
    }
}

impl fmt::Display for SolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.shape, self.orientation)
    }
}

/// A solved profile.
///
/// `constraints` are the ones the profile was actually solved against: they
/// are mirrored for deceleration-first plans and may carry a slightly reduced
/// jerk ceiling. Every derived quantity is computed from them, so signed
/// values such as [`final_velocity`](Self::final_velocity) are negated for
/// deceleration-first plans.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPlan {
    pub constraints: MotionConstraints,
    pub phases: PhaseDurations,
    pub kind: SolutionKind,
}

impl TrajectoryPlan {
    pub fn new(constraints: MotionConstraints, phases: PhaseDurations, shape: ProfileShape) -> Self {
        Self {
            constraints,
            phases,
            kind: SolutionKind::new(shape, constraints.orientation()),
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.kind.orientation
    }

    pub fn time(&self) -> f64 {
        self.phases.time()
    }

    pub fn distance(&self) -> f64 {
        self.phases.distance(&self.constraints)
    }

    pub fn peak_velocity(&self) -> f64 {
        self.phases.peak_velocity(&self.constraints)
    }

    /// Signed end velocity in the plan's own orientation.
    pub fn final_velocity(&self) -> f64 {
        self.phases.final_velocity(&self.constraints)
    }

    /// End velocity with the deceleration-first sign flip undone.
    pub fn physical_final_velocity(&self) -> f64 {
        self.orientation().sign() * self.final_velocity()
    }

    pub fn has_cruise_phase(&self) -> bool {
        self.phases.cruise() > 0.0
    }

    pub fn velocity_at(&self, t: f64) -> f64 {
        self.phases.velocity_at(&self.constraints, t)
    }

    pub fn state_at(&self, t: f64) -> MotionState {
        self.phases.state_at(&self.constraints, t)
    }

    pub fn segments(&self) -> [MotionPolynomial; 7] {
        self.phases.segments(&self.constraints)
    }

    /// `T1..T7`, jerk and initial velocity, the argument list an external
    /// simulator needs to replay the profile.
    pub fn simulation_args(&self) -> [f64; 9] {
        let [t1, t2, t3, t4, t5, t6, t7] = self.phases.0;
        [
            t1,
            t2,
            t3,
            t4,
            t5,
            t6,
            t7,
            self.constraints.jrk_lim,
            self.constraints.vel_init,
        ]
    }

    /// Re-checks the plan against the problem the caller asked for.
    ///
    /// Any failure here is a solver defect, not an infeasible problem:
    /// - the covered distance must equal the plan's own `dist`;
    /// - no phase may be negative beyond the tolerance;
    /// - partial profiles must not overshoot `vel_exit`, every other shape must
    ///   end at the requested `vel_exit`;
    /// - the peak may not exceed the velocity ceiling, and must sit on it for
    ///   the cruise shapes.
    pub fn verify(
        &self,
        requested: &MotionConstraints,
        config: &SolverConfig,
    ) -> Result<(), PlanDefect> {
        let c = &self.constraints;
        let kind = self.kind;
        let tol = config.tolerance;

        let distance = self.distance();
        if !config.distance_tolerance.is_close(distance, c.dist) {
            return Err(PlanDefect::WrongDistance {
                kind,
                actual: distance,
                expected: c.dist,
            });
        }

        for (idx, &value) in self.phases.0.iter().enumerate() {
            if value < -tol.abs {
                return Err(PlanDefect::NegativePhase {
                    kind,
                    phase: idx + 1,
                    value,
                });
            }
        }

        if kind.shape.is_partial() {
            let actual = self.final_velocity();
            if !tol.le(actual, c.vel_exit) {
                return Err(PlanDefect::WrongFinalVelocity {
                    kind,
                    actual,
                    expected: c.vel_exit,
                });
            }
        } else {
            let actual = self.physical_final_velocity();
            if !tol.is_close(actual, requested.vel_exit) {
                return Err(PlanDefect::WrongFinalVelocity {
                    kind,
                    actual,
                    expected: requested.vel_exit,
                });
            }
        }

        let peak = self.peak_velocity();
        let ceiling = c.vel_ceiling();
        if kind.shape.is_cruise() {
            if !tol.is_close(peak, ceiling) {
                return Err(PlanDefect::CruiseOffLimit {
                    kind,
                    peak,
                    vel_lim: ceiling,
                });
            }
        } else if !tol.le(peak, ceiling) {
            return Err(PlanDefect::PeakOverLimit {
                kind,
                peak,
                vel_lim: ceiling,
            });
        }

        Ok(())
    }
}

impl fmt::Display for TrajectoryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind)?;
        writeln!(f, "  {}", self.constraints)?;
        write!(f, "  {}", self.phases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::RampKind;

    fn cruise_plan() -> TrajectoryPlan {
        let c = MotionConstraints::new(1.0, 1.0, 1.0, 2.0, 10.0, 0.0, 0.0);
        let phases = PhaseDurations::from_ramps((0.5, 0.5), 8.5, (0.5, 0.5));
        TrajectoryPlan::new(
            c,
            phases,
            ProfileShape::Cruise {
                accel: RampKind::Limited,
                decel: RampKind::Limited,
            },
        )
    }

    #[test]
    fn derived_quantities() {
        let plan = cruise_plan();
        assert!(plan.has_cruise_phase());
        assert!((plan.distance() - 10.0).abs() < 1e-12);
        assert!((plan.peak_velocity() - 1.0).abs() < 1e-12);
        assert_eq!(plan.orientation(), Orientation::AccelerationFirst);
        assert_eq!(plan.simulation_args()[3], 8.5);
        assert_eq!(plan.simulation_args()[7], 2.0);
    }

    #[test]
    fn verify_accepts_consistent_plan() {
        let plan = cruise_plan();
        assert_eq!(plan.verify(&plan.constraints, &SolverConfig::default()), Ok(()));
    }

    #[test]
    fn verify_flags_distance_mismatch() {
        let mut plan = cruise_plan();
        plan.phases.0[3] = 9.0;
        assert!(matches!(
            plan.verify(&plan.constraints, &SolverConfig::default()),
            Err(PlanDefect::WrongDistance { .. })
        ));
    }

    #[test]
    fn verify_flags_wrong_final_velocity() {
        let plan = cruise_plan();
        let mut requested = plan.constraints;
        requested.vel_exit = 0.5;
        assert!(matches!(
            plan.verify(&requested, &SolverConfig::default()),
            Err(PlanDefect::WrongFinalVelocity { .. })
        ));
    }

    #[test]
    fn display_names_kind() {
        let text = cruise_plan().to_string();
        assert!(text.starts_with("cruise"));
        assert!(text.contains("T4: 8.50000000"));
    }
}
