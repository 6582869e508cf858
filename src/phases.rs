use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::constraints::MotionConstraints;
use crate::motion_polynomial::{MotionPolynomial, MotionState};

/// The seven phases of an S-curve profile, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    JerkUpAccel,
    ConstAccel,
    JerkDownAccel,
    Cruise,
    JerkUpDecel,
    ConstDecel,
    JerkDownDecel,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::JerkUpAccel,
        Phase::ConstAccel,
        Phase::JerkDownAccel,
        Phase::Cruise,
        Phase::JerkUpDecel,
        Phase::ConstDecel,
        Phase::JerkDownDecel,
    ];

    /// Sign of the jerk applied during the phase.
    pub fn jerk_sign(self) -> f64 {
        match self {
            Phase::JerkUpAccel | Phase::JerkDownDecel => 1.0,
            Phase::JerkDownAccel | Phase::JerkUpDecel => -1.0,
            Phase::ConstAccel | Phase::Cruise | Phase::ConstDecel => 0.0,
        }
    }

    pub fn ordinal(self) -> usize {
        self as usize
    }
}

/// Durations `T1..T7` of the seven phases. A zero duration collapses the
/// phase out of the profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseDurations(pub [f64; 7]);

impl PhaseDurations {
    /// Profile that only speeds up: `t_jerk` for each jerk ramp and `t_const`
    /// at constant acceleration.
    pub fn accel_only(t_jerk: f64, t_const: f64) -> Self {
        Self([t_jerk, t_const, t_jerk, 0.0, 0.0, 0.0, 0.0])
    }

    /// Full profile from the acceleration ramp `(t_jerk, t_const)`, the cruise
    /// time and the deceleration ramp.
    pub fn from_ramps(accel: (f64, f64), cruise: f64, decel: (f64, f64)) -> Self {
        Self([accel.0, accel.1, accel.0, cruise, decel.0, decel.1, decel.0])
    }

    pub fn get(&self, phase: Phase) -> f64 {
        self.0[phase.ordinal()]
    }

    pub fn cruise(&self) -> f64 {
        self.get(Phase::Cruise)
    }

    /// Total duration.
    pub fn time(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Smallest phase duration.
    pub fn min(&self) -> f64 {
        self.0.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Integrates the jerk pattern `+J, 0, -J, 0, -J, 0, +J`, starting at
    /// `vel_init` with zero acceleration, into seven chained polynomials.
    pub fn segments(&self, constraints: &MotionConstraints) -> [MotionPolynomial; 7] {
        let jrk = constraints.jrk_lim;
        let mut mt = [MotionPolynomial::default(); 7];
        let mut prev = MotionPolynomial::new(0.0, 0.0, constraints.vel_init, 0.0, 0.0);
        for (slot, phase) in mt.iter_mut().zip(Phase::ALL) {
            *slot = prev.chain(self.get(phase), phase.jerk_sign() * jrk);
            prev = *slot;
        }
        mt
    }

    /// Kinematic state at elapsed time `t`, clamped to `[0, time()]`.
    pub fn state_at(&self, constraints: &MotionConstraints, t: f64) -> MotionState {
        let segments = self.segments(constraints);
        let mut remaining = t.max(0.0);
        for segment in &segments {
            if remaining <= segment.time {
                return segment.state_at(remaining);
            }
            remaining -= segment.time;
        }
        segments[6].end_state()
    }

    /// Instantaneous velocity at elapsed time `t`.
    pub fn velocity_at(&self, constraints: &MotionConstraints, t: f64) -> f64 {
        self.state_at(constraints, t).vel
    }

    /// Distance covered over the whole profile.
    pub fn distance(&self, constraints: &MotionConstraints) -> f64 {
        self.segments(constraints)[6].end_state().pos
    }

    /// Velocity at the end of the acceleration ramp.
    pub fn peak_velocity(&self, constraints: &MotionConstraints) -> f64 {
        self.segments(constraints)[2].end_state().vel
    }

    /// Velocity at the end of the profile.
    pub fn final_velocity(&self, constraints: &MotionConstraints) -> f64 {
        self.segments(constraints)[6].end_state().vel
    }
}

impl Index<Phase> for PhaseDurations {
    type Output = f64;

    fn index(&self, phase: Phase) -> &f64 {
        &self.0[phase.ordinal()]
    }
}

impl fmt::Display for PhaseDurations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [t1, t2, t3, t4, t5, t6, t7] = self.0;
        write!(
            f,
            "T1: {t1:.8}, T2: {t2:.8}, T3: {t3:.8}, T4: {t4:.8}, T5: {t5:.8}, T6: {t6:.8}, T7: {t7:.8}"
        )
    }
}
