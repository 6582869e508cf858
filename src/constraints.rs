use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConstraintError;

/// Which way a profile bends first.
///
/// Deceleration-first problems are solved by mirroring them into
/// acceleration-first ones (see [`MotionConstraints::mirrored`]), so every
/// signed quantity of a deceleration-first plan is negated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    AccelerationFirst,
    DecelerationFirst,
}

impl Orientation {
    /// +1.0 or -1.0, the factor that maps plan-space values back to physical ones.
    pub fn sign(self) -> f64 {
        match self {
            Orientation::AccelerationFirst => 1.0,
            Orientation::DecelerationFirst => -1.0,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Orientation::AccelerationFirst => "accel-first",
            Orientation::DecelerationFirst => "decel-first",
        })
    }
}

/// Limits and goal of a single-axis move.
///
/// The move covers `dist` starting at `vel_init` and ending at `vel_exit`,
/// never exceeding `vel_lim`, `acc_lim` (while speeding up), `dec_lim` (while
/// slowing down) or `jrk_lim`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionConstraints {
    /// Velocity ceiling (V).
    pub vel_lim: f64,
    /// Acceleration ceiling (A).
    pub acc_lim: f64,
    /// Deceleration ceiling (D).
    pub dec_lim: f64,
    /// Jerk ceiling (J).
    pub jrk_lim: f64,
    /// Displacement to cover (L).
    pub dist: f64,
    /// Velocity at the start of the move (v0).
    pub vel_init: f64,
    /// Requested velocity at the end of the move (vf).
    pub vel_exit: f64,
}

impl MotionConstraints {
    pub fn new(
        vel_lim: f64,
        acc_lim: f64,
        dec_lim: f64,
        jrk_lim: f64,
        dist: f64,
        vel_init: f64,
        vel_exit: f64,
    ) -> Self {
        Self {
            vel_lim,
            acc_lim,
            dec_lim,
            jrk_lim,
            dist,
            vel_init,
            vel_exit,
        }
    }

    /// Checks the caller contract: finite values, positive limits,
    /// non-negative distance and both velocities inside `[0, vel_lim]`.
    pub fn validate(&self) -> Result<(), ConstraintError> {
        let fields = [
            ("vel_lim", self.vel_lim),
            ("acc_lim", self.acc_lim),
            ("dec_lim", self.dec_lim),
            ("jrk_lim", self.jrk_lim),
            ("dist", self.dist),
            ("vel_init", self.vel_init),
            ("vel_exit", self.vel_exit),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConstraintError::NotFinite { name, value });
            }
        }

        for &(name, value) in &fields[..4] {
            if value <= 0.0 {
                return Err(ConstraintError::NonPositiveLimit { name, value });
            }
        }

        if self.dist < 0.0 {
            return Err(ConstraintError::NegativeDistance(self.dist));
        }

        for (name, value) in [("vel_init", self.vel_init), ("vel_exit", self.vel_exit)] {
            if !(0.0..=self.vel_lim).contains(&value) {
                return Err(ConstraintError::VelocityOutOfRange {
                    name,
                    value,
                    vel_lim: self.vel_lim,
                });
            }
        }
        Ok(())
    }

    /// True unless `dist` carries a negative sign, which is how
    /// [`mirrored`](Self::mirrored) marks a deceleration-first problem.
    /// `-0.0` counts as negative so a zero-length mirrored move keeps its tag.
    pub fn acceleration_first(&self) -> bool {
        !self.dist.is_sign_negative()
    }

    pub fn orientation(&self) -> Orientation {
        if self.acceleration_first() {
            Orientation::AccelerationFirst
        } else {
            Orientation::DecelerationFirst
        }
    }

    /// Upper bound of the signed velocity band the profile must stay in.
    pub fn vel_ceiling(&self) -> f64 {
        if self.acceleration_first() {
            self.vel_lim
        } else {
            0.0
        }
    }

    /// Lower bound of the signed velocity band the profile must stay in.
    pub fn vel_floor(&self) -> f64 {
        if self.acceleration_first() {
            0.0
        } else {
            -self.vel_lim
        }
    }

    /// The deceleration-first transform: negate the displacement and both
    /// velocities and swap the acceleration and deceleration ceilings. A
    /// profile that speeds up in the mirrored problem slows down in the
    /// original one. Applying it twice gives back the original constraints.
    pub fn mirrored(&self) -> Self {
        Self {
            vel_lim: self.vel_lim,
            acc_lim: self.dec_lim,
            dec_lim: self.acc_lim,
            jrk_lim: self.jrk_lim,
            dist: -self.dist,
            vel_init: -self.vel_init,
            vel_exit: -self.vel_exit,
        }
    }

    /// Copy with the jerk ceiling multiplied by `factor`.
    pub fn with_jerk_scaled(&self, factor: f64) -> Self {
        Self {
            jrk_lim: self.jrk_lim * factor,
            ..*self
        }
    }
}

impl fmt::Display for MotionConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "V: {}, A: {}, D: {}, J: {}, L: {}, v0: {}, vf: {}",
            self.vel_lim,
            self.acc_lim,
            self.dec_lim,
            self.jrk_lim,
            self.dist,
            self.vel_init,
            self.vel_exit
        )
    }
}
