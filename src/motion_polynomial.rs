use serde::{Deserialize, Serialize};

/// Describes a single phase of an S-curve profile as a constant-jerk
/// polynomial: the state at the start of the phase plus its duration.
#[derive(Default, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionPolynomial {
    pub time: f64,
    pub pos: f64,
    pub vel: f64,
    pub acc: f64,
    pub jrk: f64,
}

/// Kinematic state at one instant.
#[derive(Default, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    pub pos: f64,
    pub vel: f64,
    pub acc: f64,
}

impl MotionPolynomial {
    /// Creates a new MotionPolynomial.
    pub fn new(time: f64, pos: f64, vel: f64, acc: f64, jrk: f64) -> Self {
        Self {
            time,
            pos,
            vel,
            acc,
            jrk,
        }
    }

    /// State `dt` seconds after the start of the phase. `dt` is not clamped to
    /// the phase duration.
    pub fn state_at(&self, dt: f64) -> MotionState {
        // acc(t) = a0 + j0*t
        let acc = self.acc + self.jrk * dt;

        // vel(t) = v0 + a0*t + j0*t^2/2
        let vel = self.vel + (self.acc + acc) * dt * 0.5;

        // pos(t) = s0 + v0*t + a0*t^2/2 + j0*t^3/6
        let vel_avg = self.vel + (2.0 * self.acc + acc) * dt / 6.0;
        let pos = self.pos + vel_avg * dt;

        MotionState { pos, vel, acc }
    }

    /// State at the end of the phase.
    pub fn end_state(&self) -> MotionState {
        self.state_at(self.time)
    }

    /// The polynomial that starts where this one ends, with the given
    /// duration and jerk.
    pub fn chain(&self, time: f64, jrk: f64) -> Self {
        let end = self.end_state();
        Self::new(time, end.pos, end.vel, end.acc, jrk)
    }
}
