use serde::{Deserialize, Serialize};

/// Returns true when `a` and `b` are within `abs_tol` of each other, or within
/// `rel_tol` relative to the larger magnitude of the two.
pub fn is_close(a: f64, b: f64, rel_tol: f64, abs_tol: f64) -> bool {
    let diff = (a - b).abs();
    diff <= abs_tol.max(rel_tol * a.abs().max(b.abs()))
}

/// Relative + absolute tolerance pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub rel: f64,
    pub abs: f64,
}

impl Tolerance {
    /// Tight tolerance for phase durations and velocities.
    pub const GENERIC: Tolerance = Tolerance { rel: 1e-9, abs: 1e-9 };

    /// Looser tolerance for displacements, which span a wider dynamic range
    /// and accumulate the error of every phase.
    pub const DISTANCE: Tolerance = Tolerance { rel: 1e-6, abs: 1e-6 };

    pub const fn new(rel: f64, abs: f64) -> Self {
        Self { rel, abs }
    }

    pub fn is_close(&self, a: f64, b: f64) -> bool {
        is_close(a, b, self.rel, self.abs)
    }

    /// `a <= b`, allowing `a` to exceed `b` by the tolerance.
    pub fn le(&self, a: f64, b: f64) -> bool {
        a <= b || self.is_close(a, b)
    }

    /// `a >= b`, allowing `a` to fall short of `b` by the tolerance.
    pub fn ge(&self, a: f64, b: f64) -> bool {
        a >= b || self.is_close(a, b)
    }

    pub fn is_valid(&self) -> bool {
        self.rel.is_finite() && self.abs.is_finite() && self.rel >= 0.0 && self.abs >= 0.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::GENERIC
    }
}
