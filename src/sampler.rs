use crate::error::SampleError;
use crate::motion_polynomial::MotionPolynomial;
use crate::plan::TrajectoryPlan;

/// One discrete sample of a plan.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub pos: f64,
    pub vel: f64,
    pub acc: f64,
}

/// PlanSampler walks a solved plan in fixed time steps, e.g. to feed a
/// control loop or a plot.
///
/// Samples are physical: deceleration-first plans are flipped back so that
/// position grows towards the requested distance.
pub struct PlanSampler {
    /// The seven phases of the plan
    segments: [MotionPolynomial; 7],

    /// Index of the phase containing the current time
    active: usize,

    /// Plan time at which the active phase starts
    offset: f64,

    /// Orientation sign applied to every sample
    sign: f64,

    /// Update frequency in Hz
    freq: f64,

    /// Next tick to emit
    tick: u64,

    /// Last tick; it lands on the end of the plan
    duration: u64,
}

impl PlanSampler {
    /// Creates a sampler emitting `freq` samples per second.
    pub fn new(plan: &TrajectoryPlan, freq: f64) -> Result<Self, SampleError> {
        if !freq.is_finite() || freq <= 0.0 {
            return Err(SampleError::InvalidFrequency(freq));
        }
        Ok(Self {
            segments: plan.segments(),
            active: 0,
            offset: 0.0,
            sign: plan.orientation().sign(),
            freq,
            tick: 0,
            // saturates for plans longer than u64::MAX ticks
            duration: (plan.time() * freq).ceil() as u64,
        })
    }

    /// Total plan duration in seconds.
    pub fn total_time(&self) -> f64 {
        self.segments.iter().map(|s| s.time).sum()
    }

    /// Number of samples left, including the final one.
    pub fn remaining(&self) -> usize {
        let left = self.duration.saturating_add(1).saturating_sub(self.tick);
        usize::try_from(left).unwrap_or(usize::MAX)
    }

    /// Emits the next sample, or `None` once the end of the plan was emitted.
    pub fn tick(&mut self) -> Option<Sample> {
        if self.tick > self.duration {
            return None;
        }
        let time = (self.tick as f64 / self.freq).min(self.total_time());
        self.tick += 1;

        // skip finished and zero-length phases
        while self.active < 6 && time > self.offset + self.segments[self.active].time {
            self.offset += self.segments[self.active].time;
            self.active += 1;
        }

        let state = self.segments[self.active].state_at(time - self.offset);
        Some(Sample {
            time,
            pos: self.sign * state.pos,
            vel: self.sign * state.vel,
            acc: self.sign * state.acc,
        })
    }
}

impl Iterator for PlanSampler {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        self.tick()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for PlanSampler {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::MotionConstraints;
    use crate::solve::solve;

    #[test]
    fn samples_cover_the_whole_plan() {
        let c = MotionConstraints::new(1.0, 1.0, 1.0, 2.0, 10.0, 0.0, 0.0);
        let plan = solve(&c).unwrap();
        let sampler = PlanSampler::new(&plan, 100.0).unwrap();
        assert_eq!(sampler.len(), 1151);

        let samples: Vec<Sample> = sampler.collect();
        let first = samples[0];
        let last = samples[samples.len() - 1];
        assert_eq!(first, Sample::default());
        assert!((last.time - 11.5).abs() < 1e-12);
        assert!((last.pos - 10.0).abs() < 1e-9);
        assert!(last.vel.abs() < 1e-9);
        assert!(samples.windows(2).all(|w| w[1].pos >= w[0].pos));
        assert!(samples.iter().all(|s| s.vel <= 1.0 + 1e-12));
    }

    #[test]
    fn samples_follow_the_plan() {
        let c = MotionConstraints::new(1.0, 1.0, 1.0, 1.0, 0.1, 0.0, 0.0);
        let plan = solve(&c).unwrap();
        for sample in PlanSampler::new(&plan, 1000.0).unwrap() {
            let state = plan.state_at(sample.time);
            assert!((sample.pos - state.pos).abs() < 1e-12);
            assert!((sample.vel - state.vel).abs() < 1e-12);
        }
    }

    #[test]
    fn deceleration_first_samples_are_physical() {
        let c = MotionConstraints::new(2.0, 1.0, 1.0, 1.0, 0.2, 1.5, 0.5);
        let plan = solve(&c).unwrap();
        let last = PlanSampler::new(&plan, 1000.0).unwrap().last().unwrap();
        assert!((last.pos - 0.2).abs() < 1e-6);
        assert!(last.vel > 0.5 && last.vel < 1.5);
    }

    #[test]
    fn tick_count_saturates() {
        let c = MotionConstraints::new(1.0, 1.0, 1.0, 2.0, 10.0, 0.0, 0.0);
        let plan = solve(&c).unwrap();
        let mut sampler = PlanSampler::new(&plan, 1e300).unwrap();
        assert_eq!(sampler.remaining(), usize::MAX);
        assert_eq!(sampler.next(), Some(Sample::default()));
        assert_eq!(sampler.size_hint().1, Some(sampler.remaining()));
    }

    #[test]
    fn rejects_bad_frequency() {
        let c = MotionConstraints::new(1.0, 1.0, 1.0, 2.0, 10.0, 0.0, 0.0);
        let plan = solve(&c).unwrap();
        assert!(PlanSampler::new(&plan, 0.0).is_err());
        assert!(PlanSampler::new(&plan, f64::NAN).is_err());
    }
}
