//! Exponential smoothing filter shared by the analog sensor channels.
//!
//! `smoothed = alpha * raw + (1 - alpha) * smoothed_prev`
//!
//! The filter state is explicit and seeded with the first raw sample, so
//! there is no hidden first-call asymmetry: the first output equals the
//! first input and every later output blends toward new readings at the
//! channel's configured rate.

/// Single-channel exponential smoother.
#[derive(Debug, Clone, Copy)]
pub struct ExpSmoother {
    alpha: f32,
    state: Option<f32>,
}

impl ExpSmoother {
    /// `alpha` is the weight of the newest sample, in (0, 1].
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            state: None,
        }
    }

    /// Feed one raw sample and return the smoothed value.
    pub fn apply(&mut self, raw: f32) -> f32 {
        let next = match self.state {
            None => raw,
            Some(prev) => self.alpha * raw + (1.0 - self.alpha) * prev,
        };
        self.state = Some(next);
        next
    }

    /// Last smoothed value, if any sample has been fed.
    pub fn value(&self) -> Option<f32> {
        self.state
    }

    /// Discard the filter memory; the next sample re-seeds it.
    pub fn reset(&mut self) {
        self.state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_seeds_state() {
        let mut s = ExpSmoother::new(0.2);
        assert_eq!(s.value(), None);
        assert!((s.apply(12.0) - 12.0).abs() < f32::EPSILON);
        assert_eq!(s.value(), Some(12.0));
    }

    #[test]
    fn subsequent_samples_blend() {
        let mut s = ExpSmoother::new(0.2);
        s.apply(10.0);
        let out = s.apply(20.0);
        // 0.2 * 20 + 0.8 * 10 = 12
        assert!((out - 12.0).abs() < 1e-5);
    }

    #[test]
    fn converges_to_constant_input() {
        let mut s = ExpSmoother::new(0.3);
        s.apply(0.0);
        for _ in 0..200 {
            s.apply(50.0);
        }
        assert!((s.value().unwrap() - 50.0).abs() < 0.01);
    }

    #[test]
    fn reset_reseeds_on_next_sample() {
        let mut s = ExpSmoother::new(0.2);
        s.apply(100.0);
        s.reset();
        assert!((s.apply(1.0) - 1.0).abs() < f32::EPSILON);
    }
}
