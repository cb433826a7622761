//! Fixed-step clock.
//!
//! Frame time is accumulated and paid out in whole physics steps. Leftover
//! time carries into the next frame.

/// Accumulator that turns variable frame deltas into fixed steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedStep {
    /// Upper bound on steps paid out by one frame.
    ///
    /// A frame longer than `max_steps * step` drops the backlog instead of
    /// simulating it.
    pub const DEFAULT_MAX_STEPS: u32 = 8;

    /// Creates a clock with the given step length in seconds.
    ///
    /// # Panics
    ///
    /// Panics if `step` is not finite and positive.
    pub fn new(step: f32) -> Self {
        assert!(
            Self::is_valid_step(step),
            "fixed step must be finite and positive, got {step}"
        );
        Self {
            step,
            accumulator: 0.0,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    /// Returns true if `step` can drive the clock.
    pub fn is_valid_step(step: f32) -> bool {
        step.is_finite() && step > 0.0
    }

    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Time carried over that has not yet formed a full step.
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Fraction of a step carried over, in `[0, 1)`.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    /// Adds `dt` and returns how many steps to run this frame.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);

        let mut steps = 0;
        while self.accumulator >= self.step {
            if steps == self.max_steps {
                tracing::warn!(
                    dropped = self.accumulator,
                    "frame exceeded step budget; dropping backlog"
                );
                self.accumulator = 0.0;
                break;
            }
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }
}
