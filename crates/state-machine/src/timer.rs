//! Elapsed-time threshold used by oscillating state pairs.
//!
//! The timer lives on the actor, not on the state, so two sibling states can
//! share it. Each state adds the frame time and flips to its sibling once the
//! threshold is reached, zeroing the timer on the way out.

/// Adds `dt` to `timer` and reports whether `threshold` has been reached.
///
/// On expiry the timer is reset to zero before returning `true`. Any overshoot
/// is discarded, so every phase starts from exactly zero.
#[inline]
pub fn accumulate(timer: &mut f32, dt: f32, threshold: f32) -> bool {
    *timer += dt;
    if *timer >= threshold {
        *timer = 0.0;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_threshold_is_reached() {
        let mut timer = 0.0;
        assert!(!accumulate(&mut timer, 0.25, 0.5));
        assert!(accumulate(&mut timer, 0.25, 0.5));
        assert_eq!(timer, 0.0);
    }

    #[test]
    fn overshoot_is_discarded() {
        let mut timer = 0.4;
        assert!(accumulate(&mut timer, 0.3, 0.5));
        assert_eq!(timer, 0.0);
    }

    #[test]
    fn zero_threshold_fires_every_call() {
        let mut timer = 0.0;
        assert!(accumulate(&mut timer, 0.0, 0.0));
        assert!(accumulate(&mut timer, 0.1, 0.0));
    }
}
