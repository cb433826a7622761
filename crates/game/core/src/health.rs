//! Health pool shared by every actor.

/// Current and maximum health.
///
/// Damage saturates at zero; the pool never goes negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    current: u32,
    total: u32,
}

impl Health {
    /// Full pool of `total` points.
    pub const fn full(total: u32) -> Self {
        Self {
            current: total,
            total,
        }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Returns true once the pool is empty.
    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Removes `amount` points and returns how many were actually removed.
    pub fn reduce(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Remaining health as a fraction of the total (0.0 for an empty pool).
    pub fn ratio(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce_saturates_at_zero() {
        let mut health = Health::full(15);

        assert_eq!(health.reduce(10), 10);
        assert_eq!(health.reduce(10), 5);
        assert_eq!(health.current(), 0);
        assert!(health.is_depleted());
    }

    #[test]
    fn ratio_handles_empty_total() {
        assert_eq!(Health::full(0).ratio(), 0.0);
        assert_eq!(Health::full(40).ratio(), 1.0);
    }
}
