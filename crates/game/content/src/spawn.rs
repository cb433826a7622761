//! Enemy spawn entries.

use game_core::EnemyConfig;
use glam::Vec2;

/// One enemy to place in the world at startup.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnSpec {
    /// Name used in logs.
    pub name: String,
    /// Spawn position as `(x, y)`.
    pub position: (f32, f32),
    #[cfg_attr(feature = "serde", serde(default))]
    pub config: EnemyConfig,
}

impl SpawnSpec {
    pub fn new(name: impl Into<String>, position: Vec2, config: EnemyConfig) -> Self {
        Self {
            name: name.into(),
            position: (position.x, position.y),
            config,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.position.0, self.position.1)
    }
}
