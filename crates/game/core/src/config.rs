//! Per-actor tunables.
//!
//! Values are supplied when an actor is constructed and never change during
//! its lifetime. Defaults match the shipped prefabs.

/// Player tunables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerConfig {
    /// Health the player spawns with.
    pub health_total: u32,
    /// Health removed each time the player enters the take-damage state.
    pub damage_taken: u32,
    /// Movement speed in world units per second at full stick deflection.
    pub move_speed: f32,
    /// Distance in front of the player where the sword hitbox is placed.
    pub hitbox_distance: f32,
}

impl PlayerConfig {
    pub const DEFAULT_HEALTH_TOTAL: u32 = 100;
    pub const DEFAULT_DAMAGE_TAKEN: u32 = 10;
    pub const DEFAULT_MOVE_SPEED: f32 = 200.0;
    pub const DEFAULT_HITBOX_DISTANCE: f32 = 100.0;
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            health_total: Self::DEFAULT_HEALTH_TOTAL,
            damage_taken: Self::DEFAULT_DAMAGE_TAKEN,
            move_speed: Self::DEFAULT_MOVE_SPEED,
            hitbox_distance: Self::DEFAULT_HITBOX_DISTANCE,
        }
    }
}

/// Which state graph an enemy runs.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EnemyKind {
    /// Walks toward the player while it is within aggro range.
    #[default]
    Chaser,
    /// Hops toward the player: waits `move_delay`, moves for `move_length`.
    Slime,
}

/// Enemy tunables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyConfig {
    pub kind: EnemyKind,
    /// Health the enemy spawns with.
    pub health_total: u32,
    /// Health removed each time the enemy enters the take-damage state.
    pub damage_taken: u32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Distance within which a chaser starts following its target.
    pub aggro_radius: f32,
    /// Seconds a slime waits between hops.
    pub move_delay: f32,
    /// Seconds a slime hop lasts.
    pub move_length: f32,
}

impl EnemyConfig {
    pub const DEFAULT_HEALTH_TOTAL: u32 = 30;
    pub const DEFAULT_DAMAGE_TAKEN: u32 = 10;
    pub const DEFAULT_SPEED: f32 = 150.0;
    pub const DEFAULT_AGGRO_RADIUS: f32 = 600.0;
    pub const DEFAULT_MOVE_DELAY: f32 = 1.0;
    pub const DEFAULT_MOVE_LENGTH: f32 = 0.5;

    /// Default tunables for the given kind.
    pub fn new(kind: EnemyKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Slime with custom hop timing (builder pattern).
    #[must_use]
    pub fn slime(move_delay: f32, move_length: f32) -> Self {
        Self {
            kind: EnemyKind::Slime,
            move_delay,
            move_length,
            ..Self::default()
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            kind: EnemyKind::default(),
            health_total: Self::DEFAULT_HEALTH_TOTAL,
            damage_taken: Self::DEFAULT_DAMAGE_TAKEN,
            speed: Self::DEFAULT_SPEED,
            aggro_radius: Self::DEFAULT_AGGRO_RADIUS,
            move_delay: Self::DEFAULT_MOVE_DELAY,
            move_length: Self::DEFAULT_MOVE_LENGTH,
        }
    }
}

/// Session-wide configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Length of one physics step in seconds.
    pub fixed_timestep: f32,
    /// Distance at which two bodies are considered touching.
    pub contact_radius: f32,
    pub player: PlayerConfig,
}

impl GameConfig {
    /// Nominal physics rate.
    pub const PHYSICS_HZ: f32 = 50.0;
    pub const DEFAULT_FIXED_TIMESTEP: f32 = 1.0 / Self::PHYSICS_HZ;
    pub const DEFAULT_CONTACT_RADIUS: f32 = 32.0;
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: Self::DEFAULT_FIXED_TIMESTEP,
            contact_radius: Self::DEFAULT_CONTACT_RADIUS,
            player: PlayerConfig::default(),
        }
    }
}
