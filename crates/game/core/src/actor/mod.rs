//! Actors and their state graphs.
//!
//! Every actor splits into a *body* (the data its states read and write) and
//! a [`FiniteStateMachine`](state_machine::FiniteStateMachine) over that body.
//! The machine borrows the body mutably while it dispatches, so states never
//! hold references back to their actor.
//!
//! - [`Player`]: six input-driven states
//! - [`Enemy`]: shared idle/movement/take-damage/dead graph; chasers and
//!   slimes differ only in their idle and movement states

mod enemy;
mod player;
mod slime;

pub use enemy::{
    Enemy, EnemyBody, EnemyDead, EnemyIdle, EnemyMovement, EnemyStateId, EnemyTakeDamage,
};
pub use player::{Player, PlayerBody, PlayerStateId};
pub use slime::{SlimeIdle, SlimeMovement};

use glam::Vec2;

/// Position and facing of an actor in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kinematics {
    pub position: Vec2,
    /// Unit vector the sprite faces.
    pub facing: Vec2,
}

impl Kinematics {
    /// Actor at `position`, facing up.
    pub const fn at(position: Vec2) -> Self {
        Self {
            position,
            facing: Vec2::Y,
        }
    }

    /// Point `distance` units in front of the actor.
    pub fn ahead(&self, distance: f32) -> Vec2 {
        self.position + self.facing * distance
    }
}

impl Default for Kinematics {
    fn default() -> Self {
        Self::at(Vec2::ZERO)
    }
}
