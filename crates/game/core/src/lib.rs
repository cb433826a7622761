//! Actor state graphs and the data they act on.
//!
//! `game-core` wires the generic [`state_machine`] engine into concrete actor
//! behavior: the player's input-driven graph and the enemy graphs (chaser and
//! slime). Actors never talk to rendering, physics or scene management
//! directly; they queue [`Effect`]s that the host drains after each tick.
pub mod actor;
pub mod config;
pub mod contact;
pub mod effects;
pub mod error;
pub mod health;
pub mod input;

pub use actor::{Enemy, EnemyBody, EnemyStateId, Kinematics, Player, PlayerBody, PlayerStateId};
pub use config::{EnemyConfig, EnemyKind, GameConfig, PlayerConfig};
pub use contact::Tag;
pub use effects::{AnimationFlag, AnimationTrigger, Effect, Effects, Scene};
pub use error::{ActorError, ErrorSeverity};
pub use health::Health;
pub use input::{Button, InputFlags};
