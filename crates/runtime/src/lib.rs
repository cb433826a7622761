//! Headless host for actor state graphs.
//!
//! [`Stage`] plays the role of the world an engine would normally provide:
//! it owns the player and the enemies, drives their logic and physics ticks
//! from a frame clock, detects contacts, and applies the effects actors
//! queue.
//!
//! Modules are organized by responsibility:
//! - [`stage`] hosts the world and the per-frame loop
//! - [`step`] converts variable frame time into fixed physics steps
//! - [`animator`] records the animation requests actors make
//! - [`error`] wraps actor failures with stage-level context
pub mod animator;
pub mod error;
pub mod stage;
pub mod step;

pub use animator::Animator;
pub use error::{Result, StageError};
pub use stage::{Body, EnemyHandle, Outcome, Stage};
pub use step::FixedStep;
