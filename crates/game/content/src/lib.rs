//! Data-driven actor tunables and spawn rosters.
//!
//! This crate provides loaders for the files that configure a session:
//! - Game configuration (physics step, contact radius, player tunables) via TOML
//! - Enemy roster (kind, tunables, spawn position) via RON
//!
//! Content is consumed once at startup; actors never see the files.

pub mod spawn;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use spawn::SpawnSpec;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, RosterLoader};
