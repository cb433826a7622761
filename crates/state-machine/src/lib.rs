//! Frame-driven finite state machine for game actors.
//!
//! This library provides a small, generic state machine that drives actor
//! behavior one logic frame and one physics step at a time.
//!
//! - **Typed identity**: states are keyed by a small `Copy` key, usually an enum
//! - **Closed registry**: every state is registered once, before the first tick
//! - **Explicit transitions**: exit the old state, swap, enter the new state
//! - **No ownership cycles**: states receive the actor data as a `&mut C`
//!   argument instead of holding a pointer back to it
//!
//! # Architecture
//!
//! - [`StateId`]: Marker trait for state keys
//! - [`State`]: Lifecycle hooks (`enter`, `exit`, `update`, `fixed_update`)
//! - [`Transition`]: What a hook asks the machine to do next
//! - [`FiniteStateMachine`]: Registry, current state and dispatch
//! - [`StateMachineBuilder`]: Registration plus mandatory initial state
//! - [`timer`]: Threshold accumulator used by timed state pairs

pub mod builder;
pub mod error;
pub mod id;
pub mod machine;
pub mod state;
pub mod timer;

// Re-export core types for ergonomic API
pub use builder::StateMachineBuilder;
pub use error::FsmError;
pub use id::StateId;
pub use machine::{DEFAULT_MAX_CHAIN, FiniteStateMachine, StateHandle};
pub use state::{State, Transition};
