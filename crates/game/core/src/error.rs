//! Error infrastructure for actor state graphs.
//!
//! State machine failures are wrapped with the kind of actor that raised
//! them, and classified by severity so hosts can decide whether to keep
//! ticking.

use state_machine::FsmError;

use crate::actor::{EnemyStateId, PlayerStateId};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The actor keeps a consistent state and can keep ticking
/// - **Configuration**: The state graph was wired incorrectly; fix the setup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// The request was dropped; the actor is still in a valid state.
    ///
    /// Examples: transition to an unregistered state, runaway enter chain
    Recoverable,

    /// The state graph itself is wrong.
    ///
    /// Examples: duplicate state keys, no initial state
    Configuration,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Configuration => "configuration",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Errors surfaced while building or ticking an actor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActorError {
    #[error("player state machine: {0}")]
    Player(#[from] FsmError<PlayerStateId>),

    #[error("enemy state machine: {0}")]
    Enemy(#[from] FsmError<EnemyStateId>),
}

impl ActorError {
    /// Returns the severity level of this error.
    pub const fn severity(&self) -> ErrorSeverity {
        let configuration = match self {
            Self::Player(err) => err.is_configuration(),
            Self::Enemy(err) => err.is_configuration(),
        };
        if configuration {
            ErrorSeverity::Configuration
        } else {
            ErrorSeverity::Recoverable
        }
    }

    /// Returns a static string identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Player(err) => err.error_code(),
            Self::Enemy(err) => err.error_code(),
        }
    }
}
