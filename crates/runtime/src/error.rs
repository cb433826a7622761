//! Stage error types.

use game_core::{ActorError, ErrorSeverity};
use thiserror::Error;

use crate::EnemyHandle;

pub type Result<T> = std::result::Result<T, StageError>;

#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Actor(#[from] ActorError),

    #[error("{handle} is not on the stage")]
    UnknownEnemy { handle: EnemyHandle },

    #[error("fixed timestep must be finite and positive (got {step})")]
    InvalidTimestep { step: f32 },
}

impl StageError {
    /// Returns the severity level of this error.
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Actor(err) => err.severity(),
            Self::UnknownEnemy { .. } => ErrorSeverity::Recoverable,
            Self::InvalidTimestep { .. } => ErrorSeverity::Configuration,
        }
    }
}
