//! Errors surfaced by the state machine.

use crate::StateId;

/// Failure raised while registering states or switching between them.
///
/// Configuration errors (duplicate keys, foreign handles, no initial state)
/// indicate a mis-built state graph. Runtime errors (unknown targets, runaway
/// enter chains) leave the machine in a consistent state and are reported to
/// the caller instead of being swallowed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FsmError<K: StateId> {
    #[error("state `{id}` is already registered")]
    DuplicateState { id: K },

    #[error("no state registered for `{id}`")]
    UnknownState { id: K },

    #[error("handle for `{id}` (slot {slot}) was not issued by this machine")]
    ForeignHandle { id: K, slot: usize },

    #[error("transition chain reached depth {depth} while entering `{id}`")]
    TransitionChainTooDeep { id: K, depth: usize },

    #[error("no initial state was chosen")]
    MissingInitialState,
}

impl<K: StateId> FsmError<K> {
    /// Returns true if this error means the state graph itself is wrong.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DuplicateState { .. } | Self::ForeignHandle { .. } | Self::MissingInitialState
        )
    }

    /// Returns a static identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateState { .. } => "duplicate_state",
            Self::UnknownState { .. } => "unknown_state",
            Self::ForeignHandle { .. } => "foreign_handle",
            Self::TransitionChainTooDeep { .. } => "transition_chain_too_deep",
            Self::MissingInitialState => "missing_initial_state",
        }
    }
}
