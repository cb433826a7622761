//! Core state trait.
//!
//! This module defines the [`State`] trait, which every node of an actor's
//! state graph implements. The trait is generic over the key type `K` and
//! over a context type `C`, the actor data the state reads and mutates.

use crate::StateId;

/// What a lifecycle hook asks the machine to do after it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition<K> {
    /// Keep the current state.
    Stay,

    /// Exit the current state and enter the state registered under `K`.
    ///
    /// Requesting the current state is allowed and re-runs exit and enter.
    To(K),
}

impl<K> Transition<K> {
    /// Returns `true` if no transition was requested.
    #[inline]
    pub fn is_stay(&self) -> bool {
        matches!(self, Transition::Stay)
    }

    /// Returns the requested target, if any.
    #[inline]
    pub fn target(self) -> Option<K> {
        match self {
            Transition::Stay => None,
            Transition::To(id) => Some(id),
        }
    }

    /// Returns `self` if it requests a transition, otherwise `other`.
    ///
    /// Useful for a base behavior whose transition should win over a
    /// specialised one.
    #[inline]
    pub fn or(self, other: Transition<K>) -> Transition<K> {
        match self {
            Transition::Stay => other,
            to => to,
        }
    }
}

impl<K> From<Option<K>> for Transition<K> {
    fn from(value: Option<K>) -> Self {
        match value {
            Some(id) => Transition::To(id),
            None => Transition::Stay,
        }
    }
}

/// One node of an actor's state graph.
///
/// All four hooks are required; a state with nothing to do returns
/// [`Transition::Stay`] or has an empty body.
///
/// # Contract
///
/// - `enter` runs exactly once per transition into this state
/// - `exit` runs exactly once per transition out of this state, and never
///   for the very first state a machine enters
/// - `update` runs once per logic frame while this state is current
/// - `fixed_update` runs once per physics step while this state is current
///
/// A hook requests at most one transition. When several conditions hold at
/// once, the state checks them in a fixed priority order and returns the
/// first match.
pub trait State<K: StateId, C> {
    /// The key this state is registered under.
    fn id(&self) -> K;

    /// Called when the machine switches into this state.
    ///
    /// Returning [`Transition::To`] chains straight into another state.
    fn enter(&mut self, ctx: &mut C) -> Transition<K>;

    /// Called when the machine switches away from this state.
    fn exit(&mut self, ctx: &mut C);

    /// Called once per logic frame. `dt` is the frame's elapsed time in seconds.
    fn update(&mut self, ctx: &mut C, dt: f32) -> Transition<K>;

    /// Called once per physics step. `dt` is the fixed step length in seconds.
    fn fixed_update(&mut self, ctx: &mut C, dt: f32) -> Transition<K>;
}

/// Blanket implementation for boxed states.
///
/// This allows `Box<dyn State<K, C>>` to also implement `State<K, C>`,
/// so a specialised state can wrap and delegate to a base state.
impl<K: StateId, C, S: State<K, C> + ?Sized> State<K, C> for Box<S> {
    #[inline]
    fn id(&self) -> K {
        (**self).id()
    }

    #[inline]
    fn enter(&mut self, ctx: &mut C) -> Transition<K> {
        (**self).enter(ctx)
    }

    #[inline]
    fn exit(&mut self, ctx: &mut C) {
        (**self).exit(ctx)
    }

    #[inline]
    fn update(&mut self, ctx: &mut C, dt: f32) -> Transition<K> {
        (**self).update(ctx, dt)
    }

    #[inline]
    fn fixed_update(&mut self, ctx: &mut C, dt: f32) -> Transition<K> {
        (**self).fixed_update(ctx, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_converts_to_transition() {
        assert_eq!(Transition::from(Some(3u8)), Transition::To(3));
        assert_eq!(Transition::<u8>::from(None), Transition::Stay);
    }

    #[test]
    fn or_prefers_requested_transition() {
        assert_eq!(Transition::To(1u8).or(Transition::To(2)), Transition::To(1));
        assert_eq!(Transition::Stay.or(Transition::To(2u8)), Transition::To(2));
        assert!(Transition::<u8>::Stay.or(Transition::Stay).is_stay());
    }

    #[test]
    fn target_extracts_key() {
        assert_eq!(Transition::To(7u8).target(), Some(7));
        assert_eq!(Transition::<u8>::Stay.target(), None);
    }
}
