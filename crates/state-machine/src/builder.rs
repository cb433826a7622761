//! Builder for wiring an actor's state graph.
//!
//! Collects the states, the mandatory initial state and the machine options,
//! then registers everything and enters the initial state in one step.
//! There is no implicit default state: forgetting [`initial`] is an error.
//!
//! [`initial`]: StateMachineBuilder::initial

use crate::{DEFAULT_MAX_CHAIN, FiniteStateMachine, FsmError, State, StateId};

/// Staged construction of a [`FiniteStateMachine`].
pub struct StateMachineBuilder<K, C> {
    label: &'static str,
    states: Vec<Box<dyn State<K, C>>>,
    initial: Option<K>,
    max_chain: usize,
}

impl<K: StateId, C> StateMachineBuilder<K, C> {
    /// Starts an empty graph.
    pub fn new() -> Self {
        Self {
            label: "fsm",
            states: Vec::new(),
            initial: None,
            max_chain: DEFAULT_MAX_CHAIN,
        }
    }

    /// Name used for the machine in log output.
    #[must_use]
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Adds a state to the graph.
    #[must_use]
    pub fn state<S>(mut self, state: S) -> Self
    where
        S: State<K, C> + 'static,
    {
        self.states.push(Box::new(state));
        self
    }

    /// Adds several boxed states to the graph.
    #[must_use]
    pub fn states(mut self, states: impl IntoIterator<Item = Box<dyn State<K, C>>>) -> Self {
        self.states.extend(states);
        self
    }

    /// The state entered when the machine is built.
    #[must_use]
    pub fn initial(mut self, id: K) -> Self {
        self.initial = Some(id);
        self
    }

    /// Cap on transitions chained from `enter` hooks.
    #[must_use]
    pub fn max_chain(mut self, max_chain: usize) -> Self {
        self.max_chain = max_chain;
        self
    }

    /// Registers all states and enters the initial state.
    ///
    /// # Errors
    ///
    /// - [`FsmError::MissingInitialState`] if no initial state was chosen
    /// - [`FsmError::DuplicateState`] if two states share a key
    /// - [`FsmError::UnknownState`] if the initial state was never added
    pub fn build(self, ctx: &mut C) -> Result<FiniteStateMachine<K, C>, FsmError<K>> {
        let initial = self.initial.ok_or(FsmError::MissingInitialState)?;

        let mut fsm = FiniteStateMachine::new()
            .with_label(self.label)
            .with_max_chain(self.max_chain);
        for state in self.states {
            fsm.try_add_boxed(state)?;
        }

        fsm.set_current_state(initial, ctx)?;
        Ok(fsm)
    }
}

impl<K: StateId, C> Default for StateMachineBuilder<K, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Transition;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
    enum Light {
        Red,
        Green,
    }

    struct Lamp {
        id: Light,
        next: Light,
        after: f32,
    }

    #[derive(Default)]
    struct Crossing {
        elapsed: f32,
        entered: Vec<Light>,
    }

    impl State<Light, Crossing> for Lamp {
        fn id(&self) -> Light {
            self.id
        }

        fn enter(&mut self, ctx: &mut Crossing) -> Transition<Light> {
            ctx.entered.push(self.id);
            Transition::Stay
        }

        fn exit(&mut self, ctx: &mut Crossing) {
            ctx.elapsed = 0.0;
        }

        fn update(&mut self, ctx: &mut Crossing, dt: f32) -> Transition<Light> {
            ctx.elapsed += dt;
            if ctx.elapsed >= self.after {
                Transition::To(self.next)
            } else {
                Transition::Stay
            }
        }

        fn fixed_update(&mut self, _ctx: &mut Crossing, _dt: f32) -> Transition<Light> {
            Transition::Stay
        }
    }

    fn lamps() -> StateMachineBuilder<Light, Crossing> {
        StateMachineBuilder::new()
            .label("crossing")
            .state(Lamp {
                id: Light::Red,
                next: Light::Green,
                after: 1.0,
            })
            .state(Lamp {
                id: Light::Green,
                next: Light::Red,
                after: 2.0,
            })
    }

    #[test]
    fn build_enters_initial_state() {
        let mut ctx = Crossing::default();
        let fsm = lamps().initial(Light::Red).build(&mut ctx).unwrap();

        assert_eq!(fsm.current_id(), Some(Light::Red));
        assert_eq!(fsm.label(), "crossing");
        assert_eq!(ctx.entered, [Light::Red]);
    }

    #[test]
    fn build_without_initial_fails() {
        let mut ctx = Crossing::default();
        let err = lamps().build(&mut ctx).unwrap_err();

        assert_eq!(err, FsmError::MissingInitialState);
        assert!(ctx.entered.is_empty());
    }

    #[test]
    fn build_rejects_duplicates_before_any_tick() {
        let mut ctx = Crossing::default();
        let err = lamps()
            .state(Lamp {
                id: Light::Red,
                next: Light::Red,
                after: 0.0,
            })
            .initial(Light::Red)
            .build(&mut ctx)
            .unwrap_err();

        assert_eq!(err, FsmError::DuplicateState { id: Light::Red });
        assert!(ctx.entered.is_empty());
    }

    #[test]
    fn built_machine_cycles() {
        let mut ctx = Crossing::default();
        let mut fsm = lamps().initial(Light::Red).build(&mut ctx).unwrap();

        for _ in 0..4 {
            fsm.update(&mut ctx, 0.25).unwrap();
        }
        assert_eq!(fsm.current_id(), Some(Light::Green));

        for _ in 0..8 {
            fsm.update(&mut ctx, 0.25).unwrap();
        }
        assert_eq!(fsm.current_id(), Some(Light::Red));
        assert_eq!(ctx.entered, [Light::Red, Light::Green, Light::Red]);
    }
}
