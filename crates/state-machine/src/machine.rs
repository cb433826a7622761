//! State registry, current-state tracking and dispatch.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::{FsmError, State, StateId, Transition};

/// Default cap on transitions chained from `enter` hooks.
pub const DEFAULT_MAX_CHAIN: usize = 8;

/// Index of a registered state inside one machine's arena.
///
/// Handles are cheap to copy and are the direct-reference form of
/// [`FiniteStateMachine::set_current_handle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateHandle<K> {
    slot: usize,
    id: K,
}

impl<K: StateId> StateHandle<K> {
    /// The key of the state this handle points at.
    #[inline]
    pub fn id(&self) -> K {
        self.id
    }

    /// Arena slot of the state.
    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }
}

/// Finite state machine over states keyed by `K`, controlling actor data `C`.
///
/// The machine owns its states in an arena and keeps a key index next to it.
/// It performs no legality checks on transitions: any state may request any
/// registered state, and the graph's rules live inside the states' hooks.
///
/// # Semantics
///
/// - Switching exits the outgoing state (if any), swaps the current pointer,
///   then enters the incoming state
/// - Switching to the current state is not skipped; exit and enter run again
/// - A transition returned from `enter` is followed immediately, up to
///   [`max_chain`](Self::max_chain) links
/// - Unknown targets are reported as [`FsmError::UnknownState`] and leave the
///   current state untouched
/// - Dispatching before an initial state is set is a no-op
pub struct FiniteStateMachine<K, C> {
    label: &'static str,
    states: Vec<Box<dyn State<K, C>>>,
    index: HashMap<K, StateHandle<K>>,
    current: Option<StateHandle<K>>,
    max_chain: usize,
    transitions: u64,
    reported_idle: bool,
}

impl<K: StateId, C> FiniteStateMachine<K, C> {
    /// Creates an empty machine with no current state.
    pub fn new() -> Self {
        Self {
            label: "fsm",
            states: Vec::new(),
            index: HashMap::new(),
            current: None,
            max_chain: DEFAULT_MAX_CHAIN,
            transitions: 0,
            reported_idle: false,
        }
    }

    /// Sets the name used for this machine in log output (builder pattern).
    #[must_use]
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Sets the cap on chained `enter` transitions (builder pattern).
    #[must_use]
    pub fn with_max_chain(mut self, max_chain: usize) -> Self {
        self.max_chain = max_chain;
        self
    }

    /// Registers a state under its own key.
    ///
    /// # Panics
    ///
    /// Panics if a state with the same key is already registered. A duplicate
    /// key means the state graph was wired incorrectly.
    pub fn add<S>(&mut self, state: S) -> StateHandle<K>
    where
        S: State<K, C> + 'static,
    {
        match self.try_add(state) {
            Ok(handle) => handle,
            Err(err) => panic!("{}: {}", self.label, err),
        }
    }

    /// Registers a state under its own key, rejecting duplicates.
    pub fn try_add<S>(&mut self, state: S) -> Result<StateHandle<K>, FsmError<K>>
    where
        S: State<K, C> + 'static,
    {
        self.try_add_boxed(Box::new(state))
    }

    /// Registers an already boxed state, rejecting duplicates.
    pub fn try_add_boxed(
        &mut self,
        state: Box<dyn State<K, C>>,
    ) -> Result<StateHandle<K>, FsmError<K>> {
        let id = state.id();
        if self.index.contains_key(&id) {
            return Err(FsmError::DuplicateState { id });
        }

        let handle = StateHandle {
            slot: self.states.len(),
            id,
        };
        self.states.push(state);
        self.index.insert(id, handle);
        trace!(machine = self.label, state = %id, "state registered");
        Ok(handle)
    }

    /// Returns the state registered under `id`.
    pub fn state(&self, id: K) -> Option<&dyn State<K, C>> {
        self.index
            .get(&id)
            .map(|handle| self.states[handle.slot].as_ref())
    }

    /// Returns the handle of the state registered under `id`.
    pub fn handle(&self, id: K) -> Option<StateHandle<K>> {
        self.index.get(&id).copied()
    }

    /// Returns true if a state is registered under `id`.
    pub fn contains(&self, id: K) -> bool {
        self.index.contains_key(&id)
    }

    /// Iterates over registered keys in registration order.
    pub fn ids(&self) -> impl Iterator<Item = K> + '_ {
        self.states.iter().map(|state| state.id())
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if no states are registered.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The active state, or `None` before the first transition.
    pub fn current_state(&self) -> Option<&dyn State<K, C>> {
        self.current.map(|handle| self.states[handle.slot].as_ref())
    }

    /// Key of the active state, or `None` before the first transition.
    pub fn current_id(&self) -> Option<K> {
        self.current.map(|handle| handle.id)
    }

    /// Returns true if the active state is `id`.
    pub fn is_in(&self, id: K) -> bool {
        self.current_id() == Some(id)
    }

    /// Total number of completed switches since construction.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Cap on chained `enter` transitions.
    pub fn max_chain(&self) -> usize {
        self.max_chain
    }

    /// Log label of this machine.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Switches to the state registered under `id`.
    ///
    /// Returns [`FsmError::UnknownState`] without touching the current state
    /// if nothing is registered under `id`.
    pub fn set_current_state(&mut self, id: K, ctx: &mut C) -> Result<(), FsmError<K>> {
        let handle = self.lookup(id)?;
        self.switch_to(handle, ctx)
    }

    /// Switches to the state behind `handle`.
    ///
    /// Returns [`FsmError::ForeignHandle`] if the handle does not name a slot
    /// of this machine holding the same key.
    pub fn set_current_handle(
        &mut self,
        handle: StateHandle<K>,
        ctx: &mut C,
    ) -> Result<(), FsmError<K>> {
        if self.index.get(&handle.id) != Some(&handle) {
            warn!(
                machine = self.label,
                state = %handle.id,
                slot = handle.slot,
                "rejected handle from another machine"
            );
            return Err(FsmError::ForeignHandle {
                id: handle.id,
                slot: handle.slot,
            });
        }
        self.switch_to(handle, ctx)
    }

    /// Runs the active state's `update` hook and applies its transition.
    pub fn update(&mut self, ctx: &mut C, dt: f32) -> Result<(), FsmError<K>> {
        let Some(current) = self.active("update") else {
            return Ok(());
        };
        let next = self.states[current.slot].update(ctx, dt);
        self.apply(next, ctx)
    }

    /// Runs the active state's `fixed_update` hook and applies its transition.
    pub fn fixed_update(&mut self, ctx: &mut C, dt: f32) -> Result<(), FsmError<K>> {
        let Some(current) = self.active("fixed_update") else {
            return Ok(());
        };
        let next = self.states[current.slot].fixed_update(ctx, dt);
        self.apply(next, ctx)
    }

    fn apply(&mut self, next: Transition<K>, ctx: &mut C) -> Result<(), FsmError<K>> {
        match next {
            Transition::Stay => Ok(()),
            Transition::To(id) => self.set_current_state(id, ctx),
        }
    }

    fn active(&mut self, hook: &'static str) -> Option<StateHandle<K>> {
        if self.current.is_none() && !self.reported_idle {
            debug!(machine = self.label, hook, "no current state, dispatch skipped");
            self.reported_idle = true;
        }
        self.current
    }

    fn lookup(&self, id: K) -> Result<StateHandle<K>, FsmError<K>> {
        self.index.get(&id).copied().ok_or_else(|| {
            warn!(
                machine = self.label,
                state = %id,
                current = ?self.current_id(),
                "transition to unregistered state ignored"
            );
            FsmError::UnknownState { id }
        })
    }

    fn switch_to(&mut self, target: StateHandle<K>, ctx: &mut C) -> Result<(), FsmError<K>> {
        let mut next = target;
        let mut depth = 0;

        loop {
            let previous = self.current.replace(next);
            if let Some(previous) = previous {
                self.states[previous.slot].exit(ctx);
            }
            self.transitions += 1;
            debug!(
                machine = self.label,
                from = ?previous.map(|h| h.id),
                to = %next.id,
                "state transition"
            );

            let Transition::To(chained) = self.states[next.slot].enter(ctx) else {
                return Ok(());
            };

            depth += 1;
            if depth > self.max_chain {
                warn!(
                    machine = self.label,
                    state = %next.id,
                    depth,
                    "enter chain too deep, staying in last entered state"
                );
                return Err(FsmError::TransitionChainTooDeep { id: next.id, depth });
            }
            next = self.lookup(chained)?;
        }
    }
}

impl<K: StateId, C> Default for FiniteStateMachine<K, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateId, C> core::fmt::Debug for FiniteStateMachine<K, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FiniteStateMachine")
            .field("label", &self.label)
            .field("states", &self.ids().collect::<Vec<_>>())
            .field("current", &self.current_id())
            .field("transitions", &self.transitions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
    enum TestId {
        A = 0,
        B = 1,
        C = 2,
        Missing = 3,
    }

    #[derive(Default)]
    struct TestContext {
        log: Vec<String>,
    }

    /// State whose hooks record themselves and return scripted transitions.
    struct Scripted {
        id: TestId,
        on_enter: Transition<TestId>,
        on_update: Transition<TestId>,
        on_fixed: Transition<TestId>,
    }

    impl Scripted {
        fn new(id: TestId) -> Self {
            Self {
                id,
                on_enter: Transition::Stay,
                on_update: Transition::Stay,
                on_fixed: Transition::Stay,
            }
        }

        fn entering(mut self, next: TestId) -> Self {
            self.on_enter = Transition::To(next);
            self
        }

        fn updating(mut self, next: TestId) -> Self {
            self.on_update = Transition::To(next);
            self
        }

        fn fixed(mut self, next: TestId) -> Self {
            self.on_fixed = Transition::To(next);
            self
        }
    }

    impl State<TestId, TestContext> for Scripted {
        fn id(&self) -> TestId {
            self.id
        }

        fn enter(&mut self, ctx: &mut TestContext) -> Transition<TestId> {
            ctx.log.push(format!("enter {}", self.id));
            self.on_enter
        }

        fn exit(&mut self, ctx: &mut TestContext) {
            ctx.log.push(format!("exit {}", self.id));
        }

        fn update(&mut self, ctx: &mut TestContext, _dt: f32) -> Transition<TestId> {
            ctx.log.push(format!("update {}", self.id));
            self.on_update
        }

        fn fixed_update(&mut self, ctx: &mut TestContext, _dt: f32) -> Transition<TestId> {
            ctx.log.push(format!("fixed {}", self.id));
            self.on_fixed
        }
    }

    fn machine(states: Vec<Scripted>) -> FiniteStateMachine<TestId, TestContext> {
        let mut fsm = FiniteStateMachine::new().with_label("test");
        for state in states {
            fsm.add(state);
        }
        fsm
    }

    #[test]
    fn first_transition_enters_without_exit() {
        let mut fsm = machine(vec![Scripted::new(TestId::A)]);
        let mut ctx = TestContext::default();

        assert!(fsm.current_state().is_none());
        fsm.set_current_state(TestId::A, &mut ctx).unwrap();

        assert_eq!(ctx.log, ["enter A"]);
        assert_eq!(fsm.current_id(), Some(TestId::A));
        assert_eq!(fsm.transitions(), 1);
    }

    #[test]
    fn switching_exits_then_enters() {
        let mut fsm = machine(vec![Scripted::new(TestId::A), Scripted::new(TestId::B)]);
        let mut ctx = TestContext::default();

        fsm.set_current_state(TestId::A, &mut ctx).unwrap();
        fsm.set_current_state(TestId::B, &mut ctx).unwrap();
        fsm.update(&mut ctx, 0.1).unwrap();

        assert_eq!(ctx.log, ["enter A", "exit A", "enter B", "update B"]);
    }

    #[test]
    fn same_state_transition_reruns_exit_and_enter() {
        let mut fsm = machine(vec![Scripted::new(TestId::A)]);
        let mut ctx = TestContext::default();

        fsm.set_current_state(TestId::A, &mut ctx).unwrap();
        fsm.set_current_state(TestId::A, &mut ctx).unwrap();

        assert_eq!(ctx.log, ["enter A", "exit A", "enter A"]);
        assert_eq!(fsm.transitions(), 2);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_add_panics() {
        machine(vec![Scripted::new(TestId::A), Scripted::new(TestId::A)]);
    }

    #[test]
    fn try_add_rejects_duplicate() {
        let mut fsm = machine(vec![Scripted::new(TestId::A)]);
        let err = fsm.try_add(Scripted::new(TestId::A)).unwrap_err();

        assert_eq!(err, FsmError::DuplicateState { id: TestId::A });
        assert!(err.is_configuration());
        assert_eq!(fsm.len(), 1);
    }

    #[test]
    fn unknown_target_keeps_current_state() {
        let mut fsm = machine(vec![Scripted::new(TestId::A)]);
        let mut ctx = TestContext::default();
        fsm.set_current_state(TestId::A, &mut ctx).unwrap();

        let err = fsm.set_current_state(TestId::Missing, &mut ctx).unwrap_err();

        assert_eq!(err, FsmError::UnknownState { id: TestId::Missing });
        assert_eq!(fsm.current_id(), Some(TestId::A));
        assert_eq!(ctx.log, ["enter A"]);
    }

    #[test]
    fn unknown_target_from_update_is_reported() {
        let mut fsm = machine(vec![Scripted::new(TestId::A).updating(TestId::Missing)]);
        let mut ctx = TestContext::default();
        fsm.set_current_state(TestId::A, &mut ctx).unwrap();

        let result = fsm.update(&mut ctx, 0.016);

        assert_eq!(result, Err(FsmError::UnknownState { id: TestId::Missing }));
        assert!(fsm.is_in(TestId::A));
    }

    #[test]
    fn dispatch_without_current_state_is_noop() {
        let mut fsm = machine(vec![Scripted::new(TestId::A)]);
        let mut ctx = TestContext::default();

        fsm.update(&mut ctx, 0.016).unwrap();
        fsm.fixed_update(&mut ctx, 0.02).unwrap();

        assert!(ctx.log.is_empty());
        assert_eq!(fsm.current_id(), None);
    }

    #[test]
    fn update_and_fixed_update_apply_requested_transitions() {
        let mut fsm = machine(vec![
            Scripted::new(TestId::A).updating(TestId::B),
            Scripted::new(TestId::B).fixed(TestId::A),
        ]);
        let mut ctx = TestContext::default();
        fsm.set_current_state(TestId::A, &mut ctx).unwrap();

        fsm.update(&mut ctx, 0.016).unwrap();
        assert!(fsm.is_in(TestId::B));

        fsm.fixed_update(&mut ctx, 0.02).unwrap();
        assert!(fsm.is_in(TestId::A));

        assert_eq!(
            ctx.log,
            [
                "enter A", "update A", "exit A", "enter B", "fixed B", "exit B", "enter A",
            ]
        );
    }

    #[test]
    fn enter_chain_is_followed() {
        let mut fsm = machine(vec![
            Scripted::new(TestId::A).entering(TestId::B),
            Scripted::new(TestId::B).entering(TestId::C),
            Scripted::new(TestId::C),
        ]);
        let mut ctx = TestContext::default();

        fsm.set_current_state(TestId::A, &mut ctx).unwrap();

        assert!(fsm.is_in(TestId::C));
        assert_eq!(
            ctx.log,
            ["enter A", "exit A", "enter B", "exit B", "enter C"]
        );
    }

    #[test]
    fn runaway_enter_chain_is_capped() {
        let mut fsm = machine(vec![
            Scripted::new(TestId::A).entering(TestId::B),
            Scripted::new(TestId::B).entering(TestId::A),
        ])
        .with_max_chain(3);
        let mut ctx = TestContext::default();

        let err = fsm.set_current_state(TestId::A, &mut ctx).unwrap_err();

        assert!(matches!(
            err,
            FsmError::TransitionChainTooDeep { depth: 4, .. }
        ));
        assert_eq!(fsm.current_id(), Some(TestId::B));
        assert_eq!(fsm.transitions(), 4);
    }

    #[test]
    fn handle_switches_like_key() {
        let mut fsm = machine(vec![Scripted::new(TestId::A), Scripted::new(TestId::B)]);
        let mut ctx = TestContext::default();
        let handle = fsm.handle(TestId::B).unwrap();

        fsm.set_current_handle(handle, &mut ctx).unwrap();

        assert_eq!(handle.id(), TestId::B);
        assert_eq!(handle.slot(), 1);
        assert!(fsm.is_in(TestId::B));
    }

    #[test]
    fn foreign_handle_is_rejected() {
        let other = machine(vec![Scripted::new(TestId::C)]);
        let mut fsm = machine(vec![Scripted::new(TestId::A)]);
        let mut ctx = TestContext::default();
        let foreign = other.handle(TestId::C).unwrap();

        let err = fsm.set_current_handle(foreign, &mut ctx).unwrap_err();

        assert_eq!(err, FsmError::ForeignHandle { id: TestId::C, slot: 0 });
        assert!(ctx.log.is_empty());
    }

    #[test]
    fn lookup_reports_registered_states() {
        let fsm = machine(vec![Scripted::new(TestId::A), Scripted::new(TestId::B)]);

        assert!(fsm.contains(TestId::A));
        assert!(!fsm.contains(TestId::C));
        assert_eq!(fsm.state(TestId::B).map(|s| s.id()), Some(TestId::B));
        assert!(fsm.state(TestId::Missing).is_none());
        assert_eq!(fsm.ids().collect::<Vec<_>>(), [TestId::A, TestId::B]);
    }
}
