//! Enemy actor: shared body, base states and per-frame dispatch.
//!
//! Every enemy kind registers the same four keys. The base idle and movement
//! states implement a plain chaser; kinds with their own rhythm (see
//! [`slime`](super::slime)) wrap these and override `update`, while
//! take-damage and dead are shared as-is.

use glam::Vec2;
use state_machine::{FiniteStateMachine, State, StateMachineBuilder, Transition};
use tracing::{debug, info};

use crate::actor::{Kinematics, SlimeIdle, SlimeMovement};
use crate::config::{EnemyConfig, EnemyKind};
use crate::contact::Tag;
use crate::effects::{AnimationFlag, AnimationTrigger, Effect, Effects};
use crate::error::ActorError;
use crate::health::Health;

/// Keys of enemy states, shared by every enemy kind.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EnemyStateId {
    Idle = 0,
    Movement = 1,
    TakeDamage = 2,
    Dead = 3,
}

/// Data enemy states read and write.
#[derive(Clone, Debug)]
pub struct EnemyBody {
    pub(crate) config: EnemyConfig,
    pub(crate) health: Health,
    /// Shared by the timed states of a kind; not reset on state entry.
    pub(crate) timer: f32,
    pub(crate) moving: bool,
    pub(crate) direction: Vec2,
    pub(crate) target: Option<Vec2>,
    pub(crate) kinematics: Kinematics,
    pub(crate) effects: Effects,
}

impl EnemyBody {
    fn new(config: EnemyConfig, position: Vec2) -> Self {
        Self {
            health: Health::full(config.health_total),
            config,
            timer: 0.0,
            moving: false,
            direction: Vec2::ZERO,
            target: None,
            kinematics: Kinematics::at(position),
            effects: Effects::new(),
        }
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.config
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Unit direction of travel (zero before the first retarget).
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    /// Returns true if a target is known and within aggro range.
    fn target_in_range(&self) -> bool {
        self.target.is_some_and(|target| {
            target.distance(self.kinematics.position) <= self.config.aggro_radius
        })
    }

    /// Points the enemy at its target.
    fn retarget(&mut self) {
        let Some(target) = self.target else {
            return;
        };
        let direction = (target - self.kinematics.position).normalize_or_zero();
        if direction != Vec2::ZERO && direction != self.direction {
            self.direction = direction;
            self.kinematics.facing = direction;
            self.effects.face(direction);
        }
    }
}

// ============================================================================
// Base states
// ============================================================================

/// Standing still; a chaser starts moving once its target is in range.
#[derive(Debug, Default)]
pub struct EnemyIdle;

impl State<EnemyStateId, EnemyBody> for EnemyIdle {
    fn id(&self) -> EnemyStateId {
        EnemyStateId::Idle
    }

    fn enter(&mut self, body: &mut EnemyBody) -> Transition<EnemyStateId> {
        body.effects.animate(AnimationFlag::Walking, false);
        Transition::Stay
    }

    fn exit(&mut self, _body: &mut EnemyBody) {}

    fn update(&mut self, body: &mut EnemyBody, _dt: f32) -> Transition<EnemyStateId> {
        if body.target_in_range() {
            body.moving = true;
            Transition::To(EnemyStateId::Movement)
        } else {
            Transition::Stay
        }
    }

    fn fixed_update(&mut self, _body: &mut EnemyBody, _dt: f32) -> Transition<EnemyStateId> {
        Transition::Stay
    }
}

/// Travelling along the current direction.
///
/// The physics step is the only place enemies move; specialised kinds reuse
/// it and only decide how long to stay here.
#[derive(Debug, Default)]
pub struct EnemyMovement;

impl State<EnemyStateId, EnemyBody> for EnemyMovement {
    fn id(&self) -> EnemyStateId {
        EnemyStateId::Movement
    }

    fn enter(&mut self, body: &mut EnemyBody) -> Transition<EnemyStateId> {
        body.effects.animate(AnimationFlag::Walking, true);
        Transition::Stay
    }

    fn exit(&mut self, _body: &mut EnemyBody) {}

    fn update(&mut self, body: &mut EnemyBody, _dt: f32) -> Transition<EnemyStateId> {
        if body.target_in_range() {
            Transition::Stay
        } else {
            body.moving = false;
            Transition::To(EnemyStateId::Idle)
        }
    }

    fn fixed_update(&mut self, body: &mut EnemyBody, _dt: f32) -> Transition<EnemyStateId> {
        let velocity = body.direction * body.config.speed;
        body.effects.move_at(velocity);
        Transition::Stay
    }
}

/// One-step pulse: lose health on entry, back to idle on the next physics step.
#[derive(Debug, Default)]
pub struct EnemyTakeDamage;

impl State<EnemyStateId, EnemyBody> for EnemyTakeDamage {
    fn id(&self) -> EnemyStateId {
        EnemyStateId::TakeDamage
    }

    fn enter(&mut self, body: &mut EnemyBody) -> Transition<EnemyStateId> {
        let removed = body.health.reduce(body.config.damage_taken);
        body.effects.trigger(AnimationTrigger::Hurt);
        debug!(
            kind = %body.config.kind,
            removed,
            remaining = body.health.current(),
            "enemy took damage"
        );
        Transition::Stay
    }

    fn exit(&mut self, _body: &mut EnemyBody) {}

    fn update(&mut self, _body: &mut EnemyBody, _dt: f32) -> Transition<EnemyStateId> {
        Transition::Stay
    }

    fn fixed_update(&mut self, body: &mut EnemyBody, _dt: f32) -> Transition<EnemyStateId> {
        body.timer = 0.0;
        body.moving = false;
        Transition::To(EnemyStateId::Idle)
    }
}

/// Terminal: plays the death animation and asks to be removed.
#[derive(Debug, Default)]
pub struct EnemyDead;

impl State<EnemyStateId, EnemyBody> for EnemyDead {
    fn id(&self) -> EnemyStateId {
        EnemyStateId::Dead
    }

    fn enter(&mut self, body: &mut EnemyBody) -> Transition<EnemyStateId> {
        info!(kind = %body.config.kind, "enemy dead");
        body.moving = false;
        body.effects.trigger(AnimationTrigger::Die);
        body.effects.despawn();
        Transition::Stay
    }

    fn exit(&mut self, _body: &mut EnemyBody) {}

    fn update(&mut self, _body: &mut EnemyBody, _dt: f32) -> Transition<EnemyStateId> {
        Transition::Stay
    }

    fn fixed_update(&mut self, _body: &mut EnemyBody, _dt: f32) -> Transition<EnemyStateId> {
        Transition::Stay
    }
}

// ============================================================================
// Actor
// ============================================================================

/// A hostile actor of any [`EnemyKind`].
pub struct Enemy {
    body: EnemyBody,
    fsm: FiniteStateMachine<EnemyStateId, EnemyBody>,
}

impl Enemy {
    /// Spawns an enemy at `position` in the idle state.
    pub fn new(config: EnemyConfig, position: Vec2) -> Result<Self, ActorError> {
        let kind = config.kind;
        let mut body = EnemyBody::new(config, position);

        let builder = match kind {
            EnemyKind::Chaser => StateMachineBuilder::new()
                .label("chaser")
                .state(EnemyIdle)
                .state(EnemyMovement),
            EnemyKind::Slime => StateMachineBuilder::new()
                .label("slime")
                .state(SlimeIdle::default())
                .state(SlimeMovement::default()),
        };
        let fsm = builder
            .state(EnemyTakeDamage)
            .state(EnemyDead)
            .initial(EnemyStateId::Idle)
            .build(&mut body)?;

        debug!(%kind, x = position.x, y = position.y, "enemy spawned");
        Ok(Self { body, fsm })
    }

    pub fn kind(&self) -> EnemyKind {
        self.body.config.kind
    }

    /// Sets the point this enemy heads for, or clears it.
    pub fn set_target(&mut self, target: Option<Vec2>) {
        self.body.target = target;
    }

    /// Logic tick.
    ///
    /// The enemy turns toward its target before its state runs. A slime only
    /// turns between hops, never mid-hop.
    pub fn update(&mut self, dt: f32) -> Result<(), ActorError> {
        let locked = match self.kind() {
            EnemyKind::Slime => self.body.moving,
            EnemyKind::Chaser => false,
        };
        if !locked && !self.is_dead() {
            self.body.retarget();
        }
        self.fsm.update(&mut self.body, dt)?;
        Ok(())
    }

    /// Physics tick.
    pub fn fixed_update(&mut self, dt: f32) -> Result<(), ActorError> {
        self.fsm.fixed_update(&mut self.body, dt)?;
        Ok(())
    }

    /// Routes a collision with a collider tagged `tag`.
    ///
    /// A weapon hit takes damage while health remains, then dies once health
    /// reaches zero. Contacts are ignored once the enemy is dead.
    pub fn on_contact(&mut self, tag: Tag) -> Result<(), ActorError> {
        if tag != Tag::Weapon || self.is_dead() {
            return Ok(());
        }

        if !self.body.health.is_depleted() {
            self.set_state(EnemyStateId::TakeDamage)?;
        }
        if self.body.health.is_depleted() {
            self.set_state(EnemyStateId::Dead)?;
        }
        Ok(())
    }

    /// Forces a transition from outside the graph.
    pub fn set_state(&mut self, id: EnemyStateId) -> Result<(), ActorError> {
        self.fsm.set_current_state(id, &mut self.body)?;
        Ok(())
    }

    pub fn state(&self) -> Option<EnemyStateId> {
        self.fsm.current_id()
    }

    pub fn is_dead(&self) -> bool {
        self.fsm.is_in(EnemyStateId::Dead)
    }

    pub fn health(&self) -> Health {
        self.body.health
    }

    pub fn body(&self) -> &EnemyBody {
        &self.body
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.body.kinematics
    }

    /// Mutable kinematics for the host's movement integration.
    pub fn kinematics_mut(&mut self) -> &mut Kinematics {
        &mut self.body.kinematics
    }

    pub fn machine(&self) -> &FiniteStateMachine<EnemyStateId, EnemyBody> {
        &self.fsm
    }

    /// Removes and returns pending effects in emission order.
    ///
    /// Call after every tick; undrained effects accumulate.
    pub fn drain_effects(&mut self) -> std::vec::Drain<'_, Effect> {
        self.body.effects.drain()
    }
}

impl core::fmt::Debug for Enemy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Enemy")
            .field("kind", &self.kind())
            .field("state", &self.state())
            .field("health", &self.body.health)
            .field("position", &self.body.kinematics.position)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chaser() -> Enemy {
        Enemy::new(EnemyConfig::new(EnemyKind::Chaser), Vec2::ZERO).unwrap()
    }

    #[test]
    fn chaser_waits_without_target() {
        let mut enemy = chaser();

        for _ in 0..5 {
            enemy.update(0.1).unwrap();
        }

        assert_eq!(enemy.state(), Some(EnemyStateId::Idle));
        assert!(!enemy.body().is_moving());
    }

    #[test]
    fn chaser_follows_target_in_range() {
        let mut enemy = chaser();
        enemy.set_target(Some(Vec2::new(300.0, 0.0)));

        enemy.update(0.016).unwrap();
        assert_eq!(enemy.state(), Some(EnemyStateId::Movement));
        assert!(enemy.body().is_moving());
        assert_eq!(enemy.body().direction(), Vec2::X);

        enemy.drain_effects().for_each(drop);
        enemy.fixed_update(0.02).unwrap();
        let effects: Vec<_> = enemy.drain_effects().collect();
        assert_eq!(
            effects,
            [Effect::Move {
                velocity: Vec2::new(EnemyConfig::DEFAULT_SPEED, 0.0)
            }]
        );
    }

    #[test]
    fn chaser_gives_up_when_target_leaves_range() {
        let mut enemy = chaser();
        enemy.set_target(Some(Vec2::new(0.0, 100.0)));
        enemy.update(0.016).unwrap();

        enemy.set_target(Some(Vec2::new(0.0, 10_000.0)));
        enemy.update(0.016).unwrap();

        assert_eq!(enemy.state(), Some(EnemyStateId::Idle));
        assert!(!enemy.body().is_moving());
    }

    #[test]
    fn weapon_hits_until_dead() {
        let mut enemy = chaser();

        enemy.on_contact(Tag::Weapon).unwrap();
        assert_eq!(enemy.state(), Some(EnemyStateId::TakeDamage));
        assert_eq!(enemy.health().current(), 20);

        enemy.fixed_update(0.02).unwrap();
        assert_eq!(enemy.state(), Some(EnemyStateId::Idle));

        enemy.on_contact(Tag::Weapon).unwrap();
        enemy.on_contact(Tag::Weapon).unwrap();
        assert_eq!(enemy.state(), Some(EnemyStateId::Dead));
        assert!(enemy.body().effects().contains(&Effect::Despawn));

        enemy.on_contact(Tag::Weapon).unwrap();
        enemy.set_target(Some(Vec2::new(10.0, 0.0)));
        enemy.update(0.016).unwrap();
        enemy.fixed_update(0.02).unwrap();
        assert_eq!(enemy.state(), Some(EnemyStateId::Dead));
        assert_eq!(enemy.health().current(), 0);
    }

    #[test]
    fn enemy_contact_does_not_hurt_enemies() {
        let mut enemy = chaser();
        enemy.on_contact(Tag::Enemy).unwrap();
        assert_eq!(enemy.state(), Some(EnemyStateId::Idle));
    }
}
