//! Player actor and its six-state graph.
//!
//! ```text
//!             attack held            released
//!  Movement ─────────────▶ Attack ─────────────▶ Movement
//!     │  defend held        Defend   (same shape)
//!     │  skill 1/2 held     Skill    (same shape)
//!     │
//!     └─ enemy contact ──▶ TakeDamage ──(next physics step)──▶ Movement
//!                               └── health reached 0 ──▶ Dead (terminal)
//! ```

use glam::Vec2;
use state_machine::{FiniteStateMachine, State, StateMachineBuilder, Transition};
use tracing::{debug, info};

use crate::actor::Kinematics;
use crate::config::PlayerConfig;
use crate::contact::Tag;
use crate::effects::{AnimationFlag, AnimationTrigger, Effect, Effects, Scene};
use crate::error::ActorError;
use crate::health::Health;
use crate::input::{Button, InputFlags};

/// Keys of the player's states.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerStateId {
    Movement = 0,
    Attack = 1,
    Defend = 2,
    Skill = 3,
    TakeDamage = 4,
    Dead = 5,
}

/// Data the player's states read and write.
#[derive(Clone, Debug)]
pub struct PlayerBody {
    config: PlayerConfig,
    health: Health,
    input: InputFlags,
    move_axis: Vec2,
    walking: bool,
    kinematics: Kinematics,
    effects: Effects,
}

impl PlayerBody {
    fn new(config: PlayerConfig, position: Vec2) -> Self {
        Self {
            health: Health::full(config.health_total),
            config,
            input: InputFlags::empty(),
            move_axis: Vec2::ZERO,
            walking: false,
            kinematics: Kinematics::at(position),
            effects: Effects::new(),
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn input(&self) -> InputFlags {
        self.input
    }

    pub fn move_axis(&self) -> Vec2 {
        self.move_axis
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    /// Turns toward the move direction and toggles the walk animation.
    fn rotate_toward_direction(&mut self) {
        let walking = self.move_axis != Vec2::ZERO;
        if walking {
            let direction = self.move_axis.normalize();
            self.kinematics.facing = direction;
            self.effects.face(direction);
        }
        if walking != self.walking {
            self.walking = walking;
            self.effects.animate(AnimationFlag::Walking, walking);
        }
    }

    /// Requests movement integration for one physics step.
    fn request_move(&mut self) {
        let velocity = self.move_axis.clamp_length_max(1.0) * self.config.move_speed;
        self.effects.move_at(velocity);
    }
}

// ============================================================================
// States
// ============================================================================

/// Free movement; branches on held buttons.
struct PlayerMovement;

impl State<PlayerStateId, PlayerBody> for PlayerMovement {
    fn id(&self) -> PlayerStateId {
        PlayerStateId::Movement
    }

    fn enter(&mut self, _body: &mut PlayerBody) -> Transition<PlayerStateId> {
        Transition::Stay
    }

    fn exit(&mut self, _body: &mut PlayerBody) {}

    /// Priority: attack > defend > skill one > skill two.
    fn update(&mut self, body: &mut PlayerBody, _dt: f32) -> Transition<PlayerStateId> {
        let input = body.input;
        if input.contains(InputFlags::ATTACK) {
            Transition::To(PlayerStateId::Attack)
        } else if input.contains(InputFlags::DEFEND) {
            Transition::To(PlayerStateId::Defend)
        } else if input.contains(InputFlags::SKILL_ONE) {
            Transition::To(PlayerStateId::Skill)
        } else if input.contains(InputFlags::SKILL_TWO) {
            Transition::To(PlayerStateId::Skill)
        } else {
            Transition::Stay
        }
    }

    fn fixed_update(&mut self, body: &mut PlayerBody, _dt: f32) -> Transition<PlayerStateId> {
        body.rotate_toward_direction();
        body.request_move();
        Transition::Stay
    }
}

/// Sword out while the attack button is held.
struct PlayerAttack;

impl State<PlayerStateId, PlayerBody> for PlayerAttack {
    fn id(&self) -> PlayerStateId {
        PlayerStateId::Attack
    }

    fn enter(&mut self, body: &mut PlayerBody) -> Transition<PlayerStateId> {
        body.effects.animate(AnimationFlag::Attack, true);

        let center = body.kinematics.ahead(body.config.hitbox_distance);
        body.effects.hitbox_on(center);
        debug!(x = center.x, y = center.y, "sword hitbox placed");
        Transition::Stay
    }

    fn exit(&mut self, body: &mut PlayerBody) {
        body.effects.animate(AnimationFlag::Attack, false);
        body.effects.hitbox_off();
    }

    fn update(&mut self, body: &mut PlayerBody, _dt: f32) -> Transition<PlayerStateId> {
        if body.input.contains(InputFlags::ATTACK) {
            Transition::Stay
        } else {
            Transition::To(PlayerStateId::Movement)
        }
    }

    fn fixed_update(&mut self, _body: &mut PlayerBody, _dt: f32) -> Transition<PlayerStateId> {
        Transition::Stay
    }
}

/// Shield up while the defend button is held.
struct PlayerDefend;

impl State<PlayerStateId, PlayerBody> for PlayerDefend {
    fn id(&self) -> PlayerStateId {
        PlayerStateId::Defend
    }

    fn enter(&mut self, body: &mut PlayerBody) -> Transition<PlayerStateId> {
        body.effects.animate(AnimationFlag::Defend, true);
        Transition::Stay
    }

    fn exit(&mut self, body: &mut PlayerBody) {
        body.effects.animate(AnimationFlag::Defend, false);
    }

    fn update(&mut self, body: &mut PlayerBody, _dt: f32) -> Transition<PlayerStateId> {
        if body.input.contains(InputFlags::DEFEND) {
            Transition::Stay
        } else {
            Transition::To(PlayerStateId::Movement)
        }
    }

    fn fixed_update(&mut self, _body: &mut PlayerBody, _dt: f32) -> Transition<PlayerStateId> {
        Transition::Stay
    }
}

/// Casting while either skill button is held.
struct PlayerSkill;

impl State<PlayerStateId, PlayerBody> for PlayerSkill {
    fn id(&self) -> PlayerStateId {
        PlayerStateId::Skill
    }

    fn enter(&mut self, body: &mut PlayerBody) -> Transition<PlayerStateId> {
        if body.input.contains(InputFlags::SKILL_ONE) {
            body.effects.animate(AnimationFlag::SkillOne, true);
        } else if body.input.contains(InputFlags::SKILL_TWO) {
            body.effects.animate(AnimationFlag::SkillTwo, true);
        }
        Transition::Stay
    }

    fn exit(&mut self, body: &mut PlayerBody) {
        body.effects.animate(AnimationFlag::SkillOne, false);
        body.effects.animate(AnimationFlag::SkillTwo, false);
    }

    fn update(&mut self, body: &mut PlayerBody, _dt: f32) -> Transition<PlayerStateId> {
        if body.input.intersects(InputFlags::SKILLS) {
            Transition::Stay
        } else {
            Transition::To(PlayerStateId::Movement)
        }
    }

    fn fixed_update(&mut self, _body: &mut PlayerBody, _dt: f32) -> Transition<PlayerStateId> {
        Transition::Stay
    }
}

/// One-step pulse: lose health on entry, recover on the next physics step.
struct PlayerTakeDamage;

impl State<PlayerStateId, PlayerBody> for PlayerTakeDamage {
    fn id(&self) -> PlayerStateId {
        PlayerStateId::TakeDamage
    }

    fn enter(&mut self, body: &mut PlayerBody) -> Transition<PlayerStateId> {
        let removed = body.health.reduce(body.config.damage_taken);
        body.effects.trigger(AnimationTrigger::Hurt);
        debug!(
            removed,
            remaining = body.health.current(),
            "player took damage"
        );
        Transition::Stay
    }

    fn exit(&mut self, _body: &mut PlayerBody) {}

    fn update(&mut self, _body: &mut PlayerBody, _dt: f32) -> Transition<PlayerStateId> {
        Transition::Stay
    }

    fn fixed_update(&mut self, _body: &mut PlayerBody, _dt: f32) -> Transition<PlayerStateId> {
        Transition::To(PlayerStateId::Movement)
    }
}

/// Terminal: plays the death animation and requests the lose scene.
struct PlayerDead;

impl State<PlayerStateId, PlayerBody> for PlayerDead {
    fn id(&self) -> PlayerStateId {
        PlayerStateId::Dead
    }

    fn enter(&mut self, body: &mut PlayerBody) -> Transition<PlayerStateId> {
        info!("player dead");
        body.effects.trigger(AnimationTrigger::Die);
        body.effects.load_scene(Scene::Lose);
        Transition::Stay
    }

    fn exit(&mut self, _body: &mut PlayerBody) {}

    fn update(&mut self, _body: &mut PlayerBody, _dt: f32) -> Transition<PlayerStateId> {
        Transition::Stay
    }

    fn fixed_update(&mut self, _body: &mut PlayerBody, _dt: f32) -> Transition<PlayerStateId> {
        Transition::Stay
    }
}

// ============================================================================
// Actor
// ============================================================================

/// The player character.
pub struct Player {
    body: PlayerBody,
    fsm: FiniteStateMachine<PlayerStateId, PlayerBody>,
}

impl Player {
    /// Spawns the player at `position` in the movement state.
    pub fn new(config: PlayerConfig, position: Vec2) -> Result<Self, ActorError> {
        let mut body = PlayerBody::new(config, position);
        let fsm = StateMachineBuilder::new()
            .label("player")
            .state(PlayerMovement)
            .state(PlayerAttack)
            .state(PlayerSkill)
            .state(PlayerDefend)
            .state(PlayerTakeDamage)
            .state(PlayerDead)
            .initial(PlayerStateId::Movement)
            .build(&mut body)?;

        debug!(health = body.health.current(), "player spawned");
        Ok(Self { body, fsm })
    }

    /// Records a press or release of `button`.
    pub fn on_button(&mut self, button: Button, pressed: bool) {
        self.body.input.set(button.flag(), pressed);
    }

    /// Records the movement stick. Zero means no movement input.
    pub fn on_move(&mut self, axis: Vec2) {
        self.body.move_axis = axis;
    }

    /// Logic tick.
    pub fn update(&mut self, dt: f32) -> Result<(), ActorError> {
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
    /// Enemy contact takes damage while health remains, then dies once health
    /// reaches zero; a single contact can do both. Contacts are ignored once
    /// the player is dead.
    pub fn on_contact(&mut self, tag: Tag) -> Result<(), ActorError> {
        if tag != Tag::Enemy || self.is_dead() {
            return Ok(());
        }

        debug!(health = self.body.health.current(), "player hit");
        if !self.body.health.is_depleted() {
            self.set_state(PlayerStateId::TakeDamage)?;
        }
        if self.body.health.is_depleted() {
            self.set_state(PlayerStateId::Dead)?;
        }
        Ok(())
    }

    /// Forces a transition from outside the graph.
    pub fn set_state(&mut self, id: PlayerStateId) -> Result<(), ActorError> {
        self.fsm.set_current_state(id, &mut self.body)?;
        Ok(())
    }

    /// Current state, if any.
    pub fn state(&self) -> Option<PlayerStateId> {
        self.fsm.current_id()
    }

    pub fn is_dead(&self) -> bool {
        self.fsm.is_in(PlayerStateId::Dead)
    }

    pub fn health(&self) -> Health {
        self.body.health
    }

    pub fn body(&self) -> &PlayerBody {
        &self.body
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.body.kinematics
    }

    /// Mutable kinematics for the host's movement integration.
    pub fn kinematics_mut(&mut self) -> &mut Kinematics {
        &mut self.body.kinematics
    }

    pub fn machine(&self) -> &FiniteStateMachine<PlayerStateId, PlayerBody> {
        &self.fsm
    }

    /// Removes and returns pending effects in emission order.
    ///
    /// Call after every tick; undrained effects accumulate.
    pub fn drain_effects(&mut self) -> std::vec::Drain<'_, Effect> {
        self.body.effects.drain()
    }
}

impl core::fmt::Debug for Player {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Player")
            .field("state", &self.state())
            .field("health", &self.body.health)
            .field("position", &self.body.kinematics.position)
            .finish()
    }
}
