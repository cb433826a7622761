//! The world actors live in.
//!
//! A [`Stage`] owns one player and any number of enemies. Each call to
//! [`Stage::frame`] runs one logic tick for every actor, then as many physics
//! ticks as the [`FixedStep`] clock pays out. After every tick the stage
//! drains the actors' effect outboxes and applies them: movement and facing
//! update kinematics, hitbox requests place the sword collider, despawns
//! remove enemies and a scene load ends the session.
//!
//! Contacts are detected after each physics tick by distance against the
//! configured contact radius. Only the start of an overlap is reported, so an
//! enemy standing on the player hurts once, not every tick.

use std::fmt;

use bitflags::bitflags;
use game_core::{
    AnimationTrigger, Effect, Enemy, EnemyConfig, GameConfig, Kinematics, Player, Scene, Tag,
};
use glam::Vec2;
use tracing::{debug, info, trace, warn};

use crate::{Animator, FixedStep, Result, StageError};

/// Stable reference to an enemy on a [`Stage`].
///
/// Slots are never reused, so a handle to a despawned enemy stays invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyHandle(usize);

impl EnemyHandle {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EnemyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enemy#{}", self.0)
    }
}

/// A collider that can take part in a contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Body {
    Player,
    /// The player's sword hitbox.
    Sword,
    Enemy(EnemyHandle),
}

impl Body {
    /// Tag the other party of a contact sees.
    pub const fn tag(self) -> Tag {
        match self {
            Self::Player => Tag::Player,
            Self::Sword => Tag::Weapon,
            Self::Enemy(_) => Tag::Enemy,
        }
    }
}

/// How the session stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    #[default]
    Running,
    /// The lose scene was requested; the stage no longer ticks.
    Lost,
}

impl Outcome {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Lost)
    }
}

bitflags! {
    /// Colliders an enemy currently overlaps.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    struct Overlap: u8 {
        const PLAYER = 1 << 0;
        const SWORD = 1 << 1;
    }
}

struct EnemySlot {
    name: String,
    enemy: Enemy,
    animator: Animator,
    overlap: Overlap,
}

/// Headless world hosting one player and a roster of enemies.
pub struct Stage {
    config: GameConfig,
    clock: FixedStep,
    player: Player,
    player_animator: Animator,
    sword: Option<Vec2>,
    enemies: Vec<Option<EnemySlot>>,
    outcome: Outcome,
    frames: u64,
}

impl Stage {
    /// Creates a stage with the player spawned at `player_position`.
    ///
    /// The physics step must be finite and positive.
    pub fn new(config: GameConfig, player_position: Vec2) -> Result<Self> {
        if !FixedStep::is_valid_step(config.fixed_timestep) {
            return Err(StageError::InvalidTimestep {
                step: config.fixed_timestep,
            });
        }

        let player = Player::new(config.player.clone(), player_position)?;
        info!(
            step = config.fixed_timestep,
            contact_radius = config.contact_radius,
            "stage ready"
        );

        Ok(Self {
            clock: FixedStep::new(config.fixed_timestep),
            config,
            player,
            player_animator: Animator::default(),
            sword: None,
            enemies: Vec::new(),
            outcome: Outcome::Running,
            frames: 0,
        })
    }

    /// Spawns an enemy and returns its handle.
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        config: EnemyConfig,
        position: Vec2,
    ) -> Result<EnemyHandle> {
        let name = name.into();
        let enemy = Enemy::new(config, position)?;
        let handle = EnemyHandle(self.enemies.len());

        info!(%handle, %name, kind = %enemy.kind(), "enemy joined stage");
        self.enemies.push(Some(EnemySlot {
            name,
            enemy,
            animator: Animator::default(),
            overlap: Overlap::empty(),
        }));
        Ok(handle)
    }

    /// Removes an enemy immediately.
    pub fn despawn(&mut self, handle: EnemyHandle) -> Result<()> {
        let slot = self
            .enemies
            .get_mut(handle.0)
            .and_then(Option::take)
            .ok_or(StageError::UnknownEnemy { handle })?;
        info!(%handle, name = %slot.name, "enemy removed");
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clock(&self) -> &FixedStep {
        &self.clock
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player access, for feeding input.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn player_animator(&self) -> &Animator {
        &self.player_animator
    }

    /// Center of the sword hitbox while it is active.
    pub fn sword(&self) -> Option<Vec2> {
        self.sword
    }

    pub fn enemy(&self, handle: EnemyHandle) -> Option<&Enemy> {
        self.slot(handle).map(|slot| &slot.enemy)
    }

    pub fn enemy_name(&self, handle: EnemyHandle) -> Option<&str> {
        self.slot(handle).map(|slot| slot.name.as_str())
    }

    pub fn enemy_animator(&self, handle: EnemyHandle) -> Option<&Animator> {
        self.slot(handle).map(|slot| &slot.animator)
    }

    /// Enemies still on the stage, in spawn order.
    pub fn enemies(&self) -> impl Iterator<Item = (EnemyHandle, &Enemy)> {
        self.enemies
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let slot = slot.as_ref()?;
                Some((EnemyHandle(index), &slot.enemy))
            })
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.iter().flatten().count()
    }

    /// Runs one frame of `dt` seconds and returns the outcome.
    ///
    /// Does nothing once the session is over.
    pub fn frame(&mut self, dt: f32) -> Result<Outcome> {
        if self.outcome.is_over() {
            return Ok(self.outcome);
        }
        self.frames += 1;
        trace!(frame = self.frames, dt, "frame");

        let target = self.player.kinematics().position;
        for slot in self.enemies.iter_mut().flatten() {
            slot.enemy.set_target(Some(target));
        }

        self.player.update(dt)?;
        for slot in self.enemies.iter_mut().flatten() {
            slot.enemy.update(dt)?;
        }
        self.apply_effects();

        let step = self.clock.step();
        for _ in 0..self.clock.advance(dt) {
            if self.outcome.is_over() {
                break;
            }
            self.player.fixed_update(step)?;
            for slot in self.enemies.iter_mut().flatten() {
                slot.enemy.fixed_update(step)?;
            }
            self.apply_effects();

            self.detect_contacts()?;
            self.apply_effects();
        }

        Ok(self.outcome)
    }

    /// Reports a contact between two bodies.
    ///
    /// Each party sees the other's [`Tag`]; actors decide themselves whether
    /// the tag matters to them.
    pub fn contact(&mut self, a: Body, b: Body) -> Result<()> {
        for body in [a, b] {
            if let Body::Enemy(handle) = body {
                self.slot(handle).ok_or(StageError::UnknownEnemy { handle })?;
            }
        }
        if self.outcome.is_over() {
            return Ok(());
        }

        debug!(?a, ?b, "contact");
        self.touch(a, b.tag())?;
        self.touch(b, a.tag())?;
        self.apply_effects();
        Ok(())
    }

    fn touch(&mut self, body: Body, tag: Tag) -> Result<()> {
        match body {
            Body::Player => self.player.on_contact(tag)?,
            Body::Sword => {}
            Body::Enemy(handle) => {
                if let Some(slot) = self.slot_mut(handle) {
                    slot.enemy.on_contact(tag)?;
                }
            }
        }
        Ok(())
    }

    /// Emits a contact for every overlap that started since the last check.
    fn detect_contacts(&mut self) -> Result<()> {
        let radius = self.config.contact_radius;
        let player = self.player.kinematics().position;
        let sword = self.sword;

        let mut started = Vec::new();
        for (index, entry) in self.enemies.iter_mut().enumerate() {
            let slot = match entry {
                Some(slot) => slot,
                None => continue,
            };
            let position = slot.enemy.kinematics().position;

            let mut now = Overlap::empty();
            if position.distance(player) <= radius {
                now |= Overlap::PLAYER;
            }
            if sword.is_some_and(|sword| position.distance(sword) <= radius) {
                now |= Overlap::SWORD;
            }

            let fresh = now.difference(slot.overlap);
            slot.overlap = now;
            if !fresh.is_empty() {
                started.push((EnemyHandle(index), fresh));
            }
        }

        for (handle, fresh) in started {
            if fresh.contains(Overlap::PLAYER) {
                self.touch(Body::Player, Tag::Enemy)?;
                self.touch(Body::Enemy(handle), Tag::Player)?;
            }
            if fresh.contains(Overlap::SWORD) {
                self.touch(Body::Enemy(handle), Tag::Weapon)?;
            }
        }
        Ok(())
    }

    fn apply_effects(&mut self) {
        let step = self.clock.step();
        let mut scene = None;

        let effects: Vec<Effect> = self.player.drain_effects().collect();
        for effect in effects {
            match effect {
                Effect::HitboxOn { center } => {
                    self.sword = Some(center);
                    for slot in self.enemies.iter_mut().flatten() {
                        slot.overlap.remove(Overlap::SWORD);
                    }
                }
                Effect::HitboxOff => self.sword = None,
                Effect::LoadScene(requested) => scene = Some(requested),
                Effect::Despawn => warn!("player requested despawn; ignored"),
                other => apply_body_effect(
                    other,
                    self.player.kinematics_mut(),
                    &mut self.player_animator,
                    step,
                ),
            }
        }

        for (index, entry) in self.enemies.iter_mut().enumerate() {
            let slot = match entry {
                Some(slot) => slot,
                None => continue,
            };

            let mut despawn = false;
            let effects: Vec<Effect> = slot.enemy.drain_effects().collect();
            for effect in effects {
                match effect {
                    Effect::Despawn => despawn = true,
                    Effect::LoadScene(requested) => scene = Some(requested),
                    Effect::HitboxOn { .. } | Effect::HitboxOff => {
                        trace!(handle = index, "enemy hitbox request ignored");
                    }
                    other => apply_body_effect(
                        other,
                        slot.enemy.kinematics_mut(),
                        &mut slot.animator,
                        step,
                    ),
                }
            }

            if despawn {
                info!(handle = %EnemyHandle(index), name = %slot.name, "enemy despawned");
                *entry = None;
            }
        }

        if let Some(scene) = scene {
            self.load_scene(scene);
        }
    }

    fn load_scene(&mut self, scene: Scene) {
        match scene {
            Scene::Lose => {
                if !self.outcome.is_over() {
                    info!(frame = self.frames, "lose scene loaded");
                }
                self.outcome = Outcome::Lost;
            }
        }
    }

    fn slot(&self, handle: EnemyHandle) -> Option<&EnemySlot> {
        self.enemies.get(handle.0).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, handle: EnemyHandle) -> Option<&mut EnemySlot> {
        self.enemies.get_mut(handle.0).and_then(Option::as_mut)
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("frames", &self.frames)
            .field("outcome", &self.outcome)
            .field("player", &self.player)
            .field("enemies", &self.enemy_count())
            .finish()
    }
}

/// Applies an effect that only concerns the emitting actor's own body.
fn apply_body_effect(
    effect: Effect,
    kinematics: &mut Kinematics,
    animator: &mut Animator,
    step: f32,
) {
    match effect {
        Effect::Move { velocity } => kinematics.position += velocity * step,
        Effect::Face { direction } => {
            if direction != Vec2::ZERO {
                kinematics.facing = direction;
            }
        }
        Effect::Animate { flag, on } => animator.set(flag, on),
        Effect::Trigger(trigger) => {
            if trigger == AnimationTrigger::Die {
                debug!("death animation started");
            }
            animator.fire(trigger);
        }
        Effect::HitboxOn { .. } | Effect::HitboxOff | Effect::LoadScene(_) | Effect::Despawn => {}
    }
}
