//! Outbound requests from actors to the host world.
//!
//! States never touch rendering, physics or scene management directly. They
//! append [`Effect`]s to their actor's [`Effects`] outbox; the host drains the
//! outbox after each tick and applies the requests in order.

use glam::Vec2;

/// Boolean animator parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AnimationFlag {
    Walking,
    Attack,
    Defend,
    #[strum(serialize = "skill_1")]
    SkillOne,
    #[strum(serialize = "skill_2")]
    SkillTwo,
}

/// One-shot animator trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AnimationTrigger {
    Hurt,
    Die,
}

/// Scene the host can be asked to load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scene {
    Lose,
}

/// A single request from an actor to the world.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    /// Set or clear an animator flag.
    Animate { flag: AnimationFlag, on: bool },
    /// Fire an animator trigger.
    Trigger(AnimationTrigger),
    /// Place the actor's hitbox at `center` and enable its collider.
    HitboxOn { center: Vec2 },
    /// Disable the actor's hitbox collider.
    HitboxOff,
    /// Integrate movement at `velocity` (units per second) for this physics step.
    Move { velocity: Vec2 },
    /// Turn the sprite to face `direction`.
    Face { direction: Vec2 },
    /// Replace the running scene.
    LoadScene(Scene),
    /// Remove the actor from the world.
    Despawn,
}

/// Ordered outbox of pending effects.
///
/// Nothing is ever discarded on its own: effects pile up across ticks until
/// the host calls [`Effects::drain`]. Hosts must drain after every tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Effects {
    queue: Vec<Effect>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.queue.push(effect);
    }

    pub fn animate(&mut self, flag: AnimationFlag, on: bool) {
        self.push(Effect::Animate { flag, on });
    }

    pub fn trigger(&mut self, trigger: AnimationTrigger) {
        self.push(Effect::Trigger(trigger));
    }

    pub fn hitbox_on(&mut self, center: Vec2) {
        self.push(Effect::HitboxOn { center });
    }

    pub fn hitbox_off(&mut self) {
        self.push(Effect::HitboxOff);
    }

    pub fn move_at(&mut self, velocity: Vec2) {
        self.push(Effect::Move { velocity });
    }

    pub fn face(&mut self, direction: Vec2) {
        self.push(Effect::Face { direction });
    }

    pub fn load_scene(&mut self, scene: Scene) {
        self.push(Effect::LoadScene(scene));
    }

    pub fn despawn(&mut self) {
        self.push(Effect::Despawn);
    }

    /// Removes and returns all pending effects in emission order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, Effect> {
        self.queue.drain(..)
    }

    /// Pending effects without removing them.
    pub fn as_slice(&self) -> &[Effect] {
        &self.queue
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns true if `effect` is pending.
    pub fn contains(&self, effect: &Effect) -> bool {
        self.queue.contains(effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_order_and_empties() {
        let mut effects = Effects::new();
        effects.animate(AnimationFlag::Attack, true);
        effects.hitbox_on(Vec2::new(0.0, 100.0));
        effects.hitbox_off();

        let drained: Vec<_> = effects.drain().collect();

        assert_eq!(
            drained,
            [
                Effect::Animate {
                    flag: AnimationFlag::Attack,
                    on: true
                },
                Effect::HitboxOn {
                    center: Vec2::new(0.0, 100.0)
                },
                Effect::HitboxOff,
            ]
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn animator_names_match_controller_parameters() {
        assert_eq!(AnimationFlag::SkillOne.as_ref(), "skill_1");
        assert_eq!(AnimationFlag::SkillTwo.as_ref(), "skill_2");
        assert_eq!(AnimationFlag::Walking.as_ref(), "walking");
        assert_eq!(AnimationTrigger::Die.as_ref(), "die");
    }
}
