//! Slime: an enemy that hops toward the player.
//!
//! The slime waits `move_delay` seconds, then moves for `move_length` seconds,
//! and repeats. Both phases count on the enemy's shared timer and zero it when
//! they hand over. How the slime moves comes from the base movement state;
//! only how long it moves is decided here.

use state_machine::{State, Transition, timer};

use super::enemy::{EnemyBody, EnemyIdle, EnemyMovement, EnemyStateId};

/// Wind-up between hops.
#[derive(Debug, Default)]
pub struct SlimeIdle {
    base: EnemyIdle,
}

impl State<EnemyStateId, EnemyBody> for SlimeIdle {
    fn id(&self) -> EnemyStateId {
        EnemyStateId::Idle
    }

    fn enter(&mut self, body: &mut EnemyBody) -> Transition<EnemyStateId> {
        self.base.enter(body)
    }

    fn exit(&mut self, body: &mut EnemyBody) {
        self.base.exit(body);
    }

    fn update(&mut self, body: &mut EnemyBody, dt: f32) -> Transition<EnemyStateId> {
        if timer::accumulate(&mut body.timer, dt, body.config.move_delay) {
            body.moving = true;
            Transition::To(EnemyStateId::Movement)
        } else {
            Transition::Stay
        }
    }

    fn fixed_update(&mut self, body: &mut EnemyBody, dt: f32) -> Transition<EnemyStateId> {
        self.base.fixed_update(body, dt)
    }
}

/// A single hop.
#[derive(Debug, Default)]
pub struct SlimeMovement {
    base: EnemyMovement,
}

impl State<EnemyStateId, EnemyBody> for SlimeMovement {
    fn id(&self) -> EnemyStateId {
        EnemyStateId::Movement
    }

    fn enter(&mut self, body: &mut EnemyBody) -> Transition<EnemyStateId> {
        self.base.enter(body)
    }

    fn exit(&mut self, body: &mut EnemyBody) {
        self.base.exit(body);
    }

    fn update(&mut self, body: &mut EnemyBody, dt: f32) -> Transition<EnemyStateId> {
        if timer::accumulate(&mut body.timer, dt, body.config.move_length) {
            body.moving = false;
            Transition::To(EnemyStateId::Idle)
        } else {
            Transition::Stay
        }
    }

    fn fixed_update(&mut self, body: &mut EnemyBody, dt: f32) -> Transition<EnemyStateId> {
        self.base.fixed_update(body, dt)
    }
}
