//! Animator parameters driven by actor effects.

use std::collections::HashSet;

use game_core::{AnimationFlag, AnimationTrigger};

/// Boolean flags and fired triggers of one actor's animator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Animator {
    flags: HashSet<AnimationFlag>,
    triggers: Vec<AnimationTrigger>,
}

impl Animator {
    pub fn set(&mut self, flag: AnimationFlag, on: bool) {
        if on {
            self.flags.insert(flag);
        } else {
            self.flags.remove(&flag);
        }
    }

    pub fn fire(&mut self, trigger: AnimationTrigger) {
        self.triggers.push(trigger);
    }

    pub fn is_set(&self, flag: AnimationFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Triggers fired so far, oldest first.
    pub fn triggers(&self) -> &[AnimationTrigger] {
        &self.triggers
    }

    pub fn last_trigger(&self) -> Option<AnimationTrigger> {
        self.triggers.last().copied()
    }
}
