//! Scripted input for headless runs.
//!
//! A [`Script`] is a list of timed cues. Each frame the driver asks for the
//! cues that came due and feeds them to the player as if they were device
//! input.

use game_core::{Button, Player};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input {
    Move(Vec2),
    Press(Button),
    Release(Button),
}

impl Input {
    pub fn apply(self, player: &mut Player) {
        match self {
            Self::Move(axis) => player.on_move(axis),
            Self::Press(button) => player.on_button(button, true),
            Self::Release(button) => player.on_button(button, false),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cue {
    /// Seconds since the run started.
    pub at: f32,
    pub input: Input,
}

/// Time-ordered input cues with a playback cursor.
#[derive(Clone, Debug, Default)]
pub struct Script {
    cues: Vec<Cue>,
    cursor: usize,
}

impl Script {
    pub fn new(mut cues: Vec<Cue>) -> Self {
        cues.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { cues, cursor: 0 }
    }

    /// Walks toward the demo roster, swings at whatever approaches, and
    /// tries every other button once.
    pub fn demo() -> Self {
        use Input::*;

        let cue = |at: f32, input: Input| Cue { at, input };
        Self::new(vec![
            cue(0.0, Move(Vec2::new(1.0, 0.0))),
            cue(1.0, Move(Vec2::ZERO)),
            cue(1.2, Press(Button::Attack)),
            cue(1.5, Release(Button::Attack)),
            cue(2.0, Press(Button::Defend)),
            cue(2.6, Release(Button::Defend)),
            cue(3.0, Press(Button::SkillOne)),
            cue(3.4, Release(Button::SkillOne)),
            cue(3.6, Press(Button::SkillTwo)),
            cue(4.0, Release(Button::SkillTwo)),
            cue(4.2, Move(Vec2::new(0.0, 1.0))),
            cue(4.5, Move(Vec2::ZERO)),
            cue(5.0, Press(Button::Attack)),
            cue(5.3, Release(Button::Attack)),
            cue(6.0, Press(Button::Attack)),
            cue(6.3, Release(Button::Attack)),
            cue(7.0, Press(Button::Attack)),
            cue(7.3, Release(Button::Attack)),
        ])
    }

    /// Returns the cues scheduled at or before `now` that have not been
    /// returned yet.
    pub fn due(&mut self, now: f32) -> &[Cue] {
        let start = self.cursor;
        while self.cues.get(self.cursor).is_some_and(|cue| cue.at <= now) {
            self.cursor += 1;
        }
        &self.cues[start..self.cursor]
    }

    pub fn is_finished(&self) -> bool {
        self.cursor == self.cues.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_returns_each_cue_once_in_time_order() {
        let mut script = Script::new(vec![
            Cue {
                at: 1.0,
                input: Input::Release(Button::Attack),
            },
            Cue {
                at: 0.5,
                input: Input::Press(Button::Attack),
            },
        ]);

        assert!(script.due(0.25).is_empty());
        assert_eq!(script.due(0.5)[0].input, Input::Press(Button::Attack));
        assert!(script.due(0.75).is_empty());
        assert_eq!(script.due(2.0).len(), 1);
        assert!(script.is_finished());
    }

    #[test]
    fn demo_releases_every_button_it_presses() {
        let mut script = Script::demo();
        let mut player = Player::new(Default::default(), Vec2::ZERO).unwrap();

        for cue in script.due(f32::MAX).to_vec() {
            cue.input.apply(&mut player);
        }

        assert!(player.body().input().is_empty());
        assert_eq!(player.body().move_axis(), Vec2::ZERO);
    }
}
