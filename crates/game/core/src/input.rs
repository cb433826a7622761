//! Button state as read by player states.
//!
//! The host translates device press/release edges into [`InputFlags`]; states
//! only ever read the flags and never see raw input.

use bitflags::bitflags;

bitflags! {
    /// Buttons currently held.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct InputFlags: u8 {
        const ATTACK    = 1 << 0;
        const DEFEND    = 1 << 1;
        const SKILL_ONE = 1 << 2;
        const SKILL_TWO = 1 << 3;

        const SKILLS = Self::SKILL_ONE.bits() | Self::SKILL_TWO.bits();
    }
}

/// A single bindable action button.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Button {
    Attack,
    Defend,
    SkillOne,
    SkillTwo,
}

impl Button {
    /// The flag this button sets while held.
    pub const fn flag(self) -> InputFlags {
        match self {
            Button::Attack => InputFlags::ATTACK,
            Button::Defend => InputFlags::DEFEND,
            Button::SkillOne => InputFlags::SKILL_ONE,
            Button::SkillTwo => InputFlags::SKILL_TWO,
        }
    }
}
