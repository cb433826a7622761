//! Collision tags used to route contacts into actor state machines.

/// Tag carried by a collider.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Tag {
    #[default]
    Untagged,
    Player,
    Enemy,
    /// The player's sword hitbox.
    Weapon,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_from_editor_names() {
        assert_eq!("Enemy".parse::<Tag>().unwrap(), Tag::Enemy);
        assert_eq!("weapon".parse::<Tag>().unwrap(), Tag::Weapon);
        assert_eq!(Tag::Player.as_ref(), "Player");
    }
}
