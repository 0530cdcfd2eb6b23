//! Character resource and defense values.

/// Mutable numeric state of a character.
///
/// `defense` is the aggregate value: base defense plus every attached armor
/// buff. Buff attach/detach keeps it in sync (see [`crate::Character::add_buff`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterStats {
    pub hp: i32,
    pub max_hp: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub defense: i32,
}

impl CharacterStats {
    /// Full HP and mana with the given maximums.
    pub fn new(max_hp: i32, max_mana: i32, defense: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            mana: max_mana,
            max_mana,
            defense,
        }
    }

    /// Missing HP as a percentage of max HP (0..=100).
    pub fn missing_hp_percent(&self) -> i32 {
        if self.max_hp <= 0 {
            return 0;
        }
        let missing = (self.max_hp - self.hp).clamp(0, self.max_hp);
        missing * 100 / self.max_hp
    }

    /// Current HP as a percentage of max HP (0..=100).
    pub fn hp_percent(&self) -> i32 {
        100 - self.missing_hp_percent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_hp_percent_tracks_damage() {
        let mut stats = CharacterStats::new(200, 50, 0);
        assert_eq!(stats.missing_hp_percent(), 0);
        stats.hp = 50;
        assert_eq!(stats.missing_hp_percent(), 75);
        assert_eq!(stats.hp_percent(), 25);
    }

    #[test]
    fn zero_max_hp_is_not_missing_anything() {
        let stats = CharacterStats::default();
        assert_eq!(stats.missing_hp_percent(), 0);
    }
}
