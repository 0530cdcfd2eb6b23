//! Damage pipeline.
//!
//! ```text
//! base ─▶ attacker buffs (apply_damage_increase)
//!      ─▶ target buffs   (apply_damage_taken_increase)
//!      ─▶ defense mitigation
//!      ─▶ target buffs   (on_damage_taken, e.g. shields)
//!      ─▶ HP loss
//! ```

use crate::character::Character;
use crate::config::BattleConfig;

/// Applies defense mitigation: `amount * K / (K + defense)`.
///
/// Negative defense is treated as zero. Any positive hit deals at least 1.
pub fn mitigate(amount: i32, defense: i32) -> i32 {
    if amount <= 0 {
        return 0;
    }
    let k = BattleConfig::MITIGATION_SCALE;
    let defense = defense.max(0);
    (amount * k / (k + defense)).max(1)
}

/// Outgoing damage after the attacker's buffs.
pub fn outgoing(attacker: Option<&Character>, base: i32) -> i32 {
    match attacker {
        Some(attacker) => attacker.buffs.apply_damage_increase(base),
        None => base,
    }
}

/// Runs the target half of the pipeline and removes HP.
///
/// Returns the HP actually lost.
pub fn receive(target: &mut Character, amount: i32) -> i32 {
    if !target.is_alive() || amount <= 0 {
        return 0;
    }
    let amount = target.buffs.apply_damage_taken_increase(amount);
    let amount = mitigate(amount, target.stats.defense);
    let amount = target.buffs.on_damage_taken(amount);
    target.take_damage(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::Team;
    use crate::buff::{BuffEffect, BuffRecord};
    use crate::stats::CharacterStats;

    fn dummy(defense: i32) -> Character {
        Character::new("Dummy", Team::Enemy, CharacterStats::new(100, 0, defense))
    }

    #[test]
    fn defense_mitigates_damage() {
        assert_eq!(mitigate(20, 0), 20);
        assert_eq!(mitigate(20, 100), 10);
        assert_eq!(mitigate(1, 1000), 1);
        assert_eq!(mitigate(0, 0), 0);
    }

    #[test]
    fn pipeline_applies_buffs_in_order() {
        let mut attacker = dummy(0);
        attacker.add_buff(BuffRecord::new("Rage", BuffEffect::damage_boost(50)));
        let mut target = dummy(0);
        target.add_buff(BuffRecord::new("Brittle", BuffEffect::vulnerability(20)));
        target.add_buff(BuffRecord::new("Ward", BuffEffect::shield(5)));

        let amount = outgoing(Some(&attacker), 20);
        assert_eq!(amount, 30);
        // 30 * 1.2 = 36, shield absorbs 5
        assert_eq!(receive(&mut target, amount), 31);
        assert_eq!(target.stats.hp, 69);
    }

    #[test]
    fn dead_targets_take_nothing() {
        let mut target = dummy(0);
        target.take_damage(100);
        assert_eq!(receive(&mut target, 50), 0);
    }
}
