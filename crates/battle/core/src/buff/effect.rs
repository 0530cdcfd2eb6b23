//! Buff payload variants and the optional capabilities they expose.
//!
//! Each variant carries its own payload struct. Capabilities are queried with
//! [`BuffEffect::damage_modifier`] / [`BuffEffect::tickable_mut`] rather than
//! assumed, so a variant only participates in the damage pipeline or turn
//! ticking when it implements the matching trait.

/// Hooks into the damage pipeline.
///
/// All methods default to "no change". Amounts are whole HP points.
pub trait DamageModifier {
    /// Outgoing damage from the buff's owner.
    fn apply_damage_increase(&self, amount: i32) -> i32 {
        amount
    }

    /// Incoming damage to the buff's owner, before mitigation.
    fn apply_damage_taken_increase(&self, amount: i32) -> i32 {
        amount
    }

    /// Incoming damage after mitigation; may absorb part of it.
    fn on_damage_taken(&mut self, amount: i32) -> i32 {
        amount
    }
}

/// Per-turn update beyond plain duration countdown.
pub trait TurnTickable {
    /// Returns whether the buff survives this tick.
    fn update(&mut self) -> bool;
}

/// Logical kind of a buff, used for "one current instance per kind" checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum BuffKind {
    Armor,
    DamageBoost,
    Vulnerability,
    Shield,
    Frozen,
    Crystallized,
}

/// Flat defense added to the owner's aggregate `defense` while attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArmorBonus {
    pub amount: i32,
}

/// Percentage increase of outgoing damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageBoost {
    pub percent: i32,
}

impl DamageModifier for DamageBoost {
    fn apply_damage_increase(&self, amount: i32) -> i32 {
        scale(amount, self.percent)
    }
}

/// Percentage increase of incoming damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vulnerability {
    pub percent: i32,
}

impl DamageModifier for Vulnerability {
    fn apply_damage_taken_increase(&self, amount: i32) -> i32 {
        scale(amount, self.percent)
    }
}

/// Absorbs incoming damage until depleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shield {
    pub remaining: i32,
}

impl DamageModifier for Shield {
    fn on_damage_taken(&mut self, amount: i32) -> i32 {
        let absorbed = amount.min(self.remaining).max(0);
        self.remaining -= absorbed;
        amount - absorbed
    }
}

impl TurnTickable for Shield {
    fn update(&mut self) -> bool {
        self.remaining > 0
    }
}

/// Owner cannot use abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Frozen;

/// Crystallized owner takes extra damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crystallized {
    pub percent: i32,
}

impl DamageModifier for Crystallized {
    fn apply_damage_taken_increase(&self, amount: i32) -> i32 {
        scale(amount, self.percent)
    }
}

/// Closed set of buff payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuffEffect {
    Armor(ArmorBonus),
    DamageBoost(DamageBoost),
    Vulnerability(Vulnerability),
    Shield(Shield),
    Frozen(Frozen),
    Crystallized(Crystallized),
}

impl BuffEffect {
    pub const fn armor(amount: i32) -> Self {
        Self::Armor(ArmorBonus { amount })
    }

    pub const fn damage_boost(percent: i32) -> Self {
        Self::DamageBoost(DamageBoost { percent })
    }

    pub const fn vulnerability(percent: i32) -> Self {
        Self::Vulnerability(Vulnerability { percent })
    }

    pub const fn shield(amount: i32) -> Self {
        Self::Shield(Shield { remaining: amount })
    }

    pub const fn crystallized(percent: i32) -> Self {
        Self::Crystallized(Crystallized { percent })
    }

    pub const fn kind(&self) -> BuffKind {
        match self {
            Self::Armor(_) => BuffKind::Armor,
            Self::DamageBoost(_) => BuffKind::DamageBoost,
            Self::Vulnerability(_) => BuffKind::Vulnerability,
            Self::Shield(_) => BuffKind::Shield,
            Self::Frozen(_) => BuffKind::Frozen,
            Self::Crystallized(_) => BuffKind::Crystallized,
        }
    }

    /// Numeric magnitude shown to the player.
    pub const fn magnitude(&self) -> i32 {
        match self {
            Self::Armor(a) => a.amount,
            Self::DamageBoost(b) => b.percent,
            Self::Vulnerability(v) => v.percent,
            Self::Shield(s) => s.remaining,
            Self::Frozen(_) => 0,
            Self::Crystallized(c) => c.percent,
        }
    }

    /// Contribution to the owner's aggregate defense while attached.
    pub const fn defense_delta(&self) -> i32 {
        match self {
            Self::Armor(a) => a.amount,
            _ => 0,
        }
    }

    pub fn damage_modifier(&self) -> Option<&dyn DamageModifier> {
        match self {
            Self::DamageBoost(b) => Some(b),
            Self::Vulnerability(v) => Some(v),
            Self::Shield(s) => Some(s),
            Self::Crystallized(c) => Some(c),
            Self::Armor(_) | Self::Frozen(_) => None,
        }
    }

    pub fn damage_modifier_mut(&mut self) -> Option<&mut dyn DamageModifier> {
        match self {
            Self::DamageBoost(b) => Some(b),
            Self::Vulnerability(v) => Some(v),
            Self::Shield(s) => Some(s),
            Self::Crystallized(c) => Some(c),
            Self::Armor(_) | Self::Frozen(_) => None,
        }
    }

    pub fn tickable_mut(&mut self) -> Option<&mut dyn TurnTickable> {
        match self {
            Self::Shield(s) => Some(s),
            _ => None,
        }
    }
}

/// `amount * (100 + percent) / 100`, never below zero.
fn scale(amount: i32, percent: i32) -> i32 {
    (amount * (100 + percent) / 100).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shield_absorbs_until_depleted() {
        let mut effect = BuffEffect::shield(30);
        let modifier = effect.damage_modifier_mut().unwrap();
        assert_eq!(modifier.on_damage_taken(20), 0);
        assert_eq!(modifier.on_damage_taken(20), 10);
        assert!(!effect.tickable_mut().unwrap().update());
    }

    #[test]
    fn armor_has_no_damage_capability() {
        let effect = BuffEffect::armor(5);
        assert!(effect.damage_modifier().is_none());
        assert_eq!(effect.defense_delta(), 5);
    }

    #[test]
    fn boosts_scale_by_percent() {
        let boost = BuffEffect::damage_boost(50);
        assert_eq!(boost.damage_modifier().unwrap().apply_damage_increase(10), 15);
        let vuln = BuffEffect::vulnerability(20);
        assert_eq!(vuln.damage_modifier().unwrap().apply_damage_taken_increase(10), 12);
    }
}
