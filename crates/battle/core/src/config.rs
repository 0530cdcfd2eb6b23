/// Battle rule constants and tunable defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Number of modifiers offered per selection.
    pub offer_size: usize,
}

impl BattleConfig {
    // ===== fixed rules =====
    /// First stage of a run.
    pub const FIRST_STAGE: u8 = 1;
    /// Last stage of a run.
    pub const LAST_STAGE: u8 = 5;
    /// Denominator of the defense mitigation curve: `dmg * K / (K + defense)`.
    pub const MITIGATION_SCALE: i32 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_OFFER_SIZE: usize = 3;

    pub fn new() -> Self {
        Self {
            offer_size: Self::DEFAULT_OFFER_SIZE,
        }
    }

    pub fn with_offer_size(offer_size: usize) -> Self {
        Self { offer_size }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
