//! Rarity tiers and the weighting table used when offering modifiers.

/// Display color as 8-bit RGB.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#RRGGBB` form, handy for log markup and placeholders.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Rarity tier of a modifier.
///
/// Rarity controls how often a modifier is offered and the color it is shown
/// with. Ordered from most to least common.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Display color of the tier.
    pub const fn color(self) -> Color {
        match self {
            Rarity::Common => Color::rgb(200, 200, 200),
            Rarity::Uncommon => Color::rgb(30, 200, 60),
            Rarity::Rare => Color::rgb(40, 120, 255),
            Rarity::Epic => Color::rgb(160, 50, 230),
            Rarity::Legendary => Color::rgb(255, 165, 0),
        }
    }
}

/// Relative selection weight per rarity tier.
///
/// Values are relative: they are normalized over whatever pool is being drawn
/// from at sampling time, so a custom table does not need to sum to one.
/// Negative entries are treated as zero.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RarityWeights {
    pub common: f64,
    pub uncommon: f64,
    pub rare: f64,
    pub epic: f64,
    pub legendary: f64,
}

impl RarityWeights {
    pub const DEFAULT: Self = Self {
        common: 0.35,
        uncommon: 0.30,
        rare: 0.20,
        epic: 0.10,
        legendary: 0.05,
    };

    /// Weight of a tier, clamped to be non-negative.
    pub fn weight(&self, rarity: Rarity) -> f64 {
        let raw = match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
        };
        if raw.is_finite() { raw.max(0.0) } else { 0.0 }
    }

    /// Replaces the weight of one tier (builder pattern).
    #[must_use]
    pub fn with(mut self, rarity: Rarity, weight: f64) -> Self {
        match rarity {
            Rarity::Common => self.common = weight,
            Rarity::Uncommon => self.uncommon = weight,
            Rarity::Rare => self.rare = weight,
            Rarity::Epic => self.epic = weight,
            Rarity::Legendary => self.legendary = weight,
        }
        self
    }

    /// Sum of all tier weights.
    pub fn total(&self) -> f64 {
        Rarity::ALL.iter().map(|r| self.weight(*r)).sum()
    }
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}
