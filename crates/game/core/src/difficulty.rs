//! Difficulty tiers and the policy mapping a tier and level to round parameters.

/// Named difficulty preset chosen by the player.
///
/// `Standard` is the fallback row used when the selector does not name a
/// known tier; it is never chosen explicitly by a player.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DifficultyTier {
    Easy,
    #[default]
    Medium,
    Hard,
    /// Fallback parameters for an unrecognized selector.
    Standard,
}

impl DifficultyTier {
    /// Parses a selector value leniently.
    ///
    /// Unknown values resolve to [`DifficultyTier::Standard`] instead of failing.
    pub fn from_selector(selector: &str) -> Self {
        match selector.trim().parse::<Self>() {
            Ok(Self::Standard) | Err(_) => Self::Standard,
            Ok(tier) => tier,
        }
    }

    /// Returns true for the fallback tier.
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Standard)
    }
}

/// Parameters of a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundConfig {
    /// Number of distinct items (and labels) on the board. Always `>= 1`.
    pub item_count: usize,
    /// Countdown length. Always `>= 1`.
    pub duration_secs: u32,
}

/// Maps a tier and level to a [`RoundConfig`].
///
/// | tier     | item count                  | duration |
/// |----------|-----------------------------|----------|
/// | Easy     | 10 + floor((level - 1) / 2) | 90       |
/// | Medium   | 15 + floor((level - 1) / 2) | 120      |
/// | Hard     | 20 + floor((level - 1) / 2) | 150      |
/// | Standard | 10                          | 120      |
#[derive(Clone, Copy, Debug, Default)]
pub struct DifficultyPolicy;

impl DifficultyPolicy {
    pub fn resolve(tier: DifficultyTier, level: u32) -> RoundConfig {
        let growth = (level.max(1) as usize - 1) / 2;

        let (base, duration_secs) = match tier {
            DifficultyTier::Easy => (10, 90),
            DifficultyTier::Medium => (15, 120),
            DifficultyTier::Hard => (20, 150),
            DifficultyTier::Standard => {
                return RoundConfig {
                    item_count: 10,
                    duration_secs: 120,
                };
            }
        };

        RoundConfig {
            item_count: base + growth,
            duration_secs,
        }
    }
}
