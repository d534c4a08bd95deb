/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Highest item id the catalog can resolve. Ids are drawn from `[1, catalog_size]`.
    pub catalog_size: u32,
    /// Seconds between two chaos reshuffles of the label layout.
    pub chaos_period_secs: u64,
    /// Probability that a label is shown upside down after a reshuffle.
    pub flip_chance: f64,
    /// Pause between a won round and the start of the next level.
    pub level_advance_delay_secs: u64,
    /// Countdown granularity.
    pub tick_secs: u64,
}

impl GameConfig {
    // ===== scoring =====
    /// Points awarded for a correct match.
    pub const MATCH_REWARD: i64 = 10;
    /// Points removed for an incorrect match. The score has no floor.
    pub const MISMATCH_PENALTY: i64 = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CATALOG_SIZE: u32 = 1025;
    pub const DEFAULT_CHAOS_PERIOD_SECS: u64 = 20;
    pub const DEFAULT_FLIP_CHANCE: f64 = 0.1;
    pub const DEFAULT_LEVEL_ADVANCE_DELAY_SECS: u64 = 5;
    pub const DEFAULT_TICK_SECS: u64 = 1;

    pub fn new() -> Self {
        Self {
            catalog_size: Self::DEFAULT_CATALOG_SIZE,
            chaos_period_secs: Self::DEFAULT_CHAOS_PERIOD_SECS,
            flip_chance: Self::DEFAULT_FLIP_CHANCE,
            level_advance_delay_secs: Self::DEFAULT_LEVEL_ADVANCE_DELAY_SECS,
            tick_secs: Self::DEFAULT_TICK_SECS,
        }
    }

    pub fn with_catalog_size(mut self, catalog_size: u32) -> Self {
        self.catalog_size = catalog_size;
        self
    }

    pub fn with_chaos_period_secs(mut self, secs: u64) -> Self {
        self.chaos_period_secs = secs.max(1);
        self
    }

    pub fn with_level_advance_delay_secs(mut self, secs: u64) -> Self {
        self.level_advance_delay_secs = secs;
        self
    }

    /// Clamps the probability into `[0, 1]`; NaN disables flipping.
    pub fn with_flip_chance(mut self, chance: f64) -> Self {
        self.flip_chance = if chance.is_nan() {
            0.0
        } else {
            chance.clamp(0.0, 1.0)
        };
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
