//! Bootstrap configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use match_core::{DifficultyTier, GameConfig};
use match_runtime::RuntimeConfig;

/// Remote creature catalog used when `MATCH_CATALOG_URL` is not set.
pub const DEFAULT_CATALOG_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Configuration required to bootstrap a session runtime.
#[derive(Clone, Debug)]
pub struct BootstrapConfig {
    pub tier: DifficultyTier,
    pub seed: Option<u64>,
    pub catalog_size: u32,
    pub chaos_period_secs: u64,
    pub level_advance_delay_secs: u64,
    pub catalog_url: String,
    /// Also write logs to `<log_dir>/match.log` when set.
    pub log_dir: Option<PathBuf>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            tier: DifficultyTier::default(),
            seed: None,
            catalog_size: GameConfig::DEFAULT_CATALOG_SIZE,
            chaos_period_secs: GameConfig::DEFAULT_CHAOS_PERIOD_SECS,
            level_advance_delay_secs: GameConfig::DEFAULT_LEVEL_ADVANCE_DELAY_SECS,
            catalog_url: DEFAULT_CATALOG_URL.to_owned(),
            log_dir: None,
        }
    }
}

impl BootstrapConfig {
    /// Construct configuration from `.env` and process environment variables.
    ///
    /// Environment variables:
    /// - `MATCH_DIFFICULTY` - `easy`, `medium` or `hard`; anything else plays standard rounds (default: medium)
    /// - `MATCH_SEED` - Fixed RNG seed (default: OS entropy)
    /// - `MATCH_CATALOG_SIZE` - Highest catalog id to sample (default: 1025)
    /// - `MATCH_CHAOS_PERIOD_SECS` - Seconds between label reshuffles (default: 20)
    /// - `MATCH_ADVANCE_DELAY_SECS` - Pause before the next level (default: 5)
    /// - `MATCH_CATALOG_URL` - Base URL of the item catalog
    /// - `MATCH_LOG_DIR` - Directory for the log file (default: stderr only)
    pub fn from_env() -> Self {
        // Load .env file if it exists (silently ignore if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] but reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(selector) = lookup("MATCH_DIFFICULTY") {
            config.tier = DifficultyTier::from_selector(&selector);
        }

        config.seed = read_env(&lookup, "MATCH_SEED");

        if let Some(size) = read_env::<u32>(&lookup, "MATCH_CATALOG_SIZE") {
            config.catalog_size = size.max(1);
        }

        if let Some(secs) = read_env::<u64>(&lookup, "MATCH_CHAOS_PERIOD_SECS") {
            config.chaos_period_secs = secs.max(1);
        }

        if let Some(secs) = read_env(&lookup, "MATCH_ADVANCE_DELAY_SECS") {
            config.level_advance_delay_secs = secs;
        }

        if let Some(url) = lookup("MATCH_CATALOG_URL").filter(|url| !url.trim().is_empty()) {
            config.catalog_url = url;
        }

        config.log_dir = lookup("MATCH_LOG_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        config
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new()
            .with_catalog_size(self.catalog_size)
            .with_chaos_period_secs(self.chaos_period_secs)
            .with_level_advance_delay_secs(self.level_advance_delay_secs)
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            game: self.game_config(),
            tier: self.tier,
            seed: self.seed,
            ..RuntimeConfig::default()
        }
    }
}

fn read_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
