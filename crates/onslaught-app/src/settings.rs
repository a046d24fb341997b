//! Run settings read from the environment.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::info;

use onslaught_arena::Arena;
use onslaught_core::config::GameConfig;
use onslaught_core::constants::TICK_RATE;
use onslaught_core::enums::RunMode;
use onslaught_sim::SimConfig;

/// Ten minutes of simulated time.
pub const DEFAULT_MAX_TICKS: u64 = TICK_RATE as u64 * 600;

/// How the binary should run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSettings {
    pub seed: u64,
    /// Gameplay tunables JSON. `None` uses the built-in defaults.
    pub config_path: Option<PathBuf>,
    /// Arena layout JSON. `None` uses the default layout.
    pub arena_path: Option<PathBuf>,
    pub mode: RunMode,
    pub max_ticks: u64,
    /// Pace ticks at wall-clock speed on the game-loop thread.
    pub realtime: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            config_path: None,
            arena_path: None,
            mode: RunMode::Limited,
            max_ticks: DEFAULT_MAX_TICKS,
            realtime: false,
        }
    }
}

impl RunSettings {
    /// Construct settings from environment variables.
    ///
    /// Environment variables:
    /// - `ONSLAUGHT_SEED` - RNG seed (default: 42)
    /// - `ONSLAUGHT_CONFIG` - path to a gameplay config JSON
    /// - `ONSLAUGHT_ARENA` - path to an arena layout JSON
    /// - `ONSLAUGHT_MODE` - `limited` or `endless` (default: limited)
    /// - `ONSLAUGHT_MAX_TICKS` - stop after this many ticks
    /// - `ONSLAUGHT_REALTIME` - `1`/`true` to pace at 30 Hz
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RunSettings::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(seed) = lookup("ONSLAUGHT_SEED") {
            settings.seed = seed
                .trim()
                .parse()
                .with_context(|| format!("ONSLAUGHT_SEED is not a number: {seed:?}"))?;
        }
        settings.config_path = lookup("ONSLAUGHT_CONFIG").map(PathBuf::from);
        settings.arena_path = lookup("ONSLAUGHT_ARENA").map(PathBuf::from);
        if let Some(mode) = lookup("ONSLAUGHT_MODE") {
            settings.mode = parse_mode(&mode)?;
        }
        if let Some(ticks) = lookup("ONSLAUGHT_MAX_TICKS") {
            settings.max_ticks = ticks
                .trim()
                .parse()
                .with_context(|| format!("ONSLAUGHT_MAX_TICKS is not a number: {ticks:?}"))?;
        }
        if let Some(flag) = lookup("ONSLAUGHT_REALTIME") {
            settings.realtime = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        Ok(settings)
    }

    /// Load the configured files and assemble the engine config.
    pub fn sim_config(&self) -> Result<SimConfig> {
        let game = match &self.config_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading game config {}", path.display()))?;
                GameConfig::from_json(&json).with_context(|| format!("parsing game config {}", path.display()))?
            }
            None => GameConfig::default(),
        };
        let arena = match &self.arena_path {
            Some(path) => Arena::load(path).with_context(|| format!("loading arena {}", path.display()))?,
            None => Arena::default(),
        };
        info!(seed = self.seed, mode = ?self.mode, "configuration loaded");

        Ok(SimConfig {
            seed: self.seed,
            time_scale: 1.0,
            game,
            arena,
        })
    }
}

fn parse_mode(value: &str) -> Result<RunMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "limited" => Ok(RunMode::Limited),
        "endless" => Ok(RunMode::Endless),
        other => bail!("ONSLAUGHT_MODE must be `limited` or `endless`, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let settings = RunSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, RunSettings::default());
    }

    #[test]
    fn test_reads_every_variable() {
        let settings = RunSettings::from_lookup(lookup(&[
            ("ONSLAUGHT_SEED", "7"),
            ("ONSLAUGHT_CONFIG", "game.json"),
            ("ONSLAUGHT_ARENA", "arena.json"),
            ("ONSLAUGHT_MODE", "Endless"),
            ("ONSLAUGHT_MAX_TICKS", "900"),
            ("ONSLAUGHT_REALTIME", "true"),
        ]))
        .unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.config_path, Some(PathBuf::from("game.json")));
        assert_eq!(settings.arena_path, Some(PathBuf::from("arena.json")));
        assert_eq!(settings.mode, RunMode::Endless);
        assert_eq!(settings.max_ticks, 900);
        assert!(settings.realtime);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(RunSettings::from_lookup(lookup(&[("ONSLAUGHT_SEED", "abc")])).is_err());
        assert!(RunSettings::from_lookup(lookup(&[("ONSLAUGHT_MODE", "forever")])).is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let settings = RunSettings {
            config_path: Some(PathBuf::from("/nonexistent/onslaught.json")),
            ..Default::default()
        };
        assert!(settings.sim_config().is_err());
    }
}
