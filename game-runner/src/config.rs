use anyhow::{Context, Result, bail};
use spellout_persistence::StoragePaths;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage: StoragePaths,
    pub words_file: Option<PathBuf>,
    pub player_id: Option<String>,
    pub tick_interval: Duration,
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = PathBuf::from(
            get("SPELLOUT_DATA_DIR").unwrap_or_else(|| "./data".to_string()),
        );
        let defaults = StoragePaths::in_dir(&data_dir);
        let storage = StoragePaths {
            save_file: get("SPELLOUT_SAVE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.save_file),
            classic_leaderboard: get("SPELLOUT_CLASSIC_LEADERBOARD")
                .map(PathBuf::from)
                .unwrap_or(defaults.classic_leaderboard),
            timed_leaderboard: get("SPELLOUT_TIMED_LEADERBOARD")
                .map(PathBuf::from)
                .unwrap_or(defaults.timed_leaderboard),
        };

        let tick_ms: u64 = get("SPELLOUT_TICK_MS")
            .unwrap_or_else(|| "250".to_string())
            .parse()
            .context("Invalid SPELLOUT_TICK_MS")?;
        if tick_ms == 0 {
            bail!("SPELLOUT_TICK_MS must be greater than zero");
        }

        let seed = get("SPELLOUT_SEED")
            .map(|value| value.parse::<u64>())
            .transpose()
            .context("Invalid SPELLOUT_SEED")?;

        Ok(Self {
            data_dir,
            storage,
            words_file: get("SPELLOUT_WORDS_FILE").map(PathBuf::from),
            player_id: get("SPELLOUT_PLAYER").map(|name| name.trim().to_string()),
            tick_interval: Duration::from_millis(tick_ms),
            seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.storage.save_file, PathBuf::from("./data/savegame.json"));
        assert_eq!(
            config.storage.classic_leaderboard,
            PathBuf::from("./data/leaderboard_classic.json")
        );
        assert_eq!(
            config.storage.timed_leaderboard,
            PathBuf::from("./data/leaderboard_timed.json")
        );
        assert_eq!(config.words_file, None);
        assert_eq!(config.player_id, None);
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("SPELLOUT_DATA_DIR", "/var/spellout"),
            ("SPELLOUT_TIMED_LEADERBOARD", "/tmp/timed.json"),
            ("SPELLOUT_WORDS_FILE", "words.json"),
            ("SPELLOUT_PLAYER", " JollyPanda "),
            ("SPELLOUT_TICK_MS", "100"),
            ("SPELLOUT_SEED", "42"),
            ("SPELLOUT_SAVE_FILE", ""),
        ])
        .unwrap();
        assert_eq!(config.storage.save_file, PathBuf::from("/var/spellout/savegame.json"));
        assert_eq!(config.storage.timed_leaderboard, PathBuf::from("/tmp/timed.json"));
        assert_eq!(config.words_file, Some(PathBuf::from("words.json")));
        assert_eq!(config.player_id.as_deref(), Some("JollyPanda"));
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_invalid_values() {
        assert!(config(&[("SPELLOUT_TICK_MS", "fast")]).is_err());
        assert!(config(&[("SPELLOUT_TICK_MS", "0")]).is_err());
        assert!(config(&[("SPELLOUT_SEED", "-1")]).is_err());
    }
}
