pub mod config;
pub mod input;
pub mod presenter;

use anyhow::{Context, Result};
use spellout_core::{ProgressionEngine, Shuffler, WordBank, random_player_name};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;

/// Word catalog from `SPELLOUT_WORDS_FILE`, or the built-in one.
pub fn load_word_bank(config: &Config) -> Result<WordBank> {
    let Some(path) = &config.words_file else {
        info!("Using the built-in word catalog");
        return Ok(WordBank::builtin());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading word catalog {}", path.display()))?;
    let bank = WordBank::from_json_str(&json)
        .with_context(|| format!("loading word catalog {}", path.display()))?;
    info!("Loaded {} words from {}", bank.word_count(), path.display());
    Ok(bank)
}

/// Engine backed by the JSON files named in `config`.
pub fn build_engine(config: &Config, word_bank: WordBank) -> ProgressionEngine {
    let word_bank = Arc::new(word_bank);
    let shuffler = match config.seed {
        Some(seed) => Shuffler::with_seed(word_bank.clone(), seed),
        None => Shuffler::new(word_bank.clone()),
    };
    let player_id = config
        .player_id
        .clone()
        .unwrap_or_else(random_player_name);
    info!("Playing as {}", player_id);

    ProgressionEngine::new(
        player_id,
        word_bank,
        shuffler,
        Box::new(config.storage.session_store()),
        Box::new(config.storage.leaderboards()),
    )
}
