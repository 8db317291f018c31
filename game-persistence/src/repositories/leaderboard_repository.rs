use anyhow::Result;
use spellout_core::{Leaderboard, LeaderboardRepository};
use spellout_types::GameMode;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::files;

/// Leaderboards stored as one JSON file per mode.
#[derive(Debug, Clone)]
pub struct JsonLeaderboardRepository {
    classic_path: PathBuf,
    timed_path: PathBuf,
}

impl JsonLeaderboardRepository {
    pub fn new(classic_path: impl AsRef<Path>, timed_path: impl AsRef<Path>) -> Self {
        Self {
            classic_path: classic_path.as_ref().to_path_buf(),
            timed_path: timed_path.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, mode: GameMode) -> &Path {
        match mode {
            GameMode::Classic => &self.classic_path,
            GameMode::Timed => &self.timed_path,
        }
    }
}

impl LeaderboardRepository for JsonLeaderboardRepository {
    fn load(&self, mode: GameMode) -> Leaderboard {
        match files::read_json::<Leaderboard>(self.path_for(mode)) {
            Ok(board) => board.unwrap_or_default(),
            Err(e) => {
                warn!("Treating {} leaderboard as empty: {:#}", mode, e);
                Leaderboard::default()
            }
        }
    }

    fn store(&mut self, mode: GameMode, board: &Leaderboard) -> Result<()> {
        let path = self.path_for(mode);
        files::write_json(path, board)?;
        debug!("Wrote {} leaderboard with {} players", mode, board.len());
        Ok(())
    }
}
