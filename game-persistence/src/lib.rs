pub mod files;
pub mod repositories;

pub use repositories::{JsonLeaderboardRepository, JsonSessionStore};

use std::path::{Path, PathBuf};

/// File locations of everything the game persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub save_file: PathBuf,
    pub classic_leaderboard: PathBuf,
    pub timed_leaderboard: PathBuf,
}

impl StoragePaths {
    /// Default file names inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            save_file: data_dir.join("savegame.json"),
            classic_leaderboard: data_dir.join("leaderboard_classic.json"),
            timed_leaderboard: data_dir.join("leaderboard_timed.json"),
        }
    }

    pub fn session_store(&self) -> JsonSessionStore {
        JsonSessionStore::new(&self.save_file)
    }

    pub fn leaderboards(&self) -> JsonLeaderboardRepository {
        JsonLeaderboardRepository::new(&self.classic_leaderboard, &self.timed_leaderboard)
    }
}
