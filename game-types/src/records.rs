use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::PlayerId;

/// One finished session as stored on a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreEntry {
    pub level: u32, // Level reached (Classic) or words solved (Timed)
    pub duration: f64,
    pub stars: u8,
    pub last_played: String, // ISO 8601 string
}

impl ScoreEntry {
    /// Strictly higher level, or the same level in strictly less time.
    pub fn beats(&self, other: &ScoreEntry) -> bool {
        self.level > other.level || (self.level == other.level && self.duration < other.duration)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeaderboardRecord {
    pub last_record: ScoreEntry,
    pub best_record: ScoreEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RankedEntry {
    pub rank: u32,
    pub player_id: PlayerId,
    pub best_record: ScoreEntry,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: u32, duration: f64) -> ScoreEntry {
        ScoreEntry {
            level,
            duration,
            stars: 0,
            last_played: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_beats() {
        assert!(entry(6, 90.0).beats(&entry(5, 10.0)));
        assert!(entry(5, 30.0).beats(&entry(5, 40.0)));
        assert!(!entry(5, 40.0).beats(&entry(5, 40.0)));
        assert!(!entry(3, 5.0).beats(&entry(5, 30.0)));
    }
}
