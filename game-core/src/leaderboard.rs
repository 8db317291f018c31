use serde::{Deserialize, Serialize};
use spellout_types::{LeaderboardRecord, PlayerId, RankedEntry, ScoreEntry};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::ScoringEngine;

/// Build a score entry stamped with the current time.
pub fn score_entry(level: u32, duration_seconds: f64, stars: u8) -> ScoreEntry {
    ScoreEntry {
        level,
        duration: ScoringEngine::rounded_duration(duration_seconds),
        stars,
        last_played: chrono::Utc::now().to_rfc3339(),
    }
}

/// Best and last results of every player for one mode.
///
/// Serializes as a plain object keyed by player id, which is the leaderboard
/// file format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    records: BTreeMap<PlayerId, LeaderboardRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the player's last record; replace the best record only when
    /// `entry` beats it.
    pub fn record_result(&mut self, player_id: &str, entry: ScoreEntry) {
        match self.records.get_mut(player_id) {
            Some(record) => {
                if entry.beats(&record.best_record) {
                    record.best_record = entry.clone();
                }
                record.last_record = entry;
            }
            None => {
                self.records.insert(
                    player_id.to_string(),
                    LeaderboardRecord {
                        last_record: entry.clone(),
                        best_record: entry,
                    },
                );
            }
        }
    }

    /// Players ordered by best score descending, then duration ascending,
    /// then player id.
    pub fn rank(&self) -> Vec<RankedEntry> {
        let mut ordered: Vec<(&PlayerId, &ScoreEntry)> = self
            .records
            .iter()
            .map(|(player_id, record)| (player_id, &record.best_record))
            .collect();

        // BTreeMap iteration is already sorted by id, the stable sort keeps it
        ordered.sort_by(|(_, a), (_, b)| compare_best(a, b));

        ordered
            .into_iter()
            .enumerate()
            .map(|(index, (player_id, best))| RankedEntry {
                rank: (index + 1) as u32,
                player_id: player_id.clone(),
                best_record: best.clone(),
            })
            .collect()
    }

    pub fn top(&self, limit: usize) -> Vec<RankedEntry> {
        let mut ranked = self.rank();
        ranked.truncate(limit);
        ranked
    }

    pub fn rank_of(&self, player_id: &str) -> Option<u32> {
        self.rank()
            .into_iter()
            .find(|entry| entry.player_id == player_id)
            .map(|entry| entry.rank)
    }

    pub fn record(&self, player_id: &str) -> Option<&LeaderboardRecord> {
        self.records.get(player_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn compare_best(a: &ScoreEntry, b: &ScoreEntry) -> Ordering {
    b.level
        .cmp(&a.level)
        .then_with(|| a.duration.total_cmp(&b.duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(level: u32, duration: f64) -> ScoreEntry {
        score_entry(level, duration, ScoringEngine::stars_for(level))
    }

    #[test]
    fn test_best_record_is_monotonic() {
        let mut board = Leaderboard::new();

        board.record_result("alice", entry(5, 40.0));
        board.record_result("alice", entry(5, 30.0));
        let record = board.record("alice").unwrap();
        assert_eq!(record.best_record.duration, 30.0);

        board.record_result("alice", entry(3, 5.0));
        let record = board.record("alice").unwrap();
        assert_eq!(record.best_record.level, 5);
        assert_eq!(record.best_record.duration, 30.0);
        assert_eq!(record.last_record.level, 3);
        assert_eq!(record.last_record.duration, 5.0);
    }

    #[test]
    fn test_equal_result_does_not_replace_best() {
        let mut board = Leaderboard::new();
        let first = entry(5, 30.0);
        board.record_result("alice", first.clone());
        board.record_result("alice", entry(5, 30.0));
        assert_eq!(board.record("alice").unwrap().best_record.last_played, first.last_played);
    }

    #[test]
    fn test_rank_order() {
        let mut board = Leaderboard::new();
        board.record_result("carol", entry(10, 80.0));
        board.record_result("alice", entry(12, 200.0));
        board.record_result("bob", entry(10, 60.0));
        board.record_result("dave", entry(10, 60.0));

        let order: Vec<(u32, String)> = board
            .rank()
            .into_iter()
            .map(|e| (e.rank, e.player_id))
            .collect();
        assert_eq!(
            order,
            vec![
                (1, "alice".to_string()),
                (2, "bob".to_string()),
                (3, "dave".to_string()),
                (4, "carol".to_string()),
            ]
        );
        assert_eq!(board.rank_of("carol"), Some(4));
        assert_eq!(board.rank_of("nobody"), None);
        assert_eq!(board.top(2).len(), 2);
    }

    #[test]
    fn test_file_shape() {
        let mut board = Leaderboard::new();
        board.record_result(
            "alice",
            ScoreEntry {
                level: 5,
                duration: 30.0,
                stars: 1,
                last_played: "2024-05-01T10:00:00+00:00".to_string(),
            },
        );

        let json = serde_json::to_value(&board).unwrap();
        let expected = serde_json::json!({
            "alice": {
                "last_record": {
                    "level": 5,
                    "duration": 30.0,
                    "stars": 1,
                    "last_played": "2024-05-01T10:00:00+00:00"
                },
                "best_record": {
                    "level": 5,
                    "duration": 30.0,
                    "stars": 1,
                    "last_played": "2024-05-01T10:00:00+00:00"
                }
            }
        });
        assert_eq!(json, expected);

        let parsed: Leaderboard = serde_json::from_value(expected).unwrap();
        assert_eq!(parsed, board);
    }
}
