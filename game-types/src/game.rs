use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use ts_rs::TS;

use crate::PlayerId;

/// Levels grouped into each tier.
pub const LEVELS_PER_TIER: u32 = 5;

/// Final level of a session.
pub const MAX_LEVEL: u32 = 15;

/// Current save-slot format. Bump when the snapshot shape changes.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Tier {
    Easy,
    Normal,
    Hard,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Normal, Tier::Hard];

    /// Tier owning a 1-based level, `None` outside 1..=15.
    pub fn for_level(level: u32) -> Option<Tier> {
        match level {
            1..=5 => Some(Tier::Easy),
            6..=10 => Some(Tier::Normal),
            11..=15 => Some(Tier::Hard),
            _ => None,
        }
    }

    /// Level whose completion finishes this tier.
    pub fn last_level(&self) -> u32 {
        match self {
            Self::Easy => LEVELS_PER_TIER,
            Self::Normal => LEVELS_PER_TIER * 2,
            Self::Hard => LEVELS_PER_TIER * 3,
        }
    }

    /// Stars announced when the tier is completed.
    pub fn completion_stars(&self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Normal => 2,
            Self::Hard => 3,
        }
    }

    pub fn color_hex(&self) -> &'static str {
        match self {
            Self::Easy => "#47b970",
            Self::Normal => "#0cc0df",
            Self::Hard => "#de3434",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameMode {
    Classic, // Running out of attempts ends the session
    Timed,   // Every word has a countdown, misses only skip the word
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Timed => "timed",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry. Text is stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Word {
    #[serde(rename = "word")]
    pub text: String,
    pub clue: String,
}

impl Word {
    pub fn new(text: &str, clue: &str) -> Self {
        Self {
            text: text.trim().to_uppercase(),
            clue: clue.trim().to_string(),
        }
    }

    /// Non-empty, only ASCII letters and spaces, at least one letter.
    pub fn is_well_formed(&self) -> bool {
        self.text.chars().any(|c| c.is_ascii_alphabetic())
            && self.text.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
    }

    /// Distinct letters that must be guessed to solve the word.
    pub fn letters(&self) -> BTreeSet<char> {
        self.text
            .chars()
            .filter(|c| *c != ' ')
            .map(|c| c.to_ascii_uppercase())
            .collect()
    }

    pub fn contains(&self, letter: char) -> bool {
        let letter = letter.to_ascii_uppercase();
        self.text.chars().any(|c| c.to_ascii_uppercase() == letter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundOutcome {
    Win,
    Lose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SessionOutcome {
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GamePhase {
    ModeSelect,
    Playing,
    Paused,
    SessionEnded(SessionOutcome),
    Closed,
}

impl GamePhase {
    /// Check if a round is in progress (running or suspended).
    pub fn has_active_round(&self) -> bool {
        matches!(self, Self::Playing | Self::Paused)
    }
}

/// Single save slot contents.
///
/// Field names follow the on-disk format. The per-tier queues are keyed by
/// tier name; the older list-shaped `shuffled_words` fails to deserialize and
/// is therefore treated as "no saved game".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSnapshot {
    pub version: u32,
    pub uid: PlayerId,
    pub mode: GameMode,
    pub level: u32,
    pub attempts: u8,
    pub guessed_letters: Vec<char>,
    pub selected_word: Word,
    pub selected_difficulty: Tier,
    pub shuffled_words: BTreeMap<Tier, Vec<Word>>,
    #[serde(default)]
    pub correct_words: u32,
    #[serde(default)]
    pub time_bonus: u32,
    #[serde(default)]
    pub elapsed_seconds: f64,
    #[serde(default)]
    pub round_elapsed_seconds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_for_level_boundaries() {
        assert_eq!(Tier::for_level(0), None);
        assert_eq!(Tier::for_level(1), Some(Tier::Easy));
        assert_eq!(Tier::for_level(5), Some(Tier::Easy));
        assert_eq!(Tier::for_level(6), Some(Tier::Normal));
        assert_eq!(Tier::for_level(10), Some(Tier::Normal));
        assert_eq!(Tier::for_level(11), Some(Tier::Hard));
        assert_eq!(Tier::for_level(15), Some(Tier::Hard));
        assert_eq!(Tier::for_level(16), None);

        for tier in Tier::ALL {
            assert_eq!(Tier::for_level(tier.last_level()), Some(tier));
        }
    }

    #[test]
    fn test_word_normalization_and_letters() {
        let word = Word::new("  ice cream ", " Dessert ");
        assert_eq!(word.text, "ICE CREAM");
        assert_eq!(word.clue, "Dessert");
        assert!(word.is_well_formed());

        let letters: Vec<char> = word.letters().into_iter().collect();
        assert_eq!(letters, vec!['A', 'C', 'E', 'I', 'M', 'R']);
        assert!(word.contains('c'));
        assert!(!word.contains('z'));
    }

    #[test]
    fn test_malformed_words() {
        assert!(!Word::new("", "empty").is_well_formed());
        assert!(!Word::new("   ", "spaces").is_well_formed());
        assert!(!Word::new("R2D2", "droid").is_well_formed());
        assert!(!Word::new("CAFÉ", "accent").is_well_formed());
    }

    #[test]
    fn test_word_uses_word_key_on_the_wire() {
        let json = serde_json::to_value(Word::new("cat", "meow")).unwrap();
        assert_eq!(json, serde_json::json!({"word": "CAT", "clue": "meow"}));
    }

    #[test]
    fn test_snapshot_rejects_list_shaped_queues() {
        let legacy = serde_json::json!({
            "version": 1,
            "uid": "Alice",
            "mode": "Classic",
            "level": 2,
            "attempts": 3,
            "guessed_letters": ["A"],
            "selected_word": {"word": "CAT", "clue": "meow"},
            "selected_difficulty": "Easy",
            "shuffled_words": [{"word": "FROG", "clue": "ribbit"}]
        });
        assert!(serde_json::from_value::<SessionSnapshot>(legacy).is_err());
    }
}
