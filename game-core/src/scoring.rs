use spellout_types::{GameMode, Tier};

pub struct ScoringEngine;

impl ScoringEngine {
    /// Stars for a final score: 3 at 15+, 2 at 10+, 1 at 5+.
    pub fn stars_for(score: u32) -> u8 {
        match score {
            15.. => 3,
            10..=14 => 2,
            5..=9 => 1,
            _ => 0,
        }
    }

    /// Score committed to the leaderboard: the level reached in classic mode,
    /// the number of correctly solved words in timed mode.
    pub fn final_score(mode: GameMode, level: u32, correct_words: u32) -> u32 {
        match mode {
            GameMode::Classic => level,
            GameMode::Timed => correct_words,
        }
    }

    /// Tier finished by resolving `level`, if it is a tier boundary.
    pub fn tier_completed_at(level: u32) -> Option<Tier> {
        Tier::for_level(level).filter(|tier| tier.last_level() == level)
    }

    /// Round a session duration to hundredths of a second for storage.
    pub fn rounded_duration(seconds: f64) -> f64 {
        (seconds * 100.0).round() / 100.0
    }
}
