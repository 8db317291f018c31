use spellout_types::{MAX_LEVEL, Tier};
use std::time::Duration;

/// Tunable numbers of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRules {
    pub attempts_per_word: u8,
    pub max_level: u32,
    pub easy_time_limit: Duration,
    pub normal_time_limit: Duration,
    pub hard_time_limit: Duration,
    pub easy_completion_bonus: Duration,
    pub normal_completion_bonus: Duration,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            attempts_per_word: 4,
            max_level: MAX_LEVEL,
            easy_time_limit: Duration::from_secs(15),
            normal_time_limit: Duration::from_secs(30),
            hard_time_limit: Duration::from_secs(60),
            easy_completion_bonus: Duration::from_secs(15),
            normal_completion_bonus: Duration::from_secs(30),
        }
    }
}

impl GameRules {
    /// Base countdown per word in timed mode.
    pub fn time_limit(&self, tier: Tier) -> Duration {
        match tier {
            Tier::Easy => self.easy_time_limit,
            Tier::Normal => self.normal_time_limit,
            Tier::Hard => self.hard_time_limit,
        }
    }

    /// Extra seconds granted for finishing a tier in timed mode.
    pub fn completion_bonus(&self, tier: Tier) -> Duration {
        match tier {
            Tier::Easy => self.easy_completion_bonus,
            Tier::Normal => self.normal_completion_bonus,
            Tier::Hard => Duration::ZERO,
        }
    }

    /// Countdown for a word of `tier` once `bonus` has been accrued.
    pub fn effective_time_limit(&self, tier: Tier, bonus: Duration) -> Duration {
        self.time_limit(tier) + bonus
    }
}
