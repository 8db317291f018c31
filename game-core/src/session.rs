use spellout_types::{GameMode, PlayerId, SNAPSHOT_VERSION, SessionSnapshot, Tier, Word};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::{GameRules, RoundState, RoundStatus, SessionClock};

#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
    #[error("level {0} is out of range")]
    LevelOutOfRange(u32),
    #[error("level {level} does not belong to tier {tier}")]
    TierMismatch { level: u32, tier: Tier },
    #[error("attempts {0} is out of range")]
    AttemptsOutOfRange(u8),
    #[error("saved word {0:?} is not a valid word")]
    InvalidWord(String),
    #[error("queued {tier} word {word:?} is not a valid word")]
    InvalidQueuedWord { tier: Tier, word: String },
    #[error("guessed letter {0:?} is not a letter")]
    InvalidLetter(char),
    #[error("saved round is already resolved")]
    RoundAlreadyResolved,
}

/// Everything that changes while a session is played.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub player_id: PlayerId,
    pub mode: GameMode,
    pub level: u32,
    pub round: RoundState,
    pub correct_words: u32,
    pub time_bonus: Duration,
    pub clock: SessionClock,
    pub last_reported_second: Option<u32>,
}

impl SessionState {
    pub fn new(player_id: PlayerId, mode: GameMode, round: RoundState, now: Instant) -> Self {
        Self {
            player_id,
            mode,
            level: 1,
            round,
            correct_words: 0,
            time_bonus: Duration::ZERO,
            clock: SessionClock::start(now),
            last_reported_second: None,
        }
    }

    pub fn tier(&self) -> Tier {
        Tier::for_level(self.level).unwrap_or(Tier::Hard)
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Countdown for the current word, `None` outside timed mode.
    pub fn time_limit(&self, rules: &GameRules) -> Option<Duration> {
        match self.mode {
            GameMode::Timed => Some(rules.effective_time_limit(self.tier(), self.time_bonus)),
            GameMode::Classic => None,
        }
    }

    pub fn remaining_time(&self, rules: &GameRules, now: Instant) -> Option<Duration> {
        self.time_limit(rules)
            .map(|limit| self.clock.round_remaining(limit, now))
    }

    pub fn start_round(&mut self, round: RoundState, now: Instant) {
        self.round = round;
        self.clock.start_round(now);
        self.last_reported_second = None;
    }

    pub fn snapshot(&self, queues: BTreeMap<Tier, Vec<Word>>, now: Instant) -> SessionSnapshot {
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            uid: self.player_id.clone(),
            mode: self.mode,
            level: self.level,
            attempts: self.round.attempts_remaining(),
            guessed_letters: self.round.guessed().iter().copied().collect(),
            selected_word: self.round.word().clone(),
            selected_difficulty: self.tier(),
            shuffled_words: queues,
            correct_words: self.correct_words,
            time_bonus: self.time_bonus.as_secs() as u32,
            elapsed_seconds: self.clock.session_elapsed(now).as_secs_f64(),
            round_elapsed_seconds: self.clock.round_elapsed(now).as_secs_f64(),
        }
    }

    /// Rebuild a session from a snapshot. The saved tier queues are handed
    /// back for the shuffler.
    pub fn restore(
        snapshot: SessionSnapshot,
        rules: &GameRules,
        now: Instant,
    ) -> Result<(Self, BTreeMap<Tier, Vec<Word>>), SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }
        if snapshot.level == 0 || snapshot.level > rules.max_level {
            return Err(SnapshotError::LevelOutOfRange(snapshot.level));
        }
        if Tier::for_level(snapshot.level) != Some(snapshot.selected_difficulty) {
            return Err(SnapshotError::TierMismatch {
                level: snapshot.level,
                tier: snapshot.selected_difficulty,
            });
        }
        if snapshot.attempts == 0 || snapshot.attempts > rules.attempts_per_word {
            return Err(SnapshotError::AttemptsOutOfRange(snapshot.attempts));
        }
        let word = Word::new(&snapshot.selected_word.text, &snapshot.selected_word.clue);
        if !word.is_well_formed() {
            return Err(SnapshotError::InvalidWord(snapshot.selected_word.text));
        }
        if let Some(bad) = snapshot
            .guessed_letters
            .iter()
            .find(|c| !c.is_ascii_alphabetic())
        {
            return Err(SnapshotError::InvalidLetter(*bad));
        }

        let queues = normalize_queues(snapshot.shuffled_words)?;

        let round = RoundState::restore(word, snapshot.guessed_letters, snapshot.attempts);
        if round.status() != RoundStatus::Active {
            return Err(SnapshotError::RoundAlreadyResolved);
        }

        let clock = SessionClock::resume_from(
            now,
            Duration::try_from_secs_f64(snapshot.elapsed_seconds).unwrap_or(Duration::ZERO),
            Duration::try_from_secs_f64(snapshot.round_elapsed_seconds).unwrap_or(Duration::ZERO),
        );

        let session = Self {
            player_id: snapshot.uid,
            mode: snapshot.mode,
            level: snapshot.level,
            round,
            correct_words: snapshot.correct_words,
            time_bonus: Duration::from_secs(u64::from(snapshot.time_bonus)),
            clock,
            last_reported_second: None,
        };

        Ok((session, queues))
    }
}

fn normalize_queues(
    queues: BTreeMap<Tier, Vec<Word>>,
) -> Result<BTreeMap<Tier, Vec<Word>>, SnapshotError> {
    queues
        .into_iter()
        .map(|(tier, words)| {
            let words = words
                .into_iter()
                .map(|saved| {
                    let word = Word::new(&saved.text, &saved.clue);
                    if word.is_well_formed() {
                        Ok(word)
                    } else {
                        Err(SnapshotError::InvalidQueuedWord {
                            tier,
                            word: saved.text,
                        })
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((tier, words))
        })
        .collect()
}
