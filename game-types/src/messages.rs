use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{
    GameMode, GuessRejection, LeaderboardRecord, PlayerId, RankedEntry, RoundOutcome,
    SessionOutcome, Tier,
};

/// Discrete input decoded by whatever front end drives the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameInput {
    SelectMode { mode: GameMode },
    GuessLetter { letter: char },
    RequestPause,
    ResumeFromPause,
    SaveAndExit,
    RestartSession,
    QuitSession,
    ResumeSavedSession,
    ShowLeaderboard { mode: GameMode },
    ShowLastRecord { mode: GameMode },
}

/// What the presenter should show. Produced by the core, never consumed by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DisplayIntent {
    AwaitingMode {
        player_id: PlayerId,
        saved_session_available: bool,
    },
    SessionStarted {
        player_id: PlayerId,
        mode: GameMode,
        resumed: bool,
    },
    RoundUpdated {
        word_mask: String,
        guessed: Vec<char>,
        attempts_remaining: u8,
        level: u32,
        tier: Tier,
        category: String,
        clue: String,
        color: String,
    },
    GuessRejected {
        letter: char,
        reason: GuessRejection,
    },
    FlashWord {
        word: String,
        outcome: RoundOutcome,
    },
    TierCompleted {
        tier: Tier,
        stars: u8,
    },
    TimeBonusAwarded {
        seconds: u32,
        total_bonus: u32,
    },
    TimerTick {
        remaining_seconds: u32,
    },
    PauseChanged {
        paused: bool,
    },
    SessionEnded {
        outcome: SessionOutcome,
        final_score: u32,
        stars: u8,
    },
    PlayerRanked {
        mode: GameMode,
        rank: Option<u32>,
    },
    SessionSaved {
        saved: bool,
    },
    NoSavedSession,
    LeaderboardShown {
        mode: GameMode,
        entries: Vec<RankedEntry>,
    },
    LastRecordShown {
        mode: GameMode,
        player_id: PlayerId,
        record: Option<LeaderboardRecord>,
    },
    SessionClosed,
}

impl DisplayIntent {
    pub fn kind(&self) -> &'static str {
        match self {
            DisplayIntent::AwaitingMode { .. } => "awaiting_mode",
            DisplayIntent::SessionStarted { .. } => "session_started",
            DisplayIntent::RoundUpdated { .. } => "round_updated",
            DisplayIntent::GuessRejected { .. } => "guess_rejected",
            DisplayIntent::FlashWord { .. } => "flash_word",
            DisplayIntent::TierCompleted { .. } => "tier_completed",
            DisplayIntent::TimeBonusAwarded { .. } => "time_bonus_awarded",
            DisplayIntent::TimerTick { .. } => "timer_tick",
            DisplayIntent::PauseChanged { .. } => "pause_changed",
            DisplayIntent::SessionEnded { .. } => "session_ended",
            DisplayIntent::PlayerRanked { .. } => "player_ranked",
            DisplayIntent::SessionSaved { .. } => "session_saved",
            DisplayIntent::NoSavedSession => "no_saved_session",
            DisplayIntent::LeaderboardShown { .. } => "leaderboard_shown",
            DisplayIntent::LastRecordShown { .. } => "last_record_shown",
            DisplayIntent::SessionClosed => "session_closed",
        }
    }
}
