use spellout_types::{
    DisplayIntent, GameInput, GameMode, GamePhase, PlayerId, RoundOutcome, SessionOutcome, Tier,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    GameRules, GuessOutcome, LeaderboardRepository, RoundState, ScoringEngine, SessionState,
    SessionStore, ShuffleError, Shuffler, WordBank, score_entry,
};

/// Entries shown when a leaderboard is requested.
pub const LEADERBOARD_VIEW_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum ProgressionError {
    #[error("input {input:?} is not accepted in phase {phase:?}")]
    UnexpectedInput { phase: GamePhase, input: GameInput },
    #[error("no session is in progress")]
    NoActiveSession,
    #[error(transparent)]
    Shuffle(#[from] ShuffleError),
}

/// The game state machine.
///
/// Every call takes the current instant so the engine never reads the clock
/// itself. Each call returns the display intents it produced, in order.
pub struct ProgressionEngine {
    player_id: PlayerId,
    rules: GameRules,
    word_bank: Arc<WordBank>,
    shuffler: Shuffler,
    phase: GamePhase,
    session: Option<SessionState>,
    sessions: Box<dyn SessionStore>,
    leaderboards: Box<dyn LeaderboardRepository>,
}

impl ProgressionEngine {
    pub fn new(
        player_id: PlayerId,
        word_bank: Arc<WordBank>,
        shuffler: Shuffler,
        sessions: Box<dyn SessionStore>,
        leaderboards: Box<dyn LeaderboardRepository>,
    ) -> Self {
        Self {
            player_id,
            rules: GameRules::default(),
            word_bank,
            shuffler,
            phase: GamePhase::ModeSelect,
            session: None,
            sessions,
            leaderboards,
        }
    }

    pub fn with_rules(mut self, rules: GameRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// The round being played or paused, if any.
    pub fn current_round(&self) -> Option<&RoundState> {
        if self.phase.has_active_round() {
            self.session.as_ref().map(|session| &session.round)
        } else {
            None
        }
    }

    pub fn shuffler(&self) -> &Shuffler {
        &self.shuffler
    }

    /// Intents for the mode selection screen.
    pub fn welcome(&self) -> Vec<DisplayIntent> {
        vec![DisplayIntent::AwaitingMode {
            player_id: self.player_id.clone(),
            saved_session_available: self.sessions.has_snapshot(),
        }]
    }

    pub fn handle(
        &mut self,
        input: GameInput,
        now: Instant,
    ) -> Result<Vec<DisplayIntent>, ProgressionError> {
        let mut intents = Vec::new();

        match (self.phase, &input) {
            (GamePhase::Closed, _) => {
                return Err(ProgressionError::UnexpectedInput {
                    phase: self.phase,
                    input: input.clone(),
                });
            }
            (_, GameInput::ShowLeaderboard { mode }) => self.show_leaderboard(*mode, &mut intents),
            (_, GameInput::ShowLastRecord { mode }) => self.show_last_record(*mode, &mut intents),
            (_, GameInput::QuitSession) => self.close(&mut intents),
            (
                GamePhase::ModeSelect | GamePhase::SessionEnded(_),
                GameInput::SelectMode { mode },
            ) => self.begin_session(*mode, now, &mut intents)?,
            (GamePhase::ModeSelect, GameInput::ResumeSavedSession) => {
                self.resume_saved_session(now, &mut intents)?
            }
            (GamePhase::Playing, GameInput::GuessLetter { letter }) => {
                self.guess(*letter, now, &mut intents)?
            }
            (GamePhase::Playing, GameInput::RequestPause) => self.pause(now, &mut intents)?,
            (GamePhase::Paused, GameInput::ResumeFromPause) => self.resume(now, &mut intents)?,
            (GamePhase::Playing | GamePhase::Paused, GameInput::SaveAndExit) => {
                self.save_and_exit(now, &mut intents)?
            }
            (GamePhase::SessionEnded(_), GameInput::RestartSession) => {
                let mode = self
                    .session
                    .as_ref()
                    .map(|session| session.mode)
                    .ok_or(ProgressionError::NoActiveSession)?;
                self.begin_session(mode, now, &mut intents)?
            }
            (phase, _) => {
                return Err(ProgressionError::UnexpectedInput {
                    phase,
                    input: input.clone(),
                });
            }
        }

        Ok(intents)
    }

    /// Advance the countdown. Emits a tick whenever the displayed whole second
    /// changes and times the round out when it reaches zero.
    pub fn tick(&mut self, now: Instant) -> Result<Vec<DisplayIntent>, ProgressionError> {
        let mut intents = Vec::new();
        if self.phase != GamePhase::Playing {
            return Ok(intents);
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(intents);
        };
        let Some(remaining) = session.remaining_time(&self.rules, now) else {
            return Ok(intents);
        };

        if remaining.is_zero() {
            self.expire_round(now, &mut intents)?;
            return Ok(intents);
        }

        let seconds = whole_seconds(remaining);
        if session.last_reported_second != Some(seconds) {
            session.last_reported_second = Some(seconds);
            intents.push(DisplayIntent::TimerTick {
                remaining_seconds: seconds,
            });
        }
        Ok(intents)
    }

    fn begin_session(
        &mut self,
        mode: GameMode,
        now: Instant,
        intents: &mut Vec<DisplayIntent>,
    ) -> Result<(), ProgressionError> {
        self.shuffler.reset_all();
        let word = self.shuffler.draw(Tier::Easy)?;
        let round = RoundState::new(word, self.rules.attempts_per_word);
        self.session = Some(SessionState::new(self.player_id.clone(), mode, round, now));
        self.phase = GamePhase::Playing;
        self.clear_saved_session();

        info!("Player {} started a {} session", self.player_id, mode);
        intents.push(DisplayIntent::SessionStarted {
            player_id: self.player_id.clone(),
            mode,
            resumed: false,
        });
        self.push_round(now, intents)
    }

    fn resume_saved_session(
        &mut self,
        now: Instant,
        intents: &mut Vec<DisplayIntent>,
    ) -> Result<(), ProgressionError> {
        let Some(snapshot) = self.sessions.load() else {
            intents.push(DisplayIntent::NoSavedSession);
            return Ok(());
        };

        let (session, queues) = match SessionState::restore(snapshot, &self.rules, now) {
            Ok(restored) => restored,
            Err(e) => {
                warn!("Ignoring saved session: {}", e);
                intents.push(DisplayIntent::NoSavedSession);
                return Ok(());
            }
        };

        self.shuffler.restore(queues);
        self.player_id = session.player_id.clone();
        let mode = session.mode;
        info!(
            "Player {} resumed a {} session at level {}",
            self.player_id, mode, session.level
        );
        self.session = Some(session);
        self.phase = GamePhase::Playing;
        self.clear_saved_session();

        intents.push(DisplayIntent::SessionStarted {
            player_id: self.player_id.clone(),
            mode,
            resumed: true,
        });
        self.push_round(now, intents)
    }

    fn guess(
        &mut self,
        letter: char,
        now: Instant,
        intents: &mut Vec<DisplayIntent>,
    ) -> Result<(), ProgressionError> {
        let session = self
            .session
            .as_mut()
            .ok_or(ProgressionError::NoActiveSession)?;

        // A guess landing after the countdown ran out counts as the timeout.
        if session
            .remaining_time(&self.rules, now)
            .is_some_and(|remaining| remaining.is_zero())
        {
            return self.expire_round(now, intents);
        }

        let outcome = session.round.guess(letter);
        debug!("Guess {:?} on level {}: {:?}", letter, session.level, outcome);

        match outcome {
            GuessOutcome::Ignored(reason) => {
                intents.push(DisplayIntent::GuessRejected { letter, reason });
                Ok(())
            }
            GuessOutcome::Hit | GuessOutcome::Miss => {
                intents.push(round_intent(&self.word_bank, session));
                Ok(())
            }
            GuessOutcome::Won => {
                intents.push(round_intent(&self.word_bank, session));
                self.resolve_round(RoundOutcome::Win, now, intents)
            }
            GuessOutcome::Lost => {
                intents.push(round_intent(&self.word_bank, session));
                self.resolve_round(RoundOutcome::Lose, now, intents)
            }
        }
    }

    fn expire_round(
        &mut self,
        now: Instant,
        intents: &mut Vec<DisplayIntent>,
    ) -> Result<(), ProgressionError> {
        let session = self
            .session
            .as_mut()
            .ok_or(ProgressionError::NoActiveSession)?;
        if !session.round.expire() {
            return Ok(());
        }

        info!("Time ran out on level {}", session.level);
        session.last_reported_second = Some(0);
        intents.push(DisplayIntent::TimerTick {
            remaining_seconds: 0,
        });
        intents.push(round_intent(&self.word_bank, session));
        self.resolve_round(RoundOutcome::Lose, now, intents)
    }

    fn resolve_round(
        &mut self,
        outcome: RoundOutcome,
        now: Instant,
        intents: &mut Vec<DisplayIntent>,
    ) -> Result<(), ProgressionError> {
        let session = self
            .session
            .as_mut()
            .ok_or(ProgressionError::NoActiveSession)?;
        let mode = session.mode;
        let level = session.level;

        intents.push(DisplayIntent::FlashWord {
            word: session.round.word().text.clone(),
            outcome,
        });
        info!("Level {} resolved as {:?}", level, outcome);

        if outcome == RoundOutcome::Win && mode == GameMode::Timed {
            session.correct_words += 1;
        }

        if outcome == RoundOutcome::Lose && mode == GameMode::Classic {
            return self.end_session(SessionOutcome::Lost, now, intents);
        }

        if let Some(tier) = ScoringEngine::tier_completed_at(level) {
            intents.push(DisplayIntent::TierCompleted {
                tier,
                stars: tier.completion_stars(),
            });

            let bonus = self.rules.completion_bonus(tier);
            if mode == GameMode::Timed && !bonus.is_zero() {
                session.time_bonus += bonus;
                intents.push(DisplayIntent::TimeBonusAwarded {
                    seconds: bonus.as_secs() as u32,
                    total_bonus: session.time_bonus.as_secs() as u32,
                });
            }
        }

        if level >= self.rules.max_level {
            return self.end_session(SessionOutcome::Won, now, intents);
        }

        session.level += 1;
        let word = self.shuffler.draw(session.tier())?;
        let round = RoundState::new(word, self.rules.attempts_per_word);
        session.start_round(round, now);
        self.push_round(now, intents)
    }

    fn end_session(
        &mut self,
        outcome: SessionOutcome,
        now: Instant,
        intents: &mut Vec<DisplayIntent>,
    ) -> Result<(), ProgressionError> {
        let session = self
            .session
            .as_ref()
            .ok_or(ProgressionError::NoActiveSession)?;
        let mode = session.mode;
        let player_id = session.player_id.clone();
        let final_score = ScoringEngine::final_score(mode, session.level, session.correct_words);
        let stars = ScoringEngine::stars_for(final_score);
        let duration = session.clock.session_elapsed(now).as_secs_f64();

        info!(
            "Session ended for {}: {:?}, score {}, {} stars, {:.2}s",
            player_id, outcome, final_score, stars, duration
        );
        self.phase = GamePhase::SessionEnded(outcome);
        intents.push(DisplayIntent::SessionEnded {
            outcome,
            final_score,
            stars,
        });

        let entry = score_entry(final_score, duration, stars);
        match self.leaderboards.record_result(mode, &player_id, entry) {
            Ok(board) => intents.push(DisplayIntent::PlayerRanked {
                mode,
                rank: board.rank_of(&player_id),
            }),
            Err(e) => warn!("Failed to record result for {}: {:#}", player_id, e),
        }

        self.clear_saved_session();
        Ok(())
    }

    fn pause(
        &mut self,
        now: Instant,
        intents: &mut Vec<DisplayIntent>,
    ) -> Result<(), ProgressionError> {
        let session = self
            .session
            .as_mut()
            .ok_or(ProgressionError::NoActiveSession)?;
        session.clock.pause(now);
        self.phase = GamePhase::Paused;
        debug!("Paused on level {}", session.level);
        intents.push(DisplayIntent::PauseChanged { paused: true });
        Ok(())
    }

    fn resume(
        &mut self,
        now: Instant,
        intents: &mut Vec<DisplayIntent>,
    ) -> Result<(), ProgressionError> {
        let session = self
            .session
            .as_mut()
            .ok_or(ProgressionError::NoActiveSession)?;
        session.clock.resume(now);
        self.phase = GamePhase::Playing;
        debug!("Resumed on level {}", session.level);
        intents.push(DisplayIntent::PauseChanged { paused: false });
        self.push_round(now, intents)
    }

    fn save_and_exit(
        &mut self,
        now: Instant,
        intents: &mut Vec<DisplayIntent>,
    ) -> Result<(), ProgressionError> {
        let session = self
            .session
            .as_ref()
            .ok_or(ProgressionError::NoActiveSession)?;
        let snapshot = session.snapshot(self.shuffler.queues(), now);

        let saved = match self.sessions.save(&snapshot) {
            Ok(()) => {
                info!("Saved session for {} at level {}", snapshot.uid, snapshot.level);
                true
            }
            Err(e) => {
                warn!("Failed to save session: {:#}", e);
                false
            }
        };

        intents.push(DisplayIntent::SessionSaved { saved });
        self.close(intents);
        Ok(())
    }

    fn close(&mut self, intents: &mut Vec<DisplayIntent>) {
        info!("Closing game for {}", self.player_id);
        self.phase = GamePhase::Closed;
        intents.push(DisplayIntent::SessionClosed);
    }

    fn show_leaderboard(&self, mode: GameMode, intents: &mut Vec<DisplayIntent>) {
        let board = self.leaderboards.load(mode);
        intents.push(DisplayIntent::LeaderboardShown {
            mode,
            entries: board.top(LEADERBOARD_VIEW_LIMIT),
        });
    }

    fn show_last_record(&self, mode: GameMode, intents: &mut Vec<DisplayIntent>) {
        let board = self.leaderboards.load(mode);
        intents.push(DisplayIntent::LastRecordShown {
            mode,
            player_id: self.player_id.clone(),
            record: board.record(&self.player_id).cloned(),
        });
    }

    /// Current round view, followed by the countdown in timed mode.
    fn push_round(
        &mut self,
        now: Instant,
        intents: &mut Vec<DisplayIntent>,
    ) -> Result<(), ProgressionError> {
        let session = self
            .session
            .as_mut()
            .ok_or(ProgressionError::NoActiveSession)?;
        intents.push(round_intent(&self.word_bank, session));

        if let Some(remaining) = session.remaining_time(&self.rules, now) {
            let seconds = whole_seconds(remaining);
            session.last_reported_second = Some(seconds);
            intents.push(DisplayIntent::TimerTick {
                remaining_seconds: seconds,
            });
        }
        Ok(())
    }

    fn clear_saved_session(&mut self) {
        if let Err(e) = self.sessions.clear() {
            warn!("Failed to clear saved session: {:#}", e);
        }
    }
}

fn round_intent(word_bank: &WordBank, session: &SessionState) -> DisplayIntent {
    let tier = session.tier();
    DisplayIntent::RoundUpdated {
        word_mask: session.round.mask(),
        guessed: session.round.guessed().iter().copied().collect(),
        attempts_remaining: session.round.attempts_remaining(),
        level: session.level,
        tier,
        category: word_bank.category_label(tier).to_string(),
        clue: session.round.word().clue.clone(),
        color: tier.color_hex().to_string(),
    }
}

/// Remaining time rounded up to whole seconds.
fn whole_seconds(remaining: Duration) -> u32 {
    let seconds = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    seconds.min(u64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryLeaderboards, InMemorySessionStore};

    fn engine() -> ProgressionEngine {
        let bank = Arc::new(WordBank::builtin());
        ProgressionEngine::new(
            "alice".to_string(),
            bank.clone(),
            Shuffler::with_seed(bank, 7),
            Box::new(InMemorySessionStore::new()),
            Box::new(InMemoryLeaderboards::new()),
        )
    }

    #[test]
    fn test_whole_seconds_rounds_up() {
        assert_eq!(whole_seconds(Duration::from_millis(14_001)), 15);
        assert_eq!(whole_seconds(Duration::from_secs(15)), 15);
        assert_eq!(whole_seconds(Duration::from_millis(1)), 1);
        assert_eq!(whole_seconds(Duration::ZERO), 0);
    }

    #[test]
    fn test_start_emits_session_and_round() {
        let mut engine = engine();
        let now = Instant::now();
        let intents = engine
            .handle(GameInput::SelectMode { mode: GameMode::Timed }, now)
            .unwrap();

        let kinds: Vec<&str> = intents.iter().map(|i| i.kind()).collect();
        assert_eq!(kinds, vec!["session_started", "round_updated", "timer_tick"]);
        assert_eq!(
            intents[2],
            DisplayIntent::TimerTick {
                remaining_seconds: 15
            }
        );
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(engine.session().unwrap().level, 1);
    }

    #[test]
    fn test_out_of_phase_input_is_an_error() {
        let mut engine = engine();
        let now = Instant::now();
        let result = engine.handle(GameInput::GuessLetter { letter: 'A' }, now);
        assert!(matches!(
            result,
            Err(ProgressionError::UnexpectedInput {
                phase: GamePhase::ModeSelect,
                ..
            })
        ));
        assert_eq!(engine.phase(), GamePhase::ModeSelect);
    }

    #[test]
    fn test_rejected_letter_changes_nothing() {
        let mut engine = engine();
        let now = Instant::now();
        engine
            .handle(GameInput::SelectMode { mode: GameMode::Classic }, now)
            .unwrap();

        let intents = engine
            .handle(GameInput::GuessLetter { letter: '3' }, now)
            .unwrap();
        assert_eq!(
            intents,
            vec![DisplayIntent::GuessRejected {
                letter: '3',
                reason: spellout_types::GuessRejection::NotInAlphabet,
            }]
        );
        assert_eq!(engine.current_round().unwrap().attempts_remaining(), 4);
    }

    #[test]
    fn test_tick_only_reports_changed_seconds() {
        let mut engine = engine();
        let start = Instant::now();
        engine
            .handle(GameInput::SelectMode { mode: GameMode::Timed }, start)
            .unwrap();

        assert!(engine.tick(start + Duration::from_millis(300)).unwrap().is_empty());
        assert_eq!(
            engine.tick(start + Duration::from_millis(1_200)).unwrap(),
            vec![DisplayIntent::TimerTick {
                remaining_seconds: 14
            }]
        );
        assert!(engine.tick(start + Duration::from_millis(1_900)).unwrap().is_empty());
    }

    #[test]
    fn test_classic_mode_never_ticks() {
        let mut engine = engine();
        let start = Instant::now();
        engine
            .handle(GameInput::SelectMode { mode: GameMode::Classic }, start)
            .unwrap();
        assert!(engine.tick(start + Duration::from_secs(600)).unwrap().is_empty());
        assert_eq!(engine.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_custom_rules_shorten_session() {
        let rules = GameRules {
            attempts_per_word: 1,
            max_level: 1,
            ..GameRules::default()
        };
        let mut engine = engine().with_rules(rules);
        let now = Instant::now();
        engine
            .handle(GameInput::SelectMode { mode: GameMode::Classic }, now)
            .unwrap();
        assert_eq!(engine.current_round().unwrap().attempts_remaining(), 1);

        let letters = engine.current_round().unwrap().word().letters();
        let mut intents = Vec::new();
        for letter in letters {
            intents.extend(engine.handle(GameInput::GuessLetter { letter }, now).unwrap());
        }
        assert!(intents.contains(&DisplayIntent::SessionEnded {
            outcome: SessionOutcome::Won,
            final_score: 1,
            stars: 0,
        }));
    }

    #[test]
    fn test_closed_rejects_everything() {
        let mut engine = engine();
        let now = Instant::now();
        let intents = engine.handle(GameInput::QuitSession, now).unwrap();
        assert_eq!(intents, vec![DisplayIntent::SessionClosed]);
        assert!(
            engine
                .handle(GameInput::ShowLeaderboard { mode: GameMode::Classic }, now)
                .is_err()
        );
    }
}
