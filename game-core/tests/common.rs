#![allow(dead_code)]

use spellout_core::{
    InMemoryLeaderboards, InMemorySessionStore, ProgressionEngine, Shuffler, WordBank,
};
use spellout_types::{DisplayIntent, GameInput, GameMode};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Engine wired to in-memory stores, plus handles to inspect them.
pub struct TestGame {
    pub engine: ProgressionEngine,
    pub sessions: InMemorySessionStore,
    pub leaderboards: InMemoryLeaderboards,
    pub now: Instant,
}

impl TestGame {
    pub fn new(player: &str) -> Self {
        Self::with_stores(player, InMemorySessionStore::new(), InMemoryLeaderboards::new())
    }

    /// Shares the given stores, so several games can see the same save slot
    /// and leaderboards.
    pub fn with_stores(
        player: &str,
        sessions: InMemorySessionStore,
        leaderboards: InMemoryLeaderboards,
    ) -> Self {
        let bank = Arc::new(WordBank::builtin());
        let engine = ProgressionEngine::new(
            player.to_string(),
            bank.clone(),
            Shuffler::with_seed(bank, 11),
            Box::new(sessions.clone()),
            Box::new(leaderboards.clone()),
        );
        Self {
            engine,
            sessions,
            leaderboards,
            now: Instant::now(),
        }
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn send(&mut self, input: GameInput) -> Vec<DisplayIntent> {
        self.engine
            .handle(input, self.now)
            .expect("input should be accepted")
    }

    pub fn tick(&mut self) -> Vec<DisplayIntent> {
        self.engine.tick(self.now).expect("tick should succeed")
    }

    pub fn start(&mut self, mode: GameMode) -> Vec<DisplayIntent> {
        self.send(GameInput::SelectMode { mode })
    }

    pub fn guess(&mut self, letter: char) -> Vec<DisplayIntent> {
        self.send(GameInput::GuessLetter { letter })
    }

    pub fn level(&self) -> u32 {
        self.engine.session().expect("session").level
    }

    /// Guess every distinct letter of the current word.
    pub fn win_round(&mut self) -> Vec<DisplayIntent> {
        let letters = self
            .engine
            .current_round()
            .expect("active round")
            .word()
            .letters();
        let mut intents = Vec::new();
        for letter in letters {
            intents.extend(self.guess(letter));
        }
        intents
    }

    /// Guess letters absent from the current word until attempts run out.
    pub fn lose_round(&mut self) -> Vec<DisplayIntent> {
        let round = self.engine.current_round().expect("active round");
        let attempts = round.attempts_remaining() as usize;
        let misses: Vec<char> = ('A'..='Z')
            .filter(|c| !round.word().contains(*c) && !round.guessed().contains(c))
            .take(attempts)
            .collect();
        let mut intents = Vec::new();
        for letter in misses {
            intents.extend(self.guess(letter));
        }
        intents
    }
}

pub fn kinds(intents: &[DisplayIntent]) -> Vec<&'static str> {
    intents.iter().map(|intent| intent.kind()).collect()
}

pub fn count_kind(intents: &[DisplayIntent], kind: &str) -> usize {
    intents.iter().filter(|intent| intent.kind() == kind).count()
}
