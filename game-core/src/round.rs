use spellout_types::{GuessRejection, Word};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Active,
    Won,
    Lost,
}

impl RoundStatus {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// Result of applying one letter to a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Hit,
    Miss,
    Won,
    Lost,
    Ignored(GuessRejection),
}

/// One word being guessed.
#[derive(Debug, Clone)]
pub struct RoundState {
    word: Word,
    guessed: BTreeSet<char>,
    attempts_remaining: u8,
    status: RoundStatus,
}

impl RoundState {
    pub fn new(word: Word, attempts: u8) -> Self {
        Self {
            word,
            guessed: BTreeSet::new(),
            attempts_remaining: attempts,
            status: RoundStatus::Active,
        }
    }

    /// Rebuild an in-flight round from saved parts. The status is derived from
    /// the letters and attempts rather than stored.
    pub fn restore(
        word: Word,
        guessed: impl IntoIterator<Item = char>,
        attempts_remaining: u8,
    ) -> Self {
        let mut round = Self::new(word, attempts_remaining);
        round.guessed = guessed.into_iter().map(|c| c.to_ascii_uppercase()).collect();
        round.status = if round.is_solved() {
            RoundStatus::Won
        } else if attempts_remaining == 0 {
            RoundStatus::Lost
        } else {
            RoundStatus::Active
        };
        round
    }

    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        if self.status.is_resolved() {
            return GuessOutcome::Ignored(GuessRejection::RoundResolved);
        }
        if !letter.is_ascii_alphabetic() {
            return GuessOutcome::Ignored(GuessRejection::NotInAlphabet);
        }

        let letter = letter.to_ascii_uppercase();
        if !self.guessed.insert(letter) {
            return GuessOutcome::Ignored(GuessRejection::AlreadyGuessed);
        }

        if self.word.contains(letter) {
            if self.is_solved() {
                self.status = RoundStatus::Won;
                GuessOutcome::Won
            } else {
                GuessOutcome::Hit
            }
        } else {
            self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
            if self.attempts_remaining == 0 {
                self.status = RoundStatus::Lost;
                GuessOutcome::Lost
            } else {
                GuessOutcome::Miss
            }
        }
    }

    /// Countdown ran out. No effect on a round that is already resolved.
    pub fn expire(&mut self) -> bool {
        if self.status.is_resolved() {
            return false;
        }
        self.status = RoundStatus::Lost;
        true
    }

    fn is_solved(&self) -> bool {
        self.word.letters().is_subset(&self.guessed)
    }

    /// Word with unguessed letters replaced by `_`; spaces are kept.
    pub fn mask(&self) -> String {
        self.word
            .text
            .chars()
            .map(|c| {
                if c == ' ' || self.guessed.contains(&c.to_ascii_uppercase()) {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn guessed(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    pub fn attempts_remaining(&self) -> u8 {
        self.attempts_remaining
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }
}
