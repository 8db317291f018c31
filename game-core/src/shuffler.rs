use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use spellout_types::{Tier, Word};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::WordBank;

#[derive(Debug, Error)]
pub enum ShuffleError {
    #[error("tier {0} has no words to draw")]
    EmptyCatalog(Tier),
}

/// Per-tier draw queues. A tier's words are dealt without repetition until
/// its queue runs dry, then the full catalog is reshuffled.
#[derive(Debug)]
pub struct Shuffler {
    word_bank: Arc<WordBank>,
    queues: BTreeMap<Tier, Vec<Word>>,
    rng: StdRng,
}

impl Shuffler {
    pub fn new(word_bank: Arc<WordBank>) -> Self {
        Self::with_rng(word_bank, StdRng::from_os_rng())
    }

    /// Reproducible shuffles for tests and seeded runs.
    pub fn with_seed(word_bank: Arc<WordBank>, seed: u64) -> Self {
        Self::with_rng(word_bank, StdRng::seed_from_u64(seed))
    }

    fn with_rng(word_bank: Arc<WordBank>, rng: StdRng) -> Self {
        Self {
            word_bank,
            queues: BTreeMap::new(),
            rng,
        }
    }

    /// Pop the next word of `tier`, reshuffling the full catalog first if the
    /// queue is empty.
    pub fn draw(&mut self, tier: Tier) -> Result<Word, ShuffleError> {
        let queue = self.queues.entry(tier).or_default();
        if queue.is_empty() {
            queue.extend_from_slice(self.word_bank.words_for(tier));
            queue.shuffle(&mut self.rng);
            debug!("Reshuffled {} words for tier {}", queue.len(), tier);
        }

        queue.pop().ok_or(ShuffleError::EmptyCatalog(tier))
    }

    pub fn reset(&mut self, tier: Tier) {
        self.queues.remove(&tier);
    }

    pub fn reset_all(&mut self) {
        self.queues.clear();
    }

    pub fn remaining(&self, tier: Tier) -> usize {
        self.queues.get(&tier).map_or(0, Vec::len)
    }

    /// Remaining queues, every tier present (possibly empty).
    pub fn queues(&self) -> BTreeMap<Tier, Vec<Word>> {
        Tier::ALL
            .into_iter()
            .map(|tier| (tier, self.queues.get(&tier).cloned().unwrap_or_default()))
            .collect()
    }

    /// Replace the queues with previously captured ones.
    pub fn restore(&mut self, queues: BTreeMap<Tier, Vec<Word>>) {
        self.queues = queues;
    }
}
