use serde::Deserialize;
use spellout_types::{Tier, Word};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WordBankError {
    #[error("tier {0} has no words")]
    EmptyCatalog(Tier),
    #[error("tier {tier} has an invalid word {word:?}: only letters and spaces are allowed")]
    InvalidWord { tier: Tier, word: String },
    #[error("malformed word catalog: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
struct TierCatalog {
    category: String,
    words: Vec<Word>,
}

/// Immutable words and clues for every tier.
#[derive(Debug, Clone)]
pub struct WordBank {
    tiers: BTreeMap<Tier, TierCatalog>,
}

#[derive(Deserialize)]
struct CatalogFile {
    category: String,
    words: Vec<Word>,
}

impl WordBank {
    /// Build a bank from `(tier, category, words)` entries. Every tier must be
    /// present with at least one well-formed word.
    pub fn new(
        entries: impl IntoIterator<Item = (Tier, String, Vec<Word>)>,
    ) -> Result<Self, WordBankError> {
        let mut tiers = BTreeMap::new();
        for (tier, category, words) in entries {
            let words: Vec<Word> = words
                .into_iter()
                .map(|w| Word::new(&w.text, &w.clue))
                .collect();
            if let Some(bad) = words.iter().find(|w| !w.is_well_formed()) {
                return Err(WordBankError::InvalidWord {
                    tier,
                    word: bad.text.clone(),
                });
            }
            tiers.insert(tier, TierCatalog { category, words });
        }

        for tier in Tier::ALL {
            match tiers.get(&tier) {
                Some(catalog) if !catalog.words.is_empty() => {}
                _ => return Err(WordBankError::EmptyCatalog(tier)),
            }
        }

        Ok(Self { tiers })
    }

    /// Parse a catalog of the form
    /// `{"Easy": {"category": "...", "words": [{"word": "...", "clue": "..."}]}, ...}`.
    pub fn from_json_str(json: &str) -> Result<Self, WordBankError> {
        let parsed: BTreeMap<Tier, CatalogFile> = serde_json::from_str(json)?;
        Self::new(
            parsed
                .into_iter()
                .map(|(tier, file)| (tier, file.category, file.words)),
        )
    }

    /// Catalog shipped with the game.
    pub fn builtin() -> Self {
        let tiers = [
            (Tier::Easy, "Animal Kingdom", EASY_WORDS),
            (Tier::Normal, "Song Titles", NORMAL_WORDS),
            (Tier::Hard, "History", HARD_WORDS),
        ]
        .into_iter()
        .map(|(tier, category, words)| {
            let words = words
                .iter()
                .map(|(text, clue)| Word::new(text, clue))
                .collect();
            (tier, TierCatalog { category: category.to_string(), words })
        })
        .collect();

        Self { tiers }
    }

    pub fn words_for(&self, tier: Tier) -> &[Word] {
        self.tiers
            .get(&tier)
            .map(|c| c.words.as_slice())
            .unwrap_or_default()
    }

    pub fn category_label(&self, tier: Tier) -> &str {
        self.tiers
            .get(&tier)
            .map(|c| c.category.as_str())
            .unwrap_or_default()
    }

    pub fn word_count(&self) -> usize {
        self.tiers.values().map(|c| c.words.len()).sum()
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::builtin()
    }
}

const EASY_WORDS: &[(&str, &str)] = &[
    (
        "HUMAN",
        "A bipedal primate species, known for its intelligence and ability to create complex tools.",
    ),
    ("EAGLE", "A large bird of prey, known for its keen eyesight and powerful flight."),
    ("PANTHER", "A big cat found in the Americas, known for its stealthy hunting skills."),
    (
        "CROCODILE",
        "A large reptile that lives in rivers and is known for its sharp teeth and strong jaws.",
    ),
    ("TORTOISE", "A slow-moving land reptile with a hard shell that protects its body."),
    ("SPIDER", "An arachnid with eight legs, known for spinning webs."),
    ("FROG", "An amphibian known for its jumping ability and croaking sound."),
    ("CAT", "A small domesticated carnivorous mammal with retractable claws."),
    ("BUTTERFLY", "A colorful insect with delicate wings that goes through metamorphosis."),
    ("HUSKY", "A strong, thick-coated dog breed known for pulling sleds in snowy regions."),
];

const NORMAL_WORDS: &[(&str, &str)] = &[
    ("BLUE", "From the album *Blue* by Yung Kai"),
    ("ENCHANTED", "From the album *Speak Now* by Taylor Swift"),
    ("TREASURE", "From the album *Unorthodox Jukebox* by Bruno Mars"),
    ("PHOTOGRAPH", "From the album *x (Multiply)* by Ed Sheeran"),
    ("JUDAS", "From the album *Born This Way* by Lady Gaga"),
    ("ROAR", "From the album *Prism* by Katy Perry"),
    ("GRENADE", "From the album *Doo-Wops & Hooligans* by Bruno Mars"),
    ("CHANDELIER", "From the album *1000 Forms of Fear* by Sia"),
    ("HELLO", "From the album *25* by Adele"),
    ("PERFECT", "From the album *Divide* by Ed Sheeran"),
];

const HARD_WORDS: &[(&str, &str)] = &[
    ("RENAISSANCE", "Rebirth"),
    ("REVOLUTION", "Uprising"),
    ("IMPERIALISM", "Colonial"),
    ("GENOCIDE", "Massacre"),
    ("CRUSADE", "Holy"),
    ("FASCISM", "Dictator"),
    ("ARMISTICE", "Truce"),
    ("TREATY", "Agreement"),
    ("FEUDALISM", "Hierarchy"),
    ("ENLIGHTENMENT", "Reason"),
];
