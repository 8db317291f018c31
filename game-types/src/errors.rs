use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Why a letter guess was dropped without touching the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GuessRejection {
    AlreadyGuessed,
    NotInAlphabet,
    RoundResolved,
}

