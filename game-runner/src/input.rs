use spellout_types::{GameInput, GameMode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("empty input")]
    Empty,
    #[error("unrecognized command {0:?}")]
    Unrecognized(String),
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode one line of input.
///
/// Lines starting with `{` or `"` are read as serialized [`GameInput`]
/// values. Anything else is a shorthand command: a single character guesses
/// that letter, and words such as `classic`, `pause` or `leaderboard timed`
/// map to the matching input.
pub fn parse_input(line: &str) -> Result<GameInput, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(InputError::Empty);
    }
    if line.starts_with('{') || line.starts_with('"') {
        return Ok(serde_json::from_str(line)?);
    }

    let mut chars = line.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        return Ok(GameInput::GuessLetter { letter });
    }

    let lowered = line.to_ascii_lowercase();
    let mut words = lowered.split_whitespace();
    let command = words.next().unwrap_or_default();
    let argument = words.next();
    if words.next().is_some() {
        return Err(InputError::Unrecognized(line.to_string()));
    }

    let input = match (command, argument) {
        ("classic", None) => GameInput::SelectMode {
            mode: GameMode::Classic,
        },
        ("timed", None) => GameInput::SelectMode {
            mode: GameMode::Timed,
        },
        ("pause", None) => GameInput::RequestPause,
        ("resume", None) => GameInput::ResumeFromPause,
        ("save", None) => GameInput::SaveAndExit,
        ("restart", None) => GameInput::RestartSession,
        ("quit" | "exit", None) => GameInput::QuitSession,
        ("continue", None) => GameInput::ResumeSavedSession,
        ("leaderboard", mode) => GameInput::ShowLeaderboard {
            mode: parse_mode(mode, line)?,
        },
        ("record", mode) => GameInput::ShowLastRecord {
            mode: parse_mode(mode, line)?,
        },
        _ => return Err(InputError::Unrecognized(line.to_string())),
    };
    Ok(input)
}

fn parse_mode(word: Option<&str>, line: &str) -> Result<GameMode, InputError> {
    match word {
        None | Some("classic") => Ok(GameMode::Classic),
        Some("timed") => Ok(GameMode::Timed),
        Some(_) => Err(InputError::Unrecognized(line.to_string())),
    }
}
