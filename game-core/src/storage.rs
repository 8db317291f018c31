use anyhow::Result;
use spellout_types::{GameMode, ScoreEntry, SessionSnapshot};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::Leaderboard;

/// Single overwritable save slot.
pub trait SessionStore {
    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<()>;

    /// `None` when the slot is empty or unreadable.
    fn load(&self) -> Option<SessionSnapshot>;

    fn clear(&mut self) -> Result<()>;

    fn has_snapshot(&self) -> bool {
        self.load().is_some()
    }
}

/// One leaderboard per mode.
pub trait LeaderboardRepository {
    /// An unreadable board loads as empty.
    fn load(&self, mode: GameMode) -> Leaderboard;

    fn store(&mut self, mode: GameMode, board: &Leaderboard) -> Result<()>;

    /// Apply a finished session and persist the board. Returns the updated
    /// board so callers can rank the player without reloading.
    fn record_result(
        &mut self,
        mode: GameMode,
        player_id: &str,
        entry: ScoreEntry,
    ) -> Result<Leaderboard> {
        let mut board = self.load(mode);
        board.record_result(player_id, entry);
        self.store(mode, &board)?;
        Ok(board)
    }
}

/// Save slot kept in memory. Clones share the slot.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    slot: Rc<RefCell<Option<SessionSnapshot>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.slot.borrow().clone()
    }
}

impl SessionStore for InMemorySessionStore {
    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        *self.slot.borrow_mut() = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Option<SessionSnapshot> {
        self.slot.borrow().clone()
    }

    fn clear(&mut self) -> Result<()> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

/// Leaderboards kept in memory. Clones share the boards.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeaderboards {
    boards: Rc<RefCell<HashMap<GameMode, Leaderboard>>>,
}

impl InMemoryLeaderboards {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeaderboardRepository for InMemoryLeaderboards {
    fn load(&self, mode: GameMode) -> Leaderboard {
        self.boards.borrow().get(&mode).cloned().unwrap_or_default()
    }

    fn store(&mut self, mode: GameMode, board: &Leaderboard) -> Result<()> {
        self.boards.borrow_mut().insert(mode, board.clone());
        Ok(())
    }
}
