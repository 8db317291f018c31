pub mod game_events;
pub mod leaderboard;
pub mod names;
pub mod progression;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod session;
pub mod shuffler;
pub mod storage;
pub mod timer;
pub mod word_bank;

// Re-export main components
pub use game_events::*;
pub use leaderboard::*;
pub use names::*;
pub use progression::*;
pub use round::*;
pub use rules::*;
pub use scoring::*;
pub use session::*;
pub use shuffler::*;
pub use storage::*;
pub use timer::*;
pub use word_bank::*;
