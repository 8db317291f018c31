pub mod leaderboard_repository;
pub mod session_repository;

pub use leaderboard_repository::JsonLeaderboardRepository;
pub use session_repository::JsonSessionStore;
