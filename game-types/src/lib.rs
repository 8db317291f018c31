pub mod game;
pub mod messages;
pub mod records;
pub mod errors;

// Re-export all types
pub use game::*;
pub use messages::*;
pub use records::*;
pub use errors::*;

pub type PlayerId = String;
