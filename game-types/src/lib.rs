pub mod game;
pub mod messages;
pub mod player;
pub mod errors;

// Re-export all types
pub use game::*;
pub use messages::*;
pub use player::*;
pub use errors::*;

pub type GameId = String;
pub type PlayerIndex = usize;

/// Seats at a CallBreak table.
pub const PLAYER_COUNT: usize = 4;
/// Rounds played before a game is finalized.
pub const ROUNDS_PER_GAME: usize = 5;
/// Round after which the projected standings are previewed.
pub const STANDINGS_PREVIEW_ROUND: usize = ROUNDS_PER_GAME - 1;
/// Tricks in a 52-card deal.
pub const TRICKS_PER_ROUND: i32 = 13;
pub const MIN_BID: i32 = 1;
pub const MAX_BID: i32 = 13;
/// Bid sum that unlocks an auto round.
pub const AUTO_ROUND_BID_SUM: i32 = 9;
pub const MAX_NAME_LENGTH: usize = 12;
