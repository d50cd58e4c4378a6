pub mod game_state;
pub mod scoring;
pub mod validation;
pub mod game_events;

// Re-export main components
pub use game_state::*;
pub use scoring::*;
pub use validation::*;
pub use game_events::*;
