//! Core module - pure game logic with no external dependencies on UI or I/O.
//!
//! Everything in here is deterministic given a seed and a pair list, which is
//! what the lifecycle and integration tests rely on.

pub mod catalog;
pub mod lifecycle;
pub mod rng;
pub mod round;
pub mod score;
pub mod selection;
pub mod snapshot;

// Re-export commonly used types
pub use catalog::PairCatalog;
pub use lifecycle::{Directive, GameSession, Phase};
pub use rng::SimpleRng;
pub use round::{build_round, RoundState, TileId, TileSlot};
pub use score::ScoreTracker;
pub use selection::{Outcome, SelectionResolver};
pub use snapshot::{GameSnapshot, TileSnapshot};
