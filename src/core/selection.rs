//! Pair-matching state machine.
//!
//! Exactly two states: awaiting the first pick, or holding one pending tile
//! and awaiting its partner. Every resolution (match, mismatch, or re-click
//! of the pending tile) returns to the awaiting-first state, so at most one
//! tile is ever pending.

use crate::core::round::{RoundState, TileId};

/// Result of feeding one tile selection into the resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Inactive or unknown tile; no state change.
    Ignored,
    /// The tile became the pending first half of a pair.
    Picked(TileId),
    /// The pending tile was clicked again and released. No score or sound.
    Deselected(TileId),
    /// Keys matched; both tiles were deactivated and the pair count dropped.
    Matched {
        first: TileId,
        second: TileId,
        score_delta: f32,
    },
    /// Keys differed (or a decoy was involved). Tiles stay active.
    Mismatched { first: TileId, second: TileId },
}

#[derive(Debug, Clone, Default)]
pub struct SelectionResolver {
    pending: Option<TileId>,
}

impl SelectionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tile currently held as the first half of a pair, if any.
    pub fn pending(&self) -> Option<TileId> {
        self.pending
    }

    /// Drop any pending pick (used when the board is rebuilt).
    pub fn reset(&mut self) {
        self.pending = None;
    }

    /// Feed one selection. `level` and `bonus_per_level` determine the score
    /// delta attached to a match.
    pub fn select(
        &mut self,
        round: &mut RoundState,
        tile: TileId,
        level: u32,
        bonus_per_level: f32,
    ) -> Outcome {
        let Some(slot) = round.get(tile) else {
            return Outcome::Ignored;
        };
        if !slot.active {
            return Outcome::Ignored;
        }
        let key = slot.key;

        let Some(first) = self.pending else {
            self.pending = Some(tile);
            return Outcome::Picked(tile);
        };

        // Any second selection resolves the pending pair, one way or another.
        self.pending = None;

        if tile == first {
            return Outcome::Deselected(tile);
        }

        let first_key = match round.get(first) {
            Some(slot) => slot.key,
            // The pending tile vanished (board rebuild); treat as a fresh pick.
            None => {
                self.pending = Some(tile);
                return Outcome::Picked(tile);
            }
        };

        if first_key.matches(&key) {
            round.deactivate(first);
            round.deactivate(tile);
            round.decrement_pairs();
            Outcome::Matched {
                first,
                second: tile,
                score_delta: bonus_per_level * level as f32,
            }
        } else {
            Outcome::Mismatched {
                first,
                second: tile,
            }
        }
    }
}
