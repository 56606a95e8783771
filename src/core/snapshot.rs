//! Read-only view of the session for presentation layers.
//!
//! Snapshots are plain data. The terminal view (and any other frontend)
//! renders from a snapshot and never touches live session state.

use crate::core::lifecycle::{GameSession, Phase};
use crate::core::round::TileId;
use crate::types::{Modality, Role, TileFace};

#[derive(Debug, Clone, PartialEq)]
pub struct TileSnapshot {
    pub id: TileId,
    pub group: Role,
    pub label: String,
    /// False once the tile's pair has been matched.
    pub active: bool,
    /// True for the tile currently held as a first pick.
    pub pending: bool,
    /// Sound tiles render as a speaker glyph instead of their label.
    pub sound: bool,
    pub decoy: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub paused: bool,
    pub modality: Modality,
    pub level: u32,
    /// e.g. "Level 3", using the configured prefix.
    pub level_label: String,
    pub pairs_remaining: usize,
    pub time_left: f32,
    /// Timer fill clamped to [0, 1] for bar rendering.
    pub fill_ratio: f32,
    pub score: f32,
    pub display_score: f32,
    pub high_score: f32,
    /// First-column tiles in display order.
    pub first_group: Vec<TileSnapshot>,
    /// Second-column tiles in display order, decoys after the real answers.
    pub second_group: Vec<TileSnapshot>,
}

impl GameSession {
    pub fn snapshot(&self) -> GameSnapshot {
        let pending = self.pending_tile();
        let mut first_group = Vec::new();
        let mut second_group = Vec::new();

        for slot in self.round().tiles() {
            let tile = TileSnapshot {
                id: slot.id,
                group: slot.group(),
                label: slot.face.label().to_string(),
                active: slot.active,
                pending: pending == Some(slot.id),
                sound: matches!(slot.face, TileFace::Sound(_)),
                decoy: slot.key.is_decoy(),
            };
            match slot.group() {
                Role::First => first_group.push(tile),
                Role::Second => second_group.push(tile),
            }
        }

        GameSnapshot {
            phase: self.phase(),
            paused: self.paused(),
            modality: self.modality(),
            level: self.level(),
            level_label: format!("{} {}", self.config().level_name_prefix, self.level()),
            pairs_remaining: self.round().pairs_remaining(),
            time_left: self.time_left(),
            fill_ratio: self.fill_ratio().clamp(0.0, 1.0),
            score: self.score().score(),
            display_score: self.score().display(),
            high_score: self.score().high_score(),
            first_group,
            second_group,
        }
    }
}
