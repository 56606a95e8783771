//! Session lifecycle: level progression, countdown timer, pause, and the
//! terminal GameOver/Victory transitions.
//!
//! The session owns every piece of mutable game state. Platform side effects
//! (sounds, high-score persistence, ads) are emitted as [`Directive`]s and
//! drained by the runner once per frame; adapters never mutate the core.
//!
//! Delayed transitions (round settle, ad break) are modeled as a single
//! cancellable countdown rather than a blocking wait, so pausing freezes
//! them and unpausing resumes from the remaining delay.

use arrayvec::ArrayVec;

use crate::core::catalog::PairCatalog;
use crate::core::rng::SimpleRng;
use crate::core::round::{build_round, RoundState, TileId};
use crate::core::score::ScoreTracker;
use crate::core::selection::{Outcome, SelectionResolver};
use crate::types::{
    AssetRef, GameConfig, Modality, Role, SoundCue, TileFace, AD_DELAY_S, SETTLE_DELAY_S,
};

/// Lifecycle phases. GameOver and Victory are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Waiting out a settle delay after a cleared round or an expired timer.
    LevelTransition,
    GameOver,
    Victory,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameOver | Phase::Victory)
    }
}

/// Side-effect request for the platform adapters. Fire-and-forget.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    PlayCue(SoundCue),
    /// Play a specific sound asset (ImageSound tiles).
    PlayAsset(AssetRef),
    /// The session beat its stored high score; persist the new record.
    SaveHighScore { key: String, score: f32 },
    LoadAd,
    ShowAd,
}

pub const MAX_DIRECTIVES_PER_TICK: usize = 16;
pub type Directives = ArrayVec<Directive, MAX_DIRECTIVES_PER_TICK>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum PendingKind {
    RoundCleared,
    TimeExpired,
    Victory,
    AdBreak,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    kind: PendingKind,
    remaining: f32,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    rng: SimpleRng,
    catalog: PairCatalog,
    round: RoundState,
    resolver: SelectionResolver,
    score: ScoreTracker,
    level: u32,
    pairs_per_level: u32,
    time_left: f32,
    phase: Phase,
    paused: bool,
    pending: Option<Pending>,
    tile_ids: u32,
    directives: Directives,
}

impl GameSession {
    /// Start a session over the given catalog. `high_score` is the persisted
    /// record for `config.session_key`, fetched by the caller.
    pub fn new(config: GameConfig, mut catalog: PairCatalog, high_score: f32) -> Self {
        let mut rng = SimpleRng::new(config.seed);
        if config.randomize_pairs {
            catalog.shuffle(&mut rng);
        }

        let mut session = Self {
            pairs_per_level: config.pairs_count,
            time_left: config.time_limit,
            score: ScoreTracker::new(high_score),
            config,
            rng,
            catalog,
            round: RoundState::empty(),
            resolver: SelectionResolver::new(),
            level: 1,
            phase: Phase::Playing,
            paused: false,
            pending: None,
            tile_ids: 0,
            directives: Directives::new(),
        };

        session.rebuild_round();
        session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn pairs_per_level(&self) -> u32 {
        self.pairs_per_level
    }

    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    pub fn time_limit(&self) -> f32 {
        self.config.time_limit
    }

    /// Normalized timer fill for display. Can exceed 1.0 after time bonuses;
    /// the view clamps.
    pub fn fill_ratio(&self) -> f32 {
        if self.config.time_limit <= 0.0 {
            0.0
        } else {
            self.time_left / self.config.time_limit
        }
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    pub fn modality(&self) -> Modality {
        self.catalog.modality()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The tile currently pending as the first half of a pair, if any.
    pub fn pending_tile(&self) -> Option<TileId> {
        self.resolver.pending()
    }

    /// Pairs the catalog has not yet handed to any round.
    pub fn catalog_remaining(&self) -> usize {
        self.catalog.remaining()
    }

    /// Focus target after a resolution (pure query).
    pub fn next_focus(&self) -> Option<TileId> {
        self.round.next_focus()
    }

    /// Take this frame's accumulated side-effect requests.
    pub fn drain_directives(&mut self) -> Directives {
        std::mem::take(&mut self.directives)
    }

    /// Freeze timers and any pending delayed transition.
    pub fn pause(&mut self) {
        if !self.phase.is_terminal() {
            self.paused = true;
        }
    }

    /// Resume from exactly where the pause left off.
    pub fn unpause(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.unpause();
        } else {
            self.pause();
        }
    }

    /// Whether a tile can currently be picked as a first selection. In
    /// ImageSound mode the image column stays locked until a sound tile is
    /// pending, so a sound is always heard before its image is chosen.
    pub fn selectable(&self, tile: TileId) -> bool {
        let Some(slot) = self.round.get(tile) else {
            return false;
        };
        if !slot.active || self.paused || self.phase != Phase::Playing {
            return false;
        }
        if self.modality() == Modality::ImageSound
            && self.resolver.pending().is_none()
            && slot.group() == Role::First
        {
            return false;
        }
        true
    }

    /// Feed one tile selection through the resolver, applying score, sound
    /// and lifecycle consequences.
    pub fn select(&mut self, tile: TileId) -> Outcome {
        if !self.selectable(tile) {
            return Outcome::Ignored;
        }

        let outcome = self
            .resolver
            .select(&mut self.round, tile, self.level, self.config.bonus_per_level);

        match outcome {
            Outcome::Picked(id) => {
                self.emit(Directive::PlayCue(SoundCue::Select));
                if let Some(TileFace::Sound(sound)) = self.round.get(id).map(|s| s.face.clone()) {
                    self.emit(Directive::PlayAsset(sound));
                }
            }
            Outcome::Matched { score_delta, .. } => {
                self.score.add(score_delta);
                self.emit(Directive::PlayCue(SoundCue::Correct));
                if self.round.is_cleared() {
                    self.schedule(PendingKind::RoundCleared, SETTLE_DELAY_S);
                }
            }
            Outcome::Mismatched { .. } => {
                self.emit(Directive::PlayCue(SoundCue::Wrong));
            }
            Outcome::Deselected(_) | Outcome::Ignored => {}
        }

        outcome
    }

    /// Advance the session by `dt` seconds. Frozen entirely while paused.
    pub fn tick(&mut self, dt: f32) {
        if self.paused {
            return;
        }

        // The displayed score keeps counting up even in terminal phases.
        self.score.tick(dt);

        if let Some(mut pending) = self.pending.take() {
            pending.remaining -= dt;
            if pending.remaining <= 0.0 {
                self.fire(pending.kind);
            } else {
                self.pending = Some(pending);
            }
            return;
        }

        if self.phase == Phase::Playing {
            self.time_left = (self.time_left - dt).max(0.0);
            if self.time_left <= 0.0 {
                // Fires exactly once: the phase leaves Playing below.
                self.emit(Directive::PlayCue(SoundCue::TimeUp));
                self.phase = Phase::LevelTransition;
                self.schedule(PendingKind::TimeExpired, SETTLE_DELAY_S);
            }
        }
    }

    fn schedule(&mut self, kind: PendingKind, delay: f32) {
        self.pending = Some(Pending {
            kind,
            remaining: delay,
        });
        if kind == PendingKind::RoundCleared {
            self.phase = Phase::LevelTransition;
        }
    }

    fn fire(&mut self, kind: PendingKind) {
        match kind {
            PendingKind::RoundCleared => {
                if self.catalog.remaining() > 0 {
                    self.level_up();
                } else {
                    self.schedule(PendingKind::Victory, SETTLE_DELAY_S);
                }
            }
            PendingKind::Victory => {
                self.phase = Phase::Victory;
                self.commit_high_score();
                self.emit(Directive::PlayCue(SoundCue::Victory));
            }
            PendingKind::TimeExpired => {
                self.phase = Phase::GameOver;
                self.commit_high_score();
                self.emit(Directive::PlayCue(SoundCue::GameOver));
                self.schedule(PendingKind::AdBreak, AD_DELAY_S);
            }
            PendingKind::AdBreak => {
                self.emit(Directive::LoadAd);
                self.emit(Directive::ShowAd);
            }
        }
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.pairs_per_level = (self.pairs_per_level as i64 + self.config.pairs_increase as i64)
            .clamp(0, self.config.pairs_maximum as i64) as u32;
        self.time_left += self.config.time_bonus;
        self.emit(Directive::PlayCue(SoundCue::LevelUp));
        self.phase = Phase::Playing;
        self.rebuild_round();
    }

    /// Discard the old working set and build the next one. An empty result
    /// (exhausted catalog or zero budget) counts as already cleared and goes
    /// straight back through the round-cleared path.
    fn rebuild_round(&mut self) {
        self.resolver.reset();
        self.round = build_round(
            &mut self.catalog,
            self.pairs_per_level,
            &mut self.rng,
            &mut self.tile_ids,
        );
        if self.round.is_cleared() {
            self.schedule(PendingKind::RoundCleared, SETTLE_DELAY_S);
        }
    }

    fn commit_high_score(&mut self) {
        if let Some(record) = self.score.commit_high_score() {
            let key = self.config.session_key.clone();
            self.emit(Directive::SaveHighScore { key, score: record });
        }
    }

    fn emit(&mut self, directive: Directive) {
        // Best-effort, like the audio it mostly carries.
        let _ = self.directives.try_push(directive);
    }
}
