//! Core types shared across the application
//! This module contains plain data types used by every layer

use std::fmt;

/// Frame timing (milliseconds) for the terminal runner.
pub const TICK_MS: u32 = 16;

/// Delay between clearing the last pair (or the timer expiring) and the
/// resulting phase transition, in seconds.
pub const SETTLE_DELAY_S: f32 = 0.5;

/// Delay between entering GameOver and requesting an ad, in seconds.
pub const AD_DELAY_S: f32 = 2.0;

/// Rate constant for the exponential ease of the displayed score.
pub const SCORE_EASE_RATE: f32 = 10.0;

/// Default session tuning.
pub const DEFAULT_TIME_LIMIT_S: f32 = 10.0;
pub const DEFAULT_TIME_BONUS_S: f32 = 2.0;
pub const DEFAULT_PAIRS_COUNT: u32 = 4;
pub const DEFAULT_PAIRS_INCREASE: i32 = 2;
pub const DEFAULT_PAIRS_MAXIMUM: u32 = 8;
pub const DEFAULT_BONUS_PER_LEVEL: f32 = 100.0;

/// Sentinel key carried by decoy tiles. Decoys never match anything,
/// including each other.
pub const DECOY_KEY: &str = "XWrongAnswerX";

/// A named handle to an external asset (image or sound). The name doubles as
/// the display text in ImageText mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AssetRef {
    pub name: String,
}

impl AssetRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One matchable unit of content, split into a First half and a Second half
/// by the round builder.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Pair {
    /// Image on the First side, the image's name as text on the Second side.
    ImageText { image: AssetRef },
    /// Free text on both sides.
    TextText { first: String, second: String },
    /// Text on the First side; on the Second side one correct candidate plus
    /// a decoy for every other entry in `choices`.
    TextTextMulti {
        first: String,
        choices: Vec<String>,
        correct: usize,
    },
    /// Image on the First side, a playable sound on the Second side.
    ImageSound { image: AssetRef, sound: AssetRef },
    /// Two distinct images.
    ImageImage {
        first_image: AssetRef,
        second_image: AssetRef,
    },
}

impl Pair {
    pub fn modality(&self) -> Modality {
        match self {
            Pair::ImageText { .. } => Modality::ImageText,
            Pair::TextText { .. } => Modality::TextText,
            Pair::TextTextMulti { .. } => Modality::TextTextMulti,
            Pair::ImageSound { .. } => Modality::ImageSound,
            Pair::ImageImage { .. } => Modality::ImageImage,
        }
    }
}

/// The content modality of a session. Fixed at session start by whichever
/// pair list is non-empty; the declaration order here is also the precedence
/// order when several lists are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    ImageText,
    TextText,
    ImageSound,
    ImageImage,
    TextTextMulti,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::ImageText => "image-text",
            Modality::TextText => "text-text",
            Modality::ImageSound => "image-sound",
            Modality::ImageImage => "image-image",
            Modality::TextTextMulti => "text-multi",
        }
    }
}

/// Identity used to decide whether two selected tiles match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairKey {
    /// Absolute index of the pair in the catalog.
    Catalog(usize),
    /// Non-matchable wrong-answer tile (TextTextMulti only).
    Decoy,
}

impl PairKey {
    pub fn is_decoy(&self) -> bool {
        matches!(self, PairKey::Decoy)
    }

    /// Two keys match only when they name the same catalog pair. The decoy
    /// sentinel is excluded on both sides.
    pub fn matches(&self, other: &PairKey) -> bool {
        self == other && !self.is_decoy() && !other.is_decoy()
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairKey::Catalog(i) => write!(f, "Pair{i}"),
            PairKey::Decoy => f.write_str(DECOY_KEY),
        }
    }
}

/// Which half of a pair a tile represents; also the visual column it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    First,
    Second,
}

/// What a tile shows (and, for Sound, plays) on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum TileFace {
    Image(AssetRef),
    Text(String),
    Sound(AssetRef),
}

impl TileFace {
    /// Short label for presentation layers that cannot show the asset itself.
    pub fn label(&self) -> &str {
        match self {
            TileFace::Image(a) | TileFace::Sound(a) => &a.name,
            TileFace::Text(t) => t,
        }
    }
}

/// Fire-and-forget audio cue kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Select,
    Correct,
    Wrong,
    TimeUp,
    LevelUp,
    GameOver,
    Victory,
}

/// Player input, already mapped from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    FocusUp,
    FocusDown,
    FocusLeft,
    FocusRight,
    Select,
    Pause,
    Confirm,
    Cancel,
}

/// Session tuning knobs.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Points per matched pair, multiplied by the current level.
    pub bonus_per_level: f32,
    /// Number of pairs in the first level.
    pub pairs_count: u32,
    /// Pairs added per level-up (may be negative).
    pub pairs_increase: i32,
    /// Upper clamp for pairs per level.
    pub pairs_maximum: u32,
    /// Countdown length in seconds.
    pub time_limit: f32,
    /// Seconds added to the countdown on level-up.
    pub time_bonus: f32,
    /// Shuffle the catalog once at session start.
    pub randomize_pairs: bool,
    /// RNG seed for catalog and board shuffles.
    pub seed: u32,
    /// Label shown next to the level number.
    pub level_name_prefix: String,
    /// Opaque key the high score is stored under.
    pub session_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bonus_per_level: DEFAULT_BONUS_PER_LEVEL,
            pairs_count: DEFAULT_PAIRS_COUNT,
            pairs_increase: DEFAULT_PAIRS_INCREASE,
            pairs_maximum: DEFAULT_PAIRS_MAXIMUM,
            time_limit: DEFAULT_TIME_LIMIT_S,
            time_bonus: DEFAULT_TIME_BONUS_S,
            randomize_pairs: true,
            seed: 1,
            level_name_prefix: "Level".to_string(),
            session_key: "Pairs".to_string(),
        }
    }
}
