//! Platform adapters: high-score persistence, audio, ads.
//!
//! The core emits [`Directive`]s; this module is where they leave the pure
//! world. Every adapter is a trait with a null implementation, so headless
//! runs and tests pay nothing.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::Directive;
use crate::types::{AssetRef, SoundCue};

pub trait HighScoreStore {
    /// Stored record for `key`, 0.0 when none exists.
    fn get(&self, key: &str) -> f32;
    fn set(&mut self, key: &str, score: f32) -> Result<()>;
}

pub trait AudioSink {
    fn play_cue(&mut self, cue: SoundCue);
    fn play_asset(&mut self, asset: &AssetRef);
}

pub trait AdDisplay {
    fn load_ad(&mut self);
    fn show_ad(&mut self);
}

/// Leaving the game for an outer surface. The terminal runner has no menu
/// scene; quitting back to the shell is its main menu.
pub trait Navigation {
    fn main_menu(&mut self);
}

/// JSON file keyed by session key, written through on every new record.
#[derive(Debug)]
pub struct FileHighScores {
    path: PathBuf,
    scores: HashMap<String, f32>,
}

impl FileHighScores {
    /// Missing or unreadable files start an empty table; a corrupt store
    /// must not prevent play.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = fs::read_to_string(&path)
            .ok()
            .and_then(|data| serde_json::from_str(&data).ok())
            .unwrap_or_default();
        Self { path, scores }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create {}", dir.display()))?;
            }
        }
        let data = serde_json::to_string_pretty(&self.scores)?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write high scores to {}", self.path.display()))
    }
}

impl HighScoreStore for FileHighScores {
    fn get(&self, key: &str) -> f32 {
        self.scores.get(key).copied().unwrap_or(0.0)
    }

    fn set(&mut self, key: &str, score: f32) -> Result<()> {
        self.scores.insert(key.to_string(), score);
        self.persist()
    }
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryHighScores {
    scores: HashMap<String, f32>,
}

impl HighScoreStore for MemoryHighScores {
    fn get(&self, key: &str) -> f32 {
        self.scores.get(key).copied().unwrap_or(0.0)
    }

    fn set(&mut self, key: &str, score: f32) -> Result<()> {
        self.scores.insert(key.to_string(), score);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_cue(&mut self, _cue: SoundCue) {}
    fn play_asset(&mut self, _asset: &AssetRef) {}
}

#[derive(Debug, Default)]
pub struct NullAds;

impl AdDisplay for NullAds {
    fn load_ad(&mut self) {}
    fn show_ad(&mut self) {}
}

#[derive(Debug, Default)]
pub struct NullNavigation;

impl Navigation for NullNavigation {
    fn main_menu(&mut self) {}
}

/// The adapter bundle a runner hands its directives to.
pub struct Platform<S, A, D> {
    pub scores: S,
    pub audio: A,
    pub ads: D,
}

impl<S: HighScoreStore, A: AudioSink, D: AdDisplay> Platform<S, A, D> {
    pub fn new(scores: S, audio: A, ads: D) -> Self {
        Self { scores, audio, ads }
    }

    /// Route one frame's directives to the adapters.
    pub fn dispatch(&mut self, directives: impl IntoIterator<Item = Directive>) -> Result<()> {
        for directive in directives {
            match directive {
                Directive::PlayCue(cue) => self.audio.play_cue(cue),
                Directive::PlayAsset(asset) => self.audio.play_asset(&asset),
                Directive::SaveHighScore { key, score } => self.scores.set(&key, score)?,
                Directive::LoadAd => self.ads.load_ad(),
                Directive::ShowAd => self.ads.show_ad(),
            }
        }
        Ok(())
    }
}
