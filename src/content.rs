//! Pair pack loading.
//!
//! A pack is a JSON file with one list per modality plus optional tuning
//! overrides. Only one list is played per session; when several are populated
//! the catalog picks by precedence (see [`PairCatalog::from_lists`]).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::PairCatalog;
use crate::types::{AssetRef, GameConfig, Modality, Pair};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTextEntry {
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextTextEntry {
    pub first: String,
    pub second: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMultiEntry {
    pub question: String,
    pub choices: Vec<String>,
    pub correct: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSoundEntry {
    pub image: String,
    pub sound: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageImageEntry {
    pub first: String,
    pub second: String,
}

/// Optional per-pack tuning. Absent fields keep the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackSettings {
    pub time_limit: Option<f32>,
    pub time_bonus: Option<f32>,
    pub pairs_count: Option<u32>,
    pub pairs_increase: Option<i32>,
    pub pairs_maximum: Option<u32>,
    pub bonus_per_level: Option<f32>,
    pub randomize_pairs: Option<bool>,
    pub level_name: Option<String>,
}

impl PackSettings {
    pub fn apply(&self, config: &mut GameConfig) {
        if let Some(v) = self.time_limit {
            config.time_limit = v;
        }
        if let Some(v) = self.time_bonus {
            config.time_bonus = v;
        }
        if let Some(v) = self.pairs_count {
            config.pairs_count = v;
        }
        if let Some(v) = self.pairs_increase {
            config.pairs_increase = v;
        }
        if let Some(v) = self.pairs_maximum {
            config.pairs_maximum = v;
        }
        if let Some(v) = self.bonus_per_level {
            config.bonus_per_level = v;
        }
        if let Some(v) = self.randomize_pairs {
            config.randomize_pairs = v;
        }
        if let Some(v) = &self.level_name {
            config.level_name_prefix = v.clone();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairPack {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_text: Vec<ImageTextEntry>,
    #[serde(default)]
    pub text_text: Vec<TextTextEntry>,
    #[serde(default)]
    pub text_multi: Vec<TextMultiEntry>,
    #[serde(default)]
    pub image_sound: Vec<ImageSoundEntry>,
    #[serde(default)]
    pub image_image: Vec<ImageImageEntry>,
    #[serde(default)]
    pub settings: PackSettings,
}

impl PairPack {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read pair pack {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("failed to parse pair pack {}", path.display()))
    }

    /// Build the session catalog. Precedence when several lists are populated:
    /// image-text, text-text, image-sound, image-image, text-multi.
    pub fn into_catalog(self) -> PairCatalog {
        PairCatalog::from_lists([
            (
                Modality::ImageText,
                self.image_text
                    .into_iter()
                    .map(|e| Pair::ImageText {
                        image: AssetRef::new(e.image),
                    })
                    .collect(),
            ),
            (
                Modality::TextText,
                self.text_text
                    .into_iter()
                    .map(|e| Pair::TextText {
                        first: e.first,
                        second: e.second,
                    })
                    .collect(),
            ),
            (
                Modality::ImageSound,
                self.image_sound
                    .into_iter()
                    .map(|e| Pair::ImageSound {
                        image: AssetRef::new(e.image),
                        sound: AssetRef::new(e.sound),
                    })
                    .collect(),
            ),
            (
                Modality::ImageImage,
                self.image_image
                    .into_iter()
                    .map(|e| Pair::ImageImage {
                        first_image: AssetRef::new(e.first),
                        second_image: AssetRef::new(e.second),
                    })
                    .collect(),
            ),
            (
                Modality::TextTextMulti,
                self.text_multi
                    .into_iter()
                    .map(|e| Pair::TextTextMulti {
                        first: e.question,
                        choices: e.choices,
                        correct: e.correct,
                    })
                    .collect(),
            ),
        ])
    }
}

/// Built-in pack used when no file is given on the command line.
pub fn demo_pack() -> PairPack {
    let words = [
        ("dog", "chien"),
        ("cat", "chat"),
        ("bird", "oiseau"),
        ("fish", "poisson"),
        ("horse", "cheval"),
        ("cow", "vache"),
        ("sheep", "mouton"),
        ("rabbit", "lapin"),
        ("bear", "ours"),
        ("fox", "renard"),
        ("wolf", "loup"),
        ("mouse", "souris"),
    ];
    PairPack {
        name: Some("Animals (EN-FR)".to_string()),
        text_text: words
            .iter()
            .map(|(first, second)| TextTextEntry {
                first: (*first).to_string(),
                second: (*second).to_string(),
            })
            .collect(),
        ..PairPack::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_text_pack() {
        let json = r#"{
            "text_text": [
                {"first": "dog", "second": "chien"},
                {"first": "cat", "second": "chat"}
            ]
        }"#;
        let pack: PairPack = serde_json::from_str(json).unwrap();
        assert_eq!(pack.text_text.len(), 2);
        assert!(pack.image_text.is_empty());

        let catalog = pack.into_catalog();
        assert_eq!(catalog.modality(), Modality::TextText);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn image_text_takes_precedence_over_text_text() {
        let json = r#"{
            "image_text": [{"image": "cow"}],
            "text_text": [{"first": "a", "second": "b"}]
        }"#;
        let pack: PairPack = serde_json::from_str(json).unwrap();
        let catalog = pack.into_catalog();
        assert_eq!(catalog.modality(), Modality::ImageText);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn settings_override_only_what_they_name() {
        let json = r#"{
            "text_text": [{"first": "a", "second": "b"}],
            "settings": {"time_limit": 30.0, "level_name": "Round"}
        }"#;
        let pack: PairPack = serde_json::from_str(json).unwrap();
        let mut config = GameConfig::default();
        pack.settings.apply(&mut config);
        assert_eq!(config.time_limit, 30.0);
        assert_eq!(config.level_name_prefix, "Round");
        assert_eq!(config.pairs_count, GameConfig::default().pairs_count);
    }

    #[test]
    fn text_multi_maps_onto_choice_pairs() {
        let json = r#"{
            "text_multi": [
                {"question": "2+2", "choices": ["3", "4", "5"], "correct": 1}
            ]
        }"#;
        let pack: PairPack = serde_json::from_str(json).unwrap();
        let mut catalog = pack.into_catalog();
        assert_eq!(catalog.modality(), Modality::TextTextMulti);
        let taken = catalog.take(1);
        assert!(matches!(
            &taken[0].1,
            Pair::TextTextMulti { correct: 1, .. }
        ));
    }

    #[test]
    fn demo_pack_is_playable() {
        let catalog = demo_pack().into_catalog();
        assert_eq!(catalog.modality(), Modality::TextText);
        assert!(catalog.len() >= 8);
    }
}
