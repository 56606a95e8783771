//! Master pair list for one session.
//!
//! The catalog owns the full ordered list of pairs for the active modality
//! and a monotonic cursor marking how far the levels have consumed it. It is
//! shuffled at most once, before the first round is built, and the cursor is
//! never reset within a session.

use crate::core::rng::SimpleRng;
use crate::types::{Modality, Pair};

#[derive(Debug, Clone)]
pub struct PairCatalog {
    modality: Modality,
    pairs: Vec<Pair>,
    cursor: usize,
    shuffled: bool,
}

impl PairCatalog {
    /// Build from a single homogeneous pair list.
    pub fn new(modality: Modality, pairs: Vec<Pair>) -> Self {
        Self {
            modality,
            pairs,
            cursor: 0,
            shuffled: false,
        }
    }

    /// An empty catalog. A session over it ends immediately in Victory.
    pub fn empty() -> Self {
        Self::new(Modality::ImageText, Vec::new())
    }

    /// Build from the five modality lists in precedence order:
    /// ImageText > TextText > ImageSound > ImageImage > TextTextMulti.
    /// The first non-empty list wins; the rest are dropped.
    pub fn from_lists(lists: [(Modality, Vec<Pair>); 5]) -> Self {
        for (modality, pairs) in lists {
            if !pairs.is_empty() {
                return Self::new(modality, pairs);
            }
        }
        Self::empty()
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Pairs not yet consumed by any round.
    pub fn remaining(&self) -> usize {
        self.pairs.len() - self.cursor
    }

    /// Uniform in-place shuffle of the whole list. Effective at most once,
    /// and only before any round has consumed pairs.
    pub fn shuffle(&mut self, rng: &mut SimpleRng) {
        if self.shuffled || self.cursor > 0 {
            return;
        }
        rng.shuffle(&mut self.pairs);
        self.shuffled = true;
    }

    /// Consume up to `budget` pairs, advancing the cursor by the number
    /// actually taken. Each entry carries its absolute catalog index, which
    /// becomes the pair key for the round.
    pub fn take(&mut self, budget: usize) -> Vec<(usize, Pair)> {
        let count = budget.min(self.remaining());
        let start = self.cursor;
        let taken = self.pairs[start..start + count]
            .iter()
            .cloned()
            .enumerate()
            .map(|(offset, pair)| (start + offset, pair))
            .collect();
        self.cursor += count;
        taken
    }
}
