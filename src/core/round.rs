//! Round construction: materializes one level's working set of tiles.
//!
//! One consume/split/shuffle loop serves all five modalities; the differences
//! are confined to [`first_face`]/[`second_face`] and the decoy expansion
//! hook for the multiple-choice variant.

use crate::core::catalog::PairCatalog;
use crate::core::rng::SimpleRng;
use crate::types::{Pair, PairKey, Role, TileFace};

/// Stable identity of a rendered tile within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(pub u32);

/// One rendered pair-half.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSlot {
    pub id: TileId,
    pub key: PairKey,
    pub role: Role,
    pub face: TileFace,
    /// Cleared when the tile's pair is matched; inactive tiles are excluded
    /// from all further interaction.
    pub active: bool,
}

impl TileSlot {
    fn new(id: TileId, key: PairKey, role: Role, face: TileFace) -> Self {
        Self {
            id,
            key,
            role,
            face,
            active: true,
        }
    }

    /// The visual column a tile belongs to. Coincides with the role; decoys
    /// always sit in the Second group.
    pub fn group(&self) -> Role {
        self.role
    }
}

/// The working set for one level, in display order, plus the decoy list.
#[derive(Debug, Clone, Default)]
pub struct RoundState {
    working: Vec<TileSlot>,
    decoys: Vec<TileSlot>,
    pairs_remaining: usize,
}

impl RoundState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn working(&self) -> &[TileSlot] {
        &self.working
    }

    pub fn decoys(&self) -> &[TileSlot] {
        &self.decoys
    }

    /// Matchable pairs still on the board. Decoys are never counted.
    pub fn pairs_remaining(&self) -> usize {
        self.pairs_remaining
    }

    pub fn is_cleared(&self) -> bool {
        self.pairs_remaining == 0
    }

    /// All tiles in display order: working set first, then decoys (both are
    /// rendered in the Second column, decoys after the real answers).
    pub fn tiles(&self) -> impl Iterator<Item = &TileSlot> {
        self.working.iter().chain(self.decoys.iter())
    }

    pub fn get(&self, id: TileId) -> Option<&TileSlot> {
        self.tiles().find(|slot| slot.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: TileId) -> Option<&mut TileSlot> {
        self.working
            .iter_mut()
            .chain(self.decoys.iter_mut())
            .find(|slot| slot.id == id)
    }

    pub(crate) fn deactivate(&mut self, id: TileId) {
        if let Some(slot) = self.get_mut(id) {
            slot.active = false;
        }
    }

    pub(crate) fn decrement_pairs(&mut self) {
        self.pairs_remaining = self.pairs_remaining.saturating_sub(1);
    }

    /// Focus target after a resolution: the first still-active Second-group
    /// tile in display order (decoys included — they stay selectable).
    pub fn next_focus(&self) -> Option<TileId> {
        self.tiles()
            .find(|slot| slot.active && slot.group() == Role::Second)
            .map(|slot| slot.id)
    }
}

/// Consume up to `budget` pairs from the catalog and assemble the round.
/// Tile ids are drawn from `ids` so they stay unique across rebuilds.
pub fn build_round(
    catalog: &mut PairCatalog,
    budget: u32,
    rng: &mut SimpleRng,
    ids: &mut u32,
) -> RoundState {
    let taken = catalog.take(budget as usize);

    let mut working = Vec::with_capacity(taken.len() * 2);
    let mut decoys = Vec::new();

    for (index, pair) in &taken {
        let key = PairKey::Catalog(*index);
        working.push(TileSlot::new(alloc_id(ids), key, Role::First, first_face(pair)));
        working.push(TileSlot::new(
            alloc_id(ids),
            key,
            Role::Second,
            second_face(pair),
        ));

        if let Pair::TextTextMulti { choices, correct, .. } = pair {
            for (choice_index, choice) in choices.iter().enumerate() {
                if choice_index != *correct {
                    decoys.push(TileSlot::new(
                        alloc_id(ids),
                        PairKey::Decoy,
                        Role::Second,
                        TileFace::Text(choice.clone()),
                    ));
                }
            }
            // The decoy list is reshuffled each time a pair lands decoys,
            // scoped to that list only.
            front_back_pass(&mut decoys, rng);
        }
    }

    front_back_pass(&mut working, rng);

    RoundState {
        pairs_remaining: taken.len(),
        working,
        decoys,
    }
}

fn alloc_id(ids: &mut u32) -> TileId {
    let id = TileId(*ids);
    *ids = ids.wrapping_add(1);
    id
}

/// On-screen randomization: for as many passes as there are slots, move one
/// random slot to the front and another to the back. Weaker than a uniform
/// shuffle and directionally biased for larger sets; kept because visual
/// fairness is not asserted anywhere and seeds pin the resulting layouts.
fn front_back_pass(slots: &mut Vec<TileSlot>, rng: &mut SimpleRng) {
    let len = slots.len();
    let mut count = len;
    while count > 0 {
        if count < len {
            let i = rng.next_range(count as u32) as usize;
            let slot = slots.remove(i);
            slots.insert(0, slot);

            let j = rng.next_range(count as u32) as usize;
            let slot = slots.remove(j);
            slots.push(slot);
        }
        count -= 1;
    }
}

fn first_face(pair: &Pair) -> TileFace {
    match pair {
        Pair::ImageText { image } => TileFace::Image(image.clone()),
        Pair::TextText { first, .. } => TileFace::Text(first.clone()),
        Pair::TextTextMulti { first, .. } => TileFace::Text(first.clone()),
        Pair::ImageSound { image, .. } => TileFace::Image(image.clone()),
        Pair::ImageImage { first_image, .. } => TileFace::Image(first_image.clone()),
    }
}

fn second_face(pair: &Pair) -> TileFace {
    match pair {
        Pair::ImageText { image } => TileFace::Text(image.name.clone()),
        Pair::TextText { second, .. } => TileFace::Text(second.clone()),
        Pair::TextTextMulti { choices, correct, .. } => {
            // An out-of-range answer index degrades to an empty label rather
            // than failing the build.
            TileFace::Text(choices.get(*correct).cloned().unwrap_or_default())
        }
        Pair::ImageSound { sound, .. } => TileFace::Sound(sound.clone()),
        Pair::ImageImage { second_image, .. } => TileFace::Image(second_image.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AssetRef, Modality};

    fn catalog_of(pairs: Vec<Pair>) -> PairCatalog {
        let modality = pairs
            .first()
            .map(|p| p.modality())
            .unwrap_or(Modality::TextText);
        PairCatalog::new(modality, pairs)
    }

    fn text_pairs(n: usize) -> Vec<Pair> {
        (0..n)
            .map(|i| Pair::TextText {
                first: format!("q{i}"),
                second: format!("a{i}"),
            })
            .collect()
    }

    #[test]
    fn emits_two_slots_per_pair_with_shared_key() {
        let mut catalog = catalog_of(text_pairs(4));
        let mut rng = SimpleRng::new(1);
        let mut ids = 0;
        let round = build_round(&mut catalog, 4, &mut rng, &mut ids);

        assert_eq!(round.working().len(), 8);
        assert_eq!(round.pairs_remaining(), 4);
        assert!(round.decoys().is_empty());

        for index in 0..4 {
            let key = PairKey::Catalog(index);
            let firsts = round
                .working()
                .iter()
                .filter(|s| s.key == key && s.role == Role::First)
                .count();
            let seconds = round
                .working()
                .iter()
                .filter(|s| s.key == key && s.role == Role::Second)
                .count();
            assert_eq!((firsts, seconds), (1, 1), "key {key}");
        }
    }

    #[test]
    fn short_final_round_consumes_what_remains() {
        let mut catalog = catalog_of(text_pairs(5));
        let mut rng = SimpleRng::new(1);
        let mut ids = 0;
        build_round(&mut catalog, 4, &mut rng, &mut ids);
        let round = build_round(&mut catalog, 4, &mut rng, &mut ids);

        assert_eq!(round.pairs_remaining(), 1);
        assert_eq!(round.working().len(), 2);
        assert_eq!(catalog.remaining(), 0);
    }

    #[test]
    fn zero_budget_yields_an_instantly_cleared_round() {
        let mut catalog = catalog_of(text_pairs(3));
        let mut rng = SimpleRng::new(1);
        let mut ids = 0;
        let round = build_round(&mut catalog, 0, &mut rng, &mut ids);

        assert!(round.is_cleared());
        assert_eq!(catalog.remaining(), 3);
    }

    #[test]
    fn multi_choice_expands_wrong_answers_into_decoys() {
        let mut catalog = catalog_of(vec![Pair::TextTextMulti {
            first: "capital of France".into(),
            choices: vec!["Lyon".into(), "Paris".into(), "Nice".into()],
            correct: 1,
        }]);
        let mut rng = SimpleRng::new(1);
        let mut ids = 0;
        let round = build_round(&mut catalog, 1, &mut rng, &mut ids);

        assert_eq!(round.pairs_remaining(), 1);
        assert_eq!(round.working().len(), 2);
        assert_eq!(round.decoys().len(), 2);

        let correct = round
            .working()
            .iter()
            .find(|s| s.role == Role::Second)
            .unwrap();
        assert_eq!(correct.face, TileFace::Text("Paris".into()));

        for decoy in round.decoys() {
            assert!(decoy.key.is_decoy());
            assert_eq!(decoy.role, Role::Second);
            assert_ne!(decoy.face, TileFace::Text("Paris".into()));
        }
    }

    #[test]
    fn reshuffle_keeps_the_same_tiles() {
        let mut catalog = catalog_of(text_pairs(6));
        let mut rng = SimpleRng::new(777);
        let mut ids = 0;
        let round = build_round(&mut catalog, 6, &mut rng, &mut ids);

        let mut tile_ids: Vec<u32> = round.working().iter().map(|s| s.id.0).collect();
        tile_ids.sort_unstable();
        assert_eq!(tile_ids, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn image_text_second_face_is_the_asset_name() {
        let mut catalog = catalog_of(vec![Pair::ImageText {
            image: AssetRef::new("tiger"),
        }]);
        let mut rng = SimpleRng::new(1);
        let mut ids = 0;
        let round = build_round(&mut catalog, 1, &mut rng, &mut ids);

        let second = round
            .working()
            .iter()
            .find(|s| s.role == Role::Second)
            .unwrap();
        assert_eq!(second.face, TileFace::Text("tiger".into()));
    }

    #[test]
    fn next_focus_skips_inactive_tiles() {
        let mut catalog = catalog_of(text_pairs(2));
        let mut rng = SimpleRng::new(5);
        let mut ids = 0;
        let mut round = build_round(&mut catalog, 2, &mut rng, &mut ids);

        let first_second = round.next_focus().unwrap();
        round.deactivate(first_second);
        let next = round.next_focus().unwrap();
        assert_ne!(next, first_second);
        assert_eq!(round.get(next).unwrap().group(), Role::Second);
    }

    #[test]
    fn out_of_range_answer_index_degrades_to_empty_text() {
        let mut catalog = catalog_of(vec![Pair::TextTextMulti {
            first: "q".into(),
            choices: vec!["a".into()],
            correct: 9,
        }]);
        let mut rng = SimpleRng::new(1);
        let mut ids = 0;
        let round = build_round(&mut catalog, 1, &mut rng, &mut ids);
        let second = round
            .working()
            .iter()
            .find(|s| s.role == Role::Second)
            .unwrap();
        assert_eq!(second.face, TileFace::Text(String::new()));
    }
}
