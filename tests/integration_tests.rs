//! End-to-end tests over the public API: pack JSON in, session out.

use tui_pairs::content::PairPack;
use tui_pairs::core::{Directive, GameSession, Outcome, PairCatalog, Phase, TileId};
use tui_pairs::platform::{HighScoreStore, MemoryHighScores, NullAds, NullAudio, Platform};
use tui_pairs::types::{GameConfig, Modality, Pair, PairKey, Role, SoundCue};

fn config() -> GameConfig {
    GameConfig {
        randomize_pairs: false,
        ..GameConfig::default()
    }
}

fn tile(session: &GameSession, index: usize, role: Role) -> TileId {
    session
        .round()
        .working()
        .iter()
        .find(|s| s.key == PairKey::Catalog(index) && s.role == role)
        .unwrap()
        .id
}

fn match_pair(session: &mut GameSession, index: usize) {
    let first = tile(session, index, Role::First);
    let second = tile(session, index, Role::Second);
    assert!(matches!(session.select(first), Outcome::Picked(_)));
    assert!(matches!(session.select(second), Outcome::Matched { .. }));
}

fn settle(session: &mut GameSession) {
    for _ in 0..250 {
        session.tick(0.016);
    }
}

#[test]
fn pack_json_plays_through_to_victory() {
    let json = r#"{
        "name": "Mini",
        "text_text": [
            {"first": "one", "second": "un"},
            {"first": "two", "second": "deux"},
            {"first": "three", "second": "trois"},
            {"first": "four", "second": "quatre"}
        ],
        "settings": {"pairs_count": 4, "randomize_pairs": false}
    }"#;
    let pack: PairPack = serde_json::from_str(json).unwrap();

    let mut config = GameConfig::default();
    pack.settings.apply(&mut config);
    config.session_key = pack.name.clone().unwrap();

    let mut session = GameSession::new(config, pack.into_catalog(), 0.0);
    assert_eq!(session.round().pairs_remaining(), 4);

    for i in 0..4 {
        match_pair(&mut session, i);
    }
    assert_eq!(session.score().score(), 400.0);

    settle(&mut session);
    assert_eq!(session.phase(), Phase::Victory);

    // Displayed score has eased all the way up by now.
    assert_eq!(session.score().display(), 400.0);
}

#[test]
fn two_level_session_consumes_the_catalog_in_order() {
    let pairs: Vec<Pair> = (0..6)
        .map(|i| Pair::TextText {
            first: format!("q{i}"),
            second: format!("a{i}"),
        })
        .collect();
    let mut cfg = config();
    cfg.pairs_count = 4;
    cfg.pairs_increase = 2;
    let mut session = GameSession::new(cfg, PairCatalog::new(Modality::TextText, pairs), 0.0);

    // Level 1 holds catalog pairs 0..4.
    for i in 0..4 {
        match_pair(&mut session, i);
    }
    settle(&mut session);
    assert_eq!(session.level(), 2);

    // Level 2 gets only the 2 leftovers despite the grown budget.
    assert_eq!(session.round().pairs_remaining(), 2);
    for i in 4..6 {
        match_pair(&mut session, i);
    }
    settle(&mut session);
    assert_eq!(session.phase(), Phase::Victory);

    // Level 2 matches pay double.
    assert_eq!(session.score().score(), 4.0 * 100.0 + 2.0 * 200.0);
}

#[test]
fn multi_choice_pack_exposes_decoys_that_never_match() {
    let json = r#"{
        "text_multi": [
            {"question": "capital of France", "choices": ["Lyon", "Paris", "Nice"], "correct": 1}
        ],
        "settings": {"randomize_pairs": false, "pairs_count": 1}
    }"#;
    let pack: PairPack = serde_json::from_str(json).unwrap();
    let mut cfg = config();
    pack.settings.apply(&mut cfg);
    let mut session = GameSession::new(cfg, pack.into_catalog(), 0.0);

    assert_eq!(session.modality(), Modality::TextTextMulti);
    assert_eq!(session.round().decoys().len(), 2);

    // Question plus a wrong answer: a mismatch, nothing deactivates.
    let question = tile(&session, 0, Role::First);
    let decoy = session.round().decoys()[0].id;
    session.select(question);
    assert!(matches!(session.select(decoy), Outcome::Mismatched { .. }));
    assert_eq!(session.round().pairs_remaining(), 1);

    // Question plus the right answer clears the round.
    match_pair(&mut session, 0);
    settle(&mut session);
    assert_eq!(session.phase(), Phase::Victory);
}

#[test]
fn game_over_flow_reaches_the_platform_in_order() {
    let pairs: Vec<Pair> = (0..4)
        .map(|i| Pair::TextText {
            first: format!("q{i}"),
            second: format!("a{i}"),
        })
        .collect();
    let mut cfg = config();
    cfg.time_limit = 0.1;
    cfg.session_key = "OrderTest".into();
    let mut session = GameSession::new(cfg, PairCatalog::new(Modality::TextText, pairs), 0.0);

    // Score something so the record save fires too.
    match_pair(&mut session, 0);

    let mut seen = Vec::new();
    for _ in 0..300 {
        session.tick(0.016);
        seen.extend(session.drain_directives());
    }
    assert_eq!(session.phase(), Phase::GameOver);

    let time_up = seen
        .iter()
        .position(|d| *d == Directive::PlayCue(SoundCue::TimeUp))
        .unwrap();
    let game_over = seen
        .iter()
        .position(|d| *d == Directive::PlayCue(SoundCue::GameOver))
        .unwrap();
    let save = seen
        .iter()
        .position(|d| matches!(d, Directive::SaveHighScore { .. }))
        .unwrap();
    let show_ad = seen.iter().position(|d| *d == Directive::ShowAd).unwrap();

    assert!(time_up < game_over);
    assert!(game_over <= show_ad);
    assert!(save < show_ad);

    // The ad pair is requested exactly once.
    assert_eq!(seen.iter().filter(|d| **d == Directive::LoadAd).count(), 1);
    assert_eq!(seen.iter().filter(|d| **d == Directive::ShowAd).count(), 1);
}

#[test]
fn platform_persists_records_across_sessions() {
    let pairs = || {
        (0..4)
            .map(|i| Pair::TextText {
                first: format!("q{i}"),
                second: format!("a{i}"),
            })
            .collect::<Vec<_>>()
    };
    let mut cfg = config();
    cfg.session_key = "Persist".into();

    let mut platform = Platform::new(MemoryHighScores::default(), NullAudio, NullAds);

    let mut session = GameSession::new(
        cfg.clone(),
        PairCatalog::new(Modality::TextText, pairs()),
        platform.scores.get("Persist"),
    );
    for i in 0..4 {
        match_pair(&mut session, i);
    }
    settle(&mut session);
    platform.dispatch(session.drain_directives()).unwrap();
    assert_eq!(platform.scores.get("Persist"), 400.0);

    // A second session starts with the stored record and cannot lower it.
    let mut session = GameSession::new(
        cfg,
        PairCatalog::new(Modality::TextText, pairs()),
        platform.scores.get("Persist"),
    );
    assert_eq!(session.score().high_score(), 400.0);
    match_pair(&mut session, 0);
    settle(&mut session);
    platform.dispatch(session.drain_directives()).unwrap();
    assert_eq!(platform.scores.get("Persist"), 400.0);
}

#[test]
fn same_seed_builds_the_same_boards() {
    let pairs = || {
        (0..8)
            .map(|i| Pair::TextText {
                first: format!("q{i}"),
                second: format!("a{i}"),
            })
            .collect::<Vec<_>>()
    };
    let mut cfg = GameConfig::default();
    cfg.randomize_pairs = true;
    cfg.seed = 424242;

    let a = GameSession::new(
        cfg.clone(),
        PairCatalog::new(Modality::TextText, pairs()),
        0.0,
    );
    let b = GameSession::new(cfg, PairCatalog::new(Modality::TextText, pairs()), 0.0);

    let labels = |s: &GameSession| {
        s.round()
            .working()
            .iter()
            .map(|t| t.face.label().to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(labels(&a), labels(&b));
}
