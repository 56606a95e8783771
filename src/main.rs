//! Terminal pairs runner (default binary).
//!
//! Loads a pair pack (JSON path as the first argument, a built-in demo pack
//! otherwise), then runs the crossterm loop: render a snapshot, poll input,
//! tick the session, dispatch its directives to the platform adapters.

use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_pairs::content::{demo_pack, PairPack};
use tui_pairs::core::{GameSession, Outcome};
use tui_pairs::input::{handle_key_event, should_quit, FocusCursor};
use tui_pairs::platform::{
    FileHighScores, HighScoreStore, Navigation, NullAds, NullAudio, Platform,
};
use tui_pairs::term::{GameView, TerminalRenderer, Viewport};
use tui_pairs::types::{GameAction, GameConfig, TICK_MS};

const SCORES_FILE: &str = "tui-pairs-scores.json";

/// The terminal has no menu scene; going to the main menu means leaving for
/// the shell.
#[derive(Default)]
struct ShellNavigation {
    leave: bool,
}

impl Navigation for ShellNavigation {
    fn main_menu(&mut self) {
        self.leave = true;
    }
}

fn main() -> Result<()> {
    let (pack, session_key) = match std::env::args().nth(1) {
        Some(arg) => {
            let path = Path::new(&arg);
            let pack = PairPack::load(path)?;
            let key = pack
                .name
                .clone()
                .or_else(|| {
                    path.file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                })
                .unwrap_or_else(|| "Pairs".to_string());
            (pack, key)
        }
        None => {
            let pack = demo_pack();
            let key = pack.name.clone().unwrap_or_else(|| "Pairs".to_string());
            (pack, key)
        }
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, pack, session_key);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, pack: PairPack, session_key: String) -> Result<()> {
    let mut config = GameConfig::default();
    pack.settings.apply(&mut config);
    config.session_key = session_key;
    config.seed = seed_from_clock();

    let mut platform = Platform::new(FileHighScores::open(SCORES_FILE), NullAudio, NullAds);
    let mut session = new_session(&config, &pack, &platform.scores);

    let view = GameView::default();
    let mut cursor = FocusCursor::default();
    let mut nav = ShellNavigation::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let snap = session.snapshot();
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&snap, cursor.current(&snap), Viewport::new(w, h));
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }

                    if let Some(action) = handle_key_event(key) {
                        match action {
                            GameAction::FocusUp
                            | GameAction::FocusDown
                            | GameAction::FocusLeft
                            | GameAction::FocusRight => cursor.apply(action, &snap),
                            GameAction::Select => {
                                if let Some(tile) = cursor.current(&snap) {
                                    if let Outcome::Matched { .. } = session.select(tile) {
                                        // Jump to the next open answer tile.
                                        if let Some(next) = session.next_focus() {
                                            cursor.retarget(&session.snapshot(), next);
                                        }
                                    }
                                }
                            }
                            GameAction::Pause => session.toggle_pause(),
                            GameAction::Confirm => {
                                if session.phase().is_terminal() {
                                    config.seed = seed_from_clock();
                                    session = new_session(&config, &pack, &platform.scores);
                                    cursor = FocusCursor::default();
                                }
                            }
                            GameAction::Cancel => {
                                if session.phase().is_terminal() {
                                    nav.main_menu();
                                }
                            }
                        }
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS as f32 / 1000.0);
        }

        platform.dispatch(session.drain_directives())?;

        if nav.leave {
            return Ok(());
        }
    }
}

fn new_session(config: &GameConfig, pack: &PairPack, scores: &impl HighScoreStore) -> GameSession {
    let catalog = pack.clone().into_catalog();
    let high_score = scores.get(&config.session_key);
    GameSession::new(config.clone(), catalog, high_score)
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
