//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: `core` stays deterministic and
//! testable, while this module turns snapshots into a framebuffer and flushes
//! it to a crossterm-backed terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
