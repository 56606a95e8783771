//! Matching-pairs game for the terminal.
//!
//! `core` holds the deterministic game logic, `content` the pair pack
//! format, `platform` the side-effect adapters, and `term`/`input` the
//! crossterm frontend.

pub mod content;
pub mod core;
pub mod input;
pub mod platform;
pub mod term;
pub mod types;
