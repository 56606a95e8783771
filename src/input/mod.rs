//! Input module: key mapping and focus traversal for the terminal runner.

pub mod handler;

pub use handler::{handle_key_event, should_quit, FocusCursor};
