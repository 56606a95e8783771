//! Keyboard mapping and board focus for terminal play.
//!
//! Raw crossterm key events become [`GameAction`]s; the [`FocusCursor`] turns
//! focus movement into a concrete tile on the current snapshot.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::{GameSnapshot, TileId};
use crate::types::{GameAction, Role};

pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(GameAction::FocusUp),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(GameAction::FocusDown),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(GameAction::FocusLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(GameAction::FocusRight),
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameAction::Select),
        KeyCode::Char('p') | KeyCode::Esc => Some(GameAction::Pause),
        KeyCode::Char('r') => Some(GameAction::Confirm),
        KeyCode::Char('m') => Some(GameAction::Cancel),
        _ => None,
    }
}

pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Board position of the keyboard focus: a column and a row within it.
///
/// Rows index the snapshot's display order, so the cursor follows tiles
/// through reshuffles only by position, not identity. [`FocusCursor::retarget`]
/// snaps it back onto a specific tile after resolutions and rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusCursor {
    column: Role,
    row: usize,
}

impl Default for FocusCursor {
    fn default() -> Self {
        Self {
            column: Role::Second,
            row: 0,
        }
    }
}

impl FocusCursor {
    fn column_of<'a>(&self, snap: &'a GameSnapshot, column: Role) -> &'a [crate::core::TileSnapshot] {
        match column {
            Role::First => &snap.first_group,
            Role::Second => &snap.second_group,
        }
    }

    /// The focused tile, if the column is non-empty.
    pub fn current(&self, snap: &GameSnapshot) -> Option<TileId> {
        let column = self.column_of(snap, self.column);
        column
            .get(self.row.min(column.len().saturating_sub(1)))
            .map(|t| t.id)
    }

    /// Apply one focus movement. Vertical moves skip inactive tiles; column
    /// switches keep the row, clamped to the new column.
    pub fn apply(&mut self, action: GameAction, snap: &GameSnapshot) {
        match action {
            GameAction::FocusUp => self.step_vertical(snap, -1),
            GameAction::FocusDown => self.step_vertical(snap, 1),
            GameAction::FocusLeft | GameAction::FocusRight => {
                self.column = match self.column {
                    Role::First => Role::Second,
                    Role::Second => Role::First,
                };
                let len = self.column_of(snap, self.column).len();
                self.row = self.row.min(len.saturating_sub(1));
            }
            _ => {}
        }
    }

    fn step_vertical(&mut self, snap: &GameSnapshot, dir: i32) {
        let column = self.column_of(snap, self.column);
        if column.is_empty() {
            return;
        }
        let mut row = self.row.min(column.len() - 1) as i32;
        loop {
            row += dir;
            if row < 0 || row as usize >= column.len() {
                return;
            }
            if column[row as usize].active {
                self.row = row as usize;
                return;
            }
        }
    }

    /// Snap the cursor onto a specific tile, if it is on the board.
    pub fn retarget(&mut self, snap: &GameSnapshot, id: TileId) {
        for (column, tiles) in [
            (Role::First, &snap.first_group),
            (Role::Second, &snap.second_group),
        ] {
            if let Some(row) = tiles.iter().position(|t| t.id == id) {
                self.column = column;
                self.row = row;
                return;
            }
        }
    }
}
