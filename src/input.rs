//! Key bindings and the non-blocking key source.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Quit,
    /// Key with no binding.
    None,
}

/// Map key event to game action. Supports wasd, arrows and vim (hjkl).
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    if modifiers == KeyModifiers::CONTROL {
        return match code {
            KeyCode::Char('c') => Action::Quit,
            _ => Action::None,
        };
    }
    if !(modifiers.is_empty() || modifiers == KeyModifiers::SHIFT) {
        return Action::None;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Left | KeyCode::Char('a' | 'h') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('d' | 'l') => Action::MoveRight,
        KeyCode::Down | KeyCode::Char('s' | 'j') => Action::SoftDrop,
        KeyCode::Up | KeyCode::Char('w' | 'k') => Action::Rotate,
        _ => Action::None,
    }
}

/// Take at most one pending key press without waiting. Releases, repeats and
/// non-key events are consumed and skipped; later key presses stay queued
/// for the next tick.
pub fn poll_action() -> Result<Option<Action>> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key_to_action(key)));
            }
        }
    }
    Ok(None)
}
