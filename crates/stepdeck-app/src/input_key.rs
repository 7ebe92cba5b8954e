//! Abstract input events, independent of terminal library.
//!
//! The TUI converts crossterm key and mouse events into these types at the
//! boundary so stepdeck-app (and headless mode) never depend on crossterm.

/// Abstract input key event, independent of terminal library.
/// Converted from crossterm::event::KeyEvent at the TUI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    // Character keys
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Character with Ctrl modifier (Ctrl+a, Ctrl+c, etc.)
    CharCtrl(char),

    // Navigation
    Up,
    Down,
    Left,
    Right,

    // Action keys
    Enter,
    Esc,
    Backspace,
}

/// Phase of a pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Primary button pressed
    Down,
    /// Pointer moved with the primary button held
    Drag,
    /// Primary button released
    Up,
}

/// Pointer event in terminal cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub column: u16,
    pub row: u16,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, column: u16, row: u16) -> Self {
        Self { kind, column, row }
    }
}
