//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries so the same key
/// handling runs in the terminal and in simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character (name entry, piano keys, shortcuts).
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Tab key (next name field).
    Tab,
    /// Shift+Tab (previous name field).
    BackTab,
    /// Escape key.
    Esc,
}
