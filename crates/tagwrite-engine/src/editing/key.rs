/// Arrow keys, kept apart because only Up/Down mean anything (menu
/// navigation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

/// A keystroke as the state machine sees it.
///
/// Hosts decode their native events into this once, at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    /// A single printable character, space included.
    Printable(char),
    Backspace,
    Shift,
    Arrow(ArrowKey),
    Tab,
    Enter,
    /// Any other named key (`Escape`, `Control`, `F5`, …).
    Other(String),
}

impl KeyInput {
    /// Decodes a DOM-style `KeyboardEvent.key` name.
    ///
    /// Returns `None` for an empty name, which is a malformed event.
    pub fn from_key_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let first = chars.next()?;
        if chars.next().is_none() {
            return Some(KeyInput::Printable(first));
        }

        let key = match name.to_ascii_lowercase().as_str() {
            "backspace" => KeyInput::Backspace,
            "shift" => KeyInput::Shift,
            "arrowup" => KeyInput::Arrow(ArrowKey::Up),
            "arrowdown" => KeyInput::Arrow(ArrowKey::Down),
            "arrowleft" => KeyInput::Arrow(ArrowKey::Left),
            "arrowright" => KeyInput::Arrow(ArrowKey::Right),
            "tab" => KeyInput::Tab,
            "enter" => KeyInput::Enter,
            "spacebar" => KeyInput::Printable(' '),
            _ => KeyInput::Other(name.to_string()),
        };
        Some(key)
    }

    /// Keys after which the live markup is not re-cleaned.
    pub fn skips_reclean(&self) -> bool {
        matches!(
            self,
            KeyInput::Shift | KeyInput::Arrow(_) | KeyInput::Backspace
        )
    }
}
