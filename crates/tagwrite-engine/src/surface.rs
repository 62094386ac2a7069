//! The editable surface the session drives.

use log::debug;

use crate::editing::{KeyInput, LiveMarkup};

/// The host's editable region, seen as a markup string with a caret.
///
/// The engine only ever reads an owned copy of the markup and writes whole
/// replacements back; it never holds references into the host.
pub trait EditableSurface {
    fn markup(&self) -> String;

    fn replace_markup(&mut self, markup: String);

    fn append_markup(&mut self, markup: &str) {
        let mut current = self.markup();
        current.push_str(markup);
        self.replace_markup(current);
    }

    fn place_caret_at_end(&mut self);

    fn make_editable(&mut self);

    /// Whether the surface is mounted and can take input.
    fn is_attached(&self) -> bool {
        true
    }

    /// What the host does with a key the engine let through.
    fn default_action(&mut self, _key: &KeyInput) {}
}

/// In-memory surface with the default behaviour of a plain editable
/// region: printable keys insert at the end, Backspace deletes backwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupBuffer {
    markup: String,
    editable: bool,
    caret_at_end: bool,
}

impl MarkupBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_markup(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            ..Self::default()
        }
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn caret_at_end(&self) -> bool {
        self.caret_at_end
    }

    /// Types text the way the host would, bypassing the engine.
    pub fn insert_text(&mut self, text: &str) {
        self.edit(|live| live.insert_text(text));
    }

    fn edit(&mut self, f: impl FnOnce(&mut LiveMarkup)) {
        let mut live = LiveMarkup::parse(&self.markup);
        f(&mut live);
        self.markup = live.to_markup();
    }
}

impl EditableSurface for MarkupBuffer {
    fn markup(&self) -> String {
        self.markup.clone()
    }

    fn replace_markup(&mut self, markup: String) {
        self.markup = markup;
        self.caret_at_end = false;
    }

    fn place_caret_at_end(&mut self) {
        self.caret_at_end = true;
    }

    fn make_editable(&mut self) {
        self.editable = true;
    }

    fn default_action(&mut self, key: &KeyInput) {
        if !self.editable {
            debug!("Surface is read-only, dropping {key:?}");
            return;
        }
        match key {
            KeyInput::Printable(c) => {
                let mut buf = [0u8; 4];
                self.insert_text(c.encode_utf8(&mut buf));
            }
            KeyInput::Backspace => self.edit(LiveMarkup::delete_backward),
            _ => {}
        }
        self.caret_at_end = true;
    }
}
