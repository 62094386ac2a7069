use crate::error::WordTrackerError;

/// The partially-typed word following a trigger character.
///
/// `display_text()` is what the draft placeholder renders; the state
/// machine writes it into the markup after every change, so the word and
/// the rendered draft never drift apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordTracker {
    trigger: Option<char>,
    word: String,
}

impl WordTracker {
    pub fn begin(&mut self, trigger: char) {
        self.trigger = Some(trigger);
        self.word.clear();
    }

    pub fn is_composing(&self) -> bool {
        self.trigger.is_some()
    }

    pub fn trigger(&self) -> Option<char> {
        self.trigger
    }

    pub fn append(&mut self, c: char) -> Result<(), WordTrackerError> {
        if !self.is_composing() {
            return Err(WordTrackerError::NotComposing);
        }
        self.word.push(c);
        Ok(())
    }

    /// Removes and returns the last character; `None` when idle or empty.
    pub fn delete_last(&mut self) -> Option<char> {
        if !self.is_composing() {
            return None;
        }
        self.word.pop()
    }

    pub fn current(&self) -> &str {
        &self.word
    }

    /// Trigger followed by the word; empty when idle.
    pub fn display_text(&self) -> String {
        match self.trigger {
            Some(trigger) => format!("{trigger}{}", self.word),
            None => String::new(),
        }
    }

    /// Recomputes the word from a rendered draft's text (minus its leading
    /// trigger). Used when the host has touched the draft behind our back.
    pub fn resync(&mut self, display: &str) -> Result<(), WordTrackerError> {
        let trigger = self.trigger.ok_or(WordTrackerError::NotComposing)?;
        self.word = display
            .strip_prefix(trigger)
            .unwrap_or(display)
            .to_string();
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
