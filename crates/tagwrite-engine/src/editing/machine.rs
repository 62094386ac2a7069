use log::debug;
use tagwrite_syntax::to_markup;

use super::key::{ArrowKey, KeyInput};
use super::live::LiveMarkup;
use super::word::WordTracker;
use crate::autocomplete::AutocompleteBridge;
use crate::placeholder::Placeholder;
use crate::registry::TagRegistry;
use crate::settings::{NBSP, Settings};
use crate::surface::EditableSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagState {
    Idle,
    ComposingTag,
}

/// What the host should do with the key it reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The engine handled the key; the host must not insert anything.
    Suppressed,
    /// The host applies its default behaviour.
    PassThrough,
    /// Malformed or out-of-place event; nothing changed.
    Ignored,
}

/// Decides, keystroke by keystroke, whether a tag is starting, growing,
/// being committed, or being abandoned, and keeps the draft placeholder in
/// the live markup in step with the [`WordTracker`].
#[derive(Debug, Clone, Default)]
pub struct TagMachine {
    tracker: WordTracker,
}

/// Borrowed collaborators for one transition.
pub struct Context<'a, S: EditableSurface> {
    pub surface: &'a mut S,
    pub registry: &'a TagRegistry,
    pub settings: &'a Settings,
    pub bridge: &'a mut AutocompleteBridge,
}

impl TagMachine {
    pub fn state(&self) -> TagState {
        if self.tracker.is_composing() {
            TagState::ComposingTag
        } else {
            TagState::Idle
        }
    }

    pub fn tracker(&self) -> &WordTracker {
        &self.tracker
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    pub fn handle<S: EditableSurface>(&mut self, key: &KeyInput, cx: Context<'_, S>) -> KeyOutcome {
        match self.state() {
            TagState::Idle => match key {
                KeyInput::Printable(c) if cx.registry.is_trigger(*c) => self.start(*c, cx),
                _ => KeyOutcome::PassThrough,
            },
            TagState::ComposingTag => {
                self.resync(&*cx.surface);
                match key {
                    KeyInput::Printable(' ') => self.abort(cx),
                    KeyInput::Printable(c) => self.push(*c, cx),
                    KeyInput::Backspace => self.backspace(cx),
                    KeyInput::Arrow(ArrowKey::Up) if cx.bridge.is_visible() => {
                        cx.bridge.highlight_previous();
                        KeyOutcome::Suppressed
                    }
                    KeyInput::Arrow(ArrowKey::Down) if cx.bridge.is_visible() => {
                        cx.bridge.highlight_next();
                        KeyOutcome::Suppressed
                    }
                    KeyInput::Tab | KeyInput::Enter => match cx.bridge.highlighted() {
                        Some(index) => self.commit(index, cx),
                        None => KeyOutcome::PassThrough,
                    },
                    _ => KeyOutcome::PassThrough,
                }
            }
        }
    }

    /// Commits the filtered candidate at `index` into the active draft.
    pub fn commit<S: EditableSurface>(&mut self, index: usize, cx: Context<'_, S>) -> KeyOutcome {
        let Some(trigger) = self.tracker.trigger() else {
            debug!("Ignoring selection while idle");
            return KeyOutcome::Ignored;
        };
        let Some(candidate) = cx.bridge.commit(index) else {
            debug!("Ignoring selection of candidate {index}");
            return KeyOutcome::Ignored;
        };

        let tag = Placeholder {
            trigger,
            final_value: Some(candidate.value),
            display_text: format!("{trigger}{}", candidate.label),
        };
        let mut live = LiveMarkup::parse(&cx.surface.markup());
        if !live.finalize_draft(&tag) {
            live.append_node(tag.to_node());
        }
        live.append_text(&cx.settings.tag_separator);
        cx.surface.replace_markup(live.to_markup());
        cx.surface.place_caret_at_end();

        debug!("Committed tag {}", tag.display_text);
        cx.bridge.close();
        self.tracker.reset();
        KeyOutcome::Suppressed
    }

    fn start<S: EditableSurface>(&mut self, trigger: char, cx: Context<'_, S>) -> KeyOutcome {
        let draft = to_markup(&[Placeholder::draft(trigger).to_node()]);
        cx.surface.append_markup(&draft);
        cx.surface.place_caret_at_end();
        self.tracker.begin(trigger);
        cx.bridge
            .set_source(cx.registry.candidates_for(trigger, cx.settings.sorting));
        cx.bridge.filter("");
        debug!("Composing tag for trigger {trigger:?}");
        KeyOutcome::Suppressed
    }

    fn push<S: EditableSurface>(&mut self, c: char, cx: Context<'_, S>) -> KeyOutcome {
        if let Err(err) = self.tracker.append(c) {
            debug!("Dropping {c:?}: {err}");
            return KeyOutcome::Ignored;
        }
        self.write_draft(cx)
    }

    fn backspace<S: EditableSurface>(&mut self, cx: Context<'_, S>) -> KeyOutcome {
        if self.tracker.delete_last().is_some() {
            return self.write_draft(cx);
        }
        let mut live = LiveMarkup::parse(&cx.surface.markup());
        live.remove_draft();
        cx.surface.replace_markup(live.to_markup());
        cx.surface.place_caret_at_end();
        self.end(cx.bridge);
        debug!("Draft deleted");
        KeyOutcome::Suppressed
    }

    /// Space while composing: the draft becomes ordinary text.
    fn abort<S: EditableSurface>(&mut self, cx: Context<'_, S>) -> KeyOutcome {
        let mut live = LiveMarkup::parse(&cx.surface.markup());
        live.unwrap_draft();
        live.append_text(&NBSP.to_string());
        cx.surface.replace_markup(live.to_markup());
        cx.surface.place_caret_at_end();
        debug!("Tag {} abandoned", self.tracker.display_text());
        self.end(cx.bridge);
        KeyOutcome::Suppressed
    }

    fn write_draft<S: EditableSurface>(&mut self, cx: Context<'_, S>) -> KeyOutcome {
        let mut live = LiveMarkup::parse(&cx.surface.markup());
        if !live.set_draft_text(&self.tracker.display_text()) {
            debug!("Draft vanished from the surface, back to idle");
            self.end(cx.bridge);
            return KeyOutcome::Suppressed;
        }
        cx.surface.replace_markup(live.to_markup());
        cx.surface.place_caret_at_end();
        cx.bridge.filter(self.tracker.current());
        KeyOutcome::Suppressed
    }

    /// Picks up edits the host made to the draft behind our back.
    fn resync<S: EditableSurface>(&mut self, surface: &S) {
        let Some(draft) = LiveMarkup::parse(&surface.markup()).draft() else {
            return;
        };
        if draft.display_text != self.tracker.display_text()
            && self.tracker.resync(&draft.display_text).is_ok()
        {
            debug!("Resynced word to {:?}", self.tracker.current());
        }
    }

    fn end(&mut self, bridge: &mut AutocompleteBridge) {
        self.tracker.reset();
        bridge.close();
    }
}
