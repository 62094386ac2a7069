use log::{debug, info, warn};

use crate::autocomplete::AutocompleteBridge;
use crate::editing::{Context, KeyInput, KeyOutcome, TagMachine, TagState};
use crate::error::ConfigurationError;
use crate::export::{self, SanitizeOptions, Segment, sanitize};
use crate::registry::{Candidate, TagRegistry, TagSpec};
use crate::settings::{Settings, normalize_separator};
use crate::surface::EditableSurface;

/// One tag-aware editing surface and everything it needs.
///
/// Becomes active once both tags and a surface are supplied, in either
/// order. Until then every input event is ignored and every export is
/// empty.
#[derive(Debug)]
pub struct Session<S: EditableSurface> {
    settings: Settings,
    registry: Option<TagRegistry>,
    surface: Option<S>,
    machine: TagMachine,
    bridge: AutocompleteBridge,
    active: bool,
}

impl<S: EditableSurface> Default for Session<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EditableSurface> Session<S> {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(mut settings: Settings) -> Self {
        settings.tag_separator = normalize_separator(&settings.tag_separator);
        Self {
            settings,
            registry: None,
            surface: None,
            machine: TagMachine::default(),
            bridge: AutocompleteBridge::default(),
            active: false,
        }
    }

    /// Replaces the tag configuration. A rejected set leaves the previous
    /// one in effect.
    pub fn set_tags(&mut self, specs: Vec<TagSpec>) -> Result<(), ConfigurationError> {
        let registry = TagRegistry::new(specs).inspect_err(|err| {
            warn!("Rejected tag configuration: {err}");
        })?;
        debug!("Registered {} tag trigger(s)", registry.len());
        self.registry = Some(registry);
        self.activate();
        Ok(())
    }

    pub fn set_container(&mut self, mut surface: S) -> Result<(), ConfigurationError> {
        if !surface.is_attached() {
            warn!("Rejected detached surface");
            return Err(ConfigurationError::InvalidContainer);
        }
        surface.make_editable();
        if self.surface.replace(surface).is_some() {
            debug!("Surface replaced, dropping any draft in progress");
            self.machine.reset();
            self.bridge.close();
        }
        self.activate();
        Ok(())
    }

    pub fn set_sorting(&mut self, sorting: bool) {
        self.settings.sorting = sorting;
    }

    pub fn set_tag_separator(&mut self, separator: &str) {
        self.settings.tag_separator = normalize_separator(separator);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Called with each committed candidate, exactly once per commit.
    pub fn on_tag_commit(&mut self, listener: impl FnMut(&Candidate) + 'static) {
        self.bridge.set_on_select(listener);
    }

    fn activate(&mut self) {
        if self.active {
            debug!("Session already active");
            return;
        }
        if self.registry.is_some() && self.surface.is_some() {
            self.active = true;
            info!("Session active");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn handle_key(&mut self, key: KeyInput) -> KeyOutcome {
        let (true, Some(registry), Some(surface)) =
            (self.active, self.registry.as_ref(), self.surface.as_mut())
        else {
            debug!("Inactive session ignoring {key:?}");
            return KeyOutcome::Ignored;
        };

        let outcome = self.machine.handle(
            &key,
            Context {
                surface: &mut *surface,
                registry,
                settings: &self.settings,
                bridge: &mut self.bridge,
            },
        );
        if outcome == KeyOutcome::PassThrough {
            surface.default_action(&key);
        }
        if outcome != KeyOutcome::Ignored && !key.skips_reclean() {
            let cleaned = sanitize(&surface.markup(), SanitizeOptions::LIVE);
            surface.replace_markup(cleaned);
            surface.place_caret_at_end();
        }
        outcome
    }

    /// Decodes a DOM-style key name first; an empty name is ignored.
    pub fn handle_key_name(&mut self, name: &str) -> KeyOutcome {
        match KeyInput::from_key_name(name) {
            Some(key) => self.handle_key(key),
            None => {
                debug!("Ignoring empty key name");
                KeyOutcome::Ignored
            }
        }
    }

    /// Pasting is never allowed; the markup is left untouched.
    pub fn handle_paste(&mut self, text: &str) -> KeyOutcome {
        if !self.active {
            return KeyOutcome::Ignored;
        }
        warn!("Rejected paste of {} byte(s)", text.len());
        KeyOutcome::Suppressed
    }

    /// Commits the filtered candidate at `index`, as picked in the host's
    /// menu.
    pub fn select_candidate(&mut self, index: usize) -> KeyOutcome {
        let (true, Some(registry), Some(surface)) =
            (self.active, self.registry.as_ref(), self.surface.as_mut())
        else {
            return KeyOutcome::Ignored;
        };
        self.machine.commit(
            index,
            Context {
                surface,
                registry,
                settings: &self.settings,
                bridge: &mut self.bridge,
            },
        )
    }

    pub fn state(&self) -> TagState {
        self.machine.state()
    }

    pub fn composed_word(&self) -> &str {
        self.machine.tracker().current()
    }

    pub fn autocomplete(&self) -> &AutocompleteBridge {
        &self.bridge
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    fn markup(&self) -> String {
        self.surface
            .as_ref()
            .map(EditableSurface::markup)
            .unwrap_or_default()
    }

    pub fn plain_text(&self) -> String {
        export::to_plain_text(&self.markup())
    }

    pub fn html(&self) -> String {
        export::to_html(&self.markup())
    }

    pub fn segments(&self) -> Vec<Segment> {
        export::to_segments(&self.markup())
    }

    pub fn json(&self) -> serde_json::Result<String> {
        export::to_json(&self.markup())
    }
}
