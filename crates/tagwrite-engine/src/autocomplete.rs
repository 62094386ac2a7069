//! Autocomplete state shared between the state machine and the host's menu.
//!
//! The host renders [`AutocompleteBridge::filtered`] and the highlighted
//! index however it likes, and reports picks back through the session.

use crate::registry::Candidate;

type SelectListener = Box<dyn FnMut(&Candidate)>;

#[derive(Default)]
pub struct AutocompleteBridge {
    source: Option<Vec<Candidate>>,
    filtered: Vec<Candidate>,
    highlighted: usize,
    on_select: Option<SelectListener>,
}

impl std::fmt::Debug for AutocompleteBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutocompleteBridge")
            .field("source", &self.source)
            .field("filtered", &self.filtered)
            .field("highlighted", &self.highlighted)
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

impl AutocompleteBridge {
    /// Replaces the candidate source. Candidates arrive already sorted if
    /// sorting is enabled. `None` closes the menu.
    pub fn set_source(&mut self, source: Option<Vec<Candidate>>) {
        self.source = source;
        self.filtered.clear();
        self.highlighted = 0;
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Case-insensitive substring match against each label.
    pub fn filter(&mut self, text: &str) -> &[Candidate] {
        let needle = text.to_lowercase();
        self.filtered = self
            .source
            .iter()
            .flatten()
            .filter(|c| c.label.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        self.highlighted = 0;
        &self.filtered
    }

    pub fn filtered(&self) -> &[Candidate] {
        &self.filtered
    }

    /// The menu is shown while there is a source and something matches.
    pub fn is_visible(&self) -> bool {
        self.source.is_some() && !self.filtered.is_empty()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.is_visible().then_some(self.highlighted)
    }

    pub fn highlight_next(&mut self) {
        if !self.filtered.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.filtered.len();
        }
    }

    pub fn highlight_previous(&mut self) {
        if !self.filtered.is_empty() {
            self.highlighted = self
                .highlighted
                .checked_sub(1)
                .unwrap_or(self.filtered.len() - 1);
        }
    }

    /// Takes the filtered candidate at `index` and notifies the listener.
    ///
    /// Returns `None` (and notifies nobody) when the menu is closed or the
    /// index is out of range.
    pub fn commit(&mut self, index: usize) -> Option<Candidate> {
        if !self.is_visible() {
            return None;
        }
        let candidate = self.filtered.get(index)?.clone();
        if let Some(listener) = self.on_select.as_mut() {
            listener(&candidate);
        }
        Some(candidate)
    }

    pub fn close(&mut self) {
        self.set_source(None);
    }

    pub fn set_on_select(&mut self, listener: impl FnMut(&Candidate) + 'static) {
        self.on_select = Some(Box::new(listener));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn bridge() -> AutocompleteBridge {
        let mut bridge = AutocompleteBridge::default();
        bridge.set_source(Some(vec![
            Candidate::new("Ann", 1),
            Candidate::new("bob", 2),
            Candidate::new("Hannah", 3),
        ]));
        bridge
    }

    fn labels(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let mut bridge = bridge();
        assert_eq!(labels(bridge.filter("")), vec!["Ann", "bob", "Hannah"]);
        assert!(bridge.is_visible());
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let mut bridge = bridge();
        assert_eq!(labels(bridge.filter("AN")), vec!["Ann", "Hannah"]);
        assert_eq!(labels(bridge.filter("b")), vec!["bob"]);
        assert!(bridge.filter("zz").is_empty());
        assert!(!bridge.is_visible());
    }

    #[test]
    fn no_source_means_no_matches() {
        let mut bridge = AutocompleteBridge::default();
        assert!(bridge.filter("").is_empty());
        assert!(!bridge.is_visible());
        assert_eq!(bridge.highlighted(), None);
    }

    #[test]
    fn highlight_wraps_both_ways() {
        let mut bridge = bridge();
        bridge.filter("");
        assert_eq!(bridge.highlighted(), Some(0));
        bridge.highlight_previous();
        assert_eq!(bridge.highlighted(), Some(2));
        bridge.highlight_next();
        assert_eq!(bridge.highlighted(), Some(0));
    }

    #[test]
    fn commit_notifies_listener_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bridge = bridge();
        let sink = Rc::clone(&seen);
        bridge.set_on_select(move |c| sink.borrow_mut().push(c.label.clone()));
        bridge.filter("b");

        assert_eq!(bridge.commit(0), Some(Candidate::new("bob", 2)));
        assert_eq!(*seen.borrow(), vec!["bob".to_string()]);
    }

    #[test]
    fn commit_out_of_range_or_closed_is_silent() {
        let seen = Rc::new(RefCell::new(0));
        let mut bridge = bridge();
        let sink = Rc::clone(&seen);
        bridge.set_on_select(move |_| *sink.borrow_mut() += 1);
        bridge.filter("");

        assert_eq!(bridge.commit(7), None);
        bridge.close();
        assert_eq!(bridge.commit(0), None);
        assert_eq!(*seen.borrow(), 0);
    }
}
