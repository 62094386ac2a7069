use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigurationError;

/// One autocomplete option offered for a trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub label: String,
    pub value: Value,
}

impl Candidate {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Tag definition as supplied by configuration, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagSpec {
    /// The trigger, which must be a single character.
    pub tag: String,
    #[serde(default)]
    pub autocomplete: Vec<Candidate>,
}

impl TagSpec {
    pub fn new(tag: impl Into<String>, autocomplete: Vec<Candidate>) -> Self {
        Self {
            tag: tag.into(),
            autocomplete,
        }
    }
}

/// A validated tag definition.
#[derive(Debug, Clone, PartialEq)]
pub struct TagDefinition {
    pub trigger: char,
    /// Candidates in registration order.
    pub candidates: Vec<Candidate>,
}

/// Maps trigger characters to their definitions.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: HashMap<char, TagDefinition>,
}

impl TagRegistry {
    /// Validates the whole set before building anything, so a rejected set
    /// leaves no partial registry behind.
    pub fn new(specs: Vec<TagSpec>) -> Result<Self, ConfigurationError> {
        if specs.is_empty() {
            return Err(ConfigurationError::NoTags);
        }

        let mut tags = HashMap::with_capacity(specs.len());
        for spec in specs {
            let trigger = single_char(&spec.tag)
                .ok_or_else(|| ConfigurationError::InvalidTrigger { tag: spec.tag.clone() })?;
            if trigger.is_whitespace() {
                return Err(ConfigurationError::WhitespaceTrigger(trigger));
            }
            if tags.contains_key(&trigger) {
                return Err(ConfigurationError::DuplicateTrigger(trigger));
            }
            tags.insert(
                trigger,
                TagDefinition {
                    trigger,
                    candidates: spec.autocomplete,
                },
            );
        }

        Ok(Self { tags })
    }

    pub fn lookup(&self, trigger: char) -> Option<&TagDefinition> {
        self.tags.get(&trigger)
    }

    pub fn is_trigger(&self, c: char) -> bool {
        self.tags.contains_key(&c)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Candidates for `trigger`, sorted by lower-cased label when `sorting`
    /// is set (stable, so equal labels keep registration order).
    pub fn candidates_for(&self, trigger: char, sorting: bool) -> Option<Vec<Candidate>> {
        let mut candidates = self.lookup(trigger)?.candidates.clone();
        if sorting {
            sort_candidates(&mut candidates);
        }
        Some(candidates)
    }
}

pub fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by_cached_key(|c| c.label.to_lowercase());
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn people() -> TagSpec {
        TagSpec::new(
            "@",
            vec![
                Candidate::new("bob", 2),
                Candidate::new("Ann", 1),
                Candidate::new("carl", 3),
            ],
        )
    }

    fn labels(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn lookup_registered_trigger() {
        let registry = TagRegistry::new(vec![people(), TagSpec::new("#", vec![])]).unwrap();
        assert!(registry.is_trigger('@'));
        assert!(registry.is_trigger('#'));
        assert!(!registry.is_trigger('a'));
        assert_eq!(registry.lookup('@').unwrap().candidates.len(), 3);
        assert!(registry.lookup('!').is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn candidates_sorted_case_insensitively() {
        let registry = TagRegistry::new(vec![people()]).unwrap();
        let sorted = registry.candidates_for('@', true).unwrap();
        assert_eq!(labels(&sorted), vec!["Ann", "bob", "carl"]);
    }

    #[test]
    fn candidates_keep_registration_order_without_sorting() {
        let registry = TagRegistry::new(vec![people()]).unwrap();
        let unsorted = registry.candidates_for('@', false).unwrap();
        assert_eq!(labels(&unsorted), vec!["bob", "Ann", "carl"]);
    }

    #[test]
    fn sort_is_stable_for_equal_labels() {
        let mut candidates = vec![
            Candidate::new("Same", 1),
            Candidate::new("same", 2),
            Candidate::new("a", 3),
        ];
        sort_candidates(&mut candidates);
        let values: Vec<_> = candidates.iter().map(|c| c.value.clone()).collect();
        assert_eq!(values, vec![Value::from(3), Value::from(1), Value::from(2)]);
    }

    #[test]
    fn sorting_does_not_mutate_registration() {
        let registry = TagRegistry::new(vec![people()]).unwrap();
        registry.candidates_for('@', true);
        assert_eq!(labels(&registry.lookup('@').unwrap().candidates), vec!["bob", "Ann", "carl"]);
    }

    #[rstest]
    #[case(vec![], ConfigurationError::NoTags)]
    #[case(vec![TagSpec::new("", vec![])], ConfigurationError::InvalidTrigger { tag: "".into() })]
    #[case(vec![TagSpec::new("@@", vec![])], ConfigurationError::InvalidTrigger { tag: "@@".into() })]
    #[case(vec![TagSpec::new(" ", vec![])], ConfigurationError::WhitespaceTrigger(' '))]
    #[case(vec![TagSpec::new("@", vec![]), TagSpec::new("@", vec![])], ConfigurationError::DuplicateTrigger('@'))]
    fn malformed_sets_are_rejected(#[case] specs: Vec<TagSpec>, #[case] expected: ConfigurationError) {
        assert_eq!(TagRegistry::new(specs).unwrap_err(), expected);
    }

    #[test]
    fn multibyte_trigger_is_one_character() {
        let registry = TagRegistry::new(vec![TagSpec::new("§", vec![])]).unwrap();
        assert!(registry.is_trigger('§'));
    }

    #[test]
    fn spec_deserializes_from_config_shape() {
        let spec: TagSpec = serde_json::from_value(serde_json::json!({
            "tag": "@",
            "autocomplete": [{"label": "Ann", "value": 1}, {"label": "bob", "value": "b"}]
        }))
        .unwrap();
        assert_eq!(spec.tag, "@");
        assert_eq!(spec.autocomplete[1], Candidate::new("bob", "b"));
    }
}
