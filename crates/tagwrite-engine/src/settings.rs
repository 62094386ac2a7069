use serde::{Deserialize, Serialize};

/// Session options that can be changed at any time, independently of
/// activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Sort autocomplete candidates alphabetically (case-insensitive).
    #[serde(default = "default_true")]
    pub sorting: bool,
    /// Text appended after a committed tag. Whitespace is stored as U+00A0.
    #[serde(default = "default_tag_separator")]
    pub tag_separator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sorting: true,
            tag_separator: default_tag_separator(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_tag_separator() -> String {
    NBSP.to_string()
}

/// Non-breaking space; what a typed space becomes inside an editable surface.
pub const NBSP: char = '\u{a0}';

/// Replaces every whitespace character with a non-breaking space so the
/// separator survives serialization as `&nbsp;`.
pub fn normalize_separator(separator: &str) -> String {
    separator
        .chars()
        .map(|c| if c.is_whitespace() { NBSP } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_separator_is_a_single_space() {
        let settings = Settings::default();
        assert!(settings.sorting);
        assert_eq!(settings.tag_separator, "\u{a0}");
    }

    #[test]
    fn separator_whitespace_is_normalized() {
        assert_eq!(normalize_separator(" ,\t"), "\u{a0},\u{a0}");
        assert_eq!(normalize_separator(";"), ";");
        assert_eq!(normalize_separator(""), "");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
