use serde::{Deserialize, Serialize};
use serde_json::Value;
use tagwrite_syntax::{Node, parse, text_content};

use super::sanitize::{SanitizeOptions, clean_nodes, sanitize};
use crate::placeholder::Placeholder;

/// One run of the exported content: plain text, or a committed tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// The visible text, minus the trigger for tags.
    pub plain_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<TagRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRef {
    #[serde(rename = "char")]
    pub trigger: char,
    pub value: Value,
    pub full_tag: String,
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            tag: None,
        }
    }

    pub fn tag(trigger: char, value: impl Into<Value>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            tag: Some(TagRef {
                trigger,
                value: value.into(),
                full_tag: format!("{trigger}{label}"),
            }),
            plain_text: label,
        }
    }

    /// What the segment shows on screen.
    pub fn display_text(&self) -> &str {
        match &self.tag {
            Some(tag) => &tag.full_tag,
            None => &self.plain_text,
        }
    }
}

/// Visible text with tags as their display text and non-breaking spaces
/// as plain spaces.
pub fn to_plain_text(markup: &str) -> String {
    text_content(&clean_nodes(parse(markup), SanitizeOptions::EXPORT))
}

/// Sanitized markup with `&nbsp;` written as a space.
pub fn to_html(markup: &str) -> String {
    sanitize(markup, SanitizeOptions::EXPORT)
}

/// Walks the sanitized tree left to right. Empty text runs are never
/// emitted.
pub fn to_segments(markup: &str) -> Vec<Segment> {
    clean_nodes(parse(markup), SanitizeOptions::EXPORT)
        .into_iter()
        .filter_map(|node| match node {
            Node::Text(text) if text.is_empty() => None,
            Node::Text(text) => Some(Segment::text(text)),
            Node::Element(element) => Placeholder::from_element(&element).map(tag_segment),
        })
        .collect()
}

pub fn to_json(markup: &str) -> serde_json::Result<String> {
    serde_json::to_string(&to_segments(markup))
}

fn tag_segment(tag: Placeholder) -> Segment {
    let label = tag
        .display_text
        .strip_prefix(tag.trigger)
        .unwrap_or(&tag.display_text)
        .to_string();
    Segment {
        plain_text: label,
        tag: Some(TagRef {
            trigger: tag.trigger,
            value: tag.final_value.unwrap_or(Value::Null),
            full_tag: tag.display_text,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const BOB: &str = r#"<span data-writeandtag="true" data-writeandtag-tag="@" data-writeandtag-value="2">@bob</span>"#;

    #[test]
    fn splits_text_and_tags() {
        let markup = format!("Hello {BOB}&nbsp;");
        assert_eq!(
            to_segments(&markup),
            vec![
                Segment::text("Hello "),
                Segment::tag('@', 2, "bob"),
                Segment::text(" "),
            ]
        );
    }

    #[test]
    fn json_uses_camel_case_and_char() {
        let segments = to_segments(&format!("{BOB}&nbsp;"));
        assert_eq!(
            serde_json::to_value(&segments).unwrap(),
            json!([
                {"plainText": "bob", "tag": {"char": "@", "value": 2, "fullTag": "@bob"}},
                {"plainText": " "}
            ])
        );
    }

    #[test]
    fn drafts_export_as_plain_text() {
        let markup = r#"x <span data-writeandtag="true">@bo</span>"#;
        assert_eq!(to_segments(markup), vec![Segment::text("x @bo")]);
        assert_eq!(to_plain_text(markup), "x @bo");
    }

    #[test]
    fn plain_text_matches_concatenated_segments() {
        let markup = format!("<div>a&nbsp;{BOB}</div><b>c</b>{BOB}");
        let joined: String = to_segments(&markup)
            .iter()
            .map(Segment::display_text)
            .collect();
        assert_eq!(joined, to_plain_text(&markup));
        assert_eq!(joined, "a @bobc@bob");
    }

    #[test]
    fn html_decodes_nbsp() {
        assert_eq!(
            to_html(&format!("<i>hi</i>&nbsp;{BOB}")),
            format!("hi {BOB}")
        );
    }

    #[test]
    fn empty_markup_exports_nothing() {
        assert!(to_segments("").is_empty());
        assert_eq!(to_plain_text(""), "");
        assert_eq!(to_json("").unwrap(), "[]");
    }

    #[test]
    fn string_values_survive_round_trip() {
        let segment = Segment::tag('#', "rust", "Rust");
        let json = serde_json::to_string(&segment).unwrap();
        let back: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, segment);
    }
}
