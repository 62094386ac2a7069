//! Tag placeholders as they live inside the markup.
//!
//! A placeholder is a `<span>` carrying [`Placeholder::MARKER`]. A draft has
//! only the marker; a finalized tag also carries its trigger and value:
//!
//! ```text
//! <span data-writeandtag="true">@bo</span>
//! <span data-writeandtag="true" data-writeandtag-tag="@" data-writeandtag-value="2">@bob</span>
//! ```
//!
//! All attribute names live here; nothing else hardcodes them.

use serde_json::Value;
use tagwrite_syntax::{Element, Node};

#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub trigger: char,
    /// Set once the tag is committed.
    pub final_value: Option<Value>,
    pub display_text: String,
}

impl Placeholder {
    pub const ELEMENT: &'static str = "span";
    pub const MARKER: &'static str = "data-writeandtag";
    pub const TAG: &'static str = "data-writeandtag-tag";
    pub const VALUE: &'static str = "data-writeandtag-value";

    pub fn draft(trigger: char) -> Self {
        Self {
            trigger,
            final_value: None,
            display_text: trigger.to_string(),
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.final_value.is_some()
    }

    /// Reads a placeholder from an element; `None` when the element is not
    /// one (wrong name, missing marker, or no text to take a trigger from).
    ///
    /// Finalized exactly when [`is_finalized`] holds; an empty trigger
    /// attribute falls back to the first character of the text.
    pub fn from_element(element: &Element) -> Option<Self> {
        if !is_placeholder(element) {
            return None;
        }
        let display_text = element.text_content();
        let tagged = element.attr(Self::TAG).and_then(|t| t.chars().next());
        let trigger = tagged.or_else(|| display_text.chars().next())?;
        let final_value = match element.attr(Self::VALUE) {
            Some(raw) if is_finalized(element) => Some(decode_value(raw)),
            _ => None,
        };
        Some(Self {
            trigger,
            final_value,
            display_text,
        })
    }

    pub fn to_element(&self) -> Element {
        let mut element = Element::new(Self::ELEMENT)
            .with_attr(Self::MARKER, "true")
            .with_text(self.display_text.clone());
        if let Some(value) = &self.final_value {
            element.set_attr(Self::TAG, self.trigger.to_string());
            element.set_attr(Self::VALUE, encode_value(value));
        }
        element
    }

    pub fn to_node(&self) -> Node {
        Node::Element(self.to_element())
    }
}

pub fn is_placeholder(element: &Element) -> bool {
    element.name == Placeholder::ELEMENT && element.attr(Placeholder::MARKER) == Some("true")
}

/// A committed placeholder: has both the trigger and value attributes.
pub fn is_finalized(element: &Element) -> bool {
    is_placeholder(element)
        && element.attr(Placeholder::TAG).is_some()
        && element.attr(Placeholder::VALUE).is_some()
}

pub fn is_draft(element: &Element) -> bool {
    is_placeholder(element) && !is_finalized(element)
}

/// Always JSON text, so strings keep their quotes and `"1"` stays a string.
fn encode_value(value: &Value) -> String {
    value.to_string()
}

/// Reverses [`encode_value`]. Text that is not JSON (a hand-written
/// `data-writeandtag-value="bob"`) is read as a plain string.
fn decode_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use tagwrite_syntax::to_markup;

    #[test]
    fn draft_renders_marker_only() {
        let node = Placeholder::draft('@').to_node();
        assert_eq!(
            to_markup(&[node]),
            r#"<span data-writeandtag="true">@</span>"#
        );
    }

    #[test]
    fn finalized_renders_trigger_and_value() {
        let tag = Placeholder {
            trigger: '@',
            final_value: Some(json!(2)),
            display_text: "@bob".into(),
        };
        assert_eq!(
            to_markup(&[tag.to_node()]),
            r#"<span data-writeandtag="true" data-writeandtag-tag="@" data-writeandtag-value="2">@bob</span>"#
        );
    }

    #[test]
    fn element_round_trip() {
        let tag = Placeholder {
            trigger: '#',
            final_value: Some(json!("rust")),
            display_text: "#Rust".into(),
        };
        assert_eq!(Placeholder::from_element(&tag.to_element()), Some(tag));
    }

    #[rstest]
    #[case(json!("1"))]
    #[case(json!("true"))]
    #[case(json!("[1]"))]
    #[case(json!("null"))]
    #[case(json!(null))]
    #[case(json!({"id": "7"}))]
    fn values_keep_their_type_through_markup(#[case] value: Value) {
        let tag = Placeholder {
            trigger: '@',
            final_value: Some(value),
            display_text: "@x".into(),
        };
        let reparsed = tagwrite_syntax::parse(&to_markup(&[tag.to_node()]));
        let [Node::Element(element)] = reparsed.as_slice() else {
            panic!("expected one element");
        };
        assert_eq!(Placeholder::from_element(element), Some(tag));
    }

    #[test]
    fn string_values_are_quoted_in_markup() {
        let tag = Placeholder {
            trigger: '#',
            final_value: Some(json!("1")),
            display_text: "#one".into(),
        };
        assert_eq!(
            to_markup(&[tag.to_node()]),
            r##"<span data-writeandtag="true" data-writeandtag-tag="#" data-writeandtag-value="&quot;1&quot;">#one</span>"##
        );
    }

    #[test]
    fn empty_trigger_attribute_still_finalized() {
        let element = Element::new("span")
            .with_attr(Placeholder::MARKER, "true")
            .with_attr(Placeholder::TAG, "")
            .with_attr(Placeholder::VALUE, "1")
            .with_text("@a");
        assert!(is_finalized(&element));
        let read = Placeholder::from_element(&element).unwrap();
        assert_eq!(read.trigger, '@');
        assert_eq!(read.final_value, Some(json!(1)));
    }

    #[test]
    fn plain_span_is_not_a_placeholder() {
        let span = Element::new("span").with_text("@x");
        assert!(!is_placeholder(&span));
        assert_eq!(Placeholder::from_element(&span), None);
    }

    #[test]
    fn draft_takes_trigger_from_text() {
        let draft = Placeholder::draft('@').to_element();
        assert!(is_draft(&draft));
        assert!(!is_finalized(&draft));
        let read = Placeholder::from_element(&draft).unwrap();
        assert_eq!(read.trigger, '@');
        assert!(!read.is_finalized());
    }

    #[test]
    fn empty_draft_has_no_trigger() {
        let empty = Element::new("span").with_attr(Placeholder::MARKER, "true");
        assert_eq!(Placeholder::from_element(&empty), None);
    }

    #[rstest]
    #[case("1", json!(1))]
    #[case("-2.5", json!(-2.5))]
    #[case(r#""1""#, json!("1"))]
    #[case("01", json!("01"))]
    #[case("true", json!(true))]
    #[case("null", Value::Null)]
    #[case("bob", json!("bob"))]
    #[case(r#"{"id":3}"#, json!({"id": 3}))]
    #[case("[1,2]", json!([1, 2]))]
    #[case("{nope", json!("{nope"))]
    fn decodes_attribute_values(#[case] raw: &str, #[case] expected: Value) {
        assert_eq!(decode_value(raw), expected);
    }
}
