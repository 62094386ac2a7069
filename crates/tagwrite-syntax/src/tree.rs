//! # Markup Tree
//!
//! The owned tree produced by [`parse`](crate::parse) and written back out by
//! [`to_markup`]. Text nodes hold *decoded* character data; escaping happens
//! only on the way out, so a parse → serialize → parse cycle is stable.

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// A single `name="value"` pair. Names are lower-cased by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`Element::set_attr`].
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children = vec![Node::Text(text.into())];
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Sets an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attrs.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    pub fn is_void(&self) -> bool {
        is_void_element(&self.name)
    }

    pub fn text_content(&self) -> String {
        text_content(&self.children)
    }

    /// True when the element contains no nodes at all (the CSS `:empty` rule).
    pub fn is_empty(&self) -> bool {
        self.children.iter().all(|child| match child {
            Node::Text(text) => text.is_empty(),
            Node::Element(_) => false,
        })
    }
}

impl Node {
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.text_content(),
        }
    }
}

/// Concatenated character data of all nodes, in document order.
pub fn text_content(nodes: &[Node]) -> String {
    let mut out = String::new();
    collect_text(nodes, &mut out);
    out
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

/// Serializes nodes the way a browser's `innerHTML` does: `&`, `<`, `>`
/// escaped in text, U+00A0 written as `&nbsp;`, attributes double quoted.
pub fn to_markup(nodes: &[Node]) -> String {
    let mut out = String::new();
    write_nodes(nodes, &mut out);
    out
}

fn write_nodes(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Element(element) => write_element(element, out),
        }
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for attr in &element.attrs {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(&attr.value));
        out.push('"');
    }
    out.push('>');
    if element.is_void() {
        return;
    }
    write_nodes(&element.children, out);
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

/// Escapes character data for text position.
pub fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).replace('\u{a0}', "&nbsp;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_nested_elements() {
        let nodes = vec![
            Node::Text("a ".into()),
            Node::Element(Element::new("b").with_text("bold")),
            Node::Element(Element::new("br")),
        ];
        assert_eq!(to_markup(&nodes), "a <b>bold</b><br>");
    }

    #[test]
    fn text_is_escaped_and_nbsp_encoded() {
        let nodes = vec![Node::Text("1 < 2 & 3\u{a0}".into())];
        assert_eq!(to_markup(&nodes), "1 &lt; 2 &amp; 3&nbsp;");
    }

    #[test]
    fn attributes_are_double_quoted() {
        let el = Element::new("span").with_attr("title", "say \"hi\"");
        assert_eq!(
            to_markup(&[Node::Element(el)]),
            "<span title=\"say &quot;hi&quot;\"></span>"
        );
    }

    #[test]
    fn set_attr_replaces_in_place() {
        let mut el = Element::new("span").with_attr("a", "1").with_attr("b", "2");
        el.set_attr("a", "3");
        assert_eq!(el.attr("a"), Some("3"));
        assert_eq!(el.attrs.len(), 2);
        assert_eq!(el.attrs[0].name, "a");
    }

    #[test]
    fn text_content_walks_descendants() {
        let inner = Element::new("i").with_text("b");
        let mut outer = Element::new("b");
        outer.children = vec![Node::Text("a".into()), Node::Element(inner)];
        assert_eq!(outer.text_content(), "ab");
    }

    #[test]
    fn empty_means_no_content() {
        assert!(Element::new("span").is_empty());
        assert!(Element::new("span").with_text("").is_empty());
        assert!(!Element::new("span").with_text("@").is_empty());
    }
}
