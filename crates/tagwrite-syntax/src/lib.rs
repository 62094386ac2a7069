//! # tagwrite-syntax
//!
//! An error-tolerant tree for the small inline-markup subset that an
//! editable surface produces: text, inline elements with attributes, line
//! breaks, and the occasional comment. Built on [Logos].
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Architecture Overview
//!
//! ```text
//! Markup → Lexer → Tokens → Parser → Vec<Node> → to_markup → Markup
//!          (Logos)          (open-element stack)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! Tokenizes into open tags, close tags, declarations and text runs. Every
//! byte lands in exactly one token.
//!
//! ### 2. Parser ([`parser`] module)
//!
//! Builds owned [`Node`]s with a stack of open elements. Malformed input
//! never fails; it produces a valid tree.
//!
//! ### 3. Tree ([`tree`] module)
//!
//! [`Element`]/[`Node`] with attribute helpers, text extraction, and a
//! serializer that escapes the way a browser's `innerHTML` does.
//!
//! ## Quick Start
//!
//! ```
//! use tagwrite_syntax::{parse, to_markup, text_content};
//!
//! let nodes = parse("Hi <b>there</b>&nbsp;");
//! assert_eq!(text_content(&nodes), "Hi there\u{a0}");
//! assert_eq!(to_markup(&nodes), "Hi <b>there</b>&nbsp;");
//! ```
//!
//! Tree walks that give elements a meaning (tag placeholders, sanitizing)
//! live in `tagwrite-engine`; this crate knows nothing about tags.

pub mod cursor;
pub mod lexer;
pub mod parser;
pub mod tree;

pub use parser::parse;
pub use tree::{Attribute, Element, Node, escape_text, text_content, to_markup};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    /// Helper to format a markup tree for snapshot testing.
    fn format_tree(nodes: &[Node]) -> String {
        let mut lines = Vec::new();
        format_nodes(nodes, 0, &mut lines);
        lines.join("\n")
    }

    fn format_nodes(nodes: &[Node], indent: usize, lines: &mut Vec<String>) {
        let prefix = "  ".repeat(indent);
        for node in nodes {
            match node {
                Node::Text(text) => lines.push(format!("{prefix}TEXT {text:?}")),
                Node::Element(el) => {
                    let attrs: Vec<String> = el
                        .attrs
                        .iter()
                        .map(|a| format!("{}={:?}", a.name, a.value))
                        .collect();
                    lines.push(format!("{prefix}ELEMENT {} [{}]", el.name, attrs.join(" ")));
                    format_nodes(&el.children, indent + 1, lines);
                }
            }
        }
    }

    #[test]
    fn snapshot_plain_text() {
        assert_snapshot!(format_tree(&parse("Hello, world!")), @r#"TEXT "Hello, world!""#);
    }

    #[test]
    fn snapshot_finalized_tag() {
        let input = r#"Hi <span data-writeandtag="true" data-writeandtag-tag="@" data-writeandtag-value="2">@bob</span>&nbsp;"#;
        assert_snapshot!(format_tree(&parse(input)), @r#"
        TEXT "Hi "
        ELEMENT span [data-writeandtag="true" data-writeandtag-tag="@" data-writeandtag-value="2"]
          TEXT "@bob"
        TEXT "\u{a0}"
        "#);
    }

    #[test]
    fn snapshot_browser_soup() {
        let input = "<div>line<br></div><div><b>bold <i>both</i></b></div>";
        assert_snapshot!(format_tree(&parse(input)), @r#"
        ELEMENT div []
          TEXT "line"
          ELEMENT br []
        ELEMENT div []
          ELEMENT b []
            TEXT "bold "
            ELEMENT i []
              TEXT "both"
        "#);
    }

    #[test]
    fn snapshot_malformed_nesting() {
        let input = "<b>a<i>b</b>c</i>d";
        assert_snapshot!(format_tree(&parse(input)), @r#"
        ELEMENT b []
          TEXT "a"
          ELEMENT i []
            TEXT "b"
        TEXT "cd"
        "#);
    }
}
