use tagwrite_syntax::{Element, Node, parse, to_markup};

use crate::placeholder::{Placeholder, is_draft, is_finalized};
use crate::settings::NBSP;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeOptions {
    /// Keep non-empty draft placeholders (the live re-clean does).
    pub keep_drafts: bool,
    /// Write non-breaking spaces as plain spaces instead of `&nbsp;`.
    pub decode_entities: bool,
}

impl SanitizeOptions {
    /// Options for cleaning the surface while the user is still typing.
    pub const LIVE: Self = Self {
        keep_drafts: true,
        decode_entities: false,
    };

    /// Options for every export view.
    pub const EXPORT: Self = Self {
        keep_drafts: false,
        decode_entities: true,
    };
}

/// Strips every element except finalized tag placeholders (and drafts, if
/// asked), unwrapping removed elements to their content and dropping
/// newlines.
///
/// Kept placeholders are rebuilt from what they mean, so stray attributes
/// and nested markup inside them disappear and a second pass is a no-op.
pub fn sanitize(markup: &str, options: SanitizeOptions) -> String {
    to_markup(&clean_nodes(parse(markup), options))
}

/// Sanitized tree, for callers that walk it instead of serializing.
pub(crate) fn clean_nodes(nodes: Vec<Node>, options: SanitizeOptions) -> Vec<Node> {
    let mut out = Vec::new();
    clean_into(nodes, options, &mut out);
    out
}

fn clean_into(nodes: Vec<Node>, options: SanitizeOptions, out: &mut Vec<Node>) {
    for node in nodes {
        match node {
            Node::Text(text) => push_text(out, &clean_text(&text, options)),
            Node::Element(element) => match kept_placeholder(&element, options) {
                Some(placeholder) => out.push(placeholder),
                None => clean_into(element.children, options, out),
            },
        }
    }
}

fn kept_placeholder(element: &Element, options: SanitizeOptions) -> Option<Node> {
    let keep = is_finalized(element) || (options.keep_drafts && is_draft(element));
    if !keep {
        return None;
    }
    let mut placeholder = Placeholder::from_element(element)?;
    placeholder.display_text = clean_text(&placeholder.display_text, options);
    if placeholder.display_text.is_empty() {
        return None;
    }
    Some(placeholder.to_node())
}

fn clean_text(text: &str, options: SanitizeOptions) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\n' | '\r'))
        .map(|c| {
            if options.decode_entities && c == NBSP {
                ' '
            } else {
                c
            }
        })
        .collect()
}

fn push_text(out: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(Node::Text(prev)) => prev.push_str(text),
        _ => out.push(Node::Text(text.to_string())),
    }
}
