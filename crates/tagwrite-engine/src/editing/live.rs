//! Structured edits on the live markup.
//!
//! Every edit parses the surface's markup, changes the tree, and writes it
//! back whole. The active draft is the *last* draft placeholder in document
//! order; the host may have wrapped it in a `<div>`, so the search recurses.

use tagwrite_syntax::{Element, Node, parse, to_markup};

use crate::placeholder::{Placeholder, is_draft, is_finalized};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveMarkup {
    nodes: Vec<Node>,
}

impl LiveMarkup {
    pub fn parse(markup: &str) -> Self {
        Self {
            nodes: parse(markup),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn to_markup(&self) -> String {
        to_markup(&self.nodes)
    }

    pub fn append_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.nodes.last_mut() {
            Some(Node::Text(prev)) => prev.push_str(text),
            _ => self.nodes.push(Node::Text(text.to_string())),
        }
    }

    pub fn draft(&self) -> Option<Placeholder> {
        find_last_draft(&self.nodes).and_then(Placeholder::from_element)
    }

    /// Rewrites the active draft's text. Returns false when there is none.
    pub fn set_draft_text(&mut self, text: &str) -> bool {
        let text = text.to_string();
        self.replace_draft(move |mut draft| {
            draft.children = vec![Node::Text(text)];
            vec![Node::Element(draft)]
        })
    }

    pub fn remove_draft(&mut self) -> bool {
        self.replace_draft(|_| Vec::new())
    }

    /// Replaces the active draft with its own text, leaving it as literal
    /// characters in the flow.
    pub fn unwrap_draft(&mut self) -> bool {
        self.replace_draft(|draft| vec![Node::Text(draft.text_content())])
    }

    pub fn finalize_draft(&mut self, tag: &Placeholder) -> bool {
        let node = tag.to_node();
        self.replace_draft(move |_| vec![node])
    }

    fn replace_draft(&mut self, f: impl FnOnce(Element) -> Vec<Node>) -> bool {
        let mut f = Some(f);
        replace_last_draft(&mut self.nodes, &mut f)
    }

    /// The host's default deletion: the last character of the last text, or
    /// the whole last finalized tag (tags are atomic). Empty elements left
    /// behind are dropped.
    pub fn delete_backward(&mut self) {
        delete_last(&mut self.nodes);
    }

    /// The host's default insertion of typed text at the end.
    pub fn insert_text(&mut self, text: &str) {
        self.append_text(text);
    }
}

fn find_last_draft(nodes: &[Node]) -> Option<&Element> {
    nodes.iter().rev().find_map(|node| match node {
        Node::Element(el) if is_draft(el) => Some(el),
        Node::Element(el) => find_last_draft(&el.children),
        Node::Text(_) => None,
    })
}

fn replace_last_draft<F>(nodes: &mut Vec<Node>, f: &mut Option<F>) -> bool
where
    F: FnOnce(Element) -> Vec<Node>,
{
    for i in (0..nodes.len()).rev() {
        let found_here = matches!(&nodes[i], Node::Element(el) if is_draft(el));
        if found_here {
            if let Some(f) = f.take() {
                let replacement = match nodes.remove(i) {
                    Node::Element(draft) => f(draft),
                    other => vec![other],
                };
                nodes.splice(i..i, replacement);
            }
            return true;
        }
        if let Node::Element(el) = &mut nodes[i]
            && replace_last_draft(&mut el.children, f)
        {
            return true;
        }
    }
    false
}

fn delete_last(nodes: &mut Vec<Node>) -> bool {
    loop {
        if matches!(nodes.last(), Some(Node::Element(el)) if is_finalized(el)) {
            nodes.pop();
            return true;
        }
        let deleted = match nodes.last_mut() {
            None => return false,
            Some(Node::Text(text)) => text.pop().is_some(),
            Some(Node::Element(el)) => delete_last(&mut el.children),
        };
        let leftover = match nodes.last() {
            Some(Node::Text(text)) => text.is_empty(),
            Some(Node::Element(el)) => el.is_empty(),
            None => false,
        };
        if leftover {
            nodes.pop();
        }
        if deleted {
            return true;
        }
    }
}
