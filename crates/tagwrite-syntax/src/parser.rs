//! # Parser - Building the Markup Tree
//!
//! Consumes the token stream from the [lexer](crate::lexer) and builds an
//! owned [`Node`] tree with an explicit stack of open elements. The parser
//! never fails; malformed input produces a valid (if imperfect) tree:
//!
//! - a close tag with no matching open element is ignored
//! - a close tag closes every element opened after its match
//! - elements still open at the end of input are closed there
//! - void elements (`<br>`, `<img>`, …) and `<x/>` never take children
//! - comments and declarations are dropped
//!
//! Entity references in text and attribute values are decoded here.

use crate::{
    cursor::Cursor,
    lexer::{TokenKind, lex},
    tree::{Attribute, Element, Node},
};

/// Parses a markup fragment into a list of top-level nodes.
pub fn parse(input: &str) -> Vec<Node> {
    let mut root: Vec<Node> = Vec::new();
    let mut open: Vec<Element> = Vec::new();

    for token in lex(input) {
        match token.kind {
            TokenKind::Text => {
                let text = html_escape::decode_html_entities(token.text);
                push_text(current_children(&mut root, &mut open), &text);
            }
            TokenKind::OpenTag => {
                let (element, self_closing) = parse_open_tag(token.text);
                if self_closing || element.is_void() {
                    current_children(&mut root, &mut open).push(Node::Element(element));
                } else {
                    open.push(element);
                }
            }
            TokenKind::CloseTag => {
                let name = close_tag_name(token.text);
                if let Some(depth) = open.iter().rposition(|el| el.name == name) {
                    while open.len() > depth {
                        close_top(&mut root, &mut open);
                    }
                }
            }
            TokenKind::Declaration => {}
        }
    }

    while !open.is_empty() {
        close_top(&mut root, &mut open);
    }

    root
}

fn current_children<'a>(root: &'a mut Vec<Node>, open: &'a mut [Element]) -> &'a mut Vec<Node> {
    match open.last_mut() {
        Some(element) => &mut element.children,
        None => root,
    }
}

/// Appends text, merging with a preceding text node.
fn push_text(children: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(prev)) = children.last_mut() {
        prev.push_str(text);
    } else {
        children.push(Node::Text(text.to_string()));
    }
}

fn close_top(root: &mut Vec<Node>, open: &mut Vec<Element>) {
    if let Some(element) = open.pop() {
        let parent = current_children(root, open);
        parent.push(Node::Element(element));
    }
}

fn close_tag_name(text: &str) -> String {
    text.trim_start_matches("</")
        .trim_end_matches('>')
        .trim()
        .to_ascii_lowercase()
}

fn is_name_byte(b: u8) -> bool {
    !b.is_ascii_whitespace() && b != b'>' && b != b'/' && b != b'='
}

/// Splits an open tag token into its element and a self-closing flag.
fn parse_open_tag(text: &str) -> (Element, bool) {
    let inner = text
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(text);
    let mut cur = Cursor::new(inner);
    let mut element = Element::new(cur.take_while(is_name_byte).to_ascii_lowercase());
    let mut self_closing = false;

    loop {
        cur.skip_whitespace();
        match cur.peek() {
            None => break,
            Some(b'/') => {
                cur.bump();
                cur.skip_whitespace();
                self_closing = cur.eof();
            }
            Some(_) => {
                let name = cur.take_while(is_name_byte).to_ascii_lowercase();
                if name.is_empty() {
                    // Lone `=`; skip it so the loop always advances
                    cur.bump();
                    continue;
                }
                cur.skip_whitespace();
                let value = if cur.peek() == Some(b'=') {
                    cur.bump();
                    cur.skip_whitespace();
                    read_attr_value(&mut cur)
                } else {
                    String::new()
                };
                if element.attr(&name).is_none() {
                    element.attrs.push(Attribute { name, value });
                }
            }
        }
    }

    (element, self_closing)
}

fn read_attr_value(cur: &mut Cursor<'_>) -> String {
    let raw = match cur.peek() {
        Some(quote @ (b'"' | b'\'')) => {
            cur.bump();
            let value = cur.take_while(|b| b != quote);
            cur.bump();
            value
        }
        _ => cur.take_while(|b| !b.is_ascii_whitespace() && b != b'>'),
    };
    html_escape::decode_html_entities(raw).into_owned()
}
