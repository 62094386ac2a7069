//! # Lexer - Tokenizing Inline Markup
//!
//! This module breaks live markup into tokens using the [Logos] lexer
//! generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte in the input appears in exactly one token. Nothing is skipped,
//! so concatenating token texts gives back the original:
//!
//! ```
//! use tagwrite_syntax::lexer::lex;
//!
//! let input = "Hi <span data-writeandtag=\"true\">@ann</span>&nbsp;";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Grammar
//!
//! The scanner recognises four things and nothing else:
//!
//! - `<name attr="..">` → [`TokenKind::OpenTag`] (includes `<br/>` style)
//! - `</name>` → [`TokenKind::CloseTag`]
//! - `<!-- .. -->` and `<!DOCTYPE ..>` → [`TokenKind::Declaration`]
//! - any run of characters up to the next `<` → [`TokenKind::Text`]
//!
//! A `<` that does not start one of the tag forms is lexed as text. Entity
//! references stay inside text tokens; the parser decodes them.

use logos::{Lexer, Logos};

/// Token kinds produced by the Logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `<name ...>` or `<name .../>`. Quoted attribute values may contain `>`.
    #[regex(r#"<[A-Za-z]([^>"']|"[^"]*"|'[^']*')*>"#)]
    OpenTag,

    /// `</name>`
    #[regex(r"</[A-Za-z][^>]*>")]
    CloseTag,

    /// Comments and `<!...>` declarations. Dropped by the parser.
    #[token("<!", lex_declaration)]
    Declaration,

    /// Character data, entities included.
    #[regex(r"[^<]+")]
    Text,
}

/// Consumes the rest of a comment (`<!-- .. -->`) or declaration (`<!..>`).
///
/// Unterminated forms run to the end of input.
fn lex_declaration(lex: &mut Lexer<'_, TokenKind>) -> bool {
    let rest = lex.remainder();
    let consumed = if let Some(body) = rest.strip_prefix("--") {
        body.find("-->").map_or(rest.len(), |end| end + "--".len() + "-->".len())
    } else {
        rest.find('>').map_or(rest.len(), |end| end + 1)
    };
    lex.bump(consumed);
    true
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        // A stray `<` is a Logos error; it is character data
        let kind = result.unwrap_or(TokenKind::Text);
        tokens.push((Token { kind, text }, span));
    }

    tokens
}
