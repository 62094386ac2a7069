/// A byte cursor over the inside of a single tag token.
///
/// Used to pull the element name and attributes out of an
/// [`OpenTag`](crate::lexer::TokenKind::OpenTag) slice. All delimiters the
/// tag grammar cares about are ASCII, so byte stepping never splits a
/// multi-byte character at a point where a slice is taken.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances while `pred` holds and returns the consumed slice.
    pub fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.i;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.i += 1;
        }
        &self.s[start..self.i]
    }

    pub fn skip_whitespace(&mut self) {
        self.take_while(|b| b.is_ascii_whitespace());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("span");
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b's'));
        assert_eq!(cur.bump(), Some(b's'));
        assert_eq!(cur.i, 1);
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::new("");
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
    }

    #[test]
    fn take_while_stops_at_predicate() {
        let mut cur = Cursor::new("span data-x");
        assert_eq!(cur.take_while(|b| b.is_ascii_alphanumeric()), "span");
        cur.skip_whitespace();
        assert_eq!(cur.peek(), Some(b'd'));
    }

    #[test]
    fn take_while_keeps_multibyte_text_whole() {
        let mut cur = Cursor::new("héllo=");
        assert_eq!(cur.take_while(|b| b != b'='), "héllo");
        assert_eq!(cur.bump(), Some(b'='));
        assert!(cur.eof());
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::new("x");
        assert_eq!(cur.bump(), Some(b'x'));
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.bump(), None);
    }
}
