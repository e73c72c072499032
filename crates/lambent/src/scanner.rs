//! Positional substring matching over an input buffer
//!
//! The scanner is the parser's only view of the source text. Matching is
//! anchored at the current offset; a failed match is a normal outcome used
//! for lookahead and leaves the offset untouched. Offsets count characters,
//! not bytes, so `λ` advances the position by one.

use crate::error::{ParseError, ParseErrorKind};

/// Anchored matcher over the source text.
#[derive(Debug, Clone)]
pub struct Scanner {
    chars: Vec<char>,
    offset: usize,
}

impl Scanner {
    /// Create a scanner positioned at the start of `input`.
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            offset: 0,
        }
    }

    /// Current character offset into the input.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the input is exhausted.
    pub fn is_done(&self) -> bool {
        self.offset >= self.chars.len()
    }

    /// The character at the current offset, if any.
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.offset).copied()
    }

    /// Attempt to match `pattern` anchored at the current offset.
    ///
    /// On success the offset advances past the match and `true` is returned;
    /// on failure the offset is unchanged. (The matched text is always the
    /// pattern itself, so no slice is returned.)
    pub fn scan(&mut self, pattern: &str) -> bool {
        let mut lookahead = self.offset;
        for expected in pattern.chars() {
            match self.chars.get(lookahead) {
                Some(&c) if c == expected => lookahead += 1,
                _ => return false,
            }
        }
        self.offset = lookahead;
        true
    }

    /// Match one or more characters satisfying `pred`, returning the matched
    /// text. Returns `None` (offset unchanged) when not even one matches.
    pub fn scan_while(&mut self, pred: impl Fn(char) -> bool) -> Option<String> {
        let start = self.offset;
        while self.peek().is_some_and(&pred) {
            self.offset += 1;
        }
        if self.offset == start {
            None
        } else {
            Some(self.chars[start..self.offset].iter().collect())
        }
    }

    /// Skip past any whitespace at the current offset.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.offset += 1;
        }
    }

    /// Everything from the current offset to the end of the input.
    pub fn remainder(&self) -> String {
        self.chars[self.offset..].iter().collect()
    }

    /// Produce a parse error positioned at the current offset.
    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.offset)
    }
}
