//! Input stream abstraction consumed by failure capture.
//!
//! Recognizers read either characters (lexers) or tokens (parsers). Both
//! are exposed through [`IntStream`], which reports the current lookahead
//! symbol as an `i32` and its position. [`StreamKind`] is the capability
//! tag a failure snapshots at construction so rendering never has to
//! inspect the stream again.

use serde::{Deserialize, Serialize};

/// Lookahead value returned past the end of any stream.
pub const EOF: i32 = -1;

/// Token type reserved for "no valid type".
pub const INVALID_TOKEN_TYPE: i32 = 0;

/// What kind of symbols a stream yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    /// Characters; lookahead values are code points.
    Character,
    /// Tokens; lookahead values are token types.
    Symbol,
}

/// A lexed token as seen by a parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: i32,
    pub text: String,
    pub line: u32,
    pub char_position_in_line: u32,
    /// Position of this token in its stream.
    pub index: usize,
}

impl Token {
    pub fn new(token_type: i32, text: impl Into<String>, line: u32, column: u32) -> Self {
        Token {
            token_type,
            text: text.into(),
            line,
            char_position_in_line: column,
            index: 0,
        }
    }

    /// Synthesized end-of-input token positioned at `line:column`.
    pub fn eof(line: u32, column: u32, index: usize) -> Self {
        Token {
            token_type: EOF,
            text: "<EOF>".to_string(),
            line,
            char_position_in_line: column,
            index,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.token_type == EOF
    }
}

/// Read-side view of a recognizer's input.
///
/// Failure capture only reads through this trait; it never calls
/// [`IntStream::consume`].
pub trait IntStream {
    fn kind(&self) -> StreamKind;

    /// Index of the next symbol to be consumed.
    fn index(&self) -> usize;

    /// Total number of symbols.
    fn size(&self) -> usize;

    /// Symbol `i` positions ahead (1-based); `EOF` past the end, `0` for `i == 0`.
    fn la(&self, i: isize) -> i32;

    fn line(&self) -> u32;

    fn char_position_in_line(&self) -> u32;

    fn source_name(&self) -> Option<&str> {
        None
    }

    /// Token `i` positions ahead; only symbol streams carry tokens.
    fn lt(&self, _i: isize) -> Option<Token> {
        None
    }

    fn consume(&mut self);
}

/// Character stream over in-memory text.
#[derive(Debug, Clone)]
pub struct CharStream {
    data: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    source_name: Option<String>,
}

impl CharStream {
    pub fn new(text: &str) -> Self {
        CharStream {
            data: text.chars().collect(),
            pos: 0,
            line: 1,
            column: 0,
            source_name: None,
        }
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Reset to the start, then consume until `index`. Clamps at the end.
    pub fn seek(&mut self, index: usize) {
        self.pos = 0;
        self.line = 1;
        self.column = 0;
        while self.pos < index.min(self.data.len()) {
            self.consume();
        }
    }
}

impl IntStream for CharStream {
    fn kind(&self) -> StreamKind {
        StreamKind::Character
    }

    fn index(&self) -> usize {
        self.pos
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn la(&self, i: isize) -> i32 {
        if i == 0 {
            return 0;
        }
        let target = if i > 0 {
            self.pos as isize + i - 1
        } else {
            self.pos as isize + i
        };
        if target < 0 {
            return EOF;
        }
        match self.data.get(target as usize) {
            Some(c) => *c as i32,
            None => EOF,
        }
    }

    fn line(&self) -> u32 {
        self.line
    }

    fn char_position_in_line(&self) -> u32 {
        self.column
    }

    fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    fn consume(&mut self) {
        if let Some(c) = self.data.get(self.pos) {
            if *c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
            self.pos += 1;
        }
    }
}

/// Token stream over a pre-lexed buffer.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
    source_name: Option<String>,
}

impl TokenStream {
    /// Build a stream; token indices are rewritten to buffer positions.
    pub fn new(tokens: Vec<Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .enumerate()
            .map(|(i, mut t)| {
                t.index = i;
                t
            })
            .collect();
        TokenStream {
            tokens,
            pos: 0,
            source_name: None,
        }
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    pub fn seek(&mut self, index: usize) {
        self.pos = index.min(self.tokens.len());
    }

    fn eof_token(&self) -> Token {
        match self.tokens.last() {
            Some(last) => {
                let width = u32::try_from(last.text.chars().count()).unwrap_or(u32::MAX);
                Token::eof(
                    last.line,
                    last.char_position_in_line.saturating_add(width),
                    self.tokens.len(),
                )
            }
            None => Token::eof(1, 0, 0),
        }
    }
}

impl IntStream for TokenStream {
    fn kind(&self) -> StreamKind {
        StreamKind::Symbol
    }

    fn index(&self) -> usize {
        self.pos
    }

    fn size(&self) -> usize {
        self.tokens.len()
    }

    fn la(&self, i: isize) -> i32 {
        self.lt(i).map_or(INVALID_TOKEN_TYPE, |t| t.token_type)
    }

    fn line(&self) -> u32 {
        self.lt(1).map_or(1, |t| t.line)
    }

    fn char_position_in_line(&self) -> u32 {
        self.lt(1).map_or(0, |t| t.char_position_in_line)
    }

    fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    fn lt(&self, i: isize) -> Option<Token> {
        if i == 0 {
            return None;
        }
        let target = if i > 0 {
            self.pos as isize + i - 1
        } else {
            self.pos as isize + i
        };
        if target < 0 {
            return None;
        }
        Some(
            self.tokens
                .get(target as usize)
                .cloned()
                .unwrap_or_else(|| self.eof_token()),
        )
    }

    fn consume(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }
}
