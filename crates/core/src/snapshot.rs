//! Input state captured at the moment a recognizer gives up.

use crate::error::FailureError;
use crate::stream::{IntStream, StreamKind, Token, EOF};

/// Fields shared by every [`crate::RecognitionFailure`] variant.
///
/// Built once from a live stream by [`FailureContext::capture`] and never
/// refreshed afterwards: the recognizer may keep consuming, or drop, the
/// stream it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureContext {
    pub stream_kind: StreamKind,
    /// Stream index of the offending symbol.
    pub index: usize,
    /// Offending token; symbol streams only.
    pub token: Option<Token>,
    /// Offending code point (or `EOF`); character streams only.
    pub character: Option<i32>,
    pub line: u32,
    pub char_position_in_line: u32,
    /// Set when the position was inferred rather than read off the symbol.
    pub approximate_line_info: bool,
    pub source_name: Option<String>,
}

impl FailureContext {
    /// Snapshot the lookahead symbol and position of `input`.
    ///
    /// Reads only; the stream is not advanced.
    pub fn capture(input: Option<&dyn IntStream>) -> Result<Self, FailureError> {
        let input = input.ok_or_else(|| FailureError::invalid_argument("input"))?;
        let source_name = input.source_name().map(str::to_owned);
        let index = input.index();

        let ctx = match input.kind() {
            StreamKind::Symbol => {
                let token = input.lt(1);
                let (line, column) = token
                    .as_ref()
                    .map_or((input.line(), input.char_position_in_line()), |t| {
                        (t.line, t.char_position_in_line)
                    });
                let approximate_line_info = token.as_ref().map_or(true, Token::is_eof);
                FailureContext {
                    stream_kind: StreamKind::Symbol,
                    index,
                    token,
                    character: None,
                    line,
                    char_position_in_line: column,
                    approximate_line_info,
                    source_name,
                }
            }
            StreamKind::Character => FailureContext {
                stream_kind: StreamKind::Character,
                index,
                token: None,
                character: Some(input.la(1)),
                line: input.line(),
                char_position_in_line: input.char_position_in_line(),
                approximate_line_info: false,
                source_name,
            },
        };
        Ok(ctx)
    }

    /// The offending symbol as a raw integer: token type for symbol
    /// streams, code point for character streams. `EOF` when unknown.
    pub fn unexpected_type(&self) -> i32 {
        match self.stream_kind {
            StreamKind::Symbol => self.token.as_ref().map_or(EOF, |t| t.token_type),
            StreamKind::Character => self.character.unwrap_or(EOF),
        }
    }

    /// Render the offending symbol in the form its stream kind calls for.
    ///
    /// Characters are quoted; `EOF` renders as `<EOF>` and code points
    /// that are not Unicode scalar values render as U+FFFD. Token types
    /// render as plain integers.
    pub fn unexpected_display(&self) -> String {
        let unexpected = self.unexpected_type();
        match self.stream_kind {
            StreamKind::Character => format!("'{}'", char_display(unexpected)),
            StreamKind::Symbol => unexpected.to_string(),
        }
    }
}

pub(crate) fn char_display(code: i32) -> String {
    if code == EOF {
        return "<EOF>".to_string();
    }
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{CharStream, TokenStream};

    #[test]
    fn capture_requires_input() {
        let err = FailureContext::capture(None).unwrap_err();
        assert_eq!(err, FailureError::invalid_argument("input"));
    }

    #[test]
    fn capture_character_stream() {
        let mut input = CharStream::new("x\n+y").with_source_name("calc.txt");
        input.seek(2);
        let ctx = FailureContext::capture(Some(&input)).unwrap();
        assert_eq!(ctx.stream_kind, StreamKind::Character);
        assert_eq!(ctx.character, Some('+' as i32));
        assert_eq!((ctx.line, ctx.char_position_in_line), (2, 0));
        assert_eq!(ctx.index, 2);
        assert_eq!(ctx.source_name.as_deref(), Some("calc.txt"));
        assert_eq!(ctx.unexpected_display(), "'+'");
        // capture does not consume
        assert_eq!(input.index(), 2);
    }

    #[test]
    fn capture_symbol_stream() {
        let mut input = TokenStream::new(vec![
            Token::new(4, "if", 3, 2),
            Token::new(9, "(", 3, 5),
        ]);
        input.consume();
        let ctx = FailureContext::capture(Some(&input)).unwrap();
        assert_eq!(ctx.unexpected_type(), 9);
        assert_eq!(ctx.token.as_ref().map(|t| t.index), Some(1));
        assert_eq!((ctx.line, ctx.char_position_in_line), (3, 5));
        assert!(!ctx.approximate_line_info);
        assert_eq!(ctx.unexpected_display(), "9");
    }

    #[test]
    fn eof_token_marks_position_approximate() {
        let mut input = TokenStream::new(vec![Token::new(4, "if", 1, 0)]);
        input.consume();
        let ctx = FailureContext::capture(Some(&input)).unwrap();
        assert_eq!(ctx.unexpected_type(), EOF);
        assert!(ctx.approximate_line_info);
        assert_eq!(ctx.unexpected_display(), "-1");
    }

    #[test]
    fn char_display_sentinels() {
        assert_eq!(char_display(EOF), "<EOF>");
        assert_eq!(char_display(0xD800), "\u{FFFD}");
        assert_eq!(char_display(-7), "\u{FFFD}");
        assert_eq!(char_display(65), "A");
    }
}
