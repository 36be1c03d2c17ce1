//! Lexer implementation.
//!
//! Which tokens are valid depends on the position in the grammar: `-1 2`
//! starts with the operator `-`, while in `+ -1 2` the same characters form
//! a negative number. Each position therefore reads with its own token set,
//! and the parser picks the set when asking the [`Cursor`] for a token.

use crate::grammar::Terminal;
use logos::Logos;
use std::ops::Range;

/// Tokens accepted where the grammar expects `<operator>`.
#[derive(Debug, Copy, Clone, Logos, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum OperatorToken {
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,
}

impl OperatorToken {
    pub fn to_terminal(self) -> Terminal {
        match self {
            Self::Plus => Terminal::Literal('+'),
            Self::Minus => Terminal::Literal('-'),
            Self::Star => Terminal::Literal('*'),
            Self::Slash => Terminal::Literal('/'),
        }
    }
}

/// Tokens accepted where the grammar expects `<expr>` or a closing token.
#[derive(Debug, Copy, Clone, Logos, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum OperandToken<'source> {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[regex(r"-?[0-9]+")]
    Number(&'source str),
}

impl OperandToken<'_> {
    pub fn to_terminal(self) -> Terminal {
        match self {
            Self::LParen => Terminal::Literal('('),
            Self::RParen => Terminal::Literal(')'),
            Self::Number(..) => Terminal::Digits,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme<'source, T> {
    pub token: T,
    pub text: &'source str,
    /// Byte range in the whole input.
    pub span: Range<usize>,
}

/// Reads tokens from the input one at a time.
#[derive(Debug, Clone)]
pub struct Cursor<'source> {
    source: &'source str,
    offset: usize,
}

impl<'source> Cursor<'source> {
    pub fn new(source: &'source str) -> Self {
        Self { source, offset: 0 }
    }

    pub fn source(&self) -> &'source str {
        self.source
    }

    /// Byte offset of the first unread character.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Read the next token of kind `T`, skipping leading whitespace.
    ///
    /// Returns `None` at the end of input and `Some(Err(offset))` when the
    /// input at `offset` does not start a token of kind `T`. The cursor is
    /// left past the offending character in the latter case.
    pub fn read<T>(&mut self) -> Option<Result<Lexeme<'source, T>, usize>>
    where
        T: Logos<'source, Source = str>,
        T::Extras: Default,
    {
        let source: &'source str = self.source;
        let rest = &source[self.offset..];
        let base = self.offset;

        let mut lexer = T::lexer(rest);
        match lexer.next() {
            Some(Ok(token)) => {
                let span = lexer.span();
                let text = &rest[span.clone()];
                self.offset = base + span.end;
                Some(Ok(Lexeme {
                    token,
                    text,
                    span: base + span.start..base + span.end,
                }))
            }
            Some(Err(_)) => {
                let start = base + lexer.span().start;
                let width = source[start..].chars().next().map_or(0, char::len_utf8);
                self.offset = start + width;
                Some(Err(start))
            }
            None => {
                self.offset = source.len();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OperandToken::*;

    fn operands(input: &str) -> Vec<Result<OperandToken<'_>, usize>> {
        let mut cursor = Cursor::new(input);
        std::iter::from_fn(|| cursor.read::<OperandToken>())
            .map(|res| res.map(|lexeme| lexeme.token))
            .collect()
    }

    #[test]
    fn smoketest() {
        assert_eq!(
            operands(" ( 12 -3\t)\n007 "),
            [
                Ok(LParen),
                Ok(Number("12")),
                Ok(Number("-3")),
                Ok(RParen),
                Ok(Number("007")),
            ]
        );
    }

    #[test]
    fn minus_depends_on_position() {
        let mut cursor = Cursor::new("-1 2");
        let op = cursor.read::<OperatorToken>().unwrap().unwrap();
        assert_eq!(op.token, OperatorToken::Minus);
        assert_eq!(op.text, "-");
        assert_eq!(op.span, 0..1);

        let num = cursor.read::<OperandToken>().unwrap().unwrap();
        assert_eq!(num.token, Number("1"));
        assert_eq!(num.span, 1..2);

        let mut cursor = Cursor::new("-1 2");
        let num = cursor.read::<OperandToken>().unwrap().unwrap();
        assert_eq!(num.token, Number("-1"));
    }

    #[test]
    fn error_offset_skips_whitespace() {
        let mut cursor = Cursor::new("   foo");
        assert_eq!(cursor.read::<OperatorToken>(), Some(Err(3)));

        let mut cursor = Cursor::new("  + ");
        assert!(cursor.read::<OperandToken>().unwrap().is_err());
    }

    #[test]
    fn end_of_input() {
        let mut cursor = Cursor::new("7   ");
        assert!(cursor.read::<OperandToken>().is_some());
        assert_eq!(cursor.read::<OperandToken>(), None);
        assert_eq!(cursor.offset(), 4);
    }
}
