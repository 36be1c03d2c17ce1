//! Parser.

use crate::{
    grammar::{Grammar, Rule, Terminal},
    lexer::{Cursor, OperandToken, OperatorToken},
    syntax::Node,
    util::display_alternatives,
};
use std::fmt;

/// Parenthesized expressions nested deeper than this are rejected.
pub const NESTING_LIMIT: usize = 256;

/// Parse one line of input into a syntax tree rooted at `program`.
pub fn parse(source: &str) -> Result<Node<'_>, ParseFailure> {
    let span = tracing::trace_span!("parse");
    let _entered = span.enter();

    let mut parser = Parser {
        grammar: Grammar::get(),
        cursor: Cursor::new(source),
        depth: 0,
    };
    let program = parser.program()?;
    tracing::trace!("accept: {}", program);
    Ok(program)
}

struct Parser<'source> {
    grammar: &'static Grammar,
    cursor: Cursor<'source>,
    depth: usize,
}

impl<'source> Parser<'source> {
    // program : /^/ <operator> <expr>+ /$/
    fn program(&mut self) -> Result<Node<'source>, ParseFailure> {
        let mut children = vec![self.operator(Rule::Program)?];
        children.extend(self.operands(Rule::Program, Terminal::End)?);
        tracing::trace!("reduce: program -> operator expr+");
        Ok(Node::Program(children))
    }

    // expr : '(' <operator> <expr>+ ')', after the opening parenthesis.
    fn nested(&mut self, open: usize) -> Result<Node<'source>, ParseFailure> {
        if self.depth >= NESTING_LIMIT {
            return Err(self.failure(
                Rule::Expr,
                open,
                Reason::TooDeep {
                    limit: NESTING_LIMIT,
                },
            ));
        }

        self.depth += 1;
        let mut children = vec![self.operator(Rule::Expr)?];
        children.extend(self.operands(Rule::Expr, Terminal::Literal(')'))?);
        self.depth -= 1;

        tracing::trace!("reduce: expr -> `(' operator expr+ `)'");
        Ok(Node::Expr(children))
    }

    fn operator(&mut self, rule: Rule) -> Result<Node<'source>, ParseFailure> {
        match self.cursor.read::<OperatorToken>() {
            Some(Ok(lexeme)) => {
                tracing::trace!("shift: {}", lexeme.token.to_terminal());
                Ok(Node::Operator(lexeme.text))
            }
            Some(Err(offset)) => Err(self.unexpected(rule, offset, self.expected_operator())),
            None => {
                let offset = self.cursor.offset();
                Err(self.unexpected(rule, offset, self.expected_operator()))
            }
        }
    }

    /// `<expr>+` followed by `close`, which is consumed but not returned.
    fn operands(
        &mut self,
        rule: Rule,
        close: Terminal,
    ) -> Result<Vec<Node<'source>>, ParseFailure> {
        let mut operands = vec![];
        loop {
            let follow = (!operands.is_empty()).then_some(close);
            match self.operand(rule, follow)? {
                Some(operand) => operands.push(operand),
                None => break Ok(operands),
            }
        }
    }

    /// Read one `<expr>`, or `follow` if given. `Ok(None)` means `follow`
    /// was found.
    fn operand(
        &mut self,
        rule: Rule,
        follow: Option<Terminal>,
    ) -> Result<Option<Node<'source>>, ParseFailure> {
        let lexeme = match self.cursor.read::<OperandToken>() {
            Some(Ok(lexeme)) => lexeme,
            Some(Err(offset)) => {
                return Err(self.unexpected(rule, offset, self.expected_operand(follow)))
            }
            None if follow == Some(Terminal::End) => {
                tracing::trace!("shift: {}", Terminal::End);
                return Ok(None);
            }
            None => {
                let offset = self.cursor.offset();
                return Err(self.unexpected(rule, offset, self.expected_operand(follow)));
            }
        };

        let terminal = lexeme.token.to_terminal();
        tracing::trace!("shift: {}", terminal);
        match lexeme.token {
            OperandToken::Number(text) => {
                tracing::trace!("reduce: expr -> number");
                Ok(Some(Node::Number(text)))
            }
            OperandToken::LParen => self.nested(lexeme.span.start).map(Some),
            OperandToken::RParen if follow == Some(terminal) => Ok(None),
            OperandToken::RParen => {
                Err(self.unexpected(rule, lexeme.span.start, self.expected_operand(follow)))
            }
        }
    }

    /// `FIRST(operator)`
    fn expected_operator(&self) -> Vec<Terminal> {
        self.grammar.first(Rule::Operator).iter().copied().collect()
    }

    /// `FIRST(expr)`, plus the terminal that may end the operand list.
    fn expected_operand(&self, follow: Option<Terminal>) -> Vec<Terminal> {
        let mut expected: Vec<Terminal> = self.grammar.first(Rule::Expr).iter().copied().collect();
        expected.extend(follow);
        expected
    }

    fn unexpected(&self, rule: Rule, offset: usize, expected: Vec<Terminal>) -> ParseFailure {
        let found = self.cursor.source()[offset..]
            .chars()
            .next()
            .map_or(Found::EndOfInput, Found::Char);
        self.failure(rule, offset, Reason::Unexpected { expected, found })
    }

    fn failure(&self, rule: Rule, offset: usize, reason: Reason) -> ParseFailure {
        ParseFailure {
            position: Position::locate(self.cursor.source(), offset),
            rule,
            reason,
        }
    }
}

/// The input did not match the grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("<stdin>:{position}: error: {reason}")]
pub struct ParseFailure {
    position: Position,
    rule: Rule,
    reason: Reason,
}

impl ParseFailure {
    /// Where the input stops matching.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The rule being matched at that point.
    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn reason(&self) -> &Reason {
        &self.reason
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Position {
    /// 1-based.
    pub line: usize,
    /// 1-based, counted in characters.
    pub column: usize,
    /// Byte offset in the input.
    pub offset: usize,
}

impl Position {
    fn locate(source: &str, offset: usize) -> Self {
        let before = &source[..offset];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        Self {
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
            offset,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    Unexpected {
        expected: Vec<Terminal>,
        found: Found,
    },
    TooDeep {
        limit: usize,
    },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unexpected { expected, found } => {
                write!(f, "expected {} at {}", display_alternatives(expected), found)
            }
            Self::TooDeep { limit } => write!(f, "nesting exceeds {} levels", limit),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Found {
    Char(char),
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(ch) => write!(f, "'{}'", ch),
            Self::EndOfInput => f.write_str("end of input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Node::*;

    fn failure(input: &str) -> ParseFailure {
        parse(input).expect_err("should not parse")
    }

    #[test]
    fn flat() {
        assert_eq!(
            parse("+ 1 2").unwrap(),
            Program(vec![Operator("+"), Number("1"), Number("2")])
        );
    }

    #[test]
    fn nested() {
        assert_eq!(
            parse("+ 1 (* 2 (- 3 4)) 5").unwrap(),
            Program(vec![
                Operator("+"),
                Number("1"),
                Expr(vec![
                    Operator("*"),
                    Number("2"),
                    Expr(vec![Operator("-"), Number("3"), Number("4")]),
                ]),
                Number("5"),
            ])
        );
    }

    #[test]
    fn whitespace_is_optional_between_tokens() {
        assert_eq!(parse("+1 2").unwrap().to_string(), "+ 1 2");
        assert_eq!(parse("  *(+1 2)3  ").unwrap().to_string(), "* (+ 1 2) 3");
    }

    #[test]
    fn minus_sign() {
        assert_eq!(
            parse("-1 2").unwrap(),
            Program(vec![Operator("-"), Number("1"), Number("2")])
        );
        assert_eq!(
            parse("- -1 -2").unwrap(),
            Program(vec![Operator("-"), Number("-1"), Number("-2")])
        );
        assert_eq!(
            parse("+ 1-2").unwrap(),
            Program(vec![Operator("+"), Number("1"), Number("-2")])
        );
    }

    #[test]
    fn single_operand() {
        assert_eq!(
            parse("(+ 1)").map_err(|e| e.rule()),
            Err(Rule::Program),
            "a program does not start with a parenthesis"
        );
        assert_eq!(
            parse("+ (- 1)").unwrap(),
            Program(vec![Operator("+"), Expr(vec![Operator("-"), Number("1")])])
        );
    }

    #[test]
    fn unknown_operator() {
        let err = failure("% 1 2");
        assert_eq!(err.rule(), Rule::Program);
        assert_eq!(
            err.position(),
            Position {
                line: 1,
                column: 1,
                offset: 0
            }
        );
        assert_eq!(
            err.to_string(),
            "<stdin>:1:1: error: expected '+', '-', '*' or '/' at '%'"
        );
    }

    #[test]
    fn not_an_expression() {
        assert_eq!(
            failure("foo").to_string(),
            "<stdin>:1:1: error: expected '+', '-', '*' or '/' at 'f'"
        );
        assert_eq!(
            failure("").to_string(),
            "<stdin>:1:1: error: expected '+', '-', '*' or '/' at end of input"
        );
        assert_eq!(
            failure("42").to_string(),
            "<stdin>:1:1: error: expected '+', '-', '*' or '/' at '4'"
        );
    }

    #[test]
    fn missing_operand() {
        assert_eq!(
            failure("+").to_string(),
            "<stdin>:1:2: error: expected number or '(' at end of input"
        );
        assert_eq!(
            failure("+ ()").to_string(),
            "<stdin>:1:4: error: expected '+', '-', '*' or '/' at ')'"
        );
        let err = failure("+ 1 (*)");
        assert_eq!(err.rule(), Rule::Expr);
        assert_eq!(
            err.to_string(),
            "<stdin>:1:7: error: expected number or '(' at ')'"
        );
    }

    #[test]
    fn unbalanced_parentheses() {
        assert_eq!(
            failure("+ 1 (* 2 3").to_string(),
            "<stdin>:1:11: error: expected number, '(' or ')' at end of input"
        );
        assert_eq!(
            failure("+ 1 2)").to_string(),
            "<stdin>:1:6: error: expected number, '(' or end of input at ')'"
        );
    }

    #[test]
    fn trailing_garbage() {
        let err = failure("+ 1 2 x");
        assert_eq!(err.position().column, 7);
        assert_eq!(
            err.reason(),
            &Reason::Unexpected {
                expected: vec![Terminal::Digits, Terminal::Literal('('), Terminal::End],
                found: Found::Char('x'),
            }
        );
    }

    #[test]
    fn position_counts_lines_and_characters() {
        let err = failure("+ 1\n  (* é");
        assert_eq!(err.position().line, 2);
        assert_eq!(err.position().column, 6);
        assert_eq!(err.position().offset, 9);
    }

    #[test]
    fn nesting_limit() {
        let ok = format!("+{} 1{}", " (+ 1".repeat(NESTING_LIMIT), ")".repeat(NESTING_LIMIT));
        assert!(parse(&ok).is_ok());

        let deep = format!(
            "+{} 1{}",
            " (+ 1".repeat(NESTING_LIMIT + 1),
            ")".repeat(NESTING_LIMIT + 1)
        );
        let err = failure(&deep);
        assert_eq!(
            err.reason(),
            &Reason::TooDeep {
                limit: NESTING_LIMIT
            }
        );
        assert!(err.to_string().ends_with("error: nesting exceeds 256 levels"));
    }
}
