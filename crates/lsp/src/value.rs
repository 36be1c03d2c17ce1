//! Evaluation results.

use std::fmt;

/// The result of evaluating a node: either a number or an error.
///
/// Errors are ordinary values so that they pass through the evaluation of
/// enclosing expressions the same way numbers do.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Number(i64),
    Error(ErrorKind),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorKind {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid operator")]
    InvalidOperator,

    #[error("Invalid number")]
    InvalidNumber,
}

impl Value {
    pub const fn number(x: i64) -> Self {
        Self::Number(x)
    }

    pub const fn error(kind: ErrorKind) -> Self {
        Self::Error(kind)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(..))
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(x) => Some(*x),
            Self::Error(..) => None,
        }
    }
}

impl From<ErrorKind> for Value {
    fn from(kind: ErrorKind) -> Self {
        Self::Error(kind)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(x) => write!(f, "{}", x),
            Self::Error(kind) => write!(f, "Error: {}", kind),
        }
    }
}
