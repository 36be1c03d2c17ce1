//! Evaluation of syntax trees.

use crate::{
    syntax::Node,
    value::{ErrorKind, Value},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Operation {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operation {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            _ => None,
        }
    }
}

/// Reduce a syntax tree to a value.
///
/// Every failure is returned as a `Value::Error`; this never panics, even
/// for trees the parser would not produce.
pub fn eval(node: &Node<'_>) -> Value {
    match node {
        Node::Number(text) => number(text),
        Node::Operator(symbol) => {
            tracing::debug!("operator `{}' evaluated as a value", symbol);
            Value::error(ErrorKind::InvalidOperator)
        }
        Node::Expr(children) | Node::Program(children) => apply(children),
    }
}

fn number(text: &str) -> Value {
    match text.parse::<i64>() {
        Ok(x) => Value::number(x),
        Err(err) => {
            tracing::debug!("invalid number literal {:?}: {}", text, err);
            Value::error(ErrorKind::InvalidNumber)
        }
    }
}

/// `operator operand+`, folded from the left.
///
/// An error stops the fold: it is returned as is and the remaining
/// operands are not evaluated. A single operand is returned unchanged.
fn apply(children: &[Node<'_>]) -> Value {
    let (symbol, first, rest) = match children {
        [Node::Operator(symbol), first, rest @ ..] => (*symbol, first, rest),
        _ => {
            tracing::debug!("malformed application: {} children", children.len());
            return Value::error(ErrorKind::InvalidOperator);
        }
    };
    let operation = Operation::from_symbol(symbol);

    let mut acc = eval(first);
    for operand in rest {
        if acc.is_error() {
            break;
        }
        let rhs = eval(operand);
        let result = combine(operation, acc, rhs);
        tracing::trace!("{} {} {} => {}", symbol, acc, rhs, result);
        acc = result;
    }
    acc
}

fn combine(operation: Option<Operation>, lhs: Value, rhs: Value) -> Value {
    let (x, y) = match (lhs, rhs) {
        (Value::Error(..), _) => return lhs,
        (_, Value::Error(..)) => return rhs,
        (Value::Number(x), Value::Number(y)) => (x, y),
    };

    let result = match operation {
        Some(Operation::Add) => x.checked_add(y),
        Some(Operation::Sub) => x.checked_sub(y),
        Some(Operation::Mul) => x.checked_mul(y),
        Some(Operation::Div) if y == 0 => return Value::error(ErrorKind::DivisionByZero),
        Some(Operation::Div) => x.checked_div(y),
        None => return Value::error(ErrorKind::InvalidOperator),
    };

    // out of the i64 range
    result.map_or(Value::error(ErrorKind::InvalidNumber), Value::number)
}
