//! A calculator for integer arithmetic written in prefix notation.
//!
//! A line such as `+ 1 (* 2 3)` is parsed against a fixed grammar into a
//! syntax tree, and the tree is evaluated to a number or a typed error.

pub mod eval;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod syntax;
pub mod util;
pub mod value;

pub use crate::{
    parser::ParseFailure,
    value::{ErrorKind, Value},
};

/// Parse and evaluate one line of input.
///
/// Input that does not match the grammar yields a `ParseFailure`; anything
/// that goes wrong while evaluating a well-formed line is reported in the
/// returned `Value`.
pub fn evaluate(source: &str) -> Result<Value, ParseFailure> {
    let program = parser::parse(source)?;
    Ok(eval::eval(&program))
}

/// The text printed for an evaluation result.
pub fn render(value: &Value) -> String {
    value.to_string()
}
