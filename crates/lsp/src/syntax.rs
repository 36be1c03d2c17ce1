//! Syntax definition.

use crate::grammar::Rule;
use std::fmt;

/// A node of the syntax tree.
///
/// Leaves borrow their text from the parsed line. `Expr` and `Program`
/// hold an `Operator` followed by one or more operand nodes; parentheses
/// are not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'source> {
    Number(&'source str),
    Operator(&'source str),
    Expr(Vec<Node<'source>>),
    Program(Vec<Node<'source>>),
}

impl<'source> Node<'source> {
    /// The grammar rule that produced this node.
    pub fn tag(&self) -> Rule {
        match self {
            Self::Number(..) => Rule::Number,
            Self::Operator(..) => Rule::Operator,
            Self::Expr(..) => Rule::Expr,
            Self::Program(..) => Rule::Program,
        }
    }

    /// The matched text, for leaves.
    pub fn text(&self) -> Option<&'source str> {
        match self {
            Self::Number(text) | Self::Operator(text) => Some(*text),
            Self::Expr(..) | Self::Program(..) => None,
        }
    }

    pub fn children(&self) -> &[Node<'source>] {
        match self {
            Self::Number(..) | Self::Operator(..) => &[],
            Self::Expr(children) | Self::Program(children) => children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.text().is_some()
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn spaced(f: &mut fmt::Formatter<'_>, children: &[Node<'_>]) -> fmt::Result {
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", child)?;
            }
            Ok(())
        }

        match self {
            Self::Number(text) | Self::Operator(text) => f.write_str(text),
            Self::Expr(children) => {
                f.write_str("(")?;
                spaced(f, children)?;
                f.write_str(")")
            }
            Self::Program(children) => spaced(f, children),
        }
    }
}
