//! Grammar of the prefix-notation language.
//!
//! ```text
//! number   : /-?[0-9]+/ ;
//! operator : '+' | '-' | '*' | '/' ;
//! expr     : <number> | '(' <operator> <expr>+ ')' ;
//! program  : /^/ <operator> <expr>+ /$/ ;
//! ```

use crate::util::display_fn;
use indexmap::{IndexMap, IndexSet};
use std::{fmt, sync::OnceLock};

/// The nonterminal symbols. The rule that produced a syntax tree node is
/// used as the tag of that node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Rule {
    Number,
    Operator,
    Expr,
    Program,
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Operator => "operator",
            Self::Expr => "expr",
            Self::Program => "program",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Terminal {
    /// `/-?[0-9]+/`
    Digits,
    Literal(char),
    /// `/^/`, zero-width.
    Start,
    /// `/$/`
    End,
}

impl Terminal {
    /// The notation used in the grammar listing.
    pub fn pattern(&self) -> impl fmt::Display + '_ {
        display_fn(move |f| match self {
            Self::Digits => f.write_str("/-?[0-9]+/"),
            Self::Literal(ch) => write!(f, "'{}'", ch),
            Self::Start => f.write_str("/^/"),
            Self::End => f.write_str("/$/"),
        })
    }
}

/// Displays the terminal the way diagnostics refer to it.
impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digits => f.write_str("number"),
            Self::Literal(ch) => write!(f, "'{}'", ch),
            Self::Start => f.write_str("start of input"),
            Self::End => f.write_str("end of input"),
        }
    }
}

/// An element in the right-hand side of a production.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Elem {
    T(Terminal),
    N(Rule),
    /// One or more occurrences, `<rule>+`.
    Many1(Rule),
}

impl fmt::Display for Elem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::T(t) => write!(f, "{}", t.pattern()),
            Self::N(rule) => write!(f, "<{}>", rule),
            Self::Many1(rule) => write!(f, "<{}>+", rule),
        }
    }
}

#[derive(Debug)]
pub struct Grammar {
    rules: IndexMap<Rule, Vec<Vec<Elem>>>,
    first_sets: IndexMap<Rule, IndexSet<Terminal>>,
}

impl Grammar {
    /// Return the grammar instance shared by every parse.
    pub fn get() -> &'static Grammar {
        static GRAMMAR: OnceLock<Grammar> = OnceLock::new();
        GRAMMAR.get_or_init(Self::define)
    }

    fn define() -> Self {
        use Elem::*;
        use Terminal::*;

        let mut rules = IndexMap::new();
        rules.insert(Rule::Number, vec![vec![T(Digits)]]);
        rules.insert(
            Rule::Operator,
            ['+', '-', '*', '/']
                .into_iter()
                .map(|op| vec![T(Literal(op))])
                .collect(),
        );
        rules.insert(
            Rule::Expr,
            vec![
                vec![N(Rule::Number)],
                vec![
                    T(Literal('(')),
                    N(Rule::Operator),
                    Many1(Rule::Expr),
                    T(Literal(')')),
                ],
            ],
        );
        rules.insert(
            Rule::Program,
            vec![vec![T(Start), N(Rule::Operator), Many1(Rule::Expr), T(End)]],
        );

        let first_sets = first_sets(&rules);
        tracing::trace!("first sets: {:?}", first_sets);

        Self { rules, first_sets }
    }

    pub fn rules(&self) -> impl Iterator<Item = (Rule, &[Vec<Elem>])> + '_ {
        self.rules
            .iter()
            .map(|(rule, alternatives)| (*rule, &alternatives[..]))
    }

    pub fn alternatives(&self, rule: Rule) -> &[Vec<Elem>] {
        self.rules.get(&rule).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The terminals that can begin a match of `rule`.
    pub fn first(&self, rule: Rule) -> &IndexSet<Terminal> {
        &self.first_sets[&rule]
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rule, alternatives) in self.rules() {
            write!(f, "{:<8} : ", rule.name())?;
            for (i, alternative) in alternatives.iter().enumerate() {
                if i > 0 {
                    f.write_str(" | ")?;
                }
                for (j, elem) in alternative.iter().enumerate() {
                    if j > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", elem)?;
                }
            }
            writeln!(f, " ;")?;
        }
        Ok(())
    }
}

/// Compute `First(X)` for every rule, iterating until no set grows.
///
/// No rule derives the empty string, so only the leading element of each
/// alternative contributes, except for the zero-width `/^/` anchor.
fn first_sets(rules: &IndexMap<Rule, Vec<Vec<Elem>>>) -> IndexMap<Rule, IndexSet<Terminal>> {
    let mut map: IndexMap<Rule, IndexSet<Terminal>> = rules
        .keys()
        .map(|rule| (*rule, IndexSet::new()))
        .collect();

    let mut changed = true;
    while changed {
        changed = false;
        for (rule, alternatives) in rules {
            for alternative in alternatives {
                let mut added = IndexSet::new();
                for elem in alternative {
                    match elem {
                        Elem::T(Terminal::Start) => continue,
                        Elem::T(t) => {
                            added.insert(*t);
                        }
                        Elem::N(sub) | Elem::Many1(sub) => {
                            added.extend(map[sub].iter().copied());
                        }
                    }
                    break;
                }

                let superset = &mut map[rule];
                for t in added {
                    changed |= superset.insert(t);
                }
            }
        }
    }

    map
}
