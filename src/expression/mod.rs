//! Neutral representation of a minimized Boolean expression
//!
//! Whatever the minimizer produces is converted into [`MinimizedExpr`] before
//! the rest of the pipeline looks at it. The model is a small tagged variant:
//!
//! - [`MinimizedExpr::Constant`] for tautology / contradiction
//! - [`MinimizedExpr::Term`] for an expression made of a single term
//! - [`MinimizedExpr::Composite`] for terms joined by an outer connective
//!   (OR for sum-of-products, AND for product-of-sums)
//!
//! A [`Term`] is either a lone [`Literal`] or literals joined by the inner
//! connective.
//!
//! # Examples
//!
//! ```
//! use kmap_logic::expression::{Form, Literal, MinimizedExpr, Term};
//!
//! // a'b + c
//! let expr = MinimizedExpr::any_of(vec![
//!     Term::product(vec![Literal::negative("a"), Literal::positive("b")]),
//!     Term::product(vec![Literal::positive("c")]),
//! ]);
//!
//! assert_eq!(expr.terms().len(), 2);
//! assert_eq!(expr.render(Form::Sop).unwrap(), "a'b + c");
//! ```

mod display;
mod eval;
mod expand;


pub use display::format_expression;
pub use expand::{expand_term, extract_groups};

use crate::error::KmapError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Normal form of a minimized expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Form {
    /// Sum of products (OR of AND terms)
    #[default]
    #[serde(rename = "SOP")]
    Sop,
    /// Product of sums (AND of OR terms)
    #[serde(rename = "POS")]
    Pos,
}

impl Form {
    /// Wire name of the form
    pub fn as_str(&self) -> &'static str {
        match self {
            Form::Sop => "SOP",
            Form::Pos => "POS",
        }
    }

    /// Connective joining the terms of an expression in this form
    pub fn outer_connective(&self) -> Connective {
        match self {
            Form::Sop => Connective::Or,
            Form::Pos => Connective::And,
        }
    }

    /// Connective joining the literals inside one term
    pub fn inner_connective(&self) -> Connective {
        match self {
            Form::Sop => Connective::And,
            Form::Pos => Connective::Or,
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Form {
    type Err = KmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SOP" => Ok(Form::Sop),
            "POS" => Ok(Form::Pos),
            _ => Err(KmapError::InvalidForm {
                form: s.to_string(),
            }),
        }
    }
}

/// Binary connective of the expression tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    /// Conjunction
    And,
    /// Disjunction
    Or,
}

/// A variable with a polarity
///
/// `positive == false` means the variable appears complemented (`a'`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    variable: Arc<str>,
    positive: bool,
}

impl Literal {
    /// Create a literal for `variable` with the given polarity
    pub fn new(variable: impl Into<Arc<str>>, positive: bool) -> Self {
        Literal {
            variable: variable.into(),
            positive,
        }
    }

    /// Uncomplemented literal
    pub fn positive(variable: impl Into<Arc<str>>) -> Self {
        Self::new(variable, true)
    }

    /// Complemented literal
    pub fn negative(variable: impl Into<Arc<str>>) -> Self {
        Self::new(variable, false)
    }

    /// Name of the variable
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Whether the variable appears uncomplemented
    pub fn is_positive(&self) -> bool {
        self.positive
    }

    /// The same variable with the opposite polarity
    pub fn complement(&self) -> Self {
        Literal {
            variable: Arc::clone(&self.variable),
            positive: !self.positive,
        }
    }
}

/// Renders `a` or `a'`
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.positive {
            write!(f, "{}", self.variable)
        } else {
            write!(f, "{}'", self.variable)
        }
    }
}

/// One summand (SOP) or factor (POS) of a minimized expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A single literal
    Literal(Literal),
    /// Literals joined by a connective
    Composite(Connective, Vec<Literal>),
}

impl Term {
    /// Conjunction of literals; a single literal stays a [`Term::Literal`]
    pub fn product(literals: Vec<Literal>) -> Self {
        Self::joined(Connective::And, literals)
    }

    /// Disjunction of literals; a single literal stays a [`Term::Literal`]
    pub fn sum(literals: Vec<Literal>) -> Self {
        Self::joined(Connective::Or, literals)
    }

    fn joined(connective: Connective, mut literals: Vec<Literal>) -> Self {
        if literals.len() == 1 {
            Term::Literal(literals.remove(0))
        } else {
            Term::Composite(connective, literals)
        }
    }

    /// The literals of the term, in order
    pub fn literals(&self) -> &[Literal] {
        match self {
            Term::Literal(lit) => std::slice::from_ref(lit),
            Term::Composite(_, lits) => lits,
        }
    }

    /// Connective of a composite term, `None` for a lone literal
    pub fn connective(&self) -> Option<Connective> {
        match self {
            Term::Literal(_) => None,
            Term::Composite(c, _) => Some(*c),
        }
    }
}

/// A minimized Boolean function
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MinimizedExpr {
    /// Tautology (`true`) or contradiction (`false`)
    Constant(bool),
    /// A lone term
    Term(Term),
    /// Terms joined by the outer connective
    Composite(Connective, Vec<Term>),
}

impl MinimizedExpr {
    /// Disjunction of terms (sum of products)
    ///
    /// No terms yields `Constant(false)`; one term yields [`MinimizedExpr::Term`].
    pub fn any_of(terms: Vec<Term>) -> Self {
        Self::joined(Connective::Or, terms, false)
    }

    /// Conjunction of terms (product of sums)
    ///
    /// No terms yields `Constant(true)`; one term yields [`MinimizedExpr::Term`].
    pub fn all_of(terms: Vec<Term>) -> Self {
        Self::joined(Connective::And, terms, true)
    }

    fn joined(connective: Connective, mut terms: Vec<Term>, identity: bool) -> Self {
        match terms.len() {
            0 => MinimizedExpr::Constant(identity),
            1 => MinimizedExpr::Term(terms.remove(0)),
            _ => MinimizedExpr::Composite(connective, terms),
        }
    }

    /// Constant value, if the expression is a constant
    pub fn as_constant(&self) -> Option<bool> {
        match self {
            MinimizedExpr::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Top-level terms in order; empty for a constant
    pub fn terms(&self) -> &[Term] {
        match self {
            MinimizedExpr::Constant(_) => &[],
            MinimizedExpr::Term(term) => std::slice::from_ref(term),
            MinimizedExpr::Composite(_, terms) => terms,
        }
    }

    /// Render for display, see [`format_expression`]
    pub fn render(&self, form: Form) -> Result<String, KmapError> {
        format_expression(self, form)
    }
}
