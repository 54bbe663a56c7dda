//! Display formatting for minimized expressions
//!
//! Rendering walks the expression tree once. Complemented variables get a
//! trailing prime, products are written by juxtaposition, sums with ` + `.

use super::{Connective, Form, MinimizedExpr, Term};
use crate::error::KmapError;

/// Render a whole minimized expression in display notation
///
/// - `Constant(true)` → `"1"`, `Constant(false)` → `"0"`
/// - SOP: `a'b + cd'`
/// - POS: `(a + b') (c + d)`; factors are separated by one space and sum
///   factors are parenthesised only when there is more than one factor
///
/// Fails with [`KmapError::UnexpectedExpression`] for an empty composite or a
/// composite nesting a term with its own connective.
///
/// # Examples
///
/// ```
/// use kmap_logic::expression::{format_expression, Form, Literal, MinimizedExpr, Term};
///
/// let pos = MinimizedExpr::all_of(vec![
///     Term::sum(vec![Literal::positive("a"), Literal::negative("b")]),
///     Term::sum(vec![Literal::positive("c"), Literal::positive("d")]),
/// ]);
/// assert_eq!(format_expression(&pos, Form::Pos).unwrap(), "(a + b') (c + d)");
/// ```
pub fn format_expression(expr: &MinimizedExpr, form: Form) -> Result<String, KmapError> {
    match expr {
        MinimizedExpr::Constant(true) => Ok("1".to_string()),
        MinimizedExpr::Constant(false) => Ok("0".to_string()),
        MinimizedExpr::Term(term) => render_term(term),
        MinimizedExpr::Composite(connective, terms) => {
            if terms.is_empty() {
                return Err(unexpected("composite expression without terms"));
            }
            let rendered = terms
                .iter()
                .map(|term| {
                    if term.connective() == Some(*connective) {
                        return Err(unexpected(&format!(
                            "{:?} term nested directly inside {:?}",
                            connective, connective
                        )));
                    }
                    match (connective, term) {
                        (Connective::And, Term::Composite(Connective::Or, _)) => {
                            Ok(format!("({})", render_term(term)?))
                        }
                        _ => render_term(term),
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;

            let separator = match (connective, form) {
                (Connective::Or, _) => " + ",
                (Connective::And, Form::Pos) => " ",
                (Connective::And, Form::Sop) => "",
            };
            Ok(rendered.join(separator))
        }
    }
}

fn render_term(term: &Term) -> Result<String, KmapError> {
    match term {
        Term::Literal(lit) => Ok(lit.to_string()),
        Term::Composite(_, lits) if lits.is_empty() => {
            Err(unexpected("composite term without literals"))
        }
        Term::Composite(Connective::And, lits) => Ok(lits.iter().map(|l| l.to_string()).collect()),
        Term::Composite(Connective::Or, lits) => Ok(lits
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join(" + ")),
    }
}

fn unexpected(message: &str) -> KmapError {
    KmapError::UnexpectedExpression {
        message: message.to_string(),
    }
}
