//! Expansion of terms back into the map cells they cover

use super::{MinimizedExpr, Term};
use crate::encoding;
use crate::error::KmapError;
use crate::group::ImplicantGroup;
use log::debug;
use std::sync::Arc;

/// Every index in `0..2^n` consistent with all literals of `term`
///
/// Variables missing from the term range freely, so a term without literals
/// covers the whole map. A term naming the same variable with both polarities
/// covers nothing. Indices are returned in ascending order.
///
/// # Examples
///
/// ```
/// use kmap_logic::expression::{expand_term, Literal, Term};
/// use std::sync::Arc;
///
/// let vars: Vec<Arc<str>> = vec!["a".into(), "b".into(), "c".into()];
/// let term = Term::product(vec![Literal::negative("a"), Literal::positive("c")]);
/// assert_eq!(expand_term(&term, &vars).unwrap(), vec![1, 3]);
/// ```
pub fn expand_term(term: &Term, variables: &[Arc<str>]) -> Result<Vec<u32>, KmapError> {
    let num_vars = variables.len();
    let mut required: Vec<Option<bool>> = vec![None; num_vars];

    for lit in term.literals() {
        let position = variables
            .iter()
            .position(|v| v.as_ref() == lit.variable())
            .ok_or_else(|| KmapError::UnexpectedExpression {
                message: format!("term refers to unknown variable '{}'", lit.variable()),
            })?;
        match required[position] {
            Some(bit) if bit != lit.is_positive() => return Ok(Vec::new()),
            _ => required[position] = Some(lit.is_positive()),
        }
    }

    Ok((0..1u32 << num_vars)
        .filter(|&index| {
            required.iter().enumerate().all(|(position, req)| match req {
                Some(bit) => encoding::bit(index, num_vars, position) == *bit,
                None => true,
            })
        })
        .collect())
}

/// Split a minimized expression into one implicant group per top-level term
///
/// Constants have no groups. Group order follows term order.
pub fn extract_groups(
    expr: &MinimizedExpr,
    variables: &[Arc<str>],
) -> Result<Vec<ImplicantGroup>, KmapError> {
    let groups = expr
        .terms()
        .iter()
        .map(|term| expand_term(term, variables).map(ImplicantGroup::new))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("extracted {} group(s): {:?}", groups.len(), groups);
    Ok(groups)
}
