//! Evaluation of expressions on map cells

use super::{Connective, Literal, MinimizedExpr, Term};
use crate::encoding;
use crate::error::KmapError;
use std::sync::Arc;

impl Literal {
    fn evaluate(&self, variables: &[Arc<str>], index: u32) -> Result<bool, KmapError> {
        let position = variables
            .iter()
            .position(|v| v.as_ref() == self.variable())
            .ok_or_else(|| KmapError::UnexpectedExpression {
                message: format!("literal refers to unknown variable '{}'", self.variable()),
            })?;
        Ok(encoding::bit(index, variables.len(), position) == self.is_positive())
    }
}

impl Term {
    /// Value of the term on the cell `index`
    pub fn evaluate(&self, variables: &[Arc<str>], index: u32) -> Result<bool, KmapError> {
        match self {
            Term::Literal(lit) => lit.evaluate(variables, index),
            Term::Composite(connective, lits) => {
                let values = lits
                    .iter()
                    .map(|lit| lit.evaluate(variables, index))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(combine(*connective, values))
            }
        }
    }
}

impl MinimizedExpr {
    /// Value of the expression on the cell `index`
    ///
    /// # Examples
    ///
    /// ```
    /// use kmap_logic::expression::{Literal, MinimizedExpr, Term};
    /// use std::sync::Arc;
    ///
    /// let vars: Vec<Arc<str>> = vec!["a".into(), "b".into()];
    /// let expr = MinimizedExpr::Term(Term::product(vec![Literal::positive("a")]));
    /// assert!(expr.evaluate(&vars, 0b10).unwrap());
    /// assert!(!expr.evaluate(&vars, 0b01).unwrap());
    /// ```
    pub fn evaluate(&self, variables: &[Arc<str>], index: u32) -> Result<bool, KmapError> {
        match self {
            MinimizedExpr::Constant(value) => Ok(*value),
            MinimizedExpr::Term(term) => term.evaluate(variables, index),
            MinimizedExpr::Composite(connective, terms) => {
                let values = terms
                    .iter()
                    .map(|term| term.evaluate(variables, index))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(combine(*connective, values))
            }
        }
    }

    /// Indices of all cells where the expression is true, ascending
    pub fn true_indices(&self, variables: &[Arc<str>]) -> Result<Vec<u32>, KmapError> {
        let mut indices = Vec::new();
        for index in 0..1u32 << variables.len() {
            if self.evaluate(variables, index)? {
                indices.push(index);
            }
        }
        Ok(indices)
    }
}

fn combine(connective: Connective, values: Vec<bool>) -> bool {
    match connective {
        Connective::And => values.into_iter().all(|v| v),
        Connective::Or => values.into_iter().any(|v| v),
    }
}
