//! Implicant groups and the algebraic term each one stands for
//!
//! A group is the set of map cells covered by one term of the minimized
//! expression. Reading the group back into a term only needs the cells: a
//! variable whose bit is constant across the group contributes a literal,
//! every other variable is eliminated.

use crate::encoding;
use crate::expression::{Form, Literal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Indices covered by one term, in ascending order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImplicantGroup(Vec<u32>);

impl ImplicantGroup {
    /// Create a group, normalising the indices to ascending order without duplicates
    pub fn new(mut indices: Vec<u32>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        ImplicantGroup(indices)
    }

    /// The covered indices
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    /// Number of covered cells
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the group covers no cells
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the group covers `index`
    pub fn contains(&self, index: u32) -> bool {
        self.0.binary_search(&index).is_ok()
    }

    /// Covered indices that belong to `targets`, ascending
    ///
    /// Used to drop don't-cares when explaining a group.
    pub fn relevant(&self, targets: &BTreeSet<u32>) -> Vec<u32> {
        self.0
            .iter()
            .copied()
            .filter(|i| targets.contains(i))
            .collect()
    }

    /// Literals shared by every cell of the group, in variable order
    ///
    /// Polarity is the SOP reading: bit `1` is a plain variable, bit `0` is
    /// complemented. An empty group has no literals.
    pub fn literals(&self, variables: &[Arc<str>]) -> Vec<Literal> {
        let num_vars = variables.len();
        let Some((&first, rest)) = self.0.split_first() else {
            return Vec::new();
        };

        variables
            .iter()
            .enumerate()
            .filter_map(|(position, var)| {
                let value = encoding::bit(first, num_vars, position);
                rest.iter()
                    .all(|&i| encoding::bit(i, num_vars, position) == value)
                    .then(|| Literal::new(Arc::clone(var), value))
            })
            .collect()
    }

    /// Algebraic term for this group in the given form, see [`format_group`]
    pub fn term(&self, variables: &[Arc<str>], form: Form) -> String {
        format_group(self, variables, form)
    }
}

impl From<Vec<u32>> for ImplicantGroup {
    fn from(indices: Vec<u32>) -> Self {
        ImplicantGroup::new(indices)
    }
}

/// Derive the display term of a group
///
/// SOP terms are products written by juxtaposition (`a'b`). POS terms describe
/// where the function is 0, so every polarity flips and the literals are
/// summed inside parentheses (`(a + b')`). A group spanning the whole map has
/// no constant variable and renders as `"1"`; an empty group renders as `""`.
///
/// # Examples
///
/// ```
/// use kmap_logic::group::{format_group, ImplicantGroup};
/// use kmap_logic::expression::Form;
/// use std::sync::Arc;
///
/// let vars: Vec<Arc<str>> = vec!["a".into(), "b".into()];
/// let group = ImplicantGroup::new(vec![0]);
/// assert_eq!(format_group(&group, &vars, Form::Sop), "a'b'");
/// assert_eq!(format_group(&group, &vars, Form::Pos), "(a + b)");
/// ```
pub fn format_group(group: &ImplicantGroup, variables: &[Arc<str>], form: Form) -> String {
    if group.is_empty() {
        return String::new();
    }

    let literals = group.literals(variables);
    if literals.is_empty() {
        return "1".to_string();
    }

    match form {
        Form::Sop => literals.iter().map(|l| l.to_string()).collect(),
        Form::Pos => format!(
            "({})",
            literals
                .iter()
                .map(|l| l.complement().to_string())
                .collect::<Vec<_>>()
                .join(" + ")
        ),
    }
}
