//! Boolean minimization behind a collaborator trait
//!
//! The rest of the crate only needs a correct minimal cover in the requested
//! normal form; it never inspects how that cover was found. [`Minimizer`] is
//! the seam, and [`EspressoMinimizer`] adapts the Espresso engine of the
//! `espresso-logic` crate to it.
//!
//! # Examples
//!
//! ```
//! use kmap_logic::expression::Form;
//! use kmap_logic::minimizer::{EspressoMinimizer, Minimizer};
//! use std::collections::BTreeSet;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), kmap_logic::KmapError> {
//! let vars: Vec<Arc<str>> = vec!["a".into(), "b".into(), "c".into()];
//! let on: BTreeSet<u32> = [4, 5, 6, 7].into_iter().collect();
//!
//! let expr = EspressoMinimizer::default().minimize(&vars, &on, &BTreeSet::new(), Form::Sop)?;
//! assert_eq!(expr.render(Form::Sop)?, "a");
//! # Ok(())
//! # }
//! ```

use crate::encoding;
use crate::error::KmapError;
use crate::expression::{Form, Literal, MinimizedExpr, Term};
use crate::kmap::{MAX_VARIABLES, MIN_VARIABLES};
use espresso_logic::cover::CubeType;
use espresso_logic::{Cover, CoverType, Minimizable};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Minimize a function given by its ON-set and don't-care set
///
/// Implementations must return a logically correct cover in `form`:
/// a disjunction of products for [`Form::Sop`], a conjunction of sums for
/// [`Form::Pos`]. Constants are returned as [`MinimizedExpr::Constant`].
pub trait Minimizer: Send + Sync {
    /// Minimize the function over `variables` (most significant first)
    ///
    /// `on_set` holds the indices where the function is 1 and `dc_set` the
    /// indices where it is unconstrained. Every other index is a zero.
    fn minimize(
        &self,
        variables: &[Arc<str>],
        on_set: &BTreeSet<u32>,
        dc_set: &BTreeSet<u32>,
        form: Form,
    ) -> Result<MinimizedExpr, KmapError>;
}

/// Which Espresso entry point to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverStrategy {
    /// Minimum number of cubes (`Minimizable::minimize_exact`)
    #[default]
    Exact,
    /// Espresso's heuristic loop (`Minimizable::minimize`), near-minimal
    Heuristic,
}

/// Configuration for the bundled minimizer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimizerConfig {
    /// Exact or heuristic minimization
    pub strategy: CoverStrategy,
}

impl MinimizerConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }
}

/// Adapter from the Espresso logic minimizer to [`Minimizer`]
///
/// Each index becomes a fully specified cube of a single-output FD cover:
/// ON-set indices as `1`, don't-cares as `-`. POS minimizes the zeros the
/// same way and complements every literal. Result cubes are ordered by their
/// lowest covered cell, literals follow variable order.
#[derive(Debug, Clone, Default)]
pub struct EspressoMinimizer {
    config: MinimizerConfig,
}

impl EspressoMinimizer {
    /// Create a minimizer with the given configuration
    pub fn new(config: MinimizerConfig) -> Self {
        EspressoMinimizer { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &MinimizerConfig {
        &self.config
    }

    /// Minimal SOP cover of `targets` as per-variable input patterns
    fn cover(
        &self,
        variables: &[Arc<str>],
        targets: &BTreeSet<u32>,
        dc_set: &BTreeSet<u32>,
    ) -> Result<Vec<Vec<Option<bool>>>, KmapError> {
        let num_vars = variables.len();
        let labels: Vec<&str> = variables.iter().map(|v| v.as_ref()).collect();
        let mut cover = Cover::with_labels(CoverType::FD, &labels, &["f"]);

        for &index in targets {
            cover.add_cube(&point(index, num_vars), &[Some(true)]);
        }
        for &index in dc_set {
            cover.add_cube(&point(index, num_vars), &[None]);
        }

        let minimized = match self.config.strategy {
            CoverStrategy::Exact => cover.minimize_exact(),
            CoverStrategy::Heuristic => cover.minimize(),
        }
        .map_err(|e| KmapError::Minimization {
            message: e.to_string(),
        })?;

        let mut cubes: Vec<Vec<Option<bool>>> = minimized
            .cubes()
            .filter(|cube| cube.cube_type() == CubeType::F)
            .map(|cube| cube.inputs().to_vec())
            .collect();
        if let Some(cube) = cubes.iter().find(|cube| cube.len() != num_vars) {
            return Err(KmapError::Minimization {
                message: format!("cube of width {} for {} variables", cube.len(), num_vars),
            });
        }
        cubes.sort_by_key(|cube| order_key(cube));
        Ok(cubes)
    }
}

impl Minimizer for EspressoMinimizer {
    fn minimize(
        &self,
        variables: &[Arc<str>],
        on_set: &BTreeSet<u32>,
        dc_set: &BTreeSet<u32>,
        form: Form,
    ) -> Result<MinimizedExpr, KmapError> {
        let num_vars = variables.len();
        if !(MIN_VARIABLES..=MAX_VARIABLES).contains(&num_vars) {
            return Err(KmapError::UnsupportedVariableCount { count: num_vars });
        }
        let size = 1u32 << num_vars;
        if let Some(&index) = on_set.iter().chain(dc_set).find(|&&i| i >= size) {
            return Err(KmapError::IndexOutOfRange { index, num_vars });
        }

        // SOP covers the ones; POS covers the zeros and flips every literal
        let (targets, polarity) = match form {
            Form::Sop => (on_set.clone(), true),
            Form::Pos => (
                (0..size)
                    .filter(|i| !on_set.contains(i) && !dc_set.contains(i))
                    .collect(),
                false,
            ),
        };

        let expr = if targets.is_empty() {
            MinimizedExpr::Constant(form == Form::Pos)
        } else {
            let cubes = self.cover(variables, &targets, dc_set)?;
            if cubes.iter().any(|cube| cube.iter().all(Option::is_none)) {
                MinimizedExpr::Constant(form == Form::Sop)
            } else {
                let terms = cubes.iter().map(|cube| {
                    let literals = literals(cube, variables, polarity);
                    match form {
                        Form::Sop => Term::product(literals),
                        Form::Pos => Term::sum(literals),
                    }
                });
                match form {
                    Form::Sop => MinimizedExpr::any_of(terms.collect()),
                    Form::Pos => MinimizedExpr::all_of(terms.collect()),
                }
            }
        };

        debug!("minimized {} over {:?}: {:?}", form, variables, expr);
        Ok(expr)
    }
}

/// Fully specified input pattern of one cell
fn point(index: u32, num_vars: usize) -> Vec<Option<bool>> {
    encoding::to_bits(index, num_vars)
        .into_iter()
        .map(Some)
        .collect()
}

/// Lowest covered cell, then the set of free variables
fn order_key(cube: &[Option<bool>]) -> (u32, u32) {
    let num_vars = cube.len();
    cube.iter()
        .enumerate()
        .fold((0, 0), |(value, mask), (position, input)| {
            let bit = 1u32 << (num_vars - 1 - position);
            match input {
                Some(true) => (value | bit, mask),
                Some(false) => (value, mask),
                None => (value, mask | bit),
            }
        })
}

/// Literals of a cube in variable order, complemented when `polarity` is false
fn literals(cube: &[Option<bool>], variables: &[Arc<str>], polarity: bool) -> Vec<Literal> {
    cube.iter()
        .zip(variables)
        .filter_map(|(input, var)| {
            input.map(|value| Literal::new(Arc::clone(var), value == polarity))
        })
        .collect()
}
