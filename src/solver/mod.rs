//! Request → minimization → groups → explanations pipeline
//!
//! [`Solver::solve`] runs the whole pipeline for one request and propagates
//! errors; [`Solver::respond`] is the boundary that turns every outcome,
//! including a panicking minimizer, into a [`Response`].
//!
//! # Examples
//!
//! ```
//! use kmap_logic::{Solver, SolveRequest};
//!
//! # fn main() -> Result<(), kmap_logic::KmapError> {
//! let solver = Solver::default();
//! let request = SolveRequest::new()
//!     .with_variables("a,b,c,d")
//!     .with_minterms([5]);
//!
//! let response = solver.solve(&request)?;
//! assert_eq!(response.solution, "a'bc'd");
//! assert_eq!(response.kmap.groups.len(), 1);
//! assert_eq!(response.kmap.groups[0].indices(), &[5]);
//! # Ok(())
//! # }
//! ```

mod request;
mod response;

pub use request::{ParsedRequest, SolveRequest};
pub use response::{
    explain_group, ErrorResponse, ExplanationStyle, KmapPayload, Response, SolveResponse,
};

use crate::error::KmapError;
use crate::expression::{extract_groups, format_expression, Form, MinimizedExpr};
use crate::group::format_group;
use crate::kmap::KarnaughMap;
use crate::minimizer::{EspressoMinimizer, Minimizer};
use crate::KmapConfig;
use log::debug;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Solves Karnaugh map requests
///
/// Holds no per-request state, so one solver can be shared between threads.
#[derive(Debug, Clone)]
pub struct Solver<M = EspressoMinimizer> {
    config: KmapConfig,
    minimizer: M,
}

impl Solver<EspressoMinimizer> {
    /// Solver using the bundled minimizer configured from `config`
    pub fn new(config: KmapConfig) -> Self {
        let minimizer = EspressoMinimizer::new(config.minimizer.clone());
        Solver { config, minimizer }
    }
}

impl Default for Solver<EspressoMinimizer> {
    fn default() -> Self {
        Self::new(KmapConfig::default())
    }
}

impl<M: Minimizer> Solver<M> {
    /// Solver using a custom minimizer
    pub fn with_minimizer(config: KmapConfig, minimizer: M) -> Self {
        Solver { config, minimizer }
    }

    /// Configuration the solver was built with
    pub fn config(&self) -> &KmapConfig {
        &self.config
    }

    /// Minimizer producing the covers
    pub fn minimizer(&self) -> &M {
        &self.minimizer
    }

    /// Validate and solve a raw request
    pub fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, KmapError> {
        let parsed = request.parse(&self.config)?;
        self.solve_parsed(&parsed)
    }

    /// Solve an already validated request
    pub fn solve_parsed(&self, request: &ParsedRequest) -> Result<SolveResponse, KmapError> {
        let variables = &request.variables;
        let form = request.form;

        if request.on_set.is_empty() && request.dc_set.is_empty() {
            debug!("empty function over {:?}, skipping minimization", variables);
            return Ok(SolveResponse {
                solution: "0".to_string(),
                kmap: KmapPayload {
                    grid: KarnaughMap::empty(variables, &request.output_name)?,
                    groups: Vec::new(),
                    explanations: Vec::new(),
                    form_type: form,
                },
            });
        }

        let solution_expr = self
            .minimizer
            .minimize(variables, &request.on_set, &request.dc_set, form)?;
        check_cover(&solution_expr, variables, request)?;

        // Groups always come from an SOP cover: of the ones for SOP, of the zeros for POS
        let (group_expr, targets) = match form {
            Form::Sop => (solution_expr.clone(), request.on_set.clone()),
            Form::Pos => {
                let maxterms = request.maxterms();
                let zeros_expr = self
                    .minimizer
                    .minimize(variables, &maxterms, &request.dc_set, Form::Sop)?;
                (zeros_expr, maxterms)
            }
        };

        let groups = extract_groups(&group_expr, variables)?;

        let mut explanations = Vec::with_capacity(groups.len());
        for group in &groups {
            let relevant = group.relevant(&targets);
            if relevant.is_empty() {
                debug!("group {:?} covers only don't-cares", group.indices());
                continue;
            }
            let term = format_group(group, variables, form);
            explanations.push(explain_group(
                &relevant,
                &term,
                form,
                self.config.explanation_style,
            ));
        }

        let solution = format_expression(&solution_expr, form)?;
        debug!("solution {} with {} group(s)", solution, groups.len());

        Ok(SolveResponse {
            solution,
            kmap: KmapPayload {
                grid: KarnaughMap::build(
                    variables,
                    &request.on_set,
                    &request.dc_set,
                    &request.output_name,
                )?,
                groups,
                explanations,
                form_type: form,
            },
        })
    }

    /// Solve a request and package the outcome
    ///
    /// Never panics: a panic inside the minimizer is reported as an internal
    /// error.
    pub fn respond(&self, request: &SolveRequest) -> Response {
        match panic::catch_unwind(AssertUnwindSafe(|| self.solve(request))) {
            Ok(result) => result.into(),
            Err(payload) => {
                let detail = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "minimizer panicked".to_string());
                Response::Error(ErrorResponse::internal(&detail))
            }
        }
    }
}

/// Reject a cover that disagrees with the request on a specified cell
fn check_cover(
    expr: &MinimizedExpr,
    variables: &[Arc<str>],
    request: &ParsedRequest,
) -> Result<(), KmapError> {
    let ones = expr.true_indices(variables)?;
    for index in 0..1u32 << variables.len() {
        if request.dc_set.contains(&index) {
            continue;
        }
        let expected = request.on_set.contains(&index);
        if ones.binary_search(&index).is_ok() != expected {
            return Err(KmapError::Minimization {
                message: format!(
                    "cover gives {} on cell {}, expected {}",
                    !expected, index, expected
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kmap::CellValue;
    use std::collections::BTreeSet;

    fn solve(request: SolveRequest) -> SolveResponse {
        Solver::default().solve(&request).unwrap()
    }

    #[test]
    fn test_empty_function_short_circuits() {
        for vars in ["a,b", "a,b,c", "a,b,c,d"] {
            for form in [Form::Sop, Form::Pos] {
                let response = solve(SolveRequest::new().with_variables(vars).with_form(form));
                assert_eq!(response.solution, "0");
                assert!(response.kmap.groups.is_empty());
                assert!(response.kmap.explanations.is_empty());
                assert_eq!(response.kmap.form_type, form);
                assert!(response
                    .kmap
                    .grid
                    .cells()
                    .iter()
                    .flatten()
                    .all(|&c| c == CellValue::Zero));
            }
        }
    }

    #[test]
    fn test_all_ones_is_tautology() {
        let response = solve(
            SolveRequest::new()
                .with_variables("a,b,c")
                .with_minterms(0..8),
        );
        assert_eq!(response.solution, "1");
        assert!(response.kmap.groups.is_empty());
        assert!(response.kmap.explanations.is_empty());
    }

    #[test]
    fn test_single_minterm() {
        let response = solve(SolveRequest::new().with_variables("a,b,c,d").with_minterms([5]));
        assert_eq!(response.solution, "a'bc'd");
        assert_eq!(response.kmap.groups.len(), 1);
        assert_eq!(response.kmap.groups[0].indices(), &[5]);
        assert_eq!(response.kmap.explanations.len(), 1);
        assert!(response.kmap.explanations[0].contains("[5]"));
        assert!(response.kmap.explanations[0].contains("a'bc'd"));
    }

    #[test]
    fn test_pos_groups_cover_zeros() {
        // f(a,b,c) = Σm(5,6,7) = a (b + c)
        let response = solve(
            SolveRequest::new()
                .with_variables("a,b,c")
                .with_minterms([5, 6, 7])
                .with_form(Form::Pos),
        );
        assert_eq!(response.solution, "a (b + c)");
        let groups: Vec<&[u32]> = response.kmap.groups.iter().map(|g| g.indices()).collect();
        assert_eq!(groups, vec![&[0, 1, 2, 3][..], &[0, 4][..]]);
        assert_eq!(
            response.kmap.explanations,
            vec![
                "A group is formed around the 0s at positions [0, 1, 2, 3]. This simplifies to the term (a).",
                "A group is formed around the 0s at positions [0, 4]. This simplifies to the term (b + c).",
            ]
        );
    }

    #[test]
    fn test_dont_cares_are_left_out_of_explanations() {
        let response = solve(
            SolveRequest::new()
                .with_variables("a,b")
                .with_minterms([3])
                .with_dontcares([1]),
        );
        assert_eq!(response.solution, "b");
        assert_eq!(response.kmap.groups[0].indices(), &[1, 3]);
        assert!(response.kmap.explanations[0].contains("positions [3]."));
        assert_eq!(response.kmap.grid.cell(0, 1), CellValue::DontCare);
    }

    #[test]
    fn test_html_explanations() {
        let config = KmapConfig {
            explanation_style: ExplanationStyle::Html,
            ..Default::default()
        };
        let response = Solver::new(config)
            .solve(&SolveRequest::new().with_variables("a,b").with_minterms([2, 3]))
            .unwrap();
        assert_eq!(
            response.kmap.explanations,
            vec!["A group is formed around the 1s at positions <strong>[2, 3]</strong>. This simplifies to the term <code>a</code>."]
        );
    }

    /// Hands back a canned cover, including a group of don't-cares only
    struct Canned(MinimizedExpr);

    impl Minimizer for Canned {
        fn minimize(
            &self,
            _: &[Arc<str>],
            _: &BTreeSet<u32>,
            _: &BTreeSet<u32>,
            _: Form,
        ) -> Result<MinimizedExpr, KmapError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_dont_care_only_group_is_not_explained() {
        use crate::expression::{Literal, Term};

        let expr = MinimizedExpr::any_of(vec![
            Term::product(vec![Literal::positive("a")]),
            Term::product(vec![Literal::negative("a"), Literal::negative("b")]),
        ]);
        let solver = Solver::with_minimizer(KmapConfig::default(), Canned(expr));
        let response = solver
            .solve(
                &SolveRequest::new()
                    .with_variables("a,b")
                    .with_minterms([2, 3])
                    .with_dontcares([0]),
            )
            .unwrap();
        assert_eq!(response.solution, "a + a'b'");
        assert_eq!(response.kmap.groups.len(), 2);
        assert_eq!(response.kmap.explanations.len(), 1);
    }

    struct Panicking;

    impl Minimizer for Panicking {
        fn minimize(
            &self,
            _: &[Arc<str>],
            _: &BTreeSet<u32>,
            _: &BTreeSet<u32>,
            _: Form,
        ) -> Result<MinimizedExpr, KmapError> {
            panic!("cover table exhausted")
        }
    }

    #[test_log::test]
    fn test_respond_contains_panics() {
        let solver = Solver::with_minimizer(KmapConfig::default(), Panicking);
        let response = solver.respond(&SolveRequest::new().with_minterms([1]));
        assert_eq!(response.status_code(), 500);
        let Response::Error(err) = response else {
            panic!("expected error response");
        };
        assert!(err.error.contains("cover table exhausted"));
    }

    #[test]
    fn test_respond_reports_unexpected_shape() {
        let solver = Solver::with_minimizer(
            KmapConfig::default(),
            Canned(MinimizedExpr::Composite(crate::expression::Connective::Or, vec![])),
        );
        let response = solver.respond(&SolveRequest::new().with_minterms([1]));
        assert_eq!(response.status_code(), 500);
    }

    #[test]
    fn test_wrong_cover_is_internal_error() {
        use crate::expression::{Literal, Term};

        // b covers cell 1, which is a zero of f = Σm(3)
        let expr = MinimizedExpr::Term(Term::product(vec![Literal::positive("b")]));
        let solver = Solver::with_minimizer(KmapConfig::default(), Canned(expr));
        let request = SolveRequest::new().with_variables("a,b").with_minterms([3]);
        let err = solver.solve(&request).unwrap_err();
        assert!(matches!(err, KmapError::Minimization { .. }));
        assert!(err.to_string().contains("cell 1"));
        assert_eq!(solver.respond(&request).status_code(), 500);
    }

    #[test]
    fn test_cover_may_claim_dont_cares() {
        use crate::expression::{Literal, Term};

        let config = KmapConfig::default();
        let request = SolveRequest::new()
            .with_variables("a,b")
            .with_minterms([3])
            .with_dontcares([1])
            .parse(&config)
            .unwrap();
        let vars = request.variables.clone();
        let b = MinimizedExpr::Term(Term::product(vec![Literal::positive("b")]));
        assert!(check_cover(&b, &vars, &request).is_ok());
        assert!(check_cover(&MinimizedExpr::Constant(false), &vars, &request).is_err());
    }
}
