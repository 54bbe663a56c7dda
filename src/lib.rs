//! # Karnaugh Map Logic
//!
//! This crate turns a Boolean function of 2 to 4 variables, given as a set of
//! minterms and don't-cares, into a minimized sum-of-products or
//! product-of-sums expression together with the Karnaugh map grouping that
//! justifies it.
//!
//! ## Overview
//!
//! The pipeline for one request:
//!
//! 1. Minimize the function (any [`Minimizer`]; [`EspressoMinimizer`] ships with the crate)
//! 2. Split the minimized expression into its terms and expand each term back
//!    into the map cells it covers (an [`ImplicantGroup`])
//! 3. Read each group back into an algebraic term and explain it in a sentence
//! 4. Render the solution string and lay the truth table out on a Gray-coded map
//!
//! ## Solving a Request
//!
//! ```
//! use kmap_logic::{Form, SolveRequest, Solver};
//!
//! # fn main() -> Result<(), kmap_logic::KmapError> {
//! let solver = Solver::default();
//!
//! let request = SolveRequest::new()
//!     .with_variables("a,b,c,d")
//!     .with_minterms([1, 3, 7, 11, 15])
//!     .with_dontcares([0, 2]);
//!
//! let response = solver.solve(&request)?;
//! assert_eq!(response.solution, "a'b' + cd");
//!
//! for explanation in &response.kmap.explanations {
//!     println!("{}", explanation);
//! }
//!
//! // Product of sums uses the zeros of the map
//! let response = solver.solve(&request.with_form(Form::Pos))?;
//! println!("{}", response.solution);
//! # Ok(())
//! # }
//! ```
//!
//! ## Wire Format
//!
//! Requests and responses are plain serde types. [`Solver::respond`] never
//! fails; it reports errors as `{"error": ...}` with a status code:
//!
//! ```
//! use kmap_logic::{SolveRequest, Solver};
//!
//! let request: SolveRequest = serde_json::from_str(
//!     r#"{"variables": "a,b,c,d,e", "minterms": ["1"]}"#,
//! ).unwrap();
//!
//! let response = Solver::default().respond(&request);
//! assert_eq!(response.status_code(), 400);
//! assert_eq!(
//!     response.to_json().unwrap(),
//!     r#"{"error":"5 variables not supported (2-4 only)."}"#
//! );
//! ```
//!
//! ## Thread Safety
//!
//! A [`Solver`] keeps no per-request state. Share one behind an `Arc` and call
//! it from as many threads as needed.

pub mod encoding;
pub mod error;
pub mod expression;
pub mod group;
pub mod kmap;
pub mod minimizer;
pub mod solver;

pub use error::KmapError;
pub use expression::{Form, Literal, MinimizedExpr, Term};
pub use group::ImplicantGroup;
pub use kmap::{CellValue, KarnaughMap};
pub use minimizer::{CoverStrategy, EspressoMinimizer, Minimizer, MinimizerConfig};
pub use solver::{
    ErrorResponse, ExplanationStyle, KmapPayload, Response, SolveRequest, SolveResponse, Solver,
};

use serde::{Deserialize, Serialize};
use std::io::Read;

/// Configuration for the solver
///
/// Missing request fields fall back to these defaults. Can be loaded from
/// JSON; absent keys keep their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KmapConfig {
    /// Variables used when a request names none
    pub default_variables: Vec<String>,
    /// Function label used when a request gives none
    pub default_output_name: String,
    /// Form used when a request gives none
    pub default_form: Form,
    /// Markup of explanation sentences
    pub explanation_style: ExplanationStyle,
    /// Settings for the bundled minimizer
    pub minimizer: MinimizerConfig,
}

impl Default for KmapConfig {
    fn default() -> Self {
        KmapConfig {
            default_variables: ["a", "b", "c", "d"].map(String::from).to_vec(),
            default_output_name: "f".to_string(),
            default_form: Form::Sop,
            explanation_style: ExplanationStyle::Plain,
            minimizer: MinimizerConfig::default(),
        }
    }
}

impl KmapConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a configuration from JSON
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, KmapError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = KmapConfig::new();
        assert_eq!(config.default_variables, vec!["a", "b", "c", "d"]);
        assert_eq!(config.default_output_name, "f");
        assert_eq!(config.default_form, Form::Sop);
        assert_eq!(config.explanation_style, ExplanationStyle::Plain);
        assert_eq!(config.minimizer.strategy, CoverStrategy::Exact);
    }

    #[test]
    fn test_config_from_partial_json() {
        let json = r#"{
            "default_form": "POS",
            "explanation_style": "html",
            "minimizer": {"strategy": "heuristic"}
        }"#;
        let config = KmapConfig::from_reader(json.as_bytes()).unwrap();
        assert_eq!(config.default_form, Form::Pos);
        assert_eq!(config.explanation_style, ExplanationStyle::Html);
        assert_eq!(config.minimizer.strategy, CoverStrategy::Heuristic);
        assert_eq!(config.default_output_name, "f");
    }

    #[test]
    fn test_config_rejects_bad_json() {
        let err = KmapConfig::from_reader("{not json".as_bytes()).unwrap_err();
        assert!(matches!(err, KmapError::Io(_)));
    }
}
