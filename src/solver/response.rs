//! Outbound payloads

use crate::error::KmapError;
use crate::expression::Form;
use crate::group::ImplicantGroup;
use crate::kmap::KarnaughMap;
use log::error;
use serde::{Deserialize, Serialize};

/// Markup used in explanation sentences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplanationStyle {
    /// Plain text
    #[default]
    Plain,
    /// Positions in `<strong>`, the term in `<code>`
    Html,
}

/// Explain one group in a sentence
///
/// ```
/// use kmap_logic::expression::Form;
/// use kmap_logic::solver::{explain_group, ExplanationStyle};
///
/// assert_eq!(
///     explain_group(&[4, 5], "ab'", Form::Sop, ExplanationStyle::Plain),
///     "A group is formed around the 1s at positions [4, 5]. This simplifies to the term ab'."
/// );
/// ```
pub fn explain_group(relevant: &[u32], term: &str, form: Form, style: ExplanationStyle) -> String {
    let cells = match form {
        Form::Sop => "1s",
        Form::Pos => "0s",
    };
    let positions = format!("{:?}", relevant);
    match style {
        ExplanationStyle::Plain => format!(
            "A group is formed around the {} at positions {}. This simplifies to the term {}.",
            cells, positions, term
        ),
        ExplanationStyle::Html => format!(
            "A group is formed around the {} at positions <strong>{}</strong>. \
             This simplifies to the term <code>{}</code>.",
            cells, positions, term
        ),
    }
}

/// Map, groups and explanations of a solved request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KmapPayload {
    /// Cell values, labels and variable names
    #[serde(flatten)]
    pub grid: KarnaughMap,
    /// Groups drawn on the map, in the order of the solution's terms
    pub groups: Vec<ImplicantGroup>,
    /// One sentence per group that covers a minterm (or maxterm for POS)
    pub explanations: Vec<String>,
    /// Form of the solution
    pub form_type: Form,
}

/// Successful result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveResponse {
    /// Minimized expression in display notation
    pub solution: String,
    /// The map with its groups
    pub kmap: KmapPayload,
}

/// Failed result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Message shown to the client
    pub error: String,
    #[serde(skip)]
    status: u16,
}

impl ErrorResponse {
    /// Status code to report alongside the error
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Client errors are reported verbatim, anything else generically
    pub fn from_error(err: &KmapError) -> Self {
        if err.is_client_error() {
            ErrorResponse {
                error: err.to_string(),
                status: 400,
            }
        } else {
            Self::internal(&err.to_string())
        }
    }

    /// Generic error for a failure on our side; `detail` is only logged
    pub fn internal(detail: &str) -> Self {
        error!("internal error while solving: {}", detail);
        ErrorResponse {
            error: format!("An unexpected server error occurred: {}", detail),
            status: 500,
        }
    }
}

/// Either a solution or an error, serialised without a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Success(SolveResponse),
    Error(ErrorResponse),
}

impl Response {
    /// 200 on success, 400 for client errors, 500 otherwise
    pub fn status_code(&self) -> u16 {
        match self {
            Response::Success(_) => 200,
            Response::Error(err) => err.status(),
        }
    }

    /// Whether a solution was produced
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// Serialize the body as compact JSON
    pub fn to_json(&self) -> Result<String, KmapError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the body as indented JSON
    pub fn to_json_pretty(&self) -> Result<String, KmapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<Result<SolveResponse, KmapError>> for Response {
    fn from(result: Result<SolveResponse, KmapError>) -> Self {
        match result {
            Ok(response) => Response::Success(response),
            Err(err) => Response::Error(ErrorResponse::from_error(&err)),
        }
    }
}
