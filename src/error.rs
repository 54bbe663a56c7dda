//! Error types for Karnaugh map solving
//!
//! Every failure is scoped to a single request. Variants are split into client
//! errors (bad input, reported back verbatim) and internal errors (reported
//! generically at the [`Solver::respond`](crate::Solver::respond) boundary).

use std::fmt;
use std::io;

/// The main error type for the crate
///
/// Inner components raise these instead of degrading silently; the solver's
/// response boundary is the only place they are turned into error payloads.
#[derive(Debug)]
pub enum KmapError {
    /// The variable list does not have 2, 3 or 4 entries
    UnsupportedVariableCount {
        /// Number of variables supplied
        count: usize,
    },

    /// The same variable name appears twice in the variable list
    DuplicateVariable {
        /// The repeated name
        name: String,
    },

    /// A minterm or don't-care token is not an unsigned integer
    InvalidToken {
        /// Which request field held the token (`minterms` or `dontcares`)
        field: &'static str,
        /// The offending token, as supplied
        token: String,
    },

    /// An index does not address a cell of the map
    IndexOutOfRange {
        /// The offending index
        index: u32,
        /// Number of variables, so the valid range is `0..2^num_vars`
        num_vars: usize,
    },

    /// Indices listed both as minterms and as don't-cares
    OverlappingIndices {
        /// The conflicting indices, ascending
        indices: Vec<u32>,
    },

    /// The requested form is neither SOP nor POS
    InvalidForm {
        /// The form string as supplied
        form: String,
    },

    /// An expression has a shape the formatter or expander cannot handle
    UnexpectedExpression {
        /// Description of the offending shape
        message: String,
    },

    /// The minimizer failed to produce an expression
    Minimization {
        /// Description of the failure
        message: String,
    },

    /// IO error wrapper
    Io(io::Error),
}

impl KmapError {
    /// Whether the error was caused by the caller's input
    ///
    /// Client errors map to a 400 status, everything else to 500.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            KmapError::UnsupportedVariableCount { .. }
                | KmapError::DuplicateVariable { .. }
                | KmapError::InvalidToken { .. }
                | KmapError::IndexOutOfRange { .. }
                | KmapError::OverlappingIndices { .. }
                | KmapError::InvalidForm { .. }
        )
    }
}

impl fmt::Display for KmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KmapError::UnsupportedVariableCount { count } => {
                write!(f, "{} variables not supported (2-4 only).", count)
            }
            KmapError::DuplicateVariable { name } => {
                write!(f, "Variable '{}' is listed more than once.", name)
            }
            KmapError::InvalidToken { field, token } => write!(
                f,
                "Invalid {} entry {:?}: expected a non-negative integer.",
                field, token
            ),
            KmapError::IndexOutOfRange { index, num_vars } => write!(
                f,
                "Index {} is out of range for {} variables (0-{}).",
                index,
                num_vars,
                (1u32 << num_vars) - 1
            ),
            KmapError::OverlappingIndices { indices } => write!(
                f,
                "Indices {:?} are listed both as minterms and as don't-cares.",
                indices
            ),
            KmapError::InvalidForm { form } => {
                write!(f, "Unknown form type {:?} (expected SOP or POS).", form)
            }
            KmapError::UnexpectedExpression { message } => {
                write!(f, "Unexpected expression shape: {}", message)
            }
            KmapError::Minimization { message } => write!(f, "Minimization failed: {}", message),
            KmapError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for KmapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KmapError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for KmapError {
    fn from(err: io::Error) -> Self {
        KmapError::Io(err)
    }
}

impl From<serde_json::Error> for KmapError {
    fn from(err: serde_json::Error) -> Self {
        KmapError::Io(io::Error::from(err))
    }
}

impl From<KmapError> for io::Error {
    fn from(err: KmapError) -> Self {
        match err {
            KmapError::Io(io_err) => io_err,
            other => io::Error::other(other),
        }
    }
}
