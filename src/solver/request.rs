//! Inbound request fields and their validation

use crate::error::KmapError;
use crate::expression::Form;
use crate::kmap::Layout;
use crate::KmapConfig;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Raw request as received from a client
///
/// Every field is optional; missing fields fall back to the solver's
/// [`KmapConfig`]. Index lists are kept as tokens so that malformed entries
/// can be reported precisely. JSON numbers are accepted as tokens too.
///
/// # Examples
///
/// ```
/// use kmap_logic::SolveRequest;
///
/// let request: SolveRequest = serde_json::from_str(
///     r#"{"variables": "a,b,c", "minterms": ["1", "3", 5], "form_type": "POS"}"#,
/// ).unwrap();
/// assert_eq!(request.minterms, vec!["1", "3", "5"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveRequest {
    /// Comma-separated variable names, most significant first
    pub variables: Option<String>,
    /// Label of the function, e.g. `f`
    pub output_name: Option<String>,
    /// Indices where the function is 1
    #[serde(deserialize_with = "tokens")]
    pub minterms: Vec<String>,
    /// Indices where the function is unconstrained
    #[serde(deserialize_with = "tokens")]
    pub dontcares: Vec<String>,
    /// `SOP` or `POS`
    pub form_type: Option<String>,
}

impl SolveRequest {
    /// Empty request; every field falls back to the configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the comma-separated variable names
    pub fn with_variables(mut self, variables: &str) -> Self {
        self.variables = Some(variables.to_string());
        self
    }

    /// Set the function label
    pub fn with_output_name(mut self, output_name: &str) -> Self {
        self.output_name = Some(output_name.to_string());
        self
    }

    /// Set the minterm indices
    pub fn with_minterms<I, T>(mut self, minterms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.minterms = minterms.into_iter().map(|t| t.to_string()).collect();
        self
    }

    /// Set the don't-care indices
    pub fn with_dontcares<I, T>(mut self, dontcares: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.dontcares = dontcares.into_iter().map(|t| t.to_string()).collect();
        self
    }

    /// Set the output form
    pub fn with_form(mut self, form: Form) -> Self {
        self.form_type = Some(form.as_str().to_string());
        self
    }

    /// Validate the request and apply defaults
    ///
    /// Checks run in order: variable names, variable count, form, index
    /// tokens, index range, minterm/don't-care overlap.
    pub fn parse(&self, config: &KmapConfig) -> Result<ParsedRequest, KmapError> {
        let mut variables: Vec<Arc<str>> = self
            .variables
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Arc::from)
            .collect();
        if variables.is_empty() {
            variables = config
                .default_variables
                .iter()
                .map(|name| Arc::from(name.as_str()))
                .collect();
        }

        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for name in &variables {
            if !seen.insert(&**name) {
                return Err(KmapError::DuplicateVariable {
                    name: name.to_string(),
                });
            }
        }

        let layout = Layout::new(variables.len())?;

        let form = match self.form_type.as_deref() {
            Some(form) if !form.trim().is_empty() => form.parse()?,
            _ => config.default_form,
        };

        let output_name = self
            .output_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(config.default_output_name.as_str())
            .to_string();

        let on_set = parse_indices("minterms", &self.minterms, layout.num_vars())?;
        let dc_set = parse_indices("dontcares", &self.dontcares, layout.num_vars())?;

        let overlap: Vec<u32> = on_set.intersection(&dc_set).copied().collect();
        if !overlap.is_empty() {
            return Err(KmapError::OverlappingIndices { indices: overlap });
        }

        Ok(ParsedRequest {
            variables,
            output_name,
            on_set,
            dc_set,
            form,
        })
    }
}

/// A validated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// Trimmed variable names, most significant first
    pub variables: Vec<Arc<str>>,
    /// Trimmed function label
    pub output_name: String,
    /// Cells where the function is 1
    pub on_set: BTreeSet<u32>,
    /// Cells where the function is unconstrained, disjoint from `on_set`
    pub dc_set: BTreeSet<u32>,
    /// Requested output form
    pub form: Form,
}

impl ParsedRequest {
    /// Number of variables
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Cells that are neither minterms nor don't-cares
    pub fn maxterms(&self) -> BTreeSet<u32> {
        (0..1u32 << self.num_vars())
            .filter(|i| !self.on_set.contains(i) && !self.dc_set.contains(i))
            .collect()
    }
}

fn parse_indices(
    field: &'static str,
    tokens: &[String],
    num_vars: usize,
) -> Result<BTreeSet<u32>, KmapError> {
    let size = 1u32 << num_vars;
    let mut indices = BTreeSet::new();
    for token in tokens {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            continue;
        }
        let index: u32 = trimmed.parse().map_err(|_| KmapError::InvalidToken {
            field,
            token: token.clone(),
        })?;
        if index >= size {
            return Err(KmapError::IndexOutOfRange { index, num_vars });
        }
        indices.insert(index);
    }
    Ok(indices)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawToken {
    Text(String),
    Number(u64),
}

fn tokens<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<RawToken> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|t| match t {
            RawToken::Text(s) => s,
            RawToken::Number(n) => n.to_string(),
        })
        .collect())
}
