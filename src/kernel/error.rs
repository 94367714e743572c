use thiserror::Error;

use super::template::TemplateError;

/// Terminal outcomes of a lookup that end on the status line.
///
/// Undecodable output and failed processes are not listed: the former is
/// recovered through the fallback encoding, the latter flows into the normal
/// fail-pattern check as output text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("No docs available for the current scope !")]
    ScopeNotFound { scope: String },
    #[error("This scope is disabled !")]
    ScopeDisabled { scope: String },
    #[error("No docs available for the current word !")]
    NoDocsFound,
    #[error("Invalid documentation template: {0}")]
    Template(#[from] TemplateError),
    #[error("Could not open browser: {0}")]
    BrowserOpen(String),
}
