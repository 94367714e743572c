use super::docs::{CommandSpec, UrlSpec};
use super::scope::extract_scope;
use super::template::TemplateError;

/// The selected word and the raw scope path of its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub scope: String,
}

impl Query {
    pub fn new(text: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            scope: scope.into(),
        }
    }

    pub fn scope_token(&self) -> &str {
        extract_scope(&self.scope)
    }
}

/// `prefix + query + suffix`; the scope is never decorated.
pub fn decorate_query(query: &str, prefix: &str, suffix: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + query.len() + suffix.len());
    out.push_str(prefix);
    out.push_str(query);
    out.push_str(suffix);
    out
}

pub fn build_url(
    spec: &UrlSpec,
    query: &str,
    scope: &str,
    prefix: &str,
    suffix: &str,
) -> Result<String, TemplateError> {
    spec.render(&decorate_query(query, prefix, suffix), scope)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandVerdict {
    /// Text for the output panel, already rewritten.
    Display(String),
    /// The command found nothing (fail pattern matched, or blank output).
    NoDocs,
}

pub fn evaluate_output(spec: &CommandSpec, output: &str) -> CommandVerdict {
    if output.trim().is_empty() || spec.fail_pattern.matches(output) {
        return CommandVerdict::NoDocs;
    }

    let text = match &spec.output_rewrite {
        Some(rewrite) => rewrite.apply(output),
        None => output.to_string(),
    };
    CommandVerdict::Display(text)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/lookup.rs"]
mod tests;
