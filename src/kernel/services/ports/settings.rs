use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_FALLBACK_SCOPE: &str = "google";
pub const DEFAULT_FALLBACK_ENCODING: &str = "windows-1252";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Per-scope overrides merged over the built-in table. `null` or `""`
    /// disables a scope.
    #[serde(default)]
    pub docs: BTreeMap<String, Option<DocEntry>>,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default = "default_fallback_scope")]
    pub fallback_scope: String,
    #[serde(default = "default_fallback_encoding")]
    pub fallback_encoding: String,
    #[serde(default)]
    pub sequence_panel_writes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocEntry {
    Url(String),
    Command(CommandEntry),
    /// Anything else; kept so one bad entry does not reject the whole file.
    Invalid(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub command: Vec<String>,
    #[serde(rename = "failTest")]
    pub fail_test: String,
    #[serde(
        rename = "changeMatch",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub change_match: Option<String>,
    #[serde(
        rename = "changeWith",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub change_with: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        rename = "workingDir",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub working_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            docs: BTreeMap::new(),
            prefix: String::new(),
            suffix: String::new(),
            fallback_scope: default_fallback_scope(),
            fallback_encoding: default_fallback_encoding(),
            sequence_panel_writes: false,
        }
    }
}

fn default_fallback_scope() -> String {
    DEFAULT_FALLBACK_SCOPE.to_string()
}

fn default_fallback_encoding() -> String {
    DEFAULT_FALLBACK_ENCODING.to_string()
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
