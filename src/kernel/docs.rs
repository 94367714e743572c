//! Scope -> lookup table.
//!
//! The built-in table is plain data; user settings are merged over it and the
//! override wins on key collision.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use regex::Regex;
use thiserror::Error;

use crate::kernel::services::ports::{CommandEntry, DocEntry, Settings};
use crate::kernel::template::{self, TemplateError, TemplateVars};

const DEFAULT_URL_DOCS: &[(&str, &str)] = &[
    ("ahk", "http://www.ahkscript.org/docs/commands/%(query)s.htm"),
    ("rails", "http://api.rubyonrails.org/?q=%(query)s"),
    ("controller", "http://api.rubyonrails.org/?q=%(query)s"),
    ("ruby", "http://ruby-doc.com/search.html?q=%(query)s"),
    ("js", "https://developer.mozilla.org/en-US/search?q=%(query)s&topic=js"),
    ("html", "https://developer.mozilla.org/en-US/search?q=%(query)s&topic=html"),
    ("coffee", "https://developer.mozilla.org/en-US/search?q=%(query)s"),
    ("php", "http://php.net/manual-lookup.php?pattern=%(query)s"),
    ("clojure", "http://clojuredocs.org/search?x=0&y=0&q=%(query)s"),
    ("go", "http://golang.org/search?q=%(query)s"),
    ("c", "http://www.cplusplus.com/search.do?q=%(query)s"),
    ("cpp", "http://www.cplusplus.com/search.do?q=%(query)s"),
    ("smarty", "http://www.smarty.net/%(query)s"),
    ("cmake", "http://cmake.org/cmake/help/v2.8.8/cmake.html#command:%(query)s"),
    ("perl", "http://perldoc.perl.org/search.html?q=%(query)s"),
    ("cs", "http://social.msdn.microsoft.com/Search/?query=%(query)s"),
    ("lua", "http://pgl.yoyo.org/luai/i/%(query)s"),
    (
        "pgsql",
        "http://www.postgresql.org/search/?u=%%2Fdocs%%2Fcurrent%%2F&q=%(query)s",
    ),
    ("erlang", "http://erldocs.com/R16B03/?search=%(query)s"),
    ("haskell", "http://hayoo.fh-wedel.de/?query=%(query)s"),
    ("scala", "http://scalex.org/?q=%(query)s"),
    ("css", "http://devdocs.io/#q=%(scope)s+%(query)s"),
    ("scss", "http://devdocs.io/#q=%(scope)s+%(query)s"),
    ("less", "http://devdocs.io/#q=%(scope)s+%(query)s"),
    ("google", "https://google.com/search?q=%(scope)s+%(query)s"),
];

const PYTHON_COMMAND: &[&str] = &["python", "-m", "pydoc", "%(query)s"];
const PYTHON_FAIL_TEST: &str = ".*no Python documentation found for.*";
const PYTHON_CHANGE_MATCH: &str = "(Related help topics)";
const PYTHON_CHANGE_WITH: &str = "-------\n\\1";
const PYTHON_URL: &str = "http://docs.python.org/3/search.html?q=%(query)s";

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("invalid {field} pattern: {source}")]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("`changeMatch` and `changeWith` must be set together")]
    IncompleteRewrite,
    #[error("expected a url template or a command object, got `{0}`")]
    Malformed(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupSpec {
    Url(UrlSpec),
    Command(CommandSpec),
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSpec {
    pub template: String,
}

impl UrlSpec {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn render(&self, query: &str, scope: &str) -> Result<String, TemplateError> {
        template::render(&self.template, TemplateVars::new(query, scope))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
    pub command: Vec<String>,
    pub fail_pattern: FailPattern,
    pub fallback_url: Option<UrlSpec>,
    pub output_rewrite: Option<OutputRewrite>,
    pub working_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn render_argv(&self, query: &str, scope: &str) -> Result<Vec<String>, TemplateError> {
        let vars = TemplateVars::new(query, scope);
        self.command
            .iter()
            .map(|arg| template::render(arg, vars))
            .collect()
    }
}

/// Prefix-anchored "no documentation" detector: it must match at the start of
/// the output, but not necessarily consume all of it.
#[derive(Debug, Clone)]
pub struct FailPattern {
    source: String,
    anchored: Regex,
}

impl FailPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let anchored = Regex::new(&format!("^(?:{pattern})"))?;
        Ok(Self {
            source: pattern.to_string(),
            anchored,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, text: &str) -> bool {
        self.anchored.is_match(text)
    }
}

impl PartialEq for FailPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// Single substitution applied to command output before it is displayed.
#[derive(Debug, Clone)]
pub struct OutputRewrite {
    pattern: Regex,
    replacement: String,
    expanded: String,
}

impl OutputRewrite {
    /// `replacement` uses the plugin backreference syntax (`\1`, `\g<name>`,
    /// `\n`).
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_string(),
            expanded: translate_replacement(replacement),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Replaces the first match only.
    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replacen(text, 1, self.expanded.as_str())
            .into_owned()
    }
}

impl PartialEq for OutputRewrite {
    fn eq(&self, other: &Self) -> bool {
        self.pattern.as_str() == other.pattern.as_str() && self.replacement == other.replacement
    }
}

fn is_octal(c: char) -> bool {
    matches!(c, '0'..='7')
}

/// `\1` / `\g<name>` / `\n` style replacement -> `${1}` / `${name}` / newline.
pub fn translate_replacement(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '$' => out.push_str("$$"),
            '\\' => match chars.peek().copied() {
                Some(d) if d.is_ascii_digit() => {
                    let mut digits = String::new();
                    while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                        let octal_run = digits.len() == 2
                            && is_octal(d)
                            && digits.chars().all(is_octal);
                        if digits.len() == 3 || (digits.len() == 2 && !octal_run) {
                            break;
                        }
                        if digits.starts_with('0') && !is_octal(d) {
                            break;
                        }
                        digits.push(d);
                        chars.next();
                    }
                    // `\0…` and three octal digits are character escapes, not groups.
                    if digits.starts_with('0') || digits.len() == 3 {
                        let code = u32::from_str_radix(&digits, 8).unwrap_or(0);
                        out.push(char::from_u32(code).unwrap_or('\0'));
                    } else {
                        out.push_str("${");
                        out.push_str(&digits);
                        out.push('}');
                    }
                }
                Some('g') => {
                    chars.next();
                    if chars.peek() == Some(&'<') {
                        chars.next();
                        let name: String = chars.by_ref().take_while(|c| *c != '>').collect();
                        out.push_str("${");
                        out.push_str(&name);
                        out.push('}');
                    } else {
                        out.push_str("\\g");
                    }
                }
                Some('n') => {
                    chars.next();
                    out.push('\n');
                }
                Some('t') => {
                    chars.next();
                    out.push('\t');
                }
                Some('r') => {
                    chars.next();
                    out.push('\r');
                }
                Some('\\') => {
                    chars.next();
                    out.push('\\');
                }
                _ => out.push('\\'),
            },
            other => out.push(other),
        }
    }

    out
}

impl LookupSpec {
    pub fn url(template: impl Into<String>) -> Self {
        Self::Url(UrlSpec::new(template))
    }

    pub fn from_entry(entry: Option<&DocEntry>) -> Result<Self, SpecError> {
        match entry {
            None => Ok(Self::Disabled),
            Some(DocEntry::Url(template)) if template.is_empty() => Ok(Self::Disabled),
            Some(DocEntry::Url(template)) => Ok(Self::url(template.clone())),
            Some(DocEntry::Command(cmd)) => CommandSpec::from_entry(cmd).map(Self::Command),
            Some(DocEntry::Invalid(value)) => Err(SpecError::Malformed(value.clone())),
        }
    }
}

impl CommandSpec {
    pub fn from_entry(entry: &CommandEntry) -> Result<Self, SpecError> {
        let fail_pattern =
            FailPattern::new(&entry.fail_test).map_err(|source| SpecError::InvalidPattern {
                field: "failTest",
                source,
            })?;

        let output_rewrite = match (&entry.change_match, &entry.change_with) {
            (Some(pattern), Some(replacement)) => Some(
                OutputRewrite::new(pattern, replacement).map_err(|source| {
                    SpecError::InvalidPattern {
                        field: "changeMatch",
                        source,
                    }
                })?,
            ),
            (None, None) => None,
            _ => return Err(SpecError::IncompleteRewrite),
        };

        Ok(Self {
            command: entry.command.clone(),
            fail_pattern,
            fallback_url: entry.url.as_ref().map(UrlSpec::new),
            output_rewrite,
            working_dir: entry.working_dir.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeMap {
    entries: HashMap<String, LookupSpec>,
}

impl ScopeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut map = Self::new();
        for (scope, template) in DEFAULT_URL_DOCS {
            map.insert(*scope, LookupSpec::url(*template));
        }
        map.insert("python", LookupSpec::Command(python_spec()));
        map
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut map = Self::builtin();
        map.merge_overrides(&settings.docs);
        map
    }

    /// Invalid entries are logged and skipped; whatever was registered under
    /// that scope before stays in place.
    pub fn merge_overrides(&mut self, docs: &BTreeMap<String, Option<DocEntry>>) {
        for (scope, entry) in docs {
            match LookupSpec::from_entry(entry.as_ref()) {
                Ok(spec) => {
                    self.insert(scope.clone(), spec);
                }
                Err(e) => {
                    tracing::warn!(scope = %scope, error = %e, "ignoring invalid docs entry");
                }
            }
        }
    }

    pub fn insert(&mut self, scope: impl Into<String>, spec: LookupSpec) -> Option<LookupSpec> {
        self.entries.insert(scope.into(), spec)
    }

    pub fn get(&self, scope: &str) -> Option<&LookupSpec> {
        self.entries.get(scope)
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.entries.contains_key(scope)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted scope keys.
    pub fn scopes(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

fn python_spec() -> CommandSpec {
    CommandSpec {
        command: PYTHON_COMMAND.iter().map(|s| s.to_string()).collect(),
        fail_pattern: FailPattern::new(PYTHON_FAIL_TEST).expect("built-in fail pattern is valid"),
        fallback_url: Some(UrlSpec::new(PYTHON_URL)),
        output_rewrite: Some(
            OutputRewrite::new(PYTHON_CHANGE_MATCH, PYTHON_CHANGE_WITH)
                .expect("built-in rewrite pattern is valid"),
        ),
        working_dir: None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/docs.rs"]
mod tests;
