//! Map a generated document's output name back to the build entry that produced it.
//!
//! The document generator names its output either through a pattern containing `[name]` or
//! through a function of the entry name. Both shapes are normalised into a single
//! [`OutputNamer`] so resolution only ever deals with one representation.

use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use regex::{NoExpand, Regex};
use tracing::debug;

/// Placeholder substituted with the entry name in filename patterns.
pub const NAME_PLACEHOLDER: &str = "[name]";

/// Filename used by the document generator when none is configured.
pub const DEFAULT_FILENAME: &str = "index.html";

fn name_placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&regex::escape(NAME_PLACEHOLDER)).expect("invalid name placeholder regex")
    })
}

/// Function computing a document's output name from an entry name.
pub type OutputNamer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Naming rule configured on the document generator.
#[derive(Clone)]
pub enum FilenameRule {
    /// Static pattern; every `[name]` is replaced by the entry name.
    Pattern(String),
    /// Dynamic naming function.
    Function(OutputNamer),
}

impl FilenameRule {
    /// Build a pattern rule.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern(pattern.into())
    }

    /// Build a function rule.
    pub fn function<F>(namer: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Function(Arc::new(namer))
    }

    /// Normalise the rule into a naming function.
    pub fn into_namer(self) -> OutputNamer {
        match self {
            Self::Function(namer) => namer,
            Self::Pattern(pattern) => Arc::new(move |entry: &str| {
                name_placeholder()
                    .replace_all(&pattern, NoExpand(entry))
                    .into_owned()
            }),
        }
    }
}

impl Default for FilenameRule {
    fn default() -> Self {
        Self::Pattern(DEFAULT_FILENAME.to_string())
    }
}

impl From<&str> for FilenameRule {
    fn from(pattern: &str) -> Self {
        Self::pattern(pattern)
    }
}

impl From<String> for FilenameRule {
    fn from(pattern: String) -> Self {
        Self::Pattern(pattern)
    }
}

impl fmt::Debug for FilenameRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(pattern) => f.debug_tuple("Pattern").field(pattern).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Return the first entry, in defined order, whose generated name equals `output_name`.
pub fn resolve_entry<S: AsRef<str>>(
    entry_names: &[S],
    output_name: &str,
    namer: &dyn Fn(&str) -> String,
) -> Option<String> {
    entry_names
        .iter()
        .map(AsRef::as_ref)
        .find(|&name| namer(name) == output_name)
        .map(str::to_string)
}

/// Best-effort entry name for a document no entry resolved to: its file stem.
pub fn fallback_entry_name(output_name: &str) -> String {
    Path::new(output_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Entry attributed to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentEntry {
    /// Entry name exposed to selectors.
    pub name: String,
    /// Whether `name` came from an actual entry rather than the file stem fallback.
    pub matched: bool,
}

impl CurrentEntry {
    /// Entry name to look up in the build manifest. Fallback names never match a manifest.
    pub fn manifest_key(&self) -> Option<&str> {
        self.matched.then_some(self.name.as_str())
    }
}

/// Resolve the current entry of a document, falling back to its file stem.
pub fn current_entry<S: AsRef<str>>(
    entry_names: &[S],
    output_name: &str,
    namer: &dyn Fn(&str) -> String,
) -> CurrentEntry {
    match resolve_entry(entry_names, output_name, namer) {
        Some(name) => CurrentEntry {
            name,
            matched: true,
        },
        None => {
            let name = fallback_entry_name(output_name);
            debug!(output_name, fallback = %name, "no entry matched document, using file stem");
            CurrentEntry {
                name,
                matched: false,
            }
        }
    }
}
