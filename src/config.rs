//! Plugin configuration loader for running selection outside a live build.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::error::ConfigError;
use crate::plugin::PluginOptions;
use crate::resolver::{DEFAULT_FILENAME, FilenameRule};
use crate::selection::Selector;

/// File name searched for by [`PluginConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "select-assets.config.json";

/// Discoverable configuration naming the selector and the document filename rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Built-in selector name; `None` keeps every asset.
    pub selector: Option<String>,
    /// Document filename pattern, `[name]` being replaced by the entry name.
    pub filename: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            selector: None,
            filename: DEFAULT_FILENAME.into(),
        }
    }
}

impl PluginConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// A missing file falls back to defaults. An unreadable or malformed file also falls
    /// back to defaults, with a warning so the fallback is visible.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        match Self::load(&candidate) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(err) => {
                warn!(
                    path = %candidate.display(),
                    error = %format!("{err:#}"),
                    "ignoring plugin configuration, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Read configuration from a specific JSON file. `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(Some(config))
    }

    /// Apply command-line overrides on top of the discovered values.
    pub fn with_overrides(mut self, selector: Option<String>, filename: Option<String>) -> Self {
        if let Some(selector) = selector {
            self.selector = Some(selector);
        }
        if let Some(filename) = filename {
            self.filename = filename;
        }
        self
    }

    /// Filename rule described by the configuration.
    pub fn filename_rule(&self) -> FilenameRule {
        FilenameRule::pattern(self.filename.as_str())
    }

    /// Validate the selector name and convert into plugin options.
    pub fn into_options(self) -> Result<PluginOptions, ConfigError> {
        Ok(PluginOptions {
            selector: Selector::from_name(self.selector.as_deref())?,
        })
    }
}
