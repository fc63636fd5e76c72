//! Error types raised while configuring the plugin or filtering a document.

use thiserror::Error;

use crate::models::AssetCategory;

/// Error type returned by user supplied selector predicates.
pub type PredicateError = Box<dyn std::error::Error + Send + Sync>;

/// Fatal configuration problems detected before any document is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The host document generator does not expose the alter-asset-tags hook.
  #[error("cannot find appropriate compilation hook: the host does not expose alter-asset-tags")]
  MissingHook,

  /// The configured selector name is not a known built-in.
  #[error("unknown selector '{name}', expected \"smart\" or a predicate function")]
  UnknownSelector {
    /// Name found in the configuration.
    name: String,
  },
}

/// Errors that abort the filtering pass of a single document.
#[derive(Debug, Error)]
pub enum SelectError {
  /// A custom selector predicate failed.
  #[error("asset selector failed on a {category} tag of {output_name}")]
  Predicate {
    /// Category of the tag being tested when the predicate failed.
    category: AssetCategory,
    /// Output name of the document being filtered.
    output_name: String,
    /// Error returned by the predicate.
    #[source]
    source: PredicateError,
  },
}
