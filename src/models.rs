//! Data structures exchanged between the build pipeline, the document generator and selectors.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a candidate asset tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
  /// `<script>` tags.
  Script,
  /// `<link rel="stylesheet">` and inline style tags.
  Style,
  /// `<meta>` tags.
  Meta,
}

impl AssetCategory {
  /// Lowercase name as exposed to selector predicates.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Script => "script",
      Self::Style => "style",
      Self::Meta => "meta",
    }
  }
}

impl fmt::Display for AssetCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Value of a single tag attribute.
///
/// Boolean attributes such as `defer` carry a flag rather than a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
  /// Boolean attribute, rendered bare when `true` and omitted when `false`.
  Flag(bool),
  /// Regular string attribute.
  Text(String),
}

impl AttributeValue {
  /// Borrow the string value, if this is a text attribute.
  pub fn as_text(&self) -> Option<&str> {
    match self {
      Self::Text(value) => Some(value),
      Self::Flag(_) => None,
    }
  }
}

impl From<&str> for AttributeValue {
  fn from(value: &str) -> Self {
    Self::Text(value.to_string())
  }
}

impl From<String> for AttributeValue {
  fn from(value: String) -> Self {
    Self::Text(value)
  }
}

impl From<bool> for AttributeValue {
  fn from(value: bool) -> Self {
    Self::Flag(value)
  }
}

/// A single markup element the document generator intends to inject.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTag {
  /// Element name, e.g. `script`, `link` or `meta`.
  pub tag_name: String,
  /// Whether the element has no closing tag.
  #[serde(default)]
  pub void_tag: bool,
  /// Attribute bag, passed through untouched.
  #[serde(default)]
  pub attributes: BTreeMap<String, AttributeValue>,
}

impl AssetTag {
  /// Create a tag with no attributes.
  pub fn new(tag_name: impl Into<String>, void_tag: bool) -> Self {
    Self {
      tag_name: tag_name.into(),
      void_tag,
      attributes: BTreeMap::new(),
    }
  }

  /// A deferred `<script src>` tag.
  pub fn script(src: impl Into<String>) -> Self {
    Self::new("script", false)
      .with_attribute("defer", true)
      .with_attribute("src", AttributeValue::Text(src.into()))
  }

  /// A `<link rel="stylesheet">` tag.
  pub fn stylesheet(href: impl Into<String>) -> Self {
    Self::new("link", true)
      .with_attribute("href", AttributeValue::Text(href.into()))
      .with_attribute("rel", "stylesheet")
  }

  /// A `<meta name content>` tag.
  pub fn meta(name: impl Into<String>, content: impl Into<String>) -> Self {
    Self::new("meta", true)
      .with_attribute("name", AttributeValue::Text(name.into()))
      .with_attribute("content", AttributeValue::Text(content.into()))
  }

  /// Builder-style attribute setter.
  pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
    self.attributes.insert(name.into(), value.into());
    self
  }

  /// Borrow a text attribute by name.
  pub fn attribute(&self, name: &str) -> Option<&str> {
    self.attributes.get(name).and_then(AttributeValue::as_text)
  }

  /// URL the tag points at: `src`, falling back to `href`. Empty values count as absent.
  pub fn reference_url(&self) -> Option<&str> {
    self
      .attribute("src")
      .filter(|value| !value.is_empty())
      .or_else(|| self.attribute("href").filter(|value| !value.is_empty()))
  }
}

/// The three candidate tag collections of one generated document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssetTags {
  /// Script tags, in injection order.
  #[serde(default)]
  pub scripts: Vec<AssetTag>,
  /// Style tags, in injection order.
  #[serde(default)]
  pub styles: Vec<AssetTag>,
  /// Meta tags, in injection order.
  #[serde(default)]
  pub meta: Vec<AssetTag>,
}

impl AssetTags {
  /// Total number of tags across every category.
  pub fn len(&self) -> usize {
    self.scripts.len() + self.styles.len() + self.meta.len()
  }

  /// Returns `true` when no category holds a tag.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Build metadata recorded for an emitted file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetFlags {
  /// File is a hot-module-replacement update.
  pub hot_module_replacement: bool,
  /// File only exists in development builds.
  pub development: bool,
}

impl AssetFlags {
  /// Returns `true` for transient dev-server files that must never reach a selector.
  pub fn is_dev_artifact(&self) -> bool {
    self.hot_module_replacement || self.development
  }
}

/// Per-document view handed to selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorContext {
  /// Resolved entry name, or the document's file stem when no entry matched.
  pub entry: String,
  /// Output name of the document being generated.
  pub output_name: String,
  /// Files belonging to the entry, excluding dev artifacts.
  pub entry_files: Vec<String>,
}
