//! Selection policies deciding which candidate tags survive in a document.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{ConfigError, PredicateError, SelectError};
use crate::models::{AssetCategory, AssetTag, AssetTags, SelectorContext};

/// Name of the built-in entry-aware selector.
pub const SMART_SELECTOR: &str = "smart";

/// User supplied predicate: `true` keeps the tag.
pub type SelectorFn =
  Arc<dyn Fn(&AssetTag, &SelectorContext, AssetCategory) -> Result<bool, PredicateError> + Send + Sync>;

/// Policy applied to every candidate tag, fixed when the plugin is constructed.
#[derive(Clone, Default)]
pub enum Selector {
  /// Keep every tag.
  #[default]
  Default,
  /// Keep tags referencing one of the entry's files; always keep meta tags.
  Smart,
  /// Delegate to a user predicate.
  Custom(SelectorFn),
}

impl Selector {
  /// The built-in entry-aware selector.
  pub fn smart() -> Self {
    Self::Smart
  }

  /// Wrap a predicate as a selector.
  pub fn custom<F>(predicate: F) -> Self
  where
    F: Fn(&AssetTag, &SelectorContext, AssetCategory) -> Result<bool, PredicateError>
      + Send
      + Sync
      + 'static,
  {
    Self::Custom(Arc::new(predicate))
  }

  /// Parse a selector from its configured name. `None` selects the keep-all default.
  pub fn from_name(name: Option<&str>) -> Result<Self, ConfigError> {
    match name.map(str::trim) {
      None | Some("") => Ok(Self::Default),
      Some(SMART_SELECTOR) => Ok(Self::Smart),
      Some(other) => Err(ConfigError::UnknownSelector {
        name: other.to_string(),
      }),
    }
  }

  /// Decide whether `asset` is kept in the document described by `context`.
  pub fn decide(
    &self,
    asset: &AssetTag,
    context: &SelectorContext,
    category: AssetCategory,
  ) -> Result<bool, SelectError> {
    match self {
      Self::Default => Ok(true),
      Self::Smart => Ok(smart_selector(asset, context, category)),
      Self::Custom(predicate) => {
        predicate(asset, context, category).map_err(|source| SelectError::Predicate {
          category,
          output_name: context.output_name.clone(),
          source,
        })
      }
    }
  }
}

impl fmt::Debug for Selector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Default => f.write_str("Default"),
      Self::Smart => f.write_str("Smart"),
      Self::Custom(_) => f.write_str("Custom(..)"),
    }
  }
}

/// Built-in heuristic: keep a tag when its URL ends with one of the entry's files.
///
/// Emitted filenames carry no public path, while rendered URLs may, so a suffix match is
/// used. Meta tags are not tied to an entry and are always kept. Tags without a `src` or
/// `href` are dropped.
pub fn smart_selector(asset: &AssetTag, context: &SelectorContext, category: AssetCategory) -> bool {
  if category == AssetCategory::Meta {
    return true;
  }

  let Some(url) = asset.reference_url() else {
    return false;
  };
  context
    .entry_files
    .iter()
    .any(|file| url.ends_with(file.as_str()))
}

/// Filter the three tag collections independently, preserving order among survivors.
pub fn select_assets(
  tags: AssetTags,
  context: &SelectorContext,
  selector: &Selector,
) -> Result<AssetTags, SelectError> {
  let before = tags.len();
  let selected = AssetTags {
    scripts: retain_selected(tags.scripts, context, AssetCategory::Script, selector)?,
    styles: retain_selected(tags.styles, context, AssetCategory::Style, selector)?,
    meta: retain_selected(tags.meta, context, AssetCategory::Meta, selector)?,
  };

  debug!(
    entry = context.entry.as_str(),
    output_name = context.output_name.as_str(),
    kept = selected.len(),
    dropped = before - selected.len(),
    "selected assets"
  );
  Ok(selected)
}

fn retain_selected(
  tags: Vec<AssetTag>,
  context: &SelectorContext,
  category: AssetCategory,
  selector: &Selector,
) -> Result<Vec<AssetTag>, SelectError> {
  let mut kept = Vec::with_capacity(tags.len());
  for tag in tags {
    if selector.decide(&tag, context, category)? {
      kept.push(tag);
    }
  }
  Ok(kept)
}
