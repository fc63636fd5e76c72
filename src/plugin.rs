//! Plugin entry point wiring entry resolution, manifest collection and selection together.

use crate::error::{ConfigError, SelectError};
use crate::manifest::{BuildPipeline, collect_entry_files};
use crate::models::{AssetTags, SelectorContext};
use crate::resolver::{FilenameRule, current_entry};
use crate::selection::{Selector, select_assets};

/// Capabilities of the environment the plugin is registered into.
pub trait HookHost {
  /// Returns `true` when the document generator exposes the alter-asset-tags hook.
  fn supports_alter_asset_tags(&self) -> bool;
}

/// Host used when documents are filtered outside a live build, e.g. from the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandaloneHost;

impl HookHost for StandaloneHost {
  fn supports_alter_asset_tags(&self) -> bool {
    true
  }
}

/// Options accepted at plugin construction.
#[derive(Debug, Clone, Default)]
pub struct PluginOptions {
  /// Policy applied to every candidate tag.
  pub selector: Selector,
}

/// Filters the assets injected into each generated document down to its entry's assets.
#[derive(Debug, Clone, Default)]
pub struct SelectAssetsPlugin {
  selector: Selector,
}

/// Payload of the alter-asset-tags hook for one generated document.
#[derive(Debug, Clone)]
pub struct AlterAssetTagsData {
  /// Output name of the document.
  pub output_name: String,
  /// Filename rule of the generator instance that emitted the document.
  pub filename: FilenameRule,
  /// Candidate tags to filter.
  pub asset_tags: AssetTags,
}

/// Registered hook, bound to the plugin's selector.
#[derive(Debug, Clone, Copy)]
pub struct AlterAssetTagsHook<'a> {
  selector: &'a Selector,
}

impl SelectAssetsPlugin {
  /// Name the plugin registers its hooks under.
  pub const NAME: &'static str = "HtmlSelectAssetsPlugin";

  /// Create a plugin from its options.
  pub fn new(options: PluginOptions) -> Self {
    Self {
      selector: options.selector,
    }
  }

  /// Configured selector.
  pub fn selector(&self) -> &Selector {
    &self.selector
  }

  /// Register the plugin with `host`, failing eagerly when the required hook is missing.
  pub fn apply<H: HookHost + ?Sized>(&self, host: &H) -> Result<AlterAssetTagsHook<'_>, ConfigError> {
    if !host.supports_alter_asset_tags() {
      return Err(ConfigError::MissingHook);
    }
    Ok(AlterAssetTagsHook {
      selector: &self.selector,
    })
  }
}

impl AlterAssetTagsHook<'_> {
  /// Filter the candidate tags of one document.
  ///
  /// Documents whose entry cannot be named at all are returned untouched.
  pub fn alter_asset_tags<P: BuildPipeline + ?Sized>(
    &self,
    pipeline: &P,
    data: AlterAssetTagsData,
  ) -> Result<AlterAssetTagsData, SelectError> {
    let entry_names = pipeline.entry_names();
    let namer = data.filename.clone().into_namer();
    let entry = current_entry(&entry_names, &data.output_name, &*namer);
    if entry.name.is_empty() {
      return Ok(data);
    }

    let context = SelectorContext {
      entry_files: collect_entry_files(pipeline, entry.manifest_key()),
      entry: entry.name,
      output_name: data.output_name.clone(),
    };
    let asset_tags = select_assets(data.asset_tags, &context, self.selector)?;

    Ok(AlterAssetTagsData { asset_tags, ..data })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::manifest::StatsSnapshot;
  use crate::models::AssetTag;

  struct LegacyHost;

  impl HookHost for LegacyHost {
    fn supports_alter_asset_tags(&self) -> bool {
      false
    }
  }

  fn stats() -> StatsSnapshot {
    StatsSnapshot::from_json(
      r#"{
        "entrypoints": [
          {"name": "app", "files": ["app.js", "app.css"]},
          {"name": "other", "files": ["other.js"]}
        ]
      }"#,
    )
    .unwrap()
  }

  fn data(output_name: &str, filename: FilenameRule) -> AlterAssetTagsData {
    AlterAssetTagsData {
      output_name: output_name.into(),
      filename,
      asset_tags: AssetTags {
        scripts: vec![AssetTag::script("app.js"), AssetTag::script("other.js")],
        styles: vec![AssetTag::stylesheet("app.css")],
        meta: Vec::new(),
      },
    }
  }

  #[test]
  fn apply_fails_without_hook() {
    let plugin = SelectAssetsPlugin::default();
    assert!(matches!(
      plugin.apply(&LegacyHost),
      Err(ConfigError::MissingHook)
    ));
  }

  #[test]
  fn unresolved_document_uses_stem_with_empty_manifest() {
    let plugin = SelectAssetsPlugin::new(PluginOptions {
      selector: Selector::custom(|_, context, _| {
        Ok(context.entry == "app" && context.entry_files.is_empty())
      }),
    });
    let hook = plugin.apply(&StandaloneHost).unwrap();

    let result = hook
      .alter_asset_tags(&stats(), data("app.html", FilenameRule::pattern("pages/[name].html")))
      .unwrap();
    assert_eq!(result.asset_tags.scripts.len(), 2);
    assert_eq!(result.asset_tags.styles.len(), 1);
  }

  #[test]
  fn empty_fallback_leaves_tags_untouched() {
    let plugin = SelectAssetsPlugin::new(PluginOptions {
      selector: Selector::smart(),
    });
    let hook = plugin.apply(&StandaloneHost).unwrap();

    let input = data("", FilenameRule::pattern("[name].html"));
    let expected = input.asset_tags.clone();
    let result = hook.alter_asset_tags(&stats(), input).unwrap();
    assert_eq!(result.asset_tags, expected);
  }

  #[test]
  fn smart_selection_keeps_output_name_and_rule() {
    let plugin = SelectAssetsPlugin::new(PluginOptions {
      selector: Selector::smart(),
    });
    let hook = plugin.apply(&StandaloneHost).unwrap();

    let result = hook
      .alter_asset_tags(&stats(), data("other.html", FilenameRule::pattern("[name].html")))
      .unwrap();
    assert_eq!(result.output_name, "other.html");
    assert_eq!(result.asset_tags.scripts, vec![AssetTag::script("other.js")]);
    assert!(result.asset_tags.styles.is_empty());
  }
}
