//! Collect the files of an entry, keeping dev-server artifacts away from selectors.

use tracing::trace;

use crate::models::AssetFlags;

/// Read-only view of the build pipeline's entry and asset records.
pub trait BuildPipeline {
  /// Entry names in their defined order.
  fn entry_names(&self) -> Vec<String>;

  /// Files emitted for `entry`, or `None` when the entry is unknown.
  fn entry_files(&self, entry: &str) -> Option<Vec<String>>;

  /// Flags recorded for an emitted file, or `None` when nothing was recorded.
  fn asset_flags(&self, file: &str) -> Option<AssetFlags>;
}

/// Files belonging to `entry`, excluding hot-module-replacement and development artifacts.
///
/// Unknown or absent entries yield an empty list.
pub fn collect_entry_files<P: BuildPipeline + ?Sized>(pipeline: &P, entry: Option<&str>) -> Vec<String> {
  let Some(entry) = entry else {
    return Vec::new();
  };
  let Some(files) = pipeline.entry_files(entry) else {
    return Vec::new();
  };

  files
    .into_iter()
    .filter(|file| {
      let excluded = pipeline
        .asset_flags(file)
        .is_some_and(|flags| flags.is_dev_artifact());
      if excluded {
        trace!(entry, file = file.as_str(), "skipping dev artifact");
      }
      !excluded
    })
    .collect()
}
