//! JSON snapshot of a finished build, usable as a [`BuildPipeline`] outside a live bundler.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::collector::BuildPipeline;
use crate::models::AssetFlags;

/// Deserialised build stats: entrypoints and the info flags of each emitted asset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsSnapshot {
  /// Entrypoints in their defined order.
  #[serde(default)]
  pub entrypoints: Vec<EntrypointRecord>,
  /// Info flags keyed by emitted file name.
  #[serde(default)]
  pub assets: BTreeMap<String, AssetFlags>,
}

/// Entrypoint recorded in the stats snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct EntrypointRecord {
  /// Entry name.
  pub name: String,
  /// Files emitted for the entry, in chunk order.
  #[serde(default)]
  pub files: Vec<String>,
}

impl StatsSnapshot {
  /// Load a stats snapshot from disk.
  pub fn load(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path)
      .with_context(|| format!("build stats not found at {}", path.display()))?;
    Self::from_json(&content)
      .with_context(|| format!("failed to parse build stats at {}", path.display()))
  }

  /// Parse a stats snapshot from a JSON string.
  pub fn from_json(content: &str) -> Result<Self> {
    serde_json::from_str(content).context("invalid build stats JSON")
  }
}

impl BuildPipeline for StatsSnapshot {
  fn entry_names(&self) -> Vec<String> {
    self
      .entrypoints
      .iter()
      .map(|entry| entry.name.clone())
      .collect()
  }

  fn entry_files(&self, entry: &str) -> Option<Vec<String>> {
    self
      .entrypoints
      .iter()
      .find(|record| record.name == entry)
      .map(|record| record.files.clone())
  }

  fn asset_flags(&self, file: &str) -> Option<AssetFlags> {
    self.assets.get(file).copied()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::manifest::collect_entry_files;
  use tempfile::tempdir;

  const STATS: &str = r#"{
    "entrypoints": [
      {"name": "other", "files": ["other.js"]},
      {"name": "app", "files": ["app.js", "app.css", "app.3f2a.hot-update.js"]}
    ],
    "assets": {
      "app.js": {},
      "app.3f2a.hot-update.js": {"hotModuleReplacement": true}
    }
  }"#;

  #[test]
  fn keeps_entrypoint_order() {
    let stats = StatsSnapshot::from_json(STATS).unwrap();
    assert_eq!(stats.entry_names(), vec!["other", "app"]);
  }

  #[test]
  fn collects_files_without_hot_updates() {
    let stats = StatsSnapshot::from_json(STATS).unwrap();
    assert_eq!(collect_entry_files(&stats, Some("app")), vec![
      "app.js", "app.css"
    ]);
    assert_eq!(stats.asset_flags("app.css"), None);
  }

  #[test]
  fn load_reads_snapshot_from_disk() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join("stats.json");
    fs::write(&path, STATS).expect("failed to write stats file");

    let stats = StatsSnapshot::load(&path).expect("stats should load");
    assert_eq!(stats.entrypoints.len(), 2);
  }

  #[test]
  fn load_reports_missing_file() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join("missing.json");

    let err = StatsSnapshot::load(&path).unwrap_err();
    assert!(err.to_string().contains("build stats not found"));
  }
}
