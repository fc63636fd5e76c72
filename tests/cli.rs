//! Smoke tests running the `html-select-assets` binary against JSON fixtures.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use html_select_assets::AssetTags;
use tempfile::TempDir;

const STATS: &str = r#"{
  "entrypoints": [
    {"name": "app", "files": ["app.js", "app.css", "app.5d1c.hot-update.js"]},
    {"name": "other", "files": ["other.js"]}
  ],
  "assets": {"app.5d1c.hot-update.js": {"hotModuleReplacement": true}}
}"#;

const TAGS: &str = r#"{
  "scripts": [
    {"tagName": "script", "attributes": {"defer": true, "src": "/app.js"}},
    {"tagName": "script", "attributes": {"defer": true, "src": "/other.js"}}
  ],
  "styles": [
    {"tagName": "link", "voidTag": true, "attributes": {"href": "/app.css", "rel": "stylesheet"}}
  ],
  "meta": [
    {"tagName": "meta", "voidTag": true, "attributes": {"charset": "utf-8"}}
  ]
}"#;

fn workspace(config: Option<&str>) -> TempDir {
  let temp = TempDir::new().expect("failed to create temp dir");
  fs::write(temp.path().join("stats.json"), STATS).expect("failed to write stats");
  fs::write(temp.path().join("tags.json"), TAGS).expect("failed to write tags");
  if let Some(config) = config {
    fs::write(temp.path().join("select-assets.config.json"), config)
      .expect("failed to write config");
  }
  temp
}

fn run_cli(dir: &Path, args: &[&str]) -> Output {
  Command::new(env!("CARGO_BIN_EXE_html-select-assets"))
    .current_dir(dir)
    .args(["--stats", "stats.json", "--tags", "tags.json"])
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .expect("failed to run html-select-assets")
}

fn parse_stdout(output: &Output) -> AssetTags {
  assert!(
    output.status.success(),
    "command failed: {}",
    String::from_utf8_lossy(&output.stderr)
  );
  serde_json::from_slice(&output.stdout).expect("stdout should be asset tag JSON")
}

fn urls(tags: &AssetTags) -> Vec<&str> {
  tags
    .scripts
    .iter()
    .chain(&tags.styles)
    .filter_map(|tag| tag.reference_url())
    .collect()
}

#[test]
fn config_file_selects_smart_per_entry_pages() {
  let dir = workspace(Some(r#"{"selector": "smart", "filename": "[name].html"}"#));

  let tags = parse_stdout(&run_cli(dir.path(), &["--output-name", "other.html"]));
  assert_eq!(urls(&tags), vec!["/other.js"]);
  assert_eq!(tags.meta.len(), 1);

  let tags = parse_stdout(&run_cli(dir.path(), &["--output-name", "app.html"]));
  assert_eq!(urls(&tags), vec!["/app.js", "/app.css"]);
}

#[test]
fn flags_override_config_file() {
  let dir = workspace(Some(r#"{"selector": "smart", "filename": "[name].html"}"#));

  let tags = parse_stdout(&run_cli(dir.path(), &[
    "--output-name",
    "pages/app.html",
    "--filename",
    "pages/[name].html",
  ]));
  assert_eq!(urls(&tags), vec!["/app.js", "/app.css"]);
}

#[test]
fn defaults_keep_everything_without_config() {
  let dir = workspace(None);

  let tags = parse_stdout(&run_cli(dir.path(), &["--output-name", "index.html"]));
  assert_eq!(urls(&tags), vec!["/app.js", "/other.js", "/app.css"]);
}

#[test]
fn selector_flag_without_config_uses_index_filename() {
  let dir = workspace(None);

  // `index.html` resolves to the first entry under the default filename.
  let tags = parse_stdout(&run_cli(dir.path(), &[
    "--output-name",
    "index.html",
    "--selector",
    "smart",
  ]));
  assert_eq!(urls(&tags), vec!["/app.js", "/app.css"]);
}

#[test]
fn unknown_selector_fails() {
  let dir = workspace(None);

  let output = run_cli(dir.path(), &["--output-name", "app.html", "--selector", "bogus"]);
  assert!(!output.status.success());
  assert!(String::from_utf8_lossy(&output.stderr).contains("unknown selector 'bogus'"));
}
