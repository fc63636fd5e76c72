//! Filter one document's asset tags against a build stats snapshot.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use html_select_assets::logging::init_tracing;
use html_select_assets::{
  AlterAssetTagsData, AssetTags, PluginConfig, SelectAssetsPlugin, StandaloneHost, StatsSnapshot,
};

/// Select which entry assets belong in a generated HTML document.
#[derive(Debug, Parser)]
#[command(name = "html-select-assets", version, about)]
struct Args {
  /// Build stats snapshot (entrypoints and asset flags) as JSON.
  #[arg(long)]
  stats: PathBuf,
  /// Candidate asset tags of the document as JSON.
  #[arg(long)]
  tags: PathBuf,
  /// Output name of the document being generated.
  #[arg(long)]
  output_name: String,
  /// Document filename pattern; overrides the configuration file.
  #[arg(long)]
  filename: Option<String>,
  /// Selector name; overrides the configuration file.
  #[arg(long)]
  selector: Option<String>,
  /// Directory searched for `select-assets.config.json`.
  #[arg(long, default_value = ".")]
  config_dir: PathBuf,
  /// Log resolution and selection decisions to stderr.
  #[arg(short, long)]
  verbose: bool,
}

fn run(args: Args) -> Result<()> {
  let config =
    PluginConfig::discover(&args.config_dir).with_overrides(args.selector, args.filename);

  let filename = config.filename_rule();
  let plugin = SelectAssetsPlugin::new(config.into_options()?);
  let hook = plugin.apply(&StandaloneHost)?;

  let stats = StatsSnapshot::load(&args.stats)?;
  let content = fs::read_to_string(&args.tags)
    .with_context(|| format!("failed to read {}", args.tags.display()))?;
  let asset_tags: AssetTags = serde_json::from_str(&content)
    .with_context(|| format!("failed to parse asset tags in {}", args.tags.display()))?;

  let result = hook.alter_asset_tags(&stats, AlterAssetTagsData {
    output_name: args.output_name,
    filename,
    asset_tags,
  })?;

  println!("{}", serde_json::to_string_pretty(&result.asset_tags)?);
  Ok(())
}

fn main() -> Result<()> {
  let args = Args::parse();
  init_tracing(args.verbose);
  run(args)
}
