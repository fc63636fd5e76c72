#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod models;
pub mod plugin;
pub mod resolver;
pub mod selection;

pub use config::PluginConfig;
pub use error::{ConfigError, PredicateError, SelectError};
pub use manifest::{BuildPipeline, StatsSnapshot, collect_entry_files};
pub use models::{AssetCategory, AssetFlags, AssetTag, AssetTags, SelectorContext};
pub use plugin::{
  AlterAssetTagsData, AlterAssetTagsHook, HookHost, PluginOptions, SelectAssetsPlugin,
  StandaloneHost,
};
pub use resolver::FilenameRule;
pub use selection::{Selector, smart_selector};
