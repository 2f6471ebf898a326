//! Audit configuration.
//!
//! Every extractor looks for its input at a conventional path relative to the
//! repository root. Those conventions can be overridden by a `review-kit.toml`
//! at the root:
//!
//! ```text
//! repo/
//! ├── review-kit.toml          # Optional overrides
//! ├── package.json             # [package] manifest
//! ├── .env                     # [env] file
//! ├── .env.example             # [env] example_file
//! ├── prisma/schema.prisma     # [schema] path
//! └── src/app/                 # [routes] app_dir
//!     ├── page.tsx             # → /
//!     └── blog/[slug]/page.tsx # → /blog/[slug]
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [routes]
//! app_dir = "src/app"
//! page_markers = ["page.tsx", "page.ts"]
//!
//! [env]
//! file = ".env"
//! example_file = ".env.example"
//!
//! [schema]
//! path = "prisma/schema.prisma"
//!
//! [package]
//! manifest = "package.json"
//!
//! [output]
//! dir = "review-kit"
//! file = "REVIEW_KIT.json"
//! ```
//!
//! Config files are sparse: user values are merged over the stock defaults
//! and unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// File name looked up in the repository root.
pub const CONFIG_FILENAME: &str = "review-kit.toml";

/// Why a `review-kit.toml` could not become a [`ReviewConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not valid TOML or unknown key: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("built-in defaults failed to serialize: {0}")]
    Defaults(#[from] toml::ser::Error),
    #[error("{0}")]
    Validation(String),
}

/// Audit configuration loaded from `review-kit.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewConfig {
    /// Page route discovery.
    pub routes: RoutesConfig,
    /// Environment file locations.
    pub env: EnvConfig,
    /// Schema snapshot location.
    pub schema: SchemaConfig,
    /// Project manifest location.
    pub package: PackageConfig,
    /// Report destination.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutesConfig {
    /// Directory holding the page tree, relative to the repository root.
    pub app_dir: String,
    /// File names that mark a directory as a routable page.
    pub page_markers: Vec<String>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            app_dir: "src/app".to_string(),
            page_markers: vec!["page.tsx".to_string(), "page.ts".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvConfig {
    /// The real environment file.
    pub file: String,
    /// The committed template listing expected keys.
    pub example_file: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            file: ".env".to_string(),
            example_file: ".env.example".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    pub path: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            path: "prisma/schema.prisma".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageConfig {
    pub manifest: String,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            manifest: "package.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory the report is written into, created if absent.
    pub dir: String,
    /// Report file name within `dir`.
    pub file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "review-kit".to_string(),
            file: "REVIEW_KIT.json".to_string(),
        }
    }
}

impl ReviewConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.routes.page_markers.is_empty() {
            return Err(ConfigError::Validation(
                "routes.page_markers must not be empty".into(),
            ));
        }
        if self.routes.page_markers.iter().any(|m| m.contains('/')) {
            return Err(ConfigError::Validation(
                "routes.page_markers must be bare file names".into(),
            ));
        }
        let paths = [
            ("routes.app_dir", &self.routes.app_dir),
            ("env.file", &self.env.file),
            ("env.example_file", &self.env.example_file),
            ("schema.path", &self.schema.path),
            ("package.manifest", &self.package.manifest),
            ("output.dir", &self.output.dir),
        ];
        for (key, value) in paths {
            if !is_repo_relative(value) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a relative path inside the repository, got {value:?}"
                )));
            }
        }
        if self.output.file.is_empty() || self.output.file.contains('/') {
            return Err(ConfigError::Validation(
                "output.file must be a non-empty file name".into(),
            ));
        }
        Ok(())
    }

    /// Absolute location of the report file for a repository root.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output.dir).join(&self.output.file)
    }
}

fn is_repo_relative(value: &str) -> bool {
    let path = Path::new(value);
    !value.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

// =============================================================================
// Layering: built-in defaults, then the repository's review-kit.toml
// =============================================================================

/// Built-in defaults as a TOML table, the bottom layer every override lands on.
pub fn default_layer() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(ReviewConfig::default())?)
}

/// Lay `overrides` over `defaults`.
///
/// Sections are combined key by key, so `[routes] app_dir = "app"` keeps the
/// default `page_markers`. Anything that is not a table, arrays included,
/// replaces the default outright.
pub fn overlay_toml(defaults: toml::Value, overrides: toml::Value) -> toml::Value {
    match (defaults, overrides) {
        (toml::Value::Table(mut section), toml::Value::Table(overrides)) => {
            for (key, value) in overrides {
                let layered = match section.remove(&key) {
                    Some(default) => overlay_toml(default, value),
                    None => value,
                };
                section.insert(key, layered);
            }
            toml::Value::Table(section)
        }
        (_, value) => value,
    }
}

/// Parse the repository's `review-kit.toml`, or `None` when it has none.
pub fn read_overrides(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = root.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    Ok(Some(toml::from_str(&content)?))
}

/// Apply optional overrides to the built-in defaults and check the result.
pub fn resolve_config(overrides: Option<toml::Value>) -> Result<ReviewConfig, ConfigError> {
    let layered = match overrides {
        Some(overrides) => overlay_toml(default_layer()?, overrides),
        None => default_layer()?,
    };
    let config: ReviewConfig = layered.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Configuration for auditing `root`.
pub fn load_config(root: &Path) -> Result<ReviewConfig, ConfigError> {
    resolve_config(read_overrides(root)?)
}

/// Returns a fully-commented stock `review-kit.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# review-kit configuration
# ========================
# Place this file at the repository root as review-kit.toml.
# Every key is optional; omitted keys keep the defaults shown here.
# All paths are relative to the repository root.

[routes]
# Directory holding the page tree. Each page marker below it becomes a route.
app_dir = "src/app"
# File names that mark their directory as a routable page.
page_markers = ["page.tsx", "page.ts"]

[env]
# Real environment file (usually untracked).
file = ".env"
# Committed template listing the expected keys.
example_file = ".env.example"

[schema]
# Schema definition captured verbatim into the report, if present.
path = "prisma/schema.prisma"

[package]
# Project manifest summarized into the report.
manifest = "package.json"

[output]
# The report is written to <dir>/<file>, overwriting any previous run.
dir = "review-kit"
file = "REVIEW_KIT.json"
"##
}
