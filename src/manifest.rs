//! `package.json` summary.
//!
//! The manifest is either summarized whole or not at all: a missing file,
//! invalid JSON, a non-object document, or a field of the wrong type all
//! yield `None`.

use crate::config::PackageConfig;
use crate::reader::read_text;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// The parts of the manifest a reviewer cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<BTreeMap<String, String>>,
}

/// Parse manifest text. Unrelated manifest fields are ignored.
pub fn parse_manifest(content: &str) -> Result<PackageSummary, serde_json::Error> {
    serde_json::from_str(content)
}

pub fn read_manifest(root: &Path, config: &PackageConfig) -> Option<PackageSummary> {
    let path = root.join(&config.manifest);
    let Some(content) = read_text(&path) else {
        debug!(path = %path.display(), "no manifest");
        return None;
    };
    match parse_manifest(&content) {
        Ok(summary) => Some(summary),
        Err(err) => {
            warn!(path = %path.display(), %err, "malformed manifest, omitting package section");
            None
        }
    }
}
