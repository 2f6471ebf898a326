//! Snapshot of the data-schema file.

use crate::config::SchemaConfig;
use crate::reader::{read_text, relative_display};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Captured schema file. Both fields serialize as `null` when the file is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSnapshot {
    /// Repository-relative path, set whenever the file exists.
    pub schema_path: Option<String>,
    /// Full text, set when the file could be read.
    pub schema: Option<String>,
}

pub fn snapshot_schema(root: &Path, config: &SchemaConfig) -> SchemaSnapshot {
    let path = root.join(&config.path);
    if !path.exists() {
        return SchemaSnapshot::default();
    }
    SchemaSnapshot {
        schema_path: Some(relative_display(&path, root)),
        schema: read_text(&path),
    }
}
