//! Environment-variable drift between `.env` and `.env.example`.
//!
//! Only key presence is compared; values are never read into the report.
//! A line contributes a key when, after trimming, it is non-empty, does not
//! start with `#`, and contains `=`. The key is the trimmed text before the
//! first `=`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Three-way partition of the keys found in the two files.
///
/// Every key from either file lands in exactly one list. Lists are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvAudit {
    /// Declared in the example file but not set in the real file.
    pub example_only: Vec<String>,
    /// Set in the real file but undocumented in the example file.
    pub missing_in_example: Vec<String>,
    pub present_in_both: Vec<String>,
}

/// Extract the set of declared keys from env file content.
pub fn parse_env_keys(content: Option<&str>) -> BTreeSet<String> {
    content
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, _)| key.trim().to_string())
        .collect()
}

/// Compare the real env file against the example file.
pub fn audit(real: Option<&str>, example: Option<&str>) -> EnvAudit {
    let real = parse_env_keys(real);
    let example = parse_env_keys(example);

    EnvAudit {
        example_only: example.difference(&real).cloned().collect(),
        missing_in_example: real.difference(&example).cloned().collect(),
        present_in_both: example.intersection(&real).cloned().collect(),
    }
}
