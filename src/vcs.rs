//! Version-control inspection.
//!
//! Two questions are asked of git: the current short revision, and which
//! files changed relative to a base. The base depends on where we run:
//!
//! | Environment | Base |
//! |-------------|------|
//! | CI with `GITHUB_BASE_REF` and `GITHUB_SHA` set | `origin/<GITHUB_BASE_REF>` |
//! | anywhere else | `HEAD~1` |
//!
//! Inspection never fails. An unknown revision is omitted from the report;
//! an unknown change set is reported as an empty list.
//!
//! Git is reached through the [`Vcs`] trait so the base selection and the
//! failure mapping can be exercised without a git binary.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum VcsError {
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("git {args} exited with {status}: {stderr}")]
    Failed {
        args: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("git returned an empty revision")]
    EmptyRevision,
}

/// Narrow view of a version-control system.
pub trait Vcs {
    /// Abbreviated identifier of the checked-out revision.
    fn short_ref(&self) -> Result<String, VcsError>;
    /// Paths changed between `base` and the working tree.
    fn changed_files(&self, base: &str) -> Result<Vec<String>, VcsError>;
}

/// [`Vcs`] backed by the `git` binary, run inside the repository root.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_root: PathBuf,
}

impl GitCli {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String, VcsError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_root)
            .output()?;
        if !output.status.success() {
            return Err(VcsError::Failed {
                args: args.join(" "),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Vcs for GitCli {
    fn short_ref(&self) -> Result<String, VcsError> {
        let hash = self.run(&["rev-parse", "--short", "HEAD"])?.trim().to_string();
        if hash.is_empty() {
            return Err(VcsError::EmptyRevision);
        }
        Ok(hash)
    }

    fn changed_files(&self, base: &str) -> Result<Vec<String>, VcsError> {
        let stdout = self.run(&["diff", "--name-only", "-z", base, "--"])?;
        Ok(parse_name_list(&stdout))
    }
}

/// Split NUL-terminated `git diff -z` output into paths.
///
/// `-z` keeps non-ASCII and otherwise special names verbatim instead of
/// C-quoting them under `core.quotePath`.
fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split('\0')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// CI-related process environment, captured once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiEnv {
    /// `CI` is set to a non-empty value.
    pub ci: bool,
    /// Target branch of the pull request (`GITHUB_BASE_REF`).
    pub base_branch: Option<String>,
    /// Commit under test (`GITHUB_SHA`).
    pub sha: Option<String>,
}

impl CiEnv {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            ci: get("CI").is_some(),
            base_branch: get("GITHUB_BASE_REF"),
            sha: get("GITHUB_SHA"),
        }
    }

    /// Revision the change set is computed against.
    pub fn base_ref(&self) -> String {
        match (&self.base_branch, &self.sha) {
            (Some(branch), Some(_)) => format!("origin/{branch}"),
            _ => "HEAD~1".to_string(),
        }
    }
}

/// Revision and change set for the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VcsInfo {
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default)]
    pub changed_files: Vec<String>,
}

pub fn inspect(vcs: &dyn Vcs, ci: &CiEnv) -> VcsInfo {
    let reference = match vcs.short_ref() {
        Ok(hash) => Some(hash),
        Err(err) => {
            debug!(%err, "no revision available");
            None
        }
    };

    let base = ci.base_ref();
    let changed_files = vcs.changed_files(&base).unwrap_or_else(|err| {
        debug!(%base, %err, "no change set available");
        Vec::new()
    });

    VcsInfo {
        reference,
        changed_files,
    }
}
