//! Report assembly and persistence.
//!
//! [`collect`] runs every extractor once, in a fixed order, and builds one
//! immutable [`Report`]. Extractors are independent: each tolerates its own
//! missing inputs, so none can keep the others from contributing.
//! [`write_report`] is the only write in the pipeline and the only step
//! whose failure ends the run.

use crate::config::ReviewConfig;
use crate::env_audit::{self, EnvAudit};
use crate::manifest::{self, PackageSummary};
use crate::reader::read_text;
use crate::routes::{self, RouteEntry};
use crate::schema::{self, SchemaSnapshot};
use crate::vcs::{self, CiEnv, Vcs, VcsInfo};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// The consolidated pre-review report written to `REVIEW_KIT.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub meta: Meta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageSummary>,
    pub routes: Vec<RouteEntry>,
    pub env_audit: EnvAudit,
    pub schema: SchemaSnapshot,
    pub vcs: VcsInfo,
}

/// Run header. Always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// RFC 3339 UTC timestamp, millisecond precision.
    pub generated_at: String,
    pub ci: bool,
    /// Version of the generator that produced the report.
    pub runtime: String,
}

/// Everything a run needs that is not read from the repository itself.
pub struct AuditContext<'a> {
    pub root: &'a Path,
    pub config: &'a ReviewConfig,
    pub vcs: &'a dyn Vcs,
    pub ci: &'a CiEnv,
}

/// Version string embedded in `meta.runtime`.
///
/// Release builds report the package version; anything else reports the
/// commit it was built from.
pub fn runtime_version() -> String {
    if env!("REVIEW_KIT_RELEASE_TAG") == "true" {
        return format!("review-kit@{}", env!("CARGO_PKG_VERSION"));
    }
    match env!("REVIEW_KIT_BUILD_HASH") {
        "" => "dev@unknown".to_string(),
        hash => format!("dev@{hash}"),
    }
}

fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Run every extractor and assemble the report.
pub fn collect(ctx: &AuditContext) -> Report {
    let AuditContext {
        root,
        config,
        vcs: repo_vcs,
        ci,
    } = *ctx;

    let meta = Meta {
        generated_at: current_timestamp(),
        ci: ci.ci,
        runtime: runtime_version(),
    };

    let package = manifest::read_manifest(root, &config.package);
    debug!(present = package.is_some(), "manifest read");

    let routes = routes::scan_routes(root, &config.routes);
    debug!(count = routes.len(), "routes scanned");

    let env_audit = env_audit::audit(
        read_text(&root.join(&config.env.file)).as_deref(),
        read_text(&root.join(&config.env.example_file)).as_deref(),
    );
    debug!(
        example_only = env_audit.example_only.len(),
        missing_in_example = env_audit.missing_in_example.len(),
        "env audited"
    );

    let schema = schema::snapshot_schema(root, &config.schema);
    debug!(present = schema.schema_path.is_some(), "schema snapshotted");

    let vcs = vcs::inspect(repo_vcs, ci);
    debug!(reference = ?vcs.reference, changed = vcs.changed_files.len(), "vcs inspected");

    Report {
        meta,
        package,
        routes,
        env_audit,
        schema,
        vcs,
    }
}

/// Serialize `report` as pretty JSON to `path`, creating parent directories.
///
/// Any existing file is overwritten.
pub fn write_report(report: &Report, path: &Path) -> Result<(), ReportError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    fs::write(path, json).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Collect and persist a report, returning it with the path it was written to.
pub fn run(ctx: &AuditContext) -> Result<(Report, PathBuf), ReportError> {
    let report = collect(ctx);
    let path = ctx.config.output_path(ctx.root);
    write_report(&report, &path)?;
    Ok((report, path))
}
