//! Shared test utilities for the review-kit test suite.
//!
//! Provides an isolated copy of the fixture repository, a scripted [`Vcs`]
//! double, and small extractors over [`Report`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let report = collect_fixture(tmp.path(), &FakeVcs::with_ref("abc1234"));
//!
//! assert_eq!(route_list(&report)[0], "/");
//! ```

use std::cell::RefCell;
use std::io;
use std::path::Path;
use tempfile::TempDir;

use crate::config::ReviewConfig;
use crate::report::{AuditContext, Report, collect};
use crate::vcs::{CiEnv, Vcs, VcsError};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/repo/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/repo");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Collect a report for `root` with default config and a local (non-CI) env.
pub fn collect_fixture(root: &Path, vcs: &dyn Vcs) -> Report {
    let config = ReviewConfig::default();
    let ci = CiEnv::default();
    collect(&AuditContext {
        root,
        config: &config,
        vcs,
        ci: &ci,
    })
}

/// Routes of a report, in report order.
pub fn route_list(report: &Report) -> Vec<&str> {
    report.routes.iter().map(|r| r.route.as_str()).collect()
}

// =========================================================================
// Scripted version control
// =========================================================================

/// A [`Vcs`] that answers from canned data and records diff bases.
///
/// `None` for either answer simulates a failing git command.
#[derive(Debug, Default)]
pub struct FakeVcs {
    reference: Option<String>,
    changes: Option<Vec<String>>,
    bases: RefCell<Vec<String>>,
}

impl FakeVcs {
    /// No repository: every query fails.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Revision lookup succeeds; diffs fail until [`with_changes`](Self::with_changes).
    pub fn with_ref(reference: &str) -> Self {
        Self {
            reference: Some(reference.to_string()),
            ..Self::default()
        }
    }

    pub fn with_changes(mut self, files: &[&str]) -> Self {
        self.changes = Some(files.iter().map(|f| f.to_string()).collect());
        self
    }

    /// Base revisions passed to `changed_files`, in call order.
    pub fn requested_bases(&self) -> Vec<String> {
        self.bases.borrow().clone()
    }
}

fn not_a_repository() -> VcsError {
    VcsError::Spawn(io::Error::new(
        io::ErrorKind::NotFound,
        "not a git repository",
    ))
}

impl Vcs for FakeVcs {
    fn short_ref(&self) -> Result<String, VcsError> {
        self.reference.clone().ok_or_else(not_a_repository)
    }

    fn changed_files(&self, base: &str) -> Result<Vec<String>, VcsError> {
        self.bases.borrow_mut().push(base.to_string());
        self.changes.clone().ok_or_else(not_a_repository)
    }
}
