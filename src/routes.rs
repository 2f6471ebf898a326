//! Page route discovery.
//!
//! Walks the app directory and turns every page-marker file into a route
//! derived from its parent directory:
//!
//! ```text
//! src/app/
//! ├── page.tsx                 → /
//! ├── layout.tsx               (ignored, not a page marker)
//! ├── about/page.tsx           → /about
//! ├── blog/[slug]/page.tsx     → /blog/[slug]
//! └── (marketing)/pricing/page.ts → /(marketing)/pricing
//! ```
//!
//! Directory names are copied verbatim: dynamic segments, catch-alls and
//! route groups are not interpreted. A missing app directory produces an
//! empty list.
//!
//! Symlinked directories are descended like real ones, so a route shared
//! from elsewhere in the repository is still found. Links that loop back to
//! an ancestor, dangling links and unreadable directories are skipped.

use crate::config::RoutesConfig;
use crate::reader::relative_display;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Component, Path};
use tracing::debug;
use walkdir::WalkDir;

/// A routable page and the file that defines it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Root-relative URL path, e.g. `/blog/[slug]`.
    pub route: String,
    /// Repository-relative source path with `/` separators.
    pub file: String,
}

/// Discover all routes under `config.app_dir`, sorted by route.
pub fn scan_routes(root: &Path, config: &RoutesConfig) -> Vec<RouteEntry> {
    let app_dir = root.join(&config.app_dir);
    if !app_dir.is_dir() {
        debug!(app_dir = %app_dir.display(), "no app directory, skipping route scan");
        return Vec::new();
    }

    let mut routes: Vec<RouteEntry> = WalkDir::new(&app_dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            // Loops, dangling links and permission errors
            Err(err) => {
                debug!(%err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| {
            is_page_marker(entry.file_name(), &config.page_markers) && entry.path().is_file()
        })
        .filter_map(|entry| {
            let parent = entry.path().parent()?;
            let rel = parent.strip_prefix(&app_dir).ok()?;
            Some(RouteEntry {
                route: derive_route(rel),
                file: relative_display(entry.path(), root),
            })
        })
        .collect();

    routes.sort_by(|a, b| a.route.cmp(&b.route).then_with(|| a.file.cmp(&b.file)));
    routes
}

fn is_page_marker(name: &OsStr, markers: &[String]) -> bool {
    markers.iter().any(|m| OsStr::new(m) == name)
}

/// Turn a page's directory (relative to the app dir) into a route.
///
/// - `""` → `/`
/// - `blog/[slug]` → `/blog/[slug]`
/// - `docs/page` → `/docs` (a trailing `page` directory is folded away)
/// - `page` → `/page` (only a `/page` suffix is stripped, so a lone or inner
///   `page` directory stays part of the route)
pub fn derive_route(rel_dir: &Path) -> String {
    let joined = rel_dir
        .components()
        .filter_map(|c| match c {
            Component::Normal(seg) => Some(seg.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");
    let trimmed = joined.strip_suffix("/page").unwrap_or(&joined);
    format!("/{trimmed}")
}
