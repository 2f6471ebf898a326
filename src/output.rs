//! CLI output formatting.
//!
//! The JSON report is the deliverable; this module renders the short
//! human-readable summary printed after a run so the reviewer sees at a
//! glance what went into it.
//!
//! # Output Format
//!
//! ```text
//! [review:kit] Wrote review-kit/REVIEW_KIT.json
//!
//! Package
//!     fixture-shop 0.3.0
//!     3 scripts, 3 dependencies, 3 dev dependencies
//!
//! Routes (2)
//!     /               src/app/page.tsx
//!     /blog/[slug]    src/app/blog/[slug]/page.tsx
//!
//! Env
//!     Example only: SENTRY_DSN
//!     Missing in example: LOCAL_DEBUG
//!     Present in both: 2 keys
//!
//! Schema
//!     prisma/schema.prisma (21 lines)
//!
//! VCS
//!     Ref: 1a2b3c4
//!     Changed files: 3
//! ```
//!
//! Each section has a `format_*` function returning `Vec<String>` for
//! testability; [`print_summary`] writes the lines to stdout.

use crate::env_audit::EnvAudit;
use crate::manifest::PackageSummary;
use crate::report::Report;
use crate::routes::RouteEntry;
use crate::schema::SchemaSnapshot;
use crate::vcs::VcsInfo;
use std::collections::BTreeMap;

/// Prefix on the line announcing the written report.
pub const WROTE_PREFIX: &str = "[review:kit] Wrote";

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 script`, `3 scripts`.
fn count_noun(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Comma-joined keys, or `none`.
fn key_list(keys: &[String]) -> String {
    if keys.is_empty() {
        "none".to_string()
    } else {
        keys.join(", ")
    }
}

pub fn format_wrote_line(relative_path: &str) -> String {
    format!("{WROTE_PREFIX} {relative_path}")
}

pub fn format_package(package: Option<&PackageSummary>) -> Vec<String> {
    let mut lines = vec!["Package".to_string()];
    let Some(package) = package else {
        lines.push(format!("{}(no manifest)", indent(1)));
        return lines;
    };

    let name = package.name.as_deref().unwrap_or("(unnamed)");
    match package.version.as_deref() {
        Some(version) => lines.push(format!("{}{} {}", indent(1), name, version)),
        None => lines.push(format!("{}{}", indent(1), name)),
    }

    let len = |map: &Option<BTreeMap<String, String>>| map.as_ref().map_or(0, BTreeMap::len);
    lines.push(format!(
        "{}{}, {}, {}",
        indent(1),
        count_noun(len(&package.scripts), "script", "scripts"),
        count_noun(len(&package.dependencies), "dependency", "dependencies"),
        count_noun(
            len(&package.dev_dependencies),
            "dev dependency",
            "dev dependencies"
        ),
    ));
    lines
}

pub fn format_routes(routes: &[RouteEntry]) -> Vec<String> {
    let mut lines = vec![format!("Routes ({})", routes.len())];
    let width = routes.iter().map(|r| r.route.len()).max().unwrap_or(0);
    for entry in routes {
        lines.push(format!(
            "{}{:<width$}    {}",
            indent(1),
            entry.route,
            entry.file,
            width = width
        ));
    }
    lines
}

pub fn format_env_audit(audit: &EnvAudit) -> Vec<String> {
    vec![
        "Env".to_string(),
        format!("{}Example only: {}", indent(1), key_list(&audit.example_only)),
        format!(
            "{}Missing in example: {}",
            indent(1),
            key_list(&audit.missing_in_example)
        ),
        format!(
            "{}Present in both: {}",
            indent(1),
            count_noun(audit.present_in_both.len(), "key", "keys")
        ),
    ]
}

pub fn format_schema(schema: &SchemaSnapshot) -> Vec<String> {
    let detail = match (&schema.schema_path, &schema.schema) {
        (Some(path), Some(text)) => {
            format!("{path} ({})", count_noun(text.lines().count(), "line", "lines"))
        }
        (Some(path), None) => format!("{path} (unreadable)"),
        _ => "(not present)".to_string(),
    };
    vec!["Schema".to_string(), format!("{}{}", indent(1), detail)]
}

pub fn format_vcs(vcs: &VcsInfo) -> Vec<String> {
    vec![
        "VCS".to_string(),
        format!(
            "{}Ref: {}",
            indent(1),
            vcs.reference.as_deref().unwrap_or("(unknown)")
        ),
        format!("{}Changed files: {}", indent(1), vcs.changed_files.len()),
    ]
}

/// Format the full run summary. `written` is the report path relative to
/// the repository root, or `None` for a dry run.
pub fn format_summary(report: &Report, written: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(path) = written {
        lines.push(format_wrote_line(path));
        lines.push(String::new());
    }
    let sections = [
        format_package(report.package.as_ref()),
        format_routes(&report.routes),
        format_env_audit(&report.env_audit),
        format_schema(&report.schema),
        format_vcs(&report.vcs),
    ];
    for (i, section) in sections.into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(section);
    }
    lines
}

/// Print the run summary to stdout.
pub fn print_summary(report: &Report, written: Option<&str>) {
    for line in format_summary(report, written) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn count_noun_pluralizes() {
        assert_eq!(count_noun(1, "key", "keys"), "1 key");
        assert_eq!(count_noun(0, "key", "keys"), "0 keys");
        assert_eq!(count_noun(2, "dependency", "dependencies"), "2 dependencies");
    }

    #[test]
    fn key_list_empty_is_none() {
        assert_eq!(key_list(&[]), "none");
        assert_eq!(key_list(&["A".into(), "B".into()]), "A, B");
    }

    #[test]
    fn wrote_line_uses_prefix() {
        assert_eq!(
            format_wrote_line("review-kit/REVIEW_KIT.json"),
            "[review:kit] Wrote review-kit/REVIEW_KIT.json"
        );
    }

    #[test]
    fn package_without_manifest() {
        assert_eq!(format_package(None), vec!["Package", "    (no manifest)"]);
    }

    #[test]
    fn package_counts_dependencies() {
        let package = crate::manifest::parse_manifest(
            r#"{"name":"x","version":"1.0.0","scripts":{"dev":"d"},"dependencies":{"a":"1","b":"2"}}"#,
        )
        .unwrap();
        assert_eq!(
            format_package(Some(&package)),
            vec![
                "Package",
                "    x 1.0.0",
                "    1 script, 2 dependencies, 0 dev dependencies",
            ]
        );
    }

    #[test]
    fn routes_aligned_in_columns() {
        let routes = vec![
            RouteEntry {
                route: "/".into(),
                file: "src/app/page.tsx".into(),
            },
            RouteEntry {
                route: "/blog".into(),
                file: "src/app/blog/page.tsx".into(),
            },
        ];
        assert_eq!(
            format_routes(&routes),
            vec![
                "Routes (2)",
                "    /        src/app/page.tsx",
                "    /blog    src/app/blog/page.tsx",
            ]
        );
    }

    #[test]
    fn env_audit_lines() {
        let audit = crate::env_audit::audit(Some("A=1\nC=1"), Some("B=\nC="));
        assert_eq!(
            format_env_audit(&audit),
            vec![
                "Env",
                "    Example only: B",
                "    Missing in example: A",
                "    Present in both: 1 key",
            ]
        );
    }

    #[test]
    fn schema_variants() {
        assert_eq!(format_schema(&SchemaSnapshot::default())[1], "    (not present)");
        let present = SchemaSnapshot {
            schema_path: Some("prisma/schema.prisma".into()),
            schema: Some("a\nb\n".into()),
        };
        assert_eq!(format_schema(&present)[1], "    prisma/schema.prisma (2 lines)");
        let unreadable = SchemaSnapshot {
            schema_path: Some("prisma/schema.prisma".into()),
            schema: None,
        };
        assert_eq!(
            format_schema(&unreadable)[1],
            "    prisma/schema.prisma (unreadable)"
        );
    }

    #[test]
    fn vcs_unknown_ref() {
        assert_eq!(
            format_vcs(&VcsInfo::default()),
            vec!["VCS", "    Ref: (unknown)", "    Changed files: 0"]
        );
    }

    #[test]
    fn summary_starts_with_wrote_line() {
        let tmp = setup_fixtures();
        let report = collect_fixture(tmp.path(), &FakeVcs::unavailable());
        let lines = format_summary(&report, Some("review-kit/REVIEW_KIT.json"));
        assert_eq!(lines[0], "[review:kit] Wrote review-kit/REVIEW_KIT.json");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Package");
        assert!(lines.contains(&"Routes (5)".to_string()));
    }

    #[test]
    fn dry_run_summary_has_no_wrote_line() {
        let tmp = setup_fixtures();
        let report = collect_fixture(tmp.path(), &FakeVcs::unavailable());
        let lines = format_summary(&report, None);
        assert_eq!(lines[0], "Package");
        assert!(!lines.iter().any(|l| l.starts_with(WROTE_PREFIX)));
    }
}
