//! # review-kit
//!
//! A pre-review audit generator for web application repositories. One run
//! inspects the repository and writes a single JSON report a human reviewer
//! can read before opening the diff.
//!
//! # Architecture: Extractors Into One Report
//!
//! ```text
//! package.json          →  manifest   ┐
//! src/app/**/page.tsx   →  routes     │
//! .env + .env.example   →  env_audit  ├─→  report  →  review-kit/REVIEW_KIT.json
//! prisma/schema.prisma  →  schema     │
//! git                   →  vcs        ┘
//! ```
//!
//! Each extractor is a function of the repository state and nothing else. A
//! missing file, malformed manifest or absent git yields an empty or omitted
//! section, never an error, so one broken input cannot hide the others. The
//! only fatal failure is being unable to write the report.
//!
//! Extraction is sequential and synchronous. There is no caching: every run
//! rebuilds the report from scratch and overwrites the previous one.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`report`] | Runs the extractors in order, assembles and writes the [`report::Report`] |
//! | [`routes`] | Walks the app directory and derives routes from page-marker files |
//! | [`env_audit`] | Three-way key comparison of `.env` and `.env.example` |
//! | [`schema`] | Verbatim snapshot of the schema file |
//! | [`vcs`] | Current revision and changed files, behind the [`vcs::Vcs`] trait |
//! | [`manifest`] | `package.json` summary |
//! | [`reader`] | Fail-soft file reads shared by the extractors |
//! | [`config`] | `review-kit.toml` loading, merging and validation |
//! | [`output`] | CLI summary formatting |
//!
//! # Report Shape
//!
//! ```json
//! {
//!   "meta": { "generatedAt": "2024-05-01T12:00:00.000Z", "ci": false, "runtime": "dev@1a2b3c4" },
//!   "package": { "name": "shop", "version": "1.0.0", "scripts": {}, "dependencies": {} },
//!   "routes": [ { "route": "/", "file": "src/app/page.tsx" } ],
//!   "envAudit": { "exampleOnly": [], "missingInExample": [], "presentInBoth": ["DATABASE_URL"] },
//!   "schema": { "schemaPath": null, "schema": null },
//!   "vcs": { "ref": "1a2b3c4", "changedFiles": ["src/app/page.tsx"] }
//! }
//! ```

pub mod config;
pub mod env_audit;
pub mod manifest;
pub mod output;
pub mod reader;
pub mod report;
pub mod routes;
pub mod schema;
pub mod vcs;

#[cfg(test)]
pub(crate) mod test_helpers;
