//! Fail-soft file reads shared by every extractor.
//!
//! A missing file, a directory where a file was expected, a permission error
//! and invalid UTF-8 all collapse into `None`. Extractors never distinguish
//! "absent" from "unreadable": either way there is nothing to report.

use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a file's text content, or `None` if it cannot be read.
pub fn read_text(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(err) => {
            debug!(path = %path.display(), %err, "file not readable");
            None
        }
    }
}

/// Render `path` relative to `root` with `/` separators.
///
/// Falls back to the full path when `path` is not under `root`.
pub fn relative_display(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".env");
        fs::write(&path, "A=1\n").unwrap();
        assert_eq!(read_text(&path).as_deref(), Some("A=1\n"));
    }

    #[test]
    fn missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_text(&tmp.path().join("nope")), None);
    }

    #[test]
    fn directory_is_none() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_text(tmp.path()), None);
    }

    #[test]
    fn empty_file_is_some_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty");
        fs::write(&path, "").unwrap();
        assert_eq!(read_text(&path).as_deref(), Some(""));
    }

    #[test]
    fn invalid_utf8_is_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bin");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert_eq!(read_text(&path), None);
    }

    #[test]
    fn relative_display_uses_forward_slashes() {
        let root = Path::new("/repo");
        let path = root.join("src").join("app").join("page.tsx");
        assert_eq!(relative_display(&path, root), "src/app/page.tsx");
    }

    #[test]
    fn relative_display_outside_root_keeps_path() {
        assert_eq!(
            relative_display(Path::new("other/file"), Path::new("/repo")),
            "other/file"
        );
    }
}
