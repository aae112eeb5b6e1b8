use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// A single literal replacement: the byte span `[byte_start, byte_end)` of a
/// text buffer was swapped for `new_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Starting byte offset (inclusive)
    pub byte_start: usize,
    /// Ending byte offset (exclusive) of the replaced text
    pub byte_end: usize,
    /// Text inserted at byte_start
    pub new_text: String,
}

impl Edit {
    /// Replace the earliest occurrence of `search` in `content`.
    ///
    /// Returns the applied edit, or `None` (content untouched) when `search`
    /// is absent or empty. Later identical spans are never considered.
    pub fn replace_first(content: &mut String, search: &str, replace: &str) -> Option<Self> {
        if search.is_empty() {
            return None;
        }
        let byte_start = content.find(search)?;
        let byte_end = byte_start + search.len();
        content.replace_range(byte_start..byte_end, replace);
        Some(Self {
            byte_start,
            byte_end,
            new_text: replace.to_string(),
        })
    }
}

/// Overwrite `path` in place with `content`.
///
/// The existing file is opened for writing and truncated, so symlinks are
/// written through and a read-only target fails with `PermissionDenied`.
/// The file is never created.
pub fn write_in_place(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).truncate(true).open(path)?;
    file.write_all(content)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_replace_first_touches_earliest_span_only() {
        let mut content = "a foo b foo".to_string();
        let edit = Edit::replace_first(&mut content, "foo", "bar").unwrap();
        assert_eq!(content, "a bar b foo");
        assert_eq!((edit.byte_start, edit.byte_end), (2, 5));
        assert_eq!(edit.new_text, "bar");
    }

    #[test]
    fn test_replace_first_absent() {
        let mut content = "hello".to_string();
        assert!(Edit::replace_first(&mut content, "world", "x").is_none());
        assert_eq!(content, "hello");
    }

    #[test]
    fn test_replace_first_empty_search() {
        let mut content = "hello".to_string();
        assert!(Edit::replace_first(&mut content, "", "x").is_none());
        assert_eq!(content, "hello");
    }

    #[test]
    fn test_replace_first_multibyte() {
        let mut content = "héllo wörld".to_string();
        Edit::replace_first(&mut content, "wörld", "world").unwrap();
        assert_eq!(content, "héllo world");
    }

    #[test]
    fn test_write_in_place_replaces_content() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("page.tsx");
        fs::write(&file_path, "a much longer original content").unwrap();

        write_in_place(&file_path, b"short").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "short");
    }

    #[test]
    fn test_write_in_place_never_creates() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("missing.tsx");

        let err = write_in_place(&file_path, b"x").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!file_path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_in_place_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("page.tsx");
        fs::write(&file_path, "x").unwrap();
        fs::set_permissions(&file_path, fs::Permissions::from_mode(0o640)).unwrap();

        write_in_place(&file_path, b"y").unwrap();

        let mode = fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_in_place_rejects_read_only_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("page.tsx");
        fs::write(&file_path, "old").unwrap();
        fs::set_permissions(&file_path, fs::Permissions::from_mode(0o444)).unwrap();

        // root ignores file modes
        if OpenOptions::new().write(true).open(&file_path).is_ok() {
            return;
        }

        let err = write_in_place(&file_path, b"new").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "old");
    }
}
