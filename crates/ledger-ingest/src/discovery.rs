//! Workbook discovery for ledger folders.

use std::path::{Path, PathBuf};

use ledger_model::SourceFile;

use crate::error::{IngestError, Result};

/// Recognized workbook extensions, listed in the order their files are returned.
pub const WORKBOOK_EXTENSIONS: [&str; 2] = ["xlsx", "xlsm"];

/// Discovers the workbooks in a directory.
///
/// Files are grouped by extension in [`WORKBOOK_EXTENSIONS`] order (every
/// `.xlsx`, then every `.xlsm`), each group sorted by filename. Hidden files
/// are skipped.
///
/// Fails with [`IngestError::DirectoryEmpty`] when nothing matches, without
/// distinguishing a missing directory from an empty one.
pub fn discover(dir: &Path) -> Result<Vec<SourceFile>> {
    let candidates = list_regular_files(dir);

    let mut files = Vec::new();
    for extension in WORKBOOK_EXTENSIONS {
        let mut group: Vec<&PathBuf> = candidates
            .iter()
            .filter(|path| has_extension(path, extension))
            .collect();
        group.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        files.extend(group.into_iter().map(SourceFile::from_path));
    }

    if files.is_empty() {
        return Err(IngestError::DirectoryEmpty {
            path: dir.to_path_buf(),
        });
    }

    tracing::debug!(
        dir = %dir.display(),
        file_count = files.len(),
        "discovered workbooks"
    );
    Ok(files)
}

/// Lists visible regular files; an unreadable directory yields an empty list.
fn list_regular_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::debug!(dir = %dir.display(), %error, "cannot read directory");
            return Vec::new();
        }
    };

    entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| !name.starts_with('.'))
        })
        .collect()
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), "data").unwrap();
        }
        dir
    }

    fn names(files: &[SourceFile]) -> Vec<&str> {
        files.iter().map(|file| file.name.as_str()).collect()
    }

    #[test]
    fn test_discover_groups_by_extension() {
        let dir = create_test_dir(&["b.xlsm", "c.xlsx", "a.xlsm", "a.xlsx", "notes.csv"]);
        let files = discover(dir.path()).unwrap();

        assert_eq!(names(&files), vec!["a.xlsx", "c.xlsx", "a.xlsm", "b.xlsm"]);
        assert_eq!(files[0].path, dir.path().join("a.xlsx"));
    }

    #[test]
    fn test_discover_extension_case_insensitive() {
        let dir = create_test_dir(&["UPPER.XLSX", "mixed.XlsM"]);
        let files = discover(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["UPPER.XLSX", "mixed.XlsM"]);
    }

    #[test]
    fn test_discover_skips_hidden_and_directories() {
        let dir = create_test_dir(&[".hidden.xlsx", "real.xlsx"]);
        std::fs::create_dir(dir.path().join("folder.xlsx")).unwrap();
        let files = discover(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["real.xlsx"]);
    }

    #[test]
    fn test_discover_empty_dir() {
        let dir = create_test_dir(&["readme.txt"]);
        let result = discover(dir.path());
        assert!(matches!(result, Err(IngestError::DirectoryEmpty { .. })));
    }

    #[test]
    fn test_discover_missing_dir_is_directory_empty() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");
        let result = discover(&missing);
        assert!(matches!(result, Err(IngestError::DirectoryEmpty { path }) if path == missing));
    }
}
