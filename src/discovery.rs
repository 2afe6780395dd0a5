use jwalk::WalkDir;
use log::debug;
use std::path::{Path, PathBuf};

use crate::error::{NormalizeError, Result};

/// Find every file under `root`, at any depth, whose name ends with `.{extension}`.
///
/// The walk is sorted so the result order is stable between runs. An empty
/// result is not an error; the caller decides what to do with it.
pub fn find_annotation_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(NormalizeError::RootNotFound {
            root: root.to_path_buf(),
        });
    }

    let suffix = format!(".{}", extension);
    let files: Vec<PathBuf> = WalkDir::new(root)
        .skip_hidden(false)
        .sort(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_string_lossy().ends_with(&suffix))
        .map(|e| e.path())
        .collect();

    debug!(
        "Found {} *{} file(s) under {}",
        files.len(),
        suffix,
        root.display()
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_finds_files_at_mixed_depths() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::write(root.join("top.xml"), "<annotation/>").unwrap();
        fs::write(root.join("a/one.xml"), "<annotation/>").unwrap();
        fs::write(root.join("a/b/c/deep.xml"), "<annotation/>").unwrap();
        fs::write(root.join("a/b/notes.txt"), "ignored").unwrap();
        fs::write(root.join("a/one.xml.org"), "<annotation/>").unwrap();
        fs::write(root.join("a/b/upper.XML"), "<annotation/>").unwrap();

        let files = find_annotation_files(root, "xml").unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.contains(&root.join("top.xml")));
        assert!(files.contains(&root.join("a/one.xml")));
        assert!(files.contains(&root.join("a/b/c/deep.xml")));
    }

    #[test]
    fn test_order_is_stable() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        for name in ["c.xml", "a.xml", "b.xml"] {
            fs::write(root.join(name), "<annotation/>").unwrap();
        }
        let first = find_annotation_files(root, "xml").unwrap();
        let second = find_annotation_files(root, "xml").unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![root.join("a.xml"), root.join("b.xml"), root.join("c.xml")]
        );
    }

    #[test]
    fn test_empty_tree_is_not_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let files = find_annotation_files(temp_dir.path(), "xml").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_missing_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("nope");
        assert!(matches!(
            find_annotation_files(&missing, "xml"),
            Err(NormalizeError::RootNotFound { .. })
        ));
    }
}
