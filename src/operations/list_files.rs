#![deny(warnings)]

// List the entries of a single directory

use crate::error::{FileAction, FileOpError, OpResult};
use std::fs;
use std::path::Path;
use tracing::debug;

/// List the names of all entries directly inside `directory_path`.
///
/// Files and subdirectories are both returned, in whatever order the
/// directory iterator yields them. There is no recursion.
pub fn list_files(directory_path: &str) -> OpResult<Vec<String>> {
    let path_obj = Path::new(directory_path);

    if !path_obj.exists() {
        return Err(FileOpError::DirectoryNotFound(directory_path.to_string()));
    }

    if !path_obj.is_dir() {
        return Err(FileOpError::NotADirectory(directory_path.to_string()));
    }

    let listing_error = |e| FileOpError::from_io_error(FileAction::ListingFiles, e);

    let mut names = Vec::new();
    for entry in fs::read_dir(path_obj).map_err(listing_error)? {
        let entry = entry.map_err(listing_error)?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    debug!(path = directory_path, count = names.len(), "listed directory");
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_list_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_str().unwrap();

        fs::write(dir.path().join("file1.txt"), "content1").unwrap();
        fs::write(dir.path().join("file2.txt"), "content2").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();
        fs::write(dir.path().join("subdir").join("nested.txt"), "x").unwrap();

        let mut names = list_files(path).unwrap();
        names.sort();
        assert_eq!(names, vec!["file1.txt", "file2.txt", "subdir"]);
    }

    #[test]
    fn test_list_files_empty_directory() {
        let dir = TempDir::new().unwrap();
        let names = list_files(dir.path().to_str().unwrap()).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_list_files_includes_hidden_entries() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();

        let names = list_files(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(names, vec![".hidden"]);
    }

    #[test]
    fn test_list_files_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let missing = missing.to_str().unwrap();

        let err = list_files(missing).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            err.to_string(),
            format!("Error: Directory '{}' does not exist", missing)
        );
    }

    #[test]
    fn test_list_files_on_regular_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        let file = file.to_str().unwrap();

        let err = list_files(file).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.to_string(), format!("Error: '{}' is not a directory", file));
    }
}
