#![deny(warnings)]

// Read the full contents of a file

use crate::error::{FileAction, FileOpError, OpResult};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a whole file as UTF-8 text
pub fn read_file(file_path: &str) -> OpResult<String> {
    if !Path::new(file_path).exists() {
        return Err(FileOpError::FileNotFound(file_path.to_string()));
    }

    let content = fs::read_to_string(file_path)
        .map_err(|e| FileOpError::from_io_error(FileAction::ReadingFile, e))?;

    debug!(path = file_path, bytes = content.len(), "read file");
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_read_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.txt");
        fs::write(&path, "line 1\nline 2\n").unwrap();

        let content = read_file(path.to_str().unwrap()).unwrap();
        assert_eq!(content, "line 1\nline 2\n");
    }

    #[test]
    fn test_read_file_keeps_crlf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dos.txt");
        fs::write(&path, "a\r\nb\r\n").unwrap();

        let content = read_file(path.to_str().unwrap()).unwrap();
        assert_eq!(content, "a\r\nb\r\n");
    }

    #[test]
    fn test_read_file_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");
        let path_str = path.to_str().unwrap();

        let err = read_file(path_str).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), format!("Error: File '{}' does not exist", path_str));
    }

    #[test]
    fn test_read_file_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.bin");
        fs::write(&path, b"\xff\xfe\x00\x80").unwrap();

        let err = read_file(path.to_str().unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(err.to_string().starts_with("Error reading file: "));
    }

    #[test]
    fn test_read_directory_is_unexpected() {
        let dir = TempDir::new().unwrap();
        let err = read_file(dir.path().to_str().unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }
}
