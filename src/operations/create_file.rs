#![deny(warnings)]

// Create a new file with optional initial content

use crate::error::{FileAction, FileOpError, OpResult};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::debug;

/// Create `file_path` and write `content` into it.
///
/// Missing parent directories are created first. An existing file is never
/// overwritten.
pub fn create_file(file_path: &str, content: &str) -> OpResult<()> {
    let path_obj = Path::new(file_path);
    let creating_error = |e| FileOpError::from_io_error(FileAction::CreatingFile, e);

    if let Some(parent) = path_obj.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(creating_error)?;
        }
    }

    if path_obj.exists() {
        return Err(FileOpError::FileExists(file_path.to_string()));
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path_obj)
        .map_err(|e| match e.kind() {
            // Lost a race with another creator.
            ErrorKind::AlreadyExists => FileOpError::FileExists(file_path.to_string()),
            _ => creating_error(e),
        })?;

    file.write_all(content.as_bytes()).map_err(creating_error)?;

    debug!(path = file_path, bytes = content.len(), "created file");
    Ok(())
}
