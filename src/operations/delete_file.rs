#![deny(warnings)]

// Delete a single file

use crate::error::{FileAction, FileOpError, OpResult};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Remove a file. Directories are not removed.
pub fn delete_file(file_path: &str) -> OpResult<()> {
    if !Path::new(file_path).exists() {
        return Err(FileOpError::FileNotFound(file_path.to_string()));
    }

    fs::remove_file(file_path)
        .map_err(|e| FileOpError::from_io_error(FileAction::DeletingFile, e))?;

    debug!(path = file_path, "deleted file");
    Ok(())
}
