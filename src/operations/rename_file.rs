#![deny(warnings)]

// Move or rename a file

use crate::error::{FileAction, FileOpError, OpResult};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Move `old_path` to `new_path`, creating the destination's parent
/// directories when needed. An existing destination is never replaced.
pub fn rename_file(old_path: &str, new_path: &str) -> OpResult<()> {
    if !Path::new(old_path).exists() {
        return Err(FileOpError::FileNotFound(old_path.to_string()));
    }

    let dest_path = Path::new(new_path);
    if dest_path.exists() {
        return Err(FileOpError::DestinationExists(new_path.to_string()));
    }

    let renaming_error = |e| FileOpError::from_io_error(FileAction::RenamingFile, e);

    if let Some(parent) = dest_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(renaming_error)?;
        }
    }

    fs::rename(old_path, new_path).map_err(renaming_error)?;

    debug!(from = old_path, to = new_path, "renamed file");
    Ok(())
}
