#![deny(warnings)]

// Append content to an existing file

use crate::error::{FileAction, FileOpError, OpResult};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Append `content` to the end of an existing file
pub fn add_to_file(file_path: &str, content: &str) -> OpResult<()> {
    if !Path::new(file_path).exists() {
        return Err(FileOpError::FileNotFound(file_path.to_string()));
    }

    let adding_error = |e| FileOpError::from_io_error(FileAction::AddingToFile, e);

    let mut file = OpenOptions::new()
        .append(true)
        .open(file_path)
        .map_err(adding_error)?;

    file.write_all(content.as_bytes()).map_err(adding_error)?;

    debug!(path = file_path, bytes = content.len(), "appended to file");
    Ok(())
}
