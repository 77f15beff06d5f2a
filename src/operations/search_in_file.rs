#![deny(warnings)]

// Literal, case-sensitive line search within one file

use crate::error::{FileAction, FileOpError, OpResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    /// 1-based line number
    pub line_number: usize,
    /// The matching line with surrounding whitespace trimmed
    pub text: String,
}

/// Return every line of `file_path` that contains `search_term`.
///
/// Matching is plain substring containment, so an empty term matches every
/// line.
pub fn search_in_file(file_path: &str, search_term: &str) -> OpResult<Vec<LineMatch>> {
    if !Path::new(file_path).exists() {
        return Err(FileOpError::FileNotFound(file_path.to_string()));
    }

    let searching_error = |e| FileOpError::from_io_error(FileAction::SearchingInFile, e);

    let reader = BufReader::new(File::open(file_path).map_err(searching_error)?);

    let mut matches = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(searching_error)?;
        if line.contains(search_term) {
            matches.push(LineMatch {
                line_number: index + 1,
                text: line.trim().to_string(),
            });
        }
    }

    debug!(path = file_path, matches = matches.len(), "searched file");
    Ok(matches)
}
