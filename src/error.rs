#![deny(warnings)]

// Error types for the file-ops-mcp crate

use std::fmt;
use thiserror::Error;

/// Main error type for the file-ops-mcp application
#[derive(Error, Debug)]
pub enum FileOpsMcpError {
    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MCP protocol errors
    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    /// Transport layer errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a failed file operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The target path is absent
    NotFound,
    /// The target already exists, or has the wrong type
    Conflict,
    /// Any other runtime failure
    Unexpected,
}

/// The operation that was in progress when an unexpected failure happened.
///
/// Each variant renders as the phrase used in `"Error <doing-X>: ..."`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    ListingFiles,
    CreatingFile,
    AddingToFile,
    ReadingFile,
    DeletingFile,
    SearchingInFile,
    RenamingFile,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phrase = match self {
            FileAction::ListingFiles => "listing files",
            FileAction::CreatingFile => "creating file",
            FileAction::AddingToFile => "adding to file",
            FileAction::ReadingFile => "reading file",
            FileAction::DeletingFile => "deleting file",
            FileAction::SearchingInFile => "searching in file",
            FileAction::RenamingFile => "renaming file",
        };
        f.write_str(phrase)
    }
}

/// File operation errors.
///
/// The `Display` text of every variant is the exact string handed back to
/// the caller of a tool.
#[derive(Error, Debug)]
pub enum FileOpError {
    #[error("Error: Directory '{0}' does not exist")]
    DirectoryNotFound(String),

    #[error("Error: '{0}' is not a directory")]
    NotADirectory(String),

    #[error("Error: File '{0}' does not exist")]
    FileNotFound(String),

    #[error("Error: File '{0}' already exists")]
    FileExists(String),

    #[error("Error: Destination '{0}' already exists")]
    DestinationExists(String),

    #[error("Error {action}: {source}")]
    Unexpected {
        action: FileAction,
        #[source]
        source: std::io::Error,
    },
}

impl FileOpError {
    /// Wrap an unexpected I/O failure that happened while performing `action`
    pub fn from_io_error(action: FileAction, error: std::io::Error) -> Self {
        FileOpError::Unexpected {
            action,
            source: error,
        }
    }

    /// Which tier of the error taxonomy this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            FileOpError::DirectoryNotFound(_) | FileOpError::FileNotFound(_) => {
                ErrorKind::NotFound
            }
            FileOpError::NotADirectory(_)
            | FileOpError::FileExists(_)
            | FileOpError::DestinationExists(_) => ErrorKind::Conflict,
            FileOpError::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }
}

/// MCP protocol errors
#[derive(Error, Debug)]
pub enum McpError {
    /// Invalid protocol version
    #[error("Unsupported protocol version: {0}")]
    InvalidProtocolVersion(String),

    /// Tool not found
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Invalid tool parameters
    #[error("Invalid tool parameters: {0}")]
    InvalidToolParameters(String),

    /// No resource matches the requested URI
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
}

/// Transport layer errors
#[derive(Error, Debug)]
pub enum TransportError {
    /// Invalid message format
    #[error("Invalid message format: {0}")]
    InvalidMessage(String),

    /// Connection closed
    #[error("Connection closed")]
    ConnectionClosed,

    /// IO error in transport
    #[error("Transport IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, FileOpsMcpError>;

/// Result of a single file operation
pub type OpResult<T> = std::result::Result<T, FileOpError>;
