//! Error types for file objects and locating.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a string is not a valid simple name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// The name is empty.
    #[error("name is empty")]
    Empty,

    /// The name contains a package or path separator.
    #[error("`{name}` is a qualified name")]
    Qualified { name: String },

    /// The name contains a character that may not appear at `position`.
    #[error("`{name}` has an invalid character {ch:?} at {position}")]
    InvalidCharacter {
        name: String,
        ch: char,
        position: usize,
    },

    /// The name is a reserved keyword or literal.
    #[error("`{name}` is a reserved word")]
    Reserved { name: String },
}

/// Errors reported by file object operations.
#[derive(Debug, Error)]
pub enum FileObjectError {
    /// A required argument was absent.
    #[error("Missing required argument: {argument}")]
    MissingArgument { argument: &'static str },

    /// The simple name passed to a name check is not a bare identifier.
    #[error("Invalid simple name: {0}")]
    InvalidSimpleName(#[from] NameError),

    /// Access to the underlying content was refused.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// The underlying content does not exist.
    #[error("Not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file object does not support the operation.
    #[error("Unsupported operation on {name}: {operation}")]
    Unsupported {
        name: String,
        operation: &'static str,
    },

    /// Class file bytes could not be decoded.
    #[error("Invalid class file: {message}")]
    InvalidClassFile { message: String },

    /// A supported annotation type pattern does not follow the grammar.
    #[error("Invalid annotation type pattern `{pattern}`: {message}")]
    InvalidAnnotationPattern { pattern: String, message: String },
}

impl FileObjectError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a class file decoding error.
    pub fn class_file(message: impl Into<String>) -> Self {
        Self::InvalidClassFile {
            message: message.into(),
        }
    }

    /// Check if this is a security fault.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

/// Errors that abort locating file objects.
#[derive(Debug, Error)]
pub enum LocateError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl LocateError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of locate warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// Error reading a directory entry.
    ReadError,
    /// Error reading metadata.
    MetadataError,
    /// A class file could not be decoded; hints fell back to its name.
    MalformedClassFile,
}

/// Non-fatal problem encountered while locating file objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocateWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl LocateWarning {
    /// Create a new locate warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a permission denied warning.
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Permission denied: {}", path.display()),
            path,
            kind: WarningKind::PermissionDenied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_object_error_io() {
        let err = FileObjectError::io(
            "/src/Foo.java",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_permission_denied());

        let err = FileObjectError::io(
            "/src/Foo.java",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, FileObjectError::NotFound { .. }));
    }

    #[test]
    fn test_locate_error_io() {
        let err = LocateError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, LocateError::PermissionDenied { .. }));
    }

    #[test]
    fn test_locate_warning_creation() {
        let warning = LocateWarning::permission_denied("/test/path");
        assert_eq!(warning.kind, WarningKind::PermissionDenied);
        assert!(warning.message.contains("Permission denied"));
    }
}
