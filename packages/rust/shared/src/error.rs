//! Error types for docfill.
//!
//! Library crates use [`DocfillError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Every variant is terminal: nothing is caught and retried, and no output
//! file is produced once a stage has failed.

use std::path::PathBuf;

/// Top-level error type for all docfill operations.
#[derive(Debug, thiserror::Error)]
pub enum DocfillError {
    /// Config path does not resolve to an existing file.
    #[error("config file '{}' not found", .path.display())]
    ConfigNotFound { path: PathBuf },

    /// Config file content is not the expected JSON structure.
    #[error("invalid JSON format in config file '{}': {source}", .path.display())]
    ConfigMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Document path does not resolve to an existing file.
    #[error("document file '{}' not found", .path.display())]
    DocumentNotFound { path: PathBuf },

    /// Document file is not a readable DOCX package.
    #[error("document '{}' could not be read: {message}", .path.display())]
    DocumentMalformed { path: PathBuf, message: String },

    /// Traversal mode other than "table" or "paragraph".
    #[error("unsupported substitution mode '{mode}': expected 'table' or 'paragraph'")]
    UnsupportedMode { mode: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocfillError>;

impl DocfillError {
    /// Create a malformed-document error from any displayable message.
    pub fn document_malformed(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::DocumentMalformed {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = DocfillError::ConfigNotFound {
            path: PathBuf::from("missing.json"),
        };
        assert_eq!(err.to_string(), "config file 'missing.json' not found");

        let err = DocfillError::UnsupportedMode {
            mode: "cells".into(),
        };
        assert!(err.to_string().contains("unsupported substitution mode 'cells'"));
    }

    #[test]
    fn document_malformed_names_the_file() {
        let err = DocfillError::document_malformed("letter.docx", "not a ZIP archive");
        let msg = err.to_string();
        assert!(msg.contains("letter.docx"));
        assert!(msg.contains("not a ZIP archive"));
    }
}
