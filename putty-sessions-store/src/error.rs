//! Typed error types for putty-sessions-store.
//!
//! Every variant names the namespace path (and field, where relevant) that
//! failed so the top-level driver can report a single line of context.

use thiserror::Error;

/// Errors produced while reading the session store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The namespace does not exist.
    #[error("Registry key '{path}' not found")]
    NotFound {
        /// Namespace path relative to the store root.
        path: String,
    },

    /// The namespace exists but could not be opened.
    #[error("Failed to open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Child namespaces could not be enumerated.
    #[error("Failed to get '{path}' keys: {source}")]
    Enumerate {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The named field is absent from the namespace.
    #[error("Value '{field}' not found in '{path}'")]
    FieldNotFound { path: String, field: String },

    /// The named field exists but could not be read as a string.
    #[error("Failed to get value '{field}' from '{path}': {reason}")]
    ReadField {
        path: String,
        field: String,
        reason: String,
    },

    /// Releasing a namespace handle failed.
    #[error("Failed to close '{path}': {source}")]
    Close {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A regedit export file could not be read from disk.
    #[error("Could not read export file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A regedit export file is malformed.
    #[error("Malformed export file at line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl StoreError {
    /// True when the namespace itself is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// True when the namespace exists but the requested field does not.
    pub fn is_field_not_found(&self) -> bool {
        matches!(self, StoreError::FieldNotFound { .. })
    }
}
