// error.rs — Error types for the notification subsystem.
//
// Store operations themselves never fail. Errors only come from the edges:
// parsing a kind name at the creation boundary, loading configuration, and
// toast sinks that touch the filesystem or a terminal.

use thiserror::Error;

/// Errors that can occur around notification handling.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// A file or stream I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize a toast or notification.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The configuration file is not valid TOML for [`crate::ConsoleConfig`].
    #[error("invalid configuration in {path}: {source}")]
    ConfigError {
        path: String,
        source: toml::de::Error,
    },

    /// A notification kind name outside `info|success|warning|error`.
    #[error("unknown notification kind '{0}' (expected info, success, warning or error)")]
    UnknownKind(String),

    /// A toast sink could not deliver a toast (non-fatal).
    #[error("toast sink error: {0}")]
    SinkError(String),
}
