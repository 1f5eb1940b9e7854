//! Error types for BadgeForge.
//!
//! Library crates use [`BadgeForgeError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all BadgeForge operations.
#[derive(Debug, thiserror::Error)]
pub enum BadgeForgeError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Input file missing or not valid JSON. Raised before any output
    /// is produced; a run that fails here writes nothing.
    #[error("input error: {message}")]
    Input { message: String },

    /// Filesystem I/O error (output directory creation, document write).
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Pinning service error (HTTP transport or rejected request).
    #[error("pinning error: {0}")]
    Pinning(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BadgeForgeError>;

impl BadgeForgeError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an input error from any displayable message.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input {
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
        let err = BadgeForgeError::config("missing Pinata credentials");
        assert_eq!(err.to_string(), "config error: missing Pinata credentials");

        let err = BadgeForgeError::input("files.json is not a JSON object");
        assert!(err.to_string().contains("files.json"));
    }
}
