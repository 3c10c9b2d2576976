//! Unified Error Type System
//!
//! Centralized error types for the whole crate.
//!
//! ## Error Kinds
//!
//! - **Load**: a package directory cannot be read or parsed (skip and continue)
//! - **Output**: the output destination cannot be created (fatal)
//! - **Render**: writing to the output stream failed (per package)
//! - **Config**: configuration could not be merged or validated

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GodocError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Load Errors
    // -------------------------------------------------------------------------
    #[error("Parse error in {path}: {message}")]
    Parse { message: String, path: String },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No Go package found in directory: {}", .0.display())]
    NoPackage(PathBuf),

    // -------------------------------------------------------------------------
    // Invocation Errors
    // -------------------------------------------------------------------------
    #[error("Cannot open output {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scan error: {0}")]
    Scan(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GodocError>;

impl GodocError {
    /// Create a parse error for a source file
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Attach a file path to a parse error that was created without one
    pub fn with_path(mut self, file: &str) -> Self {
        if let Self::Parse { ref mut path, .. } = self
            && path.is_empty()
        {
            *path = file.to_string();
        }
        self
    }

    /// Errors raised while loading a single package directory.
    ///
    /// The batch generator skips the directory and continues on these.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::Read { .. } | Self::NoPackage(_)
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
