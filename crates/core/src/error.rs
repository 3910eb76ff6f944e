use crate::resolver::ResolveMiss;
use std::io;
use std::path::PathBuf;

/// Errors that can occur during dbwire operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Template binding error: {0}")]
    BindingError(String),

    #[error("Source file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Package installation failed: {0}")]
    PackageError(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Unresolved(#[from] ResolveMiss),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Failures confined to a single edit; the run moves on to the next one
    pub fn is_edit_local(&self) -> bool {
        matches!(
            self,
            Error::BindingError(_) | Error::ConfigError(_) | Error::Unresolved(_)
        )
    }
}

/// Invalid or missing command inputs, detected before any file is touched
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing/Invalid --type option.")]
    InvalidProvider { valid_options: String },

    #[error("Missing/Invalid --apphost-project option.")]
    InvalidAppHostProject,

    #[error("Missing/Invalid --project option.")]
    InvalidProject,

    #[error("Missing/Invalid --context option.")]
    InvalidContextName,

    #[error("Missing/Invalid --model option.")]
    InvalidModel,
}

impl ValidationError {
    /// The list of accepted values, when the failure concerns an enumerated option
    pub fn valid_options(&self) -> Option<&str> {
        match self {
            ValidationError::InvalidProvider { valid_options } => Some(valid_options),
            _ => None,
        }
    }
}

/// Result type alias for dbwire operations
pub type Result<T> = std::result::Result<T, Error>;
