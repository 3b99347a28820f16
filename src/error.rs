use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that stop a document check
///
/// Element-local defects are never errors; they are reported through a
/// [`DiagnosticSink`](crate::diagnostics::DiagnosticSink).
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("File {} not found", path.display())]
    NotFound { path: PathBuf },

    #[error("Malformed document {}: {details}", path.display())]
    MalformedDocument { path: PathBuf, details: String },

    #[error("Root tag of {} is no \"Xdmf\" (found \"{found}\")", path.display())]
    WrongRoot { path: PathBuf, found: String },

    #[error("Invalid integer {value:?} in {attribute} attribute at line {line}")]
    InvalidInteger {
        attribute: &'static str,
        value: String,
        line: u32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CheckError {
    /// Errors that the command line reports with the `-1` exit status
    pub fn is_document_rejection(&self) -> bool {
        matches!(
            self,
            CheckError::NotFound { .. } | CheckError::WrongRoot { .. }
        )
    }
}

/// Configuration-specific error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Environment variable error: {0}")]
    Environment(String),

    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CheckError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
