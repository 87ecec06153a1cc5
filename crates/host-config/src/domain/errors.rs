//! Error types for configuration resolution

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while resolving or reading configuration.
///
/// Every variant is fatal at startup: retrying with unchanged sources yields
/// the same result.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A present source is syntactically invalid
    #[error("configuration source '{source_name}' is malformed at line {line}, column {column}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// A present source could not be read
    #[error("failed to read configuration source '{source_name}' at {}: {source}", path.display())]
    Io {
        source_name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source that is not optional was absent
    #[error("required configuration source '{source_name}' is missing")]
    SourceMissing { source_name: String },

    /// A component requires a key that is absent after full resolution
    #[error("missing required configuration value '{path}'")]
    MissingRequiredValue { path: String },

    /// A value exists but cannot be read as the requested type
    #[error("configuration value '{path}' is not a valid {expected}: {value:?}")]
    InvalidValue {
        path: String,
        expected: &'static str,
        value: String,
    },

    /// A section could not be bound to a typed structure
    #[error("failed to bind configuration section '{path}': {message}")]
    Bind { path: String, message: String },
}

impl ConfigError {
    /// Build a parse error from a `serde_json` failure.
    pub(crate) fn parse(source_name: &str, err: &serde_json::Error) -> Self {
        Self::Parse {
            source_name: source_name.to_string(),
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }

    /// Key path (or source name) this error is about.
    pub fn subject(&self) -> &str {
        match self {
            Self::Parse { source_name, .. }
            | Self::Io { source_name, .. }
            | Self::SourceMissing { source_name } => source_name,
            Self::MissingRequiredValue { path }
            | Self::InvalidValue { path, .. }
            | Self::Bind { path, .. } => path,
        }
    }
}
