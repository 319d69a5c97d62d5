//! Error types for the EPC registry client.

use std::path::{Path, PathBuf};

/// Errors that can occur while querying the EPC registry or loading configuration.
///
/// The three registry variants (`RequestFailed`, `ParseFailed`,
/// `TransportFailed`) are handled identically at the boundary: they are
/// logged, and the user action that triggered them stalls with session
/// state left at its prior value.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EpcError {
    /// The registry answered with a non-success HTTP status.
    #[error("Registry request failed: HTTP {status} from {url}")]
    RequestFailed {
        /// HTTP status code returned by the registry
        status: u16,
        /// Request URL, including the query string
        url: String,
    },

    /// The registry body was present but was not the expected JSON.
    #[error("Failed to parse registry response: {source}")]
    ParseFailed {
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The raw body that failed to parse
        body: String,
    },

    /// Network-level failure (DNS, connection, reading the body).
    #[error("Registry transport failed: {message}")]
    TransportFailed {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error tied to a specific file
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
        /// Path being read or written
        path: PathBuf,
    },

    /// TOML config file could not be parsed
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Paging or selection was requested before any search was submitted
    #[error("No active search: submit a search first")]
    NoActiveSearch,

    /// A result could not be selected
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
}

/// Convenience `Result` type alias for EPC operations.
pub type Result<T> = std::result::Result<T, EpcError>;

impl EpcError {
    /// Returns whether this error came from talking to the registry.
    pub fn is_registry_failure(&self) -> bool {
        matches!(
            self,
            EpcError::RequestFailed { .. }
                | EpcError::ParseFailed { .. }
                | EpcError::TransportFailed { .. }
        )
    }

    /// Creates a new transport error with a message.
    pub fn transport<S: Into<String>>(message: S) -> Self {
        EpcError::TransportFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new transport error with a message and source error.
    pub fn transport_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        EpcError::TransportFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        EpcError::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it concerns.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        EpcError::Io {
            source,
            path: path.as_ref().to_path_buf(),
        }
    }
}
