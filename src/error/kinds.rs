use std::{fmt, io};

use crate::error::mongo::format_mongodb_error;

/// Crate-wide `Result` type using [`AtlasOpsError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, AtlasOpsError>;

/// Top-level error type for atlas-ops.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate. Every variant is
/// fatal: the binary runs one operation and exits, so errors propagate
/// straight up to `main`.
#[derive(Debug)]
pub enum AtlasOpsError {
    /// Configuration errors (missing environment, bad config file).
    Config(ConfigError),

    /// Connection-related errors.
    Connection(ConnectionError),

    /// Operation execution errors.
    Execution(ExecutionError),

    /// I/O errors.
    Io(io::Error),

    /// MongoDB driver errors.
    MongoDb(mongodb::error::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// A required environment variable is not set.
    MissingEnv(String),

    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/// Connection-specific errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// Failed to establish a connection.
    ConnectionFailed(String),

    /// Invalid connection URI.
    InvalidUri(String),

    /// Not currently connected to MongoDB.
    NotConnected,

    /// Ping command failed.
    PingFailed(String),
}

/// Execution-specific errors.
#[derive(Debug)]
pub enum ExecutionError {
    /// The positional operation argument is not one of "1".."6".
    InvalidOperation(String),

    /// Query execution failed.
    QueryFailed(String),

    /// A document could not be serialized for the driver.
    InvalidDocument(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for AtlasOpsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtlasOpsError::Config(e) => write!(f, "Configuration error: {e}"),
            AtlasOpsError::Connection(e) => write!(f, "Connection error: {e}"),
            AtlasOpsError::Execution(e) => write!(f, "Execution error: {e}"),
            AtlasOpsError::Io(e) => write!(f, "I/O error: {e}"),
            AtlasOpsError::MongoDb(e) => format_mongodb_error(f, e),
            AtlasOpsError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingEnv(var) => {
                write!(f, "{var} missing from environment, add it to a .env file")
            }
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::ConnectionFailed(msg) => write!(f, "Failed to connect: {msg}"),
            ConnectionError::InvalidUri(uri) => write!(f, "Invalid connection URI: {uri}"),
            ConnectionError::NotConnected => write!(f, "Not connected to MongoDB"),
            ConnectionError::PingFailed(msg) => write!(f, "Ping failed: {msg}"),
        }
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::InvalidOperation(arg) => {
                write!(f, "Invalid operation '{arg}' (expected a number from 1 to 6)")
            }
            ExecutionError::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            ExecutionError::InvalidDocument(msg) => write!(f, "Invalid document: {msg}"),
        }
    }
}

impl std::error::Error for AtlasOpsError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for ConnectionError {}
impl std::error::Error for ExecutionError {}

/* ========================= Conversions to AtlasOpsError ========================= */

impl From<io::Error> for AtlasOpsError {
    fn from(err: io::Error) -> Self {
        AtlasOpsError::Io(err)
    }
}

impl From<mongodb::error::Error> for AtlasOpsError {
    fn from(err: mongodb::error::Error) -> Self {
        AtlasOpsError::MongoDb(err)
    }
}

impl From<ConfigError> for AtlasOpsError {
    fn from(err: ConfigError) -> Self {
        AtlasOpsError::Config(err)
    }
}

impl From<ConnectionError> for AtlasOpsError {
    fn from(err: ConnectionError) -> Self {
        AtlasOpsError::Connection(err)
    }
}

impl From<ExecutionError> for AtlasOpsError {
    fn from(err: ExecutionError) -> Self {
        AtlasOpsError::Execution(err)
    }
}

impl From<String> for AtlasOpsError {
    fn from(msg: String) -> Self {
        AtlasOpsError::Generic(msg)
    }
}

impl From<&str> for AtlasOpsError {
    fn from(msg: &str) -> Self {
        AtlasOpsError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_display() {
        let err = AtlasOpsError::from(ConfigError::MissingEnv("MONGODB_URI".to_string()));
        let msg = err.to_string();
        assert!(msg.contains("MONGODB_URI"));
        assert!(msg.contains(".env"));
    }

    #[test]
    fn test_invalid_operation_display() {
        let err = ExecutionError::InvalidOperation("7".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid operation '7' (expected a number from 1 to 6)"
        );
    }

    #[test]
    fn test_not_connected_display() {
        let err = AtlasOpsError::from(ConnectionError::NotConnected);
        assert_eq!(err.to_string(), "Connection error: Not connected to MongoDB");
    }
}
