//! Error handling module for atlas-ops.
//!
//! This module provides error handling for the one-shot CLI with:
//! - Structured error information extraction from MongoDB driver errors
//! - Consistent JSON error formatting for terminal output
//! - Application-specific error types
//!
//! Every error category here is fatal by design: the process performs a
//! single operation and exits, so errors propagate to `main` which logs
//! them and terminates with a non-zero status.

pub mod kinds;
pub mod mongo;

// Re-export commonly used types
pub use kinds::{AtlasOpsError, ConfigError, ConnectionError, ExecutionError, Result};
pub use mongo::{ErrorInfo, extract_error_info};
