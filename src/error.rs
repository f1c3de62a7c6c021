//! # Error Types
//!
//! Unified error taxonomy for the compilation layer.
//!
//! Error kinds:
//! - `Validation` — the caller's definition or request is wrong (bad trigger
//!   timing/event, empty where-set)
//! - `Lookup` — an internal mapping gap (unknown logical type)
//! - `Hook` — a lifecycle callback failed; wraps the originating hook's message
//! - `Driver` — opaque pass-through from the embedded engine

use thiserror::Error;

/// Result type for all modelite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by schema compilation, query building, and execution
#[derive(Debug, Error)]
pub enum Error {
    // ==================
    // Caller Errors
    // ==================
    /// Definition or request data is invalid
    #[error("Validation error: {0}")]
    Validation(String),

    /// A name failed to resolve against an internal mapping
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// A model name was used before being defined
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    // ==================
    // Execution Errors
    // ==================
    /// A lifecycle hook failed; remaining hooks were not run
    #[error("Hook failed: {0}")]
    Hook(String),

    /// Error surfaced unchanged from the SQLite driver
    #[error("Driver error: {0}")]
    Driver(#[from] rusqlite::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a lookup error
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Create a hook error wrapping the originating hook's message
    pub fn hook(msg: impl Into<String>) -> Self {
        Self::Hook(msg.into())
    }
}
