//! Error types for registry operations.
//!
//! This module defines [`RiggingError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `RiggingError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `RiggingError::Other`) for unexpected errors
//! - Every failure is surfaced to the caller of the triggering operation;
//!   nothing is swallowed or logged internally
//!
//! The only recoverable class is "not found": [`Registry::get_path_or`]
//! suppresses errors for which [`RiggingError::is_not_found`] is true and
//! propagates everything else.
//!
//! [`Registry::get_path_or`]: crate::registry::Registry::get_path_or

use thiserror::Error;

/// Core error type for registry operations.
#[derive(Debug, Error)]
pub enum RiggingError {
    /// No entry or snapshot row exists for the identifier.
    #[error("No entry was found for the identifier '{id}'")]
    NotFound { id: String },

    /// A key could not be traversed in a dotted path.
    #[error("Undefined key '{key}' in traversed {context}")]
    KeyNotFound { key: String, context: String },

    /// An identifier or injection capability was registered twice.
    #[error("Entry for identifier '{id}' already exists")]
    RegistrationConflict { id: String },

    /// A snapshot was requested but an entry's parameters are not plain data.
    #[error("Unable to cache entry '{id}': the cache parameters are not plain data")]
    UncacheableEntry { id: String },

    /// An identifier was requested again during its own production.
    #[error("Circular dependency detected while resolving '{id}'")]
    CircularDependency { id: String },

    /// A provider identifier resolved to a value without provider capability.
    #[error("Provider '{provider}' did not resolve to a provider object for method '{method}'")]
    InvalidProviderResult { provider: String, method: String },

    /// A wired constructor parameter has neither an override nor a declared type.
    #[error("Missing wired parameter '{parameter}' for '{class}'")]
    MisconfiguredWiring { class: String, parameter: String },

    /// No blueprint or initializer is registered under the type name.
    #[error("No blueprint or initializer is registered for type '{name}'")]
    UnknownType { name: String },

    /// A post-construction call targeted a value that does not support it.
    #[error("Value of type '{class}' does not support the call '{method}'")]
    UnsupportedCall { class: String, method: String },

    /// Snapshot encoding or decoding failed.
    #[error("Snapshot codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RiggingError {
    /// True for the recoverable "not found" class of failures.
    ///
    /// Default-value lookups suppress exactly these errors and no others.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RiggingError::NotFound { .. } | RiggingError::KeyNotFound { .. }
        )
    }
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RiggingError>;
