//! # Store Error Types
//!
//! Error types for settings persistence.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Backend failure (io::Error, disabled storage)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds key context and categorization        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SettingsStore ← logs with tracing, falls back to defaults / no-op     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller never sees it                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Settings persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage backend cannot be used at all.
    ///
    /// ## When This Occurs
    /// - Persistence is disabled by configuration
    /// - No data directory could be determined for this platform
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// File system operation failed.
    ///
    /// ## When This Occurs
    /// - Data directory not writable
    /// - Disk full
    #[error("I/O error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized or parsed as JSON.
    #[error("Serialization failed for '{key}': {message}")]
    Serialization { key: String, message: String },

    /// Stored JSON parsed but does not have the expected shape.
    #[error("Invalid stored value for '{key}': {reason}")]
    Decode { key: String, reason: String },

    /// Key name cannot be mapped onto the backend.
    #[error("Invalid key: '{0}'")]
    InvalidKey(String),
}

impl StoreError {
    /// Creates an Io error for a given key.
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            key: key.into(),
            source,
        }
    }

    /// Creates a Decode error.
    pub fn decode(key: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::Decode {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates a Serialization error from a serde_json error.
    pub fn serialization(key: impl Into<String>, err: serde_json::Error) -> Self {
        StoreError::Serialization {
            key: key.into(),
            message: err.to_string(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
