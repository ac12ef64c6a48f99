//! # Error Types
//!
//! Domain-specific error types for kuyum-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kuyum-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Field-scoped input violations                  │
//! │                                                                         │
//! │  kuyum-store errors (separate crate)                                   │
//! │  └── StoreError       - Persistence failures (always absorbed)         │
//! │                                                                         │
//! │  App errors (kuyum-calculator)                                         │
//! │  └── ApiError         - What the host UI sees (serialized)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculation functions themselves never fail. Errors only exist at the
//! edges: raw input that breaks a schema rule, or a lookup of a material id
//! that is not in the catalog.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Material id is not part of the catalog.
    ///
    /// ## When This Occurs
    /// - The UI sends a stale or mistyped material id
    /// - A config file names a default material that does not exist
    #[error("Material not found: {0}")]
    MaterialNotFound(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Every variant names the field it belongs to so the UI can show the
/// message next to the right input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Text could not be read as a finite number.
    #[error("{field} must be a number")]
    NotANumber { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} cannot be negative")]
    MustBeNonNegative { field: String },

    /// Value exceeds the accepted maximum.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: f64 },
}

impl ValidationError {
    /// Name of the field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotANumber { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::MustBeNonNegative { field }
            | ValidationError::TooLarge { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
