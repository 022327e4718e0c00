//! # Error Types
//!
//! Domain-specific error types for shopcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopcart-core errors (this file)                                      │
//! │  ├── CartError        - Rejected cart transitions                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  cli errors (apps/cli)                                                 │
//! │  └── CliError         - What the script runner reports                 │
//! │                                                                         │
//! │  Flow: ValidationError → CartError → CliError → exit status            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed numbers never surface here: quantities and prices are coerced
//! to zero instead. Only a missing item identifier rejects a transition.

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Errors returned by cart transitions.
///
/// A transition that fails leaves the cart exactly as it was.
#[derive(Debug, Error)]
pub enum CartError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    ///
    /// ## When This Occurs
    /// - Product record without an `_id`
    /// - `_id` that is empty or only whitespace
    /// - Quantity update addressed to an empty identifier
    #[error("{field} is required")]
    Required { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "_id".to_string(),
        };
        assert_eq!(err.to_string(), "_id is required");
    }

    #[test]
    fn test_validation_converts_to_cart_error() {
        let validation_err = ValidationError::Required {
            field: "_id".to_string(),
        };
        let cart_err: CartError = validation_err.into();
        assert!(matches!(cart_err, CartError::Validation(_)));
        assert_eq!(cart_err.to_string(), "Validation error: _id is required");
    }
}
