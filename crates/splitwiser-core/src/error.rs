//! # Error Types
//!
//! Domain-specific error types for splitwiser-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  splitwiser-core errors (this file)                                    │
//! │  ├── CoreError        - Calculation errors (zero subtotal, ...)        │
//! │  └── ValidationError  - Record validation failures                     │
//! │                                                                         │
//! │  Caller errors (RPC layer, CLI)                                        │
//! │  └── ApiError         - What clients see (code + message)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Client                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mapping Policy
//! - [`CoreError::is_client_error`] == true  → client-input error (400)
//! - anything else                           → internal error (500)
//!
//! A split error inside a group balance calculation is returned unchanged,
//! so the caller sees exactly which rule the bad bill broke.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Engine errors.
///
/// Every variant aborts the calculation; the engine never returns a
/// partial result alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The bill's subtotal is zero.
    ///
    /// ## When This Occurs
    /// - A bill was saved with subtotal 0 (e.g. a fully comped meal)
    /// - The client sent only a total and left subtotal unset
    ///
    /// Tax is distributed as `share × tax / subtotal`, so there is no
    /// meaningful split without a subtotal.
    #[error("subtotal cannot be zero")]
    ZeroSubtotal,

    /// The bill has no participants to split between.
    #[error("must have at least one participant")]
    NoParticipants,

    /// An amount that must be a real number is NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFiniteAmount { field: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true if the error was caused by bad caller input.
    ///
    /// RPC layers map these to an invalid-argument response and everything
    /// else to an internal error.
    pub fn is_client_error(&self) -> bool {
        match self {
            CoreError::ZeroSubtotal | CoreError::NoParticipants | CoreError::Validation(_) => true,
            // NaN/inf only gets this far from corrupt stored data
            CoreError::NonFiniteAmount { .. } => false,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Record validation errors.
///
/// These occur when a bill or settlement doesn't meet the rules the
/// storage layer enforces before persisting it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// The payer isn't one of the people splitting the bill.
    #[error("payer '{payer}' must be one of the participants")]
    PayerNotParticipant { payer: String },

    /// A settlement from someone to themselves.
    #[error("{from_field} and {to_field} must be different")]
    SameParty { from_field: String, to_field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::ZeroSubtotal.to_string(), "subtotal cannot be zero");
        assert_eq!(
            CoreError::NoParticipants.to_string(),
            "must have at least one participant"
        );
        assert_eq!(
            CoreError::NonFiniteAmount {
                field: "total".to_string()
            }
            .to_string(),
            "total must be a finite number"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::PayerNotParticipant {
            payer: "Mallory".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "payer 'Mallory' must be one of the participants"
        );

        let err = ValidationError::SameParty {
            from_field: "from".to_string(),
            to_field: "to".to_string(),
        };
        assert_eq!(err.to_string(), "from and to must be different");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "group_id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert!(core_err.is_client_error());
    }

    #[test]
    fn test_split_errors_are_client_errors() {
        assert!(CoreError::ZeroSubtotal.is_client_error());
        assert!(CoreError::NoParticipants.is_client_error());

        let corrupt = CoreError::NonFiniteAmount {
            field: "subtotal".to_string(),
        };
        assert!(!corrupt.is_client_error());
    }
}
