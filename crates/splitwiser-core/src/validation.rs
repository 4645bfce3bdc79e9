//! # Validation Module
//!
//! Record validation for bills and settlements.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Client                                                       │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: RPC handler                                                  │
//! │  ├── THIS MODULE: record rules before persisting                       │
//! │  └── Group membership checks (needs storage, not done here)            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine (split / balances)                                    │
//! │  └── Only what the math needs: subtotal != 0, participants non-empty   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The split and balance functions do not call into this module. A bill
//! that passed validation when saved is trusted when it is read back.
//!
//! ## Usage
//! ```rust
//! use splitwiser_core::validation::{validate_payer, validate_settlement};
//!
//! let people = vec!["Alice".to_string(), "Bob".to_string()];
//! assert!(validate_payer(Some("Alice"), &people).is_ok());
//! assert!(validate_payer(Some("Mallory"), &people).is_err());
//!
//! assert!(validate_settlement("group-1", "Bob", "Alice", 30.0).is_ok());
//! ```

use crate::error::ValidationError;
use crate::types::{Bill, Item};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest participant id we accept.
pub const MAX_PARTICIPANT_ID_LEN: usize = 100;

/// Longest item description we accept.
pub const MAX_DESCRIPTION_LEN: usize = 200;

// =============================================================================
// Participant Validators
// =============================================================================

/// Validates a participant id (name or account id).
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 100 characters
pub fn validate_participant_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "participant".to_string(),
        });
    }

    if id.chars().count() > MAX_PARTICIPANT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "participant".to_string(),
            max: MAX_PARTICIPANT_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a bill's participant list.
pub fn validate_participants(participants: &[String]) -> ValidationResult<()> {
    if participants.is_empty() {
        return Err(ValidationError::Required {
            field: "participants".to_string(),
        });
    }

    participants
        .iter()
        .try_for_each(|participant| validate_participant_id(participant))
}

/// Validates the payer of a bill.
///
/// ## Rules
/// - No payer is fine (the bill just won't count toward balances)
/// - Otherwise the payer must be one of the bill's participants
///
/// ## Example
/// ```rust
/// use splitwiser_core::validation::validate_payer;
///
/// let people = vec!["Alice".to_string()];
/// assert!(validate_payer(None, &people).is_ok());
/// assert!(validate_payer(Some(""), &people).is_ok());
/// assert!(validate_payer(Some("Bob"), &people).is_err());
/// ```
pub fn validate_payer(payer: Option<&str>, participants: &[String]) -> ValidationResult<()> {
    let payer = match payer {
        Some(payer) if !payer.is_empty() => payer,
        _ => return Ok(()),
    };

    if participants.iter().any(|participant| participant == payer) {
        return Ok(());
    }

    Err(ValidationError::PayerNotParticipant {
        payer: payer.to_string(),
    })
}

// =============================================================================
// Amount Validators
// =============================================================================

/// Validates a line item.
///
/// ## Rules
/// - Description is required, at most 200 characters
/// - Amount is a finite, non-negative number (zero = free item)
pub fn validate_item(item: &Item) -> ValidationResult<()> {
    let description = item.description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "item description".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "item description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    if !item.amount.is_finite() || item.amount < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "item amount".to_string(),
        });
    }

    item.participants
        .iter()
        .try_for_each(|participant| validate_participant_id(participant))
}

/// Validates a whole bill before it is saved.
pub fn validate_bill(bill: &Bill) -> ValidationResult<()> {
    validate_participants(&bill.participants)?;
    bill.items.iter().try_for_each(validate_item)?;

    if !bill.subtotal.is_finite() || bill.subtotal <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "subtotal".to_string(),
        });
    }

    if !bill.total.is_finite() || bill.total < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "total".to_string(),
        });
    }

    validate_payer(bill.payer.as_deref(), &bill.participants)
}

// =============================================================================
// Settlement Validators
// =============================================================================

/// Validates a settlement before it is recorded.
///
/// ## Rules
/// - group, from and to are required
/// - amount must be positive
/// - from and to must be different people
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Group: Record Settlement                                               │
/// │                                                                         │
/// │  Bob pays Alice $30 back                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_settlement(group, "Bob", "Alice", 30.0) ← THIS FUNCTION       │
/// │       │                                                                 │
/// │       ├── amount <= 0?  → Error: "amount must be positive"             │
/// │       │                                                                 │
/// │       ├── Bob == Bob?   → Error: "from and to must be different"       │
/// │       │                                                                 │
/// │       └── OK → membership check (caller) → persist                     │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_settlement(
    group_id: &str,
    from: &str,
    to: &str,
    amount: f64,
) -> ValidationResult<()> {
    if group_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "group_id".to_string(),
        });
    }

    if from.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "from".to_string(),
        });
    }

    if to.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "to".to_string(),
        });
    }

    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    if from == to {
        return Err(ValidationError::SameParty {
            from_field: "from".to_string(),
            to_field: "to".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
