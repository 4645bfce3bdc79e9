//! # Amount Module
//!
//! Helpers for the floating-point currency amounts used by the engine.
//!
//! ## Why Floats Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PROPORTIONAL SPLITS DO NOT LAND ON CENTS                               │
//! │                                                                         │
//! │  Pizza $20.00 shared by 3 people:                                       │
//! │    20.00 / 3 = 6.6666...   (no exact cent value exists)                 │
//! │                                                                         │
//! │  Tax $3.00 on a $30.00 subtotal, person ate $6.67 worth:                │
//! │    6.6666... × (3 / 30) = 0.6666...                                     │
//! │                                                                         │
//! │  OUR APPROACH: keep full f64 precision through the math,                │
//! │  compare with explicit tolerances, round only for display.              │
//! │  Rounding leftovers are NOT reassigned to anyone.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use splitwiser_core::amount::{approx_eq, format_amount, split_evenly, SPLIT_TOLERANCE};
//!
//! let share = split_evenly(20.0, 3);
//! assert!(approx_eq(share * 3.0, 20.0, SPLIT_TOLERANCE));
//! assert_eq!(format_amount(share), "$6.67");
//! ```

// =============================================================================
// Tolerances
// =============================================================================

/// Remaining balance (in currency units) below which a debt counts as settled.
///
/// The debt simplifier never emits a payment at or below this value, which
/// keeps floating-point dust like `0.0000000001` out of settlement plans.
pub const SETTLE_EPSILON: f64 = 0.01;

/// Tolerance used when checking split invariants (Σ shares == bill amount).
pub const SPLIT_TOLERANCE: f64 = 1e-6;

// =============================================================================
// Arithmetic Helpers
// =============================================================================

/// Divides `amount` into `ways` equal shares.
///
/// Returns zero when `ways` is zero so callers never see `NaN` or infinity.
///
/// ## Example
/// ```rust
/// use splitwiser_core::amount::split_evenly;
///
/// assert_eq!(split_evenly(90.0, 3), 30.0);
/// assert_eq!(split_evenly(10.0, 0), 0.0);
/// ```
#[inline]
pub fn split_evenly(amount: f64, ways: usize) -> f64 {
    if ways == 0 {
        return 0.0;
    }
    amount / ways as f64
}

/// Returns true if `a` and `b` differ by no more than `tolerance`.
#[inline]
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Returns true if `amount` is small enough to treat as already settled.
#[inline]
pub fn is_negligible(amount: f64, epsilon: f64) -> bool {
    amount.abs() < epsilon
}

/// Rounds to the nearest cent (half away from zero).
///
/// ## Note
/// Display only. The engine itself never rounds intermediate values.
#[inline]
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats an amount as dollars and cents, e.g. `$10.99` or `-$5.50`.
///
/// ## Note
/// This is for logs and CLI summaries. Clients should do their own
/// locale-aware formatting from the raw value.
///
/// ## Example
/// ```rust
/// use splitwiser_core::amount::format_amount;
///
/// assert_eq!(format_amount(10.99), "$10.99");
/// assert_eq!(format_amount(-5.5), "-$5.50");
/// ```
pub fn format_amount(amount: f64) -> String {
    let rounded = round_to_cents(amount);
    // -0.001 rounds to -0.00; print it as $0.00
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${:.2}", sign, rounded.abs())
}

// =============================================================================
// Unit Tests
// =============================================================================
