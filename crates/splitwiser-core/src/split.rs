//! # Split Calculator
//!
//! Works out what each participant owes on a single bill.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Bill: total $33.00, subtotal $30.00 → tax $3.00                        │
//! │                                                                         │
//! │  1. Items → per-person subtotals                                        │
//! │     Pizza $20 [Alice, Bob]   → Alice +10, Bob +10                       │
//! │     Salad $10 [Alice]        → Alice +10                                │
//! │                                                                         │
//! │  2. Unassigned remainder (subtotal - itemized) → everyone equally       │
//! │     30 - 30 = 0              → nothing to share                         │
//! │                                                                         │
//! │  3. Tax in proportion to subtotal share                                 │
//! │     ratio = 3 / 30 = 0.1                                                │
//! │     Alice: 20 + 2.00 = 22.00                                            │
//! │     Bob:   10 + 1.00 = 11.00                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Heavy consumers carry proportionally more of the shared tax, tip and
//! fees. A bill without items is a straight equal split.
//!
//! ## Invariants
//! - `Σ subtotal == bill_subtotal` and `Σ total == bill_total`, within
//!   [`SPLIT_TOLERANCE`](crate::amount::SPLIT_TOLERANCE), as long as items
//!   only name bill participants and don't add up to more than the subtotal.
//! - Rounding leftovers stay where they fall; nobody absorbs the odd cent.

use tracing::{debug, warn};

use crate::amount::{split_evenly, SPLIT_TOLERANCE};
use crate::error::{CoreError, CoreResult};
use crate::types::{Bill, BillSplit, Item, PersonItem, PersonSplit, SplitMap};

/// Label for each participant's slice of the unassigned remainder.
pub const SHARED_REMAINDER_LABEL: &str = "Shared";

// =============================================================================
// Split Calculation
// =============================================================================

/// Computes each participant's subtotal, tax and total for one bill.
///
/// ## Errors
/// - [`CoreError::ZeroSubtotal`] if `bill_subtotal` is zero
/// - [`CoreError::NoParticipants`] if `participants` is empty
/// - [`CoreError::NonFiniteAmount`] if the total or subtotal is NaN/infinite
///
/// ## Example
/// ```rust
/// use splitwiser_core::split::calculate_split;
/// use splitwiser_core::types::Item;
///
/// let items = vec![
///     Item::new("Pizza", 20.0, ["Alice"]),
///     Item::new("Salad", 10.0, ["Bob"]),
/// ];
/// let people = vec!["Alice".to_string(), "Bob".to_string()];
///
/// let splits = calculate_split(&items, 33.0, 30.0, &people).unwrap();
/// assert!((splits["Alice"].total - 22.0).abs() < 1e-9);
/// assert!((splits["Bob"].total - 11.0).abs() < 1e-9);
/// ```
pub fn calculate_split(
    items: &[Item],
    bill_total: f64,
    bill_subtotal: f64,
    participants: &[String],
) -> CoreResult<SplitMap> {
    if bill_subtotal == 0.0 {
        return Err(CoreError::ZeroSubtotal);
    }
    if participants.is_empty() {
        return Err(CoreError::NoParticipants);
    }
    ensure_finite("total", bill_total)?;
    ensure_finite("subtotal", bill_subtotal)?;

    let tax = bill_total - bill_subtotal;

    // Repeated ids collapse into one entry
    let mut splits: SplitMap = participants
        .iter()
        .map(|participant| (participant.clone(), PersonSplit::default()))
        .collect();
    let head_count = splits.len();

    if items.is_empty() {
        let subtotal = split_evenly(bill_subtotal, head_count);
        let tax_share = split_evenly(tax, head_count);
        let total = split_evenly(bill_total, head_count);

        for split in splits.values_mut() {
            split.subtotal = subtotal;
            split.tax = tax_share;
            split.total = total;
        }

        debug!(participants = head_count, per_person = total, "Equal split, no items");
        return Ok(splits);
    }

    let itemized_total = allocate_items(&mut splits, items)?;
    share_remainder(&mut splits, bill_subtotal - itemized_total);
    apply_proportional_tax(&mut splits, tax / bill_subtotal);

    Ok(splits)
}

/// Splits a [`Bill`] and echoes its tax and subtotal alongside the shares.
pub fn split_bill(bill: &Bill) -> CoreResult<BillSplit> {
    let splits = calculate_split(&bill.items, bill.total, bill.subtotal, &bill.participants)?;

    Ok(BillSplit {
        splits,
        tax_amount: bill.tax(),
        subtotal: bill.subtotal,
    })
}

// =============================================================================
// Steps
// =============================================================================

/// Adds each assigned item to the people it names. Returns the itemized sum.
///
/// Items naming nobody are skipped here and end up in the shared remainder.
fn allocate_items(splits: &mut SplitMap, items: &[Item]) -> CoreResult<f64> {
    let mut itemized_total = 0.0;

    for item in items.iter().filter(|item| !item.participants.is_empty()) {
        ensure_finite("item amount", item.amount)?;
        itemized_total += item.amount;

        let per_person = split_evenly(item.amount, item.participants.len());
        for person in &item.participants {
            match splits.get_mut(person) {
                Some(split) => {
                    split.subtotal += per_person;
                    split.items.push(PersonItem {
                        description: item.description.clone(),
                        amount: per_person,
                    });
                }
                None => {
                    warn!(
                        participant = %person,
                        item = %item.description,
                        amount = per_person,
                        "Item assigned to someone outside the bill, share left unallocated"
                    );
                }
            }
        }
    }

    Ok(itemized_total)
}

/// Spreads whatever the items didn't cover evenly across everyone.
fn share_remainder(splits: &mut SplitMap, remainder: f64) {
    // Overshoot is never clawed back; float dust is not worth a line item
    if remainder <= SPLIT_TOLERANCE {
        return;
    }

    let per_person = split_evenly(remainder, splits.len());
    for split in splits.values_mut() {
        split.subtotal += per_person;
        split.items.push(PersonItem {
            description: SHARED_REMAINDER_LABEL.to_string(),
            amount: per_person,
        });
    }
}

/// `tax = subtotal × ratio`, `total = subtotal + tax` for every participant.
fn apply_proportional_tax(splits: &mut SplitMap, tax_ratio: f64) {
    for (person, split) in splits.iter_mut() {
        split.tax = split.subtotal * tax_ratio;
        split.total = split.subtotal + split.tax;

        debug!(
            person = %person,
            subtotal = split.subtotal,
            tax = split.tax,
            total = split.total,
            items_count = split.items.len(),
            "Person split"
        );
    }
}

fn ensure_finite(field: &str, value: f64) -> CoreResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::NonFiniteAmount {
            field: field.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
