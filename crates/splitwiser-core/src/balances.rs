//! # Balance Aggregator
//!
//! Rolls a group's bills and settlements up into per-member balances and
//! a simplified payment plan.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Bills ──► calculate_split (per bill) ──┐                               │
//! │                                         │  payer:        paid += total  │
//! │                                         ├─ participants: owed += share  │
//! │  Settlements ───────────────────────────┤  from:         paid += amount │
//! │                                         │  to:           owed += amount │
//! │                                         ▼                               │
//! │                          net = paid - owed  (per member)                │
//! │                                         │                               │
//! │                                         ▼                               │
//! │                           simplify ──► DebtEdge list                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - A bill without a payer is skipped: nobody can be credited for it.
//! - The payer's own share is debited too, so it nets out.
//! - One bad bill fails the whole calculation with the split error,
//!   unchanged. No partial balances are returned.
//! - Members are listed in first-appearance order (payer, then the bill's
//!   participants, then settlement parties). The simplifier walks them in
//!   that order.

use indexmap::IndexMap;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::CoreResult;
use crate::simplify::simplify_with;
use crate::split::calculate_split;
use crate::types::{Bill, GroupBalances, MemberBalance, Settlement};

/// Computes member balances and debts with default engine settings.
///
/// ## Example
/// ```rust
/// use splitwiser_core::balances::calculate_group_balances;
/// use splitwiser_core::types::Bill;
///
/// let bill = Bill {
///     title: None,
///     items: vec![],
///     total: 100.0,
///     subtotal: 100.0,
///     participants: vec!["Alice".to_string(), "Bob".to_string()],
///     payer: Some("Alice".to_string()),
/// };
///
/// let group = calculate_group_balances(&[bill], &[]).unwrap();
/// assert_eq!(group.balance_of("Bob").unwrap().net_balance, -50.0);
/// assert_eq!(group.debts[0].to_string(), "Bob owes Alice $50.00");
/// ```
pub fn calculate_group_balances(
    bills: &[Bill],
    settlements: &[Settlement],
) -> CoreResult<GroupBalances> {
    calculate_group_balances_with(bills, settlements, &EngineConfig::default())
}

/// Computes member balances and debts using `config` for simplification.
pub fn calculate_group_balances_with(
    bills: &[Bill],
    settlements: &[Settlement],
    config: &EngineConfig,
) -> CoreResult<GroupBalances> {
    let mut ledger: IndexMap<String, MemberBalance> = IndexMap::new();
    let mut counted_bills = 0usize;

    for (index, bill) in bills.iter().enumerate() {
        let Some(payer) = bill.payer_id() else {
            debug!(bill = index, total = bill.total, "Skipping bill without payer");
            continue;
        };

        let splits = calculate_split(&bill.items, bill.total, bill.subtotal, &bill.participants)?;

        member(&mut ledger, payer).total_paid += bill.total;
        for (participant, split) in &splits {
            member(&mut ledger, participant).total_owed += split.total;
        }
        counted_bills += 1;
    }

    for settlement in settlements {
        member(&mut ledger, &settlement.from).total_paid += settlement.amount;
        member(&mut ledger, &settlement.to).total_owed += settlement.amount;
    }

    let balances: Vec<MemberBalance> = ledger
        .into_values()
        .map(|mut balance| {
            balance.net_balance = balance.total_paid - balance.total_owed;
            balance
        })
        .collect();

    let debts = simplify_with(&balances, config);

    debug!(
        bills = counted_bills,
        skipped = bills.len() - counted_bills,
        settlements = settlements.len(),
        members = balances.len(),
        debts = debts.len(),
        "Group balances calculated"
    );

    Ok(GroupBalances { balances, debts })
}

fn member<'a>(
    ledger: &'a mut IndexMap<String, MemberBalance>,
    id: &str,
) -> &'a mut MemberBalance {
    ledger
        .entry(id.to_string())
        .or_insert_with(|| MemberBalance::new(id))
}

// =============================================================================
// Unit Tests
// =============================================================================
