//! # Debt Simplifier
//!
//! Turns net balances into a short list of "X pays Y" payments.
//!
//! ## Greedy Matching
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Balances:  Alice +30   Bob +20   Cara -25   Dan -25                    │
//! │                                                                         │
//! │  creditors: [Alice 30, Bob 20]      debtors: [Cara 25, Dan 25]          │
//! │              ▲ j                              ▲ i                       │
//! │                                                                         │
//! │  step 1: min(25, 30) = 25   Cara → Alice 25   (Cara done, i++)          │
//! │  step 2: min(25,  5) =  5   Dan  → Alice  5   (Alice done, j++)         │
//! │  step 3: min(20, 20) = 20   Dan  → Bob   20   (both done)               │
//! │                                                                         │
//! │  3 payments instead of up to 4 pairwise debts                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Order Dependence
//! Both lists are walked in the order the balances arrive
//! ([`SimplifyStrategy::InputOrder`]). The result is deterministic for a
//! given input order, but it is NOT a minimum-payment solution; it never
//! needs more than `creditors + debtors - 1` payments.
//!
//! [`SimplifyStrategy::LargestFirst`] sorts both lists by size first. It
//! often pairs big debts with big credits, but it changes which edges come
//! out, so it is opt-in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use ts_rs::TS;

use crate::amount::is_negligible;
use crate::config::EngineConfig;
use crate::types::{DebtEdge, MemberBalance};

// =============================================================================
// Strategy
// =============================================================================

/// How creditors and debtors are ordered before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SimplifyStrategy {
    /// Walk balances in the order given. Default.
    #[default]
    InputOrder,

    /// Sort creditors and debtors by descending amount (stable) first.
    LargestFirst,
}

impl fmt::Display for SimplifyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimplifyStrategy::InputOrder => write!(f, "input_order"),
            SimplifyStrategy::LargestFirst => write!(f, "largest_first"),
        }
    }
}

/// Returned when a strategy name isn't recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown simplify strategy '{0}' (expected input_order or largest_first)")]
pub struct UnknownStrategy(pub String);

impl FromStr for SimplifyStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "input_order" => Ok(SimplifyStrategy::InputOrder),
            "largest_first" => Ok(SimplifyStrategy::LargestFirst),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

// =============================================================================
// Simplification
// =============================================================================

/// A creditor or debtor with the amount still to settle (always positive).
struct Party<'a> {
    member: &'a str,
    remaining: f64,
}

/// Simplifies balances with the default settings (input order, 0.01 epsilon).
///
/// ## Example
/// ```rust
/// use splitwiser_core::simplify::simplify;
/// use splitwiser_core::types::MemberBalance;
///
/// let mut alice = MemberBalance::new("Alice");
/// alice.net_balance = 50.0;
/// let mut bob = MemberBalance::new("Bob");
/// bob.net_balance = -50.0;
///
/// let debts = simplify(&[alice, bob]);
/// assert_eq!(debts.len(), 1);
/// assert_eq!(debts[0].to_string(), "Bob owes Alice $50.00");
/// ```
pub fn simplify(balances: &[MemberBalance]) -> Vec<DebtEdge> {
    simplify_with(balances, &EngineConfig::default())
}

/// Simplifies balances into debt edges using `config`.
///
/// Payments at or below `config.settle_epsilon` are dropped, and a party
/// whose remainder falls below it counts as settled.
pub fn simplify_with(balances: &[MemberBalance], config: &EngineConfig) -> Vec<DebtEdge> {
    let epsilon = config.settle_epsilon;

    let mut creditors: Vec<Party<'_>> = balances
        .iter()
        .filter(|balance| balance.net_balance > 0.0)
        .map(|balance| Party {
            member: &balance.member,
            remaining: balance.net_balance,
        })
        .collect();

    let mut debtors: Vec<Party<'_>> = balances
        .iter()
        .filter(|balance| balance.net_balance < 0.0)
        .map(|balance| Party {
            member: &balance.member,
            remaining: -balance.net_balance,
        })
        .collect();

    if config.strategy == SimplifyStrategy::LargestFirst {
        creditors.sort_by(|a, b| b.remaining.total_cmp(&a.remaining));
        debtors.sort_by(|a, b| b.remaining.total_cmp(&a.remaining));
    }

    let mut edges = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let debtor = &mut debtors[i];
        let creditor = &mut creditors[j];

        let amount = debtor.remaining.min(creditor.remaining);
        if amount > epsilon {
            debug!(from = debtor.member, to = creditor.member, amount, "Debt edge");
            edges.push(DebtEdge {
                from: debtor.member.to_string(),
                to: creditor.member.to_string(),
                amount,
            });
        }

        debtor.remaining -= amount;
        creditor.remaining -= amount;

        if is_settled(debtor.remaining, epsilon) {
            i += 1;
        }
        if is_settled(creditor.remaining, epsilon) {
            j += 1;
        }
    }

    debug!(
        strategy = %config.strategy,
        members = balances.len(),
        edges = edges.len(),
        "Debts simplified"
    );

    edges
}

/// `min` always drives one side to exactly zero, so a non-positive epsilon
/// still advances a cursor every step.
#[inline]
fn is_settled(remaining: f64, epsilon: f64) -> bool {
    remaining <= 0.0 || is_negligible(remaining, epsilon)
}

// =============================================================================
// Unit Tests
// =============================================================================
