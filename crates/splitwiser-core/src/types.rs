//! # Domain Types
//!
//! Records consumed and produced by the engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT (from storage)                                                   │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Bill       │   │      Item       │   │   Settlement    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  items          │──►│  description    │   │  from → to      │       │
//! │  │  total          │   │  amount         │   │  amount         │       │
//! │  │  subtotal       │   │  participants   │   │  note           │       │
//! │  │  participants   │   └─────────────────┘   └─────────────────┘       │
//! │  │  payer?         │                                                    │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  OUTPUT (fresh per call)                                                │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   BillSplit     │   │ GroupBalances   │   │    DebtEdge     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  splits         │   │  balances       │   │  from (owes)    │       │
//! │  │  tax_amount     │   │  debts ─────────┼──►│  to (is owed)   │       │
//! │  │  subtotal       │   └─────────────────┘   │  amount         │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Participants are plain string ids (a name or an account id). Resolving
//! them to accounts is the caller's job.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::amount::format_amount;
use crate::error::CoreResult;
use crate::title::generate_title;
use crate::validation::validate_settlement;

/// Participant id -> split, in the order the bill lists its participants.
pub type SplitMap = IndexMap<String, PersonSplit>;

// =============================================================================
// Item
// =============================================================================

/// A single line item on a bill.
///
/// If several participants are named, the item is split equally between
/// them. An item naming nobody is folded into the shared remainder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Name of the item (e.g. "Pizza", "Beer").
    pub description: String,

    /// Pre-tax price of this item.
    pub amount: f64,

    /// Participants sharing this item.
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Item {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        participants: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Item {
            description: description.into(),
            amount,
            participants: participants.into_iter().map(Into::into).collect(),
        }
    }
}

// =============================================================================
// Bill
// =============================================================================

/// A bill as the engine sees it.
///
/// `total >= subtotal` is expected but not enforced. A negative tax
/// (e.g. a discount applied after the subtotal) is scaled proportionally
/// like any other tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bill {
    /// Optional human-readable name. See [`Bill::display_title`].
    #[serde(default)]
    pub title: Option<String>,

    /// Line items, in receipt order.
    #[serde(default)]
    pub items: Vec<Item>,

    /// Final amount including tax, tip and fees.
    pub total: f64,

    /// Pre-tax amount.
    pub subtotal: f64,

    /// Everyone splitting this bill.
    pub participants: Vec<String>,

    /// Who fronted the money. Bills without one are left out of balances.
    #[serde(default)]
    pub payer: Option<String>,
}

impl Bill {
    /// Returns the tax/fee amount (`total - subtotal`).
    #[inline]
    pub fn tax(&self) -> f64 {
        self.total - self.subtotal
    }

    /// Returns the payer id, treating a blank string as "no payer".
    pub fn payer_id(&self) -> Option<&str> {
        self.payer.as_deref().filter(|payer| !payer.trim().is_empty())
    }

    /// Returns the explicit title, or generates one from items and people.
    pub fn display_title(&self, created_at: DateTime<Utc>) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => generate_title(&self.items, &self.participants, created_at),
        }
    }
}

// =============================================================================
// Split Output
// =============================================================================

/// One participant's share of one item (or of the shared remainder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PersonItem {
    pub description: String,
    /// This person's share of the item.
    pub amount: f64,
}

/// One participant's calculated share of a bill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PersonSplit {
    /// Sum of this person's item shares (pre-tax).
    pub subtotal: f64,
    /// Proportional share of tax/fees: `subtotal × (tax / bill_subtotal)`.
    pub tax: f64,
    /// `subtotal + tax`.
    pub total: f64,
    /// What the subtotal is made of.
    pub items: Vec<PersonItem>,
}

/// Result of splitting a single bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillSplit {
    pub splits: SplitMap,
    /// `total - subtotal` of the bill.
    pub tax_amount: f64,
    /// Echo of the bill's subtotal.
    pub subtotal: f64,
}

// =============================================================================
// Settlement
// =============================================================================

/// A manual payment between group members that offsets computed balances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settlement {
    pub id: String,
    pub group_id: String,
    /// Member who paid (debtor settling up).
    pub from: String,
    /// Member who received the money.
    pub to: String,
    pub amount: f64,
    #[serde(default)]
    pub note: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Settlement {
    /// Validates and stamps a new settlement with a fresh id and timestamp.
    ///
    /// ## Rules
    /// - group, from and to are required
    /// - amount must be positive
    /// - from and to must differ
    ///
    /// Whether both parties belong to the group is checked by the caller,
    /// which owns membership data.
    pub fn record(
        group_id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        amount: f64,
        note: Option<String>,
    ) -> CoreResult<Self> {
        let settlement = Settlement {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.into(),
            from: from.into(),
            to: to.into(),
            amount,
            note: note.filter(|note| !note.trim().is_empty()),
            created_at: Utc::now(),
        };

        validate_settlement(
            &settlement.group_id,
            &settlement.from,
            &settlement.to,
            settlement.amount,
        )?;

        Ok(settlement)
    }
}

// =============================================================================
// Balance Output
// =============================================================================

/// A member's standing across all bills and settlements of a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MemberBalance {
    pub member: String,
    /// Bill totals they fronted plus settlements they paid.
    pub total_paid: f64,
    /// Their bill shares plus settlements they received.
    pub total_owed: f64,
    /// `total_paid - total_owed`. Positive = is owed money.
    pub net_balance: f64,
}

impl MemberBalance {
    pub fn new(member: impl Into<String>) -> Self {
        MemberBalance {
            member: member.into(),
            total_paid: 0.0,
            total_owed: 0.0,
            net_balance: 0.0,
        }
    }
}

/// A recommended payment: `from` owes `to` this amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DebtEdge {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

impl std::fmt::Display for DebtEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} owes {} {}", self.from, self.to, format_amount(self.amount))
    }
}

/// Result of a group balance calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GroupBalances {
    /// One entry per member seen in any bill or settlement.
    pub balances: Vec<MemberBalance>,
    /// Simplified settlement plan. Recomputed every call, never stored.
    pub debts: Vec<DebtEdge>,
}

impl GroupBalances {
    /// Looks up a member's balance by id.
    pub fn balance_of(&self, member: &str) -> Option<&MemberBalance> {
        self.balances.iter().find(|balance| balance.member == member)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};

    #[test]
    fn test_bill_tax() {
        let bill = Bill {
            title: None,
            items: vec![],
            total: 33.0,
            subtotal: 30.0,
            participants: vec!["Alice".to_string()],
            payer: None,
        };
        assert_eq!(bill.tax(), 3.0);
    }

    #[test]
    fn test_blank_payer_is_no_payer() {
        let mut bill = Bill {
            title: None,
            items: vec![],
            total: 10.0,
            subtotal: 10.0,
            participants: vec!["Alice".to_string()],
            payer: Some("  ".to_string()),
        };
        assert_eq!(bill.payer_id(), None);

        bill.payer = Some("Alice".to_string());
        assert_eq!(bill.payer_id(), Some("Alice"));
    }

    #[test]
    fn test_bill_deserializes_without_optional_fields() {
        let bill: Bill = serde_json::from_str(
            r#"{ "total": 100.0, "subtotal": 90.0, "participants": ["Mo", "Ree"] }"#,
        )
        .unwrap();
        assert!(bill.items.is_empty());
        assert_eq!(bill.payer, None);
        assert_eq!(bill.title, None);
    }

    #[test]
    fn test_settlement_record() {
        let settlement = Settlement::record(
            "group-1",
            "Bob",
            "Alice",
            30.0,
            Some("venmo".to_string()),
        )
        .unwrap();

        assert!(Uuid::parse_str(&settlement.id).is_ok());
        assert_eq!(settlement.from, "Bob");
        assert_eq!(settlement.to, "Alice");
        assert_eq!(settlement.note.as_deref(), Some("venmo"));
    }

    #[test]
    fn test_settlement_record_rejects_self_payment() {
        let err = Settlement::record("group-1", "Bob", "Bob", 30.0, None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::SameParty { .. })
        ));
    }

    #[test]
    fn test_debt_edge_display() {
        let edge = DebtEdge {
            from: "Bob".to_string(),
            to: "Alice".to_string(),
            amount: 50.0,
        };
        assert_eq!(edge.to_string(), "Bob owes Alice $50.00");
    }
}
