//! Command handlers.
//!
//! Each handler takes already-parsed input and returns the value to print.
//! File access stays in `main.rs`.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use splitwiser_core::validation::validate_bill;
use splitwiser_core::{
    calculate_group_balances_with, split_bill, Bill, BillSplit, CoreError, EngineConfig,
    GroupBalances,
};
use tracing::info;

use crate::ledger::Ledger;

/// `title` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleOutput {
    pub title: String,
}

/// Splits one bill. With `strict`, the bill must pass save-time validation
/// first.
pub fn split(bill: &Bill, strict: bool) -> Result<BillSplit> {
    if strict {
        validate_bill(bill)
            .map_err(CoreError::from)
            .context("bill is invalid")?;
    }

    let result = split_bill(bill)?;
    info!(
        participants = result.splits.len(),
        items = bill.items.len(),
        tax = result.tax_amount,
        "Bill split"
    );

    Ok(result)
}

/// Rolls a ledger up into balances and debts.
pub fn balances(ledger: &Ledger, strict: bool, engine: &EngineConfig) -> Result<GroupBalances> {
    if strict {
        ledger.validate()?;
    }

    let group = calculate_group_balances_with(&ledger.bills, &ledger.settlements, engine)?;
    info!(
        bills = ledger.bills.len(),
        settlements = ledger.settlements.len(),
        members = group.balances.len(),
        debts = group.debts.len(),
        strategy = %engine.strategy,
        "Group balances"
    );

    for debt in &group.debts {
        info!("{debt}");
    }

    Ok(group)
}

/// The bill's title, or one generated from its items and people.
pub fn title(bill: &Bill) -> TitleOutput {
    TitleOutput {
        title: bill.display_title(Utc::now()),
    }
}
