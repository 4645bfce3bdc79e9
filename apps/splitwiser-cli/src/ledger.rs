//! Input files.
//!
//! A bill file holds one [`Bill`]. A ledger file holds a group's history:
//!
//! ```json
//! {
//!   "bills": [ { "total": 100.0, "subtotal": 100.0, "participants": ["Alice", "Bob"], "payer": "Alice" } ],
//!   "settlements": [ { "id": "s1", "group_id": "g1", "from": "Bob", "to": "Alice", "amount": 30.0, "created_at": "2025-03-05T18:30:00Z" } ]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use splitwiser_core::validation::{validate_bill, validate_settlement};
use splitwiser_core::{Bill, CoreError, Settlement};

/// A group's bills and settlements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

impl Ledger {
    /// Runs the save-time rules over every record.
    pub fn validate(&self) -> Result<()> {
        for (index, bill) in self.bills.iter().enumerate() {
            validate_bill(bill)
                .map_err(CoreError::from)
                .with_context(|| format!("bill #{index} is invalid"))?;
        }

        for settlement in &self.settlements {
            validate_settlement(
                &settlement.group_id,
                &settlement.from,
                &settlement.to,
                settlement.amount,
            )
            .map_err(CoreError::from)
            .with_context(|| format!("settlement {} is invalid", settlement.id))?;
        }

        Ok(())
    }
}

/// Reads a JSON file into `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    parse_json(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitwiser_core::ValidationError;

    const LEDGER: &str = r#"{
        "bills": [
            { "total": 100.0, "subtotal": 100.0, "participants": ["Alice", "Bob"], "payer": "Alice" }
        ],
        "settlements": [
            {
                "id": "s1", "group_id": "g1", "from": "Bob", "to": "Alice",
                "amount": 30.0, "created_at": "2025-03-05T18:30:00Z"
            }
        ]
    }"#;

    #[test]
    fn test_parse_ledger() {
        let ledger: Ledger = parse_json(LEDGER).unwrap();

        assert_eq!(ledger.bills.len(), 1);
        assert!(ledger.bills[0].items.is_empty());
        assert_eq!(ledger.bills[0].payer.as_deref(), Some("Alice"));
        assert_eq!(ledger.settlements[0].amount, 30.0);
        assert_eq!(ledger.settlements[0].note, None);
        assert!(ledger.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let ledger: Ledger = parse_json("{}").unwrap();
        assert_eq!(ledger, Ledger::default());
    }

    #[test]
    fn test_validate_names_the_bad_record() {
        let mut ledger: Ledger = parse_json(LEDGER).unwrap();
        ledger.settlements[0].to = "Bob".to_string();

        let err = ledger.validate().unwrap_err();
        assert_eq!(format!("{err}"), "settlement s1 is invalid");

        let core = err.chain().find_map(|cause| cause.downcast_ref::<CoreError>());
        assert!(matches!(
            core,
            Some(CoreError::Validation(ValidationError::SameParty { .. }))
        ));
    }

    #[test]
    fn test_validate_catches_outside_payer() {
        let mut ledger: Ledger = parse_json(LEDGER).unwrap();
        ledger.bills[0].payer = Some("Zed".to_string());

        let err = ledger.validate().unwrap_err();
        assert_eq!(format!("{err}"), "bill #0 is invalid");

        let core = err.chain().find_map(|cause| cause.downcast_ref::<CoreError>());
        assert_eq!(
            core,
            Some(&CoreError::Validation(ValidationError::PayerNotParticipant {
                payer: "Zed".to_string()
            }))
        );
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_json::<Ledger>("{ \"bills\": 3 }").is_err());
    }

    #[test]
    fn test_read_missing_file_mentions_path() {
        let err = read_json::<Ledger>(Path::new("/nonexistent/ledger.json")).unwrap_err();
        assert!(format!("{err}").contains("/nonexistent/ledger.json"));
    }
}
