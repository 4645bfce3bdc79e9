//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;

use serde::Serialize;
use splitwiser_core::{EngineConfig, SimplifyStrategy};

const SETTLE_EPSILON_VAR: &str = "SPLITWISER_SETTLE_EPSILON";
const SIMPLIFY_STRATEGY_VAR: &str = "SPLITWISER_SIMPLIFY_STRATEGY";

/// CLI configuration.
#[derive(Debug, Clone, Serialize)]
pub struct CliConfig {
    /// Balances below this are treated as settled (default: 0.01)
    pub settle_epsilon: f64,

    /// Creditor/debtor pairing order (default: input_order)
    pub strategy: SimplifyStrategy,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of a
    /// variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = EngineConfig::default();

        let settle_epsilon = match lookup(SETTLE_EPSILON_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidValue(SETTLE_EPSILON_VAR.to_string()))?,
            None => defaults.settle_epsilon,
        };

        let strategy = match lookup(SIMPLIFY_STRATEGY_VAR) {
            Some(raw) => raw
                .parse::<SimplifyStrategy>()
                .map_err(|_| ConfigError::InvalidValue(SIMPLIFY_STRATEGY_VAR.to_string()))?,
            None => defaults.strategy,
        };

        // A negative or NaN epsilon would let dust through as payments
        if !settle_epsilon.is_finite() || settle_epsilon < 0.0 {
            return Err(ConfigError::OutOfRange {
                key: SETTLE_EPSILON_VAR.to_string(),
                value: settle_epsilon,
            });
        }

        Ok(CliConfig {
            settle_epsilon,
            strategy,
        })
    }

    /// Engine settings for this run.
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            settle_epsilon: self.settle_epsilon,
            strategy: self.strategy,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("{key} must be a non-negative number, got {value}")]
    OutOfRange { key: String, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.settle_epsilon, 0.01);
        assert_eq!(config.strategy, SimplifyStrategy::InputOrder);
        assert_eq!(config.engine(), EngineConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let config = load(&[
            ("SPLITWISER_SETTLE_EPSILON", " 0.005 "),
            ("SPLITWISER_SIMPLIFY_STRATEGY", "largest-first"),
        ])
        .unwrap();

        assert_eq!(config.settle_epsilon, 0.005);
        assert_eq!(config.strategy, SimplifyStrategy::LargestFirst);
    }

    #[test]
    fn test_rejects_garbage() {
        let err = load(&[("SPLITWISER_SETTLE_EPSILON", "a penny")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(key) if key == "SPLITWISER_SETTLE_EPSILON"));

        let err = load(&[("SPLITWISER_SIMPLIFY_STRATEGY", "optimal")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_rejects_negative_epsilon() {
        let err = load(&[("SPLITWISER_SETTLE_EPSILON", "-1")]).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }
}
