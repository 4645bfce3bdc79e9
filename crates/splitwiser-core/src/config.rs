//! # Engine Configuration
//!
//! Tuning knobs for the balance engine.
//!
//! This crate never reads the environment or files. Callers build an
//! [`EngineConfig`] from wherever they keep settings (the CLI reads
//! `SPLITWISER_*` variables) and pass it in.

use serde::{Deserialize, Serialize};

use crate::amount::SETTLE_EPSILON;
use crate::simplify::SimplifyStrategy;

/// Settings for balance aggregation and debt simplification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Balances below this are treated as settled. Default: 0.01.
    pub settle_epsilon: f64,

    /// How creditors and debtors are paired up.
    pub strategy: SimplifyStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            settle_epsilon: SETTLE_EPSILON,
            strategy: SimplifyStrategy::default(),
        }
    }
}

impl EngineConfig {
    /// Default settings with a different pairing strategy.
    pub fn with_strategy(strategy: SimplifyStrategy) -> Self {
        EngineConfig {
            strategy,
            ..EngineConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.settle_epsilon, 0.01);
        assert_eq!(config.strategy, SimplifyStrategy::InputOrder);
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "strategy": "largest_first" }"#).unwrap();
        assert_eq!(config.strategy, SimplifyStrategy::LargestFirst);
        assert_eq!(config.settle_epsilon, SETTLE_EPSILON);
    }
}
