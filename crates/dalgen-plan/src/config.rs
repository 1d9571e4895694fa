//! Planner configuration.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Configuration surface for the operation planners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Maximum statements per executed batch; zero or negative means
    /// unlimited.
    #[serde(default)]
    pub max_statements_per_batch: i64,

    /// Use stable parameter names (derived from the field name alone).
    ///
    /// Only safe when each statement is issued once; multi-row batches
    /// always uniquify regardless of this flag.
    #[serde(default)]
    pub use_stable_parameter_names: bool,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            max_statements_per_batch: 0,
            use_stable_parameter_names: false,
        }
    }
}

impl PlanConfig {
    /// Returns the batch limit as an option, mapping the "zero or negative
    /// means unlimited" convention.
    #[must_use]
    pub fn batch_limit(&self) -> Option<NonZeroUsize> {
        usize::try_from(self.max_statements_per_batch)
            .ok()
            .and_then(NonZeroUsize::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_limit_means_unlimited() {
        let mut config = PlanConfig::default();
        assert_eq!(config.batch_limit(), None);
        config.max_statements_per_batch = -5;
        assert_eq!(config.batch_limit(), None);
        config.max_statements_per_batch = 100;
        assert_eq!(config.batch_limit(), NonZeroUsize::new(100));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = PlanConfig {
            max_statements_per_batch: 50,
            use_stable_parameter_names: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: PlanConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
