use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

/// Search settings, deserializable from any serde format.
///
/// Missing fields fall back to the defaults: no depth bound, alpha-beta
/// pruning on, no time budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of plies to look ahead. `None` searches to the end of
    /// the game, which is only practical close to the end.
    pub depth_limit: Option<u32>,
    /// Prune branches that cannot change the result.
    pub alpha_beta_pruning: bool,
    /// Refuse to build a search without a depth limit.
    pub require_depth_limit: bool,
    /// Wall-clock budget per search, in milliseconds.
    pub time_budget_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth_limit: None,
            alpha_beta_pruning: true,
            require_depth_limit: false,
            time_budget_ms: None,
        }
    }
}

impl SearchConfig {
    /// Checks the depth settings.
    #[instrument]
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match self.depth_limit {
            Some(0) => Err(ConfigurationError::ZeroDepth),
            None if self.require_depth_limit => Err(ConfigurationError::MissingDepth),
            _ => Ok(()),
        }
    }

    /// The time budget as a [`Duration`].
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SearchConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert!(config.alpha_beta_pruning);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let config = SearchConfig {
            depth_limit: Some(0),
            ..SearchConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigurationError::ZeroDepth));
    }

    #[test]
    fn required_depth_must_be_present() {
        let config = SearchConfig {
            require_depth_limit: true,
            ..SearchConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigurationError::MissingDepth));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{ "depth_limit": 4, "time_budget_ms": 250 }"#).unwrap();

        assert_eq!(config.depth_limit, Some(4));
        assert!(config.alpha_beta_pruning);
        assert_eq!(config.time_budget(), Some(Duration::from_millis(250)));
    }
}
