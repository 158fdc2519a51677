use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::amount::{self, max_token_amount, Amount};
use crate::error::ConfigError;

pub const DEFAULT_MAX_STEPS: usize = 30;

/// Pathfinder settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of transfer steps a plan may contain.
    pub max_steps: usize,
    /// The amount treated as unbounded when looking for the bottleneck of a path.
    #[serde(with = "amount::decimal")]
    pub bottleneck_seed: Amount,
    /// Upper bound on the number of augmentations; `None` means `V * E + 1`.
    pub max_augmentations: Option<usize>,
    /// Stop routing once the requested value is reached instead of returning the full max flow.
    pub trim_to_requested: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            bottleneck_seed: max_token_amount(),
            max_augmentations: None,
            trim_to_requested: false,
        }
    }
}

impl Config {
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_bottleneck_seed(mut self, seed: Amount) -> Self {
        self.bottleneck_seed = seed;
        self
    }

    pub fn with_max_augmentations(mut self, limit: usize) -> Self {
        self.max_augmentations = Some(limit);
        self
    }

    pub fn with_trim_to_requested(mut self, trim: bool) -> Self {
        self.trim_to_requested = trim;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == 0 {
            Err(ConfigError::ZeroMaxSteps)
        } else if self.bottleneck_seed.is_zero() {
            Err(ConfigError::ZeroBottleneckSeed)
        } else if self.max_augmentations == Some(0) {
            Err(ConfigError::ZeroAugmentationLimit)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.max_steps, DEFAULT_MAX_STEPS);
        assert_eq!(config.bottleneck_seed, max_token_amount());
    }

    #[test]
    fn rejects_degenerate_settings() {
        assert_eq!(
            Config::default().with_max_steps(0).validate(),
            Err(ConfigError::ZeroMaxSteps)
        );
        assert_eq!(
            Config::default()
                .with_bottleneck_seed(Amount::zero())
                .validate(),
            Err(ConfigError::ZeroBottleneckSeed)
        );
        assert_eq!(
            Config::default().with_max_augmentations(0).validate(),
            Err(ConfigError::ZeroAugmentationLimit)
        );
    }
}
