//! Evolution configuration.
//!
//! [`EvolutionConfig`] holds all parameters that control the generational
//! loop.

use super::selection::SurvivorPolicy;
use crate::error::ConfigError;
use crate::layout::MAX_RESISTANCE;

/// Configuration for the evolutionary crossing minimization.
///
/// # Defaults
///
/// ```
/// use autograph::evolution::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 1000);
/// assert_eq!(config.max_generations, 1000);
/// assert_eq!(config.mutation_resistance, 50);
/// assert_eq!(config.report_interval, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use autograph::evolution::{EvolutionConfig, SurvivorPolicy};
///
/// let config = EvolutionConfig::default()
///     .with_population_size(200)
///     .with_mutation_resistance(80)
///     .with_survivors(SurvivorPolicy::Elitist { ratio: 0.2 })
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    /// Number of layouts per generation.
    pub population_size: usize,

    /// Generation budget.
    pub max_generations: usize,

    /// Mutation resistance, 0–100. Higher values mean fewer swaps.
    pub mutation_resistance: u8,

    /// Report (and export) the current best every this many generations.
    ///
    /// 0 reports only the seed and the final generation.
    pub report_interval: usize,

    /// Which members survive into the next generation.
    pub survivors: SurvivorPolicy,

    /// Number of generations without improvement before stopping.
    ///
    /// Set to 0 to disable plateau-based termination (the default).
    pub stagnation_limit: usize,

    /// Whether to produce and score children in parallel using rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled. Results are
    /// identical either way for a fixed seed.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            max_generations: 1000,
            mutation_resistance: 50,
            report_interval: 100,
            survivors: SurvivorPolicy::default(),
            stagnation_limit: 0,
            parallel: true,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the mutation resistance, clamped to 0–100.
    pub fn with_mutation_resistance(mut self, resistance: u8) -> Self {
        self.mutation_resistance = resistance.min(MAX_RESISTANCE);
        self
    }

    /// Sets the reporting interval (0 = seed and final generation only).
    pub fn with_report_interval(mut self, every: usize) -> Self {
        self.report_interval = every;
        self
    }

    /// Sets the survivor policy.
    pub fn with_survivors(mut self, survivors: SurvivorPolicy) -> Self {
        self.survivors = survivors;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Enables or disables parallel child production.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(invalid("population_size", "must be at least 1"));
        }
        if self.max_generations == 0 {
            return Err(invalid("max_generations", "must be at least 1"));
        }
        if self.mutation_resistance > MAX_RESISTANCE {
            return Err(invalid(
                "mutation_resistance",
                format!("must be at most {MAX_RESISTANCE}"),
            ));
        }
        if let SurvivorPolicy::Elitist { ratio } = self.survivors {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(invalid("elite ratio", "must be within 0.0..=1.0"));
            }
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}
