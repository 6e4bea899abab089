//! Configuration parameters for the fork-solve-combine search.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Nominal population size kept after every selection step.
pub const GENERATION_SIZE: usize = 100;

/// Configuration settings for the search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of routes retained after selection and combine
    pub generation_size: usize,
    /// Generations without improvement before a worker stops (0 disables)
    pub max_same: u32,
    /// Generations per worker per round (0 disables)
    pub max_generations: u32,
    /// Wall-clock budget of a single worker per round
    pub round_duration: Duration,
    /// Maximum number of fork-solve-combine rounds
    pub iterations: u32,
    /// Root seed; a random one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            generation_size: GENERATION_SIZE,
            max_same: 10,
            max_generations: 100,
            round_duration: Duration::from_secs(8),
            iterations: 10,
            seed: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the generation size.
    pub fn with_generation_size(mut self, size: usize) -> Self {
        self.generation_size = size;
        self
    }

    /// Set the stagnation limit of a worker.
    pub fn with_max_same(mut self, max_same: u32) -> Self {
        self.max_same = max_same;
        self
    }

    /// Set the generation limit of a worker.
    pub fn with_max_generations(mut self, generations: u32) -> Self {
        self.max_generations = generations;
        self
    }

    /// Set the time budget of a worker per round.
    pub fn with_round_duration(mut self, duration: Duration) -> Self {
        self.round_duration = duration;
        self
    }

    /// Set the number of driver rounds.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the root seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
