//! Units of work handed to the executor: fork, solve and combine.

use crate::config::{Config, GENERATION_SIZE};
use crate::error::Result;
use crate::population::Population;
use crate::problem::Problem;
use crate::route::Route;
use crate::solver::{Limits, Solver};
use crate::utils::{format_distance, improvement_percent};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Duration;

/// Default stagnation limit of a work package.
pub const DEFAULT_MAX_SAME: u32 = 10;
/// Default generation limit of a work package.
pub const DEFAULT_MAX_GENERATIONS: u32 = 100;

/// Derive the seed of fork `index` from a parent seed (SplitMix64 step).
pub fn derive_seed(seed: u64, index: u64) -> u64 {
    let mut z = seed.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A population snapshot plus the budget a worker may spend improving it.
///
/// The city list is shared read-only through an `Arc`; the population is owned
/// exclusively and deep-copied on [`Work::fork`].
#[derive(Debug, Clone)]
pub struct Work {
    problem: Arc<Problem>,
    population: Population,
    time_budget: Duration,
    max_same: u32,
    max_generations: u32,
    generation_size: usize,
    seed: u64,
}

impl Work {
    /// Create the initial work package from a random generation zero.
    pub fn for_cities(problem: Arc<Problem>, time_budget: Duration, seed: u64) -> Self {
        let config = Config::new().with_round_duration(time_budget);
        Self::from_config(problem, &config, seed)
    }

    /// Create the initial work package using the limits of `config`.
    pub fn from_config(problem: Arc<Problem>, config: &Config, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut population =
            Population::generation_zero(&problem, config.generation_size, &mut rng);
        population.select_parents(config.generation_size);
        Work {
            problem,
            population,
            time_budget: config.round_duration,
            max_same: config.max_same,
            max_generations: config.max_generations,
            generation_size: config.generation_size,
            seed: derive_seed(seed, u64::MAX),
        }
    }

    /// Wrap an existing population.
    pub fn with_population(
        problem: Arc<Problem>,
        population: Population,
        time_budget: Duration,
        seed: u64,
    ) -> Self {
        Work {
            problem,
            population,
            time_budget,
            max_same: DEFAULT_MAX_SAME,
            max_generations: DEFAULT_MAX_GENERATIONS,
            generation_size: GENERATION_SIZE,
            seed,
        }
    }

    pub fn problem(&self) -> &Arc<Problem> {
        &self.problem
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    pub fn time_budget(&self) -> Duration {
        self.time_budget
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The shortest route held by this package.
    pub fn shortest(&self) -> Option<&Route> {
        self.population.best()
    }

    /// Distance of the shortest route, or infinity for an empty package.
    pub fn best_distance(&self) -> f64 {
        self.shortest().map_or(f64::INFINITY, Route::distance)
    }

    /// Split into `slices` independent copies for parallel solving.
    ///
    /// Every copy holds the same routes but owns them, and gets its own seed
    /// so the copies explore different random draws.
    pub fn fork(&self, slices: usize) -> Vec<Work> {
        (0..slices.max(1))
            .map(|i| Work {
                seed: derive_seed(self.seed, i as u64),
                ..self.clone()
            })
            .collect()
    }

    /// Improve the population within this package's budget.
    pub fn solve(mut self) -> Result<Work> {
        let start = self.best_distance();
        let limits = Limits {
            max_same: Some(self.max_same),
            max_duration: Some(self.time_budget),
            max_generations: Some(self.max_generations),
        };
        let solver = Solver::new(&self.problem, limits, self.generation_size)?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        let population = std::mem::take(&mut self.population);
        let outcome = solver.solve(population, &mut rng);
        self.population = outcome.population;

        info!(
            "Work package result: {} -> {} ({:.2}%) after {} generations ({:?})",
            format_distance(start),
            format_distance(self.best_distance()),
            improvement_percent(start, self.best_distance()),
            outcome.generations,
            outcome.state
        );

        Ok(self)
    }

    /// Merge two packages, keeping the best routes of both.
    ///
    /// Only the retained distances are guaranteed to match between
    /// `combine(a, b)` and `combine(b, a)`; equal-length routes may swap places.
    pub fn combine(work1: Work, work2: Work) -> Work {
        let generation_size = work1.generation_size.max(work2.generation_size);
        Work {
            problem: work1.problem,
            population: work1.population.merge(work2.population, generation_size),
            time_budget: work1.time_budget.max(work2.time_budget),
            max_same: work1.max_same.max(work2.max_same),
            max_generations: work1.max_generations.max(work2.max_generations),
            generation_size,
            seed: work1.seed.wrapping_add(work2.seed),
        }
    }
}
