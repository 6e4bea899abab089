//! Single-worker generational loop with stagnation, time and generation limits.

use crate::error::{Error, Result};
use crate::population::Population;
use crate::problem::Problem;
use crate::utils::format_distance;
use log::debug;
use rand::Rng;
use std::time::{Duration, Instant};

/// Termination bounds of the local solver. `None` disables a bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Stop once this many consecutive generations fail to improve
    pub max_same: Option<u32>,
    /// Stop once the loop has run for longer than this
    pub max_duration: Option<Duration>,
    /// Stop after this many generations
    pub max_generations: Option<u32>,
}

impl Limits {
    /// Build limits from signed bounds; any value `<= 0` disables that bound.
    pub fn new(max_same: i64, max_duration_ms: i64, max_generations: i64) -> Result<Self> {
        let positive = |v: i64| (v > 0).then(|| v.min(u32::MAX as i64) as u32);
        Limits {
            max_same: positive(max_same),
            max_duration: (max_duration_ms > 0)
                .then(|| Duration::from_millis(max_duration_ms as u64)),
            max_generations: positive(max_generations),
        }
        .validate()
    }

    /// Reject limits under which the loop could never stop.
    pub fn validate(self) -> Result<Self> {
        let no_same = self.max_same.unwrap_or(0) == 0;
        let no_duration = self.max_duration.map_or(true, |d| d.is_zero());
        let no_generations = self.max_generations.unwrap_or(0) == 0;
        if no_same && no_duration && no_generations {
            return Err(Error::Unbounded);
        }
        Ok(self)
    }
}

/// Lifecycle of a solver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    Running,
    /// The stagnation limit was exceeded
    Converged,
    /// The time or generation limit was reached
    Exhausted,
}

/// Result of a solver run.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Final population, truncated and sorted so the best route comes first
    pub population: Population,
    pub state: SolverState,
    pub generations: u32,
    pub best_distance: f64,
}

/// Runs selection, crossover and mutation until one of its limits trips.
pub struct Solver<'a> {
    problem: &'a Problem,
    limits: Limits,
    generation_size: usize,
    state: SolverState,
    generation: u32,
    same_count: u32,
    best_distance: f64,
}

impl<'a> Solver<'a> {
    /// Create a solver, failing if every limit is disabled.
    pub fn new(problem: &'a Problem, limits: Limits, generation_size: usize) -> Result<Self> {
        let limits = limits.validate()?;
        Ok(Solver {
            problem,
            limits,
            generation_size,
            state: SolverState::Running,
            generation: 0,
            same_count: 0,
            best_distance: f64::INFINITY,
        })
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Evolve `population` until the solver leaves the `Running` state.
    pub fn solve<R: Rng + ?Sized>(
        mut self,
        mut population: Population,
        rng: &mut R,
    ) -> SolveOutcome {
        let start = Instant::now();

        while self.state == SolverState::Running {
            population.select_parents(self.generation_size);
            population.cross_and_mutate(self.problem, rng);
            self.generation += 1;

            let current = population
                .routes
                .iter()
                .map(|route| route.distance())
                .fold(f64::INFINITY, f64::min);
            self.record(current);
            self.state = self.next_state(start.elapsed());
        }

        population.select_parents(self.generation_size);
        SolveOutcome {
            best_distance: population.best().map_or(f64::INFINITY, |r| r.distance()),
            population,
            state: self.state,
            generations: self.generation,
        }
    }

    fn record(&mut self, current: f64) {
        if current != self.best_distance {
            debug!("{}: {}", self.generation, format_distance(current));
            self.best_distance = current;
            self.same_count = 0;
        } else {
            self.same_count += 1;
        }
    }

    fn next_state(&self, elapsed: Duration) -> SolverState {
        if self.limits.max_same.map_or(false, |max| max > 0 && self.same_count > max) {
            SolverState::Converged
        } else if self.limits.max_duration.map_or(false, |max| !max.is_zero() && elapsed > max) {
            SolverState::Exhausted
        } else if self
            .limits
            .max_generations
            .map_or(false, |max| max > 0 && self.generation >= max)
        {
            SolverState::Exhausted
        } else {
            SolverState::Running
        }
    }
}
