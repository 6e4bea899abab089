//! # tsp_forkjoin
//!
//! A genetic algorithm for the Traveling Salesman Problem over geographic
//! points, run as repeated rounds of fork, independent local optimization and
//! combine.
//!
//! Each round replicates the current elite population into one work package
//! per worker, lets every worker evolve its copy with its own random stream,
//! and merges the results by keeping the globally best routes. The search
//! stops after a fixed number of rounds or as soon as a round brings no
//! improvement.

pub mod config;
pub mod error;
pub mod executor;
pub mod genetic;
pub mod population;
pub mod problem;
pub mod route;
pub mod solver;
pub mod utils;
pub mod work;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::problem::{City, Problem};
use crate::utils::{format_distance, improvement_percent, SearchReport};
use crate::work::Work;

use itertools::Itertools;
use log::info;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Drives the fork-solve-combine rounds on top of an executor.
pub struct Driver<E: Executor> {
    pub executor: E,
    pub config: Config,
    pub rounds: u32,
    pub converged: bool,
}

impl<E: Executor> Driver<E> {
    /// Create a driver for the given executor and configuration.
    pub fn new(executor: E, config: Config) -> Self {
        Driver {
            executor,
            config,
            rounds: 0,
            converged: false,
        }
    }

    /// Build the problem from `cities` and search it, using the configured
    /// number of rounds and per-round duration.
    pub fn solve_for(&mut self, cities: Vec<City>) -> Result<SearchReport> {
        let iterations = self.config.iterations;
        let max_duration = self.config.round_duration;
        self.solve_with(cities, iterations, max_duration)
    }

    /// Search `cities` for at most `iterations` rounds of `max_duration` each.
    pub fn solve_with(
        &mut self,
        cities: Vec<City>,
        iterations: u32,
        max_duration: Duration,
    ) -> Result<SearchReport> {
        info!(
            "Solving for {} cities in {} iterations ({} ms max iteration duration)",
            cities.len(),
            iterations,
            max_duration.as_millis()
        );
        info!("{}", cities.iter().map(|c| c.name.as_str()).sorted().join(", "));
        info!("Parallelism: {}", self.executor.parallelism_hint());

        let problem = Arc::new(Problem::new(cities)?);
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let config = self.config.clone().with_round_duration(max_duration);
        let work = Work::from_config(problem, &config, seed);

        self.run(work, iterations)
    }

    /// Run up to `iterations` rounds starting from an existing work package.
    pub fn run(&mut self, mut work: Work, iterations: u32) -> Result<SearchReport> {
        let start_time = Instant::now();
        let start = work.best_distance();
        self.rounds = 0;
        self.converged = false;

        for i in 0..iterations {
            let iter_start = work.best_distance();
            work = self.round(work)?;
            self.rounds += 1;

            info!("Iteration {} result: {}", i, format_distance(work.best_distance()));
            if iter_start == work.best_distance() {
                info!("No change; terminating.");
                self.converged = true;
                break;
            }
        }

        let result = work.best_distance();
        info!(
            "Final result: {} -> {} ({:.2}%)",
            format_distance(start),
            format_distance(result),
            improvement_percent(start, result)
        );

        let best_route = work.shortest().cloned().ok_or(Error::EmptyReduce)?;
        Ok(SearchReport {
            problem: Arc::clone(work.problem()),
            best_route,
            rounds: self.rounds,
            initial_distance: start,
            final_distance: result,
            converged: self.converged,
            parallelism: self.executor.parallelism_hint(),
            runtime: start_time.elapsed(),
        })
    }

    /// One fork-solve-combine round. Waits for every worker before combining.
    fn round(&self, work: Work) -> Result<Work> {
        let forks = work.fork(self.executor.parallelism_hint());

        let solved = self.executor.map(forks, Work::solve)?;
        self.executor.reduce(solved, Work::combine)
    }
}
