//! Execution substrates that run work packages in parallel.
//!
//! The driver only needs three primitives: how many units to fork into, a
//! barrier-style map over independent units, and an associative reduce.

use crate::error::{Error, Result};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// A substrate able to run independent units concurrently.
pub trait Executor {
    /// Number of units the driver should fork into per round.
    fn parallelism_hint(&self) -> usize;

    /// Apply `f` to every unit and wait for all of them to finish.
    ///
    /// The first failing unit aborts the whole map.
    fn map<T, F>(&self, units: Vec<T>, f: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(T) -> Result<T> + Sync + Send;

    /// Fold the units pairwise with an associative `f`.
    fn reduce<T, F>(&self, units: Vec<T>, f: F) -> Result<T>
    where
        T: Send,
        F: Fn(T, T) -> T + Sync + Send;
}

fn panic_reason(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn run_unit<T, F>(index: usize, unit: T, f: &F) -> Result<T>
where
    F: Fn(T) -> Result<T>,
{
    match panic::catch_unwind(AssertUnwindSafe(|| f(unit))) {
        Ok(result) => result,
        Err(payload) => Err(Error::WorkerFailed {
            index,
            reason: panic_reason(payload),
        }),
    }
}

/// Number of worker threads requested by a master descriptor.
///
/// `local` means one thread, `local[N]` means `N` threads and `local[*]` means
/// every available core (returned as `0`). Anything else is rejected.
pub fn parse_master(master: &str) -> Option<usize> {
    let master = master.trim();
    if master == "local" {
        return Some(1);
    }
    let inner = master.strip_prefix("local[")?.strip_suffix(']')?;
    match inner {
        "*" => Some(0),
        n => n.parse::<usize>().ok().filter(|&n| n > 0),
    }
}

/// Runs units on a fixed-size rayon thread pool.
pub struct ThreadPoolExecutor {
    pool: ThreadPool,
}

impl ThreadPoolExecutor {
    /// Create a pool with `threads` workers; `0` uses every available core.
    pub fn new(threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("tsp-worker-{}", i))
            .build()?;
        Ok(ThreadPoolExecutor { pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Executor for ThreadPoolExecutor {
    fn parallelism_hint(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn map<T, F>(&self, units: Vec<T>, f: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(T) -> Result<T> + Sync + Send,
    {
        self.pool.install(|| {
            units
                .into_par_iter()
                .enumerate()
                .map(|(index, unit)| run_unit(index, unit, &f))
                .collect()
        })
    }

    fn reduce<T, F>(&self, units: Vec<T>, f: F) -> Result<T>
    where
        T: Send,
        F: Fn(T, T) -> T + Sync + Send,
    {
        self.pool
            .install(|| units.into_par_iter().reduce_with(&f))
            .ok_or(Error::EmptyReduce)
    }
}

/// Runs every unit on the calling thread, one after another.
///
/// The parallelism hint is still honoured so a run forks into the same number
/// of packages as its threaded counterpart.
pub struct SequentialExecutor {
    parallelism: usize,
}

impl SequentialExecutor {
    pub fn new(parallelism: usize) -> Self {
        SequentialExecutor {
            parallelism: parallelism.max(1),
        }
    }
}

impl Default for SequentialExecutor {
    fn default() -> Self {
        SequentialExecutor::new(1)
    }
}

impl Executor for SequentialExecutor {
    fn parallelism_hint(&self) -> usize {
        self.parallelism
    }

    fn map<T, F>(&self, units: Vec<T>, f: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(T) -> Result<T> + Sync + Send,
    {
        units
            .into_iter()
            .enumerate()
            .map(|(index, unit)| run_unit(index, unit, &f))
            .collect()
    }

    fn reduce<T, F>(&self, units: Vec<T>, f: F) -> Result<T>
    where
        T: Send,
        F: Fn(T, T) -> T + Sync + Send,
    {
        units.into_iter().reduce(f).ok_or(Error::EmptyReduce)
    }
}
