//! Command line entry point: load cities, run the search, print the best route.

use clap::Parser;
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::time::Duration;

use tsp_forkjoin::config::Config;
use tsp_forkjoin::executor::{parse_master, ThreadPoolExecutor};
use tsp_forkjoin::problem::{self, EUROPE_JSON};
use tsp_forkjoin::utils::save_route;
use tsp_forkjoin::Driver;

/// Approximate a shortest round trip through European cities.
#[derive(Debug, Parser)]
#[command(name = "tsp-forkjoin", version, about)]
struct Args {
    /// Amount of cities
    #[arg(short = 'c', default_value_t = 100)]
    cities: usize,

    /// Fork-solve-combine iterations
    #[arg(short = 'i', default_value_t = 10)]
    iterations: u32,

    /// Max iteration duration (seconds)
    #[arg(short = 'd', default_value_t = 8)]
    duration: u64,

    /// Shuffle cities before truncating the list
    #[arg(short = 's')]
    shuffle: bool,

    /// Executor: local, local[N] or local[*]
    #[arg(short = 'm', default_value = "local[4]")]
    master: String,

    /// App name
    #[arg(short = 'a', default_value = "SparkOfLife")]
    app_name: String,

    /// Root seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// City dataset (JSON); the bundled European cities when omitted
    #[arg(short = 'f')]
    file: Option<PathBuf>,

    /// Write the best route to this file
    #[arg(short = 'o')]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Starting {} on {} (seed {})", args.app_name, args.master, seed);

    let mut shuffle_rng = ChaCha8Rng::seed_from_u64(seed);
    let shuffle: Option<&mut dyn rand::RngCore> = if args.shuffle {
        Some(&mut shuffle_rng)
    } else {
        None
    };
    let cities = match &args.file {
        Some(path) => problem::load_cities(path, args.cities, shuffle)?,
        None => problem::parse_cities(EUROPE_JSON, args.cities, shuffle)?,
    };

    let threads = parse_master(&args.master).unwrap_or_else(|| {
        warn!("Unsupported master {:?}; using every available core", args.master);
        0
    });
    let executor = ThreadPoolExecutor::new(threads)?;
    info!("Worker pool: {} threads", executor.threads());

    let config = Config::new()
        .with_iterations(args.iterations)
        .with_round_duration(Duration::from_millis(args.duration * 1000))
        .with_seed(seed);
    let mut driver = Driver::new(executor, config);
    let report = driver.solve_for(cities)?;

    info!("{}", report.format());
    println!("{}", report.best_route.describe(&report.problem));

    if let Some(path) = &args.output {
        save_route(&report.best_route, &report.problem, path)?;
        info!("Saved route to {}", path.display());
    }

    Ok(())
}
