//! Basic example of using the tsp_forkjoin library.

use std::env;
use std::time::Duration;
use tsp_forkjoin::config::Config;
use tsp_forkjoin::executor::ThreadPoolExecutor;
use tsp_forkjoin::problem::{parse_cities, EUROPE_JSON};
use tsp_forkjoin::utils::{format_duration, save_route};
use tsp_forkjoin::Driver;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Get the number of cities from the command line or use a default
    let args: Vec<String> = env::args().collect();
    let count = if args.len() > 1 { args[1].parse()? } else { 30 };

    let cities = parse_cities(EUROPE_JSON, count, None)?;
    println!("Loaded {} cities", cities.len());

    // Configure algorithm
    let config = Config::new()
        .with_iterations(5)
        .with_round_duration(Duration::from_secs(2))
        .with_seed(42);

    // Run on every available core
    let executor = ThreadPoolExecutor::new(0)?;
    let mut driver = Driver::new(executor, config);
    let report = driver.solve_for(cities)?;

    println!("Search completed in {}", format_duration(report.runtime));
    println!("{}", report.format());
    println!("{}", report.best_route.describe(&report.problem));

    save_route(&report.best_route, &report.problem, "route.txt")?;
    println!("Saved route to route.txt");

    Ok(())
}
