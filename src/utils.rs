//! Formatting and reporting helpers.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::problem::Problem;
use crate::route::Route;

/// Format a distance in kilometres with two decimals.
pub fn format_distance(distance: f64) -> String {
    format!("{:.2} km", distance)
}

/// Express `result` as a percentage of `start`.
pub fn improvement_percent(start: f64, result: f64) -> f64 {
    if start == 0.0 || !start.is_finite() {
        return 100.0;
    }
    result / start * 100.0
}

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Save a route to a file.
pub fn save_route<P: AsRef<Path>>(
    route: &Route,
    problem: &Problem,
    path: P,
) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "TSP route over {} cities", problem.len())?;
    writeln!(file, "Total Distance: {}", format_distance(route.distance()))?;
    writeln!(file)?;

    for (i, &stop) in route.stops().iter().enumerate() {
        writeln!(file, "{:>4}: {}", i, problem.city(stop))?;
    }

    Ok(())
}

/// Summary of a finished search.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub problem: Arc<Problem>,
    pub best_route: Route,
    pub rounds: u32,
    pub initial_distance: f64,
    pub final_distance: f64,
    pub converged: bool,
    pub parallelism: usize,
    pub runtime: Duration,
}

impl SearchReport {
    /// Format the report as a string.
    pub fn format(&self) -> String {
        format!(
            "Search Statistics:
- Rounds: {}
- Parallelism: {}
- Runtime: {}
- Initial Distance: {}
- Final Distance: {}
- Ratio: {:.2}%
- Converged: {}",
            self.rounds,
            self.parallelism,
            format_duration(self.runtime),
            format_distance(self.initial_distance),
            format_distance(self.final_distance),
            improvement_percent(self.initial_distance, self.final_distance),
            self.converged
        )
    }
}
