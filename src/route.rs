//! Closed tours over the shared city list.

use crate::problem::Problem;
use crate::utils::format_distance;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Index of the depot, the first and last stop of every tour.
pub const DEPOT: usize = 0;

/// A closed tour: a sequence of city indices starting and ending at the depot.
///
/// The distance is computed when the route is built and is kept in sync by
/// the only mutating operation, [`Route::swap`].
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    stops: Vec<usize>,
    distance: f64,
}

impl Route {
    /// Build a route from a sequence of stops and evaluate it against the problem.
    pub fn new(stops: Vec<usize>, problem: &Problem) -> Self {
        let distance = Self::tour_length(&stops, problem);
        Route { stops, distance }
    }

    /// Wrap an ordering of interior cities with the depot on both ends.
    pub fn from_interior(interior: &[usize], problem: &Problem) -> Self {
        let mut stops = Vec::with_capacity(interior.len() + 2);
        stops.push(DEPOT);
        stops.extend_from_slice(interior);
        stops.push(DEPOT);
        Route::new(stops, problem)
    }

    fn tour_length(stops: &[usize], problem: &Problem) -> f64 {
        stops
            .windows(2)
            .map(|pair| problem.get_distance(pair[0], pair[1]))
            .sum()
    }

    /// Total length of the tour in kilometres.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Exchange the stops at positions `i` and `j` and update the distance.
    pub fn swap(&mut self, i: usize, j: usize, problem: &Problem) {
        self.stops.swap(i, j);
        self.distance = Self::tour_length(&self.stops, problem);
    }

    /// Check that the tour starts and ends at the depot and visits every other
    /// city of the problem exactly once.
    pub fn is_well_formed(&self, problem: &Problem) -> bool {
        let n = problem.len();
        if self.stops.len() != n + 1 || self.stops[0] != DEPOT || self.stops[n] != DEPOT {
            return false;
        }

        let mut seen = vec![false; n];
        for &stop in &self.stops[1..n] {
            if stop == DEPOT || stop >= n || seen[stop] {
                return false;
            }
            seen[stop] = true;
        }
        true
    }

    /// Render the tour as `"<distance>: A > B > ... > A"` using city names.
    pub fn describe(&self, problem: &Problem) -> String {
        let names = self
            .stops
            .iter()
            .map(|&stop| problem.city(stop).name.as_str())
            .join(" > ");
        format!("{}: {}", format_distance(self.distance), names)
    }

    /// Order routes by distance, shorter first.
    pub fn cmp_distance(&self, other: &Route) -> Ordering {
        self.distance.total_cmp(&other.distance)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Route({:.2}: {:?})", self.distance, self.stops)
    }
}
