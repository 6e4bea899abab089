//! Population management for the genetic algorithm.

use crate::genetic::Genetic;
use crate::problem::Problem;
use crate::route::Route;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An ordered collection of candidate routes.
///
/// After [`Population::select_parents`] the routes are sorted by distance, so
/// the best one sits at index 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Population {
    pub routes: Vec<Route>,
}

impl Population {
    /// Wrap an existing list of routes.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Population { routes }
    }

    /// Build `size` random tours, each a shuffled permutation of the interior
    /// cities framed by the depot.
    pub fn generation_zero<R: Rng + ?Sized>(problem: &Problem, size: usize, rng: &mut R) -> Self {
        let mut interior: Vec<usize> = (1..problem.len()).collect();
        let mut routes = Vec::with_capacity(size);

        for _ in 0..size {
            interior.shuffle(rng);
            routes.push(Route::from_interior(&interior, problem));
        }

        Population { routes }
    }

    /// Elitist truncation: sort ascending by distance and keep the best `size`.
    ///
    /// The sort is stable, so ties keep their current order.
    pub fn select_parents(&mut self, size: usize) {
        self.routes.sort_by(Route::cmp_distance);
        self.routes.truncate(size);
    }

    /// Append `mutate(cross(p[i], p[j]))` for every ordered pair `i != j` of the
    /// current routes, growing the population from `m` to `m * m`.
    pub fn cross_and_mutate<R: Rng + ?Sized>(&mut self, problem: &Problem, rng: &mut R) {
        let size = self.routes.len();
        self.routes.reserve(size * size.saturating_sub(1));

        for i1 in 0..size {
            for i2 in 0..size {
                if i1 != i2 {
                    let mut child = Genetic::cross(&self.routes[i1], &self.routes[i2], problem);
                    Genetic::mutate_in_place(&mut child, problem, rng);
                    self.routes.push(child);
                }
            }
        }
    }

    /// Merge two populations and keep the best `size` routes.
    pub fn merge(mut self, other: Population, size: usize) -> Self {
        self.routes.extend(other.routes);
        self.select_parents(size);
        self
    }

    /// The first route, which is the best one once the population is sorted.
    pub fn best(&self) -> Option<&Route> {
        self.routes.first()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
