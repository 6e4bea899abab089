//! Genetic operators on routes: ordered crossover and swap mutation.

use crate::problem::Problem;
use crate::route::{Route, DEPOT};
use rand::Rng;

/// Implements the genetic operators (crossover, mutation) on routes.
pub struct Genetic;

impl Genetic {
    /// Ordered crossover of two parent tours.
    ///
    /// The child keeps the first half of `a` in place, then takes the second
    /// half of `b` followed by the first half of `b`, skipping cities it
    /// already holds. Any city still missing after that (only possible when a
    /// parent is itself incomplete) is appended in ascending index order, so
    /// the child always visits every city of the problem exactly once.
    pub fn cross(a: &Route, b: &Route, problem: &Problem) -> Route {
        let n = problem.len();
        let a = a.stops();
        let b = b.stops();
        let len = a.len();
        let half = len / 2;

        let mut stops = Vec::with_capacity(n + 1);
        let mut seen = vec![false; n];

        stops.push(a[0]);
        seen[a[0]] = true;
        for &stop in &a[1..half.max(1)] {
            stops.push(stop);
            seen[stop] = true;
        }

        let tail = b.get(half..len.saturating_sub(1)).unwrap_or_default();
        let head = b.get(1..half).unwrap_or_default();
        for &stop in tail.iter().chain(head) {
            if !seen[stop] {
                stops.push(stop);
                seen[stop] = true;
            }
        }

        for (city, visited) in seen.iter().enumerate() {
            if !visited {
                stops.push(city);
            }
        }

        stops.push(a[0]);
        Route::new(stops, problem)
    }

    /// Swap two distinct interior stops of `route` in place.
    ///
    /// Routes with fewer than two interior stops are left untouched.
    pub fn mutate_in_place<R: Rng + ?Sized>(route: &mut Route, problem: &Problem, rng: &mut R) {
        let len = route.len();
        if len < 4 {
            return;
        }

        let i = rng.gen_range(1..len - 1);
        let mut j = rng.gen_range(1..len - 1);
        while i == j {
            j = rng.gen_range(1..len - 1);
        }

        route.swap(i, j, problem);
    }

    /// Return a mutated copy of `route`, leaving the original untouched.
    pub fn mutate<R: Rng + ?Sized>(route: &Route, problem: &Problem, rng: &mut R) -> Route {
        let mut child = route.clone();
        Self::mutate_in_place(&mut child, problem, rng);
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::City;

    fn line_problem(n: usize) -> Problem {
        let cities = (0..n)
            .map(|i| City::new(format!("C{}", i), 0.0, i as f64))
            .collect();
        Problem::new(cities).unwrap()
    }

    #[test]
    fn cross_backfills_cities_missing_from_both_parents() {
        let problem = line_problem(6);
        // Both parents are missing city 5 and repeat city 1.
        let a = Route::new(vec![DEPOT, 1, 2, 3, 4, 1, DEPOT], &problem);
        let b = Route::new(vec![DEPOT, 4, 3, 1, 2, 1, DEPOT], &problem);

        let child = Genetic::cross(&a, &b, &problem);

        assert_eq!(child.stops(), &[0, 1, 2, 4, 3, 5, 0]);
        assert!(child.is_well_formed(&problem));
    }

    #[test]
    fn mutate_in_place_ignores_routes_without_two_interior_stops() {
        let problem = line_problem(2);
        let mut route = Route::from_interior(&[1], &problem);
        let mut rng = rand::thread_rng();

        Genetic::mutate_in_place(&mut route, &problem, &mut rng);

        assert_eq!(route.stops(), &[0, 1, 0]);
    }
}
