//! Unit tests for the crossover and mutation operators.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tsp_forkjoin::genetic::Genetic;
use tsp_forkjoin::problem::{City, Problem};
use tsp_forkjoin::route::{Route, DEPOT};

/// Creates a problem with cities on a 3x4 grid of coordinates.
fn create_test_problem() -> Problem {
    let mut cities = Vec::new();
    for i in 0..3 {
        for j in 0..4 {
            cities.push(City::new(
                format!("C{}", cities.len()),
                45.0 + i as f64,
                5.0 + j as f64,
            ));
        }
    }
    Problem::new(cities).unwrap()
}

fn random_route(problem: &Problem, rng: &mut ChaCha8Rng) -> Route {
    let mut interior: Vec<usize> = (1..problem.len()).collect();
    interior.shuffle(rng);
    Route::from_interior(&interior, problem)
}

#[test]
fn test_cross_keeps_first_half_of_first_parent() {
    let problem = create_test_problem();
    let a = Route::from_interior(&(1..12).collect::<Vec<_>>(), &problem);
    let b = Route::from_interior(&(1..12).rev().collect::<Vec<_>>(), &problem);

    let child = Genetic::cross(&a, &b, &problem);

    // len = 13, half = 6: positions 0..6 come from `a`
    assert_eq!(&child.stops()[..6], &a.stops()[..6]);
    // b[6..12] = 6, 5, 4, 3, 2, 1 only contributes 6, then b[1..6] follows
    assert_eq!(&child.stops()[6..], &[6, 11, 10, 9, 8, 7, 0]);
}

#[test]
fn test_cross_yields_full_permutation() {
    let problem = create_test_problem();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    for _ in 0..200 {
        let a = random_route(&problem, &mut rng);
        let b = random_route(&problem, &mut rng);

        let child = Genetic::cross(&a, &b, &problem);

        assert_eq!(child.len(), problem.len() + 1);
        assert_eq!(child.stops()[0], DEPOT);
        assert_eq!(child.stops()[problem.len()], DEPOT);
        assert!(child.is_well_formed(&problem), "{:?}", child);
    }
}

#[test]
fn test_cross_of_identical_parents_is_identity() {
    let problem = create_test_problem();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let a = random_route(&problem, &mut rng);

    let child = Genetic::cross(&a, &a, &problem);

    assert_eq!(child, a);
}

#[test]
fn test_mutate_swaps_two_interior_stops() {
    let problem = create_test_problem();
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    for _ in 0..100 {
        let route = random_route(&problem, &mut rng);
        let mutated = Genetic::mutate(&route, &problem, &mut rng);

        let changed: Vec<usize> = (0..route.len())
            .filter(|&i| route.stops()[i] != mutated.stops()[i])
            .collect();

        assert_eq!(changed.len(), 2);
        assert!(changed.iter().all(|&i| i != 0 && i != route.len() - 1));
        assert!(mutated.is_well_formed(&problem));
    }
}

#[test]
fn test_mutate_leaves_input_untouched() {
    let problem = create_test_problem();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let route = random_route(&problem, &mut rng);
    let snapshot = route.clone();

    let mutated = Genetic::mutate(&route, &problem, &mut rng);

    assert_eq!(route, snapshot);
    assert_ne!(mutated, route);
    let fresh = Route::new(mutated.stops().to_vec(), &problem);
    assert!((mutated.distance() - fresh.distance()).abs() < 1e-9);
}

#[test]
fn test_mutate_is_reproducible() {
    let problem = create_test_problem();
    let route = Route::from_interior(&(1..12).collect::<Vec<_>>(), &problem);

    let mut rng1 = ChaCha8Rng::seed_from_u64(42);
    let mut rng2 = ChaCha8Rng::seed_from_u64(42);

    assert_eq!(
        Genetic::mutate(&route, &problem, &mut rng1),
        Genetic::mutate(&route, &problem, &mut rng2)
    );
}
