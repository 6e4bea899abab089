//! Unit tests for the Route structure.

use tsp_forkjoin::problem::{City, Problem};
use tsp_forkjoin::route::{Route, DEPOT};
use tsp_forkjoin::utils::format_distance;

const KM_PER_DEGREE: f64 = 60.0 * 1.1515 * 1.609344;

/// Cities one degree apart along the equator.
fn create_line_problem(n: usize) -> Problem {
    let cities = (0..n)
        .map(|i| City::new(format!("C{}", i), 0.0, i as f64))
        .collect();
    Problem::new(cities).unwrap()
}

#[test]
fn test_route_from_interior() {
    let problem = create_line_problem(4);
    let route = Route::from_interior(&[1, 2, 3], &problem);

    assert_eq!(route.stops(), &[DEPOT, 1, 2, 3, DEPOT]);
    assert_eq!(route.len(), problem.len() + 1);

    // 0 -> 1 -> 2 -> 3 -> 0
    let expected = 6.0 * KM_PER_DEGREE;
    assert!((route.distance() - expected).abs() < 1e-6);
}

#[test]
fn test_route_distance_is_evaluated_eagerly() {
    let problem = create_line_problem(4);
    let route = Route::new(vec![0, 2, 1, 3, 0], &problem);

    // 0 -> 2 -> 1 -> 3 -> 0
    let expected = (2.0 + 1.0 + 2.0 + 3.0) * KM_PER_DEGREE;
    assert!((route.distance() - expected).abs() < 1e-6);
}

#[test]
fn test_swap_updates_distance() {
    let problem = create_line_problem(4);
    let mut route = Route::from_interior(&[1, 2, 3], &problem);
    let before = route.distance();

    route.swap(1, 2, &problem);

    assert_eq!(route.stops(), &[0, 2, 1, 3, 0]);
    assert!(route.distance() > before);
    let fresh = Route::new(route.stops().to_vec(), &problem);
    assert!((route.distance() - fresh.distance()).abs() < 1e-9);
}

#[test]
fn test_clone_is_independent() {
    let problem = create_line_problem(5);
    let original = Route::from_interior(&[1, 2, 3, 4], &problem);
    let mut copy = original.clone();

    copy.swap(1, 4, &problem);

    assert_eq!(original.stops(), &[0, 1, 2, 3, 4, 0]);
    assert_ne!(original, copy);
}

#[test]
fn test_well_formed_checks() {
    let problem = create_line_problem(4);

    assert!(Route::from_interior(&[3, 1, 2], &problem).is_well_formed(&problem));
    // Missing a city
    assert!(!Route::from_interior(&[1, 2], &problem).is_well_formed(&problem));
    // Duplicate city
    assert!(!Route::from_interior(&[1, 1, 2], &problem).is_well_formed(&problem));
    // Does not return to the depot
    assert!(!Route::new(vec![0, 1, 2, 3], &problem).is_well_formed(&problem));
    // Depot in the interior
    assert!(!Route::new(vec![0, 1, 0, 2, 0], &problem).is_well_formed(&problem));
}

#[test]
fn test_single_city_route() {
    let problem = create_line_problem(1);
    let route = Route::from_interior(&[], &problem);

    assert_eq!(route.stops(), &[0, 0]);
    assert_eq!(route.distance(), 0.0);
    assert!(route.is_well_formed(&problem));
}

#[test]
fn test_describe() {
    let problem = create_line_problem(3);
    let route = Route::from_interior(&[2, 1], &problem);

    let description = route.describe(&problem);
    assert_eq!(
        description,
        format!("{}: C0 > C2 > C1 > C0", format_distance(route.distance()))
    );
}
