//! Benchmarks for the genetic operators and the local solver.

#[cfg(feature = "bench")]
extern crate criterion;

#[cfg(feature = "bench")]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tsp_forkjoin::config::GENERATION_SIZE;
use tsp_forkjoin::population::Population;
use tsp_forkjoin::problem::{parse_cities, Problem, EUROPE_JSON};
use tsp_forkjoin::solver::{Limits, Solver};

/// Create a benchmark problem from the first `size` bundled cities.
fn create_benchmark_problem(size: usize) -> Problem {
    let cities = parse_cities(EUROPE_JSON, size, None).expect("bundled dataset parses");
    Problem::new(cities).expect("bundled dataset is not empty")
}

#[cfg(feature = "bench")]
fn benchmark_generation_zero(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation_zero");

    for size in [25, 50, 100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let mut rng = ChaCha8Rng::seed_from_u64(1);

            b.iter(|| Population::generation_zero(&problem, GENERATION_SIZE, &mut rng));
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_cross_and_mutate(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_and_mutate");

    for size in [25, 50, 100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let mut rng = ChaCha8Rng::seed_from_u64(2);
            let population = Population::generation_zero(&problem, GENERATION_SIZE, &mut rng);

            b.iter(|| {
                let mut population = population.clone();
                population.cross_and_mutate(&problem, &mut rng);
                population.select_parents(GENERATION_SIZE);
            });
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver");
    group.sample_size(10);

    for size in [25, 50].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let limits = Limits::new(10, 0, 20).expect("bounded limits");

            b.iter(|| {
                let mut rng = ChaCha8Rng::seed_from_u64(3);
                let population = Population::generation_zero(&problem, GENERATION_SIZE, &mut rng);
                Solver::new(&problem, limits, GENERATION_SIZE)
                    .expect("bounded limits")
                    .solve(population, &mut rng)
            });
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
criterion_group!(
    benches,
    benchmark_generation_zero,
    benchmark_cross_and_mutate,
    benchmark_solver
);

#[cfg(feature = "bench")]
criterion_main!(benches);
