#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use cellga::evolution::fitness::{Evaluator, FeatureCountEvaluator};
use cellga::evolution::grid::Grid;
use cellga::evolution::individual::Individual;
use cellga::evolution::params::Params;
use cellga::evolution::simulation::Simulation;
use ndarray::{Array1, array};

fn create_test_params() -> Params {
    Params {
        rows: 6,
        cols: 6,
        num_features: 20,
        generations: 10,
        mutation_rate: 0.05,
        rng_seed: Some(42),
    }
}

/// Builds a mask of `num_features` genes whose first `count` genes are set.
fn mask_with_count(num_features: usize, count: usize) -> Array1<u8> {
    Array1::from_shape_fn(num_features, |gene| u8::from(gene < count))
}

fn assert_grids_equal(a: &Grid, b: &Grid) {
    assert_eq!(a.rows(), b.rows());
    assert_eq!(a.cols(), b.cols());
    for (cell_a, cell_b) in a.cells().iter().zip(b.cells()) {
        assert_eq!(cell_a.mask(), cell_b.mask());
        assert_eq!(cell_a.fitness(), cell_b.fitness());
    }
}

#[test]
fn test_simulation_rejects_invalid_params() {
    let evaluator = FeatureCountEvaluator::default();

    let mut params = create_test_params();
    params.rows = 0;
    assert!(Simulation::new(params, evaluator).is_err());

    let mut params = create_test_params();
    params.cols = 0;
    assert!(Simulation::new(params, evaluator).is_err());

    let mut params = create_test_params();
    params.num_features = 0;
    assert!(Simulation::new(params, evaluator).is_err());

    let mut params = create_test_params();
    params.generations = 0;
    assert!(Simulation::new(params, evaluator).is_err());

    let mut params = create_test_params();
    params.mutation_rate = -0.1;
    assert!(Simulation::new(params, evaluator).is_err());

    let mut params = create_test_params();
    params.mutation_rate = 1.5;
    assert!(Simulation::new(params, evaluator).is_err());

    let mut params = create_test_params();
    params.mutation_rate = f64::NAN;
    assert!(Simulation::new(params, evaluator).is_err());
}

#[test]
fn test_simulation_accepts_boundary_params() {
    let evaluator = FeatureCountEvaluator::default();

    let mut params = create_test_params();
    params.rows = 1;
    params.cols = 1;
    assert!(Simulation::new(params, evaluator).is_ok());

    let mut params = create_test_params();
    params.mutation_rate = 0.0;
    assert!(Simulation::new(params, evaluator).is_ok());

    let mut params = create_test_params();
    params.mutation_rate = 1.0;
    assert!(Simulation::new(params, evaluator).is_ok());
}

#[test]
fn test_new_builds_an_evaluated_starting_grid() {
    let params = create_test_params();
    let evaluator = FeatureCountEvaluator::default();

    let simulation = Simulation::new(params, evaluator).expect("valid params");

    assert_eq!(simulation.generation(), 0);
    assert_eq!(simulation.seed(), 42);
    assert_eq!(simulation.params().population_size(), 36);
    let grid = simulation.grid();
    assert_eq!(grid.rows(), 6);
    assert_eq!(grid.cols(), 6);
    for cell in grid.cells() {
        assert_eq!(cell.mask().len(), 20);
        assert_eq!(cell.fitness(), evaluator.evaluate(cell.mask()));
    }
}

#[test]
fn test_step_advances_one_generation_and_preserves_shape() {
    let params = create_test_params();
    let evaluator = FeatureCountEvaluator::default();
    let mut simulation = Simulation::new(params, evaluator).expect("valid params");

    simulation.step();

    assert_eq!(simulation.generation(), 1);
    let grid = simulation.grid();
    assert_eq!(grid.rows(), 6);
    assert_eq!(grid.cols(), 6);
    for cell in grid.cells() {
        assert_eq!(cell.mask().len(), 20);
        assert!(cell.mask().iter().all(|&gene| gene == 0 || gene == 1));
    }
}

#[test]
fn test_same_seed_reproduces_identical_runs() {
    let evaluator = FeatureCountEvaluator::default();

    let mut first = Simulation::new(create_test_params(), evaluator).expect("valid params");
    let mut second = Simulation::new(create_test_params(), evaluator).expect("valid params");
    first.run();
    second.run();

    assert_grids_equal(first.grid(), second.grid());
    assert_eq!(first.best().mask(), second.best().mask());
    assert_eq!(first.best().fitness(), second.best().fitness());
}

#[test]
fn test_different_seeds_produce_different_grids() {
    let evaluator = FeatureCountEvaluator::default();

    let mut params = create_test_params();
    params.rng_seed = Some(1);
    let first = Simulation::new(params, evaluator).expect("valid params");

    let mut params = create_test_params();
    params.rng_seed = Some(2);
    let second = Simulation::new(params, evaluator).expect("valid params");

    let differs = first
        .grid()
        .cells()
        .iter()
        .zip(second.grid().cells())
        .any(|(cell_a, cell_b)| cell_a.mask() != cell_b.mask());
    assert!(differs);
}

#[test]
fn test_missing_seed_is_drawn_from_entropy() {
    let evaluator = FeatureCountEvaluator::default();
    let mut params = create_test_params();
    params.rng_seed = None;

    let first = Simulation::new(params.clone(), evaluator).expect("valid params");
    let second = Simulation::new(params, evaluator).expect("valid params");

    assert_ne!(first.seed(), second.seed());
}

#[test]
fn test_step_depends_only_on_the_prior_grid() {
    let params = create_test_params();
    let evaluator = FeatureCountEvaluator::default();
    let make_grid = || {
        let cells = (0..36)
            .map(|index| Individual::new(mask_with_count(20, index % 21), &evaluator))
            .collect();
        Grid::from_cells(6, 6, cells).expect("valid test grid")
    };

    let mut first =
        Simulation::from_grid(params.clone(), evaluator, make_grid()).expect("valid start");
    let mut second = Simulation::from_grid(params, evaluator, make_grid()).expect("valid start");
    first.step();
    second.step();

    assert_grids_equal(first.grid(), second.grid());
}

#[test]
fn test_uniform_fitness_grid_is_a_fixed_point_without_mutation() {
    // Every mask selects exactly the target count, so all cells tie at
    // fitness 1.0: each cell selects itself, crossover of a mask with itself
    // is the identity, and a zero mutation rate changes nothing.
    let evaluator = FeatureCountEvaluator::new(2);
    let masks = [
        array![1u8, 1, 0, 0],
        array![0u8, 0, 1, 1],
        array![1u8, 0, 1, 0],
        array![0u8, 1, 0, 1],
    ];
    let cells: Vec<Individual> = masks
        .iter()
        .map(|mask| Individual::new(mask.clone(), &evaluator))
        .collect();
    let grid = Grid::from_cells(2, 2, cells).expect("valid test grid");
    let params = Params {
        rows: 2,
        cols: 2,
        num_features: 4,
        generations: 1,
        mutation_rate: 0.0,
        rng_seed: Some(99),
    };

    let mut simulation = Simulation::from_grid(params, evaluator, grid).expect("valid start");
    for cell in simulation.grid().cells() {
        assert_eq!(cell.fitness(), 1.0);
    }

    simulation.step();

    for (cell, mask) in simulation.grid().cells().iter().zip(&masks) {
        assert_eq!(cell.mask(), mask);
        assert_eq!(cell.fitness(), 1.0);
    }
}

#[test]
fn test_run_executes_the_configured_number_of_generations() {
    let params = create_test_params();
    let evaluator = FeatureCountEvaluator::default();
    let mut simulation = Simulation::new(params, evaluator).expect("valid params");

    simulation.run();

    assert_eq!(simulation.generation(), 10);
}

#[test]
fn test_fitness_cache_stays_coherent_after_a_run() {
    let params = create_test_params();
    let evaluator = FeatureCountEvaluator::default();
    let mut simulation = Simulation::new(params, evaluator).expect("valid params");

    simulation.run();

    for cell in simulation.grid().cells() {
        assert_eq!(cell.fitness(), evaluator.evaluate(cell.mask()));
        assert!(cell.fitness() > 0.0 && cell.fitness() <= 1.0);
    }
}

#[test]
fn test_from_grid_rejects_mismatched_shapes() {
    let evaluator = FeatureCountEvaluator::default();
    let cells = (0..4)
        .map(|_| Individual::new(mask_with_count(20, 5), &evaluator))
        .collect();
    let grid = Grid::from_cells(2, 2, cells).expect("valid test grid");

    // Params describe a different lattice than the supplied grid
    let mut params = create_test_params();
    params.rows = 3;
    params.cols = 3;
    assert!(Simulation::from_grid(params, evaluator, grid.clone()).is_err());

    // Mask length disagrees with num_features
    let mut params = create_test_params();
    params.rows = 2;
    params.cols = 2;
    params.num_features = 10;
    assert!(Simulation::from_grid(params, evaluator, grid).is_err());
}
