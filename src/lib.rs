//! # Cellga - Cellular Genetic Algorithm for Feature Selection
//!
//! A spatially structured genetic algorithm: candidate feature masks live on a
//! toroidal 2D grid, and every generation each cell breeds with the fittest of
//! its four wrapped neighbors to produce its replacement. Good masks diffuse
//! through the lattice instead of sweeping the whole population at once.
//!
//! ## Features
//!
//! - Binary feature-selection genome with cached fitness
//! - Pluggable fitness via the [`evolution::fitness::Evaluator`] trait
//! - Single-point crossover and per-gene mutation
//! - Toroidal grid with greedy local neighbor selection
//! - Data-parallel generation steps (rayon)
//! - Bit-for-bit reproducible runs from a single master seed
//!
//! ## Core Modules
//!
//! - [`evolution::individual`] - Feature masks and their cached fitness
//! - [`evolution::fitness`] - Fitness evaluation and the placeholder scorer
//! - [`evolution::operators`] - Mutation and crossover over raw masks
//! - [`evolution::grid`] - Toroidal population lattice
//! - [`evolution::simulation`] - Generation-step driver and run loop

/// Core evolutionary search logic and data structures.
pub mod evolution {
    /// Fitness evaluation and the placeholder feature-count scorer.
    pub mod fitness;
    /// Toroidal population lattice and neighbor selection.
    ///
    /// The grid owns the individuals; [`grid::Grid::best_neighbor`] implements
    /// the local selection rule every cell applies when breeding.
    pub mod grid;
    /// Individuals: binary feature masks with cached fitness.
    pub mod individual;
    /// Genetic operators over raw masks.
    pub mod operators;
    /// Run parameters and validation.
    pub mod params;
    /// Generation-step driver with parallel cell updates.
    pub mod simulation;
}
