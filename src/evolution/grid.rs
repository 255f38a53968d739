use rand::Rng;

use super::fitness::Evaluator;
use super::individual::Individual;
use super::params::ConfigError;

/// Orthogonal neighborhood offsets in scan order: up, down, left, right.
const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A toroidal rows x cols lattice of individuals.
///
/// Cells are stored row-major: `(row, col)` lives at `row * cols + col`.
/// Coordinates wrap modulo the lattice dimensions, so every cell has exactly
/// four orthogonal neighbors and there are no edge effects.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Individual>,
}

impl Grid {
    /// Creates a lattice of random individuals, each evaluated on construction.
    pub fn new_random<E: Evaluator, R: Rng>(
        rows: usize,
        cols: usize,
        num_features: usize,
        rng: &mut R,
        evaluator: &E,
    ) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::Invalid("grid dimensions must be non-zero"));
        }
        if num_features == 0 {
            return Err(ConfigError::Invalid("num_features must be non-zero"));
        }
        let mut cells = Vec::with_capacity(rows * cols);
        for _ in 0..rows * cols {
            cells.push(Individual::new_random(num_features, rng, evaluator));
        }
        Ok(Self { rows, cols, cells })
    }

    /// Builds a lattice from explicit individuals given in row-major order.
    ///
    /// The cell count must equal `rows * cols` and all masks must share one
    /// length.
    pub fn from_cells(
        rows: usize,
        cols: usize,
        cells: Vec<Individual>,
    ) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::Invalid("grid dimensions must be non-zero"));
        }
        if cells.len() != rows * cols {
            return Err(ConfigError::Invalid("cell count must equal rows * cols"));
        }
        let mask_len = cells[0].mask().len();
        if mask_len == 0 {
            return Err(ConfigError::Invalid("masks must be non-empty"));
        }
        if cells.iter().any(|cell| cell.mask().len() != mask_len) {
            return Err(ConfigError::Invalid("all masks must share one length"));
        }
        Ok(Self { rows, cols, cells })
    }

    /// Lattice rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Lattice columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: constructors reject empty lattices.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The individual at `(row, col)`. Coordinates must be in range; an
    /// out-of-range column would otherwise alias a cell of the next row.
    pub fn get(&self, row: usize, col: usize) -> &Individual {
        debug_assert!(row < self.rows && col < self.cols);
        &self.cells[row * self.cols + col]
    }

    /// Row-major view of all cells.
    pub fn cells(&self) -> &[Individual] {
        &self.cells
    }

    /// Wraps signed coordinates onto the torus.
    fn wrap(&self, row: isize, col: isize) -> (usize, usize) {
        let row = row.rem_euclid(self.rows as isize) as usize;
        let col = col.rem_euclid(self.cols as isize) as usize;
        (row, col)
    }

    /// Coordinates of the fittest cell among `(row, col)` and its four
    /// wrapped orthogonal neighbors.
    ///
    /// The scan starts at the cell itself and proceeds up, down, left, right.
    /// Only a strictly greater fitness displaces the current winner, so ties
    /// keep the earliest candidate; in particular a cell that ties its whole
    /// neighborhood selects itself.
    pub fn best_neighbor(&self, row: usize, col: usize) -> (usize, usize) {
        let mut best = (row, col);
        let mut best_fitness = self.get(row, col).fitness();
        for (row_offset, col_offset) in NEIGHBOR_OFFSETS {
            let (neighbor_row, neighbor_col) =
                self.wrap(row as isize + row_offset, col as isize + col_offset);
            let fitness = self.get(neighbor_row, neighbor_col).fitness();
            if fitness > best_fitness {
                best_fitness = fitness;
                best = (neighbor_row, neighbor_col);
            }
        }
        best
    }

    /// The globally fittest individual; ties go to the first cell in
    /// row-major order.
    pub fn best(&self) -> &Individual {
        let mut best = &self.cells[0];
        for cell in &self.cells[1..] {
            if cell.fitness() > best.fitness() {
                best = cell;
            }
        }
        best
    }

    /// Mean fitness across the whole lattice.
    pub fn mean_fitness(&self) -> f64 {
        let total: f64 = self.cells.iter().map(Individual::fitness).sum();
        total / self.cells.len() as f64
    }

    /// Installs the next generation's buffer, consuming it. The buffer must
    /// hold exactly one individual per cell.
    pub(crate) fn replace(&mut self, cells: Vec<Individual>) {
        assert_eq!(
            cells.len(),
            self.cells.len(),
            "generation buffer size mismatch"
        );
        self.cells = cells;
    }
}
