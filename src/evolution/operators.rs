use ndarray::{Array1, s};
use rand::Rng;

/// Flips each gene of `mask` independently with probability `rate`.
///
/// Runs in place on an offspring mask before its fitness is computed, so the
/// evaluated individual never carries pre-mutation fitness.
pub fn mutate<R: Rng>(mask: &mut Array1<u8>, rate: f64, rng: &mut R) {
    for gene in mask.iter_mut() {
        if rng.random::<f64>() < rate {
            *gene = 1 - *gene;
        }
    }
}

/// Single-point crossover: draws a cut point uniformly from `[0, len)` and
/// splices the parents there.
///
/// A cut point of zero reproduces `parent_b` wholesale; the largest drawable
/// cut point still inherits the final gene from `parent_b`.
///
/// # Panics
///
/// Panics if the parents are empty (there is no cut point to draw).
pub fn crossover<R: Rng>(
    parent_a: &Array1<u8>,
    parent_b: &Array1<u8>,
    rng: &mut R,
) -> Array1<u8> {
    let point = rng.random_range(0..parent_a.len());
    crossover_at(parent_a, parent_b, point)
}

/// Splices two equal-length parent masks at `point`: genes before `point`
/// come from `parent_a`, genes from `point` onward come from `parent_b`.
///
/// # Panics
///
/// Panics if `point` exceeds either parent's length.
pub fn crossover_at(parent_a: &Array1<u8>, parent_b: &Array1<u8>, point: usize) -> Array1<u8> {
    debug_assert_eq!(parent_a.len(), parent_b.len());
    let mut child = parent_b.clone();
    child
        .slice_mut(s![..point])
        .assign(&parent_a.slice(s![..point]));
    child
}
