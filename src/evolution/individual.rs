use ndarray::Array1;
use rand::Rng;

use super::fitness::Evaluator;

/// A candidate solution: a fixed-length binary feature mask together with
/// the evaluator's score for it.
///
/// The cached fitness always matches the current mask. Both fields are
/// private and every constructor evaluates the mask it receives, so a stale
/// score is unrepresentable. Genetic operators therefore work on raw masks
/// before an individual is built (see [`super::operators`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    /// Binary inclusion mask over the feature set (one gene per feature).
    mask: Array1<u8>,
    /// Cached evaluator output for `mask`.
    fitness: f64,
}

impl Individual {
    /// Builds an individual from an explicit mask, evaluating it immediately.
    pub fn new<E: Evaluator>(mask: Array1<u8>, evaluator: &E) -> Self {
        let fitness = evaluator.evaluate(&mask);
        Self { mask, fitness }
    }

    /// Creates a random individual: each gene is set independently with
    /// probability 0.5, then the mask is evaluated.
    pub fn new_random<E: Evaluator, R: Rng>(
        num_features: usize,
        rng: &mut R,
        evaluator: &E,
    ) -> Self {
        let mask = Array1::from_shape_fn(num_features, |_| u8::from(rng.random::<f64>() < 0.5));
        Self::new(mask, evaluator)
    }

    /// The feature-inclusion mask.
    pub fn mask(&self) -> &Array1<u8> {
        &self.mask
    }

    /// Cached fitness of the current mask.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Number of selected features.
    pub fn selected_count(&self) -> usize {
        self.mask.iter().filter(|&&gene| gene != 0).count()
    }

    /// Zero-based indices of the selected features, in ascending order.
    pub fn selected_features(&self) -> Vec<usize> {
        self.mask
            .iter()
            .enumerate()
            .filter(|&(_, &gene)| gene != 0)
            .map(|(index, _)| index)
            .collect()
    }
}
