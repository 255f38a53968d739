use ndarray::Array1;

/// Selected-feature count rewarded by the default [`FeatureCountEvaluator`].
pub const DEFAULT_TARGET: usize = 10;

/// Scoring capability for binary feature masks.
///
/// Implementations must be pure: deterministic for a given mask and free of
/// side effects. One evaluator instance is shared across worker threads
/// during a generation step, hence the `Send + Sync` bound.
pub trait Evaluator: Send + Sync {
    /// Scores a mask. Higher is better.
    fn evaluate(&self, mask: &Array1<u8>) -> f64;
}

/// Placeholder evaluator that scores a mask by its selected-feature count.
///
/// Fitness is `1 / (1 + |count - target|)`: strictly positive, at most 1.0,
/// and exactly 1.0 only when the mask selects `target` features. Stands in
/// for a real subset evaluation (training a model on the selected features)
/// while exercising the full evolutionary machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureCountEvaluator {
    target: usize,
}

impl FeatureCountEvaluator {
    /// Creates an evaluator that rewards masks selecting exactly `target` features.
    pub fn new(target: usize) -> Self {
        Self { target }
    }

    /// The rewarded selected-feature count.
    pub fn target(&self) -> usize {
        self.target
    }
}

impl Default for FeatureCountEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET)
    }
}

impl Evaluator for FeatureCountEvaluator {
    fn evaluate(&self, mask: &Array1<u8>) -> f64 {
        let count = mask.iter().filter(|&&gene| gene != 0).count();
        1.0 / (1.0 + count.abs_diff(self.target) as f64)
    }
}
