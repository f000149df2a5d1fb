//! Run-scoped normalization constants for distance metrics.
//!
//! The entropy and Euclidean distances are divided by their largest possible
//! value so that they land in `[0, 1]`. Those maxima depend only on configuration
//! (alphabet size, bin count, point population size) and are computed on first use
//! and then reused for the rest of the run.
//!
//! The cache is owned by the caller (typically the training run) and shared by
//! reference with every distance computation. Each constant is initialized
//! exactly once even when distances are computed from several threads.
//! Starting a new run requires [`NormalizerCache::reset`] (or a fresh cache).

use std::sync::OnceLock;

use coevo_stats::divergence::{SmoothedDistribution, symmetric_kl_divergence};

#[derive(Debug, Default)]
pub struct NormalizerCache {
    max_entropy: OnceLock<f64>,
    max_euclidean: OnceLock<f64>,
}

impl NormalizerCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest symmetric KL divergence between two action distributions.
    ///
    /// Reached by two constant sequences playing different actions. The value is
    /// memoized on first call; later calls return it regardless of `total_actions`.
    ///
    /// # Panics
    ///
    /// Panics if `total_actions` is lower than 2.
    #[must_use]
    pub fn max_entropy(&self, total_actions: usize) -> f64 {
        *self.max_entropy.get_or_init(|| {
            assert!(total_actions >= 2, "entropy needs at least two actions");
            let last = u8::try_from(total_actions - 1).unwrap_or(u8::MAX);
            let first = SmoothedDistribution::from_symbols(&[0], total_actions);
            let other = SmoothedDistribution::from_symbols(&[last], total_actions);
            symmetric_kl_divergence(&first, &other)
        })
    }

    /// Largest Euclidean distance between two pattern encodings.
    ///
    /// Patterns hold one bin index per point, so two patterns are farthest apart
    /// when they sit in the first and last bin at every position:
    /// `sqrt((total_bins - 1)² × total_points)`. Memoized on first call.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn max_euclidean(&self, total_bins: usize, total_points: usize) -> f64 {
        *self.max_euclidean.get_or_init(|| {
            let span = total_bins.saturating_sub(1) as f64;
            (span * span * total_points as f64).sqrt()
        })
    }

    /// Forgets memoized constants so the next run derives them again.
    pub fn reset(&mut self) {
        self.max_entropy.take();
        self.max_euclidean.take();
    }
}
