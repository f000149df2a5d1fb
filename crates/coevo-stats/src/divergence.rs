//! Empirical distributions over a finite alphabet and relative entropy.
//!
//! [`SmoothedDistribution`] turns a sequence of symbols (indices into an alphabet of
//! known size) into a probability vector. Symbols that never occur receive a tiny
//! probability [`SMOOTHING_EPSILON`] before renormalization, which keeps the
//! Kullback-Leibler divergence between any two distributions finite.

/// Probability assigned to symbols absent from a sequence before renormalization.
pub const SMOOTHING_EPSILON: f64 = 1e-12;

/// Additively smoothed empirical distribution of a symbol sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedDistribution {
    probabilities: Vec<f64>,
}

impl SmoothedDistribution {
    /// Builds the distribution of `symbols` over the alphabet `0..alphabet_size`.
    ///
    /// # Panics
    ///
    /// Panics if `symbols` is empty or contains a symbol outside the alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use coevo_stats::divergence::SmoothedDistribution;
    ///
    /// let dist = SmoothedDistribution::from_symbols(&[0, 0, 1, 1], 2);
    /// assert_eq!(dist.probabilities(), &[0.5, 0.5]);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_symbols(symbols: &[u8], alphabet_size: usize) -> Self {
        assert!(!symbols.is_empty(), "cannot build a distribution of nothing");
        let mut counts = vec![0_usize; alphabet_size];
        for &symbol in symbols {
            counts[usize::from(symbol)] += 1;
        }
        let len = symbols.len() as f64;
        let mut probabilities = counts
            .into_iter()
            .map(|count| {
                if count == 0 {
                    SMOOTHING_EPSILON
                } else {
                    count as f64 / len
                }
            })
            .collect::<Vec<_>>();
        let total = probabilities.iter().sum::<f64>();
        for p in &mut probabilities {
            *p /= total;
        }
        Self { probabilities }
    }

    #[must_use]
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }
}

/// Kullback-Leibler divergence `D(p || q)` in nats.
///
/// # Panics
///
/// Panics if the distributions are defined over alphabets of different sizes.
#[must_use]
pub fn kl_divergence(p: &SmoothedDistribution, q: &SmoothedDistribution) -> f64 {
    assert_eq!(p.probabilities.len(), q.probabilities.len());
    p.probabilities
        .iter()
        .zip(&q.probabilities)
        .map(|(&pi, &qi)| pi * (pi / qi).ln())
        .sum()
}

/// Symmetric KL divergence `D(p || q) + D(q || p)`.
///
/// # Examples
///
/// ```
/// use coevo_stats::divergence::{SmoothedDistribution, symmetric_kl_divergence};
///
/// let p = SmoothedDistribution::from_symbols(&[0, 1, 2], 3);
/// assert_eq!(symmetric_kl_divergence(&p, &p), 0.0);
/// ```
#[must_use]
pub fn symmetric_kl_divergence(p: &SmoothedDistribution, q: &SmoothedDistribution) -> f64 {
    kl_divergence(p, q) + kl_divergence(q, p)
}
