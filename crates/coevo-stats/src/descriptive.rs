/// Descriptive statistics summarizing a set of scores.
///
/// Used to report how diversity scores are spread across a team population
/// (a collapsing spread is an early sign of behavioural convergence).
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean of the dataset.
    pub mean: f64,
    /// The median value of the dataset (upper median for even counts).
    pub median: f64,
    /// The population standard deviation of the dataset.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use coevo_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([0.5, 0.25, 1.0, 0.0, 0.75]).unwrap();
    /// assert_eq!(stats.min, 0.0);
    /// assert_eq!(stats.max, 1.0);
    /// assert_eq!(stats.mean, 0.5);
    /// assert_eq!(stats.median, 0.5);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);

        let min = *values.first()?;
        let max = *values.last()?;
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let median = values[values.len() / 2];
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }
}

/// Returns the mean of the `k` smallest values, or `None` if `values` is empty.
///
/// When fewer than `k` values are available, all of them are averaged. Ties are
/// irrelevant since only the values (not their owners) are averaged.
///
/// # Examples
///
/// ```
/// # use coevo_stats::descriptive::mean_of_smallest;
/// assert_eq!(mean_of_smallest(vec![0.75, 0.125, 0.5, 0.375], 2), Some(0.25));
/// assert_eq!(mean_of_smallest(vec![0.5, 0.25], 5), Some(0.375));
/// assert_eq!(mean_of_smallest(vec![], 3), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean_of_smallest(mut values: Vec<f64>, k: usize) -> Option<f64> {
    if values.is_empty() || k == 0 {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let nearest = &values[..k.min(values.len())];
    Some(nearest.iter().sum::<f64>() / nearest.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(DescriptiveStats::new(std::iter::empty()).is_none());
    }

    #[test]
    fn test_constant_values() {
        let stats = DescriptiveStats::new([0.25; 4]).unwrap();
        assert_eq!(stats.min, 0.25);
        assert_eq!(stats.max, 0.25);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_std_dev() {
        let stats = DescriptiveStats::new([0.0, 1.0]).unwrap();
        assert_eq!(stats.mean, 0.5);
        assert_eq!(stats.std_dev, 0.5);
    }

    #[test]
    fn test_mean_of_smallest_single_neighbour() {
        assert_eq!(mean_of_smallest(vec![0.5, 0.2, 0.9], 1), Some(0.2));
    }

    #[test]
    fn test_mean_of_smallest_zero_k() {
        assert_eq!(mean_of_smallest(vec![0.5], 0), None);
    }
}
