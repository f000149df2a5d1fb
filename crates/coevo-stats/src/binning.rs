//! Equal-width binning over the unit interval
//!
//! Behavioural encodings discretize continuous measurements (average action
//! aggressiveness, normalized rewards, ...) into a small number of bins so that
//! encodings of different teams can be compared position by position.
//!
//! # Bin Layout
//!
//! The interval `[0, scale)` is split into `total_bins` bins of equal width:
//!
//! ```text
//! bin:     0        1        2       ...     n-1
//!       [0, w)   [w, 2w)  [2w, 3w)       [(n-1)w, ∞)
//! ```
//!
//! where `w = scale / total_bins`. The last bin is open-ended: values at or above
//! the upper bound are clamped into it instead of being reported as out of range.
//! Values below zero (and NaN) fall into the first bin.
//!
//! # Examples
//!
//! ```
//! use coevo_stats::binning::BinLayout;
//!
//! let layout = BinLayout::new(3);
//! assert_eq!(layout.bin_for_value(0.1), 0);
//! assert_eq!(layout.bin_for_value(0.5), 1);
//! assert_eq!(layout.bin_for_value(0.9), 2);
//! assert_eq!(layout.bin_for_value(7.0), 2);
//!
//! // Values pre-normalized to a different scale
//! let layout = BinLayout::new(3).with_normalization_scale(10.0);
//! assert_eq!(layout.bin_for_normalized_value(5.0), 1);
//! ```

use std::{collections::HashMap, hash::Hash};

/// Layout of equal-width bins over `[0, 1]` (or `[0, scale]` for normalized values).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinLayout {
    total_bins: usize,
    normalization_scale: f64,
}

/// Error returned when an action has no configured weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingWeight<A>(pub A);

impl BinLayout {
    /// Creates a layout with `total_bins` bins over `[0, 1]`.
    ///
    /// # Panics
    ///
    /// Panics if `total_bins` is zero.
    #[must_use]
    pub fn new(total_bins: usize) -> Self {
        assert!(total_bins > 0, "at least one bin is required");
        Self {
            total_bins,
            normalization_scale: 1.0,
        }
    }

    /// Sets the scale used by [`Self::bin_for_normalized_value`].
    #[must_use]
    pub fn with_normalization_scale(self, normalization_scale: f64) -> Self {
        Self {
            normalization_scale,
            ..self
        }
    }

    #[must_use]
    pub fn total_bins(&self) -> usize {
        self.total_bins
    }

    /// Classifies a value in `[0, 1]` into its bin.
    #[must_use]
    pub fn bin_for_value(&self, value: f64) -> usize {
        self.classify(value, 1.0)
    }

    /// Classifies a value in `[0, scale]` into its bin.
    #[must_use]
    pub fn bin_for_normalized_value(&self, value: f64) -> usize {
        self.classify(value, self.normalization_scale)
    }

    /// Classifies a set of actions by the average of their weights.
    ///
    /// An empty action set falls into the first bin.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use coevo_stats::binning::BinLayout;
    ///
    /// let weights = HashMap::from([('f', 0.0), ('c', 0.5), ('r', 1.0)]);
    /// let layout = BinLayout::new(3);
    ///
    /// assert_eq!(layout.bin_for_actions(&['f', 'f'], &weights), Ok(0));
    /// assert_eq!(layout.bin_for_actions(&['c', 'c', 'r'], &weights), Ok(2));
    /// assert_eq!(layout.bin_for_actions(&[], &weights), Ok(0));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn bin_for_actions<A>(
        &self,
        actions: &[A],
        weights: &HashMap<A, f64>,
    ) -> Result<usize, MissingWeight<A>>
    where
        A: Eq + Hash + Copy,
    {
        if actions.is_empty() {
            return Ok(0);
        }
        let mut points = 0.0;
        for action in actions {
            points += weights.get(action).ok_or(MissingWeight(*action))?;
        }
        Ok(self.bin_for_value(points / actions.len() as f64))
    }

    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn classify(&self, value: f64, scale: f64) -> usize {
        let width = scale / self.total_bins as f64;
        if value.is_nan() || value < 0.0 {
            return 0;
        }
        let bin = (value / width).floor();
        if bin >= self.total_bins as f64 {
            return self.total_bins - 1;
        }
        // floor() can land one bin too high when `value` sits just below an edge
        let bin = bin as usize;
        if bin > 0 && value < bin as f64 * width {
            bin - 1
        } else {
            bin
        }
    }
}
