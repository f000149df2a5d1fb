//! Numeric utilities for the coevolutionary selection core.
//!
//! This crate collects the small, dependency-free numeric building blocks used by
//! diversity maintenance and point selection:
//!
//! - **Descriptive statistics**: Summaries (min, max, mean, median, deviation) of score sets
//! - **Binning**: Equal-width classification of scalars and weighted action sets into bins
//! - **Divergence**: Smoothed empirical distributions and (symmetric) KL divergence
//! - **Numeric helpers**: Half-to-even decimal rounding and tolerance-based equality
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics and k-smallest means
//! - [`binning`]: Equal-width bin classification over `[0, 1]`
//! - [`divergence`]: Probability distributions and relative entropy
//! - [`numeric`]: Rounding and near-equality
//!
//! # Examples
//!
//! ## Classifying values into bins
//!
//! ```
//! use coevo_stats::binning::BinLayout;
//!
//! let layout = BinLayout::new(5);
//! assert_eq!(layout.bin_for_value(0.0), 0);
//! assert_eq!(layout.bin_for_value(0.999), 4);
//! assert_eq!(layout.bin_for_value(1.0), 4);
//! ```
//!
//! ## Comparing action distributions
//!
//! ```
//! use coevo_stats::divergence::{SmoothedDistribution, symmetric_kl_divergence};
//!
//! let p = SmoothedDistribution::from_symbols(&[0, 0, 1], 3);
//! let q = SmoothedDistribution::from_symbols(&[0, 1, 1], 3);
//! assert!(symmetric_kl_divergence(&p, &q) > 0.0);
//! ```
//!
//! ## Rounding scores
//!
//! ```
//! use coevo_stats::numeric::round_to_decimals;
//!
//! assert_eq!(round_to_decimals(0.333_333, 4), 0.3333);
//! assert_eq!(round_to_decimals(0.123_46, 4), 0.1235);
//! ```

pub mod binning;
pub mod descriptive;
pub mod divergence;
pub mod numeric;
