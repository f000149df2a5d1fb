//! Selection parameters and their validation.
//!
//! [`SelectionConfig`] is the deserializable form (JSON files, CLI overrides).
//! [`SelectionConfig::validate`] turns it into a [`ValidatedConfig`], checking
//! metric names and the parameters each requested metric depends on, so that a
//! misconfiguration fails before any population is touched.
//!
//! # Example
//!
//! ```
//! use coevo_core::DiversityMetric;
//! use coevo_selection::config::SelectionConfig;
//!
//! let config = SelectionConfig {
//!     metrics: vec!["fitness_sharing".to_owned(), "euclidean".to_owned()],
//!     total_points: 40,
//!     ..SelectionConfig::default()
//! };
//! let config = config.validate().unwrap();
//! assert_eq!(
//!     config.metrics(),
//!     &[DiversityMetric::FitnessSharing, DiversityMetric::Euclidean]
//! );
//! ```

use std::collections::HashMap;

use coevo_core::{DiversityMetric, UnknownMetricError};
use coevo_stats::{
    binning::{BinLayout, MissingWeight},
    numeric,
};
use serde::{Deserialize, Serialize};

use crate::SelectionError;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("{_0}")]
    UnknownMetric(UnknownMetricError),
    #[display("k must be at least 1 for nearest-neighbour diversity")]
    ZeroNeighbours,
    #[display("at least one bin is required")]
    ZeroBins,
    #[display("'entropy' needs an alphabet of at least 2 actions (got {_0})")]
    TooFewActions(#[error(not(source))] usize),
    #[display("'euclidean' needs the total point population size")]
    MissingPointPopulationSize,
    #[display("max_ncd must be positive (got {_0})")]
    InvalidMaxNcd(#[error(not(source))] f64),
    #[display("tolerance must be a non-negative number (got {_0})")]
    InvalidTolerance(#[error(not(source))] f64),
    #[display("normalization scale must be positive (got {_0})")]
    InvalidNormalizationScale(#[error(not(source))] f64),
}

impl From<UnknownMetricError> for ConfigError {
    fn from(err: UnknownMetricError) -> Self {
        Self::UnknownMetric(err)
    }
}

/// User-facing selection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionConfig {
    /// Diversity metrics to compute, by name
    pub metrics: Vec<String>,
    /// Number of nearest neighbours averaged by distance-based diversity
    pub k: usize,
    /// Number of bins behavioural values are discretized into
    pub total_bins: usize,
    /// Size of the discrete action alphabet
    pub total_actions: usize,
    /// Weight of each action, used to bin action sets
    pub action_weights: HashMap<u8, f64>,
    /// Decimal places diversity scores are rounded to
    pub round_decimals: u8,
    /// Largest NCD the compressor produces in practice; NCD is divided by it
    pub max_ncd: f64,
    /// Absolute tolerance under which two outcomes are considered equal
    pub tolerance: f64,
    /// Size of the point population (pattern encodings have one entry per point)
    pub total_points: usize,
    /// Upper bound of pre-normalized values fed to binning
    pub normalization_scale: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            metrics: vec![DiversityMetric::FitnessSharing.to_string()],
            k: 3,
            total_bins: 3,
            total_actions: 3,
            action_weights: HashMap::from([(0, 0.0), (1, 0.5), (2, 1.0)]),
            round_decimals: 4,
            max_ncd: 1.0,
            tolerance: numeric::DEFAULT_TOLERANCE,
            total_points: 0,
            normalization_scale: 1.0,
        }
    }
}

impl SelectionConfig {
    /// Checks metric names and the parameters the requested metrics depend on.
    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        let mut metrics = Vec::with_capacity(self.metrics.len());
        for name in &self.metrics {
            let metric = name.parse::<DiversityMetric>()?;
            if !metrics.contains(&metric) {
                metrics.push(metric);
            }
        }

        if self.total_bins == 0 {
            return Err(ConfigError::ZeroBins);
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        if self.normalization_scale.is_nan() || self.normalization_scale <= 0.0 {
            return Err(ConfigError::InvalidNormalizationScale(
                self.normalization_scale,
            ));
        }
        if metrics.iter().any(|m| m.is_distance_based()) && self.k == 0 {
            return Err(ConfigError::ZeroNeighbours);
        }
        if metrics.contains(&DiversityMetric::Entropy) && self.total_actions < 2 {
            return Err(ConfigError::TooFewActions(self.total_actions));
        }
        if metrics.contains(&DiversityMetric::Euclidean) && self.total_points == 0 {
            return Err(ConfigError::MissingPointPopulationSize);
        }
        let uses_ncd = metrics
            .iter()
            .any(|m| matches!(m, DiversityMetric::Ncd | DiversityMetric::NcdCustom));
        if uses_ncd && (self.max_ncd.is_nan() || self.max_ncd <= 0.0) {
            return Err(ConfigError::InvalidMaxNcd(self.max_ncd));
        }

        Ok(ValidatedConfig {
            metrics,
            k: self.k,
            bins: BinLayout::new(self.total_bins)
                .with_normalization_scale(self.normalization_scale),
            total_actions: self.total_actions,
            action_weights: self.action_weights.clone(),
            round_decimals: self.round_decimals,
            max_ncd: self.max_ncd,
            tolerance: self.tolerance,
            total_points: self.total_points,
        })
    }
}

/// Selection parameters that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    metrics: Vec<DiversityMetric>,
    k: usize,
    bins: BinLayout,
    total_actions: usize,
    action_weights: HashMap<u8, f64>,
    round_decimals: u8,
    max_ncd: f64,
    tolerance: f64,
    total_points: usize,
}

impl ValidatedConfig {
    /// Requested metrics, deduplicated, in the order they were configured.
    #[must_use]
    pub fn metrics(&self) -> &[DiversityMetric] {
        &self.metrics
    }

    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    #[must_use]
    pub fn bins(&self) -> &BinLayout {
        &self.bins
    }

    #[must_use]
    pub fn total_actions(&self) -> usize {
        self.total_actions
    }

    #[must_use]
    pub fn round_decimals(&self) -> u8 {
        self.round_decimals
    }

    #[must_use]
    pub fn max_ncd(&self) -> f64 {
        self.max_ncd
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[must_use]
    pub fn total_points(&self) -> usize {
        self.total_points
    }

    /// Rounds a score to the configured precision.
    #[must_use]
    pub fn round(&self, value: f64) -> f64 {
        numeric::round_to_decimals(value, self.round_decimals)
    }

    /// Classifies a set of actions by the average of their configured weights.
    pub fn bin_for_actions(&self, actions: &[u8]) -> Result<usize, SelectionError> {
        self.bins
            .bin_for_actions(actions, &self.action_weights)
            .map_err(|MissingWeight(action)| SelectionError::UnknownAction { action })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(metrics: &[&str]) -> SelectionConfig {
        SelectionConfig {
            metrics: metrics.iter().map(|&m| m.to_owned()).collect(),
            ..SelectionConfig::default()
        }
    }

    #[test]
    fn test_default_is_valid() {
        let config = SelectionConfig::default().validate().unwrap();
        assert_eq!(config.metrics(), &[DiversityMetric::FitnessSharing]);
        assert_eq!(config.round_decimals(), 4);
    }

    #[test]
    fn test_unknown_metric_fails_fast() {
        let err = config_with(&["genotype", "novelty"]).validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownMetric(e) if e.name == "novelty"));
    }

    #[test]
    fn test_duplicate_metrics_are_merged() {
        let config = config_with(&["ncd", "genotype", "ncd"]).validate().unwrap();
        assert_eq!(
            config.metrics(),
            &[DiversityMetric::Ncd, DiversityMetric::Genotype]
        );
    }

    #[test]
    fn test_euclidean_requires_point_population_size() {
        let err = config_with(&["euclidean"]).validate().unwrap_err();
        assert_eq!(err, ConfigError::MissingPointPopulationSize);
    }

    #[test]
    fn test_zero_k_only_matters_for_distances() {
        let mut config = config_with(&["fitness_sharing"]);
        config.k = 0;
        assert!(config.validate().is_ok());
        config.metrics.push("hamming".to_owned());
        assert_eq!(config.validate().unwrap_err(), ConfigError::ZeroNeighbours);
    }

    #[test]
    fn test_entropy_requires_alphabet() {
        let mut config = config_with(&["entropy"]);
        config.total_actions = 1;
        assert_eq!(config.validate().unwrap_err(), ConfigError::TooFewActions(1));
    }

    #[test]
    fn test_bin_for_actions_uses_weights() {
        let config = SelectionConfig::default().validate().unwrap();
        assert_eq!(config.bin_for_actions(&[0, 0, 0]).unwrap(), 0);
        assert_eq!(config.bin_for_actions(&[2, 2]).unwrap(), 2);
        assert!(matches!(
            config.bin_for_actions(&[5]),
            Err(SelectionError::UnknownAction { action: 5 })
        ));
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: SelectionConfig =
            serde_json::from_str(r#"{"metrics":["genotype"],"k":5}"#).unwrap();
        assert_eq!(config.k, 5);
        assert_eq!(config.total_bins, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = serde_json::from_str::<SelectionConfig>(r#"{"neighbours":5}"#);
        assert!(result.is_err());
    }
}
