use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Diversity metrics a team population can be scored with.
///
/// [`DiversityMetric::FitnessSharing`] is computed from outcomes against points;
/// every other metric is a pairwise behavioural distance aggregated over the
/// nearest neighbours of each team.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum DiversityMetric {
    #[display("fitness_sharing")]
    FitnessSharing,
    #[display("genotype")]
    Genotype,
    #[display("entropy")]
    Entropy,
    #[display("ncd")]
    Ncd,
    #[display("ncd_custom")]
    NcdCustom,
    #[display("hamming")]
    Hamming,
    #[display("euclidean")]
    Euclidean,
}

impl DiversityMetric {
    pub const ALL: [Self; 7] = [
        Self::FitnessSharing,
        Self::Genotype,
        Self::Entropy,
        Self::Ncd,
        Self::NcdCustom,
        Self::Hamming,
        Self::Euclidean,
    ];

    /// Returns `true` for metrics computed from pairwise team distances.
    #[must_use]
    pub fn is_distance_based(self) -> bool {
        !self.is_fitness_sharing()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown diversity metric '{name}'")]
pub struct UnknownMetricError {
    pub name: String,
}

impl FromStr for DiversityMetric {
    type Err = UnknownMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.to_string() == s)
            .ok_or_else(|| UnknownMetricError { name: s.to_owned() })
    }
}
