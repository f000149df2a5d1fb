//! Pairwise behavioural distances between teams.
//!
//! Every distance-based diversity metric maps to a pure function
//! `(team, other, context) -> distance` through [`DistanceMetric::function`].
//! The dispatch table is fixed at compile time and metric names are validated
//! when the configuration is loaded, so an unknown metric can never reach this
//! module.
//!
//! | Metric       | Input                    | Distance                                        |
//! |--------------|--------------------------|-------------------------------------------------|
//! | `genotype`   | active programs          | `1 - |A ∩ B| / |A ∪ B|`                         |
//! | `entropy`    | action sequence          | symmetric KL divergence / max divergence        |
//! | `ncd`        | action sequence          | normalized compression distance                 |
//! | `ncd_custom` | custom per-action tokens | normalized compression distance                 |
//! | `hamming`    | pattern vector           | fraction of differing positions                 |
//! | `euclidean`  | pattern vector           | L2 distance / max L2 distance                   |
//!
//! All distances lie in `[0, 1]`. Missing encodings are reported as
//! [`ModelError::MissingEncoding`] rather than treated as empty behaviour.

use coevo_core::{DiversityMetric, EncodingKind, ModelError, Team};
use coevo_stats::divergence::{SmoothedDistribution, symmetric_kl_divergence};

use crate::{NormalizerCache, config::ValidatedConfig};

pub mod compression;

/// Everything a distance function may read besides the two teams.
#[derive(Debug, Clone, Copy)]
pub struct DistanceContext<'a> {
    pub config: &'a ValidatedConfig,
    pub normalizers: &'a NormalizerCache,
}

/// Signature shared by all distance functions.
pub type DistanceFn = fn(&Team, &Team, &DistanceContext<'_>) -> Result<f64, ModelError>;

/// Diversity metrics computed from pairwise team distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceMetric {
    Genotype,
    Entropy,
    Ncd,
    NcdCustom,
    Hamming,
    Euclidean,
}

impl TryFrom<DiversityMetric> for DistanceMetric {
    type Error = DiversityMetric;

    fn try_from(metric: DiversityMetric) -> Result<Self, Self::Error> {
        match metric {
            DiversityMetric::FitnessSharing => Err(metric),
            DiversityMetric::Genotype => Ok(Self::Genotype),
            DiversityMetric::Entropy => Ok(Self::Entropy),
            DiversityMetric::Ncd => Ok(Self::Ncd),
            DiversityMetric::NcdCustom => Ok(Self::NcdCustom),
            DiversityMetric::Hamming => Ok(Self::Hamming),
            DiversityMetric::Euclidean => Ok(Self::Euclidean),
        }
    }
}

impl DistanceMetric {
    /// The diversity metric this distance is reported under.
    #[must_use]
    pub fn metric(self) -> DiversityMetric {
        match self {
            Self::Genotype => DiversityMetric::Genotype,
            Self::Entropy => DiversityMetric::Entropy,
            Self::Ncd => DiversityMetric::Ncd,
            Self::NcdCustom => DiversityMetric::NcdCustom,
            Self::Hamming => DiversityMetric::Hamming,
            Self::Euclidean => DiversityMetric::Euclidean,
        }
    }

    #[must_use]
    pub fn function(self) -> DistanceFn {
        match self {
            Self::Genotype => genotype,
            Self::Entropy => entropy,
            Self::Ncd => ncd,
            Self::NcdCustom => ncd_custom,
            Self::Hamming => hamming,
            Self::Euclidean => euclidean,
        }
    }

    /// Computes the distance between two teams.
    pub fn distance(
        self,
        team: &Team,
        other: &Team,
        ctx: &DistanceContext<'_>,
    ) -> Result<f64, ModelError> {
        (self.function())(team, other, ctx)
    }
}

fn missing(team: &Team, encoding: EncodingKind, metric: DiversityMetric) -> ModelError {
    ModelError::MissingEncoding {
        team: team.id(),
        encoding,
        metric,
    }
}

/// Jaccard distance between the sets of programs each team actually used.
///
/// Examples: `{1, 2}` vs `{2, 3}` → `1 - 1/3`; `{1, 2}` vs `{1, 2}` → `0`;
/// `{1, 2}` vs `{3, 4}` → `1`.
#[expect(clippy::cast_precision_loss)]
pub fn genotype(team: &Team, other: &Team, _ctx: &DistanceContext<'_>) -> Result<f64, ModelError> {
    let programs = team.active_programs();
    let other_programs = other.active_programs();
    let intersection = programs.intersection(other_programs).count();
    let union = programs.union(other_programs).count();
    if union == 0 {
        return Err(ModelError::EmptyActiveProgramUnion {
            team: team.id(),
            other: other.id(),
        });
    }
    Ok(1.0 - intersection as f64 / union as f64)
}

fn actions_of(team: &Team, metric: DiversityMetric) -> Result<&[u8], ModelError> {
    team.encodings()
        .actions_per_match()
        .ok_or_else(|| missing(team, EncodingKind::ActionsPerMatch, metric))
}

fn distribution_of(
    team: &Team,
    actions: &[u8],
    total_actions: usize,
) -> Result<SmoothedDistribution, ModelError> {
    if let Some(&action) = actions.iter().find(|&&a| usize::from(a) >= total_actions) {
        return Err(ModelError::ActionOutOfRange {
            team: team.id(),
            action,
            total_actions,
        });
    }
    Ok(SmoothedDistribution::from_symbols(actions, total_actions))
}

/// Symmetric relative entropy between the action distributions of two teams.
pub fn entropy(team: &Team, other: &Team, ctx: &DistanceContext<'_>) -> Result<f64, ModelError> {
    let actions = actions_of(team, DiversityMetric::Entropy)?;
    let other_actions = actions_of(other, DiversityMetric::Entropy)?;
    if actions == other_actions {
        return Ok(0.0);
    }

    let total_actions = ctx.config.total_actions();
    let dist = distribution_of(team, actions, total_actions)?;
    let other_dist = distribution_of(other, other_actions, total_actions)?;
    let max = ctx.normalizers.max_entropy(total_actions);
    Ok((symmetric_kl_divergence(&dist, &other_dist) / max).clamp(0.0, 1.0))
}

/// NCD between the action sequences of two teams.
pub fn ncd(team: &Team, other: &Team, ctx: &DistanceContext<'_>) -> Result<f64, ModelError> {
    let actions = actions_of(team, DiversityMetric::Ncd)?;
    let other_actions = actions_of(other, DiversityMetric::Ncd)?;
    Ok(compression::normalized_compression_distance(
        actions,
        other_actions,
        ctx.config.max_ncd(),
    ))
}

fn custom_trace_of(team: &Team) -> Result<&[String], ModelError> {
    team.encodings().custom_info_per_match().ok_or_else(|| {
        missing(
            team,
            EncodingKind::CustomInfoPerMatch,
            DiversityMetric::NcdCustom,
        )
    })
}

/// NCD between the custom per-action traces of two teams.
pub fn ncd_custom(
    team: &Team,
    other: &Team,
    ctx: &DistanceContext<'_>,
) -> Result<f64, ModelError> {
    let trace = custom_trace_of(team)?;
    let other_trace = custom_trace_of(other)?;
    if trace == other_trace {
        return Ok(0.0);
    }
    Ok(compression::normalized_compression_distance(
        &compression::concat_tokens(trace),
        &compression::concat_tokens(other_trace),
        ctx.config.max_ncd(),
    ))
}

fn patterns_of<'a>(
    team: &'a Team,
    other: &'a Team,
    metric: DiversityMetric,
) -> Result<(&'a [f64], &'a [f64]), ModelError> {
    let pattern_of = |t: &'a Team| {
        t.encodings()
            .pattern_per_match()
            .ok_or_else(|| missing(t, EncodingKind::PatternPerMatch, metric))
    };
    let pattern = pattern_of(team)?;
    let other_pattern = pattern_of(other)?;
    if pattern.len() != other_pattern.len() {
        return Err(ModelError::PatternLengthMismatch {
            team: team.id(),
            other: other.id(),
            len: pattern.len(),
            other_len: other_pattern.len(),
        });
    }
    Ok((pattern, other_pattern))
}

/// Fraction of positions at which the pattern encodings differ.
#[expect(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn hamming(team: &Team, other: &Team, _ctx: &DistanceContext<'_>) -> Result<f64, ModelError> {
    let (pattern, other_pattern) = patterns_of(team, other, DiversityMetric::Hamming)?;
    let differing = pattern
        .iter()
        .zip(other_pattern)
        .filter(|(a, b)| a != b)
        .count();
    Ok(differing as f64 / pattern.len() as f64)
}

/// Euclidean distance between pattern encodings, relative to the largest possible one.
pub fn euclidean(
    team: &Team,
    other: &Team,
    ctx: &DistanceContext<'_>,
) -> Result<f64, ModelError> {
    let (pattern, other_pattern) = patterns_of(team, other, DiversityMetric::Euclidean)?;
    let distance = pattern
        .iter()
        .zip(other_pattern)
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>()
        .sqrt();
    let max = ctx
        .normalizers
        .max_euclidean(ctx.config.bins().total_bins(), ctx.config.total_points());
    if max == 0.0 {
        return Ok(0.0);
    }
    Ok((distance / max).min(1.0))
}
