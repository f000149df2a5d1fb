//! Diversity Engine: per-team diversity scores for the configured metrics.
//!
//! `fitness_sharing` is scored from outcomes against points (see
//! [`fitness_sharing`](crate::fitness_sharing)). Every other metric is a
//! behavioural distance aggregated with k nearest neighbours: a team's score is
//! the mean distance to its `k` most similar peers, so a team whose closest
//! peers are still far away is rewarded for being unusual.
//!
//! Teams are compared in parallel (one scoped worker per team). Workers only
//! read the population; scores are written back in population order once every
//! worker has finished, and the first failing team in population order
//! determines the reported error.

use std::thread;

use coevo_core::{DiversityMetric, ModelError, Point, Team};
use coevo_stats::descriptive::mean_of_smallest;
use tracing::debug;

use crate::{
    NormalizerCache, SelectionError,
    config::ValidatedConfig,
    distance::{DistanceContext, DistanceMetric},
    fitness_sharing,
};

/// Populates `team.diversity` for every team and every configured metric.
///
/// Scores for metrics that are not configured are left untouched. On error no
/// score computed by the failing pass is written.
pub fn compute_diversities(
    teams: &mut [Team],
    points: &[Point],
    config: &ValidatedConfig,
    normalizers: &NormalizerCache,
) -> Result<(), SelectionError> {
    if config.metrics().contains(&DiversityMetric::FitnessSharing) {
        let scores = fitness_sharing::team_scores(teams, points, config)?;
        for (team, score) in teams.iter_mut().zip(scores) {
            team.set_diversity_score(DiversityMetric::FitnessSharing, score);
        }
    }

    let metrics = config
        .metrics()
        .iter()
        .filter_map(|&m| DistanceMetric::try_from(m).ok())
        .collect::<Vec<_>>();
    if metrics.is_empty() {
        return Ok(());
    }

    let ctx = DistanceContext {
        config,
        normalizers,
    };
    let scores = nearest_neighbour_scores(teams, &metrics, &ctx)?;
    for (team, scores) in teams.iter_mut().zip(scores) {
        for (&metric, score) in metrics.iter().zip(scores) {
            team.set_diversity_score(metric.metric(), score);
        }
    }
    debug!(
        teams = teams.len(),
        metrics = metrics.len(),
        k = config.k(),
        "computed distance-based diversity"
    );
    Ok(())
}

/// Computes the kNN score of every team for every metric, in population order.
fn nearest_neighbour_scores(
    teams: &[Team],
    metrics: &[DistanceMetric],
    ctx: &DistanceContext<'_>,
) -> Result<Vec<Vec<f64>>, ModelError> {
    let mut results: Vec<Result<Vec<f64>, ModelError>> = vec![Ok(vec![]); teams.len()];
    thread::scope(|s| {
        for (index, slot) in results.iter_mut().enumerate() {
            s.spawn(move || {
                *slot = metrics
                    .iter()
                    .map(|&metric| team_score(teams, index, metric, ctx))
                    .collect();
            });
        }
    });
    results.into_iter().collect()
}

/// Mean distance from `teams[index]` to its `k` nearest peers, rounded.
///
/// With fewer than `k` peers all of them are averaged; a team without peers
/// scores `0.0`.
fn team_score(
    teams: &[Team],
    index: usize,
    metric: DistanceMetric,
    ctx: &DistanceContext<'_>,
) -> Result<f64, ModelError> {
    let team = &teams[index];
    let distances = teams
        .iter()
        .enumerate()
        .filter(|&(other_index, _)| other_index != index)
        .map(|(_, other)| metric.distance(team, other, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    let mean = mean_of_smallest(distances, ctx.config.k()).unwrap_or(0.0);
    Ok(ctx.config.round(mean))
}

#[cfg(test)]
mod tests {
    use coevo_core::{EncodingKind, PointId, ProgramId, TeamId};

    use super::*;
    use crate::config::SelectionConfig;

    fn config(metrics: &[&str], k: usize) -> ValidatedConfig {
        SelectionConfig {
            metrics: metrics.iter().map(|&m| m.to_owned()).collect(),
            k,
            total_points: 10,
            ..SelectionConfig::default()
        }
        .validate()
        .unwrap()
    }

    fn team(id: u64, outcome: f64, pattern: &[f64]) -> Team {
        let mut team = Team::new(TeamId::from(id));
        team.record_outcome(PointId::from(1), outcome);
        team.encodings_mut().pattern_per_match = Some(pattern.to_vec());
        team
    }

    fn points() -> Vec<Point> {
        vec![Point::new(PointId::from(1))]
    }

    #[test]
    fn test_k1_uses_the_single_nearest_neighbour() {
        let mut teams = [
            team(1, 1.0, &[0.0; 10]),
            team(2, 1.0, &[0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0]),
            team(3, 1.0, &[1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ];
        let config = config(&["hamming"], 1);
        compute_diversities(&mut teams, &points(), &config, &NormalizerCache::new()).unwrap();

        let scores = teams
            .iter()
            .map(|t| t.diversity_score(DiversityMetric::Hamming).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(scores, [0.2, 0.5, 0.2]);
    }

    #[test]
    fn test_k_larger_than_peers_averages_all_peers() {
        let mut teams = [
            team(1, 1.0, &[0.0, 0.0, 0.0, 0.0]),
            team(2, 1.0, &[1.0, 0.0, 0.0, 0.0]),
            team(3, 1.0, &[1.0, 1.0, 1.0, 0.0]),
        ];
        let config = config(&["hamming"], 5);
        compute_diversities(&mut teams, &points(), &config, &NormalizerCache::new()).unwrap();
        // (0.25 + 0.75) / 2
        assert_eq!(teams[0].diversity_score(DiversityMetric::Hamming), Some(0.5));
    }

    #[test]
    fn test_single_team_scores_zero() {
        let mut teams = [team(1, 1.0, &[0.0, 1.0])];
        let config = config(&["hamming", "euclidean"], 3);
        compute_diversities(&mut teams, &points(), &config, &NormalizerCache::new()).unwrap();
        assert_eq!(teams[0].diversity_score(DiversityMetric::Hamming), Some(0.0));
        assert_eq!(teams[0].diversity_score(DiversityMetric::Euclidean), Some(0.0));
    }

    #[test]
    fn test_fitness_sharing_and_distance_metrics_together() {
        let mut teams = [
            team(1, 1.0, &[0.0, 0.0]),
            team(2, 1.0, &[0.0, 1.0]),
            team(3, 0.0, &[1.0, 1.0]),
        ];
        let config = config(&["fitness_sharing", "hamming"], 1);
        compute_diversities(&mut teams, &points(), &config, &NormalizerCache::new()).unwrap();

        for team in &teams {
            let keys = team.diversity().keys().copied().collect::<Vec<_>>();
            assert_eq!(
                keys,
                [DiversityMetric::FitnessSharing, DiversityMetric::Hamming]
            );
        }
        assert_eq!(
            teams[0].diversity_score(DiversityMetric::FitnessSharing),
            teams[1].diversity_score(DiversityMetric::FitnessSharing)
        );
        assert_eq!(
            teams[2].diversity_score(DiversityMetric::FitnessSharing),
            Some(0.0)
        );
    }

    #[test]
    fn test_existing_scores_accumulate() {
        let mut teams = [team(1, 1.0, &[0.0]), team(2, 0.0, &[1.0])];
        let normalizers = NormalizerCache::new();
        compute_diversities(
            &mut teams,
            &points(),
            &config(&["hamming"], 1),
            &normalizers,
        )
        .unwrap();
        compute_diversities(
            &mut teams,
            &points(),
            &config(&["fitness_sharing"], 1),
            &normalizers,
        )
        .unwrap();
        assert_eq!(teams[0].diversity().len(), 2);
        assert_eq!(teams[0].diversity_score(DiversityMetric::Hamming), Some(1.0));
    }

    #[test]
    fn test_genotype_scores_are_rounded() {
        let programs: [&[u64]; 3] = [&[1, 2], &[2, 3], &[1, 2, 3]];
        let mut teams = (1..)
            .zip(programs)
            .map(|(id, programs)| {
                let mut team = Team::new(TeamId::from(id));
                team.record_outcome(PointId::from(1), 1.0);
                for &p in programs {
                    team.activate_program(ProgramId::from(p));
                }
                team
            })
            .collect::<Vec<_>>();
        let config = config(&["genotype"], 1);
        compute_diversities(&mut teams, &points(), &config, &NormalizerCache::new()).unwrap();
        // nearest peer of every team is {1, 2, 3} or a subset of it: 1 - 2/3
        for team in &teams {
            assert_eq!(team.diversity_score(DiversityMetric::Genotype), Some(0.3333));
        }
    }

    #[test]
    fn test_first_failing_team_is_reported() {
        let mut teams = [
            team(1, 1.0, &[0.0]),
            Team::new(TeamId::from(2)),
            team(3, 1.0, &[1.0]),
        ];
        let config = config(&["hamming"], 1);
        let err = compute_diversities(&mut teams, &points(), &config, &NormalizerCache::new())
            .unwrap_err();
        assert_eq!(
            err,
            SelectionError::Model(ModelError::MissingEncoding {
                team: TeamId::from(2),
                encoding: EncodingKind::PatternPerMatch,
                metric: DiversityMetric::Hamming,
            })
        );
        assert!(teams[0].diversity().is_empty());
    }

    #[test]
    fn test_missing_outcome_aborts_fitness_sharing() {
        let mut teams = [team(1, 1.0, &[0.0]), Team::new(TeamId::from(2))];
        let config = config(&["fitness_sharing"], 1);
        let err = compute_diversities(&mut teams, &points(), &config, &NormalizerCache::new())
            .unwrap_err();
        assert!(matches!(
            err,
            SelectionError::Model(ModelError::MissingOutcome { .. })
        ));
    }
}
