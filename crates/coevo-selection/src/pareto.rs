//! Pareto Selector for the point population.
//!
//! A point is useful when it tells teams apart. Each point gets a binary
//! *distinction signature* with one entry per ordered pair of teams: `1` when
//! the first team's outcome at that point strictly exceeds the second's. A
//! point whose signature is covered by another point's signature adds nothing
//! and is *dominated*.
//!
//! Selection runs in three stages:
//!
//! 1. Build the signature of every point (the distinction matrix). The matrix
//!    is complete before any later stage reads it.
//! 2. Split points into the Pareto front and the dominated rest. A point equal
//!    to an earlier point in population order is dominated as well, so the first
//!    occurrence of a signature wins.
//! 3. Resize the front to the target:
//!    - front too small: fitness sharing over the signatures of all points, then
//!      dominated points join best first;
//!    - front too large: fitness sharing over the front's own signatures, then
//!      front points leave worst first.
//!
//! Rankings are computed once with a stable sort (population order on ties) and
//! the final sets are built by index, so no collection is edited while it is
//! being iterated.

use coevo_core::{ModelError, Point, Team};
use coevo_stats::numeric::strictly_greater;
use tracing::debug;

use crate::{SelectionError, fitness_sharing::shared_scores};

/// Outcome of [`select_points`].
#[derive(Debug, Clone, PartialEq)]
pub struct PointSelection {
    /// Points that survive, front first
    pub keep: Vec<Point>,
    /// Dominated points in population order, followed by front points dropped
    /// while downscaling, in the order they were dropped
    pub remove: Vec<Point>,
}

/// Builds one distinction signature per point.
///
/// Entry `i * teams.len() + j` of a signature is `1` when team `i` beats team
/// `j` at that point by more than `tolerance`.
pub fn distinction_matrix(
    points: &[Point],
    teams: &[Team],
    tolerance: f64,
) -> Result<Vec<Vec<u8>>, ModelError> {
    points
        .iter()
        .map(|point| distinction_signature(point, teams, tolerance))
        .collect()
}

fn distinction_signature(
    point: &Point,
    teams: &[Team],
    tolerance: f64,
) -> Result<Vec<u8>, ModelError> {
    let outcomes = teams
        .iter()
        .map(|team| team.outcome(point.id()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(outcomes
        .iter()
        .flat_map(|&a| {
            outcomes
                .iter()
                .map(move |&b| u8::from(strictly_greater(a, b, tolerance)))
        })
        .collect())
}

/// Returns `true` if `other` is at least as large as `signature` everywhere
/// and larger somewhere.
#[must_use]
pub fn is_dominated_by(signature: &[u8], other: &[u8]) -> bool {
    debug_assert_eq!(signature.len(), other.len());
    let mut strictly = false;
    for (a, b) in signature.iter().zip(other) {
        if a > b {
            return false;
        }
        strictly |= a < b;
    }
    strictly
}

/// Splits signature indices into the Pareto front and the dominated rest.
///
/// Both lists are in population order.
#[must_use]
pub fn pareto_front(signatures: &[Vec<u8>]) -> (Vec<usize>, Vec<usize>) {
    let mut front = vec![];
    let mut dominated = vec![];
    for (i, signature) in signatures.iter().enumerate() {
        let beaten = signatures.iter().enumerate().any(|(j, other)| {
            (j < i && signature == other) || is_dominated_by(signature, other)
        });
        if beaten {
            dominated.push(i);
        } else {
            front.push(i);
        }
    }
    (front, dominated)
}

/// Indices sorted by score, stable so that ties keep population order.
fn rank(indices: &[usize], scores: &[f64], descending: bool) -> Vec<usize> {
    let mut ranked = indices.to_vec();
    if descending {
        ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    } else {
        ranked.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));
    }
    ranked
}

/// Partitions `points` into exactly `target` kept points and the remainder.
///
/// If `target` is not lower than the number of points, every point is kept.
/// Points ranked by a balancing pass carry their shared fitness in
/// [`Point::fitness`].
///
/// # Errors
///
/// Fails with [`ModelError::MissingOutcome`] if a team has no outcome for one
/// of the points.
pub fn select_points(
    mut points: Vec<Point>,
    teams: &[Team],
    target: usize,
    tolerance: f64,
) -> Result<PointSelection, SelectionError> {
    let signatures = distinction_matrix(&points, teams, tolerance)?;
    let (front, dominated) = pareto_front(&signatures);
    debug!(
        points = points.len(),
        front = front.len(),
        dominated = dominated.len(),
        target,
        "built Pareto front of points"
    );

    let (keep, remove) = if front.len() < target {
        let scores = shared_scores(&signatures);
        for (point, &score) in points.iter_mut().zip(&scores) {
            point.set_fitness(score);
        }
        let ranked = rank(&dominated, &scores, true);
        let promoted = &ranked[..ranked.len().min(target - front.len())];
        let rest = dominated
            .iter()
            .copied()
            .filter(|i| !promoted.contains(i))
            .collect::<Vec<_>>();
        debug!(promoted = promoted.len(), "upscaled Pareto front");
        ([front.as_slice(), promoted].concat(), rest)
    } else if front.len() > target {
        let front_signatures = front.iter().map(|&i| &signatures[i]).collect::<Vec<_>>();
        let front_scores = shared_scores(&front_signatures);
        let mut scores = vec![0.0; points.len()];
        for (&i, &score) in front.iter().zip(&front_scores) {
            points[i].set_fitness(score);
            scores[i] = score;
        }
        let ranked = rank(&front, &scores, false);
        let (demoted, _) = ranked.split_at(front.len() - target);
        let kept = front
            .iter()
            .copied()
            .filter(|i| !demoted.contains(i))
            .collect::<Vec<_>>();
        debug!(demoted = demoted.len(), "downscaled Pareto front");
        (kept, [dominated.as_slice(), demoted].concat())
    } else {
        (front, dominated)
    };

    let mut slots = points.into_iter().map(Some).collect::<Vec<_>>();
    let mut take = |indices: &[usize]| {
        indices
            .iter()
            .filter_map(|&i| slots[i].take())
            .collect::<Vec<_>>()
    };
    let keep = take(&keep);
    let remove = take(&remove);
    Ok(PointSelection { keep, remove })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use coevo_core::{PointId, TeamId};
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    /// Builds `outcomes[point][team]` populations with ids starting at 1.
    fn populations(outcomes: &[&[f64]]) -> (Vec<Point>, Vec<Team>) {
        let team_count = outcomes.first().map_or(0, |row| row.len());
        let points = (1..=outcomes.len() as u64)
            .map(|id| Point::new(PointId::from(id)))
            .collect::<Vec<_>>();
        let mut teams = (1..=team_count as u64)
            .map(|id| Team::new(TeamId::from(id)))
            .collect::<Vec<_>>();
        for (point, row) in points.iter().zip(outcomes) {
            for (team, &outcome) in teams.iter_mut().zip(*row) {
                team.record_outcome(point.id(), outcome);
            }
        }
        (points, teams)
    }

    fn ids(points: &[Point]) -> Vec<u64> {
        points.iter().map(|p| p.id().get()).collect()
    }

    #[test]
    fn test_distinction_matrix() {
        let (points, teams) = populations(&[&[1.0, 0.0], &[0.0, 1.0], &[0.5, 0.5]]);
        let matrix = distinction_matrix(&points, &teams, TOLERANCE).unwrap();
        assert_eq!(matrix, [[0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 0]]);
    }

    #[test]
    fn test_distinction_matrix_ignores_near_equal_outcomes() {
        let (points, teams) = populations(&[&[1.0 + 1e-12, 1.0]]);
        let matrix = distinction_matrix(&points, &teams, TOLERANCE).unwrap();
        assert_eq!(matrix, [[0, 0, 0, 0]]);
    }

    #[test]
    fn test_duplicate_signature_keeps_first_occurrence() {
        let (points, teams) = populations(&[&[1.0, 0.0], &[0.0, 1.0], &[1.0, 0.0]]);
        let matrix = distinction_matrix(&points, &teams, TOLERANCE).unwrap();
        assert_eq!(pareto_front(&matrix), (vec![0, 1], vec![2]));
    }

    #[test]
    fn test_dominated_point_leaves_front() {
        // point 2 separates every pair point 1 separates, and team 2 from team 3
        let (points, teams) = populations(&[&[1.0, 0.0, 0.0], &[2.0, 1.0, 0.0], &[0.0, 0.0, 1.0]]);
        let matrix = distinction_matrix(&points, &teams, TOLERANCE).unwrap();
        assert!(is_dominated_by(&matrix[0], &matrix[1]));
        assert!(!is_dominated_by(&matrix[1], &matrix[0]));
        assert_eq!(pareto_front(&matrix), (vec![1, 2], vec![0]));
    }

    #[test]
    fn test_equal_signatures_do_not_dominate_each_other() {
        assert!(!is_dominated_by(&[1, 0, 1], &[1, 0, 1]));
        assert!(!is_dominated_by(&[1, 0, 0], &[0, 1, 1]));
        assert!(is_dominated_by(&[0, 0, 0], &[0, 1, 0]));
    }

    #[test]
    fn test_front_of_target_size_is_returned_as_is() {
        let (points, teams) = populations(&[&[1.0, 0.0, 0.0], &[2.0, 1.0, 0.0], &[0.0, 0.0, 1.0]]);
        let selection = select_points(points, &teams, 2, TOLERANCE).unwrap();
        assert_eq!(ids(&selection.keep), [2, 3]);
        assert_eq!(ids(&selection.remove), [1]);
        assert!(selection.keep.iter().all(|p| p.fitness() == 0.0));
    }

    #[test]
    fn test_upscale_adds_dominated_points() {
        let (points, teams) = populations(&[&[1.0, 0.0, 0.0], &[2.0, 1.0, 0.0], &[0.0, 0.0, 1.0]]);
        let selection = select_points(points, &teams, 3, TOLERANCE).unwrap();
        assert_eq!(ids(&selection.keep), [2, 3, 1]);
        assert!(selection.remove.is_empty());
        assert!(selection.keep[2].fitness() > 0.0);
    }

    #[test]
    fn test_downscale_drops_worst_front_point() {
        let (points, teams) = populations(&[&[1.0, 0.0, 0.0], &[2.0, 1.0, 0.0], &[0.0, 0.0, 1.0]]);
        let selection = select_points(points, &teams, 1, TOLERANCE).unwrap();
        assert_eq!(ids(&selection.keep), [2]);
        assert_eq!(ids(&selection.remove), [1, 3]);
        // shared over the front: point 2 wins 3 pairs, point 3 wins 2, each shared by 2
        assert_eq!(selection.keep[0].fitness(), 1.5 / 9.0);
        assert_eq!(selection.remove[1].fitness(), 1.0 / 9.0);
    }

    #[test]
    fn test_target_above_population_keeps_everything() {
        let (points, teams) = populations(&[&[1.0, 0.0], &[1.0, 0.0], &[0.0, 0.0]]);
        let selection = select_points(points, &teams, 10, TOLERANCE).unwrap();
        assert_eq!(ids(&selection.keep), [1, 2, 3]);
        assert!(selection.remove.is_empty());
    }

    #[test]
    fn test_empty_population() {
        let selection = select_points(vec![], &[], 3, TOLERANCE).unwrap();
        assert!(selection.keep.is_empty());
        assert!(selection.remove.is_empty());
    }

    #[test]
    fn test_missing_outcome_names_the_point() {
        let (mut points, teams) = populations(&[&[1.0, 0.0]]);
        points.push(Point::new(PointId::from(9)));
        let err = select_points(points, &teams, 1, TOLERANCE).unwrap_err();
        assert_eq!(
            err,
            SelectionError::Model(ModelError::MissingOutcome {
                team: TeamId::from(1),
                point: PointId::from(9),
            })
        );
    }

    #[test]
    fn test_random_populations_hold_selection_invariants() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..20 {
            let team_count = rng.random_range(1..6);
            let point_count = rng.random_range(1..15);
            let rows = (0..point_count)
                .map(|_| {
                    (0..team_count)
                        .map(|_| f64::from(rng.random_range(0..3_u8)) / 2.0)
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>();
            let rows = rows.iter().map(Vec::as_slice).collect::<Vec<_>>();
            let (points, teams) = populations(&rows);

            let matrix = distinction_matrix(&points, &teams, TOLERANCE).unwrap();
            let (front, dominated) = pareto_front(&matrix);
            for &i in &front {
                assert!(front.iter().all(|&j| !is_dominated_by(&matrix[i], &matrix[j])));
            }
            for &i in &dominated {
                assert!(front.iter().any(|&j| {
                    matrix[i] == matrix[j] || is_dominated_by(&matrix[i], &matrix[j])
                }));
            }

            for target in 0..=point_count + 2 {
                let selection = select_points(points.clone(), &teams, target, TOLERANCE).unwrap();
                assert_eq!(selection.keep.len(), target.min(point_count));

                let all = ids(&selection.keep)
                    .into_iter()
                    .chain(ids(&selection.remove))
                    .collect::<Vec<_>>();
                assert_eq!(all.len(), point_count);
                assert_eq!(
                    all.into_iter().collect::<BTreeSet<_>>(),
                    ids(&points).into_iter().collect::<BTreeSet<_>>()
                );

                if front.len() < target {
                    let promoted = &selection.keep[front.len()..];
                    assert!(promoted.windows(2).all(|w| w[0].fitness() >= w[1].fitness()));
                }
                if front.len() > target {
                    let demoted = &selection.remove[dominated.len()..];
                    assert_eq!(demoted.len(), front.len() - target);
                    assert!(demoted.windows(2).all(|w| w[0].fitness() <= w[1].fitness()));
                    assert!(
                        selection
                            .keep
                            .iter()
                            .all(|k| demoted.iter().all(|d| d.fitness() <= k.fitness()))
                    );
                }
            }
        }
    }
}
