//! Fitness sharing: credit for an outcome is divided among everyone who achieves it.
//!
//! Given one row of non-negative outcomes per individual (one column per
//! dimension), the denominator of each dimension is `1 + Σ outcomes` over all rows
//! (the `1` keeps dimensions nobody succeeds on well-defined). The shared score
//! of a row is the mean over dimensions of `outcome / denominator`.
//!
//! ```text
//!              dim 0   dim 1   dim 2
//! team A        1       1       0        score = (1/3 + 1/2 + 0) / 3
//! team B        1       0       0        score = (1/3 + 0   + 0) / 3
//! denominator   3       2       1
//! ```
//!
//! Succeeding where few others succeed is worth more than succeeding where
//! everyone does. The same formula scores teams over their outcomes against
//! points, and points over their distinction signatures during Pareto balancing.

use coevo_core::{Point, Team};

use crate::{SelectionError, config::ValidatedConfig};

/// Computes the shared score of every row.
///
/// All rows must have the same length. Rows of length zero score `0.0`.
///
/// # Examples
///
/// ```
/// use coevo_selection::fitness_sharing::shared_scores;
///
/// let scores = shared_scores(&[vec![1.0, 1.0, 0.0], vec![1.0, 0.0, 0.0]]);
/// assert_eq!(scores[0], (1.0 / 3.0 + 1.0 / 2.0) / 3.0);
/// assert_eq!(scores[1], (1.0 / 3.0) / 3.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn shared_scores<R, T>(rows: &[R]) -> Vec<f64>
where
    R: AsRef<[T]>,
    T: Copy + Into<f64>,
{
    let Some(dimensions) = rows.first().map(|row| row.as_ref().len()) else {
        return vec![];
    };
    if dimensions == 0 {
        return vec![0.0; rows.len()];
    }

    let mut denominators = vec![1.0; dimensions];
    for row in rows {
        let row = row.as_ref();
        assert_eq!(row.len(), dimensions, "rows must have the same length");
        for (denominator, &value) in denominators.iter_mut().zip(row) {
            *denominator += Into::<f64>::into(value);
        }
    }

    rows.iter()
        .map(|row| {
            let score = row
                .as_ref()
                .iter()
                .zip(&denominators)
                .map(|(&value, denominator)| Into::<f64>::into(value) / denominator)
                .sum::<f64>();
            score / dimensions as f64
        })
        .collect()
}

/// Computes the outcome-based fitness-sharing diversity of every team.
///
/// Returns the rounded scores in team order. Fails if any team lacks an outcome
/// for any point.
pub fn team_scores(
    teams: &[Team],
    points: &[Point],
    config: &ValidatedConfig,
) -> Result<Vec<f64>, SelectionError> {
    let outcomes = teams
        .iter()
        .map(|team| {
            points
                .iter()
                .map(|point| team.outcome(point.id()))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(shared_scores(&outcomes)
        .into_iter()
        .map(|score| config.round(score))
        .collect())
}

#[cfg(test)]
mod tests {
    use coevo_core::{ModelError, PointId, TeamId};

    use super::*;
    use crate::config::SelectionConfig;

    fn team_with(id: u64, outcomes: &[(u64, f64)]) -> Team {
        let mut team = Team::new(TeamId::from(id));
        for &(point, outcome) in outcomes {
            team.record_outcome(PointId::from(point), outcome);
        }
        team
    }

    fn points(ids: &[u64]) -> Vec<Point> {
        ids.iter().map(|&id| Point::new(PointId::from(id))).collect()
    }

    #[test]
    fn test_identical_outcomes_share_equally() {
        let teams = [
            team_with(1, &[(1, 1.0), (2, 0.5)]),
            team_with(2, &[(1, 1.0), (2, 0.5)]),
            team_with(3, &[(1, 1.0), (2, 0.5)]),
        ];
        let config = SelectionConfig::default().validate().unwrap();
        let scores = team_scores(&teams, &points(&[1, 2]), &config).unwrap();
        assert_eq!(scores[0], scores[1]);
        assert_eq!(scores[1], scores[2]);
    }

    #[test]
    fn test_rare_success_is_worth_more() {
        let teams = [
            team_with(1, &[(1, 1.0), (2, 1.0)]),
            team_with(2, &[(1, 1.0), (2, 0.0)]),
            team_with(3, &[(1, 1.0), (2, 0.0)]),
        ];
        let config = SelectionConfig::default().validate().unwrap();
        let scores = team_scores(&teams, &points(&[1, 2]), &config).unwrap();
        // point 1: denominator 4, point 2: denominator 2
        assert_eq!(scores[0], 0.375);
        assert_eq!(scores[1], 0.125);
    }

    #[test]
    fn test_scores_are_rounded() {
        let teams = [team_with(1, &[(1, 1.0)]), team_with(2, &[(1, 1.0)])];
        let config = SelectionConfig::default().validate().unwrap();
        let scores = team_scores(&teams, &points(&[1]), &config).unwrap();
        assert_eq!(scores, [0.3333, 0.3333]);
    }

    #[test]
    fn test_missing_outcome_is_fatal() {
        let teams = [team_with(1, &[(1, 1.0)]), team_with(2, &[])];
        let config = SelectionConfig::default().validate().unwrap();
        let err = team_scores(&teams, &points(&[1]), &config).unwrap_err();
        assert_eq!(
            err,
            SelectionError::Model(ModelError::MissingOutcome {
                team: TeamId::from(2),
                point: PointId::from(1),
            })
        );
    }

    #[test]
    fn test_no_points_scores_zero() {
        let teams = [team_with(1, &[]), team_with(2, &[])];
        let config = SelectionConfig::default().validate().unwrap();
        let scores = team_scores(&teams, &[], &config).unwrap();
        assert_eq!(scores, [0.0, 0.0]);
    }

    #[test]
    fn test_binary_rows() {
        let scores = shared_scores(&[vec![1_u8, 0], vec![1, 1]]);
        assert_eq!(scores[0], (1.0 / 3.0) / 2.0);
        assert_eq!(scores[1], (1.0 / 3.0 + 1.0 / 2.0) / 2.0);
    }
}
