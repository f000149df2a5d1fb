use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use coevo_core::{DiversityMetric, Point, Team, TeamId};
use coevo_selection::{config::ValidatedConfig, pareto::PointSelection};
use coevo_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

/// Result of running selection on one generation snapshot.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectionReport {
    pub selected_at: DateTime<Utc>,
    pub metrics: Vec<DiversityMetric>,
    pub k: usize,
    pub target: usize,
    pub teams: Vec<TeamDiversity>,
    pub diversity_stats: BTreeMap<DiversityMetric, MetricStats>,
    pub kept_points: Vec<Point>,
    pub removed_points: Vec<Point>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamDiversity {
    pub id: TeamId,
    pub diversity: BTreeMap<DiversityMetric, f64>,
}

/// Distribution of one diversity metric over the team population.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct MetricStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl From<DescriptiveStats> for MetricStats {
    fn from(stats: DescriptiveStats) -> Self {
        let DescriptiveStats {
            min,
            max,
            mean,
            median,
            std_dev,
        } = stats;
        Self {
            min,
            max,
            mean,
            median,
            std_dev,
        }
    }
}

impl SelectionReport {
    pub fn new(
        config: &ValidatedConfig,
        target: usize,
        teams: &[Team],
        selection: PointSelection,
    ) -> Self {
        let diversity_stats = config
            .metrics()
            .iter()
            .filter_map(|&metric| {
                let scores = teams.iter().filter_map(|t| t.diversity_score(metric));
                DescriptiveStats::new(scores).map(|stats| (metric, stats.into()))
            })
            .collect();
        let teams = teams
            .iter()
            .map(|team| TeamDiversity {
                id: team.id(),
                diversity: team.diversity().clone(),
            })
            .collect();
        let PointSelection { keep, remove } = selection;
        Self {
            selected_at: Utc::now(),
            metrics: config.metrics().to_vec(),
            k: config.k(),
            target,
            teams,
            diversity_stats,
            kept_points: keep,
            removed_points: remove,
        }
    }
}

#[cfg(test)]
mod tests {
    use coevo_core::PointId;
    use coevo_selection::config::SelectionConfig;

    use super::*;

    #[test]
    fn test_stats_cover_scored_metrics_only() {
        let config = SelectionConfig {
            metrics: vec!["fitness_sharing".to_owned(), "hamming".to_owned()],
            ..SelectionConfig::default()
        }
        .validate()
        .unwrap();
        let mut teams = vec![Team::new(TeamId::from(1)), Team::new(TeamId::from(2))];
        teams[0].set_diversity_score(DiversityMetric::FitnessSharing, 0.25);
        teams[1].set_diversity_score(DiversityMetric::FitnessSharing, 0.75);
        let selection = PointSelection {
            keep: vec![Point::new(PointId::from(1))],
            remove: vec![],
        };

        let report = SelectionReport::new(&config, 1, &teams, selection);
        assert_eq!(report.teams.len(), 2);
        assert_eq!(report.diversity_stats.len(), 1);
        let stats = report.diversity_stats[&DiversityMetric::FitnessSharing];
        assert_eq!(stats.mean, 0.5);
        assert_eq!(stats.max, 0.75);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["diversity_stats"]["fitness_sharing"].is_object());
        assert_eq!(json["kept_points"][0]["id"], 1);
    }
}
