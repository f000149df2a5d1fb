use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::{DiversityMetric, Encodings, ModelError, PointId, ProgramId, TeamId};

/// A candidate solution co-evolved against the point population.
///
/// Outcomes, active programs and encodings are recorded by evaluation and are
/// read-only for selection. Diversity scores are written by diversity
/// maintenance; scores for different metrics accumulate side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    #[serde(default)]
    results_by_point: HashMap<PointId, f64>,
    #[serde(default)]
    active_programs: BTreeSet<ProgramId>,
    #[serde(default)]
    encodings: Encodings,
    #[serde(default)]
    diversity: BTreeMap<DiversityMetric, f64>,
}

impl Team {
    #[must_use]
    pub fn new(id: TeamId) -> Self {
        Self {
            id,
            results_by_point: HashMap::new(),
            active_programs: BTreeSet::new(),
            encodings: Encodings::default(),
            diversity: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> TeamId {
        self.id
    }

    /// Records the outcome of this team against `point`, replacing any earlier one.
    pub fn record_outcome(&mut self, point: PointId, outcome: f64) {
        self.results_by_point.insert(point, outcome);
    }

    #[must_use]
    pub fn results_by_point(&self) -> &HashMap<PointId, f64> {
        &self.results_by_point
    }

    /// Returns the outcome against `point`.
    ///
    /// A missing outcome means the team was never evaluated against the point,
    /// which callers must treat as a bug rather than as a zero score.
    pub fn outcome(&self, point: PointId) -> Result<f64, ModelError> {
        self.results_by_point
            .get(&point)
            .copied()
            .ok_or(ModelError::MissingOutcome {
                team: self.id,
                point,
            })
    }

    /// Marks `program` as exercised during evaluation.
    pub fn activate_program(&mut self, program: ProgramId) {
        self.active_programs.insert(program);
    }

    #[must_use]
    pub fn active_programs(&self) -> &BTreeSet<ProgramId> {
        &self.active_programs
    }

    #[must_use]
    pub fn encodings(&self) -> &Encodings {
        &self.encodings
    }

    pub fn encodings_mut(&mut self) -> &mut Encodings {
        &mut self.encodings
    }

    #[must_use]
    pub fn diversity(&self) -> &BTreeMap<DiversityMetric, f64> {
        &self.diversity
    }

    #[must_use]
    pub fn diversity_score(&self, metric: DiversityMetric) -> Option<f64> {
        self.diversity.get(&metric).copied()
    }

    pub fn set_diversity_score(&mut self, metric: DiversityMetric, score: f64) {
        self.diversity.insert(metric, score);
    }
}
