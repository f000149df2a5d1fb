use serde::{Deserialize, Serialize};

use crate::PointId;

/// A test case (opponent scenario) that teams are evaluated against.
///
/// The environment-specific content of a point lives with the environment; the
/// selection core only needs its identity and the fitness it assigns while
/// resizing the Pareto front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    id: PointId,
    #[serde(default)]
    fitness: f64,
}

impl Point {
    #[must_use]
    pub fn new(id: PointId) -> Self {
        Self { id, fitness: 0.0 }
    }

    #[must_use]
    pub fn id(&self) -> PointId {
        self.id
    }

    /// Fitness-sharing score over distinction signatures.
    ///
    /// Only meaningful for points that went through a front balancing pass; it is
    /// unrelated to the training fitness of teams.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}
