use coevo_core::{Point, Team};
use serde::{Deserialize, Serialize};

/// One generation after evaluation: every team has an outcome for every point.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GenerationSnapshot {
    pub teams: Vec<Team>,
    pub points: Vec<Point>,
}
