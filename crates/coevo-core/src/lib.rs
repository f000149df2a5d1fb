//! Data model shared by the coevolutionary selection core.
//!
//! Two populations evolve against each other: [`Team`]s (candidate solutions) and
//! [`Point`]s (test cases or opponent scenarios). Evaluation, which happens outside
//! this workspace, records for every team its outcome against every point together
//! with behavioural [`Encodings`] of how the team played. Selection then reads those
//! records to score team diversity and to pick a discriminating point population.
//!
//! This crate only defines the records and their invariants:
//!
//! - [`id`]: Typed identifiers and the per-run [`IdSequence`]
//! - [`team`]: [`Team`] with outcomes, active programs, encodings and diversity scores
//! - [`point`]: [`Point`] with the fitness assigned during point selection
//! - [`encoding`]: Behavioural traces used by distance metrics
//! - [`metric`]: [`DiversityMetric`] identifiers
//!
//! Errors that signal a broken upstream invariant (evaluation not run, encodings
//! not produced) are reported as [`ModelError`] and are never papered over with
//! default values.

pub use self::{
    encoding::{EncodingKind, Encodings},
    id::{IdSequence, PointId, ProgramId, TeamId},
    metric::{DiversityMetric, UnknownMetricError},
    point::Point,
    team::Team,
};

pub mod encoding;
pub mod id;
pub mod metric;
pub mod point;
pub mod team;

/// Violations of the invariants evaluation is expected to establish.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum ModelError {
    #[display("team {team} has not been evaluated against point {point}")]
    MissingOutcome { team: TeamId, point: PointId },
    #[display("team {team} has no '{encoding}' encoding, required by '{metric}'")]
    MissingEncoding {
        team: TeamId,
        encoding: EncodingKind,
        metric: DiversityMetric,
    },
    #[display("team {team} played action {action}, outside the alphabet of {total_actions} actions")]
    ActionOutOfRange {
        team: TeamId,
        action: u8,
        total_actions: usize,
    },
    #[display("teams {team} and {other} have no active programs at all")]
    EmptyActiveProgramUnion { team: TeamId, other: TeamId },
    #[display(
        "pattern encodings of teams {team} and {other} differ in length ({len} != {other_len})"
    )]
    PatternLengthMismatch {
        team: TeamId,
        other: TeamId,
        len: usize,
        other_len: usize,
    },
}
