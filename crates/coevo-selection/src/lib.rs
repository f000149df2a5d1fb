//! Selection core of coevolutionary training.
//!
//! Teams (candidate solutions) and points (test cases) are evolved against each
//! other. Once per generation, after every team has been evaluated against every
//! point, the outer training loop asks this crate two questions:
//!
//! 1. **How unusual is each team?** [`diversity::compute_diversities`] scores
//!    every team with the configured diversity metrics, so that reproduction can
//!    reward teams that behave differently from their peers.
//! 2. **Which points are worth keeping?** [`pareto::select_points`] keeps the
//!    points that best tell teams apart (a Pareto front over distinction
//!    signatures) and resizes that set to the requested population size.
//!
//! # Architecture
//!
//! ```text
//! Evaluation (external)
//!     ↓ records outcomes, active programs, encodings
//! Team / Point populations (coevo-core)
//!     ├─→ Diversity Engine
//!     │       ├─ fitness sharing over outcomes
//!     │       └─ distance metrics → k nearest neighbours
//!     │               ↓ writes
//!     │       Team::diversity
//!     └─→ Pareto Selector
//!             ├─ distinction matrix (one signature per point)
//!             ├─ Pareto front (first occurrence wins ties)
//!             └─ fitness-sharing balancing to the target size
//!                     ↓ returns
//!             PointSelection { keep, remove }
//! ```
//!
//! Both components are stateless: all inputs are passed explicitly. The only
//! state that outlives a generation is the [`NormalizerCache`], which memoizes the
//! normalization constants of the entropy and Euclidean metrics for a whole run.
//!
//! # Example
//!
//! ```
//! use coevo_core::{DiversityMetric, Point, PointId, ProgramId, Team, TeamId};
//! use coevo_selection::{
//!     NormalizerCache, config::SelectionConfig, diversity, pareto,
//! };
//!
//! let points = (1..=3).map(|id| Point::new(PointId::from(id))).collect::<Vec<_>>();
//! let mut teams = (1..=3)
//!     .map(|id| {
//!         let mut team = Team::new(TeamId::from(id));
//!         for point in &points {
//!             let won = (point.id().get() + id) % 2 == 0;
//!             team.record_outcome(point.id(), if won { 1.0 } else { 0.0 });
//!         }
//!         team.activate_program(ProgramId::from(id));
//!         team.activate_program(ProgramId::from(100));
//!         team
//!     })
//!     .collect::<Vec<_>>();
//!
//! let config = SelectionConfig {
//!     metrics: vec!["fitness_sharing".to_owned(), "genotype".to_owned()],
//!     k: 1,
//!     ..SelectionConfig::default()
//! }
//! .validate()?;
//! let normalizers = NormalizerCache::new();
//!
//! diversity::compute_diversities(&mut teams, &points, &config, &normalizers)?;
//! assert!(teams[0].diversity_score(DiversityMetric::Genotype).is_some());
//!
//! let selection = pareto::select_points(points, &teams, 2, config.tolerance())?;
//! assert_eq!(selection.keep.len(), 2);
//! assert_eq!(selection.remove.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use coevo_core::ModelError;

pub use self::normalizer::NormalizerCache;

pub mod config;
pub mod distance;
pub mod diversity;
pub mod fitness_sharing;
pub mod normalizer;
pub mod pareto;

/// Errors raised while scoring teams or selecting points.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SelectionError {
    #[display("{_0}")]
    Model(ModelError),
    #[display("action {action} has no configured weight")]
    #[from(ignore)]
    UnknownAction { action: u8 },
}
