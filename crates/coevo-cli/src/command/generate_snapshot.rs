use std::path::PathBuf;

use anyhow::Context;
use coevo_core::{IdSequence, Point, PointId, ProgramId, Team, TeamId};
use coevo_selection::config::{SelectionConfig, ValidatedConfig};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{model::snapshot::GenerationSnapshot, util::Output};

const ACTION_LABELS: [&str; 3] = ["f", "c", "r"];
const OUTCOMES: [f64; 3] = [0.0, 0.5, 1.0];
const MAX_ACTIVE_PROGRAMS: u64 = 5;
/// Probability that a team plays its preferred action instead of a random one
const STYLE_BIAS: f64 = 0.6;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateSnapshotArg {
    /// Number of teams
    #[arg(long, default_value_t = 20)]
    teams: usize,
    /// Number of points
    #[arg(long, default_value_t = 40)]
    points: usize,
    /// Number of distinct programs teams are assembled from
    #[arg(long, default_value_t = 30)]
    programs: u64,
    /// Maximum number of actions a team takes in one match
    #[arg(long, default_value_t = 4)]
    max_actions_per_match: usize,
    /// Random seed [default: random]
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateSnapshotArg) -> anyhow::Result<()> {
    anyhow::ensure!(arg.programs > 0, "--programs must be at least 1");
    anyhow::ensure!(
        arg.max_actions_per_match > 0,
        "--max-actions-per-match must be at least 1"
    );

    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    eprintln!(
        "Generating {} teams and {} points (seed {seed})...",
        arg.teams, arg.points
    );
    let mut rng = Pcg32::seed_from_u64(seed);
    let config = SelectionConfig::default()
        .validate()
        .context("Invalid default selection config")?;
    let snapshot = generate(arg, &config, &mut rng)?;
    Output::save_json(&snapshot, arg.output.clone())
}

/// Plays every team against every point with a random, style-biased policy.
fn generate<R>(
    arg: &GenerateSnapshotArg,
    config: &ValidatedConfig,
    rng: &mut R,
) -> anyhow::Result<GenerationSnapshot>
where
    R: Rng,
{
    let total_actions =
        u8::try_from(config.total_actions()).context("Action alphabet does not fit in u8")?;

    let mut point_ids = IdSequence::<PointId>::new();
    let points = (0..arg.points)
        .map(|_| Point::new(point_ids.next_id()))
        .collect::<Vec<_>>();

    let mut team_ids = IdSequence::<TeamId>::new();
    let mut teams = Vec::with_capacity(arg.teams);
    for _ in 0..arg.teams {
        let mut team = Team::new(team_ids.next_id());
        for _ in 0..rng.random_range(1..=MAX_ACTIVE_PROGRAMS.min(arg.programs)) {
            team.activate_program(ProgramId::from(rng.random_range(1..=arg.programs)));
        }

        let style = rng.random_range(0..total_actions);
        let mut actions = vec![];
        let mut trace = vec![];
        let mut pattern = vec![];
        for point in &points {
            let played = (0..rng.random_range(1..=arg.max_actions_per_match))
                .map(|_| {
                    if rng.random_bool(STYLE_BIAS) {
                        style
                    } else {
                        rng.random_range(0..total_actions)
                    }
                })
                .collect::<Vec<_>>();
            let outcome = OUTCOMES[rng.random_range(0..OUTCOMES.len())];
            team.record_outcome(point.id(), outcome);

            #[expect(clippy::cast_precision_loss)]
            pattern.push(config.bin_for_actions(&played)? as f64);
            trace.extend(played.iter().map(|&action| {
                let label = ACTION_LABELS
                    .get(usize::from(action))
                    .copied()
                    .unwrap_or("x");
                format!("{label}{}", point.id().get() % 4)
            }));
            actions.extend(played);
        }

        let encodings = team.encodings_mut();
        encodings.actions_per_match = Some(actions);
        encodings.custom_info_per_match = Some(trace);
        encodings.pattern_per_match = Some(pattern);
        teams.push(team);
    }

    Ok(GenerationSnapshot { teams, points })
}
