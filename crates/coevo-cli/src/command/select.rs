use std::path::PathBuf;

use anyhow::Context;
use coevo_selection::{NormalizerCache, config::SelectionConfig, diversity, pareto};

use crate::{
    model::{report::SelectionReport, snapshot::GenerationSnapshot},
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SelectArg {
    /// Evaluated generation snapshot (JSON)
    #[arg(long)]
    snapshot: PathBuf,
    /// Selection config file (JSON); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of points to keep [default: half of the point population]
    #[arg(long)]
    target: Option<usize>,
    /// Number of nearest neighbours, overrides the config file
    #[arg(long)]
    k: Option<usize>,
    /// Comma-separated diversity metrics, overrides the config file
    #[arg(long, value_delimiter = ',')]
    metrics: Option<Vec<String>>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SelectArg) -> anyhow::Result<()> {
    let SelectArg {
        snapshot,
        config,
        target,
        k,
        metrics,
        output,
    } = arg;

    let GenerationSnapshot { mut teams, points } = util::read_snapshot_file(snapshot)?;
    eprintln!(
        "Loaded {} teams and {} points from {}",
        teams.len(),
        points.len(),
        snapshot.display()
    );

    let mut config = match config {
        Some(path) => util::read_config_file(path)?,
        None => SelectionConfig::default(),
    };
    if let Some(k) = k {
        config.k = *k;
    }
    if let Some(metrics) = metrics {
        config.metrics.clone_from(metrics);
    }
    if config.total_points == 0 {
        config.total_points = points.len();
    }
    let config = config.validate().context("Invalid selection config")?;
    let target = target.unwrap_or_else(|| points.len().div_ceil(2));

    eprintln!(
        "Computing diversity ({})...",
        config
            .metrics()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    let normalizers = NormalizerCache::new();
    diversity::compute_diversities(&mut teams, &points, &config, &normalizers)
        .context("Failed to compute team diversity")?;

    eprintln!("Selecting {target} of {} points...", points.len());
    let selection = pareto::select_points(points, &teams, target, config.tolerance())
        .context("Failed to select points")?;
    eprintln!(
        "Kept {} points, removed {}",
        selection.keep.len(),
        selection.remove.len()
    );

    let report = SelectionReport::new(&config, target, &teams, selection);
    for (metric, stats) in &report.diversity_stats {
        eprintln!(
            "  {:<16} min={:.4} mean={:.4} max={:.4} std_dev={:.4}",
            metric.to_string(),
            stats.min,
            stats.mean,
            stats.max,
            stats.std_dev
        );
    }
    Output::save_json(&report, output.clone())?;
    Ok(())
}
