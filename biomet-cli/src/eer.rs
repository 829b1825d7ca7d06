use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use biomet_core::Summarizable;
use biomet_io::{read_histogram, read_scores, write_eer_report, ReportFormat};
use biomet_stats::rates::{rate_curve_at_thresholds, step_thresholds};
use biomet_stats::stats::{
    compute_batch, DistributionSummary, Experiment, ImpostorData, Stats, StatsConfig,
};
use biomet_stats::ImpostorScores;
use indicatif::ProgressIterator;
use log::{info, warn};

use crate::cli::EerArgs;
use crate::progress::default_progress_bar;

pub fn run(args: &EerArgs) -> Result<PathBuf> {
    let common = &args.common;
    let ids = &common.experiment_ids;
    if args.genuine_files.len() != ids.len() || args.impostor_files.len() != ids.len() {
        bail!(
            "got {} genuine files, {} impostor files and {} experiment ids; the lists must match",
            args.genuine_files.len(),
            args.impostor_files.len(),
            ids.len()
        );
    }
    let format = ReportFormat::from_extension(&common.report_format)?;
    let config = StatsConfig {
        polarity: common.polarity(),
        fmr_targets: args.targets.clone(),
    };
    info!("polarity\t{:?}", config.polarity);
    info!("fmr targets\t{:?}", config.fmr_targets);
    info!("histogram impostors\t{}", args.hist);

    let progress = default_progress_bar("Loading", ids.len());
    let mut experiments = Vec::with_capacity(ids.len());
    for ((id, gfile), ifile) in ids
        .iter()
        .zip(&args.genuine_files)
        .zip(&args.impostor_files)
        .progress_with(progress)
    {
        experiments.push(load_experiment(id, &common.path.join(gfile), &common.path.join(ifile), args.hist)?);
    }

    info!("calculating stats...");
    let stats = match args.thr_step {
        None => compute_batch(&experiments, &config)
            .into_iter()
            .collect::<biomet_core::Result<Vec<_>>>()?,
        Some(step) => experiments
            .iter()
            .map(|exp| compute_on_grid(exp, step, &config))
            .collect::<Result<Vec<_>>>()?,
    };

    for st in &stats {
        for diag in &st.diagnostics {
            warn!("{}: {}", st.exp_id, diag);
        }
        println!("{}", st.summary());
    }

    let report = common.save_path.join(format!("eer_report.{}", format.extension()));
    info!("writing report\t{:?}", report);
    write_eer_report(&stats, &report)
        .with_context(|| format!("failed to write {}", report.display()))?;
    Ok(report)
}

fn load_experiment(id: &str, genuine: &Path, impostor: &Path, hist: bool) -> Result<Experiment> {
    info!("{}: loading genuine scores\t{:?}", id, genuine);
    let genuine_scores = read_scores(genuine)?;
    info!("{}: loading impostor scores\t{:?}", id, impostor);
    let impostor = if hist {
        ImpostorData::Histogram(read_histogram(impostor)?)
    } else {
        ImpostorData::Raw(read_scores(impostor)?)
    };
    Ok(Experiment {
        id: id.to_string(),
        genuine: genuine_scores,
        impostor,
    })
}

/// Stats on a grid from the lowest to the highest observed score.
fn compute_on_grid(exp: &Experiment, step: f64, config: &StatsConfig) -> Result<Stats> {
    let ImpostorData::Raw(impostor) = &exp.impostor else {
        bail!("{}: a threshold step needs raw impostor scores", exp.id);
    };
    let (lo, hi) = exp
        .genuine
        .iter()
        .chain(impostor)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| (lo.min(s), hi.max(s)));
    let grid = step_thresholds(lo, hi, step).with_context(|| exp.id.clone())?;
    let curve = rate_curve_at_thresholds(&exp.genuine, impostor, config.polarity, &grid)
        .with_context(|| exp.id.clone())?;
    let distribution = DistributionSummary::from_scores(&exp.genuine, ImpostorScores::Raw(impostor))?;
    Ok(Stats::from_curve(exp.id.clone(), curve, distribution, config)?)
}
