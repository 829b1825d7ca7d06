use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use biomet_core::Summarizable;
use biomet_io::{read_comparisons, read_true_pairs, write_cmc_report, ReportFormat};
use biomet_stats::cmc::{build_ranked_matches, CmcStats, MissingTruthPolicy};
use indicatif::ProgressIterator;
use log::{info, warn};

use crate::cli::CmcArgs;
use crate::progress::default_progress_bar;

pub fn run(args: &CmcArgs) -> Result<PathBuf> {
    let common = &args.common;
    let ids = &common.experiment_ids;
    if args.score_files.len() != ids.len() {
        bail!(
            "got {} score files and {} experiment ids; the lists must match",
            args.score_files.len(),
            ids.len()
        );
    }
    if args.true_pair_files.len() != 1 && args.true_pair_files.len() != ids.len() {
        bail!(
            "got {} true-pairs files for {} experiments; pass one file or one per experiment",
            args.true_pair_files.len(),
            ids.len()
        );
    }
    let format = ReportFormat::from_extension(&common.report_format)?;
    let polarity = common.polarity();
    let policy = if args.skip_missing {
        MissingTruthPolicy::Skip
    } else {
        MissingTruthPolicy::Fail
    };
    info!("polarity\t{:?}", polarity);
    info!("missing truth\t{:?}", policy);
    info!("max rank\t{}", args.max_rank);

    let truth = load_true_pairs(&common.path, &args.true_pair_files)?;

    let progress = default_progress_bar("Experiments", ids.len());
    let mut stats = Vec::with_capacity(ids.len());
    for (i, (id, scores)) in ids
        .iter()
        .zip(&args.score_files)
        .enumerate()
        .progress_with(progress)
    {
        let scores = common.path.join(scores);
        info!("{}: loading comparisons\t{:?}", id, scores);
        let comparisons = read_comparisons(&scores)?;
        // A single file is shared by every experiment.
        let (truth_path, true_pairs) = &truth[if truth.len() == 1 { 0 } else { i }];

        info!("{}: calculating CMC curve...", id);
        let ranked = build_ranked_matches(&comparisons, true_pairs, polarity, policy)
            .with_context(|| format!("{}: {}", id, truth_path.display()))?;
        if ranked.skipped > 0 {
            warn!("{}: skipped {} queries without ground truth", id, ranked.skipped);
        }
        stats.push(CmcStats::compute(id.clone(), &ranked, args.max_rank).with_context(|| id.clone())?);
    }

    for st in &stats {
        for diag in &st.diagnostics {
            warn!("{}: {}", st.exp_id, diag);
        }
        println!("{}", st.summary());
    }

    let report = common.save_path.join(format!("cmc_report.{}", format.extension()));
    info!("writing report\t{:?}", report);
    write_cmc_report(&stats, args.max_rank, &report)
        .with_context(|| format!("failed to write {}", report.display()))?;
    Ok(report)
}

/// Reads each true-pairs file once, in argument order.
fn load_true_pairs(
    base: &Path,
    files: &[PathBuf],
) -> Result<Vec<(PathBuf, HashMap<String, String>)>> {
    files
        .iter()
        .map(|file| {
            let path = base.join(file);
            info!("loading true pairs\t{:?}", path);
            let pairs = read_true_pairs(&path)?;
            Ok((path, pairs))
        })
        .collect()
}
