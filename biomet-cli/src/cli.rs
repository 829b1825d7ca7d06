use std::path::PathBuf;

use biomet_stats::operating_point::DEFAULT_FMR_TARGETS;
use biomet_stats::rates::Polarity;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(name = "biomet", version, about = "Biometric verification and identification statistics")]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verification statistics (EER, operating points, AUC, ...) from
    /// genuine and impostor score files.
    Eer(EerArgs),
    /// Cumulative Match Characteristic curves from comparison files.
    Cmc(CmcArgs),
}

/// Options shared by both subcommands.
#[derive(Args)]
pub struct CommonArgs {
    /// Directory the input file names are relative to.
    #[clap(short, long, default_value = ".")]
    pub path: PathBuf,
    /// Experiment ids, comma separated, one per input file.
    #[clap(short = 'e', long = "experiment-ids", value_delimiter = ',', required = true)]
    pub experiment_ids: Vec<String>,
    /// Scores are dissimilarities (lower means a better match).
    #[clap(long)]
    pub ds: bool,
    /// Directory the report is written to.
    #[clap(long, default_value = ".")]
    pub save_path: PathBuf,
    /// Report format: csv, json, html or tex.
    #[clap(long, default_value_t = String::from("csv"))]
    pub report_format: String,
}

impl CommonArgs {
    pub fn polarity(&self) -> Polarity {
        if self.ds {
            Polarity::Dissimilarity
        } else {
            Polarity::Similarity
        }
    }
}

#[derive(Args)]
pub struct EerArgs {
    #[clap(flatten)]
    pub common: CommonArgs,
    /// Genuine score files, comma separated.
    #[clap(short = 'g', long = "gscores", value_delimiter = ',', required = true)]
    pub genuine_files: Vec<PathBuf>,
    /// Impostor score files, comma separated.
    #[clap(short = 'i', long = "iscores", value_delimiter = ',', required = true)]
    pub impostor_files: Vec<PathBuf>,
    /// Impostor files are histograms of integer scores.
    #[clap(long)]
    pub hist: bool,
    /// Evaluate on an evenly spaced threshold grid instead of every score.
    #[clap(long, conflicts_with = "hist")]
    pub thr_step: Option<f64>,
    /// FMR targets for the operating-point table, comma separated.
    #[clap(long, value_delimiter = ',', default_values_t = DEFAULT_FMR_TARGETS.to_vec())]
    pub targets: Vec<f64>,
}

#[derive(Args)]
pub struct CmcArgs {
    #[clap(flatten)]
    pub common: CommonArgs,
    /// Comparison files (`query candidate score`), comma separated.
    #[clap(short = 's', long = "scores", value_delimiter = ',', required = true)]
    pub score_files: Vec<PathBuf>,
    /// True-pairs files (`query identity`), comma separated. A single file
    /// is used for every comparison file.
    #[clap(short = 't', long = "true-pairs", value_delimiter = ',', required = true)]
    pub true_pair_files: Vec<PathBuf>,
    /// Highest rank of the CMC curve.
    #[clap(short = 'r', long, default_value_t = 20)]
    pub max_rank: usize,
    /// Leave out queries without ground truth instead of failing.
    #[clap(long)]
    pub skip_missing: bool,
}
