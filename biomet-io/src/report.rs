//! Report generation.
//!
//! The output format is chosen from the file extension of the save path:
//!
//! | Extension       | Format                                  |
//! |-----------------|-----------------------------------------|
//! | `.csv`          | Scalar table, legend and FMR/FNMR rows  |
//! | `.json`         | Every statistic and curve               |
//! | `.html`, `.htm` | Scalar table as a standalone page       |
//! | `.tex`          | Scalar table as a LaTeX `tabular`       |

use std::path::Path;

use biomet_core::{BiometError, Result};
use biomet_stats::cmc::CmcStats;
use biomet_stats::operating_point::fmr_label;
use biomet_stats::stats::Stats;

/// First line (or comment) of every generated report.
pub const GENERATOR: &str = concat!("Generated using biomet ", env!("CARGO_PKG_VERSION"));

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Json,
    Html,
    Tex,
}

impl ReportFormat {
    /// Look up a format by extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "html" | "htm" => Ok(Self::Html),
            "tex" => Ok(Self::Tex),
            other => Err(BiometError::UnsupportedFormat(format!(
                "unknown report format '{other}' (expected csv, json, html or tex)"
            ))),
        }
    }

    /// Pick the format from the extension of `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            BiometError::UnsupportedFormat(format!(
                "{}: report path has no extension",
                path.display()
            ))
        })?;
        Self::from_extension(ext)
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Html => "html",
            Self::Tex => "tex",
        }
    }
}

/// Write a verification report for `stats` to `path`.
///
/// # Errors
///
/// Fails with [`BiometError::UnsupportedFormat`] for an unknown extension,
/// [`BiometError::InvalidInput`] if `stats` is empty or the experiments were
/// computed with different FMR targets, and [`BiometError::Io`] if the file
/// cannot be written.
pub fn write_eer_report(stats: &[Stats], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = ReportFormat::from_path(path)?;
    let table = ScalarTable::new(stats)?;
    match format {
        ReportFormat::Csv => crate::csv::write_eer(&table, stats, path),
        ReportFormat::Json => crate::json::write_eer(stats, path),
        ReportFormat::Html => write_text(path, &crate::html::render_eer(&table)),
        ReportFormat::Tex => write_text(path, &crate::tex::render_eer(&table)),
    }
}

/// Write the CMC rank values of `stats` (ranks `1..=max_rank`) to `path`.
///
/// # Errors
///
/// As [`write_eer_report`]; additionally every experiment must carry at
/// least `max_rank` rank values.
pub fn write_cmc_report(stats: &[CmcStats], max_rank: usize, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = ReportFormat::from_path(path)?;
    check_cmc(stats, max_rank)?;
    match format {
        ReportFormat::Csv => crate::csv::write_cmc(stats, max_rank, path),
        ReportFormat::Json => crate::json::write_cmc(stats, max_rank, path),
        ReportFormat::Html => write_text(path, &crate::html::render_cmc(stats, max_rank)),
        ReportFormat::Tex => write_text(path, &crate::tex::render_cmc(stats, max_rank)),
    }
}

/// Column headers `Rank-1 ..= Rank-max_rank`.
pub(crate) fn rank_headers(max_rank: usize) -> impl Iterator<Item = String> {
    (1..=max_rank).map(|r| format!("Rank-{r}"))
}

fn check_cmc(stats: &[CmcStats], max_rank: usize) -> Result<()> {
    if stats.is_empty() {
        return Err(BiometError::InvalidInput("no CMC results to report".into()));
    }
    if max_rank == 0 {
        return Err(BiometError::InvalidInput("max_rank must be at least 1".into()));
    }
    if let Some(short) = stats.iter().find(|s| s.ranks.len() < max_rank) {
        return Err(BiometError::InvalidInput(format!(
            "{}: {} rank values, report needs {}",
            short.exp_id,
            short.ranks.len(),
            max_rank
        )));
    }
    Ok(())
}

pub(crate) fn write_text(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| {
        BiometError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

/// Legend appended to the CSV report, one entry per line.
pub(crate) const LEGEND: [&str; 14] = [
    "GMean: Genuine scores distribution mean",
    "GSTD: Genuine scores distribution standard deviation",
    "IMean: Impostor scores distribution mean",
    "ISTD: Impostor scores distribution standard deviation",
    "Sensitivity index (d'): See NICE:II protocol evaluation",
    "AUC: Area under the ROC curve",
    "J-Index: Youden's J statistic (Youden's Index)",
    "MCC: Matthews Correlation Coefficient",
    "EER: Equal Error Rate",
    "EERlow, EERhigh: See FVC2000 protocol evaluation",
    "FMR: False Match Rate",
    "FNMR: False Non-Match Rate",
    "_TH: Threshold",
    "EER_TH: Threshold for which EERlow and EERhigh were calculated",
];

/// The per-experiment scalar statistics shared by every tabular format.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScalarTable {
    /// Metric names, without the leading `Experiment ID` column.
    pub columns: Vec<String>,
    /// `(experiment id, one value per column)`.
    pub rows: Vec<(String, Vec<f64>)>,
}

impl ScalarTable {
    pub(crate) fn new(stats: &[Stats]) -> Result<Self> {
        let first = stats
            .first()
            .ok_or_else(|| BiometError::InvalidInput("no experiments to report".into()))?;
        let targets: Vec<f64> = first.operating_points.fmr.iter().map(|op| op.target).collect();
        if let Some(other) = stats.iter().find(|s| {
            s.operating_points.fmr.len() != targets.len()
                || s.operating_points
                    .fmr
                    .iter()
                    .zip(&targets)
                    .any(|(op, &t)| op.target != t)
        }) {
            return Err(BiometError::InvalidInput(format!(
                "{}: FMR targets differ from experiment '{}'",
                other.exp_id, first.exp_id
            )));
        }

        let labels: Vec<String> = targets.iter().map(|&t| fmr_label(t)).collect();
        let mut columns: Vec<String> = [
            "GMean",
            "GSTD",
            "IMean",
            "ISTD",
            "Sensitivity index (d')",
            "AUC",
            "J-Index",
            "J-Index_TH",
            "MCC",
            "MCC_TH",
            "EERlow",
            "EERhigh",
            "EER",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        columns.extend(labels.iter().cloned());
        columns.push("ZeroFNMR".into());
        columns.push("EER_TH".into());
        columns.extend(labels.iter().map(|l| format!("{l}_TH")));
        columns.push("ZeroFNMR_TH".into());

        let rows = stats.iter().map(|s| (s.exp_id.clone(), scalar_row(s))).collect();
        Ok(Self { columns, rows })
    }
}

fn scalar_row(st: &Stats) -> Vec<f64> {
    let d = &st.distribution;
    let x = &st.cross;
    let ops = &st.operating_points;
    let mut row = vec![
        d.genuine_mean,
        d.genuine_std,
        d.impostor_mean,
        d.impostor_std,
        d.decidability,
        x.auc,
        x.youden.value,
        x.youden_threshold,
        x.mcc.value,
        x.mcc_threshold,
        st.eer.low,
        st.eer.high,
        st.eer.value,
    ];
    row.extend(ops.fmr.iter().map(|op| op.value));
    row.push(ops.zero_fnmr.value);
    row.push(st.eer_threshold());
    row.extend(ops.fmr.iter().map(|op| op.threshold));
    row.push(ops.zero_fnmr.threshold);
    row
}
