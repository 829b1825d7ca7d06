//! CSV reports.

use std::path::Path;

use ::csv::{Writer, WriterBuilder};
use biomet_core::{BiometError, Result};
use biomet_stats::cmc::CmcStats;
use biomet_stats::stats::Stats;

use crate::report::{rank_headers, ScalarTable, GENERATOR, LEGEND};

fn create(path: &Path) -> Result<Writer<std::fs::File>> {
    // Report sections have different widths.
    WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))
}

fn csv_error(path: &Path, e: ::csv::Error) -> BiometError {
    let io: std::io::Error = e.into();
    BiometError::Io(std::io::Error::new(
        io.kind(),
        format!("{}: {}", path.display(), io),
    ))
}

/// Scalar table, legend, then one ` , <id> (FMR), <id> (FNMR)` column
/// triple per experiment. Shorter curves are padded with blanks.
pub(crate) fn write_eer(table: &ScalarTable, stats: &[Stats], path: &Path) -> Result<()> {
    let mut wtr = create(path)?;
    let err = |e| csv_error(path, e);

    wtr.write_record([GENERATOR]).map_err(err)?;

    let mut header = vec!["Experiment ID".to_string()];
    header.extend(table.columns.iter().cloned());
    wtr.write_record(&header).map_err(err)?;
    for (id, values) in &table.rows {
        let mut record = vec![id.clone()];
        record.extend(values.iter().map(f64::to_string));
        wtr.write_record(&record).map_err(err)?;
    }

    wtr.write_record([""]).map_err(err)?;
    wtr.write_record(["Legend:"]).map_err(err)?;
    for line in LEGEND {
        wtr.write_record([line]).map_err(err)?;
    }
    wtr.write_record([""]).map_err(err)?;

    let mut rates_header = Vec::with_capacity(stats.len() * 3);
    for st in stats {
        rates_header.push(" ".to_string());
        rates_header.push(format!("{} (FMR)", st.exp_id));
        rates_header.push(format!("{} (FNMR)", st.exp_id));
    }
    wtr.write_record(&rates_header).map_err(err)?;

    let rows = stats.iter().map(|s| s.curve.len()).max().unwrap_or(0);
    for i in 0..rows {
        let mut record = Vec::with_capacity(stats.len() * 3);
        for st in stats {
            record.push(" ".to_string());
            if i < st.curve.len() {
                record.push(st.curve.fmr[i].to_string());
                record.push(st.curve.fnmr[i].to_string());
            } else {
                record.push(" ".to_string());
                record.push(" ".to_string());
            }
        }
        wtr.write_record(&record).map_err(err)?;
    }

    wtr.flush().map_err(|e| BiometError::Io(std::io::Error::new(
        e.kind(),
        format!("{}: {}", path.display(), e),
    )))
}

/// `Experiment ID, Rank-1, ..., Rank-N`, one row per experiment.
pub(crate) fn write_cmc(stats: &[CmcStats], max_rank: usize, path: &Path) -> Result<()> {
    let mut wtr = create(path)?;
    let err = |e| csv_error(path, e);

    let mut header = vec!["Experiment ID".to_string()];
    header.extend(rank_headers(max_rank));
    wtr.write_record(&header).map_err(err)?;

    for st in stats {
        let mut record = vec![st.exp_id.clone()];
        record.extend(st.ranks[..max_rank].iter().map(f64::to_string));
        wtr.write_record(&record).map_err(err)?;
    }

    wtr.flush().map_err(|e| BiometError::Io(std::io::Error::new(
        e.kind(),
        format!("{}: {}", path.display(), e),
    )))
}
