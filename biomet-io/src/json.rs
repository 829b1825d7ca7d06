//! JSON reports.
//!
//! Unlike the tabular formats, the JSON report carries the full rate curves
//! and diagnostics, so it is the one to feed into external plotting.

use std::path::Path;

use biomet_core::{BiometError, Result};
use biomet_stats::cmc::CmcStats;
use biomet_stats::stats::Stats;
use serde::Serialize;

use crate::report::{write_text, GENERATOR};

#[derive(Serialize)]
struct EerReport<'a> {
    generator: &'a str,
    experiments: &'a [Stats],
}

#[derive(Serialize)]
struct CmcReport<'a> {
    generator: &'a str,
    max_rank: usize,
    experiments: &'a [CmcStats],
}

pub(crate) fn render_eer(stats: &[Stats]) -> Result<String> {
    to_pretty(&EerReport {
        generator: GENERATOR,
        experiments: stats,
    })
}

pub(crate) fn render_cmc(stats: &[CmcStats], max_rank: usize) -> Result<String> {
    to_pretty(&CmcReport {
        generator: GENERATOR,
        max_rank,
        experiments: stats,
    })
}

pub(crate) fn write_eer(stats: &[Stats], path: &Path) -> Result<()> {
    write_text(path, &render_eer(stats)?)
}

pub(crate) fn write_cmc(stats: &[CmcStats], max_rank: usize, path: &Path) -> Result<()> {
    write_text(path, &render_cmc(stats, max_rank)?)
}

fn to_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| BiometError::Other(e.to_string()))
}
