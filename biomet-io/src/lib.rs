//! File input and report output for the biomet workspace.
//!
//! Inputs:
//! - **Score files** — genuine/impostor scores, one per line ([`scores`])
//! - **Histogram files** — impostor counts indexed by integer score ([`scores`])
//! - **Comparison files** — `query candidate score` lines for CMC ([`comparisons`])
//! - **True-pairs files** — `query identity` ground truth for CMC ([`comparisons`])
//!
//! Outputs:
//! - **Reports** — CSV, JSON, HTML or LaTeX, chosen by file extension ([`report`])

mod lines;

pub mod comparisons;
pub mod csv;
pub mod html;
pub mod json;
pub mod report;
pub mod scores;
pub mod tex;

// Re-exports for convenience.

pub use comparisons::{parse_comparisons_str, parse_true_pairs_str, read_comparisons, read_true_pairs};
pub use report::{write_cmc_report, write_eer_report, ReportFormat, GENERATOR};
pub use scores::{parse_histogram_str, parse_scores_str, read_histogram, read_scores};
