//! Performance statistics for biometric systems.
//!
//! Verification (1:1):
//!
//! - **Rate curves** — FMR/FNMR at every candidate threshold, from raw or
//!   histogram impostor scores ([`rates`])
//! - **Equal error rate** — FVC2000 interval estimate ([`eer`])
//! - **Operating points** — ZeroFMR, FMR1000, ..., ZeroFNMR ([`operating_point`])
//! - **Scalar metrics** — ROC AUC, decidability d', Youden's J, MCC ([`metrics`])
//! - **Experiment bundle** — everything above for one experiment, plus batch
//!   evaluation ([`stats`])
//!
//! Identification (1:N):
//!
//! - **CMC curves** — cumulative rank-k identification rate ([`cmc`])
//!
//! Suspicious inputs such as reversed score polarity are reported as
//! [`Diagnostic`] values rather than errors.

pub mod cmc;
pub mod descriptive;
pub mod diagnostics;
pub mod eer;
pub mod metrics;
pub mod operating_point;
pub mod rates;
pub mod stats;

pub use cmc::{
    build_ranked_matches, cmc_curve, CmcStats, Comparison, MissingTruthPolicy, QueryMatches,
    RankedMatches,
};
pub use diagnostics::Diagnostic;
pub use eer::{get_eer, Eer};
pub use metrics::{decidability, matthews_correlation, roc_auc, youden_index, Optimum};
pub use operating_point::{
    get_fmr_operating_point, get_fnmr_operating_point, OperatingPoint, OperatingPoints,
    DEFAULT_FMR_TARGETS,
};
pub use rates::{
    compute_rate_curve, rate_curve_at_thresholds, step_thresholds, ImpostorScores, Polarity,
    RateCurve,
};
pub use stats::{
    compute_batch, CrossMetrics, DistributionSummary, Experiment, ImpostorData, Stats, StatsConfig,
};
