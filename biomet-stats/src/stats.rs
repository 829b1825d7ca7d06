//! Per-experiment verification statistics.
//!
//! [`Stats::compute`] runs the whole verification pipeline for one pair of
//! score populations: rate curve, EER, operating points, distribution
//! moments, and the cross-threshold metrics. Anything suspicious is recorded
//! in [`Stats::diagnostics`] instead of aborting.

use biomet_core::{BiometError, Result, Summarizable};

use crate::descriptive;
use crate::diagnostics::Diagnostic;
use crate::eer::{get_eer, Eer};
use crate::metrics::{decidability, matthews_correlation, roc_auc, youden_index, Optimum};
use crate::operating_point::{OperatingPoints, DEFAULT_FMR_TARGETS};
use crate::rates::{compute_rate_curve, ImpostorScores, Polarity, RateCurve};

/// Parameters shared by every experiment in a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsConfig {
    /// Score polarity of both populations.
    pub polarity: Polarity,
    /// FMR targets for the operating-point table.
    pub fmr_targets: Vec<f64>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            polarity: Polarity::Similarity,
            fmr_targets: DEFAULT_FMR_TARGETS.to_vec(),
        }
    }
}

/// Mean and spread of both populations, and their separation d'.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionSummary {
    pub genuine_mean: f64,
    pub genuine_std: f64,
    pub impostor_mean: f64,
    pub impostor_std: f64,
    /// Decidability index d'.
    pub decidability: f64,
}

impl DistributionSummary {
    /// Population moments of both score sets. Histogram impostors are
    /// weighted by their counts.
    pub fn from_scores(genuine: &[f64], impostor: ImpostorScores<'_>) -> Result<Self> {
        let genuine_mean = descriptive::mean(genuine)?;
        let genuine_std = descriptive::std_dev(genuine, 0)?;
        let (impostor_mean, impostor_std) = match impostor {
            ImpostorScores::Raw(scores) => {
                (descriptive::mean(scores)?, descriptive::std_dev(scores, 0)?)
            }
            ImpostorScores::Histogram(counts) => descriptive::histogram_moments(counts)?,
        };
        Ok(Self {
            genuine_mean,
            genuine_std,
            impostor_mean,
            impostor_std,
            decidability: decidability(genuine_mean, genuine_std, impostor_mean, impostor_std),
        })
    }
}

/// Metrics that summarise the whole curve rather than one threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossMetrics {
    /// Area under the ROC curve.
    pub auc: f64,
    /// Youden's J and the row maximising it.
    pub youden: Optimum,
    /// Threshold of `youden.index`.
    pub youden_threshold: f64,
    /// Matthews correlation coefficient and the row maximising it.
    pub mcc: Optimum,
    /// Threshold of `mcc.index`.
    pub mcc_threshold: f64,
}

impl CrossMetrics {
    /// Compute AUC, Youden's J and MCC for `curve`.
    pub fn from_curve(curve: &RateCurve) -> Result<Self> {
        let youden = youden_index(&curve.fmr, &curve.fnmr)?;
        let mcc = matthews_correlation(
            &curve.false_matches,
            &curve.false_non_matches,
            curve.genuine_count,
            curve.impostor_count,
        )?;
        Ok(Self {
            auc: roc_auc(&curve.fmr, &curve.fnmr)?,
            youden,
            youden_threshold: curve.threshold(youden.index),
            mcc,
            mcc_threshold: curve.threshold(mcc.index),
        })
    }
}

/// Every statistic computed for one verification experiment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// Experiment identifier.
    pub exp_id: String,
    pub curve: RateCurve,
    pub eer: Eer,
    pub operating_points: OperatingPoints,
    pub distribution: DistributionSummary,
    pub cross: CrossMetrics,
    /// Advisory findings; empty for a well-behaved experiment.
    pub diagnostics: Vec<Diagnostic>,
}

impl Stats {
    /// Compute the statistics of one experiment from its score populations.
    ///
    /// # Errors
    ///
    /// Fails with [`BiometError::InvalidInput`] for empty populations or
    /// histogram input with non-integer genuine scores.
    pub fn compute(
        exp_id: impl Into<String>,
        genuine: &[f64],
        impostor: ImpostorScores<'_>,
        config: &StatsConfig,
    ) -> Result<Self> {
        let curve = compute_rate_curve(genuine, impostor, config.polarity)?;
        let distribution = DistributionSummary::from_scores(genuine, impostor)?;
        Self::from_curve(exp_id, curve, distribution, config)
    }

    /// Derive the statistics from an already computed curve, e.g. one
    /// evaluated on a fixed threshold grid.
    pub fn from_curve(
        exp_id: impl Into<String>,
        curve: RateCurve,
        distribution: DistributionSummary,
        config: &StatsConfig,
    ) -> Result<Self> {
        let eer = get_eer(&curve.fmr, &curve.fnmr)?;
        let operating_points = OperatingPoints::compute(&curve, &config.fmr_targets)?;
        let cross = CrossMetrics::from_curve(&curve)?;

        let mut diagnostics = Vec::new();
        if !eer.crossed {
            diagnostics.push(Diagnostic::NoErrorCrossing);
        }
        if cross.auc < 0.5 {
            diagnostics.push(Diagnostic::AucBelowHalf { auc: cross.auc });
        }

        Ok(Self {
            exp_id: exp_id.into(),
            curve,
            eer,
            operating_points,
            distribution,
            cross,
            diagnostics,
        })
    }

    /// Threshold at which the EER interval was taken.
    pub fn eer_threshold(&self) -> f64 {
        self.curve.threshold(self.eer.index)
    }
}

impl Summarizable for Stats {
    fn summary(&self) -> String {
        format!(
            "{}: EER={:.6}, AUC={:.6}, d'={:.4}, thresholds={}",
            self.exp_id,
            self.eer.value,
            self.cross.auc,
            self.distribution.decidability,
            self.curve.len(),
        )
    }
}

/// Impostor scores owned by an [`Experiment`].
#[derive(Debug, Clone, PartialEq)]
pub enum ImpostorData {
    Raw(Vec<f64>),
    Histogram(Vec<u64>),
}

impl ImpostorData {
    /// Borrow as the engine's input form.
    pub fn as_scores(&self) -> ImpostorScores<'_> {
        match self {
            ImpostorData::Raw(scores) => ImpostorScores::Raw(scores),
            ImpostorData::Histogram(counts) => ImpostorScores::Histogram(counts),
        }
    }
}

/// One loaded experiment awaiting evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    pub id: String,
    pub genuine: Vec<f64>,
    pub impostor: ImpostorData,
}

impl Experiment {
    /// Evaluate this experiment.
    pub fn compute(&self, config: &StatsConfig) -> Result<Stats> {
        Stats::compute(&self.id, &self.genuine, self.impostor.as_scores(), config)
            .map_err(|e| match e {
                BiometError::InvalidInput(msg) => {
                    BiometError::InvalidInput(format!("{}: {}", self.id, msg))
                }
                other => other,
            })
    }
}

/// Evaluate independent experiments, in parallel with the `parallel` feature.
///
/// Results are returned in input order; one failing experiment does not
/// affect the others.
pub fn compute_batch(experiments: &[Experiment], config: &StatsConfig) -> Vec<Result<Stats>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        experiments
            .par_iter()
            .map(|exp| exp.compute(config))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    experiments.iter().map(|exp| exp.compute(config)).collect()
}

// ── Tests ──────────────────────────────────────────────────────────────────
