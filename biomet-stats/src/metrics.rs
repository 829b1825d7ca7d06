//! Scalar metrics derived from a rate curve.
//!
//! Provides the ROC area ([`roc_auc`]), the decidability index d'
//! ([`decidability`]), and the two threshold-optimised measures
//! [`youden_index`] and [`matthews_correlation`].

use biomet_core::{BiometError, Result};

use crate::rates::check_paired;

/// The best value of a per-threshold metric and the row it occurs at.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Optimum {
    /// Maximum value over all rows.
    pub value: f64,
    /// First row attaining `value`.
    pub index: usize,
}

/// Area under the ROC curve `(fmr, 1 - fnmr)` by the trapezoidal rule.
///
/// Rows are expected in acceptance order (FMR descending), as produced by
/// [`compute_rate_curve`](crate::rates::compute_rate_curve). A result below
/// 0.5 usually means the score polarity is wrong; it is returned as computed.
///
/// # Errors
///
/// Returns an error if the arrays are empty or have different lengths.
pub fn roc_auc(fmr: &[f64], fnmr: &[f64]) -> Result<f64> {
    check_paired(fmr, fnmr, "roc_auc")?;
    let auc = fmr
        .windows(2)
        .zip(fnmr.windows(2))
        .map(|(x, y)| {
            let (tpr1, tpr2) = (1.0 - y[0], 1.0 - y[1]);
            (x[0] - x[1]) * (tpr1 + (tpr2 - tpr1) / 2.0)
        })
        .sum();
    Ok(auc)
}

/// Decidability index d' (NICE:II protocol).
///
/// `|gmean - imean| / sqrt((gstd² + istd²) / 2)`. Two distributions with no
/// spread at all are defined to have d' = 1.
pub fn decidability(gmean: f64, gstd: f64, imean: f64, istd: f64) -> f64 {
    if gstd == 0.0 && istd == 0.0 {
        return 1.0;
    }
    (gmean - imean).abs() / (0.5 * (gstd * gstd + istd * istd)).sqrt()
}

/// Youden's J statistic `1 - fnmr - fmr`, maximised over rows.
///
/// # Errors
///
/// Returns an error if the arrays are empty or have different lengths.
pub fn youden_index(fmr: &[f64], fnmr: &[f64]) -> Result<Optimum> {
    check_paired(fmr, fnmr, "youden_index")?;
    Ok(first_max(fmr.iter().zip(fnmr).map(|(fm, fnm)| 1.0 - fnm - fm)))
}

/// Matthews correlation coefficient, maximised over rows.
///
/// With `tp = genuine_n - fnm` and `tn = impostor_n - fm` per row:
///
/// `MCC = (tp·tn - fm·fnm) / sqrt((tp+fm)(tp+fnm)(tn+fm)(tn+fnm))`
///
/// Rows with a zero denominator use a denominator of 1 (MCC = 0 there).
///
/// # Errors
///
/// Returns an error if the count arrays are empty, have different lengths,
/// or hold counts larger than the population sizes.
pub fn matthews_correlation(
    false_matches: &[u64],
    false_non_matches: &[u64],
    genuine_n: u64,
    impostor_n: u64,
) -> Result<Optimum> {
    if false_matches.is_empty() || false_matches.len() != false_non_matches.len() {
        return Err(BiometError::InvalidInput(format!(
            "matthews_correlation: need equal-length non-empty count arrays (got {} and {})",
            false_matches.len(),
            false_non_matches.len(),
        )));
    }
    if false_matches.iter().any(|&fm| fm > impostor_n)
        || false_non_matches.iter().any(|&fnm| fnm > genuine_n)
    {
        return Err(BiometError::InvalidInput(
            "matthews_correlation: error counts exceed population size".into(),
        ));
    }

    let coefficients = false_matches
        .iter()
        .zip(false_non_matches)
        .map(|(&fm, &fnm)| {
            let tp = (genuine_n - fnm) as f64;
            let tn = (impostor_n - fm) as f64;
            let (fm, fnm) = (fm as f64, fnm as f64);
            let denom = ((tp + fm) * (tp + fnm) * (tn + fm) * (tn + fnm)).sqrt();
            let denom = if denom == 0.0 { 1.0 } else { denom };
            (tp * tn - fm * fnm) / denom
        });
    Ok(first_max(coefficients))
}

/// Maximum of a non-empty sequence, keeping the first index on ties.
fn first_max(values: impl Iterator<Item = f64>) -> Optimum {
    let mut best = Optimum {
        value: f64::NEG_INFINITY,
        index: 0,
    };
    for (i, v) in values.enumerate() {
        if v > best.value {
            best = Optimum { value: v, index: i };
        }
    }
    best
}

// ── Tests ──────────────────────────────────────────────────────────────────
