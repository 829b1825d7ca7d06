//! Moments of score distributions.
//!
//! Provides [`mean`], [`variance`] and [`std_dev`] for raw score lists, and
//! [`histogram_moments`] for impostor populations stored as per-score counts.
//! All of these use the population convention (`ddof = 0`) unless told
//! otherwise, matching how score distributions are summarised in reports.

use biomet_core::{BiometError, Result};

/// Arithmetic mean.
pub fn mean(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(BiometError::InvalidInput(
            "mean: data must not be empty".into(),
        ));
    }
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Variance with given degrees-of-freedom correction.
///
/// - `ddof = 0` → population variance
/// - `ddof = 1` → sample variance (Bessel's correction)
pub fn variance(data: &[f64], ddof: usize) -> Result<f64> {
    let n = data.len();
    if n <= ddof {
        return Err(BiometError::InvalidInput(format!(
            "variance: need more than {} observations (got {})",
            ddof, n,
        )));
    }
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|&x| (x - m).powi(2)).sum();
    Ok(ss / (n - ddof) as f64)
}

/// Standard deviation with given degrees-of-freedom correction.
pub fn std_dev(data: &[f64], ddof: usize) -> Result<f64> {
    Ok(variance(data, ddof)?.sqrt())
}

/// Number of observations in a histogram.
///
/// # Errors
///
/// Returns [`BiometError::InvalidInput`] if the counts overflow `u64`.
pub fn histogram_total(counts: &[u64]) -> Result<u64> {
    counts
        .iter()
        .try_fold(0u64, |acc, &c| acc.checked_add(c))
        .ok_or_else(|| {
            BiometError::InvalidInput("histogram counts overflow a 64-bit total".into())
        })
}

/// Population mean and standard deviation of a score histogram.
///
/// `counts[v]` is the number of observations with score `v`, so each index
/// is weighted by its relative frequency.
pub fn histogram_moments(counts: &[u64]) -> Result<(f64, f64)> {
    let total = histogram_total(counts)?;
    if total == 0 {
        return Err(BiometError::InvalidInput(
            "histogram_moments: histogram holds no observations".into(),
        ));
    }
    let total = total as f64;

    let mean = counts
        .iter()
        .enumerate()
        .map(|(score, &c)| score as f64 * c as f64 / total)
        .sum::<f64>();
    let var = counts
        .iter()
        .enumerate()
        .map(|(score, &c)| (score as f64 - mean).powi(2) * c as f64 / total)
        .sum::<f64>();

    Ok((mean, var.sqrt()))
}

// ── Tests ──────────────────────────────────────────────────────────────────
