//! Named operating points on a rate curve.
//!
//! An FMR operating point reports the FNMR at the row whose FMR is closest to
//! a target (ZeroFMR, FMR1000, ...); an FNMR operating point does the reverse.
//!
//! The two lookups break ties differently, and reports built on them rely on
//! it:
//!
//! - [`get_fmr_operating_point`] takes the **first** row closest to the target.
//! - [`get_fnmr_operating_point`] takes the **last** row closest to the target,
//!   i.e. the strictest threshold and so the lowest FMR among exact ties.

use biomet_core::Result;

use crate::rates::{check_paired, RateCurve};

/// FMR targets reported by default: ZeroFMR, FMR1000, FMR100, FMR20, FMR10.
pub const DEFAULT_FMR_TARGETS: [f64; 5] = [0.0, 0.001, 0.01, 0.05, 0.1];

/// One rate looked up at the row where the other rate is closest to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperatingPoint {
    /// Requested value of the searched rate.
    pub target: f64,
    /// Curve row that was selected.
    pub index: usize,
    /// Value of the opposite rate at `index`.
    pub value: f64,
    /// Threshold at `index`.
    pub threshold: f64,
}

/// Row minimising `|fmr - target|` (first on ties) and the FNMR there.
///
/// # Errors
///
/// Returns an error if the arrays are empty or have different lengths.
pub fn get_fmr_operating_point(fmr: &[f64], fnmr: &[f64], target: f64) -> Result<(usize, f64)> {
    check_paired(fmr, fnmr, "get_fmr_operating_point")?;
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &r) in fmr.iter().enumerate() {
        let dist = (r - target).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    Ok((best, fnmr[best]))
}

/// Row minimising `|fnmr - target|` (last on ties) and the FMR there.
///
/// # Errors
///
/// Returns an error if the arrays are empty or have different lengths.
pub fn get_fnmr_operating_point(fmr: &[f64], fnmr: &[f64], target: f64) -> Result<(usize, f64)> {
    check_paired(fmr, fnmr, "get_fnmr_operating_point")?;
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &r) in fnmr.iter().enumerate() {
        let dist = (r - target).abs();
        if dist <= best_dist {
            best = i;
            best_dist = dist;
        }
    }
    Ok((best, fmr[best]))
}

/// FMR operating point of `curve`, with its threshold.
pub fn fmr_operating_point(curve: &RateCurve, target: f64) -> Result<OperatingPoint> {
    let (index, value) = get_fmr_operating_point(&curve.fmr, &curve.fnmr, target)?;
    Ok(OperatingPoint {
        target,
        index,
        value,
        threshold: curve.threshold(index),
    })
}

/// FNMR operating point of `curve`, with its threshold.
pub fn fnmr_operating_point(curve: &RateCurve, target: f64) -> Result<OperatingPoint> {
    let (index, value) = get_fnmr_operating_point(&curve.fmr, &curve.fnmr, target)?;
    Ok(OperatingPoint {
        target,
        index,
        value,
        threshold: curve.threshold(index),
    })
}

/// Report label for an FMR target: `ZeroFMR` for 0, otherwise `FMR<1/target>`.
///
/// ```
/// use biomet_stats::operating_point::fmr_label;
/// assert_eq!(fmr_label(0.0), "ZeroFMR");
/// assert_eq!(fmr_label(0.001), "FMR1000");
/// assert_eq!(fmr_label(0.05), "FMR20");
/// ```
pub fn fmr_label(target: f64) -> String {
    if target <= 0.0 {
        "ZeroFMR".to_string()
    } else {
        format!("FMR{}", (1.0 / target).round() as u64)
    }
}

/// The table of operating points computed for one experiment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperatingPoints {
    /// One entry per configured FMR target, in configuration order.
    pub fmr: Vec<OperatingPoint>,
    /// Lowest FMR at which no genuine comparison is rejected.
    pub zero_fnmr: OperatingPoint,
}

impl OperatingPoints {
    /// Compute the table for `curve` at each of `fmr_targets` plus ZeroFNMR.
    pub fn compute(curve: &RateCurve, fmr_targets: &[f64]) -> Result<Self> {
        let fmr = fmr_targets
            .iter()
            .map(|&t| fmr_operating_point(curve, t))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            fmr,
            zero_fnmr: fnmr_operating_point(curve, 0.0)?,
        })
    }

    /// The FMR operating point for `target`, if it was configured.
    pub fn at_fmr(&self, target: f64) -> Option<&OperatingPoint> {
        self.fmr.iter().find(|op| op.target == target)
    }

    /// The ZeroFMR operating point, if a zero target was configured.
    pub fn zero_fmr(&self) -> Option<&OperatingPoint> {
        self.at_fmr(0.0)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
