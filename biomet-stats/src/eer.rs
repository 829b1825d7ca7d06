//! Equal error rate.
//!
//! Real score distributions are discrete, so FMR and FNMR rarely meet at a
//! single observed threshold. Following the FVC2000 protocol (Maio et al.,
//! 2002) the EER is reported as an interval `[low, high]` taken at the
//! observed threshold nearest to the crossing, with `value` its midpoint.

use biomet_core::{Result, Summarizable};

use crate::rates::check_paired;

/// Equal error rate estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Eer {
    /// Curve row at which the interval was taken.
    pub index: usize,
    /// Lower bound: `min(fmr, fnmr)` at `index`.
    pub low: f64,
    /// Upper bound: `max(fmr, fnmr)` at `index`.
    pub high: f64,
    /// Midpoint of `[low, high]`.
    pub value: f64,
    /// `false` when the curves never crossed and the fields hold the
    /// maximal-error fallback.
    pub crossed: bool,
}

impl Eer {
    /// Result reported when FMR never falls to or below FNMR.
    pub const NO_CROSSING: Eer = Eer {
        index: 0,
        low: 1.0,
        high: 1.0,
        value: 1.0,
        crossed: false,
    };
}

impl Summarizable for Eer {
    fn summary(&self) -> String {
        if self.crossed {
            format!(
                "EER={:.6} [{:.6}, {:.6}] at row {}",
                self.value, self.low, self.high, self.index,
            )
        } else {
            "EER=1 (curves never cross)".to_string()
        }
    }
}

/// Locate the equal error rate on a rate curve.
///
/// Let `t2` be the first row where `fmr - fnmr <= 0`. When that difference
/// is strictly negative and `t2 > 0` the crossing lies between `t2 - 1` and
/// `t2`, and whichever of the two has the smaller `fmr + fnmr` is reported
/// (ties go to `t2 - 1`). Otherwise `t2` itself is reported.
///
/// If no such row exists, [`Eer::NO_CROSSING`] is returned.
///
/// # Errors
///
/// Returns an error if the arrays are empty or have different lengths.
pub fn get_eer(fmr: &[f64], fnmr: &[f64]) -> Result<Eer> {
    check_paired(fmr, fnmr, "get_eer")?;

    let Some(t2) = fmr.iter().zip(fnmr).position(|(fm, fnm)| fm - fnm <= 0.0) else {
        return Ok(Eer::NO_CROSSING);
    };
    let t1 = if fmr[t2] - fnmr[t2] != 0.0 && t2 != 0 {
        t2 - 1
    } else {
        t2
    };

    let index = if fmr[t1] + fnmr[t1] <= fmr[t2] + fnmr[t2] {
        t1
    } else {
        t2
    };
    let low = fmr[index].min(fnmr[index]);
    let high = fmr[index].max(fnmr[index]);

    Ok(Eer {
        index,
        low,
        high,
        value: (low + high) / 2.0,
        crossed: true,
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::{compute_rate_curve, ImpostorScores, Polarity};

    const TOL: f64 = 1e-12;

    #[test]
    fn separated_populations_have_zero_eer() {
        let curve = compute_rate_curve(
            &[0.9, 0.8, 0.95],
            ImpostorScores::Raw(&[0.1, 0.2, 0.15]),
            Polarity::Similarity,
        )
        .unwrap();
        let eer = get_eer(&curve.fmr, &curve.fnmr).unwrap();
        assert!(eer.crossed);
        assert_eq!(eer.index, 3);
        assert!(eer.value.abs() < TOL);
        assert!(eer.low.abs() < TOL && eer.high.abs() < TOL);
    }

    #[test]
    fn strict_crossing_picks_smaller_total() {
        // diff: 0.6, 0.2, -0.3 → t2 = 2, t1 = 1
        // totals: row1 = 0.6, row2 = 0.7 → row 1
        let fmr = [1.0, 0.4, 0.2];
        let fnmr = [0.4, 0.2, 0.5];
        let eer = get_eer(&fmr, &fnmr).unwrap();
        assert_eq!(eer.index, 1);
        assert!((eer.low - 0.2).abs() < TOL);
        assert!((eer.high - 0.4).abs() < TOL);
        assert!((eer.value - 0.3).abs() < TOL);
    }

    #[test]
    fn strict_crossing_prefers_later_row_when_smaller() {
        // totals: row1 = 0.9, row2 = 0.5 → row 2
        let fmr = [1.0, 0.6, 0.2];
        let fnmr = [0.0, 0.3, 0.3];
        let eer = get_eer(&fmr, &fnmr).unwrap();
        assert_eq!(eer.index, 2);
        assert!((eer.low - 0.2).abs() < TOL);
        assert!((eer.high - 0.3).abs() < TOL);
    }

    #[test]
    fn total_tie_goes_to_earlier_row() {
        let fmr = [1.0, 0.5, 0.1];
        let fnmr = [0.0, 0.1, 0.5];
        let eer = get_eer(&fmr, &fnmr).unwrap();
        assert_eq!(eer.index, 1);
    }

    #[test]
    fn crossing_at_first_row() {
        let fmr = [0.2, 0.1];
        let fnmr = [0.5, 0.9];
        let eer = get_eer(&fmr, &fnmr).unwrap();
        assert_eq!(eer.index, 0);
        assert!((eer.low - 0.2).abs() < TOL);
        assert!((eer.high - 0.5).abs() < TOL);
    }

    #[test]
    fn no_crossing_falls_back() {
        let fmr = [1.0, 0.9, 0.8];
        let fnmr = [0.0, 0.1, 0.2];
        let eer = get_eer(&fmr, &fnmr).unwrap();
        assert_eq!(eer, Eer::NO_CROSSING);
        assert!(!eer.crossed);
        assert!(eer.summary().contains("never cross"));
    }

    #[test]
    fn interval_is_ordered() {
        let curve = compute_rate_curve(
            &[3.0, 4.0, 5.0, 2.0, 6.0],
            ImpostorScores::Raw(&[1.0, 2.0, 3.0, 4.0, 2.5]),
            Polarity::Similarity,
        )
        .unwrap();
        let eer = get_eer(&curve.fmr, &curve.fnmr).unwrap();
        assert!(eer.low <= eer.value && eer.value <= eer.high);
    }

    #[test]
    fn mismatched_lengths() {
        assert!(get_eer(&[1.0, 0.0], &[0.0]).is_err());
        assert!(get_eer(&[], &[]).is_err());
    }
}
