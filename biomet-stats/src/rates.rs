//! False match / false non-match rate curves.
//!
//! [`compute_rate_curve`] turns a genuine and an impostor score population
//! into a [`RateCurve`]: one row per distinguishable decision threshold with
//! the FMR and FNMR obtained when accepting at that threshold.
//!
//! Rows are always stored in *acceptance order*: row 0 accepts every
//! comparison (FMR = 1, FNMR = 0) and each following row is stricter, so FMR
//! never increases and FNMR never decreases along the row index. Under
//! [`Polarity::Similarity`] that means ascending thresholds; under
//! [`Polarity::Dissimilarity`] the threshold column descends.

use biomet_core::{BiometError, Result};

use crate::descriptive::histogram_total;

/// Largest genuine score accepted in histogram mode; one curve row is built
/// per integer up to the maximum score.
pub const MAX_HISTOGRAM_SCORE: f64 = 16_777_216.0;

/// Direction in which a score indicates a better match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Polarity {
    /// Higher is better; accept when `score >= threshold`.
    #[default]
    Similarity,
    /// Lower is better; accept when `score <= threshold`.
    Dissimilarity,
}

impl Polarity {
    /// Whether a comparison with `score` is declared a match at `threshold`.
    #[inline]
    pub fn accepts(self, score: f64, threshold: f64) -> bool {
        match self {
            Polarity::Similarity => score >= threshold,
            Polarity::Dissimilarity => score <= threshold,
        }
    }

    /// Factor that maps scores of this polarity onto similarity scores.
    #[inline]
    fn sign(self) -> f64 {
        match self {
            Polarity::Similarity => 1.0,
            Polarity::Dissimilarity => -1.0,
        }
    }
}

/// An impostor population, either one score per comparison or aggregated
/// counts indexed by integer score.
#[derive(Debug, Clone, Copy)]
pub enum ImpostorScores<'a> {
    /// One score per comparison.
    Raw(&'a [f64]),
    /// `counts[v]` comparisons produced score `v`.
    Histogram(&'a [u64]),
}

impl ImpostorScores<'_> {
    /// Number of impostor comparisons represented.
    ///
    /// # Errors
    ///
    /// Returns [`BiometError::InvalidInput`] if histogram counts overflow.
    pub fn comparisons(&self) -> Result<u64> {
        match self {
            ImpostorScores::Raw(scores) => Ok(scores.len() as u64),
            ImpostorScores::Histogram(counts) => histogram_total(counts),
        }
    }
}

/// Error rates at every distinguishable threshold.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateCurve {
    /// Threshold of each row, in acceptance order.
    pub thresholds: Vec<f64>,
    /// False match rate per row.
    pub fmr: Vec<f64>,
    /// False non-match rate per row.
    pub fnmr: Vec<f64>,
    /// Impostor comparisons accepted per row.
    pub false_matches: Vec<u64>,
    /// Genuine comparisons rejected per row.
    pub false_non_matches: Vec<u64>,
    /// Size of the genuine population.
    pub genuine_count: u64,
    /// Size of the impostor population.
    pub impostor_count: u64,
    /// Polarity the thresholds are expressed in.
    pub polarity: Polarity,
}

impl RateCurve {
    fn with_capacity(
        capacity: usize,
        genuine_count: u64,
        impostor_count: u64,
        polarity: Polarity,
    ) -> Self {
        Self {
            thresholds: Vec::with_capacity(capacity),
            fmr: Vec::with_capacity(capacity),
            fnmr: Vec::with_capacity(capacity),
            false_matches: Vec::with_capacity(capacity),
            false_non_matches: Vec::with_capacity(capacity),
            genuine_count,
            impostor_count,
            polarity,
        }
    }

    fn push(&mut self, threshold: f64, false_matches: u64, false_non_matches: u64) {
        self.thresholds.push(threshold);
        self.fmr
            .push(false_matches as f64 / self.impostor_count as f64);
        self.fnmr
            .push(false_non_matches as f64 / self.genuine_count as f64);
        self.false_matches.push(false_matches);
        self.false_non_matches.push(false_non_matches);
    }

    fn reverse(&mut self) {
        self.thresholds.reverse();
        self.fmr.reverse();
        self.fnmr.reverse();
        self.false_matches.reverse();
        self.false_non_matches.reverse();
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    /// Whether the curve has no rows.
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Threshold at `index`, or NaN when out of range.
    pub fn threshold(&self, index: usize) -> f64 {
        self.thresholds.get(index).copied().unwrap_or(f64::NAN)
    }
}

/// Compute the FMR/FNMR curve for a genuine and an impostor population.
///
/// With [`ImpostorScores::Raw`] every unique score in the merged population
/// becomes a threshold. The lowest one (highest under dissimilarity) already
/// accepts everything, so it doubles as the accept-all row.
///
/// With [`ImpostorScores::Histogram`] the thresholds are the integers
/// `0..=max(max(genuine), counts.len())`, and the genuine scores must be
/// non-negative integers.
///
/// # Errors
///
/// Returns [`BiometError::InvalidInput`] if either population is empty,
/// a score is not finite, histogram counts overflow, or histogram mode
/// receives genuine scores that are not integers in
/// `0..=`[`MAX_HISTOGRAM_SCORE`].
pub fn compute_rate_curve(
    genuine: &[f64],
    impostor: ImpostorScores<'_>,
    polarity: Polarity,
) -> Result<RateCurve> {
    if genuine.is_empty() {
        return Err(BiometError::InvalidInput(
            "rate curve: genuine population must not be empty".into(),
        ));
    }
    check_finite(genuine, "genuine")?;
    let impostor_count = impostor.comparisons()?;
    if impostor_count == 0 {
        return Err(BiometError::InvalidInput(
            "rate curve: impostor population must hold at least one comparison".into(),
        ));
    }

    match impostor {
        ImpostorScores::Raw(scores) => {
            check_finite(scores, "impostor")?;
            Ok(raw_curve(genuine, scores, polarity))
        }
        ImpostorScores::Histogram(counts) => {
            histogram_curve(genuine, counts, impostor_count, polarity)
        }
    }
}

/// Sort-and-accumulate over the merged, labelled population.
fn raw_curve(genuine: &[f64], impostor: &[f64], polarity: Polarity) -> RateCurve {
    let sign = polarity.sign();
    // `+ 0.0` folds -0.0 into 0.0 after negation.
    let mut labelled: Vec<(f64, bool)> = genuine
        .iter()
        .map(|&s| (s * sign + 0.0, true))
        .chain(impostor.iter().map(|&s| (s * sign + 0.0, false)))
        .collect();
    labelled.sort_by(|a, b| a.0.total_cmp(&b.0));

    let impostor_count = impostor.len() as u64;
    let mut curve = RateCurve::with_capacity(
        labelled.len(),
        genuine.len() as u64,
        impostor_count,
        polarity,
    );

    let mut genuine_below = 0u64;
    let mut seen = 0u64;
    let mut i = 0;
    while i < labelled.len() {
        let t = labelled[i].0;
        // Everything before the first occurrence of `t` is rejected at `t`.
        let impostor_below = seen - genuine_below;
        curve.push(t * sign + 0.0, impostor_count - impostor_below, genuine_below);

        while i < labelled.len() && labelled[i].0 == t {
            if labelled[i].1 {
                genuine_below += 1;
            }
            seen += 1;
            i += 1;
        }
    }

    curve
}

/// Integer thresholds over a cumulative impostor histogram.
fn histogram_curve(
    genuine: &[f64],
    counts: &[u64],
    impostor_count: u64,
    polarity: Polarity,
) -> Result<RateCurve> {
    if let Some(bad) = genuine
        .iter()
        .find(|&&s| s < 0.0 || s.fract() != 0.0 || s > MAX_HISTOGRAM_SCORE)
    {
        return Err(BiometError::InvalidInput(format!(
            "rate curve: histogram mode needs integer genuine scores in 0..={} (got {})",
            MAX_HISTOGRAM_SCORE, bad,
        )));
    }

    let mut sorted = genuine.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let genuine_count = sorted.len() as u64;
    let max_genuine = sorted[sorted.len() - 1] as usize;
    let max_threshold = max_genuine.max(counts.len());

    // cumulative[v] = impostor comparisons scoring <= v
    let cumulative: Vec<u64> = counts
        .iter()
        .scan(0u64, |acc, &c| {
            *acc += c;
            Some(*acc)
        })
        .collect();
    let at_or_below = |v: usize| cumulative[v.min(cumulative.len() - 1)];

    let mut curve =
        RateCurve::with_capacity(max_threshold + 1, genuine_count, impostor_count, polarity);

    for t in 0..=max_threshold {
        let tf = t as f64;
        let (fm, fnm) = match polarity {
            Polarity::Similarity => {
                let rejected = if t == 0 { 0 } else { at_or_below(t - 1) };
                let genuine_rejected = sorted.partition_point(|&s| s < tf) as u64;
                (impostor_count - rejected, genuine_rejected)
            }
            Polarity::Dissimilarity => {
                let genuine_accepted = sorted.partition_point(|&s| s <= tf) as u64;
                (at_or_below(t), genuine_count - genuine_accepted)
            }
        };
        curve.push(tf, fm, fnm);
    }

    if polarity == Polarity::Dissimilarity {
        curve.reverse();
    }

    Ok(curve)
}

/// Evaluate the error rates of raw populations on a caller-chosen threshold grid.
///
/// The grid is sorted into acceptance order and deduplicated. Use
/// [`step_thresholds`] to build an evenly spaced grid.
///
/// # Errors
///
/// Returns [`BiometError::InvalidInput`] if a population or the grid is
/// empty, or any value is not finite.
pub fn rate_curve_at_thresholds(
    genuine: &[f64],
    impostor: &[f64],
    polarity: Polarity,
    thresholds: &[f64],
) -> Result<RateCurve> {
    if genuine.is_empty() || impostor.is_empty() {
        return Err(BiometError::InvalidInput(
            "rate curve: score populations must not be empty".into(),
        ));
    }
    if thresholds.is_empty() {
        return Err(BiometError::InvalidInput(
            "rate curve: threshold grid must not be empty".into(),
        ));
    }
    check_finite(genuine, "genuine")?;
    check_finite(impostor, "impostor")?;
    check_finite(thresholds, "threshold")?;

    let mut gen_sorted = genuine.to_vec();
    gen_sorted.sort_by(|a, b| a.total_cmp(b));
    let mut imp_sorted = impostor.to_vec();
    imp_sorted.sort_by(|a, b| a.total_cmp(b));

    let mut grid = thresholds.to_vec();
    match polarity {
        Polarity::Similarity => grid.sort_by(|a, b| a.total_cmp(b)),
        Polarity::Dissimilarity => grid.sort_by(|a, b| b.total_cmp(a)),
    }
    grid.dedup();

    let genuine_count = gen_sorted.len() as u64;
    let impostor_count = imp_sorted.len() as u64;
    let mut curve = RateCurve::with_capacity(grid.len(), genuine_count, impostor_count, polarity);

    for &t in &grid {
        // Ascending scores: the accepted ones form a suffix under similarity
        // and a prefix under dissimilarity.
        let accepted = |sorted: &[f64]| -> u64 {
            let n = match polarity {
                Polarity::Similarity => {
                    sorted.len() - sorted.partition_point(|&s| !polarity.accepts(s, t))
                }
                Polarity::Dissimilarity => sorted.partition_point(|&s| polarity.accepts(s, t)),
            };
            n as u64
        };
        let fm = accepted(&imp_sorted[..]);
        let fnm = genuine_count - accepted(&gen_sorted[..]);
        curve.push(t, fm, fnm);
    }

    Ok(curve)
}

/// Evenly spaced thresholds from `start` every `step`, ending with `stop`.
///
/// When `stop - start` is not a multiple of `step`, `stop` is appended after
/// the last full step.
///
/// # Errors
///
/// Returns [`BiometError::InvalidInput`] if `step` is not a positive finite
/// number or `stop < start`.
pub fn step_thresholds(start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
    if !(step.is_finite() && step > 0.0) {
        return Err(BiometError::InvalidInput(format!(
            "step_thresholds: step must be positive and finite (got {})",
            step,
        )));
    }
    if !(start.is_finite() && stop.is_finite()) || stop < start {
        return Err(BiometError::InvalidInput(format!(
            "step_thresholds: invalid range [{}, {}]",
            start, stop,
        )));
    }
    let steps = ((stop - start) / step + 1e-9).floor() as usize;
    let mut grid: Vec<f64> = (0..=steps).map(|k| start + k as f64 * step).collect();
    // Both ends are thresholds, so the grid always holds the accept-all and
    // reject-all rows of the observed range.
    if grid.last().is_some_and(|&last| stop - last > step * 1e-9) {
        grid.push(stop);
    }
    Ok(grid)
}

/// Check that two rate arrays are non-empty and of equal length.
pub(crate) fn check_paired(fmr: &[f64], fnmr: &[f64], caller: &str) -> Result<()> {
    if fmr.is_empty() {
        return Err(BiometError::InvalidInput(format!(
            "{}: rate arrays must not be empty",
            caller,
        )));
    }
    if fmr.len() != fnmr.len() {
        return Err(BiometError::InvalidInput(format!(
            "{}: fmr length {} != fnmr length {}",
            caller,
            fmr.len(),
            fnmr.len(),
        )));
    }
    Ok(())
}

fn check_finite(scores: &[f64], what: &str) -> Result<()> {
    match scores.iter().position(|s| !s.is_finite()) {
        Some(i) => Err(BiometError::InvalidInput(format!(
            "rate curve: {} value at index {} is not finite: {}",
            what, i, scores[i],
        ))),
        None => Ok(()),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn assert_rates(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < TOL, "{:?} vs {:?}", actual, expected);
        }
    }

    #[test]
    fn raw_separated_populations() {
        let genuine = [0.9, 0.8, 0.95];
        let impostor = [0.1, 0.2, 0.15];
        let curve =
            compute_rate_curve(&genuine, ImpostorScores::Raw(&impostor), Polarity::Similarity)
                .unwrap();
        assert_rates(&curve.thresholds, &[0.1, 0.15, 0.2, 0.8, 0.9, 0.95]);
        assert_rates(&curve.fmr, &[1.0, 2.0 / 3.0, 1.0 / 3.0, 0.0, 0.0, 0.0]);
        assert_rates(&curve.fnmr, &[0.0, 0.0, 0.0, 0.0, 1.0 / 3.0, 2.0 / 3.0]);
        assert_eq!(curve.false_matches, vec![3, 2, 1, 0, 0, 0]);
        assert_eq!(curve.false_non_matches, vec![0, 0, 0, 0, 1, 2]);
    }

    #[test]
    fn raw_ties_are_grouped() {
        let genuine = [2.0, 3.0, 3.0];
        let impostor = [1.0, 2.0, 2.0, 3.0];
        let curve =
            compute_rate_curve(&genuine, ImpostorScores::Raw(&impostor), Polarity::Similarity)
                .unwrap();
        assert_rates(&curve.thresholds, &[1.0, 2.0, 3.0]);
        // t=2: impostors >= 2 are {2,2,3}; genuine < 2 none
        // t=3: impostors >= 3 are {3};     genuine < 3 is {2}
        assert_eq!(curve.false_matches, vec![4, 3, 1]);
        assert_eq!(curve.false_non_matches, vec![0, 0, 1]);
    }

    #[test]
    fn raw_dissimilarity_mirrors_negated_similarity() {
        let genuine = [0.1, 0.2, 0.05];
        let impostor = [0.9, 0.7, 0.8];
        let ds = compute_rate_curve(
            &genuine,
            ImpostorScores::Raw(&impostor),
            Polarity::Dissimilarity,
        )
        .unwrap();

        let neg_g: Vec<f64> = genuine.iter().map(|s| -s).collect();
        let neg_i: Vec<f64> = impostor.iter().map(|s| -s).collect();
        let sim =
            compute_rate_curve(&neg_g, ImpostorScores::Raw(&neg_i), Polarity::Similarity).unwrap();

        assert_rates(&ds.fmr, &sim.fmr);
        assert_rates(&ds.fnmr, &sim.fnmr);
        let back: Vec<f64> = sim.thresholds.iter().map(|t| -t).collect();
        assert_rates(&ds.thresholds, &back);
        // Descending threshold column, accept-all first.
        assert!(ds.thresholds.windows(2).all(|w| w[0] > w[1]));
        assert!((ds.fmr[0] - 1.0).abs() < TOL);
        assert!(ds.fnmr[0].abs() < TOL);
    }

    #[test]
    fn dissimilarity_fmr_rises_with_threshold_value() {
        let genuine = [1.0, 2.0, 4.0];
        let impostor = [3.0, 5.0, 6.0, 2.5];
        let curve = compute_rate_curve(
            &genuine,
            ImpostorScores::Raw(&impostor),
            Polarity::Dissimilarity,
        )
        .unwrap();
        let mut rows: Vec<(f64, f64, f64)> = (0..curve.len())
            .map(|i| (curve.thresholds[i], curve.fmr[i], curve.fnmr[i]))
            .collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        for w in rows.windows(2) {
            assert!(w[1].1 >= w[0].1);
            assert!(w[1].2 <= w[0].2);
        }
        for (i, &t) in curve.thresholds.iter().enumerate() {
            let fm = impostor
                .iter()
                .filter(|&&s| Polarity::Dissimilarity.accepts(s, t))
                .count();
            assert_eq!(curve.false_matches[i], fm as u64);
        }
    }

    #[test]
    fn histogram_hand_computed_table() {
        let genuine = [0.0, 1.0, 2.0];
        let counts = [1, 1, 1, 1];
        let curve =
            compute_rate_curve(&genuine, ImpostorScores::Histogram(&counts), Polarity::Similarity)
                .unwrap();
        assert_rates(&curve.thresholds, &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_rates(&curve.fmr, &[1.0, 0.75, 0.5, 0.25, 0.0]);
        assert_rates(&curve.fnmr, &[0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0, 1.0]);
    }

    #[test]
    fn histogram_agrees_with_raw_at_integer_thresholds() {
        let genuine = [2.0, 3.0, 1.0];
        let raw_impostor = [1.0, 1.0, 2.0, 3.0, 3.0, 3.0];
        let hist_impostor = [0, 2, 1, 3];

        for polarity in [Polarity::Similarity, Polarity::Dissimilarity] {
            let raw =
                compute_rate_curve(&genuine, ImpostorScores::Raw(&raw_impostor), polarity).unwrap();
            let hist =
                compute_rate_curve(&genuine, ImpostorScores::Histogram(&hist_impostor), polarity)
                    .unwrap();
            for (i, &t) in raw.thresholds.iter().enumerate() {
                let j = hist
                    .thresholds
                    .iter()
                    .position(|&h| h == t)
                    .expect("integer threshold present in histogram grid");
                assert!((raw.fmr[i] - hist.fmr[j]).abs() < TOL, "{polarity:?} fmr at {t}");
                assert!((raw.fnmr[i] - hist.fnmr[j]).abs() < TOL, "{polarity:?} fnmr at {t}");
            }
        }
    }

    #[test]
    fn histogram_dissimilarity_in_acceptance_order() {
        let genuine = [0.0, 1.0];
        let counts = [0, 0, 2, 2];
        let curve = compute_rate_curve(
            &genuine,
            ImpostorScores::Histogram(&counts),
            Polarity::Dissimilarity,
        )
        .unwrap();
        assert_rates(&curve.thresholds, &[4.0, 3.0, 2.0, 1.0, 0.0]);
        assert_rates(&curve.fmr, &[1.0, 1.0, 0.5, 0.0, 0.0]);
        assert_rates(&curve.fnmr, &[0.0, 0.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn histogram_rejects_fractional_genuine() {
        let err = compute_rate_curve(
            &[1.5, 2.0],
            ImpostorScores::Histogram(&[1, 2]),
            Polarity::Similarity,
        );
        assert!(matches!(err, Err(BiometError::InvalidInput(_))));
        let err = compute_rate_curve(
            &[-1.0],
            ImpostorScores::Histogram(&[1, 2]),
            Polarity::Similarity,
        );
        assert!(err.is_err());
    }

    #[test]
    fn empty_populations_rejected() {
        assert!(compute_rate_curve(&[], ImpostorScores::Raw(&[1.0]), Polarity::Similarity).is_err());
        assert!(compute_rate_curve(&[1.0], ImpostorScores::Raw(&[]), Polarity::Similarity).is_err());
        assert!(
            compute_rate_curve(&[1.0], ImpostorScores::Histogram(&[]), Polarity::Similarity)
                .is_err()
        );
        assert!(
            compute_rate_curve(&[1.0], ImpostorScores::Histogram(&[0, 0]), Polarity::Similarity)
                .is_err()
        );
    }

    #[test]
    fn non_finite_rejected() {
        assert!(compute_rate_curve(
            &[f64::NAN],
            ImpostorScores::Raw(&[1.0]),
            Polarity::Similarity
        )
        .is_err());
    }

    #[test]
    fn grid_matches_exact_curve_on_observed_scores() {
        let genuine = [0.6, 0.7, 0.9, 0.4];
        let impostor = [0.1, 0.5, 0.3, 0.6];
        let exact =
            compute_rate_curve(&genuine, ImpostorScores::Raw(&impostor), Polarity::Similarity)
                .unwrap();
        let grid = rate_curve_at_thresholds(
            &genuine,
            &impostor,
            Polarity::Similarity,
            &exact.thresholds,
        )
        .unwrap();
        assert_rates(&grid.fmr, &exact.fmr);
        assert_rates(&grid.fnmr, &exact.fnmr);
    }

    #[test]
    fn grid_dissimilarity_descends() {
        let grid = rate_curve_at_thresholds(
            &[0.1, 0.2],
            &[0.8, 0.9],
            Polarity::Dissimilarity,
            &[0.0, 0.5, 1.0, 0.5],
        )
        .unwrap();
        assert_rates(&grid.thresholds, &[1.0, 0.5, 0.0]);
        assert_rates(&grid.fmr, &[1.0, 0.0, 0.0]);
        assert_rates(&grid.fnmr, &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn step_grid_inclusive() {
        let grid = step_thresholds(0.0, 1.0, 0.25).unwrap();
        assert_rates(&grid, &[0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(step_thresholds(0.0, 1.0, 0.0).is_err());
        assert!(step_thresholds(1.0, 0.0, 0.1).is_err());
    }

    #[test]
    fn step_grid_keeps_upper_end() {
        let grid = step_thresholds(0.1, 1.0, 0.4).unwrap();
        assert_rates(&grid, &[0.1, 0.5, 0.9, 1.0]);
        assert_eq!(step_thresholds(0.5, 0.5, 0.1).unwrap(), vec![0.5]);
    }

    #[test]
    fn uneven_step_grid_starts_accept_all() {
        let genuine = [0.1, 0.2];
        let impostor = [0.5, 1.0];
        let grid = step_thresholds(0.1, 1.0, 0.4).unwrap();
        for polarity in [Polarity::Similarity, Polarity::Dissimilarity] {
            let curve = rate_curve_at_thresholds(&genuine, &impostor, polarity, &grid).unwrap();
            assert_eq!(curve.fmr[0], 1.0, "{polarity:?}");
            assert_eq!(curve.fnmr[0], 0.0, "{polarity:?}");
        }
        let curve =
            rate_curve_at_thresholds(&genuine, &impostor, Polarity::Dissimilarity, &grid).unwrap();
        assert_rates(&curve.thresholds, &[1.0, 0.9, 0.5, 0.1]);
        assert_rates(&curve.fmr, &[1.0, 0.5, 0.5, 0.0]);
    }

    #[test]
    fn histogram_overflow_is_rejected() {
        let err = compute_rate_curve(
            &[1.0],
            ImpostorScores::Histogram(&[u64::MAX, 1]),
            Polarity::Similarity,
        );
        assert!(matches!(err, Err(BiometError::InvalidInput(_))));
        assert!(ImpostorScores::Histogram(&[u64::MAX, 1]).comparisons().is_err());
        assert_eq!(ImpostorScores::Histogram(&[2, 3]).comparisons().unwrap(), 5);
        assert_eq!(ImpostorScores::Raw(&[0.1, 0.2]).comparisons().unwrap(), 2);
    }

    #[test]
    fn histogram_score_above_cap_is_rejected() {
        let err = compute_rate_curve(
            &[MAX_HISTOGRAM_SCORE * 4.0],
            ImpostorScores::Histogram(&[1, 1]),
            Polarity::Similarity,
        );
        assert!(matches!(err, Err(BiometError::InvalidInput(_))));
    }

    #[test]
    fn polarity_accepts() {
        assert!(Polarity::Similarity.accepts(0.5, 0.5));
        assert!(!Polarity::Similarity.accepts(0.4, 0.5));
        assert!(Polarity::Dissimilarity.accepts(0.4, 0.5));
        assert!(!Polarity::Dissimilarity.accepts(0.6, 0.5));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn population(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec((0..200i32).prop_map(|v| v as f64 / 10.0), 1..=max_len)
    }

    proptest! {
        #[test]
        fn rates_bounded_and_monotonic(
            genuine in population(60),
            impostor in population(60),
            dissimilar in any::<bool>(),
        ) {
            let polarity = if dissimilar { Polarity::Dissimilarity } else { Polarity::Similarity };
            let curve = compute_rate_curve(&genuine, ImpostorScores::Raw(&impostor), polarity).unwrap();
            prop_assert!(curve.fmr.iter().chain(&curve.fnmr).all(|r| (0.0..=1.0).contains(r)));
            prop_assert!(curve.fmr.windows(2).all(|w| w[1] <= w[0]));
            prop_assert!(curve.fnmr.windows(2).all(|w| w[1] >= w[0]));
            prop_assert_eq!(curve.fmr[0], 1.0);
            prop_assert_eq!(curve.fnmr[0], 0.0);
        }

        #[test]
        fn histogram_bounded_and_monotonic(
            genuine in proptest::collection::vec(0..30u32, 1..40),
            counts in proptest::collection::vec(0..20u64, 1..30),
        ) {
            prop_assume!(counts.iter().sum::<u64>() > 0);
            let genuine: Vec<f64> = genuine.into_iter().map(f64::from).collect();
            let curve = compute_rate_curve(
                &genuine,
                ImpostorScores::Histogram(&counts),
                Polarity::Similarity,
            ).unwrap();
            prop_assert!(curve.fmr.windows(2).all(|w| w[1] <= w[0]));
            prop_assert!(curve.fnmr.windows(2).all(|w| w[1] >= w[0]));
            prop_assert_eq!(curve.fmr[curve.len() - 1], 0.0);
        }
    }
}
