//! Advisory findings raised while computing statistics.
//!
//! None of these stop a computation. Each one travels with the result it
//! describes so callers can log it, surface it in a report, or branch on
//! [`Diagnostic::code`].

use std::fmt;

/// CMC accuracy at the deepest rank below which a polarity mismatch is suspected.
pub const LOW_RANK_ACCURACY: f64 = 0.2;

/// A non-fatal finding about a computed result.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "code", rename_all = "snake_case")
)]
pub enum Diagnostic {
    /// FMR never dropped to or below FNMR, so the EER fields hold the
    /// maximal-error fallback rather than a measured value.
    NoErrorCrossing,
    /// The ROC area is below chance level.
    AucBelowHalf { auc: f64 },
    /// The CMC curve ends below [`LOW_RANK_ACCURACY`].
    LowRankAccuracy { accuracy: f64 },
}

impl Diagnostic {
    /// Stable machine-readable identifier.
    pub fn code(&self) -> &'static str {
        match self {
            Diagnostic::NoErrorCrossing => "no_error_crossing",
            Diagnostic::AucBelowHalf { .. } => "auc_below_half",
            Diagnostic::LowRankAccuracy { .. } => "low_rank_accuracy",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NoErrorCrossing => write!(
                f,
                "FMR and FNMR curves never cross; EER reported as 1 \
                 (are these dissimilarity scores?)"
            ),
            Diagnostic::AucBelowHalf { auc } => write!(
                f,
                "area under the ROC curve is {auc:.4} (< 0.5); \
                 check the score polarity"
            ),
            Diagnostic::LowRankAccuracy { accuracy } => write!(
                f,
                "CMC accuracy at the deepest rank is {accuracy:.4} (< {LOW_RANK_ACCURACY}); \
                 check the score polarity"
            ),
        }
    }
}
