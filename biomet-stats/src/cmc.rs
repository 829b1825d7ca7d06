//! Cumulative Match Characteristic curves for identification (1:N) systems.
//!
//! Each query is compared against a gallery of candidate identities.
//! [`build_ranked_matches`] orders every query's candidates from best to
//! worst match, and [`cmc_curve`] reports, for each rank `r`, the fraction of
//! queries whose true identity is among the top `r` candidates.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use biomet_core::{BiometError, Result, Summarizable};

use crate::diagnostics::{Diagnostic, LOW_RANK_ACCURACY};
use crate::rates::Polarity;

/// One query-versus-candidate comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub query: String,
    pub candidate: String,
    pub score: f64,
}

/// What to do with a query that has no ground-truth identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingTruthPolicy {
    /// Abort with [`BiometError::MissingTruth`].
    #[default]
    Fail,
    /// Leave the query out and count it in [`RankedMatches::skipped`].
    Skip,
}

/// A query's true identity and its candidates, best match first.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryMatches {
    pub true_identity: String,
    pub candidates: Vec<(String, f64)>,
}

impl QueryMatches {
    /// 1-based rank of the true identity, if it was compared at all.
    pub fn true_rank(&self) -> Option<usize> {
        self.candidates
            .iter()
            .position(|(id, _)| *id == self.true_identity)
            .map(|p| p + 1)
    }
}

/// Ranked candidate lists for every evaluated query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedMatches {
    /// Keyed by query id.
    pub queries: BTreeMap<String, QueryMatches>,
    /// Queries left out under [`MissingTruthPolicy::Skip`].
    pub skipped: usize,
}

impl RankedMatches {
    /// Number of evaluated queries.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Whether no query was evaluated.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Group comparisons by query and sort each query's candidates.
///
/// Candidates are ordered by descending score under similarity and ascending
/// score under dissimilarity. Equal scores are ordered by candidate id so the
/// result does not depend on input order.
///
/// Queries listed in `true_pairs` without any comparison are not included.
///
/// # Errors
///
/// With [`MissingTruthPolicy::Fail`], returns [`BiometError::MissingTruth`]
/// for the first query (in input order) that has no entry in `true_pairs`.
pub fn build_ranked_matches(
    comparisons: &[Comparison],
    true_pairs: &HashMap<String, String>,
    polarity: Polarity,
    policy: MissingTruthPolicy,
) -> Result<RankedMatches> {
    let mut queries: BTreeMap<String, QueryMatches> = BTreeMap::new();
    let mut missing: BTreeSet<&str> = BTreeSet::new();

    for cmp in comparisons {
        if let Some(entry) = queries.get_mut(&cmp.query) {
            entry.candidates.push((cmp.candidate.clone(), cmp.score));
            continue;
        }
        match true_pairs.get(&cmp.query) {
            Some(truth) => {
                queries.insert(
                    cmp.query.clone(),
                    QueryMatches {
                        true_identity: truth.clone(),
                        candidates: vec![(cmp.candidate.clone(), cmp.score)],
                    },
                );
            }
            None => match policy {
                MissingTruthPolicy::Fail => {
                    return Err(BiometError::MissingTruth(cmp.query.clone()))
                }
                MissingTruthPolicy::Skip => {
                    missing.insert(&cmp.query);
                }
            },
        }
    }

    for entry in queries.values_mut() {
        entry.candidates.sort_by(|a, b| {
            let by_score = match polarity {
                Polarity::Similarity => b.1.total_cmp(&a.1),
                Polarity::Dissimilarity => a.1.total_cmp(&b.1),
            };
            by_score.then_with(|| a.0.cmp(&b.0))
        });
    }

    Ok(RankedMatches {
        queries,
        skipped: missing.len(),
    })
}

/// Cumulative identification rate at ranks `1..=max_rank`.
///
/// Element `r - 1` is the fraction of queries whose true identity is among
/// their top `r` candidates, so the curve never decreases.
///
/// # Errors
///
/// Returns [`BiometError::InvalidInput`] if `max_rank` is zero, there are no
/// queries, or any query has fewer than `max_rank` candidates.
pub fn cmc_curve(ranked: &RankedMatches, max_rank: usize) -> Result<Vec<f64>> {
    if max_rank == 0 {
        return Err(BiometError::InvalidInput(
            "cmc_curve: max_rank must be at least 1".into(),
        ));
    }
    if ranked.is_empty() {
        return Err(BiometError::InvalidInput(
            "cmc_curve: no queries to evaluate".into(),
        ));
    }
    if let Some((query, q)) = ranked
        .queries
        .iter()
        .find(|(_, q)| q.candidates.len() < max_rank)
    {
        return Err(BiometError::InvalidInput(format!(
            "cmc_curve: max_rank {} exceeds the {} candidates of query '{}'",
            max_rank,
            q.candidates.len(),
            query,
        )));
    }

    // hits[r] = queries whose true identity sits exactly at rank r + 1
    let mut hits = vec![0usize; max_rank];
    for q in ranked.queries.values() {
        if let Some(rank) = q.true_rank().filter(|&r| r <= max_rank) {
            hits[rank - 1] += 1;
        }
    }

    let total = ranked.len() as f64;
    let mut found = 0usize;
    Ok(hits
        .into_iter()
        .map(|h| {
            found += h;
            found as f64 / total
        })
        .collect())
}

/// CMC result for one identification experiment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CmcStats {
    pub exp_id: String,
    /// Identification rate at ranks `1..=ranks.len()`.
    pub ranks: Vec<f64>,
    /// Queries in the denominator.
    pub queries: usize,
    /// Queries dropped for lack of ground truth.
    pub skipped: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl CmcStats {
    /// Compute the CMC curve of `ranked` up to `max_rank`.
    pub fn compute(exp_id: impl Into<String>, ranked: &RankedMatches, max_rank: usize) -> Result<Self> {
        let ranks = cmc_curve(ranked, max_rank)?;
        let mut diagnostics = Vec::new();
        if let Some(&last) = ranks.last() {
            if last < LOW_RANK_ACCURACY {
                diagnostics.push(Diagnostic::LowRankAccuracy { accuracy: last });
            }
        }
        Ok(Self {
            exp_id: exp_id.into(),
            ranks,
            queries: ranked.len(),
            skipped: ranked.skipped,
            diagnostics,
        })
    }

    /// Identification rate at 1-based `rank`.
    pub fn rank(&self, rank: usize) -> Option<f64> {
        rank.checked_sub(1).and_then(|i| self.ranks.get(i).copied())
    }
}

impl Summarizable for CmcStats {
    fn summary(&self) -> String {
        format!(
            "{}: rank-1={:.4}, rank-{}={:.4}, queries={}",
            self.exp_id,
            self.ranks.first().copied().unwrap_or(0.0),
            self.ranks.len(),
            self.ranks.last().copied().unwrap_or(0.0),
            self.queries,
        )
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
