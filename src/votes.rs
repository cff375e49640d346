//! Vote aggregation
//!
//! The API hands back a raw log of individual vote events with arbitrary
//! magnitudes. The tally normalizes each event to its sign, so a single
//! upvote and a `value: 10` vote weigh the same.

use std::collections::HashMap;

use crate::model::Vote;

/// The API never returns more than this many votes in one page.
///
/// A response of exactly this length is a hint (not a guarantee) that the
/// log was cut off and the tally may undercount.
pub const VOTE_PAGE_LIMIT: usize = 100;

/// Net score per image, derived from the raw vote log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTally {
    scores: HashMap<String, i64>,
    truncated: bool,
}

impl VoteTally {
    /// Reduce a vote log into net scores
    ///
    /// Each event contributes `value.signum()` to its image's score. Images
    /// with no events get no entry; [`score`](Self::score) treats a missing
    /// entry as zero.
    pub fn from_votes(votes: &[Vote]) -> Self {
        let mut scores: HashMap<String, i64> = HashMap::new();
        for vote in votes {
            *scores.entry(vote.image_id.clone()).or_insert(0) += vote.value.signum();
        }

        Self {
            scores,
            truncated: votes.len() == VOTE_PAGE_LIMIT,
        }
    }

    /// Net score for an image, zero when it has no recorded votes
    pub fn score(&self, image_id: &str) -> i64 {
        self.scores.get(image_id).copied().unwrap_or(0)
    }

    /// Whether the image has an entry at all
    pub fn contains(&self, image_id: &str) -> bool {
        self.scores.contains_key(image_id)
    }

    /// True when the source log hit the page ceiling and may be incomplete
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Apply a provisional signed delta for an in-flight vote
    ///
    /// Overwritten by the authoritative aggregate on the next re-fetch.
    pub fn apply_delta(&mut self, image_id: &str, delta: i64) {
        *self.scores.entry(image_id.to_string()).or_insert(0) += delta;
    }

    /// Scores sorted by image id, for stable display
    pub fn entries(&self) -> Vec<(&str, i64)> {
        let mut entries: Vec<(&str, i64)> = self
            .scores
            .iter()
            .map(|(id, score)| (id.as_str(), *score))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Render a score with an explicit sign, e.g. `+2`, `−1`, `0`
pub fn format_score(score: i64) -> String {
    match score.signum() {
        1 => format!("+{}", score),
        -1 => format!("\u{2212}{}", score.abs()),
        _ => "0".to_string(),
    }
}
