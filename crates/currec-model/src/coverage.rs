//! Coverage statistics derived from match results.

use serde::{Deserialize, Serialize};

use crate::matching::MatchStatus;

/// Per-status counts for one level (subjects or topics).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageCounts {
    pub total: usize,
    pub mapped: usize,
    pub partial: usize,
    pub unmapped: usize,
    /// `mapped / total * 100`, rounded half-up; 0 when `total` is 0.
    pub percent_mapped: u8,
}

impl CoverageCounts {
    /// Tally statuses and derive the percentage.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = MatchStatus>,
    {
        let mut counts = CoverageCounts::default();
        for status in statuses {
            counts.total += 1;
            match status {
                MatchStatus::Mapped => counts.mapped += 1,
                MatchStatus::Partial => counts.partial += 1,
                MatchStatus::Unmapped => counts.unmapped += 1,
            }
        }
        counts.percent_mapped = percent(counts.mapped, counts.total);
        counts
    }
}

/// Coverage report for one reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub subjects: CoverageCounts,
    pub topics: CoverageCounts,
}

/// Integer percentage with round-half-up, safe for a zero denominator.
pub fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // round half-up on the ratio scaled to whole percents
    ((part * 200 + total) / (2 * total)) as u8
}
