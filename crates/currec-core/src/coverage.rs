//! Coverage aggregation over match results.

use currec_model::{CoverageCounts, CoverageStats, SubjectMatch, TopicMatch};

/// Derive coverage statistics from subject and topic match results.
///
/// Percentages round half-up; an empty result set yields 0% rather than a
/// division by zero.
pub fn aggregate(subject_matches: &[SubjectMatch], topic_matches: &[TopicMatch]) -> CoverageStats {
    CoverageStats {
        subjects: CoverageCounts::from_statuses(subject_matches.iter().map(|m| m.status)),
        topics: CoverageCounts::from_statuses(topic_matches.iter().map(|m| m.status)),
    }
}
