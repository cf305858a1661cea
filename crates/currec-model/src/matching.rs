//! Match result and override types.
//!
//! Match results are ephemeral: they are recomputed on every reconciliation
//! request and never persisted. The only persisted artifact is a
//! [`SavedTopicMapping`] explicitly confirmed by a user.

use serde::{Deserialize, Serialize};

use crate::ids::SubjectCode;

/// Match confidence tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Exact match after normalization (or a confirmed user override).
    Mapped,
    /// Fuzzy or substring match accepted above the threshold.
    Partial,
    /// No acceptable candidate.
    Unmapped,
}

/// Outcome of matching one institution subject against the reference set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectMatch {
    /// The institution subject name as given.
    pub university_subject: String,
    pub matched_code: Option<SubjectCode>,
    pub matched_name: Option<String>,
    pub status: MatchStatus,
    /// Similarity of the accepted candidate; 1.0 for exact, 0.0 for unmapped.
    pub score: f64,
}

impl SubjectMatch {
    pub fn unmapped(university_subject: impl Into<String>) -> Self {
        Self {
            university_subject: university_subject.into(),
            matched_code: None,
            matched_name: None,
            status: MatchStatus::Unmapped,
            score: 0.0,
        }
    }
}

/// Outcome of matching one institution topic against the reference set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicMatch {
    pub topic: String,
    pub matched_topic: Option<String>,
    pub matched_subject_code: Option<SubjectCode>,
    pub matched_unit_number: Option<u32>,
    pub status: MatchStatus,
}

impl TopicMatch {
    pub fn unmapped(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            matched_topic: None,
            matched_subject_code: None,
            matched_unit_number: None,
            status: MatchStatus::Unmapped,
        }
    }
}

/// A topic mapping explicitly saved by a user.
///
/// Keyed by `(unit_number, topic_text)` scoped to institution + subject;
/// always takes precedence over the computed match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTopicMapping {
    pub institution: String,
    pub subject_code: SubjectCode,
    pub unit_number: u32,
    pub topic_text: String,
    pub reference_topic: String,
    pub reference_subject_code: Option<SubjectCode>,
    pub reference_unit_number: Option<u32>,
    pub reference_unit_title: Option<String>,
}
