//! Topic-level matching.
//!
//! Topic matches are computed independently of the subject-level match: a
//! topic may resolve into a different reference subject than the one its
//! parent subject mapped to. A saved user override always wins.

use std::collections::BTreeMap;

use currec_model::{MatchStatus, SavedTopicMapping, Subject, SubjectCode, TopicMatch};

use crate::normalize::normalize;

/// One reference topic with its position in the reference tree.
#[derive(Debug, Clone)]
pub struct TopicEntry {
    pub subject_code: SubjectCode,
    pub unit_number: u32,
    pub topic: String,
    normalized: String,
}

/// Flattened view of every topic in a reference tree, in subject order,
/// then unit order, then topic order. That order defines the documented
/// first-hit-wins tie-break.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTopicIndex {
    entries: Vec<TopicEntry>,
}

impl ReferenceTopicIndex {
    pub fn from_subjects<'a, I>(subjects: I) -> Self
    where
        I: IntoIterator<Item = &'a Subject>,
    {
        let mut entries = Vec::new();
        for subject in subjects {
            for unit in &subject.units {
                for topic in &unit.topics {
                    entries.push(TopicEntry {
                        subject_code: subject.code.clone(),
                        unit_number: unit.number,
                        topic: topic.clone(),
                        normalized: normalize(topic),
                    });
                }
            }
        }
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[TopicEntry] {
        &self.entries
    }
}

/// Saved overrides for one institution subject, keyed by
/// `(unit_number, topic_text)`.
pub type OverrideMap = BTreeMap<(u32, String), SavedTopicMapping>;

/// Build the override lookup from loaded rows.
pub fn override_map<I>(saved: I) -> OverrideMap
where
    I: IntoIterator<Item = SavedTopicMapping>,
{
    saved
        .into_iter()
        .map(|m| ((m.unit_number, m.topic_text.clone()), m))
        .collect()
}

/// Match one institution topic against the reference topics.
///
/// Order of precedence:
/// 1. a saved override for `(unit_number, topic_text)` is returned verbatim
///    with status `Mapped`;
/// 2. the primary subject's pool (the reference subject the parent subject
///    matched to, when there is one): exact normalized equality → `Mapped`,
///    then bidirectional substring containment → `Partial`;
/// 3. every other subject's pool, same two passes;
/// 4. otherwise `Unmapped`.
pub fn match_topic(
    topic: &str,
    unit_number: u32,
    primary_subject: Option<&SubjectCode>,
    index: &ReferenceTopicIndex,
    overrides: &OverrideMap,
) -> TopicMatch {
    if let Some(saved) = overrides.get(&(unit_number, topic.to_string())) {
        return TopicMatch {
            topic: topic.to_string(),
            matched_topic: Some(saved.reference_topic.clone()),
            matched_subject_code: saved.reference_subject_code.clone(),
            matched_unit_number: saved.reference_unit_number,
            status: MatchStatus::Mapped,
        };
    }

    let needle = normalize(topic);
    if needle.is_empty() {
        return TopicMatch::unmapped(topic);
    }

    if let Some(code) = primary_subject {
        let primary = index.entries.iter().filter(|e| &e.subject_code == code);
        if let Some(hit) = search_pool(topic, &needle, primary) {
            return hit;
        }
        let secondary = index.entries.iter().filter(|e| &e.subject_code != code);
        if let Some(hit) = search_pool(topic, &needle, secondary) {
            return hit;
        }
    } else if let Some(hit) = search_pool(topic, &needle, index.entries.iter()) {
        return hit;
    }

    TopicMatch::unmapped(topic)
}

/// Exact pass then substring pass over one pool, first hit wins.
fn search_pool<'a, I>(topic: &str, needle: &str, pool: I) -> Option<TopicMatch>
where
    I: Iterator<Item = &'a TopicEntry> + Clone,
{
    for entry in pool.clone() {
        if entry.normalized == needle {
            return Some(hit(topic, entry, MatchStatus::Mapped));
        }
    }
    for entry in pool {
        if entry.normalized.is_empty() {
            continue;
        }
        if entry.normalized.contains(needle) || needle.contains(&entry.normalized) {
            return Some(hit(topic, entry, MatchStatus::Partial));
        }
    }
    None
}

fn hit(topic: &str, entry: &TopicEntry, status: MatchStatus) -> TopicMatch {
    TopicMatch {
        topic: topic.to_string(),
        matched_topic: Some(entry.topic.clone()),
        matched_subject_code: Some(entry.subject_code.clone()),
        matched_unit_number: Some(entry.unit_number),
        status,
    }
}
