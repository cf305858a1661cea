//! Reconciliation engine facade.
//!
//! The engine is pure in-memory computation over already-fetched
//! curriculum trees: it performs no I/O and holds no shared mutable state
//! beyond a bounded per-query result cache, so one engine may serve
//! concurrent callers.

use std::collections::BTreeMap;
use std::sync::Mutex;

use tracing::debug;

use currec_map::{
    OverrideMap, ReferenceTopicIndex, match_subject, match_topic, normalize, override_map,
};
use currec_model::{
    CoverageStats, CurriculumRecord, SavedTopicMapping, Subject, SubjectCode, SubjectMatch,
    TopicMatch,
};

use crate::cache::{DEFAULT_QUERY_CACHE_CAPACITY, QueryCache};
use crate::coverage::aggregate;
use crate::merge::{MergedTree, merge};

/// Cache key for a topic-mapping query: subject scope plus both filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TopicQuery {
    subject_code: SubjectCode,
    unit_filter: Option<u32>,
    topic_filter: Option<String>,
}

/// One reconciliation context: a merged institution curriculum held
/// against a merged reference curriculum.
pub struct ReconEngine {
    institution: MergedTree,
    reference: MergedTree,
    reference_subjects: Vec<Subject>,
    topic_index: ReferenceTopicIndex,
    overrides_by_subject: BTreeMap<SubjectCode, OverrideMap>,
    query_cache: Mutex<QueryCache<TopicQuery, Vec<TopicMatch>>>,
}

impl ReconEngine {
    /// Build an engine from raw fragments; both sides are merged here.
    pub fn new(
        institution_fragments: &[CurriculumRecord],
        reference_fragments: &[CurriculumRecord],
    ) -> Self {
        let institution = merge(institution_fragments);
        let reference = merge(reference_fragments);
        Self::from_trees(institution, reference)
    }

    /// Build an engine from already-merged trees.
    pub fn from_trees(institution: MergedTree, reference: MergedTree) -> Self {
        let reference_subjects: Vec<Subject> = reference.subjects().cloned().collect();
        let topic_index = ReferenceTopicIndex::from_subjects(&reference_subjects);
        debug!(
            institution_subjects = institution.stats.subjects,
            reference_subjects = reference_subjects.len(),
            reference_topics = topic_index.len(),
            "reconciliation engine ready"
        );
        Self {
            institution,
            reference,
            reference_subjects,
            topic_index,
            overrides_by_subject: BTreeMap::new(),
            query_cache: Mutex::new(QueryCache::new(DEFAULT_QUERY_CACHE_CAPACITY)),
        }
    }

    /// Attach saved topic-mapping overrides, grouped by institution
    /// subject code. Replaces any previously attached set and clears the
    /// query cache.
    pub fn with_overrides<I>(mut self, saved: I) -> Self
    where
        I: IntoIterator<Item = SavedTopicMapping>,
    {
        let mut grouped: BTreeMap<SubjectCode, Vec<SavedTopicMapping>> = BTreeMap::new();
        for mapping in saved {
            grouped
                .entry(mapping.subject_code.clone())
                .or_default()
                .push(mapping);
        }
        self.overrides_by_subject = grouped
            .into_iter()
            .map(|(code, rows)| (code, override_map(rows)))
            .collect();
        self.query_cache = Mutex::new(QueryCache::new(DEFAULT_QUERY_CACHE_CAPACITY));
        self
    }

    pub fn merged_tree(&self) -> &MergedTree {
        &self.institution
    }

    pub fn reference_tree(&self) -> &MergedTree {
        &self.reference
    }

    /// Subject-level match for every institution subject, in tree order.
    pub fn subject_mappings(&self) -> Vec<SubjectMatch> {
        self.institution
            .subjects()
            .map(|subject| match_subject(&subject.name, &self.reference_subjects))
            .collect()
    }

    /// Topic-level matches for one institution subject.
    ///
    /// `unit_filter` restricts the subject's units by number;
    /// `topic_filter` keeps only topics whose normalized text contains the
    /// normalized filter. Results are cached per distinct query key; an
    /// unknown subject code yields an empty list.
    pub fn topic_mappings(
        &self,
        subject_code: &SubjectCode,
        unit_filter: Option<u32>,
        topic_filter: Option<&str>,
    ) -> Vec<TopicMatch> {
        let query = TopicQuery {
            subject_code: subject_code.clone(),
            unit_filter,
            topic_filter: topic_filter.map(ToString::to_string),
        };
        if let Ok(mut cache) = self.query_cache.lock()
            && let Some(hit) = cache.get(&query)
        {
            return hit.clone();
        }

        let results = self.compute_topic_mappings(subject_code, unit_filter, topic_filter);
        if let Ok(mut cache) = self.query_cache.lock() {
            cache.put(query, results.clone());
        }
        results
    }

    fn compute_topic_mappings(
        &self,
        subject_code: &SubjectCode,
        unit_filter: Option<u32>,
        topic_filter: Option<&str>,
    ) -> Vec<TopicMatch> {
        let Some(subject) = self.institution.find_subject(subject_code) else {
            return Vec::new();
        };
        let primary = match_subject(&subject.name, &self.reference_subjects).matched_code;
        let overrides = self.overrides_by_subject.get(subject_code);
        let needle = topic_filter.map(normalize);

        let mut results = Vec::new();
        for unit in &subject.units {
            if unit_filter.is_some_and(|n| n != unit.number) {
                continue;
            }
            for topic in &unit.topics {
                if let Some(needle) = &needle
                    && !normalize(topic).contains(needle.as_str())
                {
                    continue;
                }
                results.push(match_topic(
                    topic,
                    unit.number,
                    primary.as_ref(),
                    &self.topic_index,
                    overrides.unwrap_or(&EMPTY_OVERRIDES),
                ));
            }
        }
        results
    }

    /// Coverage statistics over every subject and every topic, unfiltered.
    pub fn coverage(&self) -> CoverageStats {
        let subject_matches = self.subject_mappings();
        let mut topic_matches = Vec::new();
        for subject in self.institution.subjects() {
            topic_matches.extend(self.topic_mappings(&subject.code, None, None));
        }
        aggregate(&subject_matches, &topic_matches)
    }
}

static EMPTY_OVERRIDES: OverrideMap = OverrideMap::new();
