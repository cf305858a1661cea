//! Multi-fragment curriculum merge.
//!
//! Institutions upload curricula piecemeal, so one logical curriculum is
//! stored as several [`CurriculumRecord`] fragments sharing an identity
//! key. The merge is performed at read time and never mutates the stored
//! fragments.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use currec_model::{CurriculumRecord, CurriculumStats, Semester, Subject, SubjectCode, Year};

/// One logical curriculum assembled from fragments.
///
/// Years and semesters are ordered by number; subject order within a
/// semester is fragment order, which downstream matching relies on for its
/// documented tie-breaks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedTree {
    pub years: Vec<Year>,
    pub stats: CurriculumStats,
}

impl MergedTree {
    /// Every subject in tree order (year, semester, fragment order).
    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.years
            .iter()
            .flat_map(|y| &y.semesters)
            .flat_map(|s| &s.subjects)
    }

    pub fn find_subject(&self, code: &SubjectCode) -> Option<&Subject> {
        self.subjects().find(|s| &s.code == code)
    }

    pub fn is_empty(&self) -> bool {
        self.stats.subjects == 0
    }
}

/// Merge curriculum fragments into one tree.
///
/// Year and semester entries are accumulated by number; two fragments
/// carrying the same absolute semester have their subject lists
/// concatenated, never overwritten. Subject de-duplication is by code
/// only: when the same code appears in more than one fragment the
/// first-encountered definition (input order) wins, which also makes
/// merging a merge result stable. A fragment with no usable years simply
/// contributes nothing.
pub fn merge(fragments: &[CurriculumRecord]) -> MergedTree {
    let mut years: BTreeMap<u32, BTreeMap<u32, Vec<Subject>>> = BTreeMap::new();
    let mut seen_codes: BTreeSet<SubjectCode> = BTreeSet::new();

    for fragment in fragments {
        if fragment.years.is_empty() {
            debug!(id = %fragment.id, "fragment has no years, skipping");
            continue;
        }
        for year in &fragment.years {
            let semesters = years.entry(year.number).or_default();
            for semester in &year.semesters {
                let subjects = semesters.entry(semester.number).or_default();
                for subject in &semester.subjects {
                    if !seen_codes.insert(subject.code.clone()) {
                        debug!(
                            code = %subject.code,
                            fragment = %fragment.id,
                            "duplicate subject code, first definition kept"
                        );
                        continue;
                    }
                    subjects.push(subject.clone());
                }
            }
        }
    }

    let years: Vec<Year> = years
        .into_iter()
        .map(|(number, semesters)| Year {
            number,
            semesters: semesters
                .into_iter()
                .map(|(number, subjects)| Semester { number, subjects })
                .collect(),
        })
        .collect();
    let stats = CurriculumStats::from_years(&years);
    MergedTree { years, stats }
}
