//! Curriculum tree types.
//!
//! A persisted [`CurriculumRecord`] is one uploaded fragment. Institutions
//! upload curricula piecemeal, so several records may share the same
//! `(institution, regulation)` identity; they are combined at read time by
//! the merger, never mutated in place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::SubjectCode;

/// Whether a record is the master reference curriculum or an
/// institution-specific syllabus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurriculumKind {
    Reference,
    Institution,
}

impl CurriculumKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurriculumKind::Reference => "reference",
            CurriculumKind::Institution => "institution",
        }
    }
}

impl fmt::Display for CurriculumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurriculumKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reference" => Ok(CurriculumKind::Reference),
            "institution" => Ok(CurriculumKind::Institution),
            _ => Err(format!("Unknown curriculum kind: {}", s)),
        }
    }
}

/// Declared subject kind as it appears in import documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    Theory,
    Practical,
}

impl SubjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::Theory => "theory",
            SubjectKind::Practical => "practical",
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "theory" => Ok(SubjectKind::Theory),
            "practical" => Ok(SubjectKind::Practical),
            _ => Err(format!("Unknown subject kind: {}", s)),
        }
    }
}

/// Derived classification used for statistics breakdowns.
///
/// Elective status is inferred from the display name and overrides the
/// declared theory/practical kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectClass {
    Theory,
    Practical,
    Elective,
}

/// One unit of a subject: a numbered block of topics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub number: u32,
    pub title: String,
    /// Topic names in syllabus order.
    #[serde(default)]
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub code: SubjectCode,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SubjectKind,
    #[serde(default)]
    pub credits: f32,
    #[serde(default)]
    pub units: Vec<Unit>,
}

impl Subject {
    /// Classification for statistics: a subject whose name contains
    /// "elective" (case-insensitively) counts as elective regardless of
    /// its declared kind.
    pub fn classification(&self) -> SubjectClass {
        if self.name.to_lowercase().contains("elective") {
            return SubjectClass::Elective;
        }
        match self.kind {
            SubjectKind::Theory => SubjectClass::Theory,
            SubjectKind::Practical => SubjectClass::Practical,
        }
    }

    pub fn topic_count(&self) -> usize {
        self.units.iter().map(|u| u.topics.len()).sum()
    }
}

/// A semester identified by its absolute number (1..2N across the whole
/// course, not 1/2 within a year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    #[serde(rename = "semester")]
    pub number: u32,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Year {
    #[serde(rename = "year")]
    pub number: u32,
    #[serde(default)]
    pub semesters: Vec<Semester>,
}

/// One persisted curriculum fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurriculumRecord {
    pub id: String,
    pub kind: CurriculumKind,
    /// Institution name; `None` for the reference curriculum.
    pub institution: Option<String>,
    /// Regulation or version label, e.g. "R20".
    pub regulation: String,
    pub course: String,
    pub effective_year: Option<u32>,
    #[serde(default)]
    pub years: Vec<Year>,
    #[serde(default)]
    pub stats: CurriculumStats,
}

impl CurriculumRecord {
    /// Identity key used to group fragments for merging.
    ///
    /// All reference fragments share one identity; institution fragments
    /// group by institution + regulation.
    pub fn identity_key(&self) -> String {
        match self.kind {
            CurriculumKind::Reference => "reference".to_string(),
            CurriculumKind::Institution => format!(
                "{}::{}",
                self.institution.as_deref().unwrap_or_default(),
                self.regulation
            ),
        }
    }
}

/// Aggregate counts derived from a curriculum tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumStats {
    pub years: usize,
    pub semesters: usize,
    pub subjects: usize,
    pub units: usize,
    pub topics: usize,
    pub theory: usize,
    pub practical: usize,
    pub elective: usize,
}

impl CurriculumStats {
    /// Recompute every count from a tree.
    pub fn from_years(years: &[Year]) -> Self {
        let mut stats = CurriculumStats {
            years: years.len(),
            ..CurriculumStats::default()
        };
        for year in years {
            stats.semesters += year.semesters.len();
            for semester in &year.semesters {
                stats.subjects += semester.subjects.len();
                for subject in &semester.subjects {
                    stats.units += subject.units.len();
                    stats.topics += subject.topic_count();
                    match subject.classification() {
                        SubjectClass::Theory => stats.theory += 1,
                        SubjectClass::Practical => stats.practical += 1,
                        SubjectClass::Elective => stats.elective += 1,
                    }
                }
            }
        }
        stats
    }
}
