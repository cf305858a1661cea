#![deny(unsafe_code)]

pub mod coverage;
pub mod curriculum;
pub mod error;
pub mod ids;
pub mod matching;

pub use coverage::{CoverageCounts, CoverageStats, percent};
pub use curriculum::{
    CurriculumKind, CurriculumRecord, CurriculumStats, Semester, Subject, SubjectClass,
    SubjectKind, Unit, Year,
};
pub use error::{ModelError, Result};
pub use ids::SubjectCode;
pub use matching::{MatchStatus, SavedTopicMapping, SubjectMatch, TopicMatch};
