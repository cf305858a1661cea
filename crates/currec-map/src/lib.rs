#![deny(unsafe_code)]

pub mod normalize;
pub mod score;
pub mod subject;
pub mod topic;

pub use normalize::normalize;
pub use score::{SUBJECT_FUZZY_THRESHOLD, similarity};
pub use subject::match_subject;
pub use topic::{OverrideMap, ReferenceTopicIndex, TopicEntry, match_topic, override_map};
