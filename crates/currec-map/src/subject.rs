//! Subject-level matching.

use currec_model::{MatchStatus, Subject, SubjectMatch};

use crate::normalize::normalize;
use crate::score::{SUBJECT_FUZZY_THRESHOLD, similarity};

/// Find the best reference subject for an institution subject name.
///
/// Exact normalized equality wins outright with status `Mapped`. Otherwise
/// the highest Levenshtein similarity at or above
/// [`SUBJECT_FUZZY_THRESHOLD`] is accepted as `Partial`; ties are broken by
/// reference iteration order (first candidate at the maximum wins). Below
/// the threshold the result is `Unmapped` with no candidate fields set.
pub fn match_subject(university_name: &str, reference_subjects: &[Subject]) -> SubjectMatch {
    let needle = normalize(university_name);

    for candidate in reference_subjects {
        if normalize(&candidate.name) == needle {
            return SubjectMatch {
                university_subject: university_name.to_string(),
                matched_code: Some(candidate.code.clone()),
                matched_name: Some(candidate.name.clone()),
                status: MatchStatus::Mapped,
                score: 1.0,
            };
        }
    }

    let mut best: Option<(&Subject, f64)> = None;
    for candidate in reference_subjects {
        let score = similarity(&needle, &normalize(&candidate.name));
        // strictly-greater keeps the first candidate on ties
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    match best {
        Some((candidate, score)) if score >= SUBJECT_FUZZY_THRESHOLD => SubjectMatch {
            university_subject: university_name.to_string(),
            matched_code: Some(candidate.code.clone()),
            matched_name: Some(candidate.name.clone()),
            status: MatchStatus::Partial,
            score,
        },
        _ => SubjectMatch::unmapped(university_name),
    }
}
