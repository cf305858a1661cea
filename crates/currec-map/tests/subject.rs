use currec_map::match_subject;
use currec_model::{MatchStatus, Subject, SubjectCode, SubjectKind};

fn reference_subject(code: &str, name: &str) -> Subject {
    Subject {
        code: SubjectCode::new(code).unwrap(),
        name: name.to_string(),
        kind: SubjectKind::Theory,
        credits: 4.0,
        units: vec![],
    }
}

fn pharmacy_references() -> Vec<Subject> {
    vec![
        reference_subject("BP101T", "Human Anatomy and Physiology I"),
        reference_subject("BP102T", "Pharmaceutical Analysis I"),
        reference_subject("BP103T", "Pharmaceutics I"),
        reference_subject("BP104T", "Pharmaceutical Inorganic Chemistry"),
    ]
}

#[test]
fn case_and_spacing_differences_map_exactly() {
    let result = match_subject("human  anatomy and physiology I", &pharmacy_references());
    assert_eq!(result.status, MatchStatus::Mapped);
    assert_eq!(result.score, 1.0);
    assert_eq!(result.matched_code.unwrap().as_str(), "BP101T");
    assert_eq!(
        result.matched_name.as_deref(),
        Some("Human Anatomy and Physiology I")
    );
}

#[test]
fn ampersand_and_hyphen_variant_maps_partially() {
    let result = match_subject("Human Anatomy & Physiology-I", &pharmacy_references());
    assert_eq!(result.status, MatchStatus::Partial);
    assert!(result.score >= 0.90, "score was {}", result.score);
    assert!(result.score < 1.0);
    assert_eq!(result.matched_code.unwrap().as_str(), "BP101T");
}

#[test]
fn out_of_domain_subject_is_unmapped() {
    let result = match_subject("Quantum Mechanics", &pharmacy_references());
    assert_eq!(result.status, MatchStatus::Unmapped);
    assert!(result.matched_code.is_none());
    assert!(result.matched_name.is_none());
    assert_eq!(result.score, 0.0);
}

#[test]
fn ties_go_to_the_first_reference_subject() {
    let references = vec![
        reference_subject("BPX01T", "Pharmacology A"),
        reference_subject("BPX02T", "Pharmacology B"),
    ];
    // equidistant from both candidates, above the threshold
    let result = match_subject("Pharmacology C", &references);
    assert_eq!(result.status, MatchStatus::Partial);
    assert_eq!(result.matched_code.unwrap().as_str(), "BPX01T");
}

#[test]
fn empty_reference_set_is_unmapped() {
    let result = match_subject("Pharmaceutics I", &[]);
    assert_eq!(result.status, MatchStatus::Unmapped);
}
