//! Tests for currec-model types.

use currec_model::{
    CurriculumKind, CurriculumRecord, CurriculumStats, Semester, Subject, SubjectClass,
    SubjectCode, SubjectKind, Unit, Year,
};

fn subject(code: &str, name: &str, kind: SubjectKind, units: Vec<Unit>) -> Subject {
    Subject {
        code: SubjectCode::new(code).unwrap(),
        name: name.to_string(),
        kind,
        credits: 4.0,
        units,
    }
}

#[test]
fn subject_code_rejects_blank() {
    assert!(SubjectCode::new("  ").is_err());
    assert_eq!(SubjectCode::new(" BP101T ").unwrap().as_str(), "BP101T");
}

#[test]
fn elective_name_overrides_declared_kind() {
    let s = subject("BP901T", "Elective I - Herbal Cosmetics", SubjectKind::Theory, vec![]);
    assert_eq!(s.classification(), SubjectClass::Elective);

    let s = subject("BP102P", "Pharmaceutics Lab", SubjectKind::Practical, vec![]);
    assert_eq!(s.classification(), SubjectClass::Practical);
}

#[test]
fn stats_count_the_whole_tree() {
    let years = vec![Year {
        number: 1,
        semesters: vec![
            Semester {
                number: 1,
                subjects: vec![subject(
                    "BP101T",
                    "Human Anatomy and Physiology I",
                    SubjectKind::Theory,
                    vec![
                        Unit {
                            number: 1,
                            title: "Introduction".to_string(),
                            topics: vec!["Cell structure".to_string(), "Tissues".to_string()],
                        },
                        Unit {
                            number: 2,
                            title: "Skeletal system".to_string(),
                            topics: vec!["Bones".to_string()],
                        },
                    ],
                )],
            },
            Semester {
                number: 2,
                subjects: vec![subject(
                    "BP901T",
                    "Elective I",
                    SubjectKind::Theory,
                    vec![],
                )],
            },
        ],
    }];
    let stats = CurriculumStats::from_years(&years);
    assert_eq!(stats.years, 1);
    assert_eq!(stats.semesters, 2);
    assert_eq!(stats.subjects, 2);
    assert_eq!(stats.units, 2);
    assert_eq!(stats.topics, 3);
    assert_eq!(stats.theory, 1);
    assert_eq!(stats.practical, 0);
    assert_eq!(stats.elective, 1);
}

#[test]
fn identity_key_groups_fragments() {
    let record = CurriculumRecord {
        id: "c1".to_string(),
        kind: CurriculumKind::Institution,
        institution: Some("JNTUH".to_string()),
        regulation: "R20".to_string(),
        course: "B.Pharm".to_string(),
        effective_year: Some(2020),
        years: vec![],
        stats: CurriculumStats::default(),
    };
    assert_eq!(record.identity_key(), "JNTUH::R20");

    let reference = CurriculumRecord {
        kind: CurriculumKind::Reference,
        institution: None,
        ..record
    };
    assert_eq!(reference.identity_key(), "reference");
}

#[test]
fn record_round_trips_through_json() {
    let record = CurriculumRecord {
        id: "c1".to_string(),
        kind: CurriculumKind::Reference,
        institution: None,
        regulation: "PCI-2021".to_string(),
        course: "B.Pharm".to_string(),
        effective_year: None,
        years: vec![Year {
            number: 1,
            semesters: vec![Semester {
                number: 1,
                subjects: vec![subject("BP101T", "Human Anatomy", SubjectKind::Theory, vec![])],
            }],
        }],
        stats: CurriculumStats::from_years(&[]),
    };
    let json = serde_json::to_string(&record).expect("serialize record");
    let round: CurriculumRecord = serde_json::from_str(&json).expect("deserialize record");
    assert_eq!(round, record);
    assert!(json.contains("\"type\":\"theory\""));
}
