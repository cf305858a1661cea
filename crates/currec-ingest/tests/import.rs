use currec_ingest::{ImportOutcome, coerce_unit_number, parse_import};
use currec_model::{CurriculumKind, SubjectKind};
use serde_json::json;

fn valid_document() -> String {
    json!({
        "university": "JNTUH",
        "regulation": "R20",
        "course": "B.Pharm",
        "effective_year": 2020,
        "years": [{
            "year": 1,
            "semesters": [{
                "semester": 1,
                "subjects": [{
                    "code": "BP101T",
                    "name": "Human Anatomy and Physiology I",
                    "type": "theory",
                    "credits": 4,
                    "units": [
                        { "number": "Unit 1", "title": "Introduction",
                          "topics": ["Cell structure", "Tissues"] },
                        { "number": "Unit-II", "title": "Skeletal system",
                          "topics": ["Bones"] }
                    ]
                }]
            }]
        }]
    })
    .to_string()
}

#[test]
fn parses_a_well_formed_document() {
    let outcome = parse_import("c1", &valid_document(), CurriculumKind::Institution)
        .expect("json parses");
    let record = outcome.record().expect("document is valid");
    assert_eq!(record.institution.as_deref(), Some("JNTUH"));
    assert_eq!(record.regulation, "R20");
    assert_eq!(record.effective_year, Some(2020));
    assert_eq!(record.stats.subjects, 1);
    assert_eq!(record.stats.units, 2);
    assert_eq!(record.stats.topics, 3);

    let subject = &record.years[0].semesters[0].subjects[0];
    assert_eq!(subject.kind, SubjectKind::Theory);
    assert_eq!(subject.units[0].number, 1);
    // "Unit-II" has no digits, so position (2) is used
    assert_eq!(subject.units[1].number, 2);
}

#[test]
fn reference_import_has_no_institution() {
    let outcome =
        parse_import("ref", &valid_document(), CurriculumKind::Reference).expect("json parses");
    let record = outcome.record().expect("document is valid");
    assert!(record.institution.is_none());
}

#[test]
fn not_json_is_a_hard_error() {
    assert!(parse_import("c1", "not json {", CurriculumKind::Institution).is_err());
}

#[test]
fn non_object_root_is_invalid() {
    let outcome = parse_import("c1", "[1, 2]", CurriculumKind::Institution).expect("json parses");
    let ImportOutcome::Invalid(issues) = outcome else {
        panic!("expected invalid outcome");
    };
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("document root"));
}

#[test]
fn wrong_shape_where_array_expected_is_flagged_with_path() {
    let doc = json!({
        "university": "JNTUH",
        "regulation": "R20",
        "course": "B.Pharm",
        "years": [{
            "year": 1,
            "semesters": [{ "semester": 1, "subjects": "none" }]
        }]
    })
    .to_string();
    let outcome = parse_import("c1", &doc, CurriculumKind::Institution).expect("json parses");
    let ImportOutcome::Invalid(issues) = outcome else {
        panic!("expected invalid outcome");
    };
    assert_eq!(issues[0].path, "years[0].semesters[0].subjects");
    assert!(issues[0].message.contains("expected an array, found a string"));
}

#[test]
fn missing_and_empty_arrays_are_accepted_silently() {
    let doc = json!({
        "university": "JNTUH",
        "regulation": "R20",
        "course": "B.Pharm",
        "years": [
            { "year": 1, "semesters": [] },
            { "year": 2 }
        ]
    })
    .to_string();
    let outcome = parse_import("c1", &doc, CurriculumKind::Institution).expect("json parses");
    let record = outcome.record().expect("document is valid");
    assert_eq!(record.years.len(), 2);
    assert_eq!(record.stats.subjects, 0);
}

#[test]
fn subject_without_code_is_flagged() {
    let doc = json!({
        "university": "JNTUH",
        "regulation": "R20",
        "course": "B.Pharm",
        "years": [{
            "year": 1,
            "semesters": [{
                "semester": 1,
                "subjects": [{ "name": "Mystery Subject", "type": "theory" }]
            }]
        }]
    })
    .to_string();
    let outcome = parse_import("c1", &doc, CurriculumKind::Institution).expect("json parses");
    let ImportOutcome::Invalid(issues) = outcome else {
        panic!("expected invalid outcome");
    };
    assert_eq!(issues[0].path, "years[0].semesters[0].subjects[0].code");
}

#[test]
fn missing_university_on_institution_import_is_flagged() {
    let doc = json!({ "regulation": "R20", "course": "B.Pharm", "years": [] }).to_string();
    let outcome = parse_import("c1", &doc, CurriculumKind::Institution).expect("json parses");
    assert!(matches!(outcome, ImportOutcome::Invalid(_)));

    // the reference curriculum has no institution, so the same document is fine
    let outcome = parse_import("ref", &doc, CurriculumKind::Reference).expect("json parses");
    assert!(matches!(outcome, ImportOutcome::Valid(_)));
}

#[test]
fn unit_number_coercion_table() {
    use serde_json::Value;
    let cases: &[(Value, usize, u32)] = &[
        (json!(3), 0, 3),
        (json!("2"), 0, 2),
        (json!("Unit 4"), 0, 4),
        (json!("Unit-10 (advanced)"), 0, 10),
        (json!("Unit IV"), 2, 3), // roman numerals: 1-based position
        (json!("intro"), 0, 1),
        (json!(0), 4, 5),
        (json!(-1), 1, 2),
    ];
    for (value, position, expected) in cases {
        assert_eq!(
            coerce_unit_number(Some(value), *position),
            *expected,
            "value {value} at position {position}"
        );
    }
    assert_eq!(coerce_unit_number(None, 0), 1);
}

#[test]
fn unknown_subject_type_defaults_to_theory() {
    let doc = json!({
        "university": "JNTUH",
        "regulation": "R20",
        "course": "B.Pharm",
        "years": [{
            "year": 1,
            "semesters": [{
                "semester": 1,
                "subjects": [{ "code": "BP101T", "name": "Anatomy", "type": "seminar" }]
            }]
        }]
    })
    .to_string();
    let record = parse_import("c1", &doc, CurriculumKind::Institution)
        .expect("json parses")
        .record()
        .expect("document is valid");
    assert_eq!(
        record.years[0].semesters[0].subjects[0].kind,
        SubjectKind::Theory
    );
}
