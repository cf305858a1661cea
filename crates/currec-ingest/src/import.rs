//! Schema-validated parse of curriculum import documents.
//!
//! The import format is a nested JSON document:
//!
//! ```json
//! {
//!   "university": "JNTUH",
//!   "regulation": "R20",
//!   "course": "B.Pharm",
//!   "years": [
//!     { "year": 1, "semesters": [
//!       { "semester": 1, "subjects": [
//!         { "code": "BP101T", "name": "...", "type": "theory",
//!           "credits": 4, "units": [
//!             { "number": "Unit 1", "title": "...", "topics": ["..."] }
//!         ] }
//!       ] }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Validation is decoupled from the matching engine: the outcome is either
//! a fully-typed [`CurriculumRecord`] or a list of [`ValidationIssue`]s
//! with location paths. Merely-empty arrays are accepted silently; a value
//! of the wrong shape where an array or object was expected is an issue.

use serde_json::Value;
use tracing::debug;

use currec_model::{
    CurriculumKind, CurriculumRecord, CurriculumStats, Semester, Subject, SubjectCode,
    SubjectKind, Unit, Year,
};

use crate::error::Result;

/// A structural problem found while validating an import document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ValidationIssue {
    /// Location path, e.g. `years[0].semesters[1].subjects[2].code`.
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Tagged result of an import parse.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Valid(CurriculumRecord),
    Invalid(Vec<ValidationIssue>),
}

impl ImportOutcome {
    pub fn record(self) -> Option<CurriculumRecord> {
        match self {
            ImportOutcome::Valid(record) => Some(record),
            ImportOutcome::Invalid(_) => None,
        }
    }
}

/// Parse and validate one import document.
///
/// Returns `Err` only when `text` is not JSON. A structurally unsound
/// document parses to [`ImportOutcome::Invalid`] with one issue per
/// problem found; missing or empty collections are not problems.
pub fn parse_import(id: &str, text: &str, kind: CurriculumKind) -> Result<ImportOutcome> {
    let root: Value = serde_json::from_str(text)?;
    let mut issues = Vec::new();

    let Some(obj) = root.as_object() else {
        issues.push(ValidationIssue {
            path: String::new(),
            message: format!("expected an object at the document root, found {}", kind_of(&root)),
        });
        return Ok(ImportOutcome::Invalid(issues));
    };

    let university = string_field(obj, "university");
    let regulation = string_field(obj, "regulation").unwrap_or_default();
    let course = string_field(obj, "course").unwrap_or_default();
    let effective_year = obj.get("effective_year").and_then(Value::as_u64).map(|y| y as u32);

    if kind == CurriculumKind::Institution && university.is_none() {
        issues.push(ValidationIssue {
            path: "university".to_string(),
            message: "institution curricula must name their university".to_string(),
        });
    }

    let years = match obj.get("years") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => collect_years(entries, &mut issues),
        Some(other) => {
            issues.push(ValidationIssue {
                path: "years".to_string(),
                message: format!("expected an array, found {}", kind_of(other)),
            });
            Vec::new()
        }
    };

    if !issues.is_empty() {
        return Ok(ImportOutcome::Invalid(issues));
    }

    let stats = CurriculumStats::from_years(&years);
    debug!(
        id,
        subjects = stats.subjects,
        topics = stats.topics,
        "parsed curriculum import"
    );
    Ok(ImportOutcome::Valid(CurriculumRecord {
        id: id.to_string(),
        kind,
        institution: match kind {
            CurriculumKind::Reference => None,
            CurriculumKind::Institution => university,
        },
        regulation,
        course,
        effective_year,
        years,
        stats,
    }))
}

fn collect_years(entries: &[Value], issues: &mut Vec<ValidationIssue>) -> Vec<Year> {
    let mut years = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        let path = format!("years[{idx}]");
        let Some(obj) = entry.as_object() else {
            issues.push(ValidationIssue {
                path,
                message: format!("expected an object, found {}", kind_of(entry)),
            });
            continue;
        };
        let Some(number) = obj.get("year").and_then(Value::as_u64) else {
            issues.push(ValidationIssue {
                path: format!("{path}.year"),
                message: "missing or non-integer year number".to_string(),
            });
            continue;
        };
        let semesters = match obj.get("semesters") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(list)) => collect_semesters(list, &path, issues),
            Some(other) => {
                issues.push(ValidationIssue {
                    path: format!("{path}.semesters"),
                    message: format!("expected an array, found {}", kind_of(other)),
                });
                Vec::new()
            }
        };
        years.push(Year {
            number: number as u32,
            semesters,
        });
    }
    years
}

fn collect_semesters(
    entries: &[Value],
    parent: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Vec<Semester> {
    let mut semesters = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        let path = format!("{parent}.semesters[{idx}]");
        let Some(obj) = entry.as_object() else {
            issues.push(ValidationIssue {
                path,
                message: format!("expected an object, found {}", kind_of(entry)),
            });
            continue;
        };
        let Some(number) = obj.get("semester").and_then(Value::as_u64) else {
            issues.push(ValidationIssue {
                path: format!("{path}.semester"),
                message: "missing or non-integer semester number".to_string(),
            });
            continue;
        };
        let subjects = match obj.get("subjects") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(list)) => collect_subjects(list, &path, issues),
            Some(other) => {
                issues.push(ValidationIssue {
                    path: format!("{path}.subjects"),
                    message: format!("expected an array, found {}", kind_of(other)),
                });
                Vec::new()
            }
        };
        semesters.push(Semester {
            number: number as u32,
            subjects,
        });
    }
    semesters
}

fn collect_subjects(
    entries: &[Value],
    parent: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Vec<Subject> {
    let mut subjects = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        let path = format!("{parent}.subjects[{idx}]");
        let Some(obj) = entry.as_object() else {
            issues.push(ValidationIssue {
                path,
                message: format!("expected an object, found {}", kind_of(entry)),
            });
            continue;
        };
        let code = match string_field(obj, "code").map(SubjectCode::new) {
            Some(Ok(code)) => code,
            _ => {
                issues.push(ValidationIssue {
                    path: format!("{path}.code"),
                    message: "missing or empty subject code".to_string(),
                });
                continue;
            }
        };
        let Some(name) = string_field(obj, "name") else {
            issues.push(ValidationIssue {
                path: format!("{path}.name"),
                message: "missing or empty subject name".to_string(),
            });
            continue;
        };
        // unknown/missing kind defaults to theory
        let kind = string_field(obj, "type")
            .and_then(|s| s.parse::<SubjectKind>().ok())
            .unwrap_or(SubjectKind::Theory);
        let credits = match obj.get("credits") {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0) as f32,
            Some(Value::String(s)) => s.trim().parse::<f32>().unwrap_or(0.0),
            _ => 0.0,
        };
        let units = match obj.get("units") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(list)) => collect_units(list, &path, issues),
            Some(other) => {
                issues.push(ValidationIssue {
                    path: format!("{path}.units"),
                    message: format!("expected an array, found {}", kind_of(other)),
                });
                Vec::new()
            }
        };
        subjects.push(Subject {
            code,
            name,
            kind,
            credits,
            units,
        });
    }
    subjects
}

fn collect_units(entries: &[Value], parent: &str, issues: &mut Vec<ValidationIssue>) -> Vec<Unit> {
    let mut units = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        let path = format!("{parent}.units[{idx}]");
        let Some(obj) = entry.as_object() else {
            issues.push(ValidationIssue {
                path,
                message: format!("expected an object, found {}", kind_of(entry)),
            });
            continue;
        };
        let number = coerce_unit_number(obj.get("number"), idx);
        let title = string_field(obj, "title").unwrap_or_default();
        let topics = match obj.get("topics") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(list)) => list
                .iter()
                .filter_map(|t| t.as_str())
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            Some(other) => {
                issues.push(ValidationIssue {
                    path: format!("{path}.topics"),
                    message: format!("expected an array, found {}", kind_of(other)),
                });
                Vec::new()
            }
        };
        units.push(Unit {
            number,
            title,
            topics,
        });
    }
    units
}

/// Coerce a unit number that may arrive as an integer or as free text
/// ("2", "Unit 3", "Unit-IV").
///
/// The first run of ASCII digits wins; with no digits anywhere (roman
/// numerals included) the unit's 1-based position is used.
pub fn coerce_unit_number(value: Option<&Value>, position: usize) -> u32 {
    let fallback = (position + 1) as u32;
    match value {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) if v > 0 => v as u32,
            _ => fallback,
        },
        Some(Value::String(s)) => first_digit_run(s).unwrap_or(fallback),
        _ => fallback,
    }
}

fn first_digit_run(s: &str) -> Option<u32> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let run: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    run.parse().ok()
}

fn string_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
