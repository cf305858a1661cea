//! Subcommand implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

use currec_core::{CurriculumStore, FileStore, ReconEngine, merge};
use currec_ingest::{ImportOutcome, parse_import};
use currec_model::{CurriculumKind, CurriculumRecord, SavedTopicMapping};

use crate::cli::{CoverageArgs, KindArg, MergeArgs, ValidateArgs};
use crate::summary::{print_coverage, print_issues, print_stats, print_subjects, print_topics};

pub fn run_validate(args: &ValidateArgs) -> Result<i32> {
    let kind = match args.kind {
        KindArg::Reference => CurriculumKind::Reference,
        KindArg::Institution => CurriculumKind::Institution,
    };
    match load_outcome(&args.file, kind)? {
        ImportOutcome::Valid(record) => {
            println!("{} is valid", args.file.display());
            print_stats(&record.stats);
            Ok(0)
        }
        ImportOutcome::Invalid(issues) => {
            print_issues(&args.file, &issues);
            Ok(1)
        }
    }
}

pub fn run_merge(args: &MergeArgs) -> Result<i32> {
    let records = load_fragments(&args.files, CurriculumKind::Institution)?;
    let tree = merge(&records);
    println!(
        "Merged {} fragment(s) into {} year(s)",
        records.len(),
        tree.years.len()
    );
    print_stats(&tree.stats);
    Ok(0)
}

pub fn run_coverage(args: &CoverageArgs) -> Result<i32> {
    let reference = load_fragments(&args.reference, CurriculumKind::Reference)?;
    let records = load_fragments(&args.files, CurriculumKind::Institution)?;
    let institution = records
        .iter()
        .find_map(|r| r.institution.clone())
        .unwrap_or_default();

    let mut engine = ReconEngine::new(&records, &reference);
    if let Some(dir) = &args.overrides {
        let overrides = load_overrides(dir, &institution, &engine)?;
        debug!(count = overrides.len(), "loaded saved topic mappings");
        engine = engine.with_overrides(overrides);
    }

    let subject_matches = engine.subject_mappings();
    print_subjects(&subject_matches);

    if args.topics {
        for subject in engine.merged_tree().subjects() {
            let matches = engine.topic_mappings(&subject.code, None, None);
            print_topics(subject, &matches);
        }
    }

    print_coverage(&engine.coverage());
    Ok(0)
}

/// Load the saved topic-mapping overrides for every institution subject.
fn load_overrides(
    dir: &Path,
    institution: &str,
    engine: &ReconEngine,
) -> Result<Vec<SavedTopicMapping>> {
    let store = FileStore::new(dir)
        .with_context(|| format!("failed to open override store at {}", dir.display()))?;
    let mut overrides = Vec::new();
    for subject in engine.merged_tree().subjects() {
        let rows = store
            .load_topic_mappings(institution, &subject.code)
            .with_context(|| format!("failed to load overrides for {}", subject.code))?;
        overrides.extend(rows);
    }
    Ok(overrides)
}

fn load_fragments(paths: &[std::path::PathBuf], kind: CurriculumKind) -> Result<Vec<CurriculumRecord>> {
    let mut records = Vec::new();
    let mut invalid = 0usize;
    for path in paths {
        match load_outcome(path, kind)? {
            ImportOutcome::Valid(record) => records.push(record),
            ImportOutcome::Invalid(issues) => {
                warn!(file = %path.display(), issues = issues.len(), "invalid fragment");
                print_issues(path, &issues);
                invalid += 1;
            }
        }
    }
    if invalid > 0 {
        bail!("{invalid} fragment(s) failed validation");
    }
    Ok(records)
}

fn load_outcome(path: &Path, kind: CurriculumKind) -> Result<ImportOutcome> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_import(&record_id(path), &text, kind)
        .with_context(|| format!("{} is not valid JSON", path.display()))
}

fn record_id(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("import")
        .to_string()
}
