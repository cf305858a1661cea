//! Table output for merge and coverage results.

use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use currec_ingest::ValidationIssue;
use currec_model::{
    CoverageCounts, CoverageStats, CurriculumStats, MatchStatus, Subject, SubjectMatch,
    TopicMatch,
};

pub fn print_issues(file: &Path, issues: &[ValidationIssue]) {
    eprintln!("{}: {} issue(s)", file.display(), issues.len());
    let mut table = Table::new();
    apply_style(&mut table);
    table.set_header(vec![header_cell("Path"), header_cell("Problem")]);
    for issue in issues {
        table.add_row(vec![
            Cell::new(if issue.path.is_empty() { "(root)" } else { issue.path.as_str() }),
            Cell::new(&issue.message).fg(Color::Red),
        ]);
    }
    println!("{table}");
}

pub fn print_stats(stats: &CurriculumStats) {
    let mut table = Table::new();
    apply_style(&mut table);
    table.set_header(vec![
        header_cell("Years"),
        header_cell("Semesters"),
        header_cell("Subjects"),
        header_cell("Theory"),
        header_cell("Practical"),
        header_cell("Elective"),
        header_cell("Units"),
        header_cell("Topics"),
    ]);
    table.add_row(vec![
        Cell::new(stats.years),
        Cell::new(stats.semesters),
        Cell::new(stats.subjects),
        Cell::new(stats.theory),
        Cell::new(stats.practical),
        Cell::new(stats.elective),
        Cell::new(stats.units),
        Cell::new(stats.topics),
    ]);
    println!("{table}");
}

pub fn print_subjects(matches: &[SubjectMatch]) {
    let mut table = Table::new();
    apply_style(&mut table);
    table.set_header(vec![
        header_cell("Institution subject"),
        header_cell("Reference subject"),
        header_cell("Code"),
        header_cell("Status"),
        header_cell("Score"),
    ]);
    for m in matches {
        table.add_row(vec![
            Cell::new(&m.university_subject),
            Cell::new(m.matched_name.as_deref().unwrap_or("-")),
            Cell::new(m.matched_code.as_ref().map(|c| c.as_str()).unwrap_or("-")),
            status_cell(m.status),
            Cell::new(format!("{:.2}", m.score)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}

pub fn print_topics(subject: &Subject, matches: &[TopicMatch]) {
    println!("{} - {}", subject.code, subject.name);
    let mut table = Table::new();
    apply_style(&mut table);
    table.set_header(vec![
        header_cell("Topic"),
        header_cell("Reference topic"),
        header_cell("Subject"),
        header_cell("Unit"),
        header_cell("Status"),
    ]);
    for m in matches {
        table.add_row(vec![
            Cell::new(&m.topic),
            Cell::new(m.matched_topic.as_deref().unwrap_or("-")),
            Cell::new(
                m.matched_subject_code
                    .as_ref()
                    .map(|c| c.as_str())
                    .unwrap_or("-"),
            ),
            Cell::new(
                m.matched_unit_number
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            )
            .set_alignment(CellAlignment::Right),
            status_cell(m.status),
        ]);
    }
    println!("{table}");
}

pub fn print_coverage(stats: &CoverageStats) {
    let mut table = Table::new();
    apply_style(&mut table);
    table.set_header(vec![
        header_cell("Level"),
        header_cell("Total"),
        header_cell("Mapped"),
        header_cell("Partial"),
        header_cell("Unmapped"),
        header_cell("Coverage"),
    ]);
    add_coverage_row(&mut table, "Subjects", &stats.subjects);
    add_coverage_row(&mut table, "Topics", &stats.topics);
    println!("{table}");
}

fn add_coverage_row(table: &mut Table, level: &str, counts: &CoverageCounts) {
    table.add_row(vec![
        Cell::new(level).add_attribute(Attribute::Bold),
        Cell::new(counts.total).set_alignment(CellAlignment::Right),
        Cell::new(counts.mapped)
            .fg(Color::Green)
            .set_alignment(CellAlignment::Right),
        Cell::new(counts.partial)
            .fg(Color::Yellow)
            .set_alignment(CellAlignment::Right),
        Cell::new(counts.unmapped)
            .fg(Color::Red)
            .set_alignment(CellAlignment::Right),
        Cell::new(format!("{}%", counts.percent_mapped))
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
}

fn status_cell(status: MatchStatus) -> Cell {
    match status {
        MatchStatus::Mapped => Cell::new("mapped").fg(Color::Green),
        MatchStatus::Partial => Cell::new("partial").fg(Color::Yellow),
        MatchStatus::Unmapped => Cell::new("unmapped").fg(Color::Red),
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn apply_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}
