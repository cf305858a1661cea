//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "currec",
    version,
    about = "Curriculum reconciliation - match institution syllabi against the reference curriculum",
    long_about = "Merge piecemeal curriculum uploads into one tree per institution and\n\
                  regulation, match subjects and topics against the reference (PCI)\n\
                  curriculum, and report mapping coverage."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a curriculum import document and report issues.
    Validate(ValidateArgs),

    /// Merge curriculum fragments and print the merged statistics.
    Merge(MergeArgs),

    /// Reconcile institution fragments against the reference curriculum.
    Coverage(CoverageArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Import document to validate.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Whether the document is a reference or institution curriculum.
    #[arg(long = "kind", value_enum, default_value = "institution")]
    pub kind: KindArg,
}

#[derive(Parser)]
pub struct MergeArgs {
    /// Fragment documents for one institution + regulation, in upload order.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Parser)]
pub struct CoverageArgs {
    /// Reference curriculum document(s).
    #[arg(long = "reference", value_name = "FILE", required = true)]
    pub reference: Vec<PathBuf>,

    /// Institution fragment documents, in upload order.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Directory of a currec file store; saved topic-mapping overrides
    /// found there take precedence over computed matches.
    #[arg(long = "overrides", value_name = "DIR")]
    pub overrides: Option<PathBuf>,

    /// Also list every topic match per subject, not just the summary.
    #[arg(long = "topics")]
    pub topics: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Reference,
    Institution,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
