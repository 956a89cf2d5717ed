use std::path::PathBuf;

use clap::Parser;
use vs_core::ReportVariant;

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `vars-summary` binary.
#[derive(Debug, Parser)]
#[command(
    name = "vars-summary",
    version,
    about = "Count annotated and quality images per concept in a VARS annotation database"
)]
pub struct Cli {
    /// Text file with one concept name per line
    #[arg(value_name = "CONCEPT_LIST", required_unless_present = "kb")]
    pub concept_list: Option<PathBuf>,

    /// Take every imaged concept at --rank from the knowledgebase (also accepted as -kb)
    #[arg(long, conflicts_with = "concept_list")]
    pub kb: bool,

    /// CSV path (defaults to counts.csv next to the concept list)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report variant: basic, observations, grouped
    #[arg(long, value_parser = parse_variant)]
    pub variant: Option<ReportVariant>,

    /// Rank kept by the knowledgebase filter (e.g. genus, family)
    #[arg(long)]
    pub rank: Option<String>,

    /// Database path or libsql:// URL (overrides config)
    #[arg(long, value_name = "URL_OR_PATH")]
    pub database: Option<String>,

    /// Print the statements that would run, then exit
    #[arg(long)]
    pub dry_run: bool,

    /// Output format: json, table, raw
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

/// What to count and where to write it, extracted from [`Cli`].
#[derive(Clone, Debug, Default)]
pub struct SummaryArgs {
    pub concept_list: Option<PathBuf>,
    pub kb: bool,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }

    #[must_use]
    pub fn summary_args(&self) -> SummaryArgs {
        SummaryArgs {
            concept_list: self.concept_list.clone(),
            kb: self.kb,
            output: self.output.clone(),
            dry_run: self.dry_run,
        }
    }
}

fn parse_variant(value: &str) -> Result<ReportVariant, String> {
    value.parse::<ReportVariant>().map_err(|error| error.to_string())
}
