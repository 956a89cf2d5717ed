//! The counting pipeline: concepts in, per-concept counts out.
//!
//! The concept source is resolved first, so a missing list aborts before the
//! database is touched. The CSV is created only once every concept has been
//! counted.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use vs_config::{DatabaseConfig, SummaryConfig};
use vs_core::{Concept, Report, ReportVariant};
use vs_db::AnnotationDb;
use vs_db::service::SummaryService;
use vs_db::templates::{CONCEPTS_WITH_IMAGES, templates_for};

use crate::cli::{GlobalFlags, SummaryArgs};
use crate::commands::concepts::{self, ConceptSource};
use crate::output::{self, csv_file};
use crate::progress::Progress;

#[derive(Debug)]
pub struct SummaryOutcome {
    pub report: Report,
    pub csv_path: PathBuf,
    pub written: usize,
}

/// One statement a dry run would execute.
#[derive(Debug, Serialize)]
pub struct PlannedStatement {
    pub concept: String,
    pub kind: &'static str,
    pub sql: String,
}

pub async fn handle(
    args: &SummaryArgs,
    config: &SummaryConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let source = ConceptSource::from_args(args)?;

    if args.dry_run {
        let plan = plan(&source, config).await?;
        return output::output(&plan, flags.format);
    }

    let outcome = run(&source, args.output.as_deref(), config).await?;
    output::output_report(&outcome.report, flags.format)?;
    if !flags.quiet {
        eprintln!(
            "wrote {} rows to {}",
            outcome.written,
            outcome.csv_path.display()
        );
    }
    Ok(())
}

/// Count every concept from `source` and write the CSV.
pub async fn run(
    source: &ConceptSource,
    output: Option<&Path>,
    config: &SummaryConfig,
) -> anyhow::Result<SummaryOutcome> {
    let (concepts, service) = load_concepts(source, config).await?;
    let service = match service {
        Some(service) => service,
        None => open_service(&config.database).await?,
    };

    let variant = config.output.variant;
    let report = count_all(&service, &concepts, variant).await;

    let csv_path = match output {
        Some(path) => path.to_path_buf(),
        None => csv_file::default_path(&source.output_dir()?, &config.output.file_name),
    };
    let written = csv_file::write_report(&csv_path, &report)?;

    Ok(SummaryOutcome {
        report,
        csv_path,
        written,
    })
}

/// Statements a run would execute, spliced for display.
///
/// A file source needs no database. The knowledgebase source still lists and
/// filters concepts, since that is how the statements' concepts are known.
pub async fn plan(
    source: &ConceptSource,
    config: &SummaryConfig,
) -> anyhow::Result<Vec<PlannedStatement>> {
    let mut planned = Vec::new();
    if *source == ConceptSource::Knowledgebase {
        planned.push(PlannedStatement {
            concept: String::from("*"),
            kind: "concepts_with_images",
            sql: CONCEPTS_WITH_IMAGES.to_string(),
        });
    }

    let (concepts, _) = load_concepts(source, config).await?;
    for concept in &concepts {
        for template in templates_for(config.output.variant) {
            planned.push(PlannedStatement {
                concept: concept.to_string(),
                kind: template.kind.as_str(),
                sql: template.splice(concept),
            });
        }
    }
    Ok(planned)
}

async fn load_concepts(
    source: &ConceptSource,
    config: &SummaryConfig,
) -> anyhow::Result<(Vec<Concept>, Option<SummaryService>)> {
    match source {
        ConceptSource::File(path) => Ok((concepts::from_file(path)?, None)),
        ConceptSource::Knowledgebase => {
            let service = open_service(&config.database).await?;
            let concepts = concepts::from_knowledgebase(&service, &config.kb).await?;
            Ok((concepts, Some(service)))
        }
    }
}

/// Open the annotation database and check that it has the tables we read.
///
/// A local path must already exist; opening a missing file would silently
/// create an empty database.
pub async fn open_service(config: &DatabaseConfig) -> anyhow::Result<SummaryService> {
    config.validate()?;
    if !config.is_remote() && !Path::new(&config.url).exists() {
        anyhow::bail!("database {} does not exist", config.url);
    }

    let db = AnnotationDb::open(config)
        .await
        .context("failed to open annotation database")?;
    db.verify_schema()
        .await
        .with_context(|| format!("{} is not a VARS annotation database", config.url))?;
    Ok(SummaryService::from_db(db))
}

async fn count_all(
    service: &SummaryService,
    concepts: &[Concept],
    variant: ReportVariant,
) -> Report {
    let progress = Progress::bar(concepts.len() as u64, "counting images");
    let report = service
        .summarize(concepts, variant, |counts| {
            progress.set_message(&counts.concept);
            progress.inc(1);
        })
        .await;
    progress.finish_clear();
    report
}
