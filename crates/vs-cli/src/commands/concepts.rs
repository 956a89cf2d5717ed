//! Where the concept list comes from.

use std::path::{Path, PathBuf};

use anyhow::Context;
use vs_config::KbConfig;
use vs_core::Concept;
use vs_core::concept::read_concept_list;
use vs_db::service::SummaryService;
use vs_phylogeny::PhylogenyClient;

use crate::cli::SummaryArgs;
use crate::progress::Progress;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConceptSource {
    /// A text file with one concept per line.
    File(PathBuf),
    /// Every imaged concept in the database that sits at the configured rank.
    Knowledgebase,
}

impl ConceptSource {
    pub fn from_args(args: &SummaryArgs) -> anyhow::Result<Self> {
        if args.kb {
            return Ok(Self::Knowledgebase);
        }
        args.concept_list
            .clone()
            .map(Self::File)
            .context("a concept list file is required unless --kb is given")
    }

    /// Directory the default CSV lands in: next to the list file, or the
    /// current directory for the knowledgebase source.
    pub fn output_dir(&self) -> anyhow::Result<PathBuf> {
        let cwd = || std::env::current_dir().context("failed to determine current directory");
        match self {
            Self::File(path) => {
                let absolute = std::path::absolute(path)
                    .with_context(|| format!("failed to resolve {}", path.display()))?;
                match absolute.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
                    _ => cwd(),
                }
            }
            Self::Knowledgebase => cwd(),
        }
    }
}

/// Read the concept list file.
pub fn from_file(path: &Path) -> anyhow::Result<Vec<Concept>> {
    let concepts = read_concept_list(path)?;
    if concepts.is_empty() {
        tracing::warn!(path = %path.display(), "concept list is empty");
    }
    Ok(concepts)
}

/// List imaged concepts from the database and keep those at `kb.rank`.
pub async fn from_knowledgebase(
    service: &SummaryService,
    kb: &KbConfig,
) -> anyhow::Result<Vec<Concept>> {
    let spinner = Progress::spinner("listing imaged concepts");
    let imaged = service
        .list_imaged_concepts()
        .await
        .context("failed to list imaged concepts")?;
    let listed = imaged.len();

    spinner.set_message(&format!("checking {listed} concepts at rank {}", kb.rank));
    let client = PhylogenyClient::new(kb).context("failed to build knowledgebase client")?;
    let kept = client.filter_at_rank(imaged, &kb.rank).await;
    spinner.finish_clear();

    tracing::info!(listed, kept = kept.len(), rank = %kb.rank, "filtered concepts by rank");
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn kb_flag_wins() {
        let args = SummaryArgs {
            kb: true,
            ..SummaryArgs::default()
        };
        assert_eq!(ConceptSource::from_args(&args).unwrap(), ConceptSource::Knowledgebase);
    }

    #[test]
    fn file_source_needs_a_path() {
        assert!(ConceptSource::from_args(&SummaryArgs::default()).is_err());

        let args = SummaryArgs {
            concept_list: Some(PathBuf::from("list.txt")),
            ..SummaryArgs::default()
        };
        assert_eq!(
            ConceptSource::from_args(&args).unwrap(),
            ConceptSource::File(PathBuf::from("list.txt"))
        );
    }

    #[test]
    fn output_dir_is_next_to_the_list() {
        let dir = tempfile::tempdir().unwrap();
        let source = ConceptSource::File(dir.path().join("concepts.txt"));
        assert_eq!(source.output_dir().unwrap(), dir.path());
    }

    #[test]
    fn bare_file_name_resolves_to_current_dir() {
        let source = ConceptSource::File(PathBuf::from("concepts.txt"));
        assert_eq!(source.output_dir().unwrap(), std::env::current_dir().unwrap());
        assert_eq!(
            ConceptSource::Knowledgebase.output_dir().unwrap(),
            std::env::current_dir().unwrap()
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = from_file(&dir.path().join("nope.txt")).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("nope.txt"));
        assert!(message.ends_with("does not exist. Check options."));
    }
}
