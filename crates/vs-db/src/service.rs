//! Per-concept summary queries.
//!
//! `SummaryService` runs every template of a report variant for a concept,
//! one statement at a time, and folds the drained snapshots into
//! [`ConceptCounts`]. A failing statement never aborts the run: its count is
//! whatever was read before the failure.

use vs_core::counts::tally;
use vs_core::{CellValue, Concept, ConceptCounts, QueryKind, Report, ReportVariant};

use crate::AnnotationDb;
use crate::error::DatabaseError;
use crate::execute::{execute, execute_or_empty};
use crate::templates::{BoundQuery, CONCEPTS_WITH_IMAGES, templates_for};

pub struct SummaryService {
    db: AnnotationDb,
}

impl SummaryService {
    #[must_use]
    pub const fn from_db(db: AnnotationDb) -> Self {
        Self { db }
    }

    #[must_use]
    pub const fn db(&self) -> &AnnotationDb {
        &self.db
    }

    /// Run every statement of `variant` for one concept.
    pub async fn count_concept(&self, concept: &Concept, variant: ReportVariant) -> ConceptCounts {
        let mut results = Vec::with_capacity(variant.query_kinds().len());
        for template in templates_for(variant) {
            let bound = template.bind(concept);
            let snapshot = execute_or_empty(self.db.conn(), &bound).await;
            results.push((template.kind, snapshot));
        }

        let counts = tally(concept, &results);
        tracing::info!(
            %concept,
            quality = counts.quality_images,
            total = counts.total_images,
            observations = ?counts.observations,
            "counted images"
        );
        counts
    }

    /// Count every concept in order.
    ///
    /// `on_counted` is called after each concept, e.g. to advance a progress bar.
    pub async fn summarize<F>(
        &self,
        concepts: &[Concept],
        variant: ReportVariant,
        mut on_counted: F,
    ) -> Report
    where
        F: FnMut(&ConceptCounts),
    {
        let mut report = Report::new(variant);
        for concept in concepts {
            tracing::info!(%concept, "querying");
            let counts = self.count_concept(concept, variant).await;
            on_counted(&counts);
            report.push(counts);
        }
        report
    }

    /// Every concept that has at least one image.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails to start or the stream
    /// breaks; a partial concept list would silently shrink the report.
    pub async fn list_imaged_concepts(&self) -> Result<Vec<Concept>, DatabaseError> {
        let query = BoundQuery::unbound(QueryKind::AllAnnotations, CONCEPTS_WITH_IMAGES);
        let result = execute(self.db.conn(), &query).await?;
        if let Some(reason) = result.interrupted {
            return Err(DatabaseError::Query(reason));
        }

        let concepts: Vec<Concept> = result
            .column("ConceptName")
            .filter_map(CellValue::as_text)
            .map(Concept::from)
            .collect();
        tracing::debug!(count = concepts.len(), "listed imaged concepts");
        Ok(concepts)
    }
}
