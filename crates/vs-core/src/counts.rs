//! Per-concept counting and report aggregation.
//!
//! Counts are derived from drained [`QueryResult`] snapshots. Row-per-item
//! queries are counted by row; grouped queries are summed over their
//! pre-aggregated count column.

use serde::{Deserialize, Serialize};

use crate::concept::Concept;
use crate::enums::{QueryKind, ReportVariant};
use crate::result::QueryResult;

/// Name of the pre-aggregated count column produced by grouped statements.
pub const GROUPED_COUNT_COLUMN: &str = "ImageCount";

/// Label used for the grand total row.
pub const GRAND_TOTAL_LABEL: &str = "TOTAL";

/// Counts for one concept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptCounts {
    pub concept: String,
    /// Only populated by the `observations` variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<u64>,
    pub quality_images: u64,
    pub total_images: u64,
    /// True when at least one statement failed and a partial count was used.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub partial: bool,
}

impl ConceptCounts {
    #[must_use]
    pub fn empty(concept: &Concept) -> Self {
        Self {
            concept: concept.to_string(),
            ..Self::default()
        }
    }

    /// Fields in CSV order for `variant`.
    #[must_use]
    pub fn record(&self, variant: ReportVariant) -> Vec<String> {
        let mut fields = Vec::with_capacity(4);
        fields.push(self.concept.clone());
        if variant.has_observations() {
            fields.push(self.observations.unwrap_or(0).to_string());
        }
        fields.push(self.quality_images.to_string());
        fields.push(self.total_images.to_string());
        fields
    }
}

/// Number of rows in a snapshot, regardless of row content.
#[must_use]
pub fn count_rows(result: &QueryResult) -> u64 {
    result.len() as u64
}

/// Sum a pre-aggregated count column across all rows.
///
/// Cells that are not non-negative integers contribute zero and are logged.
#[must_use]
pub fn sum_column(result: &QueryResult, column: &str) -> u64 {
    if result.column_index(column).is_none() && !result.is_empty() {
        tracing::warn!(column, "count column missing from grouped result");
        return 0;
    }

    result
        .column(column)
        .map(|cell| {
            cell.as_count().unwrap_or_else(|| {
                tracing::warn!(column, ?cell, "ignoring non-count cell");
                0
            })
        })
        .sum()
}

/// Count a snapshot the way its statement kind requires.
#[must_use]
pub fn count_for(kind: QueryKind, result: &QueryResult) -> u64 {
    if kind.is_grouped() {
        sum_column(result, GROUPED_COUNT_COLUMN)
    } else {
        count_rows(result)
    }
}

/// Fold the ordered snapshots of one concept into its counts.
///
/// Each `(kind, result)` pair fills the field its kind maps to. A partial
/// snapshot still contributes the rows read before the failure.
#[must_use]
pub fn tally(concept: &Concept, results: &[(QueryKind, QueryResult)]) -> ConceptCounts {
    let mut counts = ConceptCounts::empty(concept);
    for (kind, result) in results {
        let count = count_for(*kind, result);
        if let Some(reason) = &result.interrupted {
            tracing::warn!(%concept, query = %kind, count, %reason, "using partial count");
            counts.partial = true;
        }
        match kind {
            QueryKind::AllAnnotations | QueryKind::AllAnnotationsGrouped => {
                counts.total_images = count;
            }
            QueryKind::QualityAnnotations | QueryKind::QualityAnnotationsGrouped => {
                counts.quality_images = count;
            }
            QueryKind::Observations => counts.observations = Some(count),
        }
    }
    counts
}

/// Counts for every concept of one run, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub variant: ReportVariant,
    pub rows: Vec<ConceptCounts>,
}

impl Report {
    #[must_use]
    pub const fn new(variant: ReportVariant) -> Self {
        Self {
            variant,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, counts: ConceptCounts) {
        self.rows.push(counts);
    }

    /// Sum of every row, labelled [`GRAND_TOTAL_LABEL`].
    #[must_use]
    pub fn grand_total(&self) -> ConceptCounts {
        let observations = self
            .variant
            .has_observations()
            .then(|| self.rows.iter().filter_map(|row| row.observations).sum());
        ConceptCounts {
            concept: GRAND_TOTAL_LABEL.to_string(),
            observations,
            quality_images: self.rows.iter().map(|row| row.quality_images).sum(),
            total_images: self.rows.iter().map(|row| row.total_images).sum(),
            partial: self.rows.iter().any(|row| row.partial),
        }
    }

    /// Rows to display: every concept, plus the grand total when the variant
    /// reports one.
    #[must_use]
    pub fn display_rows(&self) -> Vec<ConceptCounts> {
        let mut rows = self.rows.clone();
        if self.variant.has_grand_total() {
            rows.push(self.grand_total());
        }
        rows
    }
}
