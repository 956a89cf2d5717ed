//! Query kinds and report variants.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// QueryKind
// ---------------------------------------------------------------------------

/// One of the fixed statements run per concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    /// Distinct images in `Annotations` (exact or prefix match).
    AllAnnotations,
    /// Distinct image references in `QualityImageAnnotations` (exact or prefix match).
    QualityAnnotations,
    /// Distinct observations in `Annotations` (exact or prefix match).
    Observations,
    /// Per-concept image counts in `Annotations` (substring match).
    AllAnnotationsGrouped,
    /// Per-concept image counts in `QualityImageAnnotations` (substring match).
    QualityAnnotationsGrouped,
}

impl QueryKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllAnnotations => "all_annotations",
            Self::QualityAnnotations => "quality_annotations",
            Self::Observations => "observations",
            Self::AllAnnotationsGrouped => "all_annotations_grouped",
            Self::QualityAnnotationsGrouped => "quality_annotations_grouped",
        }
    }

    /// Whether the result carries a pre-aggregated count column instead of
    /// one row per counted item.
    #[must_use]
    pub const fn is_grouped(self) -> bool {
        matches!(
            self,
            Self::AllAnnotationsGrouped | Self::QualityAnnotationsGrouped
        )
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReportVariant
// ---------------------------------------------------------------------------

/// Which set of queries a run executes and which columns the report carries.
///
/// ```text
/// basic        -> all_annotations, quality_annotations           -> concept,quality,total
/// observations -> all_annotations, quality_annotations, obs.     -> concept,observations,quality,total
/// grouped      -> all_annotations_grouped, quality_..._grouped   -> concept,quality,total (+ grand total)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportVariant {
    #[default]
    Basic,
    Observations,
    Grouped,
}

impl ReportVariant {
    pub const ALL: [Self; 3] = [Self::Basic, Self::Observations, Self::Grouped];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Observations => "observations",
            Self::Grouped => "grouped",
        }
    }

    /// Statements run for every concept, in execution order.
    #[must_use]
    pub const fn query_kinds(self) -> &'static [QueryKind] {
        match self {
            Self::Basic => &[QueryKind::AllAnnotations, QueryKind::QualityAnnotations],
            Self::Observations => &[
                QueryKind::AllAnnotations,
                QueryKind::QualityAnnotations,
                QueryKind::Observations,
            ],
            Self::Grouped => &[
                QueryKind::AllAnnotationsGrouped,
                QueryKind::QualityAnnotationsGrouped,
            ],
        }
    }

    /// Whether the report includes an observation count column.
    #[must_use]
    pub const fn has_observations(self) -> bool {
        matches!(self, Self::Observations)
    }

    /// Whether the console report ends with a grand total row.
    #[must_use]
    pub const fn has_grand_total(self) -> bool {
        matches!(self, Self::Grouped)
    }

    /// Column names of a report row, in CSV field order.
    #[must_use]
    pub const fn columns(self) -> &'static [&'static str] {
        if self.has_observations() {
            &["concept", "observationCount", "qualityCount", "totalCount"]
        } else {
            &["concept", "qualityCount", "totalCount"]
        }
    }
}

impl fmt::Display for ReportVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "unknown report variant '{s}' (expected basic, observations, or grouped)"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ReportVariant::Basic, 2)]
    #[case(ReportVariant::Observations, 3)]
    #[case(ReportVariant::Grouped, 2)]
    fn query_count_per_variant(#[case] variant: ReportVariant, #[case] expected: usize) {
        assert_eq!(variant.query_kinds().len(), expected);
    }

    #[test]
    fn grouped_variant_runs_only_grouped_queries() {
        assert!(
            ReportVariant::Grouped
                .query_kinds()
                .iter()
                .all(|kind| kind.is_grouped())
        );
        assert!(
            !ReportVariant::Basic
                .query_kinds()
                .iter()
                .any(|kind| kind.is_grouped())
        );
    }

    #[test]
    fn columns_follow_csv_field_order() {
        assert_eq!(
            ReportVariant::Basic.columns(),
            &["concept", "qualityCount", "totalCount"]
        );
        assert_eq!(
            ReportVariant::Observations.columns(),
            &["concept", "observationCount", "qualityCount", "totalCount"]
        );
    }

    #[rstest]
    #[case("basic", ReportVariant::Basic)]
    #[case("Observations", ReportVariant::Observations)]
    #[case(" grouped ", ReportVariant::Grouped)]
    fn parses_variant_names(#[case] input: &str, #[case] expected: ReportVariant) {
        assert_eq!(input.parse::<ReportVariant>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_variant() {
        assert!("everything".parse::<ReportVariant>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&QueryKind::QualityAnnotationsGrouped).unwrap();
        assert_eq!(json, "\"quality_annotations_grouped\"");
        let variant: ReportVariant = serde_json::from_str("\"observations\"").unwrap();
        assert_eq!(variant, ReportVariant::Observations);
    }
}
