//! Fixed statement templates and concept binding.
//!
//! Every template exists in two forms:
//! - `base`: the literal statement with an empty concept slot, kept for
//!   previews (`--dry-run`) and debug logs via [`QueryTemplate::splice`].
//! - `sql`: the parameterised statement that is actually executed via
//!   [`QueryTemplate::bind`].
//!
//! The concept never reaches the database as SQL text, so quotes and LIKE
//! metacharacters in a name cannot change the statement.

use vs_core::{Concept, QueryKind, ReportVariant};

/// How the concept is matched against `ConceptName`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPattern {
    /// `ConceptName = 'X' OR ConceptName LIKE 'X %'`: the concept itself or
    /// any name that extends it after a space (species of a genus).
    ExactOrPrefix,
    /// `ConceptName LIKE '%X%'`.
    Substring,
}

/// A fixed statement run once per concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTemplate {
    pub kind: QueryKind,
    pub pattern: MatchPattern,
    pub base: &'static str,
    pub sql: &'static str,
}

/// A template with its parameters filled in for one concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundQuery {
    pub kind: QueryKind,
    pub sql: &'static str,
    pub params: Vec<String>,
}

impl BoundQuery {
    /// A statement without parameters.
    #[must_use]
    pub const fn unbound(kind: QueryKind, sql: &'static str) -> Self {
        Self {
            kind,
            sql,
            params: Vec::new(),
        }
    }

    pub(crate) fn libsql_params(&self) -> libsql::params::Params {
        if self.params.is_empty() {
            return libsql::params::Params::None;
        }
        libsql::params::Params::Positional(
            self.params
                .iter()
                .map(|param| libsql::Value::Text(param.clone()))
                .collect(),
        )
    }
}

pub const ALL_ANNOTATIONS: QueryTemplate = QueryTemplate {
    kind: QueryKind::AllAnnotations,
    pattern: MatchPattern::ExactOrPrefix,
    base: "SELECT DISTINCT ConceptName, Image \
           FROM Annotations \
           WHERE Image IS NOT NULL AND (\
           ConceptName = '' COLLATE NOCASE OR \
           ConceptName LIKE ' %') \
           ORDER BY ConceptName ASC",
    sql: "SELECT DISTINCT ConceptName, Image \
          FROM Annotations \
          WHERE Image IS NOT NULL AND (\
          ConceptName = ?1 COLLATE NOCASE OR \
          ConceptName LIKE ?2 ESCAPE '\\') \
          ORDER BY ConceptName ASC",
};

pub const QUALITY_ANNOTATIONS: QueryTemplate = QueryTemplate {
    kind: QueryKind::QualityAnnotations,
    pattern: MatchPattern::ExactOrPrefix,
    base: "SELECT DISTINCT ConceptName, ImageReference \
           FROM QualityImageAnnotations \
           WHERE ImageReference IS NOT NULL AND (\
           ConceptName = '' COLLATE NOCASE OR \
           ConceptName LIKE ' %') \
           ORDER BY ConceptName ASC",
    sql: "SELECT DISTINCT ConceptName, ImageReference \
          FROM QualityImageAnnotations \
          WHERE ImageReference IS NOT NULL AND (\
          ConceptName = ?1 COLLATE NOCASE OR \
          ConceptName LIKE ?2 ESCAPE '\\') \
          ORDER BY ConceptName ASC",
};

pub const OBSERVATIONS: QueryTemplate = QueryTemplate {
    kind: QueryKind::Observations,
    pattern: MatchPattern::ExactOrPrefix,
    base: "SELECT DISTINCT ObservationID_FK \
           FROM Annotations \
           WHERE (\
           ConceptName = '' COLLATE NOCASE OR \
           ConceptName LIKE ' %')",
    sql: "SELECT DISTINCT ObservationID_FK \
          FROM Annotations \
          WHERE (\
          ConceptName = ?1 COLLATE NOCASE OR \
          ConceptName LIKE ?2 ESCAPE '\\')",
};

pub const ALL_ANNOTATIONS_GROUPED: QueryTemplate = QueryTemplate {
    kind: QueryKind::AllAnnotationsGrouped,
    pattern: MatchPattern::Substring,
    base: "SELECT ConceptName, COUNT(DISTINCT Image) AS ImageCount \
           FROM Annotations \
           WHERE Image IS NOT NULL AND ConceptName LIKE '%%' \
           GROUP BY ConceptName \
           ORDER BY ConceptName ASC",
    sql: "SELECT ConceptName, COUNT(DISTINCT Image) AS ImageCount \
          FROM Annotations \
          WHERE Image IS NOT NULL AND ConceptName LIKE ?1 ESCAPE '\\' \
          GROUP BY ConceptName \
          ORDER BY ConceptName ASC",
};

pub const QUALITY_ANNOTATIONS_GROUPED: QueryTemplate = QueryTemplate {
    kind: QueryKind::QualityAnnotationsGrouped,
    pattern: MatchPattern::Substring,
    base: "SELECT ConceptName, COUNT(DISTINCT ImageReference) AS ImageCount \
           FROM QualityImageAnnotations \
           WHERE ImageReference IS NOT NULL AND ConceptName LIKE '%%' \
           GROUP BY ConceptName \
           ORDER BY ConceptName ASC",
    sql: "SELECT ConceptName, COUNT(DISTINCT ImageReference) AS ImageCount \
          FROM QualityImageAnnotations \
          WHERE ImageReference IS NOT NULL AND ConceptName LIKE ?1 ESCAPE '\\' \
          GROUP BY ConceptName \
          ORDER BY ConceptName ASC",
};

/// Every concept that has at least one image, used as the knowledgebase
/// candidate list.
pub const CONCEPTS_WITH_IMAGES: &str = "SELECT ConceptName \
     FROM Annotations \
     WHERE Image IS NOT NULL \
     GROUP BY ConceptName \
     ORDER BY ConceptName ASC";

/// Template for a statement kind.
#[must_use]
pub const fn template(kind: QueryKind) -> &'static QueryTemplate {
    match kind {
        QueryKind::AllAnnotations => &ALL_ANNOTATIONS,
        QueryKind::QualityAnnotations => &QUALITY_ANNOTATIONS,
        QueryKind::Observations => &OBSERVATIONS,
        QueryKind::AllAnnotationsGrouped => &ALL_ANNOTATIONS_GROUPED,
        QueryKind::QualityAnnotationsGrouped => &QUALITY_ANNOTATIONS_GROUPED,
    }
}

/// Templates a variant runs for every concept, in execution order.
pub fn templates_for(variant: ReportVariant) -> impl Iterator<Item = &'static QueryTemplate> {
    variant.query_kinds().iter().copied().map(template)
}

/// Escape `%`, `_` and the escape character itself for a `LIKE ... ESCAPE '\'`
/// pattern.
#[must_use]
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

impl QueryTemplate {
    /// Bind a concept to the parameterised statement.
    #[must_use]
    pub fn bind(&self, concept: &Concept) -> BoundQuery {
        let name = concept.as_str();
        let params = match self.pattern {
            MatchPattern::ExactOrPrefix => {
                vec![name.to_string(), format!("{} %", escape_like(name))]
            }
            MatchPattern::Substring => vec![format!("%{}%", escape_like(name))],
        };
        BoundQuery {
            kind: self.kind,
            sql: self.sql,
            params,
        }
    }

    /// Byte offsets in `base` where the concept is inserted, in ascending order.
    ///
    /// - exact/prefix: right after the first `'`, and right before the ` %`
    ///   of the prefix pattern.
    /// - substring: right before the closing `%` of `'%%'`.
    #[must_use]
    pub fn splice_offsets(&self) -> Vec<usize> {
        match self.pattern {
            MatchPattern::ExactOrPrefix => {
                let quote = self.base.find('\'').map_or(0, |idx| idx + 1);
                let percent = self.base.find('%').map_or(0, |idx| idx.saturating_sub(1));
                vec![quote, percent]
            }
            MatchPattern::Substring => vec![self.base.rfind('%').unwrap_or(0)],
        }
    }

    /// Render the literal statement for display.
    ///
    /// The concept is inserted at [`Self::splice_offsets`] with single quotes
    /// doubled; everything else in `base` is left untouched. This output is
    /// never executed.
    #[must_use]
    pub fn splice(&self, concept: &Concept) -> String {
        let quoted = concept.as_str().replace('\'', "''");
        let mut out = String::with_capacity(self.base.len() + 2 * quoted.len());
        let mut cursor = 0;
        for offset in self.splice_offsets() {
            out.push_str(&self.base[cursor..offset]);
            out.push_str(&quoted);
            cursor = offset;
        }
        out.push_str(&self.base[cursor..]);
        out
    }
}

/// Literal statements a variant would run for one concept.
#[must_use]
pub fn preview(concept: &Concept, variant: ReportVariant) -> Vec<String> {
    templates_for(variant)
        .map(|template| template.splice(concept))
        .collect()
}
