//! Concept names and concept-list input.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A taxonomic concept name (e.g. `Aegina`, `Aegina citrea`).
///
/// A concept has no identity beyond its string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Concept(String);

impl Concept {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Concept {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Concept {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Concept {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parse a concept list: one concept per line.
///
/// Lines are trimmed (this also strips the `\r` of CRLF files) and blank lines
/// are skipped. Order and duplicates are preserved, so the report has one
/// line per listed concept.
#[must_use]
pub fn parse_concept_list(text: &str) -> Vec<Concept> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Concept::from)
        .collect()
}

/// Read and parse a concept list file.
///
/// # Errors
///
/// Returns [`CoreError::MissingInput`] if `path` does not exist and
/// [`CoreError::Io`] if it cannot be read.
pub fn read_concept_list(path: &Path) -> Result<Vec<Concept>, CoreError> {
    if !path.exists() {
        let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        return Err(CoreError::MissingInput { path });
    }

    let text = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let concepts = parse_concept_list(&text);
    tracing::debug!(path = %path.display(), count = concepts.len(), "read concept list");
    Ok(concepts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_one_concept_per_line() {
        let concepts = parse_concept_list("Aegina\nAegina citrea\nNanomia\n");
        assert_eq!(
            concepts,
            vec![
                Concept::from("Aegina"),
                Concept::from("Aegina citrea"),
                Concept::from("Nanomia"),
            ]
        );
    }

    #[test]
    fn skips_blank_lines_and_strips_crlf() {
        let concepts = parse_concept_list("Abc\r\n\r\n  \nXyz\r\n");
        assert_eq!(concepts, vec![Concept::from("Abc"), Concept::from("Xyz")]);
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let concepts = parse_concept_list("Xyz\nAbc\nXyz");
        let names: Vec<&str> = concepts.iter().map(Concept::as_str).collect();
        assert_eq!(names, vec!["Xyz", "Abc", "Xyz"]);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        let err = read_concept_list(&path).unwrap_err();
        assert!(matches!(err, CoreError::MissingInput { .. }));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("concepts.txt");
        std::fs::write(&path, "Bathochordaeus\nO'Brien\n").unwrap();
        let concepts = read_concept_list(&path).unwrap();
        assert_eq!(concepts.len(), 2);
        assert_eq!(concepts[1].as_str(), "O'Brien");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Concept::from("Nanomia")).unwrap();
        assert_eq!(json, "\"Nanomia\"");
    }
}
