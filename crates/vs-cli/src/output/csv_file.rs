//! Headerless CSV report file.
//!
//! One record per concept, fields in the variant's column order. The file is
//! opened once after counting finishes, so an aborted run leaves nothing
//! behind. A record that fails to write is skipped with a warning; a failed
//! flush is logged and not retried.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use vs_core::Report;

/// Where the CSV goes when `-o` is not given: `file_name` inside `dir`.
#[must_use]
pub fn default_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(file_name)
}

/// Write every concept row of `report` to `path`, replacing any existing file.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns an error only if the file cannot be created.
pub fn write_report(path: &Path, report: &Report) -> anyhow::Result<usize> {
    let writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let written = write_records(writer, report);
    tracing::info!(path = %path.display(), rows = written, "wrote report");
    Ok(written)
}

/// Write rows to an open writer, then flush it once.
pub fn write_records<W: Write>(mut writer: ::csv::Writer<W>, report: &Report) -> usize {
    let mut written = 0;
    for counts in &report.rows {
        match writer.write_record(counts.record(report.variant)) {
            Ok(()) => written += 1,
            Err(error) => {
                tracing::warn!(concept = %counts.concept, %error, "failed to write CSV record");
            }
        }
    }
    if let Err(error) = writer.flush() {
        tracing::warn!(%error, "failed to flush CSV output");
    }
    written
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vs_core::{ConceptCounts, Report, ReportVariant};

    use super::*;

    fn counts(concept: &str, observations: Option<u64>, quality: u64, total: u64) -> ConceptCounts {
        ConceptCounts {
            concept: concept.to_string(),
            observations,
            quality_images: quality,
            total_images: total,
            partial: false,
        }
    }

    fn report(variant: ReportVariant, rows: Vec<ConceptCounts>) -> Report {
        let mut report = Report::new(variant);
        for row in rows {
            report.push(row);
        }
        report
    }

    fn to_string(report: &Report) -> String {
        let mut buf = Vec::new();
        {
            let writer = ::csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut buf);
            write_records(writer, report);
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn basic_rows_without_header() {
        let report = report(
            ReportVariant::Basic,
            vec![counts("Abc", None, 1, 3), counts("Xyz", None, 0, 0)],
        );
        assert_eq!(to_string(&report), "Abc,1,3\nXyz,0,0\n");
    }

    #[test]
    fn observation_column_comes_second() {
        let report = report(
            ReportVariant::Observations,
            vec![counts("Aegina", Some(2), 2, 3)],
        );
        assert_eq!(to_string(&report), "Aegina,2,2,3\n");
    }

    #[test]
    fn grouped_file_has_no_total_row() {
        let report = report(
            ReportVariant::Grouped,
            vec![counts("Aegina", None, 2, 3), counts("Aeginura", None, 0, 1)],
        );
        assert_eq!(to_string(&report), "Aegina,2,3\nAeginura,0,1\n");
    }

    #[test]
    fn concepts_with_commas_are_quoted() {
        let report = report(ReportVariant::Basic, vec![counts("Aegina, sp. A", None, 0, 1)]);
        assert_eq!(to_string(&report), "\"Aegina, sp. A\",0,1\n");
    }

    #[test]
    fn write_report_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = default_path(dir.path(), "counts.csv");
        std::fs::write(&path, "stale\n").unwrap();

        let report = report(ReportVariant::Basic, vec![counts("Abc", None, 1, 3)]);
        let written = write_report(&path, &report).unwrap();

        assert_eq!(written, 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Abc,1,3\n");
    }

    #[test]
    fn write_report_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("counts.csv");
        let report = report(ReportVariant::Basic, Vec::new());
        assert!(write_report(&path, &report).is_err());
    }
}
