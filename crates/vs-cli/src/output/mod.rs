use serde::Serialize;
use serde_json::Value;
use vs_core::{ConceptCounts, Report, ReportVariant};

use crate::cli::OutputFormat;
use crate::ui;

pub mod csv_file;
pub mod table;

/// Marker appended to concepts whose count came from a failed statement.
const PARTIAL_MARKER: &str = " *";

/// Console shape of a finished report.
#[derive(Debug, Serialize)]
struct ReportView<'a> {
    variant: ReportVariant,
    rows: &'a [ConceptCounts],
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<ConceptCounts>,
}

/// Render a list of records; in table mode each record's fields become
/// columns.
pub fn render<T: Serialize>(items: &[T], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Table => render_table(items),
        OutputFormat::Raw => Ok(serde_json::to_string(items)?),
    }
}

/// Print a list of records in the requested format.
pub fn output<T: Serialize>(items: &[T], format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(items, format)?;
    println!("{rendered}");
    Ok(())
}

/// Render a report: one row per concept, plus a grand total for variants
/// that carry one.
pub fn render_report(report: &Report, format: OutputFormat) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        let view = ReportView {
            variant: report.variant,
            rows: &report.rows,
            total: report
                .variant
                .has_grand_total()
                .then(|| report.grand_total()),
        };
        let rendered = if format == OutputFormat::Json {
            serde_json::to_string_pretty(&view)?
        } else {
            serde_json::to_string(&view)?
        };
        return Ok(rendered);
    }

    if report.rows.is_empty() {
        return Ok(String::from("(no concepts)"));
    }

    let prefs = ui::prefs();
    let options = table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    };
    let rows = report
        .display_rows()
        .iter()
        .map(|counts| {
            let mut record = counts.record(report.variant);
            if counts.partial {
                record[0].push_str(PARTIAL_MARKER);
            }
            record
        })
        .collect::<Vec<_>>();

    let mut rendered = table::render_entity_table(report.variant.columns(), &rows, options);
    if report.rows.iter().any(|row| row.partial) {
        rendered.push_str("\n\n* a statement failed; count is partial");
    }
    Ok(rendered)
}

pub fn output_report(report: &Report, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render_report(report, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table<T: Serialize>(items: &[T]) -> anyhow::Result<String> {
    let prefs = ui::prefs();
    let options = table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    };

    if items.is_empty() {
        return Ok(String::from("(no rows)"));
    }

    let values = items
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;

    let mut headers = Vec::<String>::new();
    for map in values.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    if headers.is_empty() {
        return Ok(String::from("(no columns)"));
    }

    headers.sort();

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = values
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    Ok(table::render_entity_table(&header_refs, &rows, options))
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use vs_core::{ConceptCounts, Report, ReportVariant};

    use super::{render, render_report};
    use crate::cli::OutputFormat;

    fn counts(concept: &str, quality: u64, total: u64) -> ConceptCounts {
        ConceptCounts {
            concept: concept.to_string(),
            observations: None,
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

    #[derive(Serialize)]
    struct Planned {
        concept: &'static str,
        sql: &'static str,
    }

    #[test]
    fn basic_table_has_one_row_per_concept() {
        let report = report(
            ReportVariant::Basic,
            vec![counts("Abc", 1, 3), counts("Xyz", 0, 0)],
        );
        let out = render_report(&report, OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("concept"));
        assert!(lines[0].contains("qualityCount"));
        assert!(lines[0].contains("totalCount"));
        assert!(lines[2].starts_with("Abc"));
        assert!(lines[2].trim_end().ends_with('3'));
        assert!(!out.contains("TOTAL"));
    }

    #[test]
    fn grouped_table_ends_with_grand_total() {
        let report = report(
            ReportVariant::Grouped,
            vec![counts("Aegina", 2, 3), counts("Aeginura", 0, 1)],
        );
        let out = render_report(&report, OutputFormat::Table).expect("table render should work");
        let last = out.lines().last().expect("table has rows");

        assert!(last.starts_with("TOTAL"));
        let numbers: Vec<&str> = last.split_whitespace().skip(1).collect();
        assert_eq!(numbers, vec!["2", "4"]);
    }

    #[test]
    fn partial_rows_are_flagged() {
        let mut broken = counts("Aegina", 0, 2);
        broken.partial = true;
        let report = report(ReportVariant::Basic, vec![broken]);
        let out = render_report(&report, OutputFormat::Table).expect("table render should work");

        assert!(out.contains("Aegina *"));
        assert!(out.contains("count is partial"));
    }

    #[test]
    fn json_report_includes_total_only_when_grouped() {
        let basic = report(ReportVariant::Basic, vec![counts("Abc", 1, 3)]);
        let out = render_report(&basic, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["variant"], "basic");
        assert_eq!(parsed["rows"][0]["concept"], "Abc");
        assert_eq!(parsed["rows"][0]["total_images"], 3);
        assert!(parsed.get("total").is_none());

        let grouped = report(ReportVariant::Grouped, vec![counts("Abc", 1, 3)]);
        let out = render_report(&grouped, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["total"]["concept"], "TOTAL");
        assert_eq!(parsed["total"]["quality_images"], 1);
    }

    #[test]
    fn empty_report_table() {
        let out = render_report(&Report::new(ReportVariant::Basic), OutputFormat::Table)
            .expect("table render should work");
        assert_eq!(out, "(no concepts)");
    }

    #[test]
    fn array_table_lists_every_field() {
        let planned = vec![Planned {
            concept: "Aegina",
            sql: "SELECT 1",
        }];
        let out = render(&planned, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header line");
        let concept_at = header.find("concept").expect("concept column");
        let sql_at = header.find("sql").expect("sql column");
        assert!(concept_at < sql_at);
        assert!(out.contains("SELECT 1"));
    }

    #[test]
    fn record_lists_render_in_every_format() {
        let planned: Vec<Planned> = Vec::new();
        let out = render(&planned, OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");

        let planned = vec![Planned {
            concept: "Aegina",
            sql: "SELECT 1",
        }];
        let out = render(&planned, OutputFormat::Raw).expect("raw render should work");
        assert_eq!(out, r#"[{"concept":"Aegina","sql":"SELECT 1"}]"#);
        let out = render(&planned, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed[0]["sql"], "SELECT 1");
    }
}
