//! CSV table input and output.
//!
//! The input table must carry `url` and `label` columns; every other column is
//! passed through untouched. The output table is the input table with the four
//! enrichment columns. When the input already has one of those columns (e.g. a
//! re-run over a previous output) it is overwritten in place rather than duplicated.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Writer};

use crate::config::{COLUMN_LABEL, COLUMN_URL, ENRICHMENT_COLUMNS};
use crate::models::{FeatureRecord, InputRow, Label};

/// A loaded input table.
#[derive(Debug, Clone)]
pub struct InputTable {
    pub headers: StringRecord,
    pub rows: Vec<InputRow>,
}

/// Reads the input table from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, a required column is missing,
/// a row is malformed, or a label is neither `phish` nor `legit`.
pub fn read_input_table(path: &Path) -> Result<InputTable> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input table: {}", path.display()))?;
    read_input_from(file).with_context(|| format!("Failed to read {}", path.display()))
}

/// Reads the input table from any CSV source.
pub fn read_input_from<R: Read>(reader: R) -> Result<InputTable> {
    let mut reader = ReaderBuilder::new().from_reader(reader);
    let headers = reader.headers().context("Failed to read CSV header")?.clone();

    let url_idx = column_index(&headers, COLUMN_URL)
        .ok_or_else(|| anyhow::anyhow!("Input table has no '{COLUMN_URL}' column"))?;
    let label_idx = column_index(&headers, COLUMN_LABEL)
        .ok_or_else(|| anyhow::anyhow!("Input table has no '{COLUMN_LABEL}' column"))?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        // Row numbers are 1-based and count the header line
        let line = i + 2;
        let fields = record.with_context(|| format!("Malformed CSV row at line {line}"))?;

        let url = fields.get(url_idx).unwrap_or_default().to_string();
        let raw_label = fields.get(label_idx).unwrap_or_default();
        let label: Label = raw_label.trim().parse().map_err(|_| {
            anyhow::anyhow!("Unknown label {raw_label:?} at line {line} (expected phish or legit)")
        })?;

        rows.push(InputRow { url, label, fields });
    }

    log::debug!("Read {} input rows", rows.len());
    Ok(InputTable { headers, rows })
}

/// Writes the enriched table to `path`, creating parent directories.
///
/// Returns the number of data rows written.
pub fn write_output_table(
    path: &Path,
    headers: &StringRecord,
    records: &[FeatureRecord],
) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_output_to(file, headers, records)
}

/// Writes the enriched table to any CSV sink.
pub fn write_output_to<W: Write>(
    writer: W,
    headers: &StringRecord,
    records: &[FeatureRecord],
) -> Result<usize> {
    let layout = OutputLayout::new(headers);
    let mut writer = Writer::from_writer(writer);

    writer.write_record(&layout.headers)?;
    for record in records {
        writer.write_record(layout.row(record))?;
    }
    writer.flush().context("Failed to flush output table")?;

    Ok(records.len())
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

/// Float columns are whole days; one decimal keeps them recognizably floating point.
fn format_days(value: f64) -> String {
    format!("{value:.1}")
}

/// Column positions of the output table.
struct OutputLayout {
    headers: Vec<String>,
    /// Position of each enrichment column, in `ENRICHMENT_COLUMNS` order
    positions: [usize; 4],
}

impl OutputLayout {
    fn new(input_headers: &StringRecord) -> Self {
        let mut headers: Vec<String> = input_headers.iter().map(str::to_string).collect();
        let mut positions = [0usize; 4];

        for (slot, name) in positions.iter_mut().zip(ENRICHMENT_COLUMNS) {
            *slot = match column_index(input_headers, name) {
                Some(idx) => idx,
                None => {
                    headers.push((*name).to_string());
                    headers.len() - 1
                }
            };
        }

        Self { headers, positions }
    }

    fn row(&self, record: &FeatureRecord) -> Vec<String> {
        let mut row: Vec<String> = record.passthrough.iter().map(str::to_string).collect();
        row.resize(self.headers.len(), String::new());

        // Same order as ENRICHMENT_COLUMNS
        let values = [
            record.domain.clone(),
            format_days(record.domain_age_days),
            format_days(record.tls_days_valid),
            record.tls_valid_flag.to_string(),
        ];
        for (position, value) in self.positions.iter().zip(values) {
            row[*position] = value;
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str], domain: &str, age: f64, tls: f64, flag: u8) -> FeatureRecord {
        FeatureRecord {
            url: fields[0].to_string(),
            label: Label::Legit,
            domain: domain.to_string(),
            domain_age_days: age,
            tls_days_valid: tls,
            tls_valid_flag: flag,
            passthrough: StringRecord::from(fields.to_vec()),
        }
    }

    #[test]
    fn test_read_input_table() {
        let csv = "url,label,url_length\nhttp://a.example/x,phish,18\nhttps://b.example,LEGIT,17\n";
        let table = read_input_from(csv.as_bytes()).expect("should read");

        assert_eq!(table.headers, StringRecord::from(vec!["url", "label", "url_length"]));
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].url, "http://a.example/x");
        assert_eq!(table.rows[0].label, Label::Phish);
        assert_eq!(table.rows[1].label, Label::Legit);
        assert_eq!(table.rows[1].fields.get(2), Some("17"));
    }

    #[test]
    fn test_read_columns_in_any_order() {
        let csv = "label,entropy,url\nlegit,3.2,https://c.example\n";
        let table = read_input_from(csv.as_bytes()).expect("should read");
        assert_eq!(table.rows[0].url, "https://c.example");
        assert_eq!(table.rows[0].label, Label::Legit);
    }

    #[test]
    fn test_missing_url_column() {
        let err = read_input_from("link,label\nx,phish\n".as_bytes()).expect_err("no url");
        assert!(err.to_string().contains("'url'"));
    }

    #[test]
    fn test_missing_label_column() {
        let err = read_input_from("url\nhttp://a.example\n".as_bytes()).expect_err("no label");
        assert!(err.to_string().contains("'label'"));
    }

    #[test]
    fn test_unknown_label() {
        let err = read_input_from("url,label\nhttp://a.example,spam\n".as_bytes())
            .expect_err("bad label");
        let msg = err.to_string();
        assert!(msg.contains("spam"));
        assert!(msg.contains("line 2"));
    }

    #[test]
    fn test_write_appends_enrichment_columns() {
        let headers = StringRecord::from(vec!["url", "label", "url_length"]);
        let records = vec![
            record(&["http://known-good.test/a", "legit", "24"], "known-good.test", 400.0, 88.0, 1),
            record(&["not a url", "phish", "9"], "", -1.0, -1.0, 0),
        ];

        let mut out = Vec::new();
        let written = write_output_to(&mut out, &headers, &records).expect("write");
        assert_eq!(written, 2);

        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "url,label,url_length,domain,domain_age_days,tls_days_valid,tls_valid_flag"
        );
        assert_eq!(
            lines[1],
            "http://known-good.test/a,legit,24,known-good.test,400.0,88.0,1"
        );
        assert_eq!(lines[2], "not a url,phish,9,,-1.0,-1.0,0");
    }

    #[test]
    fn test_write_overwrites_existing_enrichment_columns() {
        let headers = StringRecord::from(vec!["url", "label", "domain", "tls_valid_flag"]);
        let records = vec![record(
            &["https://a.example", "legit", "stale.example", "0"],
            "a.example",
            12.0,
            45.0,
            1,
        )];

        let mut out = Vec::new();
        write_output_to(&mut out, &headers, &records).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "url,label,domain,tls_valid_flag,domain_age_days,tls_days_valid"
        );
        assert_eq!(lines[1], "https://a.example,legit,a.example,1,12.0,45.0");
    }

    #[test]
    fn test_write_quotes_fields_with_commas() {
        let headers = StringRecord::from(vec!["url", "label"]);
        let records = vec![record(&["http://a.example/?q=1,2", "legit"], "a.example", 1.0, 2.0, 1)];

        let mut out = Vec::new();
        write_output_to(&mut out, &headers, &records).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("\"http://a.example/?q=1,2\""));
    }

    #[test]
    fn test_write_output_table_creates_directory() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("processed").join("out.csv");
        let headers = StringRecord::from(vec!["url", "label"]);

        let written = write_output_table(&path, &headers, &[]).expect("write");
        assert_eq!(written, 0);
        assert_eq!(
            std::fs::read_to_string(&path).expect("read").trim_end(),
            "url,label,domain,domain_age_days,tls_days_valid,tls_valid_flag"
        );
    }
}
