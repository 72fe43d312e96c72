//! File output for generated rows and metadata tables.
//!
//! CSV escaping here is the minimal standard kind: a field is quoted only
//! when it contains a comma, quote, or line break. The INSERT writer is
//! deliberately naive (every non-null value single-quoted, no escaping of
//! embedded quotes); the target engine casts quoted literals on insert.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::generator::TableData;

/// Writes generated table data as CSV and as INSERT statements
pub struct RowSerializer;

impl RowSerializer {
    /// Write a column-name header plus one line per row. Absent values
    /// render as empty fields.
    pub fn write_csv(data: &TableData, path: &Path) -> Result<()> {
        let rendered: Vec<Vec<String>> = data
            .rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_csv_field()).collect())
            .collect();
        write_csv_file(path, Some(&data.columns), &rendered)
    }

    /// Write one INSERT statement per row.
    pub fn write_inserts(data: &TableData, path: &Path) -> Result<()> {
        Self::write_inserts_inner(data, path)
            .with_context(|| format!("Failed to write SQL file: {}", path.display()))
    }

    fn write_inserts_inner(data: &TableData, path: &Path) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        for row in &data.rows {
            let values: Vec<String> = row.iter().map(|v| v.to_quoted_literal()).collect();
            let statement = insert_statement(&data.table_name, &data.columns, &values);
            writer.write_all(statement.as_bytes())?;
            writer.write_all(b"\n")?;
        }

        writer.flush()
    }
}

/// Assemble one INSERT statement from pre-rendered value literals.
pub fn insert_statement(table: &str, columns: &[String], values: &[String]) -> String {
    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        table,
        columns.join(", "),
        values.join(", ")
    )
}

/// Write rows, optionally preceded by a header line, as a CSV file.
pub fn write_csv_file(path: &Path, header: Option<&[String]>, rows: &[Vec<String>]) -> Result<()> {
    write_csv_inner(path, header, rows)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))
}

fn write_csv_inner(
    path: &Path,
    header: Option<&[String]>,
    rows: &[Vec<String>],
) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    if let Some(header) = header {
        writer.write_all(csv_row(header).as_bytes())?;
    }
    for row in rows {
        writer.write_all(csv_row(row).as_bytes())?;
    }

    writer.flush()
}

fn csv_row(fields: &[String]) -> String {
    let escaped: Vec<String> = fields.iter().map(|f| csv_escape(f)).collect();
    format!("{}\n", escaped.join(","))
}

/// Quote a field if it contains a comma, quote, or newline
pub fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SqlValue;
    use std::fs;
    use tempfile::TempDir;

    fn sample_data() -> TableData {
        TableData {
            table_name: "users".to_string(),
            columns: vec!["id".to_string(), "name".to_string(), "notes".to_string()],
            rows: vec![
                vec![
                    SqlValue::Int(1),
                    SqlValue::String("alice".to_string()),
                    SqlValue::Null,
                ],
                vec![
                    SqlValue::Int(2),
                    SqlValue::String("bob".to_string()),
                    SqlValue::String("a,b".to_string()),
                ],
            ],
        }
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("has,comma"), "\"has,comma\"");
        assert_eq!(csv_escape("has\"quote"), "\"has\"\"quote\"");
        assert_eq!(csv_escape("has\nnewline"), "\"has\nnewline\"");
        assert_eq!(csv_escape(""), "");
    }

    #[test]
    fn test_write_csv_has_header_plus_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        RowSerializer::write_csv(&sample_data(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "id,name,notes");
        assert_eq!(lines[1], "1,alice,");
        assert_eq!(lines[2], "2,bob,\"a,b\"");
    }

    #[test]
    fn test_write_inserts_quotes_every_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.sql");
        RowSerializer::write_inserts(&sample_data(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "INSERT INTO users (id, name, notes) VALUES ('1', 'alice', NULL);"
        );
        assert_eq!(
            lines[1],
            "INSERT INTO users (id, name, notes) VALUES ('2', 'bob', 'a,b');"
        );
    }

    #[test]
    fn test_write_csv_file_without_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bare.csv");
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()],
        ];
        write_csv_file(&path, None, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "a,b\nc,d\n");
    }
}
