//! Conversion of type-annotated CSV files into INSERT statements.
//!
//! Input layout: line 1 is the column-name header, line 2 carries one
//! declared-type annotation per column, lines 3+ are data. Each data cell is
//! rendered according to its column's annotation class; the table name comes
//! from configuration, not from the file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::classify::{TypeClass, TypeClassifier};
use crate::serialize::insert_statement;

/// Builds INSERT statements from an annotated CSV file
pub struct InsertStatementBuilder {
    table_name: String,
}

impl InsertStatementBuilder {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
        }
    }

    /// Convert the annotated CSV at `input` into one INSERT per data row,
    /// written to `output`. Returns the number of statements written.
    pub fn build_from_csv(&self, input: &Path, output: &Path) -> Result<usize> {
        let file = File::open(input)
            .with_context(|| format!("Failed to open CSV file: {}", input.display()))?;
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

        let columns: Vec<String> = reader
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut records = reader.records();
        let annotations: Vec<String> = match records.next() {
            Some(record) => record
                .context("Failed to read type annotation row")?
                .iter()
                .map(|t| t.to_string())
                .collect(),
            None => anyhow::bail!("CSV file has no type annotation row: {}", input.display()),
        };

        let out = File::create(output)
            .with_context(|| format!("Failed to create SQL file: {}", output.display()))?;
        let mut writer = BufWriter::new(out);

        let mut written = 0;
        for result in records {
            let record = result.context("Failed to read CSV record")?;
            let values: Vec<String> = record
                .iter()
                .zip(annotations.iter())
                .map(|(raw, annotation)| render_value(annotation, raw))
                .collect();
            let statement = insert_statement(&self.table_name, &columns, &values);
            writer
                .write_all(statement.as_bytes())
                .and_then(|_| writer.write_all(b"\n"))
                .with_context(|| format!("Failed to write SQL file: {}", output.display()))?;
            written += 1;
        }

        writer
            .flush()
            .with_context(|| format!("Failed to write SQL file: {}", output.display()))?;
        Ok(written)
    }
}

/// Render one data cell according to its column's type annotation.
///
/// The empty-field check comes first: an empty cell is NULL even when the
/// annotation classifies as Quoted. Quoted cells are wrapped without
/// escaping embedded quotes.
pub fn render_value(annotation: &str, raw: &str) -> String {
    if raw.is_empty() {
        return "NULL".to_string();
    }
    match TypeClassifier::classify(TypeClassifier::normalize(annotation)) {
        TypeClass::Quoted => format!("'{}'", raw),
        TypeClass::Unquoted => raw.to_string(),
        TypeClass::Unknown => "NULL".to_string(),
    }
}
