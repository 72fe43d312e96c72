//! Type-dispatched synthetic value generation.
//!
//! Produces one value per column per row, driven by the column's base type.
//! Integer-family columns carry the 1-based row sequence number so generated
//! rows stay unique under PRIMARY KEY constraints; everything else is drawn
//! from a seedable RNG.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::metadata::TableMetadata;

/// String length used when a character column declares none
const DEFAULT_STRING_LENGTH: usize = 10;

/// SQL value representation
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
}

impl SqlValue {
    /// Format as a CSV field. Null is a fully empty field.
    pub fn to_csv_field(&self) -> String {
        match self {
            SqlValue::Null => String::new(),
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Float(n) => format!("{:.2}", n),
            SqlValue::String(s) => s.clone(),
            SqlValue::Bool(b) => b.to_string(),
        }
    }

    /// Format for the naive INSERT writer: every non-null value is
    /// single-quoted regardless of type, with no escaping of embedded
    /// quotes. The target engine casts quoted numerics on insert.
    pub fn to_quoted_literal(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            other => format!("'{}'", other.to_csv_field()),
        }
    }
}

/// A row of generated data
pub type Row = Vec<SqlValue>;

/// Generated data for a single table
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub table_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// Per-column value generator with deterministic RNG
pub struct ValueGenerator<R: Rng> {
    rng: R,
    fixed_values: HashMap<String, String>,
}

impl<R: Rng> ValueGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            fixed_values: HashMap::new(),
        }
    }

    /// Pin specific columns to a fixed string value, bypassing type dispatch
    pub fn with_fixed_values(mut self, fixed_values: HashMap<String, String>) -> Self {
        self.fixed_values = fixed_values;
        self
    }

    /// Generate all rows for a table, sequence numbers 1..=count.
    pub fn generate_table(&mut self, meta: &TableMetadata, count: usize) -> TableData {
        let columns: Vec<String> = meta.columns.iter().map(|c| c.name.clone()).collect();
        let mut rows = Vec::with_capacity(count);

        for seq in 1..=count as i64 {
            let row: Row = meta
                .columns
                .iter()
                .map(|col| match self.fixed_values.get(&col.name) {
                    Some(fixed) => SqlValue::String(fixed.clone()),
                    None => self.generate_value(&col.base_type, col.declared_length, seq),
                })
                .collect();
            rows.push(row);
        }

        TableData {
            table_name: meta.table_name.clone(),
            columns,
            rows,
        }
    }

    /// Generate one value for a column of the given base type.
    ///
    /// Unrecognized types yield `Null`, which serializes as an empty CSV
    /// field and a bare SQL NULL.
    pub fn generate_value(
        &mut self,
        base_type: &str,
        declared_length: Option<usize>,
        sequence: i64,
    ) -> SqlValue {
        match base_type.to_uppercase().as_str() {
            "INTEGER" | "BIGINT" | "SMALLINT" | "SERIAL" | "BIGSERIAL" => SqlValue::Int(sequence),
            "VARCHAR" | "CHAR" | "TEXT" => {
                let length = declared_length.unwrap_or(DEFAULT_STRING_LENGTH);
                SqlValue::String(self.random_string(length))
            }
            "DATE" => SqlValue::String(self.random_date()),
            "TIMESTAMP" => SqlValue::String(self.random_timestamp()),
            "BOOLEAN" => SqlValue::Bool(self.rng.random_bool(0.5)),
            "NUMERIC" | "FLOAT" => {
                let n: f64 = self.rng.random_range(0.0..10000.0);
                SqlValue::Float((n * 100.0).round() / 100.0)
            }
            _ => SqlValue::Null,
        }
    }

    fn random_string(&mut self, length: usize) -> String {
        (0..length)
            .map(|_| self.rng.sample(Alphanumeric) as char)
            .collect()
    }

    fn random_date(&mut self) -> String {
        let (start, end) = date_window();
        self.interpolate(start, end)
            .date()
            .format("%Y-%m-%d")
            .to_string()
    }

    fn random_timestamp(&mut self) -> String {
        let (start, end) = timestamp_window();
        self.interpolate(start, end)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    /// Uniform point in [start, end): seconds offset scaled by a fraction
    /// drawn from [0, 1).
    fn interpolate(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> NaiveDateTime {
        let span = (end - start).num_seconds();
        let offset = (span as f64 * self.rng.random::<f64>()) as i64;
        start + Duration::seconds(offset)
    }
}

fn date_window() -> (NaiveDateTime, NaiveDateTime) {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let end = NaiveDate::from_ymd_opt(2020, 12, 31)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    (start, end)
}

fn timestamp_window() -> (NaiveDateTime, NaiveDateTime) {
    let (start, _) = date_window();
    let end = NaiveDate::from_ymd_opt(2020, 12, 31)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap();
    (start, end)
}
