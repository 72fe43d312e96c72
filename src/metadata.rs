//! Table metadata model and constraint discovery.
//!
//! `MetadataExtractor` drives a `SchemaIntrospector` to build the canonical
//! per-table metadata: ordered columns, each annotated with its constraints
//! in a fixed accumulation order (PRIMARY KEY, UNIQUE, CHECK, NOT NULL).
//! The row-oriented view of that metadata and its label-free transposition
//! are what the extract command writes to disk.

use std::fmt;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::classify::TypeClassifier;

/// Engines identified by this banner fragment get no unique/check
/// constraint introspection; their catalog views cannot serve those queries.
const LIMITED_INTROSPECTION_MARKER: &str = "SQL Server";

/// A single constraint attached to a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    Check(String),
    NotNull,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::PrimaryKey => write!(f, "PRIMARY KEY"),
            ConstraintKind::Unique => write!(f, "UNIQUE"),
            ConstraintKind::Check(expr) => write!(f, "CHECK ({})", expr),
            ConstraintKind::NotNull => write!(f, "NOT NULL"),
        }
    }
}

/// Raw column description as reported by the driver
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub name: String,
    pub declared_type: String,
    pub nullable: bool,
}

/// A check constraint and the columns it references
#[derive(Debug, Clone)]
pub struct CheckConstraint {
    pub columns: Vec<String>,
    pub expression: String,
}

/// Read-side schema access needed to build table metadata.
///
/// Implemented by the embedded database client; tests substitute fakes to
/// exercise the limited-introspection and partial-failure paths.
pub trait SchemaIntrospector {
    /// Engine identification banner, e.g. the result of `SELECT version()`
    fn engine_version(&self) -> Result<String>;
    /// Ordered column descriptions for a table
    fn columns(&self, table: &str) -> Result<Vec<ColumnInfo>>;
    /// Primary-key column names in key order
    fn primary_key_columns(&self, table: &str) -> Result<Vec<String>>;
    /// Unique-constraint column groups
    fn unique_constraints(&self, table: &str) -> Result<Vec<Vec<String>>>;
    /// Check constraints with the columns they reference
    fn check_constraints(&self, table: &str) -> Result<Vec<CheckConstraint>>;
}

/// One column with its derived type fields and accumulated constraints
#[derive(Debug, Clone)]
pub struct ColumnMetadata {
    pub name: String,
    /// Type string as reported, e.g. `VARCHAR(255)`
    pub declared_type: String,
    /// Declared type with any length/precision suffix stripped
    pub base_type: String,
    pub nullable: bool,
    /// Character length parsed from a `(n)` suffix, when present
    pub declared_length: Option<usize>,
    pub constraints: Vec<ConstraintKind>,
}

impl ColumnMetadata {
    pub fn new(name: &str, declared_type: &str, nullable: bool) -> Self {
        Self {
            name: name.to_string(),
            declared_type: declared_type.to_string(),
            base_type: TypeClassifier::strip_length(declared_type).to_string(),
            nullable,
            declared_length: TypeClassifier::declared_length(declared_type),
            constraints: Vec::new(),
        }
    }

    /// All constraints joined for display, `;`-separated in accumulation order
    pub fn constraints_display(&self) -> String {
        self.constraints
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Full metadata for one table, columns in discovery order
#[derive(Debug, Clone)]
pub struct TableMetadata {
    pub table_name: String,
    pub columns: Vec<ColumnMetadata>,
}

impl TableMetadata {
    /// Row-oriented view: fixed four-field header, one row per column.
    pub fn to_view(&self) -> MetadataTable {
        let header = [
            "column_id",
            "data_type",
            "data_type_without_length",
            "constraints",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let rows = self
            .columns
            .iter()
            .map(|col| {
                vec![
                    col.name.clone(),
                    col.declared_type.clone(),
                    col.base_type.clone(),
                    col.constraints_display(),
                ]
            })
            .collect();

        MetadataTable { header, rows }
    }
}

/// Tabular metadata view
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MetadataTable {
    /// Label-free transposition: one row per header field, one column per
    /// table column. Neither header nor field labels appear in the result.
    pub fn transposed_rows(&self) -> Vec<Vec<String>> {
        transpose(&self.rows)
    }
}

/// Transpose a rectangular cell matrix.
pub fn transpose(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    let width = match rows.first() {
        Some(first) => first.len(),
        None => return Vec::new(),
    };
    (0..width)
        .map(|col| rows.iter().map(|row| row[col].clone()).collect())
        .collect()
}

/// Drives schema introspection and assembles `TableMetadata`
pub struct MetadataExtractor<'a> {
    probe: &'a dyn SchemaIntrospector,
}

impl<'a> MetadataExtractor<'a> {
    pub fn new(probe: &'a dyn SchemaIntrospector) -> Self {
        Self { probe }
    }

    /// Build full metadata for a table.
    ///
    /// The column list is required; each constraint fetch that fails is
    /// logged and skipped, leaving partial annotations rather than aborting.
    pub fn extract(&self, table: &str) -> Result<TableMetadata> {
        let banner = match self.probe.engine_version() {
            Ok(banner) => {
                info!("Database engine: {banner}");
                banner
            }
            Err(e) => {
                warn!("Could not determine database engine: {e:#}");
                String::new()
            }
        };
        let limited = banner.contains(LIMITED_INTROSPECTION_MARKER);

        let infos = self
            .probe
            .columns(table)
            .with_context(|| format!("Failed to introspect columns of table {table}"))?;
        let mut columns: Vec<ColumnMetadata> = infos
            .iter()
            .map(|info| ColumnMetadata::new(&info.name, &info.declared_type, info.nullable))
            .collect();

        match self.probe.primary_key_columns(table) {
            Ok(pk) => {
                for col in columns.iter_mut() {
                    if pk.contains(&col.name) {
                        col.constraints.push(ConstraintKind::PrimaryKey);
                    }
                }
            }
            Err(e) => error!("Failed to fetch primary key of {table}: {e:#}"),
        }

        if limited {
            info!("Skipping unique and check constraint introspection for this engine");
        } else {
            match self.probe.unique_constraints(table) {
                Ok(groups) => {
                    for group in &groups {
                        for col in columns.iter_mut() {
                            if group.contains(&col.name) {
                                col.constraints.push(ConstraintKind::Unique);
                            }
                        }
                    }
                }
                Err(e) => error!("Failed to fetch unique constraints of {table}: {e:#}"),
            }

            match self.probe.check_constraints(table) {
                Ok(checks) => {
                    for check in &checks {
                        for col in columns.iter_mut() {
                            if check.columns.contains(&col.name) {
                                col.constraints
                                    .push(ConstraintKind::Check(check.expression.clone()));
                            }
                        }
                    }
                }
                Err(e) => error!("Failed to fetch check constraints of {table}: {e:#}"),
            }
        }

        for col in columns.iter_mut() {
            if !col.nullable {
                col.constraints.push(ConstraintKind::NotNull);
            }
        }

        Ok(TableMetadata {
            table_name: table.to_string(),
            columns,
        })
    }
}
