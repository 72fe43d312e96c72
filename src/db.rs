//! Embedded DuckDB client.
//!
//! One `DbClient` wraps one connection for the lifetime of a command. It
//! implements both seams the rest of the crate needs: `SchemaIntrospector`
//! for metadata extraction and `StatementRunner` for script replay.

use anyhow::{Context, Result};
use duckdb::Connection;

use crate::config::DatabaseConfig;
use crate::executor::StatementRunner;
use crate::metadata::{CheckConstraint, ColumnInfo, SchemaIntrospector};

pub struct DbClient {
    conn: Connection,
}

impl DbClient {
    /// Open the configured database: `:memory:` or a file path.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        if config.path == ":memory:" {
            Self::open_in_memory()
        } else {
            let conn = Connection::open(&config.path)
                .with_context(|| format!("Failed to open DuckDB database: {}", config.path))?;
            Ok(Self { conn })
        }
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().context("Failed to create in-memory DuckDB database")?;
        Ok(Self { conn })
    }

    /// Execute one statement, returning the affected row count.
    pub fn execute(&self, sql: &str) -> Result<usize> {
        self.conn
            .execute(sql, [])
            .with_context(|| format!("Failed to execute statement: {}", sql))
    }

    pub fn table_exists(&self, table: &str) -> bool {
        let query = "SELECT 1 FROM information_schema.tables WHERE table_name = ? LIMIT 1";
        match self.conn.prepare(query) {
            Ok(mut stmt) => stmt.exists([table]).unwrap_or(false),
            Err(_) => false,
        }
    }

    pub fn count_rows(&self, table: &str) -> Result<i64> {
        self.conn
            .query_row(&format!("SELECT count(*) FROM {}", table), [], |row| {
                row.get(0)
            })
            .with_context(|| format!("Failed to count rows of {}", table))
    }
}

impl SchemaIntrospector for DbClient {
    fn engine_version(&self) -> Result<String> {
        self.conn
            .query_row("SELECT version()", [], |row| row.get(0))
            .context("Failed to fetch engine version")
    }

    fn columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT column_name, data_type, is_nullable FROM information_schema.columns \
                 WHERE table_schema = 'main' AND table_name = ? ORDER BY ordinal_position",
            )
            .context("Failed to prepare column introspection query")?;
        let rows = stmt
            .query_map([table], |row| {
                Ok(ColumnInfo {
                    name: row.get(0)?,
                    declared_type: row.get(1)?,
                    nullable: row.get::<_, String>(2)? == "YES",
                })
            })
            .with_context(|| format!("Failed to introspect columns of {}", table))?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row?);
        }
        if columns.is_empty() {
            anyhow::bail!("Table not found: {}", table);
        }
        Ok(columns)
    }

    fn primary_key_columns(&self, table: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT unnest(constraint_column_names) FROM duckdb_constraints() \
                 WHERE schema_name = 'main' AND table_name = ? \
                 AND constraint_type = 'PRIMARY KEY' ORDER BY constraint_index",
            )
            .context("Failed to prepare primary key query")?;
        let rows = stmt
            .query_map([table], |row| row.get(0))
            .with_context(|| format!("Failed to fetch primary key of {}", table))?;

        let mut names = Vec::new();
        for row in rows {
            names.push(row?);
        }
        Ok(names)
    }

    fn unique_constraints(&self, table: &str) -> Result<Vec<Vec<String>>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT constraint_index, unnest(constraint_column_names) \
                 FROM duckdb_constraints() WHERE schema_name = 'main' AND table_name = ? \
                 AND constraint_type = 'UNIQUE' ORDER BY constraint_index",
            )
            .context("Failed to prepare unique constraint query")?;
        let rows = stmt
            .query_map([table], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })
            .with_context(|| format!("Failed to fetch unique constraints of {}", table))?;

        let mut groups: Vec<(i64, Vec<String>)> = Vec::new();
        for row in rows {
            let (idx, column) = row?;
            match groups.last_mut() {
                Some((last, group)) if *last == idx => group.push(column),
                _ => groups.push((idx, vec![column])),
            }
        }
        Ok(groups.into_iter().map(|(_, group)| group).collect())
    }

    fn check_constraints(&self, table: &str) -> Result<Vec<CheckConstraint>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT constraint_index, constraint_text, unnest(constraint_column_names) \
                 FROM duckdb_constraints() WHERE schema_name = 'main' AND table_name = ? \
                 AND constraint_type = 'CHECK' ORDER BY constraint_index",
            )
            .context("Failed to prepare check constraint query")?;
        let rows = stmt
            .query_map([table], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .with_context(|| format!("Failed to fetch check constraints of {}", table))?;

        let mut checks: Vec<(i64, CheckConstraint)> = Vec::new();
        for row in rows {
            let (idx, text, column) = row?;
            match checks.last_mut() {
                Some((last, check)) if *last == idx => check.columns.push(column),
                _ => checks.push((
                    idx,
                    CheckConstraint {
                        columns: vec![column],
                        expression: check_expression(&text),
                    },
                )),
            }
        }
        Ok(checks.into_iter().map(|(_, check)| check).collect())
    }
}

impl StatementRunner for DbClient {
    fn run_statement(&self, sql: &str) -> Result<()> {
        // execute_batch tolerates statements that return rows
        self.conn
            .execute_batch(sql)
            .with_context(|| format!("Failed to execute statement: {}", sql))
    }
}

/// Reduce a reported check clause like `CHECK((age > 0))` to the bare
/// expression.
fn check_expression(text: &str) -> String {
    let stripped = text.trim();
    let mut expr = stripped.strip_prefix("CHECK").unwrap_or(stripped).trim();
    loop {
        let inner = strip_outer_parens(expr);
        if inner == expr {
            return expr.to_string();
        }
        expr = inner;
    }
}

/// Remove one pair of parentheses when they wrap the whole expression.
fn strip_outer_parens(s: &str) -> &str {
    let t = s.trim();
    if !(t.starts_with('(') && t.ends_with(')')) {
        return t;
    }
    let mut depth = 0usize;
    for (i, c) in t.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 && i != t.len() - 1 {
                    return t;
                }
            }
            _ => {}
        }
    }
    t[1..t.len() - 1].trim()
}
