//! Statement-by-statement SQL script replay.
//!
//! The split is the naive kind: every `;` ends a statement, with no
//! awareness of quoted or escaped semicolons. That is sufficient for the
//! scripts the serializers in this crate emit, and it is a documented
//! limitation for anything else. Failures are isolated per statement.

use anyhow::Result;
use tracing::{error, info};

/// Outcome counts for one script replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Statements that ran successfully
    pub executed: usize,
    /// Statements that failed and were skipped
    pub failed: usize,
}

impl std::fmt::Display for ExecutionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} statements executed, {} failed", self.executed, self.failed)
    }
}

/// Execution side of the replay seam.
///
/// Implemented by the embedded database client; tests substitute fakes to
/// observe the continue-past-failure behavior.
pub trait StatementRunner {
    fn run_statement(&self, sql: &str) -> Result<()>;
}

/// Split a script on `;`, trimming fragments and dropping empty ones.
pub fn split_statements(script: &str) -> Vec<&str> {
    script
        .split(';')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Replays scripts through a `StatementRunner`
pub struct SqlExecutor<'a> {
    runner: &'a dyn StatementRunner,
}

impl<'a> SqlExecutor<'a> {
    pub fn new(runner: &'a dyn StatementRunner) -> Self {
        Self { runner }
    }

    /// Execute every statement of `script` in order on the same connection.
    ///
    /// A failing statement is logged with its text and the batch continues;
    /// no transaction wraps the script, so each successful statement's
    /// effect is visible as soon as it commits.
    pub fn execute_script(&self, script: &str) -> ExecutionStats {
        let mut stats = ExecutionStats::default();

        for statement in split_statements(script) {
            match self.runner.run_statement(statement) {
                Ok(()) => {
                    stats.executed += 1;
                    info!("Executed statement: {statement}");
                }
                Err(e) => {
                    stats.failed += 1;
                    error!("Statement failed: {statement}: {e:#}");
                }
            }
        }

        stats
    }
}
