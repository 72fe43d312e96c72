//! JSON configuration shared by all subcommands.
//!
//! One file, three sections: `database` (connection and table name),
//! `generate` (row counts, output files, fixed values), and `inserts`
//! (annotated CSV conversion paths). The latter two are optional; a command
//! that needs a missing section fails with a configuration error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database location: `:memory:` or a file path
    pub path: String,
    /// Table the introspecting commands operate on
    pub table: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: ":memory:".to_string(),
            table: String::new(),
        }
    }
}

/// Settings for the generate-test-data command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Number of rows to generate
    pub count: usize,
    /// Generated CSV output path
    pub data_file: PathBuf,
    /// Generated INSERT statement output path
    pub sql_file: PathBuf,
    /// Columns pinned to a fixed value instead of generated data
    #[serde(default)]
    pub fixed_values: HashMap<String, String>,
    /// Metadata CSV output path
    #[serde(default = "default_metadata_file")]
    pub metadata_file: PathBuf,
    /// Transposed metadata CSV output path
    #[serde(default = "default_transposed_metadata_file")]
    pub transposed_metadata_file: PathBuf,
}

pub(crate) fn default_metadata_file() -> PathBuf {
    PathBuf::from("metadata.csv")
}

pub(crate) fn default_transposed_metadata_file() -> PathBuf {
    PathBuf::from("transposed_metadata.csv")
}

/// Settings for the build-insert-statements-from-csv command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertConfig {
    /// Annotated CSV input path
    pub input_file: PathBuf,
    /// SQL output path
    pub output_file: PathBuf,
}

/// Complete configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeederConfig {
    pub database: DatabaseConfig,
    pub generate: Option<GenerateConfig>,
    pub inserts: Option<InsertConfig>,
}

impl SeederConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: SeederConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// The configured table name; empty is a configuration error.
    pub fn table_name(&self) -> Result<&str> {
        if self.database.table.is_empty() {
            anyhow::bail!("No table name configured (database.table)");
        }
        Ok(&self.database.table)
    }

    pub fn generate_section(&self) -> Result<&GenerateConfig> {
        self.generate
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Config has no \"generate\" section"))
    }

    pub fn inserts_section(&self) -> Result<&InsertConfig> {
        self.inserts
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Config has no \"inserts\" section"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "database": { "path": "app.duckdb", "table": "users" },
            "generate": {
                "count": 100,
                "data_file": "test_data.csv",
                "sql_file": "test_data.sql",
                "fixed_values": { "status": "ACTIVE" }
            },
            "inserts": { "input_file": "in.csv", "output_file": "out.sql" }
        }"#;

        let config: SeederConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.database.path, "app.duckdb");
        assert_eq!(config.table_name().unwrap(), "users");

        let generate = config.generate_section().unwrap();
        assert_eq!(generate.count, 100);
        assert_eq!(generate.fixed_values["status"], "ACTIVE");
        assert_eq!(generate.metadata_file, PathBuf::from("metadata.csv"));
        assert_eq!(
            generate.transposed_metadata_file,
            PathBuf::from("transposed_metadata.csv")
        );

        let inserts = config.inserts_section().unwrap();
        assert_eq!(inserts.input_file, PathBuf::from("in.csv"));
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: SeederConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.database.path, ":memory:");
        assert!(config.table_name().is_err());
        assert!(config.generate_section().is_err());
        assert!(config.inserts_section().is_err());
    }

    #[test]
    fn test_generate_section_requires_core_fields() {
        let json = r#"{ "generate": { "count": 5 } }"#;
        assert!(serde_json::from_str::<SeederConfig>(json).is_err());
    }
}
