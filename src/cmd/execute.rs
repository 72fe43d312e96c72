use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::SeederConfig;
use crate::db::DbClient;
use crate::executor::SqlExecutor;

pub fn run(file: PathBuf, config: PathBuf) -> Result<()> {
    let config = SeederConfig::load(&config)?;
    let script = fs::read_to_string(&file)
        .with_context(|| format!("Failed to read SQL script: {}", file.display()))?;

    let client = DbClient::open(&config.database)?;
    let stats = SqlExecutor::new(&client).execute_script(&script);
    info!("{stats}");

    Ok(())
}
