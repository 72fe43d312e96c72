use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::config::SeederConfig;
use crate::inserts::InsertStatementBuilder;

pub fn run(config: PathBuf, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let config = SeederConfig::load(&config)?;
    let table = config.table_name()?;

    let input = match input {
        Some(path) => path,
        None => config.inserts_section()?.input_file.clone(),
    };
    let output = match output {
        Some(path) => path,
        None => config.inserts_section()?.output_file.clone(),
    };

    let written = InsertStatementBuilder::new(table).build_from_csv(&input, &output)?;
    info!("Wrote {} insert statements to {}", written, output.display());

    Ok(())
}
