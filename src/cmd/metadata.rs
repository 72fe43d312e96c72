use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::config::{self, SeederConfig};
use crate::db::DbClient;
use crate::metadata::MetadataExtractor;
use crate::output::format_grid;
use crate::serialize::write_csv_file;

/// Column width for the logged metadata preview
const PREVIEW_WIDTH: usize = 50;

pub fn run(
    config: PathBuf,
    output: Option<PathBuf>,
    transposed_output: Option<PathBuf>,
) -> Result<()> {
    let config = SeederConfig::load(&config)?;
    let table = config.table_name()?;

    let client = DbClient::open(&config.database)?;
    let meta = MetadataExtractor::new(&client).extract(table)?;
    let view = meta.to_view();

    info!("\n{}", format_grid(&view.header, &view.rows, PREVIEW_WIDTH));

    let (metadata_file, transposed_file) = resolve_outputs(&config, output, transposed_output);

    write_csv_file(&metadata_file, Some(&view.header), &view.rows)?;
    info!("Metadata written to {}", metadata_file.display());

    write_csv_file(&transposed_file, None, &view.transposed_rows())?;
    info!(
        "Transposed metadata written to {}",
        transposed_file.display()
    );

    Ok(())
}

/// Flags beat the config file; config defaults cover the rest.
fn resolve_outputs(
    config: &SeederConfig,
    output: Option<PathBuf>,
    transposed_output: Option<PathBuf>,
) -> (PathBuf, PathBuf) {
    let metadata_file = output.unwrap_or_else(|| {
        config
            .generate
            .as_ref()
            .map(|g| g.metadata_file.clone())
            .unwrap_or_else(config::default_metadata_file)
    });
    let transposed_file = transposed_output.unwrap_or_else(|| {
        config
            .generate
            .as_ref()
            .map(|g| g.transposed_metadata_file.clone())
            .unwrap_or_else(config::default_transposed_metadata_file)
    });
    (metadata_file, transposed_file)
}
