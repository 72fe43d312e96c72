use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::output::format_grid;

pub fn run(file: PathBuf, width: usize) -> Result<()> {
    let input = File::open(&file)
        .with_context(|| format!("Failed to open CSV file: {}", file.display()))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);

    let columns: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header: {}", file.display()))?
        .iter()
        .map(|field| field.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("Failed to read CSV record: {}", file.display()))?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }

    print!("{}", format_grid(&columns, &rows, width));

    Ok(())
}
