use std::path::PathBuf;

use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::SeederConfig;
use crate::db::DbClient;
use crate::generator::ValueGenerator;
use crate::metadata::MetadataExtractor;
use crate::serialize::RowSerializer;

pub fn run(config: PathBuf, count: Option<usize>, seed: Option<u64>) -> Result<()> {
    let config = SeederConfig::load(&config)?;
    let table = config.table_name()?;
    let generate = config.generate_section()?;
    let count = count.unwrap_or(generate.count);

    let client = DbClient::open(&config.database)?;
    let meta = MetadataExtractor::new(&client).extract(table)?;

    let rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    };
    let mut generator = ValueGenerator::new(rng).with_fixed_values(generate.fixed_values.clone());
    let data = generator.generate_table(&meta, count);

    RowSerializer::write_csv(&data, &generate.data_file)?;
    info!(
        "Wrote {} rows to {}",
        data.rows.len(),
        generate.data_file.display()
    );

    RowSerializer::write_inserts(&data, &generate.sql_file)?;
    info!(
        "Wrote {} insert statements to {}",
        data.rows.len(),
        generate.sql_file.display()
    );

    Ok(())
}
