mod execute;
mod generate;
mod inserts;
mod metadata;
mod visualize;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sql-seeder")]
#[command(version)]
#[command(about = "Introspect table schemas and generate schema-aware test data", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a table's column and constraint metadata to CSV files
    ExtractMetadata {
        /// JSON config file with connection settings
        #[arg(short, long)]
        config: PathBuf,

        /// Metadata CSV output path (overrides the config file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Transposed metadata CSV output path (overrides the config file)
        #[arg(long)]
        transposed_output: Option<PathBuf>,
    },

    /// Generate synthetic rows for a table as CSV and INSERT statements
    GenerateTestData {
        /// JSON config file with connection and generation settings
        #[arg(short, long)]
        config: PathBuf,

        /// Number of rows to generate (overrides the config file)
        #[arg(long)]
        count: Option<usize>,

        /// Seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Convert a type-annotated CSV file into INSERT statements
    BuildInsertStatementsFromCsv {
        /// JSON config file with table name and file paths
        #[arg(short, long)]
        config: PathBuf,

        /// Annotated CSV input path (overrides the config file)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// SQL output path (overrides the config file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pretty-print a CSV file as an aligned text grid
    VisualizeCsv {
        /// CSV file to display
        file: PathBuf,

        /// Maximum column width
        #[arg(long, default_value = "20")]
        width: usize,
    },

    /// Execute a SQL script statement by statement, continuing past failures
    ExecuteSqlScript {
        /// SQL script file to execute
        file: PathBuf,

        /// JSON config file with connection settings
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::ExtractMetadata {
            config,
            output,
            transposed_output,
        } => metadata::run(config, output, transposed_output),
        Commands::GenerateTestData {
            config,
            count,
            seed,
        } => generate::run(config, count, seed),
        Commands::BuildInsertStatementsFromCsv {
            config,
            input,
            output,
        } => inserts::run(config, input, output),
        Commands::VisualizeCsv { file, width } => visualize::run(file, width),
        Commands::ExecuteSqlScript { file, config } => execute::run(file, config),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "sql-seeder", &mut io::stdout());
            Ok(())
        }
    }
}
