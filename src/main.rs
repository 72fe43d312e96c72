// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

mod classify;
mod cmd;
mod config;
mod db;
mod executor;
mod generator;
mod inserts;
mod metadata;
mod output;
mod serialize;

use clap::Parser;
use cmd::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    if let Err(e) = cmd::run(cli) {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}
