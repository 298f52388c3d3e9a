use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Env, Target};

use matrix_bomber::app;
use matrix_bomber::config::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("creating log file {}", cli.log_file.display()))?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(log_file)))
        .init();

    app::run(cli)
}
