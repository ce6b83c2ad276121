//! HealthRank CLI - indicator catalogs, data quality checks and query API.

mod cli;
mod commands;
mod config;
mod logging;
mod server;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract { file, output } => commands::extract::run(file, output, cli.verbose),

        Commands::Validate {
            file,
            schema,
            output,
            json,
        } => commands::validate::run(file, schema, output, json, cli.verbose),

        Commands::Serve {
            config,
            port,
            strict,
        } => commands::serve::run(config, port, strict, cli.verbose),

        Commands::Summary { file } => commands::summary::run(file, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
