//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HealthRank: County Health Rankings indicator catalog, validation and API
#[derive(Parser)]
#[command(name = "healthrank")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the indicator catalog from a dual-header data file
    Extract {
        /// Path to the data file (CSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the catalog (default: <file>.catalog.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the data quality checks and print the report
    Validate {
        /// Path to the data file (CSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON file with validation schema overrides
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Write the flattened report summary to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the read-only query API
    Serve {
        /// Path to the configuration file
        #[arg(short, long, default_value = "healthrank.toml")]
        config: PathBuf,

        /// Port to listen on (overrides the configuration file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Refuse to start when the dataset fails validation
        #[arg(long)]
        strict: bool,
    },

    /// Quick data quality summary of a data file
    Summary {
        /// Path to the data file (CSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}
