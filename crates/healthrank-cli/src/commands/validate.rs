//! Validate command - run the data quality checks.

use std::path::PathBuf;

use colored::Colorize;
use healthrank::{HealthRank, HealthRankConfig, ValidationReport, ValidationSchema};

use crate::logging;

pub fn run(
    file: PathBuf,
    schema: Option<PathBuf>,
    output: Option<PathBuf>,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    logging::init("warn", verbose);

    let schema = match schema {
        Some(path) => ValidationSchema::from_file(path)?,
        None => ValidationSchema::default(),
    };
    let healthrank = HealthRank::with_config(HealthRankConfig {
        schema,
        ..HealthRankConfig::default()
    })?;
    let result = healthrank.analyze(&file)?;
    let report = &result.report;

    if let Some(path) = &output {
        report.save_summary(path)?;
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_report(&file, report);
        if verbose {
            println!();
            println!("{}", healthrank::report::render(report));
        }
        if let Some(path) = &output {
            println!();
            println!("{} {}", "Saved summary to".green().bold(), path.display());
        }
    }

    Ok(())
}

fn print_report(file: &std::path::Path, report: &ValidationReport) {
    println!(
        "{} {}",
        "Validation report for".cyan().bold(),
        file.display().to_string().white()
    );

    for (name, result) in report.checks() {
        println!();
        let status = if result.is_valid {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };
        println!("{} {}", format!("{}:", name.to_uppercase()).yellow().bold(), status);

        for error in &result.errors {
            println!("  {} {}", "error".red(), error);
        }
        for warning in &result.warnings {
            println!("  {} {}", "warning".yellow(), warning);
        }
    }

    println!();
    let overall = if report.is_valid() {
        "VALID".green().bold()
    } else {
        "INVALID".red().bold()
    };
    println!("Overall: {}", overall);
    println!(
        "  Errors:   {}",
        report.error_count().to_string().red()
    );
    println!(
        "  Warnings: {}",
        report.warning_count().to_string().yellow()
    );
}
