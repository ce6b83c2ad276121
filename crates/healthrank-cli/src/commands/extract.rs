//! Extract command - build and save the indicator catalog.

use std::path::PathBuf;

use colored::Colorize;
use healthrank::HealthRank;

use crate::logging;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    logging::init("warn", verbose);

    println!("{} {}", "Extracting".cyan().bold(), file.display());

    let healthrank = HealthRank::new()?;
    let dataset = healthrank.load(&file)?;
    let catalog = healthrank.extract(&dataset);

    let output_path = output.unwrap_or_else(|| {
        let mut p = file.clone();
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        p.set_file_name(format!("{}.catalog.json", stem));
        p
    });
    catalog.save(&output_path)?;

    let summary = &catalog.summary;
    println!();
    println!("{}", "Catalog:".yellow().bold());
    println!(
        "  Columns processed:  {}",
        summary.total_columns_processed.to_string().white()
    );
    println!(
        "  Indicators:         {}",
        summary.total_indicators.to_string().green()
    );
    println!(
        "  With CI:            {}",
        summary.indicators_with_ci.to_string().blue()
    );
    println!(
        "  Malformed:          {}",
        if summary.malformed_count > 0 {
            summary.malformed_count.to_string().red()
        } else {
            summary.malformed_count.to_string().white()
        }
    );

    if verbose && !catalog.malformed.is_empty() {
        println!();
        println!("{}", "Malformed indicators:".yellow().bold());
        for record in &catalog.malformed {
            println!(
                "  {} {} [{}]",
                record.id.white().bold(),
                record.issue,
                record.columns.join(", ")
            );
        }
    }

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display()
    );

    Ok(())
}
