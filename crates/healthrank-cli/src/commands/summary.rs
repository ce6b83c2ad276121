//! Summary command - quick data quality overview of a data file.

use std::path::PathBuf;

use colored::Colorize;
use healthrank::{DatasetSummary, HealthRank};

use crate::logging;

pub fn run(file: PathBuf, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    logging::init("warn", verbose);

    let healthrank = HealthRank::new()?;
    let dataset = healthrank.load(&file)?;
    let catalog = healthrank.extract(&dataset);
    let quality = DatasetSummary::of(&dataset.table);

    println!(
        "{} {}",
        "Summary for".cyan().bold(),
        dataset.source.file.white()
    );
    println!();

    println!("{}", "Indicators:".yellow().bold());
    println!("  Total:      {}", catalog.summary.total_indicators.to_string().white());
    println!("  With CI:    {}", catalog.summary.indicators_with_ci.to_string().white());
    println!("  Malformed:  {}", catalog.summary.malformed_count.to_string().white());
    println!("  Columns:    {}", catalog.summary.total_columns_processed.to_string().white());
    println!();

    println!("{}", "Data quality:".yellow().bold());
    println!("  Counties:   {}", quality.total_counties.to_string().white());
    println!("  States:     {}", quality.states_covered.to_string().white());
    match quality.year_range {
        Some([min, max]) if min == max => println!("  Years:      {}", min),
        Some([min, max]) => println!("  Years:      {}-{}", min, max),
        None => println!("  Years:      {}", "none".dimmed()),
    }
    let flag = |n: usize| {
        if n > 0 {
            n.to_string().red()
        } else {
            n.to_string().green()
        }
    };
    println!("  Missing FIPS:   {}", flag(quality.missing_fips));
    println!("  Duplicate FIPS: {}", flag(quality.duplicate_fips));

    if verbose {
        println!();
        println!(
            "{} {} ({} bytes)",
            "Source hash".dimmed(),
            dataset.source.hash,
            dataset.source.size_bytes
        );
    }

    Ok(())
}
