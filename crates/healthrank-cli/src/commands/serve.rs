//! Serve command - load the dataset once and expose the query API.

use std::path::PathBuf;

use colored::Colorize;
use healthrank::HealthRank;
use tracing::{info, warn};

use crate::config::Settings;
use crate::logging;
use crate::server::app;
use crate::server::state::AppState;

pub fn run(
    config: PathBuf,
    port: Option<u16>,
    strict: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = Settings::read(&config)?;
    let found = loaded.is_some();
    let mut settings = loaded.unwrap_or_default();
    if let Some(port) = port {
        settings.port = port;
    }
    logging::init(&settings.log_level, verbose);
    if !found {
        info!(path = %config.display(), "config file not found, using defaults");
    }

    let addr = settings.socket_addr()?;

    println!(
        "{} {}",
        "Loading".cyan().bold(),
        settings.data_file_path.display()
    );

    let healthrank = HealthRank::with_config(settings.pipeline_config()?)?;
    let dataset = healthrank.load(&settings.data_file_path)?;
    let catalog = healthrank.catalog_for(&dataset, &settings.indicator_catalog_path)?;
    let report = healthrank.validate(&dataset, &catalog);
    report.save_summary(&settings.validation_report_path)?;

    if !report.is_valid() {
        for (name, result) in report.checks() {
            for error in &result.errors {
                warn!(check = name, "{}", error);
            }
        }
        if strict {
            return Err(format!(
                "Dataset failed validation with {} errors; see {}",
                report.error_count(),
                settings.validation_report_path.display()
            )
            .into());
        }
        println!(
            "{} dataset failed validation ({} errors), serving anyway",
            "Warning:".yellow(),
            report.error_count()
        );
    }

    let service = healthrank::DataService::from_dataset(dataset, catalog).with_report(report);
    info!(
        counties = service.health().counties_loaded,
        indicators = service.health().indicators_available,
        "data service ready"
    );

    let state = AppState::new(service, settings);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, addr))?;

    println!("{}", "Shut down.".yellow());
    Ok(())
}
