//! Application state for the web server.

use std::sync::Arc;

use healthrank::DataService;

use crate::config::Settings;

/// Shared application state. The service is read-only, so no locking.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DataService>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create new application state.
    pub fn new(service: DataService, settings: Settings) -> Self {
        Self {
            service: Arc::new(service),
            settings: Arc::new(settings),
        }
    }
}
