use std::path::PathBuf;

use color_eyre::Result;

use crate::api::models::{AnalysisPayload, DashboardSummary, FraudRecord};
use crate::api::{ApiClient, ApiError};
use crate::config::init_app_config;

/// Facade between the app state and the backend client, so views never
/// touch `reqwest` directly.
#[derive(Debug)]
pub struct AppActions {
    pub client: Option<ApiClient>,
    pub export_dir: PathBuf,
    pub debug: bool,
}

impl AppActions {
    pub fn new() -> Self {
        Self {
            client: None,
            export_dir: PathBuf::from("."),
            debug: false,
        }
    }

    pub fn initialize(&mut self) -> Result<()> {
        let config = init_app_config()?;
        if config.debug {
            eprintln!("Using backend at {}", config.api_base_url);
        }
        self.client = Some(ApiClient::new(config.api_base_url));
        self.export_dir = config.export_dir;
        self.debug = config.debug;
        Ok(())
    }

    pub async fn fetch_dashboard(&self) -> Result<DashboardSummary, ApiError> {
        self.client()?.fetch_dashboard().await
    }

    pub async fn fetch_analysis(&self) -> Result<AnalysisPayload, ApiError> {
        self.client()?.fetch_analysis().await
    }

    pub async fn fetch_results(&self) -> Result<Vec<FraudRecord>, ApiError> {
        self.client()?.fetch_results().await
    }

    /// Owned client for the spawned scan task.
    pub fn client_cloned(&self) -> Result<ApiClient, ApiError> {
        self.client().cloned()
    }

    fn client(&self) -> Result<&ApiClient, ApiError> {
        self.client.as_ref().ok_or(ApiError::NotConnected)
    }
}
