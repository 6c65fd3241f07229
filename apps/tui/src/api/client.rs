use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::models::{
    AnalysisPayload, DashboardSummary, FraudRecord, ResultsPayload, UploadResponse,
};

pub mod endpoints {
    pub const DASHBOARD: &str = "/api/dashboard";
    pub const ANALYSIS: &str = "/api/analysis";
    pub const RESULTS: &str = "/api/results";
    pub const UPLOAD: &str = "/api/upload";
}

/// Errors surfaced to the views. Every failure is terminal for the
/// triggering action; there is no retry anywhere in the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API error: {0}")]
    Status(reqwest::StatusCode),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not read dataset: {0}")]
    Dataset(#[from] std::io::Error),
    #[error("backend client not initialized")]
    NotConnected,
}

/// Thin client over the backend's four endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.http.get(self.url(path)).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    pub async fn fetch_dashboard(&self) -> Result<DashboardSummary, ApiError> {
        self.get_json(endpoints::DASHBOARD).await
    }

    pub async fn fetch_analysis(&self) -> Result<AnalysisPayload, ApiError> {
        self.get_json(endpoints::ANALYSIS).await
    }

    pub async fn fetch_results(&self) -> Result<Vec<FraudRecord>, ApiError> {
        let payload: ResultsPayload = self.get_json(endpoints::RESULTS).await?;
        Ok(payload.fraud_records)
    }

    /// POSTs the dataset as multipart field `dataset`, matching the form
    /// field the backend expects.
    pub async fn upload_dataset(&self, path: &Path) -> Result<UploadResponse, ApiError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "dataset.csv".to_string(), |name| {
                name.to_string_lossy().into_owned()
            });

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("text/csv")?;
        let form = reqwest::multipart::Form::new().part("dataset", part);

        let response = self
            .http
            .post(self.url(endpoints::UPLOAD))
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }
}
