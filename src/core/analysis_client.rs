// src/core/analysis_client.rs
//! HTTP client for the scoring service: one multipart POST per submission, no retry

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, error, info};

use crate::config::ClientConfig;
use crate::error::RequestError;
use crate::types::{AnalysisRequest, AnalysisResult};
use crate::utils::content_type;

pub const ANALYZE_ENDPOINT: &str = "/analyze";

const CV_PART: &str = "cv";
const JOB_DESC_PART: &str = "job_desc";

/// Anything that can turn a request into a result. The controller only sees this.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn submit(&self, request: AnalysisRequest) -> Result<AnalysisResult, RequestError>;
}

pub struct AnalysisClient {
    client: reqwest::Client,
    url: String,
}

impl AnalysisClient {
    /// Create new analysis client for `base_url` + `endpoint`
    pub fn new(base_url: &str, endpoint: &str, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), endpoint),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            &config.service_url,
            &config.analyze_endpoint,
            config.timeout_seconds,
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn build_form(request: AnalysisRequest) -> Result<Form, RequestError> {
        let mime = content_type(&request.file.file_name);
        let cv = Part::bytes(request.file.content)
            .file_name(request.file.file_name)
            .mime_str(mime)
            .map_err(|e| RequestError::NetworkFailure(format!("Failed to create multipart: {}", e)))?;

        Ok(Form::new()
            .part(CV_PART, cv)
            .text(JOB_DESC_PART, request.job_description))
    }
}

#[async_trait]
impl AnalysisService for AnalysisClient {
    async fn submit(&self, request: AnalysisRequest) -> Result<AnalysisResult, RequestError> {
        let request_id = request.id;
        let form = Self::build_form(request)?;

        info!(%request_id, url = %self.url, "Calling analysis service");

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(%request_id, error = %e, "Analysis request failed in transport");
                RequestError::NetworkFailure(e.to_string())
            })?;

        let status = response.status();
        debug!(%request_id, %status, "Response status");

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(%request_id, %status, body = %error_text, "Analysis service returned error status");
            return Err(RequestError::NetworkFailure(format!(
                "service returned status {}",
                status
            )));
        }

        let response_text = response.text().await.map_err(|e| {
            error!(%request_id, error = %e, "Failed to read analysis response body");
            RequestError::NetworkFailure(format!("Failed to read response body: {}", e))
        })?;

        serde_json::from_str::<AnalysisResult>(&response_text).map_err(|e| {
            error!(
                %request_id,
                error = %e,
                body = %response_text,
                "Analysis response does not match the expected result shape"
            );
            RequestError::MalformedResponse(e.to_string())
        })
    }
}
