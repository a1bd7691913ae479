//! reqwest implementation of the backend API

use crate::api::{
    resume_endpoint, ResumeService, ANALYZE_JOB_ENDPOINT, CLEANUP_ENDPOINT, GENERIC_ERROR,
    RESUMES_ENDPOINT, UPLOAD_ENDPOINT,
};
use crate::config::ApiConfig;
use crate::error::{AnalyzerError, Result};
use crate::input::UploadFile;
use crate::model::{ErrorResponse, JobDescriptionRequest, ResumeListItem, ResumeUploadResponse};
use log::{debug, error, info};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AnalyzerError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!("API client configured for {} (timeout {}s)", base_url, timeout_secs);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    /// Send once and turn any non-2xx status into a normalized `Api` error.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            let err = AnalyzerError::from(e);
            error!("API error: {}", err);
            err
        })?;

        let status = response.status();
        debug!("{} -> {}", response.url(), status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = normalize_error_body(&body);
        error!("API error ({}): {}", status, if body.is_empty() { &message } else { &body });
        Err(AnalyzerError::Api(message))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!("Unexpected response body: {}", e);
            AnalyzerError::Api(format!("Invalid response from server: {}", e))
        })
    }
}

/// Message of a failed response: its `error` field when present and
/// non-empty, otherwise a generic message.
pub fn normalize_error_body(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|response| response.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| GENERIC_ERROR.to_string())
}

impl ResumeService for ApiClient {
    async fn upload_resume(
        &self,
        file: &UploadFile,
        job_description: Option<&str>,
    ) -> Result<ResumeUploadResponse> {
        let job_description = job_description.filter(|jd| !jd.is_empty());

        info!(
            "Uploading file: name={}, size={}, type={}, has_job_description={}",
            file.file_name,
            file.size(),
            file.mime_type,
            job_description.is_some()
        );

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| AnalyzerError::InvalidInput(format!("Invalid MIME type '{}': {}", file.mime_type, e)))?;

        let mut form = Form::new()
            .part("file", part)
            .text("filename", file.file_name.clone());
        if let Some(jd) = job_description {
            form = form.text("job_description", jd.to_string());
        }

        self.send_json(self.request(Method::POST, UPLOAD_ENDPOINT).multipart(form))
            .await
    }

    async fn cleanup(&self) -> Result<()> {
        self.send(self.request(Method::POST, CLEANUP_ENDPOINT)).await?;
        Ok(())
    }

    async fn get_resumes(&self) -> Result<Vec<ResumeListItem>> {
        self.send_json(self.request(Method::GET, RESUMES_ENDPOINT)).await
    }

    async fn get_resume(&self, id: u64) -> Result<ResumeUploadResponse> {
        self.send_json(self.request(Method::GET, &resume_endpoint(id)))
            .await
    }

    async fn analyze_with_job_description(
        &self,
        request: &JobDescriptionRequest,
    ) -> Result<ResumeUploadResponse> {
        self.send_json(self.request(Method::POST, ANALYZE_JOB_ENDPOINT).json(request))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_field_is_used() {
        assert_eq!(normalize_error_body(r#"{"error": "File too large"}"#), "File too large");
    }

    #[test]
    fn test_missing_error_field_uses_generic_message() {
        assert_eq!(normalize_error_body(r#"{"detail": "x"}"#), GENERIC_ERROR);
        assert_eq!(normalize_error_body(r#"{"error": ""}"#), GENERIC_ERROR);
        assert_eq!(normalize_error_body("<html>bad gateway</html>"), GENERIC_ERROR);
        assert_eq!(normalize_error_body(""), GENERIC_ERROR);
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/", 5).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
