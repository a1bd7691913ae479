//! Request and response bodies exchanged with the analysis backend

use crate::model::result::AnalysisResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeUploadResponse {
    pub id: u64,
    pub filename: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub analysis_result: Option<AnalysisResult>,
}

/// One entry of `GET /api/my-resumes/`, which answers with a bare array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeListItem {
    pub id: u64,
    pub filename: String,
    #[serde(default)]
    pub ats_score: Option<f64>,
    #[serde(default, alias = "created_at")]
    pub upload_timestamp: Option<String>,
    #[serde(default)]
    pub processing_status: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptionRequest {
    pub resume_id: u64,
    pub job_description: String,
}

/// Body of every failed backend response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
}
