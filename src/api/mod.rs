//! Backend access
//! The session talks to the backend only through `ResumeService`.

pub mod client;

use crate::error::Result;
use crate::input::UploadFile;
use crate::model::{JobDescriptionRequest, ResumeListItem, ResumeUploadResponse};
use std::future::Future;

pub use client::ApiClient;

pub const UPLOAD_ENDPOINT: &str = "/api/upload/";
pub const CLEANUP_ENDPOINT: &str = "/api/cleanup/";
pub const RESUMES_ENDPOINT: &str = "/api/my-resumes/";
pub const ANALYZE_JOB_ENDPOINT: &str = "/api/analyze-job/";

/// Message used when a failed response carries no usable `error` field.
pub const GENERIC_ERROR: &str = "An error occurred";

pub fn resume_endpoint(id: u64) -> String {
    format!("/api/resumes/{}/", id)
}

pub trait ResumeService {
    /// Upload one file for analysis. `job_description` is attached only
    /// when it is non-empty.
    fn upload_resume(
        &self,
        file: &UploadFile,
        job_description: Option<&str>,
    ) -> impl Future<Output = Result<ResumeUploadResponse>> + Send;

    /// Ask the backend to drop previously uploaded data.
    fn cleanup(&self) -> impl Future<Output = Result<()>> + Send;

    fn get_resumes(&self) -> impl Future<Output = Result<Vec<ResumeListItem>>> + Send;

    fn get_resume(&self, id: u64) -> impl Future<Output = Result<ResumeUploadResponse>> + Send;

    fn analyze_with_job_description(
        &self,
        request: &JobDescriptionRequest,
    ) -> impl Future<Output = Result<ResumeUploadResponse>> + Send;
}
