//! Session controller: owns the current analysis and drives uploads
//!
//! Phases move `Idle -> Uploading -> Ready -> Idle`. Only the controller
//! mutates state; panels read it through [`SessionView`].

use crate::api::ResumeService;
use crate::error::{AnalyzerError, Result};
use crate::input::UploadFile;
use crate::model::{AnalysisResult, AnalysisSettings, JobDescriptionRequest, ResumeUploadResponse};
use crate::output::share::{parse_shared_link, SharedAnalysis};
use crate::validation;
use log::{debug, info, warn};

pub const UPLOAD_SUCCESS_MESSAGE: &str = "Resume analyzed successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Uploading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// Transient message for the user, the terminal analogue of a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    InProgress,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStep {
    pub label: &'static str,
    pub state: StepState,
}

/// Read-only snapshot handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub phase: Phase,
    pub result: Option<&'a AnalysisResult>,
    pub file_name: Option<&'a str>,
    pub resume_id: Option<u64>,
    pub settings: &'a AnalysisSettings,
}

impl<'a> SessionView<'a> {
    /// Snapshot of a result read back from an export, with no backend behind it.
    pub fn loaded(result: &'a AnalysisResult, file_name: &'a str, settings: &'a AnalysisSettings) -> Self {
        Self {
            phase: Phase::Ready,
            result: Some(result),
            file_name: Some(file_name),
            resume_id: None,
            settings,
        }
    }
}

pub struct Session<S: ResumeService> {
    service: S,
    phase: Phase,
    result: Option<AnalysisResult>,
    file_name: Option<String>,
    resume_id: Option<u64>,
    settings: AnalysisSettings,
    notifications: Vec<Notification>,
}

impl<S: ResumeService> Session<S> {
    pub fn new(service: S, settings: AnalysisSettings) -> Self {
        Self {
            service,
            phase: Phase::Idle,
            result: None,
            file_name: None,
            resume_id: None,
            settings,
            notifications: Vec::new(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Uploading
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            phase: self.phase,
            result: self.result.as_ref(),
            file_name: self.file_name.as_deref(),
            resume_id: self.resume_id,
            settings: &self.settings,
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let message = message.into();
        debug!("notification ({:?}): {}", level, message);
        self.notifications.push(Notification { level, message });
    }

    /// Settings are independent of the phase and replaced as a whole.
    pub fn replace_settings(&mut self, settings: AnalysisSettings) {
        self.settings = settings;
    }

    /// Validate `file` and enter `Uploading`. Nothing is sent yet.
    pub fn begin_upload(&mut self, file: &UploadFile) -> Result<()> {
        if self.phase == Phase::Uploading {
            warn!("Upload of {} ignored: another upload is in progress", file.file_name);
            return Err(AnalyzerError::UploadInProgress);
        }

        if let Err(e) = validation::validate(file).into_result() {
            self.notify(NotificationLevel::Error, e.user_message());
            return Err(e);
        }

        self.phase = Phase::Uploading;
        self.result = None;
        Ok(())
    }

    /// Validate, clean up, upload, and settle in `Ready` or back in `Idle`.
    pub async fn upload(&mut self, file: &UploadFile, job_description: Option<&str>) -> Result<()> {
        self.begin_upload(file)?;

        if let Err(e) = self.service.cleanup().await {
            warn!("Cleanup failed, continuing with upload: {}", e);
        } else {
            debug!("Pre-upload cleanup completed");
        }

        let outcome = self.service.upload_resume(file, job_description).await;
        self.finish(outcome)
    }

    /// Re-run the analysis of an uploaded resume against a job description.
    pub async fn analyze_with_job_description(
        &mut self,
        resume_id: u64,
        job_description: &str,
    ) -> Result<()> {
        if self.phase == Phase::Uploading {
            return Err(AnalyzerError::UploadInProgress);
        }
        self.phase = Phase::Uploading;
        self.result = None;

        let request = JobDescriptionRequest {
            resume_id,
            job_description: job_description.to_string(),
        };
        let outcome = self.service.analyze_with_job_description(&request).await;
        self.finish(outcome)
    }

    /// Load a previously analyzed resume from the backend.
    pub async fn open_resume(&mut self, resume_id: u64) -> Result<()> {
        if self.phase == Phase::Uploading {
            return Err(AnalyzerError::UploadInProgress);
        }
        self.phase = Phase::Uploading;
        self.result = None;

        let outcome = self.service.get_resume(resume_id).await;
        self.finish(outcome)
    }

    /// Show an analysis that did not come from the backend, e.g. a saved export.
    fn finish(&mut self, outcome: Result<ResumeUploadResponse>) -> Result<()> {
        match outcome {
            Ok(response) => {
                let result = response.analysis_result.unwrap_or_else(|| {
                    warn!("Response for {} carried no analysis; using placeholder", response.filename);
                    AnalysisResult::placeholder()
                });
                info!(
                    "Analysis ready for {} (id {}): score {}",
                    response.filename, response.id, result.ats_score.total_score
                );
                self.result = Some(result);
                self.file_name = Some(response.filename);
                self.resume_id = Some(response.id);
                self.phase = Phase::Ready;
                self.notify(NotificationLevel::Success, UPLOAD_SUCCESS_MESSAGE);
                Ok(())
            }
            Err(e) => {
                self.result = None;
                self.phase = Phase::Idle;
                self.notify(NotificationLevel::Error, e.user_message());
                Err(e)
            }
        }
    }

    /// Drop the current result and file name.
    pub fn new_analysis(&mut self) {
        self.result = None;
        self.file_name = None;
        self.resume_id = None;
        self.phase = Phase::Idle;
    }

    /// Announce a shared-analysis link. Other links are ignored.
    pub fn handle_shared_link(&mut self, url: &str) -> Option<SharedAnalysis> {
        let shared = parse_shared_link(url)?;
        self.notify(NotificationLevel::Info, shared.toast_message());
        Some(shared)
    }

    pub fn progress_steps(&self) -> [ProgressStep; 3] {
        progress_steps(self.phase, self.result.is_some())
    }
}

pub fn progress_steps(phase: Phase, has_results: bool) -> [ProgressStep; 3] {
    let done = |flag: bool| {
        if flag {
            StepState::Completed
        } else {
            StepState::Pending
        }
    };

    [
        ProgressStep {
            label: "Upload Resume",
            state: StepState::Completed,
        },
        ProgressStep {
            label: "AI Analysis",
            state: if has_results {
                StepState::Completed
            } else if phase == Phase::Uploading {
                StepState::InProgress
            } else {
                StepState::Pending
            },
        },
        ProgressStep {
            label: "View Results",
            state: done(has_results),
        },
    ]
}
