//! Session controller against an in-process backend

use resume_analyzer::api::ResumeService;
use resume_analyzer::input::file_detector::PDF_MIME;
use resume_analyzer::input::UploadFile;
use resume_analyzer::model::{
    AnalysisSettings, JobDescriptionRequest, ResumeListItem, ResumeUploadResponse,
};
use resume_analyzer::session::{NotificationLevel, Phase, Session, UPLOAD_SUCCESS_MESSAGE};
use resume_analyzer::{AnalyzerError, Result};
use std::sync::Mutex;

#[derive(Clone)]
enum Reply {
    Analysis(ResumeUploadResponse),
    Rejected(&'static str),
}

/// Records every call in order and answers with a canned reply.
struct FakeBackend {
    reply: Reply,
    cleanup_fails: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            cleanup_fails: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn answer(&self) -> Result<ResumeUploadResponse> {
        match &self.reply {
            Reply::Analysis(response) => Ok(response.clone()),
            Reply::Rejected(message) => Err(AnalyzerError::Api(message.to_string())),
        }
    }
}

impl ResumeService for FakeBackend {
    async fn upload_resume(
        &self,
        file: &UploadFile,
        job_description: Option<&str>,
    ) -> Result<ResumeUploadResponse> {
        self.record(format!(
            "upload {} jd={}",
            file.file_name,
            job_description.unwrap_or("-")
        ));
        self.answer()
    }

    async fn cleanup(&self) -> Result<()> {
        self.record("cleanup".to_string());
        if self.cleanup_fails {
            Err(AnalyzerError::Api("cleanup unavailable".to_string()))
        } else {
            Ok(())
        }
    }

    async fn get_resumes(&self) -> Result<Vec<ResumeListItem>> {
        self.record("list".to_string());
        Ok(Vec::new())
    }

    async fn get_resume(&self, id: u64) -> Result<ResumeUploadResponse> {
        self.record(format!("get {}", id));
        self.answer()
    }

    async fn analyze_with_job_description(
        &self,
        request: &JobDescriptionRequest,
    ) -> Result<ResumeUploadResponse> {
        self.record(format!("match {} {}", request.resume_id, request.job_description));
        self.answer()
    }
}

fn fixture_response() -> ResumeUploadResponse {
    let content = std::fs::read_to_string("tests/fixtures/upload_response.json").unwrap();
    serde_json::from_str(&content).unwrap()
}

fn pdf(name: &str) -> UploadFile {
    UploadFile::new(name, PDF_MIME, b"%PDF-1.7 test".to_vec())
}

fn session(backend: FakeBackend) -> Session<FakeBackend> {
    Session::new(backend, AnalysisSettings::default())
}

#[tokio::test]
async fn test_successful_upload_reaches_ready() {
    let mut session = session(FakeBackend::new(Reply::Analysis(fixture_response())));

    session.upload(&pdf("local.pdf"), None).await.unwrap();

    assert_eq!(session.phase(), Phase::Ready);
    assert!(!session.is_loading());
    let result = session.result().unwrap();
    assert_eq!(result.ats_score.total_score, 82.0);
    assert_eq!(result.ats_score.grade, "A");
    // The name reported by the backend wins over the local one
    assert_eq!(session.file_name(), Some("jane_doe_resume.pdf"));
    assert_eq!(session.view().resume_id, Some(42));

    assert_eq!(session.service().calls(), vec!["cleanup", "upload local.pdf jd=-"]);
    let notifications = session.take_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Success);
    assert_eq!(notifications[0].message, UPLOAD_SUCCESS_MESSAGE);

    session.new_analysis();
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.result().is_none());
    assert!(session.file_name().is_none());
}

#[tokio::test]
async fn test_backend_rejection_returns_to_idle_with_one_error() {
    let mut session = session(FakeBackend::new(Reply::Rejected("File too large")));

    let err = session.upload(&pdf("cv.pdf"), None).await.unwrap_err();

    assert!(matches!(err, AnalyzerError::Api(ref m) if m == "File too large"));
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.result().is_none());
    let notifications = session.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Error);
    assert_eq!(notifications[0].message, "File too large");
}

#[tokio::test]
async fn test_second_upload_is_rejected_while_uploading() {
    let mut session = session(FakeBackend::new(Reply::Analysis(fixture_response())));

    session.begin_upload(&pdf("first.pdf")).unwrap();
    assert!(session.is_loading());

    let err = session.upload(&pdf("second.pdf"), None).await.unwrap_err();
    assert!(matches!(err, AnalyzerError::UploadInProgress));
    assert!(session.service().calls().is_empty());
    assert_eq!(session.phase(), Phase::Uploading);
}

#[tokio::test]
async fn test_invalid_file_never_reaches_the_network() {
    let mut session = session(FakeBackend::new(Reply::Analysis(fixture_response())));
    let text_file = UploadFile::new("notes.txt", "text/plain", b"hello".to_vec());

    let err = session.upload(&text_file, None).await.unwrap_err();

    assert!(matches!(err, AnalyzerError::Validation(_)));
    assert!(session.service().calls().is_empty());
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.notifications().len(), 1);
    assert_eq!(
        session.notifications()[0].message,
        "Invalid file type. Please upload a PDF or DOCX file."
    );
}

#[tokio::test]
async fn test_failed_cleanup_does_not_block_upload() {
    let mut backend = FakeBackend::new(Reply::Analysis(fixture_response()));
    backend.cleanup_fails = true;
    let mut session = session(backend);

    session.upload(&pdf("cv.pdf"), Some("Rust engineer")).await.unwrap();

    assert_eq!(session.phase(), Phase::Ready);
    assert_eq!(
        session.service().calls(),
        vec!["cleanup", "upload cv.pdf jd=Rust engineer"]
    );
    // Cleanup failures are never surfaced
    assert_eq!(session.notifications().len(), 1);
    assert_eq!(session.notifications()[0].level, NotificationLevel::Success);
}

#[tokio::test]
async fn test_missing_analysis_uses_placeholder() {
    let mut response = fixture_response();
    response.analysis_result = None;
    let mut session = session(FakeBackend::new(Reply::Analysis(response)));

    session.upload(&pdf("cv.pdf"), None).await.unwrap();

    let result = session.result().unwrap();
    assert_eq!(result.ats_score.total_score, 0.0);
    assert_eq!(result.ats_score.grade, "F");
    assert!(result.suggestions.is_empty());
}

#[tokio::test]
async fn test_fallback_text_quality_still_reaches_ready() {
    let mut body: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string("tests/fixtures/upload_response.json").unwrap()).unwrap();
    body["analysis_result"]["text_quality"] = serde_json::json!({"word_count": 512, "readability": "Basic"});
    let response: ResumeUploadResponse = serde_json::from_value(body).unwrap();
    let mut session = session(FakeBackend::new(Reply::Analysis(response)));

    session.upload(&pdf("cv.pdf"), None).await.unwrap();

    assert_eq!(session.phase(), Phase::Ready);
    let quality = session.result().unwrap().text_quality.as_ref().unwrap();
    let readability = quality.readability.as_ref().unwrap();
    assert!(readability.metrics().is_none());
    assert_eq!(readability.level(), Some("Basic"));
    assert_eq!(quality.issue_count(), 0);
}

#[tokio::test]
async fn test_match_and_open_use_their_endpoints() {
    let mut session = session(FakeBackend::new(Reply::Analysis(fixture_response())));

    session
        .analyze_with_job_description(42, "Senior Rust developer")
        .await
        .unwrap();
    session.open_resume(7).await.unwrap();

    assert_eq!(
        session.service().calls(),
        vec!["match 42 Senior Rust developer", "get 7"]
    );
    assert_eq!(session.phase(), Phase::Ready);
}

#[tokio::test]
async fn test_settings_can_change_in_any_phase() {
    let mut session = session(FakeBackend::new(Reply::Analysis(fixture_response())));
    session.begin_upload(&pdf("cv.pdf")).unwrap();

    let mut settings = AnalysisSettings::default();
    settings.industry = Some("Consulting".to_string());
    session.replace_settings(settings);

    assert_eq!(session.settings().industry.as_deref(), Some("Consulting"));
    assert_eq!(session.phase(), Phase::Uploading);
}

#[test]
fn test_shared_link_notification() {
    let mut session = session(FakeBackend::new(Reply::Rejected("unused")));

    assert!(session.handle_shared_link("http://localhost:3000/").is_none());
    assert!(session.notifications().is_empty());

    let shared = session
        .handle_shared_link("http://localhost:3000/#shared-analysis?score=82&skills=14&fileName=my%20cv.pdf")
        .unwrap();
    assert_eq!(shared.file_name, "my cv.pdf");
    assert_eq!(session.notifications()[0].level, NotificationLevel::Info);
    assert_eq!(
        session.notifications()[0].message,
        "Viewing shared analysis for my cv.pdf: 82% ATS score"
    );
}
