//! Local checks a resume must pass before it may be uploaded

use crate::error::AnalyzerError;
use crate::input::file_detector::{DOCX_MIME, PDF_MIME};
use crate::input::UploadFile;

pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
pub const ALLOWED_MIME_TYPES: [&str; 2] = [PDF_MIME, DOCX_MIME];

const INVALID_TYPE_MESSAGE: &str = "Invalid file type. Please upload a PDF or DOCX file.";
const TOO_LARGE_MESSAGE: &str = "File size exceeds 10MB limit.";

#[derive(Debug, Clone, PartialEq)]
pub struct FileValidation {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl FileValidation {
    fn ok() -> Self {
        Self { is_valid: true, error: None }
    }

    fn rejected(message: &str) -> Self {
        Self {
            is_valid: false,
            error: Some(message.to_string()),
        }
    }

    pub fn into_result(self) -> Result<(), AnalyzerError> {
        match self.error {
            Some(message) if !self.is_valid => Err(AnalyzerError::Validation(message)),
            _ => Ok(()),
        }
    }
}

/// Check MIME type first, then size.
pub fn validate_parts(mime_type: &str, size: u64) -> FileValidation {
    if !ALLOWED_MIME_TYPES.contains(&mime_type) {
        return FileValidation::rejected(INVALID_TYPE_MESSAGE);
    }
    if size > MAX_FILE_SIZE {
        return FileValidation::rejected(TOO_LARGE_MESSAGE);
    }
    FileValidation::ok()
}

pub fn validate(file: &UploadFile) -> FileValidation {
    validate_parts(&file.mime_type, file.size())
}
