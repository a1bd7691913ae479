//! Loading local resume files into uploadable form

use crate::error::{AnalyzerError, Result};
use crate::format::format_file_size;
use crate::input::file_detector::FileType;
use crate::validation::{self, MAX_FILE_SIZE};
use log::info;
use std::path::Path;
use tokio::fs;

/// A resume ready to be validated and sent as a multipart part.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, inferring its MIME type from the extension.
    pub async fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| AnalyzerError::InvalidInput(format!("Not a file: {}", path.display())))?;

        let file_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(FileType::from_extension)
            .unwrap_or(FileType::Unknown);

        // Oversized files are rejected without reading them into memory
        let size = fs::metadata(path).await?.len();
        if size > MAX_FILE_SIZE {
            validation::validate_parts(file_type.mime_type(), size).into_result()?;
        }

        let bytes = fs::read(path).await?;
        info!(
            "Loaded {} ({}, {})",
            file_name,
            format_file_size(bytes.len() as u64),
            file_type.mime_type()
        );

        Ok(Self::new(file_name, file_type.mime_type(), bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Read an optional job description file, treating blank content as absent.
pub async fn read_job_description(path: Option<&Path>) -> Result<Option<String>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text = fs::read_to_string(path).await?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
