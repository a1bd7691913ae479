//! Input handling module
//! Handles file type detection and loading resumes for upload

pub mod file_detector;
pub mod manager;

pub use manager::UploadFile;
