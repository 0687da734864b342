// src/core/input_capture.rs
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::error::ValidationError;
use crate::types::{AnalysisRequest, CvFile};
use crate::utils::validate_cv_extension;
use crate::view::Labels;

/// Human-readable name of the picked file. Display feedback only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLabel {
    pub text: String,
    pub emphasized: bool,
}

/// The two user inputs: selected CV file and job-description text.
#[derive(Debug, Clone)]
pub struct InputCapture {
    file: Option<CvFile>,
    job_description: String,
    file_label: FileLabel,
}

impl InputCapture {
    pub fn new(labels: &Labels) -> Self {
        Self {
            file: None,
            job_description: String::new(),
            file_label: FileLabel {
                text: labels.no_file_selected.to_string(),
                emphasized: false,
            },
        }
    }

    pub fn select_file(&mut self, file: CvFile) {
        self.file_label = FileLabel {
            text: file.file_name.clone(),
            emphasized: true,
        };
        self.file = Some(file);
    }

    /// Read a CV from disk and select it
    pub async fn select_path(&mut self, path: &Path) -> Result<()> {
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read CV file: {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("CV path has no usable file name: {}", path.display()))?
            .to_string();

        info!(file_name = %file_name, bytes = content.len(), "CV file selected");
        self.select_file(CvFile::new(file_name, content));
        Ok(())
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub async fn load_job_description(&mut self, path: &Path) -> Result<()> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read job description: {}", path.display()))?;
        self.set_job_description(text);
        Ok(())
    }

    pub fn file_label(&self) -> &FileLabel {
        &self.file_label
    }

    pub fn validate(&self) -> Result<AnalysisRequest, ValidationError> {
        validate(self.file.as_ref(), Some(&self.job_description))
    }
}

/// Build a request from the raw inputs, or say why it can't be submitted.
pub fn validate(
    file: Option<&CvFile>,
    job_description: Option<&str>,
) -> Result<AnalysisRequest, ValidationError> {
    let file = file.ok_or(ValidationError::MissingFile)?;
    let job_description = job_description.unwrap_or_default();
    if job_description.trim().is_empty() {
        return Err(ValidationError::EmptyJobDescription);
    }
    validate_cv_extension(&file.file_name)?;

    Ok(AnalysisRequest::new(
        file.clone(),
        job_description.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::labels::EN;
    use std::io::Write;

    fn resume() -> CvFile {
        CvFile::new("resume.pdf", b"%PDF-1.4".to_vec())
    }

    #[test]
    fn test_validate_requires_file() {
        assert_eq!(
            validate(None, Some("Go backend engineer")).unwrap_err(),
            ValidationError::MissingFile
        );
    }

    #[test]
    fn test_validate_rejects_blank_job_description() {
        let file = resume();
        for text in [None, Some(""), Some("   \n\t ")] {
            assert_eq!(
                validate(Some(&file), text).unwrap_err(),
                ValidationError::EmptyJobDescription
            );
        }
    }

    #[test]
    fn test_validate_rejects_unsupported_format() {
        let file = CvFile::new("resume.txt", b"hello".to_vec());
        assert_eq!(
            validate(Some(&file), Some("Rust developer")).unwrap_err(),
            ValidationError::UnsupportedFileType("resume.txt".to_string())
        );
    }

    #[test]
    fn test_validate_builds_fresh_requests() {
        let file = resume();
        let first = validate(Some(&file), Some("Go backend engineer")).unwrap();
        let second = validate(Some(&file), Some("Go backend engineer")).unwrap();
        assert_eq!(first.file, file);
        assert_eq!(first.job_description, "Go backend engineer");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_file_label_tracks_selection() {
        let mut input = InputCapture::new(&EN);
        assert_eq!(input.file_label().text, "No file selected");
        assert!(!input.file_label().emphasized);

        input.select_file(resume());
        assert_eq!(
            input.file_label(),
            &FileLabel {
                text: "resume.pdf".to_string(),
                emphasized: true
            }
        );
    }

    #[tokio::test]
    async fn test_select_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.docx");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"docx bytes")
            .unwrap();

        let mut input = InputCapture::new(&EN);
        input.select_path(&path).await.unwrap();
        input.set_job_description("Platform engineer");

        let request = input.validate().unwrap();
        assert_eq!(request.file.file_name, "cv.docx");
        assert_eq!(request.file.content, b"docx bytes");
    }

    #[tokio::test]
    async fn test_select_path_missing_file_errors() {
        let mut input = InputCapture::new(&EN);
        let err = input
            .select_path(Path::new("/nonexistent/cv.pdf"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read CV file"));
        assert_eq!(input.validate().unwrap_err(), ValidationError::MissingFile);
    }
}
