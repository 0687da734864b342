// src/utils.rs
use crate::error::ValidationError;

/// CV formats accepted by the scoring service
pub const ALLOWED_CV_EXTENSIONS: &[&str] = &["pdf", "docx"];

/// Normalize language code
pub fn normalize_language(lang: Option<&str>) -> String {
    match lang.map(|s| s.trim().to_lowercase()).as_deref() {
        Some("fr") | Some("french") | Some("français") | Some("francais") => "fr".to_string(),
        _ => "en".to_string(), // Default to English for None or unknown languages
    }
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate a CV file name against the accepted formats
pub fn validate_cv_extension(filename: &str) -> Result<(), ValidationError> {
    match get_file_extension(filename) {
        Some(ext) if ALLOWED_CV_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(ValidationError::UnsupportedFileType(filename.to_string())),
    }
}

/// Get content type for a CV file
pub fn content_type(filename: &str) -> &'static str {
    match get_file_extension(filename).as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}
