//! Resume file uploads: type checks, S3 storage and PDF text extraction.

pub mod handlers;

use std::path::Path;

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;

const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];
const ALLOWED_SUFFIXES: &[&str] = &[".pdf", ".doc", ".docx"];

/// Checks the declared content type and file extension, returning the
/// lower-cased suffix (with the leading dot).
pub fn validate_resume_file(
    content_type: Option<&str>,
    file_name: Option<&str>,
) -> Result<String, AppError> {
    if !content_type.is_some_and(|ct| ALLOWED_CONTENT_TYPES.contains(&ct)) {
        return Err(AppError::Validation(
            "Upload a PDF or Word document".to_string(),
        ));
    }

    let suffix = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default();
    if !ALLOWED_SUFFIXES.contains(&suffix.as_str()) {
        return Err(AppError::Validation(
            "Unsupported file extension".to_string(),
        ));
    }
    Ok(suffix)
}

/// Object key under which an upload is stored.
pub fn object_key(suffix: &str) -> String {
    format!("uploads/{}{}", Uuid::new_v4().simple(), suffix)
}

/// Public URL for an object in a path-style bucket.
pub fn object_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key)
}

pub async fn store_object(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    content_type: &str,
    contents: Bytes,
) -> Result<(), AppError> {
    let size = contents.len();
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(contents))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Upload of {key} failed: {e}")))?;

    info!("Uploaded resume file to s3://{bucket}/{key} ({size} bytes)");
    Ok(())
}

/// Extracts plain text from a PDF. Word documents and unreadable PDFs yield `None`.
pub fn extract_text(suffix: &str, contents: &[u8]) -> Option<String> {
    if suffix != ".pdf" {
        return None;
    }
    match pdf_extract::extract_text_from_mem(contents) {
        Ok(text) if !text.trim().is_empty() => Some(text),
        Ok(_) => None,
        Err(e) => {
            warn!("PDF text extraction failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_pdf_and_word() {
        assert_eq!(
            validate_resume_file(Some("application/pdf"), Some("CV.PDF")).unwrap(),
            ".pdf"
        );
        assert_eq!(
            validate_resume_file(
                Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
                Some("resume.final.docx"),
            )
            .unwrap(),
            ".docx"
        );
    }

    #[test]
    fn test_rejects_wrong_content_type() {
        let err = validate_resume_file(Some("image/png"), Some("cv.pdf")).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("PDF or Word")));
        assert!(validate_resume_file(None, Some("cv.pdf")).is_err());
    }

    #[test]
    fn test_rejects_wrong_suffix() {
        let err = validate_resume_file(Some("application/pdf"), Some("cv.txt")).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("extension")));
        assert!(validate_resume_file(Some("application/pdf"), Some("cv")).is_err());
        assert!(validate_resume_file(Some("application/pdf"), None).is_err());
    }

    #[test]
    fn test_object_key_and_url() {
        let key = object_key(".pdf");
        assert!(key.starts_with("uploads/"));
        assert!(key.ends_with(".pdf"));
        assert_eq!(
            object_url("http://localhost:9000/", "resumes", "uploads/a.pdf"),
            "http://localhost:9000/resumes/uploads/a.pdf"
        );
    }

    #[test]
    fn test_word_documents_have_no_extracted_text() {
        assert_eq!(extract_text(".docx", b"PK\x03\x04"), None);
    }
}
