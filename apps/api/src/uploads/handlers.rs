use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;
use crate::uploads::{extract_text, object_key, object_url, store_object, validate_resume_file};

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub file_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_text: Option<String>,
}

/// POST /api/v1/resumes/upload
///
/// Accepts a multipart `file` field (PDF or Word), stores it in S3 and returns
/// its URL. PDFs also get their text extracted for the scoring request.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeUploadResponse>), AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let suffix = validate_resume_file(content_type.as_deref(), field.file_name())?;
        let contents = field.bytes().await?;
        if contents.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }

        let parsed_text = {
            let suffix = suffix.clone();
            let contents = contents.clone();
            tokio::task::spawn_blocking(move || extract_text(&suffix, &contents))
                .await
                .unwrap_or_else(|e| {
                    warn!("Text extraction task failed: {e}");
                    None
                })
        };
        let key = object_key(&suffix);
        store_object(
            &state.s3,
            &state.config.s3_bucket,
            &key,
            content_type.as_deref().unwrap_or("application/octet-stream"),
            contents,
        )
        .await?;

        let file_url = object_url(&state.config.s3_endpoint, &state.config.s3_bucket, &key);
        return Ok((
            StatusCode::CREATED,
            Json(ResumeUploadResponse {
                file_url,
                parsed_text,
            }),
        ));
    }

    Err(AppError::Validation(
        "Multipart field 'file' is required".to_string(),
    ))
}
