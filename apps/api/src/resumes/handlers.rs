//! Axum route handlers for the Resume API.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{JobDescription, NewResume, Resume, ScoreCard};
use crate::state::AppState;

const MAX_FILE_URL_LEN: usize = 512;
const MAX_TITLE_LEN: usize = 255;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct JobDescriptionInput {
    pub role_title: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub canonical_text: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
}

impl From<JobDescriptionInput> for JobDescription {
    fn from(input: JobDescriptionInput) -> Self {
        JobDescription {
            company_name: input.company_name,
            canonical_text: input.canonical_text,
            required_skills: input.required_skills,
            preferred_skills: input.preferred_skills,
            ..JobDescription::new(input.role_title)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ResumeScoreRequest {
    pub resume: NewResume,
    #[serde(default)]
    pub job_description: Option<JobDescriptionInput>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RescoreRequest {
    #[serde(default)]
    pub job_description: Option<JobDescriptionInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreCardResponse {
    pub resume_id: Uuid,
    pub job_description_id: Option<Uuid>,
    pub ats_score: f64,
    pub keyword_match: f64,
    pub formatting_score: f64,
    pub overall_score: f64,
    pub recommendations: Vec<String>,
}

impl From<ScoreCard> for ScoreCardResponse {
    fn from(card: ScoreCard) -> Self {
        Self {
            resume_id: card.resume_id,
            job_description_id: card.job_description_id,
            ats_score: card.ats_score,
            keyword_match: card.keyword_match,
            formatting_score: card.formatting_score,
            overall_score: card.overall_score,
            recommendations: card.recommendations,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResumeScoreResponse {
    pub resume: Resume,
    pub score_card: ScoreCardResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RescoreResponse {
    pub score_card: ScoreCardResponse,
}

#[derive(Deserialize)]
pub struct OwnerQuery {
    pub owner_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/score
///
/// Stores the resume, scores it against the optional job description and
/// records the score card.
pub async fn handle_upload_and_score(
    State(state): State<AppState>,
    Json(request): Json<ResumeScoreRequest>,
) -> Result<(StatusCode, Json<ResumeScoreResponse>), AppError> {
    validate_resume(&request.resume)?;
    let job = validated_job(request.job_description)?;

    let (resume, card) = state
        .scoring
        .upload_and_score(request.resume, job.as_ref())
        .await?;
    let card = match state.score_cards.add(card).await {
        Ok(card) => card,
        Err(e) => {
            tracing::error!("Failed to record score card for resume {}: {e}", resume.id);
            // Roll back the resume insert
            if let Err(cleanup) = state.resumes.delete(resume.id).await {
                tracing::error!("Orphaned resume {} left in store: {cleanup}", resume.id);
            }
            return Err(e.into());
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(ResumeScoreResponse {
            resume,
            score_card: card.into(),
        }),
    ))
}

/// POST /api/v1/resumes/:id/score
///
/// Re-scores a stored resume, e.g. against a different job description.
/// An empty body scores without a job description.
pub async fn handle_score_existing(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<RescoreResponse>, AppError> {
    let request = parse_rescore(&body)?;
    let job = validated_job(request.job_description)?;

    let card = state.scoring.score_existing(resume_id, job.as_ref()).await?;
    let card = state.score_cards.add(card).await?;

    Ok(Json(RescoreResponse {
        score_card: card.into(),
    }))
}

/// GET /api/v1/resumes?owner_id=
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<Vec<Resume>>, AppError> {
    Ok(Json(state.resumes.list_for_owner(params.owner_id).await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<Resume>, AppError> {
    state
        .resumes
        .get(resume_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.resumes.delete(resume_id).await? {
        return Err(AppError::NotFound("Resume not found".to_string()));
    }
    tracing::info!("Deleted resume {resume_id}");
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

fn validate_resume(resume: &NewResume) -> Result<(), AppError> {
    let url = resume.file_url.trim();
    let host = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    if !host.is_some_and(|rest| !rest.is_empty() && !rest.starts_with('/')) {
        return Err(AppError::Validation(
            "file_url must be an absolute http(s) URL".to_string(),
        ));
    }
    if url.chars().count() > MAX_FILE_URL_LEN {
        return Err(AppError::Validation(format!(
            "file_url must be at most {MAX_FILE_URL_LEN} characters"
        )));
    }
    Ok(())
}

fn parse_rescore(body: &[u8]) -> Result<RescoreRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RescoreRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
}

fn validated_job(input: Option<JobDescriptionInput>) -> Result<Option<JobDescription>, AppError> {
    let Some(input) = input else {
        return Ok(None);
    };
    if input.role_title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::Validation(format!(
            "role_title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    if input
        .company_name
        .as_ref()
        .is_some_and(|c| c.chars().count() > MAX_TITLE_LEN)
    {
        return Err(AppError::Validation(format!(
            "company_name must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(Some(input.into()))
}
