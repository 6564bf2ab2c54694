use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::auth::AuthService;
use crate::config::Config;
use crate::scoring::service::ResumeScoringService;
use crate::store::{ResumeStore, ScoreCardStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub s3: S3Client,
    pub resumes: Arc<dyn ResumeStore>,
    pub score_cards: Arc<dyn ScoreCardStore>,
    /// Scoring engine bound to `resumes`.
    pub scoring: ResumeScoringService,
    pub auth: AuthService,
}
