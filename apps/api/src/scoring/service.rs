//! Composes the scoring engine with the resume store.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::{JobDescription, NewResume, Resume, ScoreCard};
use crate::scoring::engine::ScoringEngine;
use crate::store::{ResumeStore, StoreError};

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Resume {0} not found")]
    NotFound(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct ResumeScoringService {
    store: Arc<dyn ResumeStore>,
    engine: ScoringEngine,
}

impl ResumeScoringService {
    pub fn new(store: Arc<dyn ResumeStore>, engine: ScoringEngine) -> Self {
        Self { store, engine }
    }

    /// Scores a resume that is already stored.
    pub async fn score_existing(
        &self,
        resume_id: Uuid,
        job: Option<&JobDescription>,
    ) -> Result<ScoreCard, ScoringError> {
        let resume = self
            .store
            .get(resume_id)
            .await?
            .ok_or(ScoringError::NotFound(resume_id))?;

        let card = self.engine.score(&resume, job);
        info!(
            "Scored resume {resume_id}: overall={:.4} keyword={:.4} formatting={:.1}",
            card.overall_score, card.keyword_match, card.formatting_score
        );
        Ok(card)
    }

    /// Persists the resume, then scores the stored copy.
    pub async fn upload_and_score(
        &self,
        resume: NewResume,
        job: Option<&JobDescription>,
    ) -> Result<(Resume, ScoreCard), ScoringError> {
        let stored = self.store.add(resume).await?;
        let card = self.engine.score(&stored, job);
        info!(
            "Uploaded and scored resume {}: overall={:.4}",
            stored.id, card.overall_score
        );
        Ok((stored, card))
    }
}
