//! Persistence ports. Handlers and services only see these traits; the
//! PostgreSQL adapters live in `postgres`, the in-memory ones in `memory`.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewResume, NewUser, Resume, ScoreCard, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Persists a resume, assigning its identity and timestamps.
    async fn add(&self, resume: NewResume) -> StoreResult<Resume>;

    async fn get(&self, resume_id: Uuid) -> StoreResult<Option<Resume>>;

    /// All resumes of an owner, oldest first.
    async fn list_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Resume>>;

    /// Returns `true` if a resume was removed. Its score cards go with it.
    async fn delete(&self, resume_id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait ScoreCardStore: Send + Sync {
    async fn add(&self, card: ScoreCard) -> StoreResult<ScoreCard>;

    async fn list_for_resumes(&self, resume_ids: &[Uuid]) -> StoreResult<Vec<ScoreCard>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `StoreError::Conflict` if the email is taken.
    async fn add(&self, user: NewUser) -> StoreResult<User>;

    async fn get_by_email(&self, email: &str) -> StoreResult<Option<User>>;
}
