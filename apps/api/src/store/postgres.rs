use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{NewResume, NewUser, Resume, ScoreCard, User};
use crate::store::{ResumeStore, ScoreCardStore, StoreError, StoreResult, UserStore};

/// Postgres unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn add(&self, resume: NewResume) -> StoreResult<Resume> {
        let stored = sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes
                (owner_id, file_url, parsed_text, extracted_skills, extracted_keywords)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(resume.owner_id)
        .bind(&resume.file_url)
        .bind(&resume.parsed_text)
        .bind(&resume.extracted_skills)
        .bind(&resume.extracted_keywords)
        .fetch_one(&self.pool)
        .await?;

        info!("Stored resume {} for owner {}", stored.id, stored.owner_id);
        Ok(stored)
    }

    async fn get(&self, resume_id: Uuid) -> StoreResult<Option<Resume>> {
        Ok(
            sqlx::query_as::<_, Resume>("SELECT * FROM resumes WHERE id = $1")
                .bind(resume_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Resume>> {
        Ok(sqlx::query_as::<_, Resume>(
            "SELECT * FROM resumes WHERE owner_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn delete(&self, resume_id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(resume_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone)]
pub struct PgScoreCardStore {
    pool: PgPool,
}

impl PgScoreCardStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreCardStore for PgScoreCardStore {
    async fn add(&self, card: ScoreCard) -> StoreResult<ScoreCard> {
        Ok(sqlx::query_as::<_, ScoreCard>(
            r#"
            INSERT INTO score_cards
                (id, resume_id, job_description_id, ats_score, keyword_match,
                 formatting_score, overall_score, recommendations, generated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(card.id)
        .bind(card.resume_id)
        .bind(card.job_description_id)
        .bind(card.ats_score)
        .bind(card.keyword_match)
        .bind(card.formatting_score)
        .bind(card.overall_score)
        .bind(&card.recommendations)
        .bind(card.generated_at)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_for_resumes(&self, resume_ids: &[Uuid]) -> StoreResult<Vec<ScoreCard>> {
        if resume_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(sqlx::query_as::<_, ScoreCard>(
            "SELECT * FROM score_cards WHERE resume_id = ANY($1) ORDER BY generated_at ASC",
        )
        .bind(resume_ids)
        .fetch_all(&self.pool)
        .await?)
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn add(&self, user: NewUser) -> StoreResult<User> {
        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, hashed_password, full_name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(&user.full_name)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNIQUE_VIOLATION) => Err(
                StoreError::Conflict(format!("Email {} already registered", user.email)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}
