use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Output of one scoring run. Never mutated after creation.
///
/// `ats_score` always equals `overall_score`. Both are kept because API
/// consumers read either name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScoreCard {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub job_description_id: Option<Uuid>,
    pub ats_score: f64,
    pub keyword_match: f64,
    pub formatting_score: f64,
    pub overall_score: f64,
    pub recommendations: Vec<String>,
    pub generated_at: DateTime<Utc>,
}
