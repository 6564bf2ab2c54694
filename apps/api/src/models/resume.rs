use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored resume. Created on upload, deleted on explicit request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resume {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub file_url: String,
    pub parsed_text: Option<String>,
    pub extracted_skills: Vec<String>,
    pub extracted_keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A resume that has not been persisted yet. The store assigns identity and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewResume {
    pub owner_id: Uuid,
    pub file_url: String,
    #[serde(default)]
    pub parsed_text: Option<String>,
    #[serde(default)]
    pub extracted_skills: Vec<String>,
    #[serde(default)]
    pub extracted_keywords: Vec<String>,
}
