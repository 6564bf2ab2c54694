use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Job criteria a resume is scored against. Supplied per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDescription {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub role_title: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub canonical_text: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl JobDescription {
    pub fn new(role_title: impl Into<String>) -> Self {
        Self {
            id: None,
            role_title: role_title.into(),
            company_name: None,
            canonical_text: None,
            required_skills: Vec::new(),
            preferred_skills: Vec::new(),
            created_at: Utc::now(),
        }
    }
}
