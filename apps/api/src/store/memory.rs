use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{NewResume, NewUser, Resume, ScoreCard, User};
use crate::store::{ResumeStore, ScoreCardStore, StoreError, StoreResult, UserStore};

/// Resumes and their score cards share one lock so deletes cascade atomically.
#[derive(Default)]
pub struct InMemoryStore {
    resumes: RwLock<Tables>,
    users: RwLock<HashMap<String, User>>,
}

#[derive(Default)]
struct Tables {
    resumes: Vec<Resume>,
    score_cards: Vec<ScoreCard>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for InMemoryStore {
    async fn add(&self, resume: NewResume) -> StoreResult<Resume> {
        let now = Utc::now();
        let stored = Resume {
            id: Uuid::new_v4(),
            owner_id: resume.owner_id,
            file_url: resume.file_url,
            parsed_text: resume.parsed_text,
            extracted_skills: resume.extracted_skills,
            extracted_keywords: resume.extracted_keywords,
            created_at: now,
            updated_at: now,
        };
        self.resumes.write().await.resumes.push(stored.clone());
        Ok(stored)
    }

    async fn get(&self, resume_id: Uuid) -> StoreResult<Option<Resume>> {
        let tables = self.resumes.read().await;
        Ok(tables.resumes.iter().find(|r| r.id == resume_id).cloned())
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Resume>> {
        let tables = self.resumes.read().await;
        Ok(tables
            .resumes
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, resume_id: Uuid) -> StoreResult<bool> {
        let mut tables = self.resumes.write().await;
        let before = tables.resumes.len();
        tables.resumes.retain(|r| r.id != resume_id);
        let removed = tables.resumes.len() < before;
        if removed {
            tables.score_cards.retain(|c| c.resume_id != resume_id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl ScoreCardStore for InMemoryStore {
    async fn add(&self, card: ScoreCard) -> StoreResult<ScoreCard> {
        self.resumes.write().await.score_cards.push(card.clone());
        Ok(card)
    }

    async fn list_for_resumes(&self, resume_ids: &[Uuid]) -> StoreResult<Vec<ScoreCard>> {
        let tables = self.resumes.read().await;
        Ok(tables
            .score_cards
            .iter()
            .filter(|c| resume_ids.contains(&c.resume_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn add(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(StoreError::Conflict(format!(
                "Email {} already registered",
                user.email
            )));
        }
        let stored = User {
            id: Uuid::new_v4(),
            email: user.email,
            hashed_password: user.hashed_password,
            full_name: user.full_name,
            is_active: true,
            created_at: Utc::now(),
        };
        users.insert(stored.email.clone(), stored.clone());
        Ok(stored)
    }

    async fn get_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_resume(owner_id: Uuid) -> NewResume {
        NewResume {
            owner_id,
            file_url: "https://files.example.com/cv.pdf".to_string(),
            parsed_text: None,
            extracted_skills: vec![],
            extracted_keywords: vec!["rust".to_string()],
        }
    }

    #[tokio::test]
    async fn test_add_assigns_identity() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let a = ResumeStore::add(&store, new_resume(owner)).await.unwrap();
        let b = ResumeStore::add(&store, new_resume(owner)).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.get(a.id).await.unwrap().unwrap().owner_id, owner);
    }

    #[tokio::test]
    async fn test_delete_cascades_score_cards() {
        let store = InMemoryStore::new();
        let resume = ResumeStore::add(&store, new_resume(Uuid::new_v4()))
            .await
            .unwrap();
        let card = crate::scoring::engine::ScoringEngine::default().score(&resume, None);
        ScoreCardStore::add(&store, card).await.unwrap();

        assert!(store.delete(resume.id).await.unwrap());
        assert!(!store.delete(resume.id).await.unwrap());
        assert!(store.list_for_resumes(&[resume.id]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = InMemoryStore::new();
        let user = NewUser {
            email: "ada@example.com".to_string(),
            hashed_password: "hash".to_string(),
            full_name: None,
        };
        UserStore::add(&store, user.clone()).await.unwrap();
        assert!(matches!(
            UserStore::add(&store, user).await,
            Err(StoreError::Conflict(_))
        ));
    }
}
