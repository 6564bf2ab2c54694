//! Axum route handlers for the Auth API.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::TokenPair;
use crate::errors::AppError;
use crate::models::User;
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;
const MAX_NAME_LEN: usize = 255;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserRead {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserRead {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub tokens: TokenPairResponse,
    pub user: UserRead,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserRead>), AppError> {
    validate_registration(&request)?;

    let user = state
        .auth
        .register(&request.email, &request.password, request.full_name)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (pair, user) = state.auth.login(&request.email, &request.password).await?;

    Ok(Json(LoginResponse {
        tokens: pair.into(),
        user: user.into(),
    }))
}

/// POST /api/v1/auth/refresh
pub async fn handle_refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let pair = state.auth.refresh(&request.refresh_token)?;
    Ok(Json(pair.into()))
}

fn validate_registration(request: &RegisterRequest) -> Result<(), AppError> {
    if !is_plausible_email(request.email.trim()) {
        return Err(AppError::Validation(
            "email must be a valid email address".to_string(),
        ));
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if let Some(name) = &request.full_name {
        if name.chars().count() > MAX_NAME_LEN {
            return Err(AppError::Validation(format!(
                "full_name must be at most {MAX_NAME_LEN} characters"
            )));
        }
    }
    Ok(())
}

/// One `@`, non-empty local part, and a dotted domain.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}
