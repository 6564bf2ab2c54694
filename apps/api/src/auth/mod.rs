//! Registration, login and token refresh.
//!
//! Passwords are hashed with argon2id; sessions are stateless HS256 JWTs.
//! Refresh tokens carry `kind = refresh` and cannot be used as access tokens.

pub mod handlers;
pub mod password;
pub mod tokens;

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::tokens::{TokenIssuer, TokenKind};
use crate::models::{NewUser, User};
use crate::store::{StoreError, UserStore};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(_) => AuthError::EmailTaken,
            other => AuthError::Store(other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenIssuer) -> Self {
        Self { users, tokens }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: Option<String>,
    ) -> Result<User, AuthError> {
        let email = normalize_email(email);
        if self.users.get_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }
        let user = self
            .users
            .add(NewUser {
                email,
                hashed_password: hash_password(password)?,
                full_name,
            })
            .await?;
        info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Verifies credentials and issues a fresh token pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<(TokenPair, User), AuthError> {
        let user = self
            .users
            .get_by_email(&normalize_email(email))
            .await?
            .filter(|u| u.is_active)
            .ok_or(AuthError::InvalidCredentials)?;
        if !verify_password(password, &user.hashed_password) {
            return Err(AuthError::InvalidCredentials);
        }
        let pair = self.issue_pair(&user.id.to_string())?;
        info!("User {} logged in", user.id);
        Ok((pair, user))
    }

    /// Exchanges a valid refresh token for a new pair.
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.tokens.verify(refresh_token, TokenKind::Refresh)?;
        self.issue_pair(&claims.sub)
    }

    fn issue_pair(&self, subject: &str) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.tokens.issue(subject, TokenKind::Access)?,
            refresh_token: self.tokens.issue(subject, TokenKind::Refresh)?,
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
