use std::str::FromStr;

use anyhow::{Context, Result};

use crate::scoring::weights::{ScoringConfig, ScoringWeights};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// HS256 signing secret for access and refresh tokens.
    pub secret_key: String,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_minutes: i64,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
    pub scoring: ScoringConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let defaults = ScoringConfig::default();
        let scoring = ScoringConfig {
            weights: ScoringWeights {
                keyword: parse_or(&lookup, "SCORING_KEYWORD_WEIGHT", defaults.weights.keyword)?,
                formatting: parse_or(
                    &lookup,
                    "SCORING_FORMATTING_WEIGHT",
                    defaults.weights.formatting,
                )?,
                experience: parse_or(
                    &lookup,
                    "SCORING_EXPERIENCE_WEIGHT",
                    defaults.weights.experience,
                )?,
            },
            recommendation_threshold: parse_or(
                &lookup,
                "SCORING_RECOMMENDATION_THRESHOLD",
                defaults.recommendation_threshold,
            )?,
            ..defaults
        };
        scoring.validate().context("Invalid scoring configuration")?;

        Ok(Config {
            app_name: lookup("APP_NAME").unwrap_or_else(|| "ATS Resume Score Checker".to_string()),
            database_url: require("DATABASE_URL")?,
            s3_bucket: require("S3_BUCKET")?,
            s3_endpoint: require("S3_ENDPOINT")?,
            aws_access_key_id: require("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require("AWS_SECRET_ACCESS_KEY")?,
            secret_key: require("SECRET_KEY")?,
            access_token_expire_minutes: parse_or(&lookup, "ACCESS_TOKEN_EXPIRE_MINUTES", 30)?,
            refresh_token_expire_minutes: parse_or(
                &lookup,
                "REFRESH_TOKEN_EXPIRE_MINUTES",
                60 * 24 * 7,
            )?,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            scoring,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
