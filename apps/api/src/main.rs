mod analytics;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod resumes;
mod routes;
mod scoring;
mod state;
mod store;
mod uploads;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use chrono::Duration;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::tokens::TokenIssuer;
use crate::auth::AuthService;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::scoring::engine::ScoringEngine;
use crate::scoring::service::ResumeScoringService;
use crate::state::AppState;
use crate::store::postgres::{PgResumeStore, PgScoreCardStore, PgUserStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting {} v{}", config.app_name, env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;
    let resumes = Arc::new(PgResumeStore::new(db.clone()));
    let score_cards = Arc::new(PgScoreCardStore::new(db.clone()));
    let users = Arc::new(PgUserStore::new(db));

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    let engine = ScoringEngine::new(config.scoring.clone());
    info!("Scoring weights: {:?}", engine.config().weights);

    let tokens = TokenIssuer::new(
        &config.secret_key,
        Duration::minutes(config.access_token_expire_minutes),
        Duration::minutes(config.refresh_token_expire_minutes),
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        s3,
        scoring: ResumeScoringService::new(resumes.clone(), engine),
        auth: AuthService::new(users, tokens),
        resumes,
        score_cards,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the frontend origins once they are configurable

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "ats-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    // MinIO serves buckets path-style, matching the URLs handed out by uploads
    let s3_config = aws_sdk_s3::config::Builder::from(&s3_config)
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
