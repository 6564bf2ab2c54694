pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analytics::handlers as analytics;
use crate::auth::handlers as auth;
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::uploads::handlers as uploads;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Auth API
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/refresh", post(auth::handle_refresh))
        // Resume API
        .route(
            "/api/v1/resumes/upload",
            post(uploads::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/resumes/score", post(resumes::handle_upload_and_score))
        .route("/api/v1/resumes", get(resumes::handle_list_resumes))
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume).delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/score",
            post(resumes::handle_score_existing),
        )
        // Analytics API
        .route("/api/v1/analytics/summary", get(analytics::handle_summary))
        .with_state(state)
}
