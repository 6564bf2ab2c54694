use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::analytics::{summary_for_owner, AnalyticsSummary};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct OwnerQuery {
    pub owner_id: Uuid,
}

/// GET /api/v1/analytics/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<AnalyticsSummary>, AppError> {
    let summary = summary_for_owner(
        state.resumes.as_ref(),
        state.score_cards.as_ref(),
        params.owner_id,
    )
    .await?;
    Ok(Json(summary))
}
