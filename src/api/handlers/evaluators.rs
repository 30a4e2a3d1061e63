use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::ApiResponse;
use crate::db::evaluator_repo;
use crate::errors::AppError;
use crate::models::{EvaluatorEntry, EventKind};
use crate::AppState;

#[derive(Deserialize)]
pub struct EvaluatorQuery {
    pub kind: String,
}

/// Active evaluator configuration for a league and event kind.
pub async fn list(
    State(state): State<AppState>,
    Path(league_id): Path<Uuid>,
    Query(query): Query<EvaluatorQuery>,
) -> Result<Json<ApiResponse<Vec<EvaluatorEntry>>>, AppError> {
    let kind = EventKind::from_api_str(&query.kind)
        .ok_or_else(|| AppError::BadRequest(format!("unknown event kind: {}", query.kind)))?;

    let entries = evaluator_repo::get_league_evaluators(&state.db, league_id, kind).await?;
    Ok(Json(ApiResponse::ok(entries)))
}
