use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::api::ApiResponse;
use crate::engine::{
    self, EvaluationSummary, MatchAdapter, QuestionAdapter, SeriesAdapter, SingleEvaluation,
    SpecialBetAdapter,
};
use crate::errors::AppError;
use crate::AppState;

// ---------------------------------------------------------------------------
// Full passes
// ---------------------------------------------------------------------------

pub async fn evaluate_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EvaluationSummary>>, AppError> {
    let summary = engine::evaluate_all::<MatchAdapter>(&state.db, id).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

pub async fn evaluate_series(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EvaluationSummary>>, AppError> {
    let summary = engine::evaluate_all::<SeriesAdapter>(&state.db, id).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

pub async fn evaluate_special_bet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EvaluationSummary>>, AppError> {
    let summary = engine::evaluate_all::<SpecialBetAdapter>(&state.db, id).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

pub async fn evaluate_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EvaluationSummary>>, AppError> {
    let summary = engine::evaluate_all::<QuestionAdapter>(&state.db, id).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

// ---------------------------------------------------------------------------
// Single-user re-scores
// ---------------------------------------------------------------------------

pub async fn evaluate_match_user(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<SingleEvaluation>>, AppError> {
    let single = engine::evaluate_one::<MatchAdapter>(&state.db, id, user_id).await?;
    Ok(Json(ApiResponse::ok(single)))
}

pub async fn evaluate_series_user(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<SingleEvaluation>>, AppError> {
    let single = engine::evaluate_one::<SeriesAdapter>(&state.db, id, user_id).await?;
    Ok(Json(ApiResponse::ok(single)))
}

pub async fn evaluate_special_bet_user(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<SingleEvaluation>>, AppError> {
    let single = engine::evaluate_one::<SpecialBetAdapter>(&state.db, id, user_id).await?;
    Ok(Json(ApiResponse::ok(single)))
}

pub async fn evaluate_question_user(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<SingleEvaluation>>, AppError> {
    let single = engine::evaluate_one::<QuestionAdapter>(&state.db, id, user_id).await?;
    Ok(Json(ApiResponse::ok(single)))
}
