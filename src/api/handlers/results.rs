use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::ApiResponse;
use crate::db::event_repo;
use crate::errors::AppError;
use crate::AppState;

// ---------------------------------------------------------------------------
// Record outcomes. Recording always clears is_evaluated — points stay
// visibly unsettled until the next evaluation pass.
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct MatchResultBody {
    pub home_score: i32,
    pub away_score: i32,
}

pub async fn record_match_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<MatchResultBody>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    if body.home_score < 0 || body.away_score < 0 {
        return Err(AppError::BadRequest("scores must be non-negative".into()));
    }

    let found =
        event_repo::record_match_result(&state.db, id, body.home_score, body.away_score).await?;
    if !found {
        return Err(AppError::NotFound(format!("match {id} not found")));
    }

    tracing::info!(
        match_id = %id,
        home_score = body.home_score,
        away_score = body.away_score,
        "Match result recorded"
    );
    Ok(Json(ApiResponse::ok(())))
}

#[derive(Deserialize)]
pub struct SeriesResultBody {
    pub home_wins: Option<i32>,
    pub away_wins: Option<i32>,
    pub home_advances: Option<bool>,
}

pub async fn record_series_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SeriesResultBody>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let has_wins = body.home_wins.is_some() && body.away_wins.is_some();
    if !has_wins && body.home_advances.is_none() {
        return Err(AppError::BadRequest(
            "a series result needs a full wins line or an advancement flag".into(),
        ));
    }
    if body.home_wins.unwrap_or(0) < 0 || body.away_wins.unwrap_or(0) < 0 {
        return Err(AppError::BadRequest("win counts must be non-negative".into()));
    }

    let found = event_repo::record_series_result(
        &state.db,
        id,
        body.home_wins,
        body.away_wins,
        body.home_advances,
    )
    .await?;
    if !found {
        return Err(AppError::NotFound(format!("series {id} not found")));
    }

    tracing::info!(series_id = %id, "Series result recorded");
    Ok(Json(ApiResponse::ok(())))
}

#[derive(Deserialize)]
pub struct SpecialBetResultBody {
    #[serde(default)]
    pub results: Vec<SpecialBetResultEntry>,
    #[serde(default)]
    pub no_scorer: bool,
}

#[derive(Deserialize)]
pub struct SpecialBetResultEntry {
    pub entity_id: i64,
    pub rank: i32,
}

pub async fn record_special_bet_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SpecialBetResultBody>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    if body.results.is_empty() && !body.no_scorer {
        return Err(AppError::BadRequest(
            "a special bet result needs ranked entries or no_scorer".into(),
        ));
    }
    if body.results.iter().any(|r| r.rank < 1) {
        return Err(AppError::BadRequest("ranks are 1-based".into()));
    }

    let results: Vec<(i64, i32)> = body.results.iter().map(|r| (r.entity_id, r.rank)).collect();
    let found =
        event_repo::record_special_bet_result(&state.db, id, &results, body.no_scorer).await?;
    if !found {
        return Err(AppError::NotFound(format!("special bet {id} not found")));
    }

    tracing::info!(special_bet_id = %id, entries = results.len(), "Special bet result recorded");
    Ok(Json(ApiResponse::ok(())))
}

#[derive(Deserialize)]
pub struct QuestionAnswerBody {
    pub answer: bool,
}

pub async fn record_question_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<QuestionAnswerBody>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let found = event_repo::record_question_answer(&state.db, id, body.answer).await?;
    if !found {
        return Err(AppError::NotFound(format!("question {id} not found")));
    }

    tracing::info!(question_id = %id, answer = body.answer, "Question answer recorded");
    Ok(Json(ApiResponse::ok(())))
}
