use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::{MatchPrediction, QuestionPrediction, SeriesPrediction, SpecialPrediction};

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

pub async fn get_match_predictions(
    ex: impl PgExecutor<'_>,
    match_id: Uuid,
) -> Result<Vec<MatchPrediction>, sqlx::Error> {
    sqlx::query_as::<_, MatchPrediction>(
        "SELECT * FROM match_predictions WHERE match_id = $1 ORDER BY user_id",
    )
    .bind(match_id)
    .fetch_all(ex)
    .await
}

pub async fn get_series_predictions(
    ex: impl PgExecutor<'_>,
    series_id: Uuid,
) -> Result<Vec<SeriesPrediction>, sqlx::Error> {
    sqlx::query_as::<_, SeriesPrediction>(
        "SELECT * FROM series_predictions WHERE series_id = $1 ORDER BY user_id",
    )
    .bind(series_id)
    .fetch_all(ex)
    .await
}

pub async fn get_special_predictions(
    ex: impl PgExecutor<'_>,
    special_bet_id: Uuid,
) -> Result<Vec<SpecialPrediction>, sqlx::Error> {
    sqlx::query_as::<_, SpecialPrediction>(
        "SELECT * FROM special_predictions WHERE special_bet_id = $1 ORDER BY user_id",
    )
    .bind(special_bet_id)
    .fetch_all(ex)
    .await
}

pub async fn get_question_predictions(
    ex: impl PgExecutor<'_>,
    question_id: Uuid,
) -> Result<Vec<QuestionPrediction>, sqlx::Error> {
    sqlx::query_as::<_, QuestionPrediction>(
        "SELECT * FROM question_predictions WHERE question_id = $1 ORDER BY user_id",
    )
    .bind(question_id)
    .fetch_all(ex)
    .await
}

// ---------------------------------------------------------------------------
// Write scores
//
// Scores overwrite: a re-run replaces total_points and the breakdown,
// it never accumulates.
// ---------------------------------------------------------------------------

pub async fn write_match_score(
    ex: impl PgExecutor<'_>,
    prediction_id: Uuid,
    total_points: i32,
    breakdown: serde_json::Value,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE match_predictions
        SET total_points = $2, breakdown = $3, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(prediction_id)
    .bind(total_points)
    .bind(breakdown)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn write_series_score(
    ex: impl PgExecutor<'_>,
    prediction_id: Uuid,
    total_points: i32,
    breakdown: serde_json::Value,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE series_predictions
        SET total_points = $2, breakdown = $3, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(prediction_id)
    .bind(total_points)
    .bind(breakdown)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn write_special_score(
    ex: impl PgExecutor<'_>,
    prediction_id: Uuid,
    total_points: i32,
    breakdown: serde_json::Value,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE special_predictions
        SET total_points = $2, breakdown = $3, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(prediction_id)
    .bind(total_points)
    .bind(breakdown)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn write_question_score(
    ex: impl PgExecutor<'_>,
    prediction_id: Uuid,
    total_points: i32,
    breakdown: serde_json::Value,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE question_predictions
        SET total_points = $2, breakdown = $3, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(prediction_id)
    .bind(total_points)
    .bind(breakdown)
    .execute(ex)
    .await?;
    Ok(())
}
