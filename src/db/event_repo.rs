use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::{Match, Question, Series, SpecialBet, SpecialBetResult};

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

pub async fn get_match(ex: impl PgExecutor<'_>, id: Uuid) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = $1")
        .bind(id)
        .fetch_optional(ex)
        .await
}

pub async fn get_series(ex: impl PgExecutor<'_>, id: Uuid) -> Result<Option<Series>, sqlx::Error> {
    sqlx::query_as::<_, Series>("SELECT * FROM series WHERE id = $1")
        .bind(id)
        .fetch_optional(ex)
        .await
}

pub async fn get_special_bet(
    ex: impl PgExecutor<'_>,
    id: Uuid,
) -> Result<Option<SpecialBet>, sqlx::Error> {
    sqlx::query_as::<_, SpecialBet>("SELECT * FROM special_bets WHERE id = $1")
        .bind(id)
        .fetch_optional(ex)
        .await
}

/// Ranked outcome set for a special bet, best rank first.
pub async fn get_special_bet_results(
    ex: impl PgExecutor<'_>,
    special_bet_id: Uuid,
) -> Result<Vec<SpecialBetResult>, sqlx::Error> {
    sqlx::query_as::<_, SpecialBetResult>(
        "SELECT * FROM special_bet_results WHERE special_bet_id = $1 ORDER BY rank",
    )
    .bind(special_bet_id)
    .fetch_all(ex)
    .await
}

pub async fn get_question(
    ex: impl PgExecutor<'_>,
    id: Uuid,
) -> Result<Option<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>("SELECT * FROM questions WHERE id = $1")
        .bind(id)
        .fetch_optional(ex)
        .await
}

// ---------------------------------------------------------------------------
// Record results
//
// Recording (or correcting) a result always clears is_evaluated: points
// computed against the old outcome are stale until the next full pass.
// ---------------------------------------------------------------------------

/// Record the final score of a match. Returns false if the match is unknown.
pub async fn record_match_result(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    home_score: i32,
    away_score: i32,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE matches
        SET home_score = $2, away_score = $3, is_evaluated = false, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(home_score)
    .bind(away_score)
    .execute(ex)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Record a series result: a full wins line, an advancement flag, or both.
pub async fn record_series_result(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    home_wins: Option<i32>,
    away_wins: Option<i32>,
    home_advances: Option<bool>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE series
        SET home_wins = $2, away_wins = $3, home_advances = $4,
            is_evaluated = false, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(home_wins)
    .bind(away_wins)
    .bind(home_advances)
    .execute(ex)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Replace a special bet's ranked outcome set. Runs in its own transaction
/// so the old set never coexists with the new one.
pub async fn record_special_bet_result(
    pool: &sqlx::PgPool,
    id: Uuid,
    results: &[(i64, i32)],
    no_scorer: bool,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        r#"
        UPDATE special_bets
        SET no_scorer = $2, is_evaluated = false, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(no_scorer)
    .execute(&mut *tx)
    .await?;

    if updated.rows_affected() == 0 {
        return Ok(false);
    }

    sqlx::query("DELETE FROM special_bet_results WHERE special_bet_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    for (entity_id, rank) in results {
        sqlx::query(
            "INSERT INTO special_bet_results (special_bet_id, entity_id, rank) VALUES ($1, $2, $3)",
        )
        .bind(id)
        .bind(entity_id)
        .bind(rank)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(true)
}

/// Record the answer to a yes/no question.
pub async fn record_question_answer(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    answer: bool,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE questions
        SET answer = $2, is_evaluated = false, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(answer)
    .execute(ex)
    .await?;

    Ok(result.rows_affected() > 0)
}

// ---------------------------------------------------------------------------
// Evaluated flag
// ---------------------------------------------------------------------------

pub async fn set_match_evaluated(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    evaluated: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE matches SET is_evaluated = $2, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(evaluated)
        .execute(ex)
        .await?;
    Ok(())
}

pub async fn set_series_evaluated(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    evaluated: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE series SET is_evaluated = $2, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(evaluated)
        .execute(ex)
        .await?;
    Ok(())
}

pub async fn set_special_bet_evaluated(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    evaluated: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE special_bets SET is_evaluated = $2, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(evaluated)
        .execute(ex)
        .await?;
    Ok(())
}

pub async fn set_question_evaluated(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    evaluated: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE questions SET is_evaluated = $2, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(evaluated)
        .execute(ex)
        .await?;
    Ok(())
}
