use std::time::Instant;

use metrics::{counter, histogram};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{self, evaluator_repo};

use super::scoring;
use super::{EvalError, EvaluationSummary, EventAdapter, SingleEvaluation};

/// Evaluate every prediction on an event and mark it evaluated.
///
/// The whole pass — snapshot read, every score write, the evaluated-flag
/// update — runs in one serializable transaction: it commits completely or
/// not at all. Re-running recomputes and overwrites, so the operation is
/// idempotent and an outcome correction just needs another pass.
pub async fn evaluate_all<A: EventAdapter>(
    pool: &PgPool,
    event_id: Uuid,
) -> Result<EvaluationSummary, EvalError> {
    let started = Instant::now();
    let result = run_full_pass::<A>(pool, event_id).await;

    match &result {
        Ok(summary) => {
            counter!("evaluation_passes_total").increment(1);
            counter!("predictions_evaluated_total")
                .increment(summary.total_users_evaluated as u64);
            counter!("points_awarded_total").increment(summary.total_points_awarded as u64);
            histogram!("evaluation_duration_seconds").record(started.elapsed().as_secs_f64());

            tracing::info!(
                kind = %A::KIND,
                event_id = %event_id,
                users = summary.total_users_evaluated,
                points = summary.total_points_awarded,
                "Evaluation pass committed"
            );
        }
        Err(e) => {
            if e.is_retryable() {
                counter!("evaluation_conflicts_total").increment(1);
            }
            tracing::warn!(
                kind = %A::KIND,
                event_id = %event_id,
                error = %e,
                "Evaluation pass aborted — rolled back"
            );
        }
    }

    result
}

async fn run_full_pass<A: EventAdapter>(
    pool: &PgPool,
    event_id: Uuid,
) -> Result<EvaluationSummary, EvalError> {
    let mut tx = db::begin_serializable(pool).await?;

    let snapshot = A::load_snapshot(&mut *tx, event_id).await?;
    let entries =
        evaluator_repo::get_league_evaluators(&mut *tx, snapshot.league_id, A::KIND).await?;
    if entries.is_empty() {
        return Err(EvalError::NoEvaluatorsConfigured {
            league_id: snapshot.league_id,
            kind: A::KIND,
        });
    }

    let mut total_points_awarded = 0i64;
    let mut skipped_rules: Vec<String> = Vec::new();

    for prediction in &snapshot.predictions {
        let breakdown = scoring::score(&prediction.values, &snapshot.outcome, &entries);

        A::write_score(
            &mut *tx,
            prediction.id,
            breakdown.total_points,
            &breakdown.per_rule,
        )
        .await?;

        total_points_awarded += breakdown.total_points as i64;
        for rule_id in breakdown.skipped_rules {
            if !skipped_rules.contains(&rule_id) {
                skipped_rules.push(rule_id);
            }
        }
    }

    A::set_evaluated(&mut *tx, event_id, true).await?;
    tx.commit().await?;

    Ok(EvaluationSummary {
        event_id,
        total_users_evaluated: snapshot.predictions.len() as i64,
        total_points_awarded,
        skipped_rules,
    })
}

/// Re-score a single user's prediction on an event.
///
/// Uses the same consistent snapshot and scoring pass as the full run, but
/// never touches the event's evaluated flag: one corrected bet does not
/// mean the whole event is settled.
pub async fn evaluate_one<A: EventAdapter>(
    pool: &PgPool,
    event_id: Uuid,
    user_id: Uuid,
) -> Result<SingleEvaluation, EvalError> {
    let result = run_single_pass::<A>(pool, event_id, user_id).await;

    match &result {
        Ok(single) => {
            counter!("single_evaluations_total").increment(1);
            tracing::info!(
                kind = %A::KIND,
                event_id = %event_id,
                user_id = %user_id,
                points = single.points_awarded,
                "Single prediction re-scored"
            );
        }
        Err(e) => {
            if e.is_retryable() {
                counter!("evaluation_conflicts_total").increment(1);
            }
            tracing::warn!(
                kind = %A::KIND,
                event_id = %event_id,
                user_id = %user_id,
                error = %e,
                "Single evaluation aborted — rolled back"
            );
        }
    }

    result
}

async fn run_single_pass<A: EventAdapter>(
    pool: &PgPool,
    event_id: Uuid,
    user_id: Uuid,
) -> Result<SingleEvaluation, EvalError> {
    let mut tx = db::begin_serializable(pool).await?;

    let snapshot = A::load_snapshot(&mut *tx, event_id).await?;
    let entries =
        evaluator_repo::get_league_evaluators(&mut *tx, snapshot.league_id, A::KIND).await?;
    if entries.is_empty() {
        return Err(EvalError::NoEvaluatorsConfigured {
            league_id: snapshot.league_id,
            kind: A::KIND,
        });
    }

    let prediction = snapshot
        .predictions
        .iter()
        .find(|p| p.user_id == user_id)
        .ok_or(EvalError::PredictionNotFound {
            kind: A::KIND,
            event_id,
            user_id,
        })?;

    let breakdown = scoring::score(&prediction.values, &snapshot.outcome, &entries);

    A::write_score(
        &mut *tx,
        prediction.id,
        breakdown.total_points,
        &breakdown.per_rule,
    )
    .await?;

    tx.commit().await?;

    Ok(SingleEvaluation {
        event_id,
        user_id,
        points_awarded: breakdown.total_points,
        per_rule: breakdown.per_rule,
    })
}
