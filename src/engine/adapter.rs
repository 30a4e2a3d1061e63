use std::future::Future;

use sqlx::PgConnection;
use uuid::Uuid;

use crate::db::{event_repo, prediction_repo};
use crate::models::{EventKind, RuleResult};

use super::rules::{OutcomeValues, PredictedValues, RankedEntity};
use super::EvalError;

/// One event's outcome and predictions, read from a single transaction
/// snapshot so a racing edit can never be scored against a stale outcome.
#[derive(Debug, Clone)]
pub struct EventSnapshot {
    pub league_id: Uuid,
    pub is_evaluated: bool,
    pub outcome: OutcomeValues,
    pub predictions: Vec<PredictionSnapshot>,
}

#[derive(Debug, Clone)]
pub struct PredictionSnapshot {
    pub id: Uuid,
    pub user_id: Uuid,
    pub values: PredictedValues,
}

/// What the orchestrator needs from an event kind. One generic orchestrator
/// serves all four kinds through these hooks; each adapter owns its tables
/// and its outcome-recorded precondition.
///
/// Every method takes the orchestrator's transaction connection — adapters
/// must not touch the pool directly.
pub trait EventAdapter: Send + Sync {
    const KIND: EventKind;

    /// Load outcome plus all predictions. Fails with `EventNotFound` or,
    /// when required outcome fields are still null, `OutcomeNotRecorded`.
    fn load_snapshot(
        conn: &mut PgConnection,
        event_id: Uuid,
    ) -> impl Future<Output = Result<EventSnapshot, EvalError>> + Send;

    /// Overwrite one prediction's total and per-rule breakdown.
    fn write_score(
        conn: &mut PgConnection,
        prediction_id: Uuid,
        total_points: i32,
        per_rule: &[RuleResult],
    ) -> impl Future<Output = Result<(), EvalError>> + Send;

    fn set_evaluated(
        conn: &mut PgConnection,
        event_id: Uuid,
        evaluated: bool,
    ) -> impl Future<Output = Result<(), EvalError>> + Send;
}

fn breakdown_json(per_rule: &[RuleResult]) -> serde_json::Value {
    serde_json::to_value(per_rule).unwrap_or(serde_json::Value::Null)
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

pub struct MatchAdapter;

impl EventAdapter for MatchAdapter {
    const KIND: EventKind = EventKind::Match;

    async fn load_snapshot(
        conn: &mut PgConnection,
        event_id: Uuid,
    ) -> Result<EventSnapshot, EvalError> {
        let m = event_repo::get_match(&mut *conn, event_id)
            .await?
            .ok_or(EvalError::EventNotFound {
                kind: Self::KIND,
                event_id,
            })?;

        let (Some(home), Some(away)) = (m.home_score, m.away_score) else {
            return Err(EvalError::OutcomeNotRecorded {
                kind: Self::KIND,
                event_id,
            });
        };

        let outcome = OutcomeValues {
            home_score: Some(home),
            away_score: Some(away),
            ..Default::default()
        };

        let predictions = prediction_repo::get_match_predictions(&mut *conn, event_id)
            .await?
            .into_iter()
            .map(|p| PredictionSnapshot {
                id: p.id,
                user_id: p.user_id,
                values: PredictedValues {
                    home_score: Some(p.home_score),
                    away_score: Some(p.away_score),
                    ..Default::default()
                },
            })
            .collect();

        Ok(EventSnapshot {
            league_id: m.league_id,
            is_evaluated: m.is_evaluated,
            outcome,
            predictions,
        })
    }

    async fn write_score(
        conn: &mut PgConnection,
        prediction_id: Uuid,
        total_points: i32,
        per_rule: &[RuleResult],
    ) -> Result<(), EvalError> {
        prediction_repo::write_match_score(conn, prediction_id, total_points, breakdown_json(per_rule))
            .await
            .map_err(Into::into)
    }

    async fn set_evaluated(
        conn: &mut PgConnection,
        event_id: Uuid,
        evaluated: bool,
    ) -> Result<(), EvalError> {
        event_repo::set_match_evaluated(conn, event_id, evaluated)
            .await
            .map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

pub struct SeriesAdapter;

impl EventAdapter for SeriesAdapter {
    const KIND: EventKind = EventKind::Series;

    async fn load_snapshot(
        conn: &mut PgConnection,
        event_id: Uuid,
    ) -> Result<EventSnapshot, EvalError> {
        let s = event_repo::get_series(&mut *conn, event_id)
            .await?
            .ok_or(EvalError::EventNotFound {
                kind: Self::KIND,
                event_id,
            })?;

        // A series outcome needs a full wins line or the advancement flag.
        let has_wins = s.home_wins.is_some() && s.away_wins.is_some();
        if !has_wins && s.home_advances.is_none() {
            return Err(EvalError::OutcomeNotRecorded {
                kind: Self::KIND,
                event_id,
            });
        }

        let outcome = OutcomeValues {
            home_score: s.home_wins,
            away_score: s.away_wins,
            home_advances: s.home_advances,
            ..Default::default()
        };

        let predictions = prediction_repo::get_series_predictions(&mut *conn, event_id)
            .await?
            .into_iter()
            .map(|p| PredictionSnapshot {
                id: p.id,
                user_id: p.user_id,
                values: PredictedValues {
                    home_score: p.home_wins,
                    away_score: p.away_wins,
                    home_advances: p.home_advances,
                    ..Default::default()
                },
            })
            .collect();

        Ok(EventSnapshot {
            league_id: s.league_id,
            is_evaluated: s.is_evaluated,
            outcome,
            predictions,
        })
    }

    async fn write_score(
        conn: &mut PgConnection,
        prediction_id: Uuid,
        total_points: i32,
        per_rule: &[RuleResult],
    ) -> Result<(), EvalError> {
        prediction_repo::write_series_score(conn, prediction_id, total_points, breakdown_json(per_rule))
            .await
            .map_err(Into::into)
    }

    async fn set_evaluated(
        conn: &mut PgConnection,
        event_id: Uuid,
        evaluated: bool,
    ) -> Result<(), EvalError> {
        event_repo::set_series_evaluated(conn, event_id, evaluated)
            .await
            .map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Special bet
// ---------------------------------------------------------------------------

pub struct SpecialBetAdapter;

impl EventAdapter for SpecialBetAdapter {
    const KIND: EventKind = EventKind::SpecialBet;

    async fn load_snapshot(
        conn: &mut PgConnection,
        event_id: Uuid,
    ) -> Result<EventSnapshot, EvalError> {
        let bet = event_repo::get_special_bet(&mut *conn, event_id)
            .await?
            .ok_or(EvalError::EventNotFound {
                kind: Self::KIND,
                event_id,
            })?;

        let results = event_repo::get_special_bet_results(&mut *conn, event_id).await?;

        // Recorded means either an explicit "no scorer" or a non-empty set.
        if bet.no_scorer != Some(true) && results.is_empty() {
            return Err(EvalError::OutcomeNotRecorded {
                kind: Self::KIND,
                event_id,
            });
        }

        let outcome = OutcomeValues {
            ranked_entities: results
                .into_iter()
                .map(|r| RankedEntity {
                    entity_id: r.entity_id,
                    rank: r.rank.max(0) as u32,
                })
                .collect(),
            no_scorer: bet.no_scorer,
            ..Default::default()
        };

        let predictions = prediction_repo::get_special_predictions(&mut *conn, event_id)
            .await?
            .into_iter()
            .map(|p| PredictionSnapshot {
                id: p.id,
                user_id: p.user_id,
                values: PredictedValues {
                    entity_id: p.entity_id,
                    no_scorer: Some(p.no_scorer),
                    ..Default::default()
                },
            })
            .collect();

        Ok(EventSnapshot {
            league_id: bet.league_id,
            is_evaluated: bet.is_evaluated,
            outcome,
            predictions,
        })
    }

    async fn write_score(
        conn: &mut PgConnection,
        prediction_id: Uuid,
        total_points: i32,
        per_rule: &[RuleResult],
    ) -> Result<(), EvalError> {
        prediction_repo::write_special_score(conn, prediction_id, total_points, breakdown_json(per_rule))
            .await
            .map_err(Into::into)
    }

    async fn set_evaluated(
        conn: &mut PgConnection,
        event_id: Uuid,
        evaluated: bool,
    ) -> Result<(), EvalError> {
        event_repo::set_special_bet_evaluated(conn, event_id, evaluated)
            .await
            .map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Question
// ---------------------------------------------------------------------------

pub struct QuestionAdapter;

impl EventAdapter for QuestionAdapter {
    const KIND: EventKind = EventKind::Question;

    async fn load_snapshot(
        conn: &mut PgConnection,
        event_id: Uuid,
    ) -> Result<EventSnapshot, EvalError> {
        let q = event_repo::get_question(&mut *conn, event_id)
            .await?
            .ok_or(EvalError::EventNotFound {
                kind: Self::KIND,
                event_id,
            })?;

        let Some(answer) = q.answer else {
            return Err(EvalError::OutcomeNotRecorded {
                kind: Self::KIND,
                event_id,
            });
        };

        let outcome = OutcomeValues {
            answer: Some(answer),
            ..Default::default()
        };

        let predictions = prediction_repo::get_question_predictions(&mut *conn, event_id)
            .await?
            .into_iter()
            .map(|p| PredictionSnapshot {
                id: p.id,
                user_id: p.user_id,
                values: PredictedValues {
                    answer: Some(p.answer),
                    ..Default::default()
                },
            })
            .collect();

        Ok(EventSnapshot {
            league_id: q.league_id,
            is_evaluated: q.is_evaluated,
            outcome,
            predictions,
        })
    }

    async fn write_score(
        conn: &mut PgConnection,
        prediction_id: Uuid,
        total_points: i32,
        per_rule: &[RuleResult],
    ) -> Result<(), EvalError> {
        prediction_repo::write_question_score(conn, prediction_id, total_points, breakdown_json(per_rule))
            .await
            .map_err(Into::into)
    }

    async fn set_evaluated(
        conn: &mut PgConnection,
        event_id: Uuid,
        evaluated: bool,
    ) -> Result<(), EvalError> {
        event_repo::set_question_evaluated(conn, event_id, evaluated)
            .await
            .map_err(Into::into)
    }
}
