pub mod adapter;
pub mod orchestrator;
pub mod rules;
pub mod scoring;

pub use adapter::{
    EventAdapter, EventSnapshot, MatchAdapter, PredictionSnapshot, QuestionAdapter,
    SeriesAdapter, SpecialBetAdapter,
};
pub use orchestrator::{evaluate_all, evaluate_one};

use serde::Serialize;
use uuid::Uuid;

use crate::models::{EventKind, RuleResult};

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Everything that can abort an evaluation pass. Any of these rolls the
/// whole transaction back — nothing is left partially scored.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("{kind} {event_id} not found")]
    EventNotFound { kind: EventKind, event_id: Uuid },

    #[error("{kind} {event_id} has no recorded outcome")]
    OutcomeNotRecorded { kind: EventKind, event_id: Uuid },

    #[error("league {league_id} has no active evaluators for kind {kind}")]
    NoEvaluatorsConfigured { league_id: Uuid, kind: EventKind },

    #[error("user {user_id} has no prediction on {kind} {event_id}")]
    PredictionNotFound {
        kind: EventKind,
        event_id: Uuid,
        user_id: Uuid,
    },

    #[error("evaluation transaction could not serialize")]
    TransactionConflict(#[source] sqlx::Error),

    #[error("persistence failure during evaluation")]
    Persistence(#[source] sqlx::Error),
}

impl EvalError {
    /// Conflicts are safe to retry from scratch; the pass left no writes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EvalError::TransactionConflict(_))
    }
}

/// Postgres signals serialization failures (40001) and deadlocks (40P01)
/// through SQLSTATE; both mean the pass lost a race and may be retried.
impl From<sqlx::Error> for EvalError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if matches!(db_err.code().as_deref(), Some("40001") | Some("40P01")) {
                return EvalError::TransactionConflict(e);
            }
        }
        EvalError::Persistence(e)
    }
}

// ---------------------------------------------------------------------------
// Caller-facing results
// ---------------------------------------------------------------------------

/// Result of a full evaluation pass over every prediction on an event.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSummary {
    pub event_id: Uuid,
    pub total_users_evaluated: i64,
    pub total_points_awarded: i64,
    /// Rule identifiers the registry did not recognize, deduplicated.
    pub skipped_rules: Vec<String>,
}

/// Result of re-scoring a single user's prediction.
#[derive(Debug, Clone, Serialize)]
pub struct SingleEvaluation {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub points_awarded: i32,
    pub per_rule: Vec<RuleResult>,
}
