use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for league_evaluators. `scorer_tiers` is an untyped JSONB
/// blob at this level; it is validated into [`ScorerTiers`] by the
/// evaluator repository before the engine ever sees it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeagueEvaluatorRow {
    pub id: Uuid,
    pub league_id: Uuid,
    pub event_kind: String,
    pub rule_id: String,
    pub points: i32,
    pub scorer_tiers: Option<serde_json::Value>,
    pub position: i32,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Point tiers for scorer-style rules: `by_rank[0]` pays rank 1, and so on.
/// A hit beyond the configured tiers falls back to the entry's flat points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerTiers {
    pub by_rank: Vec<i32>,
    pub no_scorer: i32,
}

/// One active evaluator entry as the engine consumes it: a rule identifier
/// bound to its league-configured point value.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluatorEntry {
    pub id: Uuid,
    pub rule_id: String,
    pub points: i32,
    pub scorer_tiers: Option<ScorerTiers>,
}

/// Per-rule outcome of a scoring pass, recorded whether or not the rule
/// contributed points. Serialized into the prediction's breakdown column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub rule_id: String,
    pub awarded: bool,
    pub points: i32,
}
