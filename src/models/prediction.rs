use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for match_predictions. `total_points` is null until the
/// first evaluation pass; `breakdown` holds the per-rule trace as JSONB.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchPrediction {
    pub id: Uuid,
    pub match_id: Uuid,
    pub user_id: Uuid,
    pub home_score: i32,
    pub away_score: i32,
    pub total_points: Option<i32>,
    pub breakdown: Option<serde_json::Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Database row for series_predictions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SeriesPrediction {
    pub id: Uuid,
    pub series_id: Uuid,
    pub user_id: Uuid,
    pub home_wins: Option<i32>,
    pub away_wins: Option<i32>,
    pub home_advances: Option<bool>,
    pub total_points: Option<i32>,
    pub breakdown: Option<serde_json::Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Database row for special_predictions. A user picks either an entity or
/// "no scorer", never both.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SpecialPrediction {
    pub id: Uuid,
    pub special_bet_id: Uuid,
    pub user_id: Uuid,
    pub entity_id: Option<i64>,
    pub no_scorer: bool,
    pub total_points: Option<i32>,
    pub breakdown: Option<serde_json::Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Database row for question_predictions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionPrediction {
    pub id: Uuid,
    pub question_id: Uuid,
    pub user_id: Uuid,
    pub answer: bool,
    pub total_points: Option<i32>,
    pub breakdown: Option<serde_json::Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
