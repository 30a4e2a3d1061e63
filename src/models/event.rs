use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the matches table. Outcome fields stay null until an
/// admin records the final score.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Match {
    pub id: Uuid,
    pub league_id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub starts_at: DateTime<Utc>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub is_evaluated: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Database row for the series table (multi-game series / playoff rounds).
/// The outcome is either a full wins line or just the advancement flag.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Series {
    pub id: Uuid,
    pub league_id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub best_of: i32,
    pub home_wins: Option<i32>,
    pub away_wins: Option<i32>,
    pub home_advances: Option<bool>,
    pub is_evaluated: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Database row for the special_bets table (one-off bets like "tournament
/// top scorer"). The ranked result set lives in special_bet_results.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SpecialBet {
    pub id: Uuid,
    pub league_id: Uuid,
    pub title: String,
    pub no_scorer: Option<bool>,
    pub is_evaluated: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One entry of a special bet's ranked outcome set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SpecialBetResult {
    pub id: Uuid,
    pub special_bet_id: Uuid,
    pub entity_id: i64,
    pub rank: i32,
}

/// Database row for the questions table (yes/no questions).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: Uuid,
    pub league_id: Uuid,
    pub question: String,
    pub answer: Option<bool>,
    pub is_evaluated: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
