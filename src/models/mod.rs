pub mod evaluator;
pub mod event;
pub mod prediction;

pub use evaluator::{EvaluatorEntry, LeagueEvaluatorRow, RuleResult, ScorerTiers};
pub use event::{Match, Question, Series, SpecialBet, SpecialBetResult};
pub use prediction::{
    MatchPrediction, QuestionPrediction, SeriesPrediction, SpecialPrediction,
};

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// The four kinds of evaluable events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Match,
    Series,
    SpecialBet,
    Question,
}

impl EventKind {
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s {
            "match" => Some(EventKind::Match),
            "series" => Some(EventKind::Series),
            "special_bet" => Some(EventKind::SpecialBet),
            "question" => Some(EventKind::Question),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Match => "match",
            EventKind::Series => "series",
            EventKind::SpecialBet => "special_bet",
            EventKind::Question => "question",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
