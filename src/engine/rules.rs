use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Rule registry
// ---------------------------------------------------------------------------

/// Scoring rule families known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    /// Predicted winning side matches the outcome's winning side.
    Winner,
    /// Every scored field matches the outcome exactly.
    Exact,
    /// Score difference (home minus away) matches the outcome's.
    Margin,
    /// Predicted yes/no equals the recorded answer.
    BooleanAnswer,
    /// Predicted entity appears in the outcome's ranked result set.
    Scorer,
}

/// Maps stored rule identifiers to their kind. Identifiers not listed here
/// are skipped with a warning during a pass rather than failing it.
pub const REGISTRY: &[(&str, RuleKind)] = &[
    ("winner", RuleKind::Winner),
    ("exact_score", RuleKind::Exact),
    ("margin", RuleKind::Margin),
    ("boolean_answer", RuleKind::BooleanAnswer),
    ("scorer", RuleKind::Scorer),
];

impl RuleKind {
    pub fn from_id(id: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(name, _)| *name == id)
            .map(|(_, kind)| *kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Winner => "winner",
            RuleKind::Exact => "exact_score",
            RuleKind::Margin => "margin",
            RuleKind::BooleanAnswer => "boolean_answer",
            RuleKind::Scorer => "scorer",
        }
    }
}

// ---------------------------------------------------------------------------
// Rule inputs — the same-shaped records a rule compares
// ---------------------------------------------------------------------------

/// A user's guessed values, normalized across event kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictedValues {
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    /// Explicit advancement pick for series without a full score line.
    pub home_advances: Option<bool>,
    pub answer: Option<bool>,
    pub entity_id: Option<i64>,
    pub no_scorer: Option<bool>,
}

/// The authoritative recorded result, normalized across event kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeValues {
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub home_advances: Option<bool>,
    pub answer: Option<bool>,
    pub ranked_entities: Vec<RankedEntity>,
    pub no_scorer: Option<bool>,
}

/// One entry of a ranked outcome set (e.g. a top scorer and their rank).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntity {
    pub entity_id: i64,
    /// 1-based position in the result set.
    pub rank: u32,
}

/// What a single rule decided for one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Miss,
    Hit,
    /// Hit on a ranked result set; the rank selects the point tier.
    RankedHit { rank: u32 },
    /// Correct "no scorer" call, paid from its own flat tier.
    NoScorerHit,
}

impl Verdict {
    pub fn awarded(&self) -> bool {
        !matches!(self, Verdict::Miss)
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Home,
    Draw,
    Away,
}

fn side_of(home: i32, away: i32) -> Side {
    match home.cmp(&away) {
        std::cmp::Ordering::Greater => Side::Home,
        std::cmp::Ordering::Equal => Side::Draw,
        std::cmp::Ordering::Less => Side::Away,
    }
}

/// Winning side from a score pair when present, else from the explicit
/// advancement flag. `None` when neither is available.
fn winning_side(
    home: Option<i32>,
    away: Option<i32>,
    advances: Option<bool>,
) -> Option<Side> {
    match (home, away) {
        (Some(h), Some(a)) => Some(side_of(h, a)),
        _ => advances.map(|home_wins| if home_wins { Side::Home } else { Side::Away }),
    }
}

/// Evaluate one rule against a prediction/outcome pair.
///
/// Pure and total: missing fields never award and never panic.
pub fn evaluate(kind: RuleKind, prediction: &PredictedValues, outcome: &OutcomeValues) -> Verdict {
    match kind {
        RuleKind::Winner => {
            let predicted = winning_side(
                prediction.home_score,
                prediction.away_score,
                prediction.home_advances,
            );
            let actual = winning_side(outcome.home_score, outcome.away_score, outcome.home_advances);
            match (predicted, actual) {
                (Some(p), Some(a)) if p == a => Verdict::Hit,
                _ => Verdict::Miss,
            }
        }
        RuleKind::Exact => {
            match (
                prediction.home_score,
                prediction.away_score,
                outcome.home_score,
                outcome.away_score,
            ) {
                (Some(ph), Some(pa), Some(oh), Some(oa)) if ph == oh && pa == oa => Verdict::Hit,
                _ => Verdict::Miss,
            }
        }
        RuleKind::Margin => {
            match (
                prediction.home_score,
                prediction.away_score,
                outcome.home_score,
                outcome.away_score,
            ) {
                (Some(ph), Some(pa), Some(oh), Some(oa)) if ph - pa == oh - oa => Verdict::Hit,
                _ => Verdict::Miss,
            }
        }
        RuleKind::BooleanAnswer => match (prediction.answer, outcome.answer) {
            (Some(p), Some(o)) if p == o => Verdict::Hit,
            _ => Verdict::Miss,
        },
        RuleKind::Scorer => {
            if outcome.no_scorer == Some(true) {
                return if prediction.no_scorer == Some(true) {
                    Verdict::NoScorerHit
                } else {
                    Verdict::Miss
                };
            }
            let Some(entity_id) = prediction.entity_id else {
                return Verdict::Miss;
            };
            outcome
                .ranked_entities
                .iter()
                .find(|e| e.entity_id == entity_id)
                .map(|e| Verdict::RankedHit { rank: e.rank })
                .unwrap_or(Verdict::Miss)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
