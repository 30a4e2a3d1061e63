use crate::models::{EvaluatorEntry, RuleResult};

use super::rules::{self, OutcomeValues, PredictedValues, RuleKind, Verdict};

/// Outcome of scoring one prediction against one outcome.
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub total_points: i32,
    pub per_rule: Vec<RuleResult>,
    /// Rule identifiers skipped because the registry does not know them.
    pub skipped_rules: Vec<String>,
}

/// Run every configured rule against a prediction/outcome pair and sum the
/// awarded points.
///
/// Entries are evaluated in their stored order; all awarding rules stack.
/// Every known rule's result is recorded for traceability whether or not it
/// contributed points. Unknown identifiers are skipped, never fatal.
pub fn score(
    prediction: &PredictedValues,
    outcome: &OutcomeValues,
    entries: &[EvaluatorEntry],
) -> ScoreBreakdown {
    let mut total_points = 0i32;
    let mut per_rule = Vec::with_capacity(entries.len());
    let mut skipped_rules = Vec::new();

    for entry in entries {
        let Some(kind) = RuleKind::from_id(&entry.rule_id) else {
            tracing::warn!(rule_id = %entry.rule_id, "Unknown evaluator rule — skipping");
            skipped_rules.push(entry.rule_id.clone());
            continue;
        };

        let verdict = rules::evaluate(kind, prediction, outcome);
        // Floor at zero: no rule may deduct points.
        let points = points_for(&verdict, entry).max(0);

        per_rule.push(RuleResult {
            rule_id: entry.rule_id.clone(),
            awarded: verdict.awarded(),
            points,
        });
        total_points += points;
    }

    ScoreBreakdown {
        total_points,
        per_rule,
        skipped_rules,
    }
}

fn points_for(verdict: &Verdict, entry: &EvaluatorEntry) -> i32 {
    match verdict {
        Verdict::Miss => 0,
        Verdict::Hit => entry.points,
        Verdict::RankedHit { rank } => entry
            .scorer_tiers
            .as_ref()
            .and_then(|tiers| tiers.by_rank.get(rank.saturating_sub(1) as usize))
            .copied()
            // A hit beyond the configured tiers still pays the flat value.
            .unwrap_or(entry.points),
        Verdict::NoScorerHit => entry
            .scorer_tiers
            .as_ref()
            .map(|tiers| tiers.no_scorer)
            .unwrap_or(entry.points),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
