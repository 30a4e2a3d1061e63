use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::{EvaluatorEntry, EventKind, LeagueEvaluatorRow, ScorerTiers};

/// Active evaluator entries for a league and event kind, in stored order.
/// Soft-deleted entries are excluded.
///
/// The scorer_tiers JSONB blob is validated into a typed [`ScorerTiers`]
/// here, at the configuration boundary — the scoring pass never sees raw
/// JSON. A malformed blob drops the tiers (flat points still apply) and is
/// logged, matching how unknown rule ids degrade.
pub async fn get_league_evaluators(
    ex: impl PgExecutor<'_>,
    league_id: Uuid,
    kind: EventKind,
) -> Result<Vec<EvaluatorEntry>, sqlx::Error> {
    let rows = sqlx::query_as::<_, LeagueEvaluatorRow>(
        r#"
        SELECT * FROM league_evaluators
        WHERE league_id = $1 AND event_kind = $2 AND deleted_at IS NULL
        ORDER BY position, created_at
        "#,
    )
    .bind(league_id)
    .bind(kind.as_str())
    .fetch_all(ex)
    .await?;

    Ok(rows.into_iter().map(entry_from_row).collect())
}

fn entry_from_row(row: LeagueEvaluatorRow) -> EvaluatorEntry {
    let scorer_tiers = row.scorer_tiers.and_then(|value| {
        match serde_json::from_value::<ScorerTiers>(value) {
            Ok(tiers) => Some(tiers),
            Err(e) => {
                tracing::warn!(
                    evaluator_id = %row.id,
                    rule_id = %row.rule_id,
                    error = %e,
                    "Malformed scorer_tiers config — falling back to flat points"
                );
                None
            }
        }
    });

    EvaluatorEntry {
        id: row.id,
        rule_id: row.rule_id,
        points: row.points,
        scorer_tiers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(scorer_tiers: Option<serde_json::Value>) -> LeagueEvaluatorRow {
        LeagueEvaluatorRow {
            id: Uuid::new_v4(),
            league_id: Uuid::new_v4(),
            event_kind: "special_bet".into(),
            rule_id: "scorer".into(),
            points: 5,
            scorer_tiers,
            position: 0,
            deleted_at: None,
            created_at: None,
        }
    }

    #[test]
    fn test_valid_tiers_parse() {
        let entry = entry_from_row(row(Some(json!({
            "by_rank": [25, 15, 10],
            "no_scorer": 8
        }))));

        let tiers = entry.scorer_tiers.expect("tiers should parse");
        assert_eq!(tiers.by_rank, vec![25, 15, 10]);
        assert_eq!(tiers.no_scorer, 8);
    }

    #[test]
    fn test_malformed_tiers_fall_back_to_flat_points() {
        let entry = entry_from_row(row(Some(json!({ "ranks": "not-a-tier-list" }))));
        assert!(entry.scorer_tiers.is_none());
        assert_eq!(entry.points, 5);
    }

    #[test]
    fn test_absent_tiers_stay_absent() {
        let entry = entry_from_row(row(None));
        assert!(entry.scorer_tiers.is_none());
    }
}
