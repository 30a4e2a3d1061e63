mod common;

use std::collections::HashMap;

use serde_json::json;
use uuid::Uuid;

use betleague::db::{evaluator_repo, event_repo, prediction_repo};
use betleague::engine::{
    evaluate_all, evaluate_one, EvalError, MatchAdapter, QuestionAdapter, SeriesAdapter,
    SpecialBetAdapter,
};
use betleague::models::EventKind;

#[tokio::test]
async fn test_evaluate_all_awards_match_points() {
    let pool = common::setup_test_db().await;
    let league_id = common::seed_league(&pool, "test_league_match").await;
    common::seed_evaluator(&pool, league_id, "match", "winner", 10, 0).await;
    common::seed_evaluator(&pool, league_id, "match", "exact_score", 20, 1).await;

    let m = common::seed_match(&pool, league_id, "HC Prague", "HC Brno").await;
    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();
    common::seed_match_prediction(&pool, m.id, user_a, 4, 1).await;
    common::seed_match_prediction(&pool, m.id, user_b, 4, 2).await;

    event_repo::record_match_result(&pool, m.id, 4, 2)
        .await
        .expect("DB query should succeed");

    let summary = evaluate_all::<MatchAdapter>(&pool, m.id)
        .await
        .expect("Evaluation should succeed");

    assert_eq!(summary.total_users_evaluated, 2);
    // User A: winner only (10). User B: winner + exact (30).
    assert_eq!(summary.total_points_awarded, 40);
    assert!(summary.skipped_rules.is_empty());

    let points: HashMap<Uuid, Option<i32>> = prediction_repo::get_match_predictions(&pool, m.id)
        .await
        .expect("DB query should succeed")
        .into_iter()
        .map(|p| (p.user_id, p.total_points))
        .collect();

    assert_eq!(points[&user_a], Some(10));
    assert_eq!(points[&user_b], Some(30));

    let m = event_repo::get_match(&pool, m.id)
        .await
        .expect("DB query should succeed")
        .expect("Match should exist");
    assert!(m.is_evaluated);
}

#[tokio::test]
async fn test_evaluate_all_is_idempotent() {
    let pool = common::setup_test_db().await;
    let league_id = common::seed_league(&pool, "test_league_idempotent").await;
    common::seed_evaluator(&pool, league_id, "match", "winner", 10, 0).await;
    common::seed_evaluator(&pool, league_id, "match", "exact_score", 20, 1).await;

    let m = common::seed_match(&pool, league_id, "Alpha", "Beta").await;
    let user = Uuid::new_v4();
    common::seed_match_prediction(&pool, m.id, user, 3, 0).await;

    event_repo::record_match_result(&pool, m.id, 3, 0)
        .await
        .expect("DB query should succeed");

    let first = evaluate_all::<MatchAdapter>(&pool, m.id)
        .await
        .expect("First pass should succeed");
    let second = evaluate_all::<MatchAdapter>(&pool, m.id)
        .await
        .expect("Second pass should succeed");

    assert_eq!(first.total_points_awarded, second.total_points_awarded);

    // Points are overwritten, never accumulated.
    let predictions = prediction_repo::get_match_predictions(&pool, m.id)
        .await
        .expect("DB query should succeed");
    assert_eq!(predictions[0].total_points, Some(30));
}

#[tokio::test]
async fn test_rerun_after_correction_overwrites() {
    let pool = common::setup_test_db().await;
    let league_id = common::seed_league(&pool, "test_league_correction").await;
    common::seed_evaluator(&pool, league_id, "match", "winner", 10, 0).await;

    let m = common::seed_match(&pool, league_id, "Alpha", "Beta").await;
    let user = Uuid::new_v4();
    common::seed_match_prediction(&pool, m.id, user, 2, 1).await;

    event_repo::record_match_result(&pool, m.id, 3, 0)
        .await
        .expect("DB query should succeed");
    evaluate_all::<MatchAdapter>(&pool, m.id)
        .await
        .expect("First pass should succeed");

    let predictions = prediction_repo::get_match_predictions(&pool, m.id)
        .await
        .expect("DB query should succeed");
    assert_eq!(predictions[0].total_points, Some(10));

    // Admin corrects the result: away actually won.
    event_repo::record_match_result(&pool, m.id, 0, 2)
        .await
        .expect("DB query should succeed");

    // Correction clears the evaluated flag until the next pass.
    let corrected = event_repo::get_match(&pool, m.id)
        .await
        .expect("DB query should succeed")
        .expect("Match should exist");
    assert!(!corrected.is_evaluated);

    evaluate_all::<MatchAdapter>(&pool, m.id)
        .await
        .expect("Re-run should succeed");

    let predictions = prediction_repo::get_match_predictions(&pool, m.id)
        .await
        .expect("DB query should succeed");
    assert_eq!(predictions[0].total_points, Some(0));
}

#[tokio::test]
async fn test_outcome_not_recorded_writes_nothing() {
    let pool = common::setup_test_db().await;
    let league_id = common::seed_league(&pool, "test_league_no_outcome").await;
    common::seed_evaluator(&pool, league_id, "match", "winner", 10, 0).await;

    let m = common::seed_match(&pool, league_id, "Alpha", "Beta").await;
    let user = Uuid::new_v4();
    common::seed_match_prediction(&pool, m.id, user, 1, 0).await;

    let err = evaluate_all::<MatchAdapter>(&pool, m.id)
        .await
        .expect_err("Evaluation must fail without an outcome");
    assert!(matches!(err, EvalError::OutcomeNotRecorded { .. }));

    let predictions = prediction_repo::get_match_predictions(&pool, m.id)
        .await
        .expect("DB query should succeed");
    assert_eq!(predictions[0].total_points, None);

    let m = event_repo::get_match(&pool, m.id)
        .await
        .expect("DB query should succeed")
        .expect("Match should exist");
    assert!(!m.is_evaluated);
}

#[tokio::test]
async fn test_no_evaluators_configured_is_a_hard_error() {
    let pool = common::setup_test_db().await;
    let league_id = common::seed_league(&pool, "test_league_unconfigured").await;

    let m = common::seed_match(&pool, league_id, "Alpha", "Beta").await;
    let user = Uuid::new_v4();
    common::seed_match_prediction(&pool, m.id, user, 1, 0).await;
    event_repo::record_match_result(&pool, m.id, 1, 0)
        .await
        .expect("DB query should succeed");

    let err = evaluate_all::<MatchAdapter>(&pool, m.id)
        .await
        .expect_err("Evaluation must fail without evaluators");
    assert!(matches!(err, EvalError::NoEvaluatorsConfigured { .. }));

    // Zero writes: no points, no flag.
    let predictions = prediction_repo::get_match_predictions(&pool, m.id)
        .await
        .expect("DB query should succeed");
    assert_eq!(predictions[0].total_points, None);

    let m = event_repo::get_match(&pool, m.id)
        .await
        .expect("DB query should succeed")
        .expect("Match should exist");
    assert!(!m.is_evaluated);
}

#[tokio::test]
async fn test_event_not_found() {
    let pool = common::setup_test_db().await;

    let err = evaluate_all::<MatchAdapter>(&pool, Uuid::new_v4())
        .await
        .expect_err("Unknown event must fail");
    assert!(matches!(err, EvalError::EventNotFound { .. }));
}

#[tokio::test]
async fn test_evaluate_one_never_flips_the_flag() {
    let pool = common::setup_test_db().await;
    let league_id = common::seed_league(&pool, "test_league_single").await;
    common::seed_evaluator(&pool, league_id, "match", "winner", 10, 0).await;

    let m = common::seed_match(&pool, league_id, "Alpha", "Beta").await;
    let user = Uuid::new_v4();
    common::seed_match_prediction(&pool, m.id, user, 2, 0).await;
    event_repo::record_match_result(&pool, m.id, 5, 1)
        .await
        .expect("DB query should succeed");

    let single = evaluate_one::<MatchAdapter>(&pool, m.id, user)
        .await
        .expect("Single evaluation should succeed");

    assert_eq!(single.points_awarded, 10);
    assert_eq!(single.per_rule.len(), 1);
    assert!(single.per_rule[0].awarded);

    let predictions = prediction_repo::get_match_predictions(&pool, m.id)
        .await
        .expect("DB query should succeed");
    assert_eq!(predictions[0].total_points, Some(10));

    let m = event_repo::get_match(&pool, m.id)
        .await
        .expect("DB query should succeed")
        .expect("Match should exist");
    assert!(!m.is_evaluated, "evaluate_one must not settle the event");
}

#[tokio::test]
async fn test_evaluate_one_prediction_not_found() {
    let pool = common::setup_test_db().await;
    let league_id = common::seed_league(&pool, "test_league_missing_prediction").await;
    common::seed_evaluator(&pool, league_id, "match", "winner", 10, 0).await;

    let m = common::seed_match(&pool, league_id, "Alpha", "Beta").await;
    event_repo::record_match_result(&pool, m.id, 1, 0)
        .await
        .expect("DB query should succeed");

    let err = evaluate_one::<MatchAdapter>(&pool, m.id, Uuid::new_v4())
        .await
        .expect_err("Missing prediction must fail");
    assert!(matches!(err, EvalError::PredictionNotFound { .. }));
}

#[tokio::test]
async fn test_unknown_rule_skipped_but_rest_award() {
    let pool = common::setup_test_db().await;
    let league_id = common::seed_league(&pool, "test_league_unknown_rule").await;
    common::seed_evaluator(&pool, league_id, "match", "golden_goal", 50, 0).await;
    common::seed_evaluator(&pool, league_id, "match", "winner", 10, 1).await;

    let m = common::seed_match(&pool, league_id, "Alpha", "Beta").await;
    let user = Uuid::new_v4();
    common::seed_match_prediction(&pool, m.id, user, 2, 1).await;
    event_repo::record_match_result(&pool, m.id, 3, 0)
        .await
        .expect("DB query should succeed");

    let summary = evaluate_all::<MatchAdapter>(&pool, m.id)
        .await
        .expect("Evaluation should succeed despite the unknown rule");

    assert_eq!(summary.total_points_awarded, 10);
    assert_eq!(summary.skipped_rules, vec!["golden_goal".to_string()]);

    let m = event_repo::get_match(&pool, m.id)
        .await
        .expect("DB query should succeed")
        .expect("Match should exist");
    assert!(m.is_evaluated);
}

#[tokio::test]
async fn test_soft_deleted_evaluators_are_excluded() {
    let pool = common::setup_test_db().await;
    let league_id = common::seed_league(&pool, "test_league_soft_delete").await;
    common::seed_evaluator(&pool, league_id, "match", "winner", 10, 0).await;
    let exact_id = common::seed_evaluator(&pool, league_id, "match", "exact_score", 20, 1).await;
    common::soft_delete_evaluator(&pool, exact_id).await;

    let entries = evaluator_repo::get_league_evaluators(&pool, league_id, EventKind::Match)
        .await
        .expect("DB query should succeed");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].rule_id, "winner");

    let m = common::seed_match(&pool, league_id, "Alpha", "Beta").await;
    let user = Uuid::new_v4();
    common::seed_match_prediction(&pool, m.id, user, 2, 0).await;
    event_repo::record_match_result(&pool, m.id, 2, 0)
        .await
        .expect("DB query should succeed");

    let summary = evaluate_all::<MatchAdapter>(&pool, m.id)
        .await
        .expect("Evaluation should succeed");

    // Exact score matched, but its soft-deleted rule no longer pays.
    assert_eq!(summary.total_points_awarded, 10);
}

#[tokio::test]
async fn test_series_winner_and_exact_examples() {
    let pool = common::setup_test_db().await;
    let league_id = common::seed_league(&pool, "test_league_series").await;
    common::seed_evaluator(&pool, league_id, "series", "winner", 10, 0).await;
    common::seed_evaluator(&pool, league_id, "series", "exact_score", 20, 1).await;

    let s = common::seed_series(&pool, league_id, "Alpha", "Beta").await;
    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();
    common::seed_series_prediction(&pool, s.id, user_a, 4, 1).await;
    common::seed_series_prediction(&pool, s.id, user_b, 4, 2).await;

    event_repo::record_series_result(&pool, s.id, Some(4), Some(2), Some(true))
        .await
        .expect("DB query should succeed");

    let summary = evaluate_all::<SeriesAdapter>(&pool, s.id)
        .await
        .expect("Evaluation should succeed");

    let points: HashMap<Uuid, Option<i32>> = prediction_repo::get_series_predictions(&pool, s.id)
        .await
        .expect("DB query should succeed")
        .into_iter()
        .map(|p| (p.user_id, p.total_points))
        .collect();

    assert_eq!(points[&user_a], Some(10));
    assert_eq!(points[&user_b], Some(30));
    assert_eq!(summary.total_points_awarded, 40);
}

#[tokio::test]
async fn test_question_boolean_answer_examples() {
    let pool = common::setup_test_db().await;
    let league_id = common::seed_league(&pool, "test_league_question").await;
    common::seed_evaluator(&pool, league_id, "question", "boolean_answer", 5, 0).await;

    let q = common::seed_question(&pool, league_id, "Will the champion repeat?").await;
    let user_yes = Uuid::new_v4();
    let user_no = Uuid::new_v4();
    common::seed_question_prediction(&pool, q.id, user_yes, true).await;
    common::seed_question_prediction(&pool, q.id, user_no, false).await;

    event_repo::record_question_answer(&pool, q.id, true)
        .await
        .expect("DB query should succeed");

    let summary = evaluate_all::<QuestionAdapter>(&pool, q.id)
        .await
        .expect("Evaluation should succeed");

    let points: HashMap<Uuid, Option<i32>> =
        prediction_repo::get_question_predictions(&pool, q.id)
            .await
            .expect("DB query should succeed")
            .into_iter()
            .map(|p| (p.user_id, p.total_points))
            .collect();

    assert_eq!(points[&user_yes], Some(5));
    assert_eq!(points[&user_no], Some(0));
    assert_eq!(summary.total_points_awarded, 5);
}

#[tokio::test]
async fn test_special_bet_scorer_tiers() {
    let pool = common::setup_test_db().await;
    let league_id = common::seed_league(&pool, "test_league_special").await;
    common::seed_evaluator_with_tiers(
        &pool,
        league_id,
        "special_bet",
        "scorer",
        5,
        json!({ "by_rank": [25, 15], "no_scorer": 8 }),
    )
    .await;

    let bet = common::seed_special_bet(&pool, league_id, "Tournament top scorer").await;
    let rank1_picker = Uuid::new_v4();
    let rank2_picker = Uuid::new_v4();
    let deep_picker = Uuid::new_v4();
    let misser = Uuid::new_v4();
    common::seed_special_prediction(&pool, bet.id, rank1_picker, Some(7), false).await;
    common::seed_special_prediction(&pool, bet.id, rank2_picker, Some(11), false).await;
    common::seed_special_prediction(&pool, bet.id, deep_picker, Some(23), false).await;
    common::seed_special_prediction(&pool, bet.id, misser, Some(99), false).await;

    event_repo::record_special_bet_result(&pool, bet.id, &[(7, 1), (11, 2), (23, 3)], false)
        .await
        .expect("DB query should succeed");

    evaluate_all::<SpecialBetAdapter>(&pool, bet.id)
        .await
        .expect("Evaluation should succeed");

    let points: HashMap<Uuid, Option<i32>> =
        prediction_repo::get_special_predictions(&pool, bet.id)
            .await
            .expect("DB query should succeed")
            .into_iter()
            .map(|p| (p.user_id, p.total_points))
            .collect();

    assert_eq!(points[&rank1_picker], Some(25));
    assert_eq!(points[&rank2_picker], Some(15));
    // Rank 3 is beyond the configured tiers — flat value applies.
    assert_eq!(points[&deep_picker], Some(5));
    assert_eq!(points[&misser], Some(0));
}

#[tokio::test]
async fn test_special_bet_no_scorer_outcome() {
    let pool = common::setup_test_db().await;
    let league_id = common::seed_league(&pool, "test_league_no_scorer").await;
    common::seed_evaluator_with_tiers(
        &pool,
        league_id,
        "special_bet",
        "scorer",
        5,
        json!({ "by_rank": [25], "no_scorer": 8 }),
    )
    .await;

    let bet = common::seed_special_bet(&pool, league_id, "First own goal scorer").await;
    let called_it = Uuid::new_v4();
    let picked_player = Uuid::new_v4();
    common::seed_special_prediction(&pool, bet.id, called_it, None, true).await;
    common::seed_special_prediction(&pool, bet.id, picked_player, Some(7), false).await;

    event_repo::record_special_bet_result(&pool, bet.id, &[], true)
        .await
        .expect("DB query should succeed");

    evaluate_all::<SpecialBetAdapter>(&pool, bet.id)
        .await
        .expect("Evaluation should succeed");

    let points: HashMap<Uuid, Option<i32>> =
        prediction_repo::get_special_predictions(&pool, bet.id)
            .await
            .expect("DB query should succeed")
            .into_iter()
            .map(|p| (p.user_id, p.total_points))
            .collect();

    assert_eq!(points[&called_it], Some(8));
    assert_eq!(points[&picked_player], Some(0));
}

#[tokio::test]
async fn test_zero_predictions_still_settles() {
    let pool = common::setup_test_db().await;
    let league_id = common::seed_league(&pool, "test_league_zero_predictions").await;
    common::seed_evaluator(&pool, league_id, "match", "winner", 10, 0).await;

    let m = common::seed_match(&pool, league_id, "Alpha", "Beta").await;
    event_repo::record_match_result(&pool, m.id, 1, 0)
        .await
        .expect("DB query should succeed");

    let summary = evaluate_all::<MatchAdapter>(&pool, m.id)
        .await
        .expect("Evaluation should succeed");

    assert_eq!(summary.total_users_evaluated, 0);
    assert_eq!(summary.total_points_awarded, 0);

    let m = event_repo::get_match(&pool, m.id)
        .await
        .expect("DB query should succeed")
        .expect("Match should exist");
    assert!(m.is_evaluated);
}

#[tokio::test]
async fn test_concurrent_evaluate_all_serializes() {
    let pool = common::setup_test_db().await;
    let league_id = common::seed_league(&pool, "test_league_concurrent").await;
    common::seed_evaluator(&pool, league_id, "match", "winner", 10, 0).await;
    common::seed_evaluator(&pool, league_id, "match", "exact_score", 20, 1).await;

    let m = common::seed_match(&pool, league_id, "Alpha", "Beta").await;
    for i in 0..5 {
        common::seed_match_prediction(&pool, m.id, Uuid::new_v4(), 2, i % 3).await;
    }
    event_repo::record_match_result(&pool, m.id, 2, 1)
        .await
        .expect("DB query should succeed");

    let (first, second) = tokio::join!(
        evaluate_all::<MatchAdapter>(&pool, m.id),
        evaluate_all::<MatchAdapter>(&pool, m.id),
    );

    // At least one pass must win; a loser may only fail with a retryable
    // serialization conflict, never with a partial commit.
    assert!(first.is_ok() || second.is_ok());
    for result in [&first, &second] {
        if let Err(e) = result {
            assert!(e.is_retryable(), "unexpected error: {e}");
        }
    }

    // Final state equals a sequential run.
    let predictions = prediction_repo::get_match_predictions(&pool, m.id)
        .await
        .expect("DB query should succeed");
    assert_eq!(predictions.len(), 5);
    for p in &predictions {
        let expected = match p.away_score {
            1 => 30, // exact + winner
            0 => 10, // winner only
            _ => 0,  // predicted a draw
        };
        assert_eq!(p.total_points, Some(expected));
    }

    let m = event_repo::get_match(&pool, m.id)
        .await
        .expect("DB query should succeed")
        .expect("Match should exist");
    assert!(m.is_evaluated);
}
