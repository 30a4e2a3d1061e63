use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::require_auth;
use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public routes — no authentication required
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Admin routes — require Bearer token when API_TOKEN is set
    let admin = Router::new()
        // Matches
        .route("/api/matches/:id/result", post(handlers::results::record_match_result))
        .route("/api/matches/:id/evaluate", post(handlers::evaluation::evaluate_match))
        .route(
            "/api/matches/:id/evaluate/:user_id",
            post(handlers::evaluation::evaluate_match_user),
        )
        // Series
        .route("/api/series/:id/result", post(handlers::results::record_series_result))
        .route("/api/series/:id/evaluate", post(handlers::evaluation::evaluate_series))
        .route(
            "/api/series/:id/evaluate/:user_id",
            post(handlers::evaluation::evaluate_series_user),
        )
        // Special bets
        .route(
            "/api/special-bets/:id/result",
            post(handlers::results::record_special_bet_result),
        )
        .route(
            "/api/special-bets/:id/evaluate",
            post(handlers::evaluation::evaluate_special_bet),
        )
        .route(
            "/api/special-bets/:id/evaluate/:user_id",
            post(handlers::evaluation::evaluate_special_bet_user),
        )
        // Questions
        .route(
            "/api/questions/:id/result",
            post(handlers::results::record_question_answer),
        )
        .route(
            "/api/questions/:id/evaluate",
            post(handlers::evaluation::evaluate_question),
        )
        .route(
            "/api/questions/:id/evaluate/:user_id",
            post(handlers::evaluation::evaluate_question_user),
        )
        // Evaluator configuration
        .route("/api/leagues/:id/evaluators", get(handlers::evaluators::list))
        .layer(middleware::from_fn(require_auth));

    // CORS: admin dashboard is served same-origin; direct API access needs the token
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(admin)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
