mod errors;
mod handlers;
mod middleware;
mod state;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

pub use errors::HttpError;
pub use state::{HttpState, TOKEN_HEADER};

pub fn router(state: HttpState) -> Router<()> {
    let api = Router::new()
        .route("/dashboard", post(handlers::dashboard))
        .route("/daily_cost", post(handlers::daily_cost))
        .route("/spending_trend", post(handlers::spending_trend))
        .route("/model_breakdown", post(handlers::model_breakdown))
        .route("/recent_sessions", post(handlers::recent_sessions))
        .route("/monthly_total", post(handlers::monthly_total))
        .route("/settings_get", post(handlers::settings_get))
        .route("/budget_put", post(handlers::budget_put))
        .route("/sessions_add", post(handlers::sessions_add))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_local_client,
        ));

    Router::new()
        .nest("/api", api)
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(state)
}
