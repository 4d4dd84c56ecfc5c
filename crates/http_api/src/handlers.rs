use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use app_api::{
    AppContext, BudgetPutRequest, DailyCostRequest, DaysRequest, EmptyRequest,
    MonthlyTotalRequest, RecentSessionsRequest, SessionsAddRequest,
};
use costs_app::Result;

use crate::{errors::HttpError, state::HttpState};

// Store calls are synchronous; keep them off the async workers.
async fn blocking<T, F>(state: HttpState, task: F) -> std::result::Result<T, HttpError>
where
    F: FnOnce(&AppContext) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let context = state.context;
    let result = tokio::task::spawn_blocking(move || task(&context))
        .await
        .map_err(|err| HttpError::internal(err.to_string()))?;
    Ok(result?)
}

pub async fn dashboard(
    State(state): State<HttpState>,
    Json(_): Json<EmptyRequest>,
) -> Response {
    let response = app_api::dashboard(&state.context).await;
    let status = if response.is_failed() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    (status, Json(response)).into_response()
}

pub async fn daily_cost(
    State(state): State<HttpState>,
    Json(req): Json<DailyCostRequest>,
) -> std::result::Result<impl IntoResponse, HttpError> {
    let response = blocking(state, move |ctx| app_api::daily_cost(ctx, req)).await?;
    Ok(Json(response))
}

pub async fn spending_trend(
    State(state): State<HttpState>,
    Json(req): Json<DaysRequest>,
) -> std::result::Result<impl IntoResponse, HttpError> {
    let response = blocking(state, move |ctx| app_api::spending_trend(ctx, req)).await?;
    Ok(Json(response))
}

pub async fn model_breakdown(
    State(state): State<HttpState>,
    Json(req): Json<DaysRequest>,
) -> std::result::Result<impl IntoResponse, HttpError> {
    let response = blocking(state, move |ctx| app_api::model_breakdown(ctx, req)).await?;
    Ok(Json(response))
}

pub async fn recent_sessions(
    State(state): State<HttpState>,
    Json(req): Json<RecentSessionsRequest>,
) -> std::result::Result<impl IntoResponse, HttpError> {
    let response = blocking(state, move |ctx| app_api::recent_sessions(ctx, req)).await?;
    Ok(Json(response))
}

pub async fn monthly_total(
    State(state): State<HttpState>,
    Json(req): Json<MonthlyTotalRequest>,
) -> std::result::Result<impl IntoResponse, HttpError> {
    let response = blocking(state, move |ctx| app_api::monthly_total(ctx, req)).await?;
    Ok(Json(response))
}

pub async fn settings_get(
    State(state): State<HttpState>,
    Json(_): Json<EmptyRequest>,
) -> std::result::Result<impl IntoResponse, HttpError> {
    let response = blocking(state, app_api::settings_get).await?;
    Ok(Json(response))
}

pub async fn budget_put(
    State(state): State<HttpState>,
    Json(req): Json<BudgetPutRequest>,
) -> std::result::Result<impl IntoResponse, HttpError> {
    let response = blocking(state, move |ctx| app_api::budget_put(ctx, req)).await?;
    Ok(Json(response))
}

pub async fn sessions_add(
    State(state): State<HttpState>,
    Json(req): Json<SessionsAddRequest>,
) -> std::result::Result<impl IntoResponse, HttpError> {
    let response = app_api::sessions_add(&state.context, req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn health() -> impl IntoResponse {
    Json(app_api::ok())
}

pub async fn not_found() -> HttpError {
    HttpError::new(
        StatusCode::NOT_FOUND,
        "not found",
        Some("not_found".to_string()),
    )
}
