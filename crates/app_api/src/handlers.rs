use chrono::{Datelike, NaiveDate};
use costs_app::{AppError, DashboardState, Result};
use costs_core::{SessionInput, Settings, TrendPoint, parse_date};
use tracing::debug;

use crate::{
    AppContext, BudgetPutRequest, DailyCostRequest, DailyCostResponse, DashboardResponse,
    DashboardView, DaysRequest, ModelShareResponse, MonthlyTotalRequest, MonthlyTotalResponse,
    OkResponse, RecentSessionsRequest, SessionAddedResponse, SessionResponse, SessionsAddRequest,
    SettingsResponse,
};

fn parse_request_date(value: &str) -> Result<NaiveDate> {
    parse_date(value)
        .map_err(|err| AppError::InvalidInput(format!("invalid date {}: {}", value, err)))
}

fn today(ctx: &AppContext) -> NaiveDate {
    ctx.app_state.services.analytics.today()
}

fn dashboard_response(ctx: &AppContext, state: DashboardState) -> DashboardResponse {
    match state {
        DashboardState::Loading => DashboardResponse::Loading,
        DashboardState::Ready { data } => DashboardResponse::Ready {
            data: Box::new(DashboardView::new(data, today(ctx))),
        },
        DashboardState::Failed { message } => DashboardResponse::Failed { message },
    }
}

/// Reloads the dashboard and reports the settled state.
pub async fn dashboard(ctx: &AppContext) -> DashboardResponse {
    let state = ctx.app_state.services.dashboard.reload().await;
    debug!(ready = state.is_ready(), "dashboard requested");
    dashboard_response(ctx, state)
}

pub fn daily_cost(ctx: &AppContext, req: DailyCostRequest) -> Result<DailyCostResponse> {
    let date = match req.date.as_deref() {
        Some(value) => parse_request_date(value)?,
        None => today(ctx),
    };
    let cost = ctx.app_state.services.analytics.daily_cost(Some(date))?;
    Ok(DailyCostResponse { date, cost })
}

pub fn spending_trend(ctx: &AppContext, req: DaysRequest) -> Result<Vec<TrendPoint>> {
    ctx.app_state.services.analytics.spending_trend(req.days)
}

pub fn model_breakdown(ctx: &AppContext, req: DaysRequest) -> Result<Vec<ModelShareResponse>> {
    let shares = ctx.app_state.services.analytics.model_breakdown(req.days)?;
    Ok(shares.into_iter().map(ModelShareResponse::from).collect())
}

pub fn recent_sessions(
    ctx: &AppContext,
    req: RecentSessionsRequest,
) -> Result<Vec<SessionResponse>> {
    let sessions = ctx.app_state.services.analytics.recent_sessions(req.limit)?;
    let today = today(ctx);
    Ok(sessions
        .into_iter()
        .map(|session| SessionResponse::new(session, today))
        .collect())
}

pub fn monthly_total(ctx: &AppContext, req: MonthlyTotalRequest) -> Result<MonthlyTotalResponse> {
    let today = today(ctx);
    let year = req.year.unwrap_or_else(|| today.year());
    let month = req.month.unwrap_or_else(|| today.month());
    let total = ctx
        .app_state
        .services
        .analytics
        .monthly_total(Some(year), Some(month))?;
    Ok(MonthlyTotalResponse { year, month, total })
}

fn settings_response(ctx: &AppContext, settings: Settings) -> SettingsResponse {
    SettingsResponse {
        id: settings.id,
        monthly_budget: settings.monthly_budget,
        created_at: settings.created_at,
        updated_at: settings.updated_at,
        db_path: ctx.app_state.config.db_path.to_string_lossy().to_string(),
        app_data_dir: ctx.app_data_dir.to_string_lossy().to_string(),
    }
}

pub fn settings_get(ctx: &AppContext) -> Result<SettingsResponse> {
    let settings = ctx.app_state.services.settings.get()?;
    Ok(settings_response(ctx, settings))
}

pub fn budget_put(ctx: &AppContext, req: BudgetPutRequest) -> Result<SettingsResponse> {
    let settings = ctx
        .app_state
        .services
        .settings
        .update_budget(req.monthly_budget)?;
    Ok(settings_response(ctx, settings))
}

/// Validates the form, stores the session and returns the refreshed dashboard.
pub async fn sessions_add(
    ctx: &AppContext,
    req: SessionsAddRequest,
) -> Result<SessionAddedResponse> {
    let date = parse_request_date(&req.date)?;
    let model = req.model.trim();
    if model.is_empty() {
        return Err(AppError::InvalidInput("model is required".to_string()));
    }
    let input = SessionInput {
        date,
        model: model.to_string(),
        tokens_in: req.tokens_in,
        tokens_out: req.tokens_out,
        cost_usd: req.cost_usd,
        label: req.label,
        session_id: req.session_id,
    };
    let (session, state) = ctx.app_state.services.dashboard.add_session(input).await?;
    Ok(SessionAddedResponse {
        session: SessionResponse::new(session, today(ctx)),
        dashboard: dashboard_response(ctx, state),
    })
}

pub fn ok() -> OkResponse {
    OkResponse { ok: true }
}
