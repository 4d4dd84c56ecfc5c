use std::sync::Arc;

use chrono::Datelike;
use costs_core::{DashboardData, Session, SessionInput, Settings, days_before, effective_budget};
use costs_db::DbError;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error};

use crate::config::DashboardDefaults;
use crate::error::{AppError, Result};
use crate::services::{AnalyticsService, SessionsService, SettingsService, SharedClock};

/// Assembles the dashboard view-model from the individual aggregations.
#[derive(Clone)]
pub struct DashboardService {
    analytics: AnalyticsService,
    settings: SettingsService,
    clock: SharedClock,
    defaults: DashboardDefaults,
}

impl DashboardService {
    pub(super) fn new(
        analytics: AnalyticsService,
        settings: SettingsService,
        clock: SharedClock,
        defaults: DashboardDefaults,
    ) -> Self {
        Self {
            analytics,
            settings,
            clock,
            defaults,
        }
    }

    /// Runs every aggregation concurrently. Any single failure fails the load.
    pub async fn load(&self) -> Result<DashboardData> {
        let today = self.clock.today();
        let yesterday = days_before(today, 1)
            .ok_or_else(|| AppError::Message(format!("no day before {today}")))?;
        let defaults = &self.defaults;

        let analytics = self.analytics.clone();
        let today_cost = blocking(move || analytics.daily_cost(Some(today)));
        let analytics = self.analytics.clone();
        let yesterday_cost = blocking(move || analytics.daily_cost(Some(yesterday)));
        let analytics = self.analytics.clone();
        let trend_days = defaults.trend_days;
        let trend = blocking(move || analytics.spending_trend(Some(trend_days)));
        let analytics = self.analytics.clone();
        let breakdown_days = defaults.breakdown_days;
        let breakdown = blocking(move || analytics.model_breakdown(Some(breakdown_days)));
        let analytics = self.analytics.clone();
        let recent_limit = defaults.recent_limit;
        let recent = blocking(move || analytics.recent_sessions(Some(recent_limit)));
        let analytics = self.analytics.clone();
        let (year, month) = (today.year(), today.month());
        let monthly = blocking(move || analytics.monthly_total(Some(year), Some(month)));
        let settings = self.settings.clone();
        let stored = blocking(move || optional_settings(settings.get()));

        let (today_cost, yesterday_cost, trend, breakdown, recent, monthly_total, stored) =
            tokio::try_join!(
                today_cost,
                yesterday_cost,
                trend,
                breakdown,
                recent,
                monthly,
                stored
            )?;

        let budget = effective_budget(stored.as_ref(), defaults.default_budget);
        debug!(%today, monthly_total, budget, "dashboard loaded");
        Ok(DashboardData::from_parts(
            today_cost,
            yesterday_cost,
            trend,
            breakdown,
            recent,
            monthly_total,
            budget,
        ))
    }
}

async fn blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| AppError::Message(format!("dashboard task failed: {}", err)))?
}

// No settings row means "use the default budget"; duplicates are still an error.
fn optional_settings(result: Result<Settings>) -> Result<Option<Settings>> {
    match result {
        Ok(settings) => Ok(Some(settings)),
        Err(AppError::Db(DbError::SettingsMissing)) => Ok(None),
        Err(err) => Err(err),
    }
}

/// What the dashboard page shows: a spinner, the data, or an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DashboardState {
    Loading,
    Ready { data: DashboardData },
    Failed { message: String },
}

impl DashboardState {
    pub fn is_ready(&self) -> bool {
        matches!(self, DashboardState::Ready { .. })
    }

    pub fn data(&self) -> Option<&DashboardData> {
        match self {
            DashboardState::Ready { data } => Some(data),
            _ => None,
        }
    }
}

/// Holds the last loaded dashboard and reloads it after writes. Reloads run
/// one at a time so the stored state is always from the latest load.
#[derive(Clone)]
pub struct Dashboard {
    service: DashboardService,
    sessions: SessionsService,
    state: Arc<RwLock<DashboardState>>,
    reloading: Arc<Mutex<()>>,
}

impl Dashboard {
    pub(super) fn new(service: DashboardService, sessions: SessionsService) -> Self {
        Self {
            service,
            sessions,
            state: Arc::new(RwLock::new(DashboardState::Loading)),
            reloading: Arc::new(Mutex::new(())),
        }
    }

    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Enters `Loading`, runs a full load, then settles on `Ready` or `Failed`.
    pub async fn reload(&self) -> DashboardState {
        let _reloading = self.reloading.lock().await;
        *self.state.write().await = DashboardState::Loading;
        let next = match self.service.load().await {
            Ok(data) => DashboardState::Ready { data },
            Err(err) => {
                error!(error = %err, "failed to load dashboard");
                DashboardState::Failed {
                    message: err.to_string(),
                }
            }
        };
        *self.state.write().await = next.clone();
        next
    }

    /// Stores a session, then reloads. The insert error is returned as-is
    /// and leaves the current state untouched.
    pub async fn add_session(&self, input: SessionInput) -> Result<(Session, DashboardState)> {
        let sessions = self.sessions.clone();
        let session = blocking(move || sessions.add(input)).await?;
        let state = self.reload().await;
        Ok((session, state))
    }
}
