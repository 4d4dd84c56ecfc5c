use chrono::{Datelike, NaiveDate};
use costs_core::{
    ModelShare, Session, TrendPoint, days_before, fill_daily_trend, model_shares, month_bounds,
    sum_costs, trend_start,
};
use costs_db::{SessionFilter, SessionOrder};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::services::{SharedClock, SharedStore, require_positive};

pub const DEFAULT_TREND_DAYS: u32 = 7;
pub const DEFAULT_BREAKDOWN_DAYS: u32 = 30;
pub const DEFAULT_RECENT_LIMIT: u32 = 20;

/// Read-only aggregations over the session log.
#[derive(Clone)]
pub struct AnalyticsService {
    store: SharedStore,
    clock: SharedClock,
}

impl AnalyticsService {
    pub(super) fn new(store: SharedStore, clock: SharedClock) -> Self {
        Self { store, clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Total cost of sessions attributed to `date` (default: today).
    pub fn daily_cost(&self, date: Option<NaiveDate>) -> Result<f64> {
        let date = date.unwrap_or_else(|| self.clock.today());
        let sessions = self.store.select_sessions(&SessionFilter::all().on(date))?;
        debug!(%date, rows = sessions.len(), "daily cost");
        Ok(sum_costs(&sessions))
    }

    /// One entry per day for the `days` days ending today, zero-filled.
    pub fn spending_trend(&self, days: Option<u32>) -> Result<Vec<TrendPoint>> {
        let days = require_positive(days.unwrap_or(DEFAULT_TREND_DAYS), "days")?;
        let today = self.clock.today();
        let start = trend_start(today, days).ok_or_else(|| out_of_range(days))?;
        let sessions = self.store.select_sessions(
            &SessionFilter::all()
                .since(start)
                .through(today)
                .ordered(SessionOrder::DateAsc),
        )?;
        debug!(%start, %today, rows = sessions.len(), "spending trend");
        Ok(fill_daily_trend(start, days, &sessions))
    }

    /// Cost per model since `days` days ago, with no upper date bound.
    pub fn model_breakdown(&self, days: Option<u32>) -> Result<Vec<ModelShare>> {
        let days = require_positive(days.unwrap_or(DEFAULT_BREAKDOWN_DAYS), "days")?;
        let cutoff = days_before(self.clock.today(), days).ok_or_else(|| out_of_range(days))?;
        let sessions = self
            .store
            .select_sessions(&SessionFilter::all().since(cutoff))?;
        debug!(%cutoff, rows = sessions.len(), "model breakdown");
        Ok(model_shares(&sessions))
    }

    pub fn recent_sessions(&self, limit: Option<u32>) -> Result<Vec<Session>> {
        let limit = require_positive(limit.unwrap_or(DEFAULT_RECENT_LIMIT), "limit")?;
        let sessions = self.store.select_sessions(
            &SessionFilter::all()
                .ordered(SessionOrder::CreatedAtDesc)
                .limited(limit),
        )?;
        Ok(sessions)
    }

    /// Total cost for a calendar month (default: the current one).
    pub fn monthly_total(&self, year: Option<i32>, month: Option<u32>) -> Result<f64> {
        let today = self.clock.today();
        let year = year.unwrap_or_else(|| today.year());
        let month = month.unwrap_or_else(|| today.month());
        let (start, end) = month_bounds(year, month)
            .ok_or_else(|| AppError::InvalidInput(format!("invalid month {year}-{month}")))?;
        let sessions = self
            .store
            .select_sessions(&SessionFilter::all().since(start).before(end))?;
        debug!(%start, %end, rows = sessions.len(), "monthly total");
        Ok(sum_costs(&sessions))
    }
}

fn out_of_range(days: u32) -> AppError {
    AppError::InvalidInput(format!("{days} days is out of range"))
}
