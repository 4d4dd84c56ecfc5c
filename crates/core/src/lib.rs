use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

mod dates;
mod input;
mod palette;
mod progress;

pub use dates::{
    DATE_FORMAT, days_before, display_date, format_date, month_bounds, parse_date,
    recent_date_label, trend_start,
};
pub use input::{MAX_TOKENS, NumericInput, SessionInput, coerce_cost, coerce_tokens};
pub use palette::ModelTone;
pub use progress::{BudgetLevel, BudgetProgress, ChangeDirection, DailyChange};

use progress::round_half_up;

/// Budget shown when no settings row exists or its budget is unset.
pub const DEFAULT_MONTHLY_BUDGET: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub created_at: String,
    pub date: NaiveDate,
    pub model: String,
    pub tokens_in: u64,
    pub tokens_out: u64,
    pub cost_usd: f64,
    pub label: Option<String>,
    pub session_id: Option<String>,
}

impl Session {
    pub fn total_tokens(&self) -> u64 {
        self.tokens_in.saturating_add(self.tokens_out)
    }
}

/// Fields supplied by the caller when logging a session; the store assigns
/// `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSession {
    pub date: NaiveDate,
    pub model: String,
    pub tokens_in: u64,
    pub tokens_out: u64,
    pub cost_usd: f64,
    pub label: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub id: String,
    pub monthly_budget: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub monthly_budget: f64,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub cost: f64,
    pub display_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelShare {
    pub model: String,
    pub cost: f64,
    pub percentage: u32,
}

/// Page view-model assembled by the dashboard after all aggregations finish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub today_cost: f64,
    pub yesterday_cost: f64,
    pub spending_trend: Vec<TrendPoint>,
    pub model_breakdown: Vec<ModelShare>,
    pub recent_sessions: Vec<Session>,
    pub monthly_total: f64,
    pub budget: f64,
    pub trend_total: f64,
    pub daily_change: DailyChange,
    pub budget_progress: BudgetProgress,
}

impl DashboardData {
    pub fn from_parts(
        today_cost: f64,
        yesterday_cost: f64,
        spending_trend: Vec<TrendPoint>,
        model_breakdown: Vec<ModelShare>,
        recent_sessions: Vec<Session>,
        monthly_total: f64,
        budget: f64,
    ) -> Self {
        let trend_total = spending_trend.iter().map(|point| point.cost).sum();
        Self {
            today_cost,
            yesterday_cost,
            spending_trend,
            model_breakdown,
            recent_sessions,
            monthly_total,
            budget,
            trend_total,
            daily_change: DailyChange::compute(today_cost, yesterday_cost),
            budget_progress: BudgetProgress::compute(monthly_total, budget),
        }
    }
}

pub fn sum_costs(sessions: &[Session]) -> f64 {
    sessions.iter().map(|session| session.cost_usd).sum()
}

/// Sums cost per day over `days` consecutive dates starting at `start`.
/// Dates without sessions are present with a cost of zero.
pub fn fill_daily_trend(start: NaiveDate, days: u32, sessions: &[Session]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = start
        .iter_days()
        .take(days as usize)
        .map(|date| TrendPoint {
            date,
            cost: 0.0,
            display_date: display_date(date),
        })
        .collect();
    for session in sessions {
        let offset = session.date.signed_duration_since(start).num_days();
        let Ok(offset) = usize::try_from(offset) else {
            continue;
        };
        if let Some(point) = points.get_mut(offset) {
            point.cost += session.cost_usd;
        }
    }
    points
}

/// Groups cost by model in first-seen order and derives rounded shares.
/// Shares are rounded per entry and need not add up to 100.
pub fn model_shares(sessions: &[Session]) -> Vec<ModelShare> {
    let mut groups: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for session in sessions {
        match index.get(session.model.as_str()) {
            Some(&slot) => groups[slot].1 += session.cost_usd,
            None => {
                index.insert(session.model.as_str(), groups.len());
                groups.push((session.model.clone(), session.cost_usd));
            }
        }
    }
    let total: f64 = groups.iter().map(|(_, cost)| cost).sum();
    let mut shares: Vec<ModelShare> = groups
        .into_iter()
        .map(|(model, cost)| ModelShare {
            model,
            cost,
            percentage: if total > 0.0 {
                round_half_up((cost / total) * 100.0) as u32
            } else {
                0
            },
        })
        .collect();
    shares.sort_by(|a, b| b.cost.total_cmp(&a.cost));
    shares
}

/// Budget used for progress: the stored budget unless it is missing, zero or NaN.
pub fn effective_budget(settings: Option<&Settings>, fallback: f64) -> f64 {
    settings
        .map(|settings| settings.monthly_budget)
        .filter(|budget| *budget != 0.0 && !budget.is_nan())
        .unwrap_or(fallback)
}
