use chrono::NaiveDate;
use costs_core::{
    BudgetProgress, DailyChange, DashboardData, ModelShare, ModelTone, Session, TrendPoint,
    recent_date_label,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub session: Session,
    pub total_tokens: u64,
    pub date_label: String,
    pub tone: &'static str,
    pub color: &'static str,
}

impl SessionResponse {
    pub fn new(session: Session, today: NaiveDate) -> Self {
        let tone = ModelTone::for_model(&session.model);
        Self {
            total_tokens: session.total_tokens(),
            date_label: recent_date_label(session.date, today),
            tone: tone.as_str(),
            color: tone.color(),
            session,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ModelShareResponse {
    #[serde(flatten)]
    pub share: ModelShare,
    pub tone: &'static str,
    pub color: &'static str,
}

impl From<ModelShare> for ModelShareResponse {
    fn from(share: ModelShare) -> Self {
        let tone = ModelTone::for_model(&share.model);
        Self {
            tone: tone.as_str(),
            color: tone.color(),
            share,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub today_cost: f64,
    pub yesterday_cost: f64,
    pub spending_trend: Vec<TrendPoint>,
    pub trend_total: f64,
    pub model_breakdown: Vec<ModelShareResponse>,
    pub recent_sessions: Vec<SessionResponse>,
    pub monthly_total: f64,
    pub budget: f64,
    pub daily_change: DailyChange,
    pub budget_progress: BudgetProgress,
}

impl DashboardView {
    pub fn new(data: DashboardData, today: NaiveDate) -> Self {
        Self {
            today_cost: data.today_cost,
            yesterday_cost: data.yesterday_cost,
            spending_trend: data.spending_trend,
            trend_total: data.trend_total,
            model_breakdown: data
                .model_breakdown
                .into_iter()
                .map(ModelShareResponse::from)
                .collect(),
            recent_sessions: data
                .recent_sessions
                .into_iter()
                .map(|session| SessionResponse::new(session, today))
                .collect(),
            monthly_total: data.monthly_total,
            budget: data.budget,
            daily_change: data.daily_change,
            budget_progress: data.budget_progress,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DashboardResponse {
    Loading,
    Ready { data: Box<DashboardView> },
    Failed { message: String },
}

impl DashboardResponse {
    pub fn is_failed(&self) -> bool {
        matches!(self, DashboardResponse::Failed { .. })
    }
}

#[derive(Debug, Serialize)]
pub struct SessionAddedResponse {
    pub session: SessionResponse,
    pub dashboard: DashboardResponse,
}

#[derive(Debug, Serialize)]
pub struct DailyCostResponse {
    pub date: NaiveDate,
    pub cost: f64,
}

#[derive(Debug, Serialize)]
pub struct MonthlyTotalResponse {
    pub year: i32,
    pub month: u32,
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub id: String,
    pub monthly_budget: f64,
    pub created_at: String,
    pub updated_at: String,
    pub db_path: String,
    pub app_data_dir: String,
}

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}
