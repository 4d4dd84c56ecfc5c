use costs_core::NumericInput;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct EmptyRequest {}

#[derive(Debug, Deserialize, Default)]
pub struct DailyCostRequest {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DaysRequest {
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RecentSessionsRequest {
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MonthlyTotalRequest {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct BudgetPutRequest {
    pub monthly_budget: f64,
}

/// Form fields for a new session. Numbers may arrive as JSON numbers or text.
#[derive(Debug, Deserialize)]
pub struct SessionsAddRequest {
    pub date: String,
    pub model: String,
    pub tokens_in: Option<NumericInput>,
    pub tokens_out: Option<NumericInput>,
    pub cost_usd: Option<NumericInput>,
    pub label: Option<String>,
    pub session_id: Option<String>,
}
