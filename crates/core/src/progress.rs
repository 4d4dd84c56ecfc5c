use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    Ok,
    Warning,
    Exceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub spent: f64,
    pub budget: f64,
    /// Share of the budget used, capped at 100.
    pub percentage: f64,
    pub remaining: f64,
    pub level: BudgetLevel,
}

impl BudgetProgress {
    pub fn compute(spent: f64, budget: f64) -> Self {
        let raw = if budget > 0.0 {
            (spent / budget) * 100.0
        } else if spent > 0.0 {
            100.0
        } else {
            0.0
        };
        let percentage = raw.clamp(0.0, 100.0);
        let level = if percentage >= 100.0 {
            BudgetLevel::Exceeded
        } else if percentage > 75.0 {
            BudgetLevel::Warning
        } else {
            BudgetLevel::Ok
        };
        Self {
            spent,
            budget,
            percentage,
            remaining: (budget - spent).max(0.0),
            level,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Up,
    Down,
    Flat,
}

/// Today's spend compared with yesterday's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyChange {
    pub today: f64,
    pub yesterday: f64,
    pub percent_change: i64,
    pub direction: ChangeDirection,
}

impl DailyChange {
    pub fn compute(today: f64, yesterday: f64) -> Self {
        let difference = today - yesterday;
        let percent_change = if yesterday > 0.0 {
            round_half_up((difference / yesterday) * 100.0) as i64
        } else {
            0
        };
        let direction = if difference > 0.0 {
            ChangeDirection::Up
        } else if difference < 0.0 {
            ChangeDirection::Down
        } else {
            ChangeDirection::Flat
        };
        Self {
            today,
            yesterday,
            percent_change,
            direction,
        }
    }
}

/// Rounds halves toward positive infinity, so -2.5 becomes -2.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
