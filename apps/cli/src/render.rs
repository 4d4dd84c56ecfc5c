use std::fmt::Write;

use chrono::NaiveDate;
use costs_core::{BudgetLevel, ChangeDirection, DashboardData, recent_date_label};

/// Plain-text rendering of the dashboard for `session-costs summary`.
pub fn render_dashboard(data: &DashboardData, today: NaiveDate) -> String {
    let mut out = String::new();
    let change = &data.daily_change;
    let arrow = match change.direction {
        ChangeDirection::Up => "up",
        ChangeDirection::Down => "down",
        ChangeDirection::Flat => "flat",
    };
    let _ = writeln!(
        out,
        "Today      ${:.2} ({} {}% vs ${:.2} yesterday)",
        data.today_cost,
        arrow,
        change.percent_change.abs(),
        data.yesterday_cost
    );

    let progress = &data.budget_progress;
    let marker = match progress.level {
        BudgetLevel::Ok => "",
        BudgetLevel::Warning => " [warning]",
        BudgetLevel::Exceeded => " [over budget]",
    };
    let _ = writeln!(
        out,
        "This month ${:.2} of ${:.2} ({:.0}%, ${:.2} left){}",
        data.monthly_total, data.budget, progress.percentage, progress.remaining, marker
    );

    let _ = writeln!(out, "\nLast {} days (${:.2})", data.spending_trend.len(), data.trend_total);
    for point in &data.spending_trend {
        let _ = writeln!(out, "  {:<12} ${:>8.2}", point.display_date, point.cost);
    }

    if !data.model_breakdown.is_empty() {
        let _ = writeln!(out, "\nBy model");
        for share in &data.model_breakdown {
            let _ = writeln!(
                out,
                "  {:<24} ${:>8.2} {:>3}%",
                share.model, share.cost, share.percentage
            );
        }
    }

    if !data.recent_sessions.is_empty() {
        let _ = writeln!(out, "\nRecent sessions");
        for session in &data.recent_sessions {
            let _ = writeln!(
                out,
                "  {:<10} {:<24} {:>9} tok ${:>8.2} {}",
                recent_date_label(session.date, today),
                session.model,
                session.total_tokens(),
                session.cost_usd,
                session.label.as_deref().unwrap_or("")
            );
        }
    }
    out
}
