mod support;

use costs_app::DashboardState;
use costs_core::{BudgetLevel, ChangeDirection, Settings};
use costs_db::MemoryStore;
use support::{input, make_session, seed, setup_app, setup_app_with};

#[tokio::test]
async fn dashboard_starts_loading_then_becomes_ready() {
    let app = setup_app();
    seed(
        &app,
        vec![
            make_session("2024-03-15", "opus", 3.0),
            make_session("2024-03-14", "sonnet", 2.0),
            make_session("2024-03-02", "kimi", 75.0),
            make_session("2024-02-20", "grok", 10.0),
        ],
    );
    let dashboard = &app.state.services.dashboard;
    assert_eq!(dashboard.state().await, DashboardState::Loading);

    let state = dashboard.reload().await;
    assert_eq!(dashboard.state().await, state);
    let data = state.data().expect("ready");

    assert_eq!(data.today_cost, 3.0);
    assert_eq!(data.yesterday_cost, 2.0);
    assert_eq!(data.daily_change.percent_change, 50);
    assert_eq!(data.daily_change.direction, ChangeDirection::Up);
    assert_eq!(data.spending_trend.len(), 7);
    assert_eq!(data.trend_total, 5.0);
    assert_eq!(data.monthly_total, 80.0);
    assert_eq!(data.budget, 100.0);
    assert_eq!(data.budget_progress.level, BudgetLevel::Warning);
    assert_eq!(data.budget_progress.remaining, 20.0);
    assert_eq!(data.model_breakdown[0].model, "kimi");
    assert_eq!(data.model_breakdown.len(), 4);
    assert_eq!(data.recent_sessions.len(), 4);
}

#[tokio::test]
async fn missing_settings_fall_back_to_default_budget() {
    let app = setup_app_with(MemoryStore::new());
    let state = app.state.services.dashboard.reload().await;
    assert_eq!(state.data().expect("ready").budget, 100.0);
}

#[tokio::test]
async fn zero_budget_falls_back_to_default_budget() {
    let app = setup_app_with(MemoryStore::with_budget(0.0));
    let state = app.state.services.dashboard.reload().await;
    assert_eq!(state.data().expect("ready").budget, 100.0);

    let app = setup_app_with(MemoryStore::with_budget(40.0));
    let state = app.state.services.dashboard.reload().await;
    assert_eq!(state.data().expect("ready").budget, 40.0);
}

#[tokio::test]
async fn duplicate_settings_fail_the_load() {
    let store = MemoryStore::with_budget(100.0);
    store.push_settings(Settings {
        id: "second".to_string(),
        monthly_budget: 50.0,
        created_at: "2024-01-01T00:00:00.000Z".to_string(),
        updated_at: "2024-01-01T00:00:00.000Z".to_string(),
    });
    let app = setup_app_with(store);

    let state = app.state.services.dashboard.reload().await;
    assert!(matches!(state, DashboardState::Failed { .. }));
}

#[tokio::test]
async fn failed_load_recovers_on_next_reload() {
    let app = setup_app();
    let dashboard = &app.state.services.dashboard;

    app.store.set_failure(Some("disk unplugged"));
    let state = dashboard.reload().await;
    match &state {
        DashboardState::Failed { message } => assert!(message.contains("disk unplugged")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(dashboard.state().await, state);

    app.store.set_failure(None);
    let state = dashboard.reload().await;
    assert!(state.is_ready());
}

#[tokio::test]
async fn add_session_refreshes_dashboard() {
    let app = setup_app();
    let dashboard = &app.state.services.dashboard;
    dashboard.reload().await;

    let (session, state) = dashboard
        .add_session(input("2024-03-15", "claude-opus", "4.5"))
        .await
        .expect("add session");
    let data = state.data().expect("ready");
    assert_eq!(data.today_cost, 4.5);
    assert_eq!(data.recent_sessions[0], session);
}

#[tokio::test]
async fn failed_insert_keeps_previous_state() {
    let app = setup_app();
    let dashboard = &app.state.services.dashboard;
    let ready = dashboard.reload().await;

    app.store.set_failure(Some("read only"));
    let result = dashboard
        .add_session(input("2024-03-15", "opus", "1"))
        .await;
    assert!(result.is_err());
    assert_eq!(dashboard.state().await, ready);
}

#[test]
fn dashboard_state_serializes_with_status_tag() {
    let failed = DashboardState::Failed {
        message: "boom".to_string(),
    };
    let value = serde_json::to_value(&failed).expect("serialize");
    assert_eq!(value["status"], "failed");
    assert_eq!(value["message"], "boom");

    let loading = serde_json::to_value(DashboardState::Loading).expect("serialize");
    assert_eq!(loading["status"], "loading");
}

#[tokio::test]
async fn overlapping_reloads_settle_on_the_later_load() {
    let app = setup_app();
    seed(&app, vec![make_session("2024-03-15", "opus", 3.0)]);
    let dashboard = &app.state.services.dashboard;

    let (_, later) = tokio::join!(dashboard.reload(), async {
        app.store.set_failure(Some("went away"));
        dashboard.reload().await
    });
    assert!(matches!(later, DashboardState::Failed { .. }));
    assert_eq!(dashboard.state().await, later);
}
