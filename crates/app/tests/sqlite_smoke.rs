use costs_app::{AppConfig, AppState, Clock, SystemClock};
use costs_core::{MAX_TOKENS, SessionInput};
use tempfile::tempdir;

#[tokio::test]
async fn dashboard_smoke_over_sqlite() {
    let dir = tempdir().expect("temp dir");
    let db_path = dir.path().join("app.sqlite");
    let app_state = AppState::new(AppConfig::new(db_path));
    assert!(app_state.is_fresh_db());
    app_state.setup_db().expect("setup db");
    assert!(!app_state.is_fresh_db());

    let today = SystemClock.today();
    let (session, state) = app_state
        .services
        .dashboard
        .add_session(SessionInput {
            date: today,
            model: "sonnet".to_string(),
            tokens_in: Some(10.0.into()),
            tokens_out: Some("2".into()),
            cost_usd: Some("0.75".into()),
            label: None,
            session_id: Some("abc".to_string()),
        })
        .await
        .expect("add session");
    assert_eq!(session.total_tokens(), 12);

    let data = state.data().expect("ready");
    assert_eq!(data.today_cost, 0.75);
    assert_eq!(data.budget, 100.0);
    assert_eq!(data.recent_sessions, vec![session]);

    let settings = app_state
        .services
        .settings
        .update_budget(20.0)
        .expect("update budget");
    assert_eq!(settings.monthly_budget, 20.0);
    let state = app_state.services.dashboard.reload().await;
    assert_eq!(state.data().expect("ready").budget, 20.0);
}

#[test]
fn oversized_token_counts_are_stored_saturated() {
    let dir = tempdir().expect("temp dir");
    let app_state = AppState::new(AppConfig::new(dir.path().join("app.sqlite")));
    app_state.setup_db().expect("setup db");

    let session = app_state
        .services
        .sessions
        .add(SessionInput {
            date: SystemClock.today(),
            model: "opus".to_string(),
            tokens_in: Some(1e19.into()),
            tokens_out: Some("42".into()),
            cost_usd: Some(1.0.into()),
            label: None,
            session_id: None,
        })
        .expect("add session");
    assert_eq!(session.tokens_in, MAX_TOKENS);
    assert_eq!(session.tokens_out, 42);
    assert_eq!(session.total_tokens(), MAX_TOKENS + 42);
}
