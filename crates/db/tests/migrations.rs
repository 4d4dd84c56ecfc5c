mod support;

use costs_db::{Db, MIGRATIONS};
use rusqlite::Connection;
use support::{make_session, setup_db};

#[test]
fn migrate_is_idempotent() {
    let mut test_db = setup_db();
    test_db
        .db
        .insert_session(&make_session("2024-03-01", "opus", 1.0))
        .expect("insert");
    test_db.db.migrate().expect("migrate again");

    let applied = test_db.db.applied_migrations().expect("applied");
    let expected: Vec<String> = MIGRATIONS.iter().map(|(name, _)| name.to_string()).collect();
    assert_eq!(applied, expected);
    assert_eq!(test_db.db.count_sessions().expect("count"), 1);
}

#[test]
fn migrate_does_not_reseed_removed_settings() {
    let test_db = setup_db();
    test_db.db.delete_settings().expect("delete");

    let mut reopened = Db::open(&test_db.path).expect("reopen");
    reopened.migrate().expect("migrate");
    assert!(reopened.settings().is_err());
}

#[test]
fn schema_rejects_negative_cost() {
    let test_db = setup_db();
    let conn = Connection::open(&test_db.path).expect("open conn");
    let result = conn.execute(
        r#"
        INSERT INTO costs_session (id, created_at, date, model, cost_usd)
        VALUES ('s1', '2024-03-01T00:00:00.000Z', '2024-03-01', 'opus', -1.0)
        "#,
        [],
    );
    assert!(result.is_err());
}
