//! SQLite 파일 DB를 사용한 종단 간 시나리오

use tabula::{
    Column, ConnectionManager, Database, ErrorPolicy, PredicateSet, Reconciliation, TableSchema,
    Value,
};

fn students() -> TableSchema {
    TableSchema::new(
        "students",
        vec![
            Column::string("first_name", Some("John"), 64),
            Column::int("age", Some(18)),
            Column::boolean("passing", Some(false)),
        ],
    )
    .unwrap()
}

fn people() -> TableSchema {
    TableSchema::new(
        "people",
        vec![
            Column::int("id", None).primary().nullable(false),
            Column::string("full_name", None, 64),
        ],
    )
    .unwrap()
}

fn scores() -> TableSchema {
    TableSchema::new(
        "scores",
        vec![
            Column::string("team", None, 32),
            Column::int("score", Some(0)),
        ],
    )
    .unwrap()
}

#[tokio::test]
async fn test_student_upsert_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(ErrorPolicy::Propagate);
    let students = db.register(students());

    let summary = db
        .init(ConnectionManager::sqlite(dir.path().join("school.db")))
        .await
        .unwrap();
    assert_eq!(summary.outcome("students"), Some(&Reconciliation::Created));

    let matt = PredicateSet::eq("first_name", "Matt");
    students.update(&matt, "age", 21).await.unwrap();

    assert_eq!(students.get("age", &matt).await.unwrap(), Some(Value::Integer(21)));
    assert!(students.exists(&matt).await.unwrap());
    assert_eq!(
        students.get("passing", &matt).await.unwrap(),
        Some(Value::Boolean(false))
    );

    db.teardown().await.unwrap();
}

#[tokio::test]
async fn test_student_upsert_scenario_with_default_policy() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::default();
    let students = db.register(students());
    db.init(ConnectionManager::sqlite(dir.path().join("school.db")))
        .await
        .unwrap();

    let matt = PredicateSet::eq("first_name", "Matt");
    for age in [21, 22, 23] {
        students.update(&matt, "age", age).await.unwrap();
    }

    assert_eq!(
        students.get_all_where("age", &matt).await.unwrap(),
        vec![Value::Integer(23)]
    );
    assert_eq!(
        students.get("passing", &matt).await.unwrap(),
        Some(Value::Boolean(false))
    );
    assert_eq!(
        students.get_all("passing").await.unwrap(),
        vec![Value::Boolean(false)]
    );

    db.teardown().await.unwrap();
}

#[tokio::test]
async fn test_explicit_key_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(ErrorPolicy::Propagate);
    let people = db.register(people());
    db.init(ConnectionManager::sqlite(dir.path().join("people.db")))
        .await
        .unwrap();

    assert_eq!(people.get_by_key(42, "full_name").await.unwrap(), None);

    people.update_by_key(42, "full_name", "Ada").await.unwrap();
    assert_eq!(
        people.get_as::<String>("full_name", &PredicateSet::eq("id", 42)).await.unwrap(),
        Some("Ada".to_string())
    );

    assert_eq!(people.delete_by_key(42).await.unwrap(), 1);
    assert!(!people.exists_by_key(42).await.unwrap());

    db.teardown().await.unwrap();
}

#[tokio::test]
async fn test_multi_predicate_delete_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(ErrorPolicy::Propagate);
    let scores = db.register(scores());
    db.init(ConnectionManager::sqlite(dir.path().join("scores.db")))
        .await
        .unwrap();

    let red_10 = PredicateSet::eq("team", "Red").and("score", 10);
    let red_20 = PredicateSet::eq("team", "Red").and("score", 20);
    scores.update(&red_10, "score", 10).await.unwrap();
    scores.update(&red_20, "score", 20).await.unwrap();

    let red = PredicateSet::eq("team", "Red");
    assert_eq!(
        scores.get_all_where("score", &red).await.unwrap(),
        vec![Value::Integer(10), Value::Integer(20)]
    );

    assert_eq!(scores.delete(&red_10).await.unwrap(), 1);
    assert!(!scores.exists(&red_10).await.unwrap());
    assert!(scores.exists(&red_20).await.unwrap());

    db.teardown().await.unwrap();
}

#[tokio::test]
async fn test_update_then_get_every_scalar_kind() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(ErrorPolicy::Propagate);
    let table = db.register(
        TableSchema::new(
            "settings",
            vec![
                Column::bigint("id", None).primary().nullable(false),
                Column::bigint("quota", None),
                Column::string("label", Some("it's default"), 64),
                Column::boolean("enabled", None),
            ],
        )
        .unwrap(),
    );
    db.init(ConnectionManager::sqlite(dir.path().join("settings.db")))
        .await
        .unwrap();

    let cases = [
        ("quota", Value::Integer(i64::MAX)),
        ("label", Value::String("O'Brien".into())),
        ("enabled", Value::Boolean(true)),
    ];
    for (column, value) in cases {
        table.update_by_key(1, column, value.clone()).await.unwrap();
        assert_eq!(table.get_by_key(1, column).await.unwrap(), Some(value));
    }

    table.reset_by_key(1, "label").await.unwrap();
    assert_eq!(
        table.get_by_key(1, "label").await.unwrap(),
        Some(Value::String("it's default".into()))
    );
    table.reset_by_key(1, "enabled").await.unwrap();
    assert_eq!(table.get_by_key(1, "enabled").await.unwrap(), None);

    db.teardown().await.unwrap();
}

#[tokio::test]
async fn test_reconcile_failure_does_not_stop_siblings() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(ErrorPolicy::LogAndDefault);
    db.register(people());
    // 예약어라서 CREATE TABLE이 실패함
    db.register(TableSchema::new("order", vec![Column::int("total", Some(0))]).unwrap());
    db.register(students());

    let summary = db
        .init(ConnectionManager::sqlite(dir.path().join("mixed.db")))
        .await
        .unwrap();

    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, "order");
    assert_eq!(summary.failed[0].1.code(), "EXECUTION_ERROR");
    assert_eq!(summary.outcome("people"), Some(&Reconciliation::Created));
    assert_eq!(summary.outcome("students"), Some(&Reconciliation::Created));

    db.teardown().await.unwrap();
}

#[tokio::test]
async fn test_schema_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reopen.db");

    let db = Database::new(ErrorPolicy::Propagate);
    let students = db.register(students());
    db.init(ConnectionManager::sqlite(&path)).await.unwrap();
    students
        .update(&PredicateSet::eq("first_name", "Matt"), "age", 21)
        .await
        .unwrap();
    db.teardown().await.unwrap();

    let summary = db.init(ConnectionManager::sqlite(&path)).await.unwrap();
    assert_eq!(summary.outcome("students"), Some(&Reconciliation::Unchanged));
    assert_eq!(
        students
            .get_as::<i64>("age", &PredicateSet::eq("first_name", "Matt"))
            .await
            .unwrap(),
        Some(21)
    );

    db.teardown().await.unwrap();
}
