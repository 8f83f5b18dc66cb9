//! tabula 데모
//!
//! 학생 테이블(이름으로 식별)과 사람 테이블(명시적 `id` 키)을 선언하고,
//! 몇 가지 갱신을 실행한 뒤 결과를 출력합니다.

use tabula::{Column, Config, Database, PredicateSet, TableSchema, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 환경변수 로드
    dotenvy::dotenv().ok();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tabula=debug,tabula_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 설정 로드
    let config = Config::from_env()?;
    tracing::info!("Starting demo with config: {:?}", config);

    let (db, manager) = Database::from_config(&config);

    let students = db.register(TableSchema::new(
        "students",
        vec![
            Column::string("first_name", Some("John"), 64),
            Column::string("last_name", Some("Doe"), 64),
            Column::int("age", Some(18)),
            Column::boolean("passing", Some(false)),
            Column::string("grade", Some("C"), 2),
        ],
    )?);
    let people = db.register(TableSchema::new(
        "people",
        vec![
            Column::bigint("id", None).primary().nullable(false),
            Column::string("full_name", None, 64),
        ],
    )?);

    let summary = db.init(manager).await?;
    for (table, error) in &summary.failed {
        tracing::warn!("Table {} is not usable: {}", table, error);
    }

    let matt = PredicateSet::eq("first_name", "Matt").and("last_name", "Smith");
    students.update(&matt, "age", 21).await?;
    students.update(&matt, "passing", true).await?;
    students.update(&matt, "grade", "A").await?;

    let ann = PredicateSet::eq("first_name", "Ann").and("last_name", "Lee");
    students.update(&ann, "age", 19).await?;
    students.reset(&ann, "grade").await?;

    people.update_by_key(42, "full_name", "Ada Lovelace").await?;
    people.update_by_key(7, "full_name", "Grace Hopper").await?;

    for who in [&matt, &ann] {
        let name = who
            .values()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let age = students.get_as::<i64>("age", who).await?;
        let passing = students.get_as::<bool>("passing", who).await?;
        let grade = students.get_as::<String>("grade", who).await?;
        println!(
            "{}: age={:?} passing={:?} grade={:?}",
            name, age, passing, grade
        );
    }

    println!("people: {:?}", people.get_all("full_name").await?);
    println!(
        "people #42 exists: {}",
        people.exists_by_key(42).await?
    );

    people.delete_by_key(7).await?;
    println!("after delete: {:?}", people.get_all("full_name").await?);

    db.teardown().await?;
    Ok(())
}
