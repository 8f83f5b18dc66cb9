//! tabula: 타입 컬럼 기반 데이터 접근 계층
//!
//! 테이블을 타입이 있는 컬럼 목록으로 선언하고, SQL을 직접 쓰지 않고
//! CRUD를 수행합니다. 연결 생명주기와 스키마 동기화(테이블 생성, 누락 컬럼
//! 추가)도 여기서 관리합니다.
//!
//! # 모듈 구조
//!
//! - `config`: 환경변수/파일 설정
//! - `connection`: 단일 연결 관리자 (지연 연결, 재연결)
//! - `database`: 레지스트리 + 연결 + 에러 정책 컨텍스트
//! - `registry`: 테이블 카탈로그와 일괄 동기화
//! - `table`: CRUD 엔진
//! - `policy`: 실행 에러 처리 정책
//! - `error`: 에러 타입
//!
//! # 사용 예
//!
//! ```no_run
//! use tabula::{Column, ConnectionManager, Database, PredicateSet, TableSchema};
//!
//! # async fn run() -> tabula::Result<()> {
//! let db = Database::default();
//! let students = db.register(TableSchema::new(
//!     "students",
//!     vec![
//!         Column::string("first_name", Some("John"), 64),
//!         Column::int("age", Some(18)),
//!     ],
//! )?);
//!
//! db.init(ConnectionManager::sqlite("./data/school.db")).await?;
//! students.update(&PredicateSet::eq("first_name", "Matt"), "age", 21).await?;
//! db.teardown().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connection;
pub mod database;
pub mod error;
pub mod policy;
pub mod registry;
pub mod table;

pub use config::{timezone, BackendConfig, Config};
pub use connection::{BackendConnection, ConnectionManager};
pub use database::Database;
pub use error::{DbError, Result};
pub use policy::ErrorPolicy;
pub use registry::{ReconcileSummary, Reconciliation, TableRegistry};
pub use table::Table;

pub use tabula_core::{Column, ColumnType, Predicate, PredicateSet, ScalarKind, TableSchema, Value};
pub use tabula_sql::Dialect;
