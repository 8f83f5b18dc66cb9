//! 테이블 스키마 모델
//!
//! # 개요
//!
//! 각 테이블은 명시적인 컬럼 목록으로 선언됩니다 (리플렉션 없음).
//! 이 모듈은 컬럼 타입, 컬럼, 테이블 스키마를 정의합니다.
//!
//! # 모듈 구조
//!
//! - `types`: 컬럼 타입 (INTEGER, BIGINT, VARCHAR, BOOLEAN)
//! - `column`: 컬럼 정의와 DDL/조건 조각
//! - `table`: 테이블 스키마와 입력 검증

mod column;
mod table;
mod types;

pub use column::Column;
pub use table::TableSchema;
pub use types::ColumnType;
