//! tabula-core: 공통 핵심 타입
//!
//! SQL 빌더와 클라이언트가 공유하는 스칼라 값, 컬럼 모델, 조건 집합을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `value`: 스칼라 값 (정수, 문자열, 불리언)
//! - `schema`: 컬럼 타입, 컬럼, 테이블 스키마
//! - `predicate`: `(컬럼, 값)` 조건 집합
//! - `error`: 검증 에러 타입

pub mod error;
pub mod predicate;
pub mod schema;
pub mod value;

pub use error::{Error, Result};
pub use predicate::{Predicate, PredicateSet};
pub use schema::{Column, ColumnType, TableSchema};
pub use value::{ScalarKind, Value};
