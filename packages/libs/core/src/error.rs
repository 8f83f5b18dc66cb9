//! 공통 검증 에러 타입
//!
//! 호출 지점의 프로그래밍 실수(잘못된 값, 없는 컬럼, 빈 조건 등)를 나타냅니다.
//! 이 에러들은 DB에 닿기 전에 동기적으로 반환되며, 절대 삼켜지지 않습니다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// 스키마/값 검증 에러
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Value Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("invalid scalar value: {reason}")]
    InvalidValue { reason: String },

    #[error("type mismatch for column '{column}': expected {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    // ─────────────────────────────────────────────────────────────────────────────
    // Schema Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("table '{table}' has no column named '{column}'")]
    UnknownColumn { table: String, column: String },

    #[error("table '{table}' declares column '{column}' more than once")]
    DuplicateColumn { table: String, column: String },

    #[error("table '{table}' declares more than one primary key: '{first}' and '{second}'")]
    DuplicatePrimaryKey {
        table: String,
        first: String,
        second: String,
    },

    #[error("table '{table}' has no primary key column")]
    NoPrimaryKey { table: String },

    #[error("table '{table}' must declare at least one column")]
    EmptySchema { table: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Predicate Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("predicate set must not be empty")]
    EmptyPredicateSet,
}

impl Error {
    /// 에러 코드 (로그/호출자용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidValue { .. } => "INVALID_VALUE",
            Error::TypeMismatch { .. } => "TYPE_MISMATCH",
            Error::UnknownColumn { .. } => "UNKNOWN_COLUMN",
            Error::DuplicateColumn { .. } => "DUPLICATE_COLUMN",
            Error::DuplicatePrimaryKey { .. } => "DUPLICATE_PRIMARY_KEY",
            Error::NoPrimaryKey { .. } => "NO_PRIMARY_KEY",
            Error::EmptySchema { .. } => "EMPTY_SCHEMA",
            Error::EmptyPredicateSet => "EMPTY_PREDICATE_SET",
        }
    }

    pub(crate) fn invalid_value(reason: impl Into<String>) -> Self {
        Error::InvalidValue {
            reason: reason.into(),
        }
    }
}
