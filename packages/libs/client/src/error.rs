//! 클라이언트 에러 타입

use tabula_core::Error as CoreError;

/// 데이터 접근 계층 에러
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// 호출 지점의 프로그래밍 실수 (항상 즉시 반환)
    #[error("validation error: {0}")]
    Validation(#[from] CoreError),

    /// 연결 수립 실패 (재시도 여부는 호출자가 결정)
    #[error("failed to connect to {target}: {source}")]
    Connection {
        target: String,
        #[source]
        source: sqlx::Error,
    },

    /// SQL 실행 실패 (`ErrorPolicy::Propagate`일 때만 반환)
    #[error("failed to execute SQL query `{sql}`: {source}")]
    Execution {
        sql: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("database context has not been initialized; call Database::init first")]
    NotInitialized,

    #[error("database context is already initialized; call Database::teardown first")]
    AlreadyInitialized,

    #[error("configuration error: {message}")]
    Config { message: String },
}

impl DbError {
    /// 에러 코드 (로그/호출자용)
    pub fn code(&self) -> &'static str {
        match self {
            DbError::Validation(e) => e.code(),
            DbError::Connection { .. } => "CONNECTION_ERROR",
            DbError::Execution { .. } => "EXECUTION_ERROR",
            DbError::NotInitialized => "NOT_INITIALIZED",
            DbError::AlreadyInitialized => "ALREADY_INITIALIZED",
            DbError::Config { .. } => "CONFIG_ERROR",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DbError::Validation(_))
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        DbError::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
