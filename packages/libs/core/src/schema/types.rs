//! 컬럼 타입 정의
//!
//! 각 컬럼 타입은 하나의 스칼라 종류에 대응하며, 두 백엔드(SQLite, MySQL)에
//! 공통으로 쓰이는 DDL 타입 키워드를 가집니다.

use serde::{Deserialize, Serialize};

use crate::value::ScalarKind;

/// 컬럼 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnType {
    /// 정수 (INTEGER)
    Int,

    /// 64비트 정수 (BIGINT)
    BigInt,

    /// 길이 제한 문자열 (VARCHAR(n))
    Varchar { max_length: u32 },

    /// 불리언 (BOOLEAN)
    Boolean,
}

impl ColumnType {
    /// 간단한 타입 문자열에서 파싱
    ///
    /// `varchar`는 길이가 필요하므로 `varchar(64)` 형태만 받습니다.
    pub fn from_simple_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "int" | "integer" => Some(ColumnType::Int),
            "bigint" | "long" => Some(ColumnType::BigInt),
            "boolean" | "bool" => Some(ColumnType::Boolean),
            _ => {
                let inner = lower.strip_prefix("varchar(")?.strip_suffix(')')?;
                inner
                    .trim()
                    .parse()
                    .ok()
                    .map(|max_length| ColumnType::Varchar { max_length })
            }
        }
    }

    /// DDL 타입 키워드
    pub fn sql_type(&self) -> String {
        match self {
            ColumnType::Int => "INTEGER".to_string(),
            ColumnType::BigInt => "BIGINT".to_string(),
            ColumnType::Varchar { max_length } => format!("VARCHAR({})", max_length),
            ColumnType::Boolean => "BOOLEAN".to_string(),
        }
    }

    /// 이 타입이 담는 스칼라 종류
    pub fn scalar_kind(&self) -> ScalarKind {
        match self {
            ColumnType::Int | ColumnType::BigInt => ScalarKind::Integer,
            ColumnType::Varchar { .. } => ScalarKind::String,
            ColumnType::Boolean => ScalarKind::Boolean,
        }
    }
}
