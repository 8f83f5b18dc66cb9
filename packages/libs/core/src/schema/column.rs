//! 컬럼 정의
//!
//! 테이블의 컬럼 메타데이터와, 여기서 파생되는 DDL 조각/조건 조각을 정의합니다.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;
use crate::error::{Error, Result};
use crate::value::{ScalarKind, Value};

/// 컬럼 정의
///
/// 한 번 만들어지면 바뀌지 않는 상수입니다. `nullable`은 기본값이 없을 때만
/// `true`로 시작하며, [`Column::nullable`]로 덮어쓸 수 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// 컬럼 이름
    pub name: String,

    /// 컬럼 타입
    #[serde(flatten)]
    pub column_type: ColumnType,

    /// 기본값
    #[serde(default)]
    pub default: Option<Value>,

    /// NULL 허용 여부
    pub nullable: bool,

    /// 기본 키 여부
    #[serde(default)]
    pub primary_key: bool,
}

impl Column {
    /// 타입과 기본값으로 컬럼 생성
    ///
    /// 기본값의 스칼라 종류가 컬럼 타입과 다르면 실패합니다.
    pub fn new(
        name: impl Into<String>,
        column_type: ColumnType,
        default: Option<Value>,
    ) -> Result<Self> {
        let name = name.into();
        if let Some(value) = &default {
            check_kind(&name, column_type.scalar_kind(), value)?;
        }
        Ok(Self::unchecked(name, column_type, default))
    }

    /// INTEGER 컬럼
    pub fn int(name: impl Into<String>, default: Option<i64>) -> Self {
        Self::unchecked(name.into(), ColumnType::Int, default.map(Value::Integer))
    }

    /// BIGINT 컬럼
    pub fn bigint(name: impl Into<String>, default: Option<i64>) -> Self {
        Self::unchecked(name.into(), ColumnType::BigInt, default.map(Value::Integer))
    }

    /// VARCHAR(n) 컬럼
    pub fn string(name: impl Into<String>, default: Option<&str>, max_length: u32) -> Self {
        Self::unchecked(
            name.into(),
            ColumnType::Varchar { max_length },
            default.map(Value::from),
        )
    }

    /// BOOLEAN 컬럼
    pub fn boolean(name: impl Into<String>, default: Option<bool>) -> Self {
        Self::unchecked(name.into(), ColumnType::Boolean, default.map(Value::Boolean))
    }

    fn unchecked(name: String, column_type: ColumnType, default: Option<Value>) -> Self {
        let nullable = default.is_none();
        Self {
            name,
            column_type,
            default,
            nullable,
            primary_key: false,
        }
    }

    /// 기본 키로 지정
    pub fn primary(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// NULL 허용 여부 지정
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// 이 컬럼이 담는 스칼라 종류
    pub fn scalar_kind(&self) -> ScalarKind {
        self.column_type.scalar_kind()
    }

    /// DDL 컬럼 설명자
    ///
    /// 타입 키워드 뒤에 `DEFAULT`, `NOT NULL`, `PRIMARY KEY` 순으로 붙습니다.
    pub fn descriptor(&self) -> String {
        let mut out = self.column_type.sql_type();
        if let Some(default) = &self.default {
            out.push_str(" DEFAULT ");
            out.push_str(&default.to_sql_literal());
        }
        if !self.nullable {
            out.push_str(" NOT NULL");
        }
        if self.primary_key {
            out.push_str(" PRIMARY KEY");
        }
        out
    }

    /// `<name> = ?` 조건 조각
    pub fn predicate(&self) -> String {
        format!("{} = ?", self.name)
    }

    /// 값의 종류가 이 컬럼에 맞는지 확인
    pub fn check_value(&self, value: &Value) -> Result<()> {
        check_kind(&self.name, self.scalar_kind(), value)
    }
}

fn check_kind(column: &str, expected: ScalarKind, value: &Value) -> Result<()> {
    if value.kind() == expected {
        Ok(())
    } else {
        Err(Error::TypeMismatch {
            column: column.to_string(),
            expected: expected.as_str(),
            actual: value.kind().as_str(),
        })
    }
}
