//! 스칼라 값
//!
//! 컬럼 기본값, 조건 값, 바인딩 값은 모두 이 타입으로 표현됩니다.
//! 지원 타입은 64비트 정수, 문자열, 불리언 세 가지뿐입니다.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 스칼라 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Integer,
    String,
    Boolean,
}

impl ScalarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::Integer => "integer",
            ScalarKind::String => "string",
            ScalarKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 스칼라 값
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    String(String),
    Boolean(bool),
}

impl Value {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Value::Integer(_) => ScalarKind::Integer,
            Value::String(_) => ScalarKind::String,
            Value::Boolean(_) => ScalarKind::Boolean,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// DDL `DEFAULT` 절에 들어갈 리터럴
    ///
    /// 문자열은 작은따옴표로 감싸고 내부 따옴표는 두 번 씁니다.
    /// 바인딩 값에는 절대 사용하지 않습니다.
    pub fn to_sql_literal(&self) -> String {
        match self {
            Value::Integer(i) => i.to_string(),
            Value::String(s) => format!("'{}'", s.replace('\'', "''")),
            Value::Boolean(b) => b.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::String(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl TryFrom<u64> for Value {
    type Error = Error;

    fn try_from(v: u64) -> Result<Self> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| Error::invalid_value(format!("{} does not fit in a 64-bit signed integer", v)))
    }
}

/// JSON 값 변환 (설정 파일 등 외부 입력용)
impl TryFrom<&serde_json::Value> for Value {
    type Error = Error;

    fn try_from(v: &serde_json::Value) -> Result<Self> {
        match v {
            serde_json::Value::Bool(b) => Ok(Value::Boolean(*b)),
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Value::Integer)
                .ok_or_else(|| Error::invalid_value(format!("{} is not a 64-bit integer", n))),
            serde_json::Value::Null => Err(Error::invalid_value("null is not a scalar")),
            serde_json::Value::Array(_) => Err(Error::invalid_value("arrays are not scalars")),
            serde_json::Value::Object(_) => Err(Error::invalid_value("objects are not scalars")),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::Integer(i) => Ok(i),
            other => Err(Error::invalid_value(format!("expected integer, got {}", other.kind()))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::String(s) => Ok(s),
            other => Err(Error::invalid_value(format!("expected string, got {}", other.kind()))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::Boolean(b) => Ok(b),
            other => Err(Error::invalid_value(format!("expected boolean, got {}", other.kind()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_literal_quoting() {
        assert_eq!(Value::from("John").to_sql_literal(), "'John'");
        assert_eq!(Value::from("O'Brien").to_sql_literal(), "'O''Brien'");
        assert_eq!(Value::from(18).to_sql_literal(), "18");
        assert_eq!(Value::from(false).to_sql_literal(), "false");
    }

    #[test]
    fn test_json_conversion_rejects_non_scalars() {
        assert_eq!(
            Value::try_from(&serde_json::json!(42)).unwrap(),
            Value::Integer(42)
        );
        assert_eq!(
            Value::try_from(&serde_json::json!("x")).unwrap(),
            Value::String("x".to_string())
        );
        assert!(Value::try_from(&serde_json::json!(1.5)).is_err());
        assert!(Value::try_from(&serde_json::json!(null)).is_err());
        assert!(Value::try_from(&serde_json::json!([1, 2])).is_err());
    }

    #[test]
    fn test_u64_overflow_is_invalid() {
        assert!(Value::try_from(u64::MAX).is_err());
        assert_eq!(Value::try_from(7u64).unwrap(), Value::Integer(7));
    }

    #[test]
    fn test_typed_extraction() {
        assert_eq!(i64::try_from(Value::from(21)).unwrap(), 21);
        assert!(bool::try_from(Value::from("yes")).is_err());
        assert_eq!(String::try_from(Value::from("Ada")).unwrap(), "Ada");
    }
}
