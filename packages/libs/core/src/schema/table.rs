//! 테이블 스키마
//!
//! 명시적인 컬럼 목록(선언 순서 유지)과 거기서 파생된 기본 키 이름을 가집니다.
//! 모든 CRUD 입력 검증이 여기서 이루어집니다.

use std::collections::HashSet;

use serde::Serialize;

use super::column::Column;
use crate::error::{Error, Result};
use crate::predicate::PredicateSet;
use crate::value::Value;

/// 테이블 스키마
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSchema {
    name: String,
    columns: Vec<Column>,
    primary_key: Option<String>,
}

impl TableSchema {
    /// 스키마 생성
    ///
    /// 컬럼 이름 중복, 기본 키 두 개 이상, 빈 컬럼 목록은 거부합니다.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        let name = name.into();
        if columns.is_empty() {
            return Err(Error::EmptySchema { table: name });
        }

        let mut seen = HashSet::new();
        let mut primary_key: Option<String> = None;
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(Error::DuplicateColumn {
                    table: name,
                    column: column.name.clone(),
                });
            }
            if column.primary_key {
                if let Some(first) = &primary_key {
                    return Err(Error::DuplicatePrimaryKey {
                        table: name.clone(),
                        first: first.clone(),
                        second: column.name.clone(),
                    });
                }
                primary_key = Some(column.name.clone());
            }
        }

        Ok(Self {
            name,
            columns,
            primary_key,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 선언 순서대로의 컬럼 목록
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    /// 이름으로 컬럼 조회
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::UnknownColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// 기본 키 컬럼 조회
    pub fn primary_column(&self) -> Result<&Column> {
        match &self.primary_key {
            Some(pk) => self.column(pk),
            None => Err(Error::NoPrimaryKey {
                table: self.name.clone(),
            }),
        }
    }

    /// 조건 집합 검증
    ///
    /// 모든 컬럼이 존재하고 값 종류가 컬럼 타입과 맞아야 합니다.
    pub fn validate_predicates(&self, predicates: &PredicateSet) -> Result<()> {
        for predicate in predicates {
            self.column(&predicate.column)?
                .check_value(&predicate.value)?;
        }
        Ok(())
    }

    /// 컬럼 이름과 값 검증
    pub fn validate_value(&self, column: &str, value: &Value) -> Result<&Column> {
        let col = self.column(column)?;
        col.check_value(value)?;
        Ok(col)
    }

    /// 기본 키 값으로 단일 조건 집합 생성 (검증 포함)
    pub fn key_predicate(&self, key: Value) -> Result<PredicateSet> {
        let pk = self.primary_column()?;
        pk.check_value(&key)?;
        Ok(PredicateSet::eq(pk.name.clone(), key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_schema_without_primary_key() {
        let schema = students();
        assert_eq!(schema.primary_key(), None);
        assert_eq!(
            schema.primary_column().unwrap_err(),
            Error::NoPrimaryKey {
                table: "students".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_primary_key_rejected() {
        let err = TableSchema::new(
            "t",
            vec![Column::int("a", None).primary(), Column::int("b", None).primary()],
        )
        .unwrap_err();
        assert_eq!(err.code(), "DUPLICATE_PRIMARY_KEY");
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = TableSchema::new("t", vec![Column::int("a", None), Column::int("a", Some(1))])
            .unwrap_err();
        assert_eq!(err.code(), "DUPLICATE_COLUMN");
        assert!(TableSchema::new("t", vec![]).is_err());
    }

    #[test]
    fn test_predicate_validation() {
        let schema = students();
        let ok = PredicateSet::eq("first_name", "Matt").and("age", 21);
        assert!(schema.validate_predicates(&ok).is_ok());

        let unknown = PredicateSet::eq("last_name", "Smith");
        assert_eq!(
            schema.validate_predicates(&unknown).unwrap_err().code(),
            "UNKNOWN_COLUMN"
        );

        let mismatch = PredicateSet::eq("age", "twenty");
        assert_eq!(
            schema.validate_predicates(&mismatch).unwrap_err().code(),
            "TYPE_MISMATCH"
        );
    }

    #[test]
    fn test_key_predicate() {
        let schema = TableSchema::new(
            "people",
            vec![
                Column::bigint("id", None).primary().nullable(false),
                Column::string("full_name", None, 64),
            ],
        )
        .unwrap();
        assert_eq!(schema.primary_key(), Some("id"));

        let preds = schema.key_predicate(Value::from(42)).unwrap();
        assert_eq!(preds, PredicateSet::eq("id", 42));
        assert!(schema.key_predicate(Value::from("42")).is_err());
    }
}
