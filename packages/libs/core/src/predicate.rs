//! 조건 집합
//!
//! `(컬럼, 값)` 쌍의 순서 있는 목록입니다. WHERE 절(`AND` 결합)로도 쓰이고,
//! upsert 시 새 행의 초기 컬럼 값으로도 쓰입니다.
//!
//! # 예시
//!
//! ```
//! use tabula_core::PredicateSet;
//!
//! let preds = PredicateSet::eq("team", "Red").and("score", 10);
//! assert_eq!(preds.len(), 2);
//! ```

use serde::Serialize;

use crate::error::{Error, Result};
use crate::value::Value;

/// 단일 `(컬럼, 값)` 쌍
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Predicate {
    pub column: String,
    pub value: Value,
}

impl Predicate {
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// 비어 있지 않은 조건 집합
///
/// 생성 경로가 모두 최소 한 개의 쌍을 보장합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PredicateSet(Vec<Predicate>);

impl PredicateSet {
    /// 단일 equality 조건
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self(vec![Predicate::new(column, value)])
    }

    /// 조건 추가 (AND)
    pub fn and(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.push(Predicate::new(column, value));
        self
    }

    /// 쌍 목록에서 생성
    ///
    /// 목록이 비어 있으면 실패합니다.
    pub fn from_pairs<I, C, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, V)>,
        C: Into<String>,
        V: Into<Value>,
    {
        let predicates: Vec<_> = pairs
            .into_iter()
            .map(|(column, value)| Predicate::new(column, value))
            .collect();
        if predicates.is_empty() {
            return Err(Error::EmptyPredicateSet);
        }
        Ok(Self(predicates))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 항상 `false` (생성 시 비어 있지 않음을 보장)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Predicate> {
        self.0.iter()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|p| p.column.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.iter().map(|p| &p.value)
    }
}

impl<'a> IntoIterator for &'a PredicateSet {
    type Item = &'a Predicate;
    type IntoIter = std::slice::Iter<'a, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl TryFrom<Vec<Predicate>> for PredicateSet {
    type Error = Error;

    fn try_from(predicates: Vec<Predicate>) -> Result<Self> {
        if predicates.is_empty() {
            return Err(Error::EmptyPredicateSet);
        }
        Ok(Self(predicates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_order() {
        let preds = PredicateSet::eq("first_name", "Matt").and("last_name", "Smith");
        let columns: Vec<_> = preds.columns().collect();
        assert_eq!(columns, vec!["first_name", "last_name"]);
        assert!(!preds.is_empty());
    }

    #[test]
    fn test_empty_pairs_rejected() {
        let pairs: Vec<(&str, i64)> = vec![];
        assert_eq!(
            PredicateSet::from_pairs(pairs).unwrap_err(),
            Error::EmptyPredicateSet
        );
        assert!(PredicateSet::try_from(Vec::new()).is_err());
    }

    #[test]
    fn test_from_pairs() {
        let preds = PredicateSet::from_pairs([("team", "Red"), ("mascot", "Fox")]).unwrap();
        assert_eq!(preds.len(), 2);
        assert_eq!(preds.values().next(), Some(&Value::from("Red")));
    }
}
