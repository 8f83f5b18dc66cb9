//! CRUD SQL 빌더
//!
//! 테이블 스키마와 조건 집합을 받아 SQL 텍스트와 바인더를 생성합니다.
//! 값은 항상 `?` 바인딩으로만 전달되고, 식별자는 스키마에 선언된 것만 허용합니다.
//!
//! 생성되는 SQL의 모양은 고정입니다 (수작업 튜닝된 배포와의 호환용):
//!
//! ```text
//! SELECT <cols> FROM <table>[ WHERE <p1> AND <p2> ...];
//! INSERT INTO <table> (<c1>, <c2>, ...) VALUES (?, ?, ...);
//! UPDATE <table> SET <col> = ? WHERE <p1> AND <p2> ...;
//! DELETE FROM <table> WHERE <p1> AND <p2> ...;
//! ```

use tabula_core::{PredicateSet, Result, TableSchema, Value};

use crate::params::ParameterBinder;

/// SELECT 대상
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection<'c> {
    /// `*`
    All,
    /// 단일 컬럼
    Column(&'c str),
}

/// `p1 AND p2 ...` 조각을 만들고 값을 `start`번 슬롯부터 기록
fn where_clause(
    table: &TableSchema,
    predicates: &PredicateSet,
    binder: &mut ParameterBinder,
    start: usize,
) -> Result<String> {
    let mut parts = Vec::with_capacity(predicates.len());
    for (offset, predicate) in predicates.iter().enumerate() {
        let column = table.column(&predicate.column)?;
        column.check_value(&predicate.value)?;
        parts.push(column.predicate());
        binder.put(start + offset, predicate.value.clone());
    }
    Ok(parts.join(" AND "))
}

/// SELECT 쿼리 빌더
pub struct SelectBuilder<'a> {
    table: &'a TableSchema,
}

impl<'a> SelectBuilder<'a> {
    /// 새 빌더 생성
    pub fn new(table: &'a TableSchema) -> Self {
        Self { table }
    }

    /// SQL 생성
    ///
    /// # Returns
    /// (SQL 문자열, 바인더)
    pub fn build(
        &self,
        projection: Projection<'_>,
        predicates: Option<&PredicateSet>,
    ) -> Result<(String, ParameterBinder)> {
        let columns = match projection {
            Projection::All => "*",
            Projection::Column(name) => self.table.column(name)?.name.as_str(),
        };

        let mut binder = ParameterBinder::new();
        let mut sql = format!("SELECT {} FROM {}", columns, self.table.name());
        if let Some(predicates) = predicates {
            let clause = where_clause(self.table, predicates, &mut binder, 1)?;
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
        }
        sql.push(';');

        Ok((sql, binder))
    }
}

/// INSERT 쿼리 빌더
pub struct InsertBuilder<'a> {
    table: &'a TableSchema,
}

impl<'a> InsertBuilder<'a> {
    pub fn new(table: &'a TableSchema) -> Self {
        Self { table }
    }

    /// 조건 집합의 쌍들을 새 행의 초기 값으로 사용
    pub fn build(&self, values: &PredicateSet) -> Result<(String, ParameterBinder)> {
        let mut binder = ParameterBinder::new();
        let mut columns = Vec::with_capacity(values.len());
        for (i, pair) in values.iter().enumerate() {
            let column = self.table.validate_value(&pair.column, &pair.value)?;
            columns.push(column.name.as_str());
            binder.put(i + 1, pair.value.clone());
        }

        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({});",
            self.table.name(),
            columns.join(", "),
            placeholders
        );

        Ok((sql, binder))
    }
}

/// UPDATE 쿼리 빌더
pub struct UpdateBuilder<'a> {
    table: &'a TableSchema,
}

impl<'a> UpdateBuilder<'a> {
    pub fn new(table: &'a TableSchema) -> Self {
        Self { table }
    }

    /// SQL 생성
    ///
    /// 새 값이 1번 슬롯, 조건 값들이 2번 슬롯부터 순서대로 들어갑니다.
    /// `new_value`가 `None`이면 컬럼 타입의 NULL을 바인딩합니다.
    pub fn build(
        &self,
        column: &str,
        new_value: Option<&Value>,
        predicates: &PredicateSet,
    ) -> Result<(String, ParameterBinder)> {
        let target = self.table.column(column)?;
        let mut binder = ParameterBinder::new();
        match new_value {
            Some(value) => {
                target.check_value(value)?;
                binder.put(1, value.clone());
            }
            None => binder.put_null(1, target.scalar_kind()),
        }

        let clause = where_clause(self.table, predicates, &mut binder, 2)?;
        let sql = format!(
            "UPDATE {} SET {} WHERE {};",
            self.table.name(),
            target.predicate(),
            clause
        );

        Ok((sql, binder))
    }
}

/// DELETE 쿼리 빌더
pub struct DeleteBuilder<'a> {
    table: &'a TableSchema,
}

impl<'a> DeleteBuilder<'a> {
    pub fn new(table: &'a TableSchema) -> Self {
        Self { table }
    }

    pub fn build(&self, predicates: &PredicateSet) -> Result<(String, ParameterBinder)> {
        let mut binder = ParameterBinder::new();
        let clause = where_clause(self.table, predicates, &mut binder, 1)?;
        let sql = format!("DELETE FROM {} WHERE {};", self.table.name(), clause);
        Ok((sql, binder))
    }
}
