//! 테이블 카탈로그
//!
//! 선언된 테이블 스키마를 이름으로 보관하고, 초기화 시 모든 테이블을 한 번씩
//! 백엔드와 맞춥니다.

use std::collections::BTreeMap;
use std::sync::Arc;

use tabula_core::TableSchema;

use crate::error::DbError;
use crate::table::Table;

/// 스키마 동기화 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// 테이블이 없어서 새로 생성
    Created,
    /// 누락된 컬럼을 추가
    Altered(Vec<String>),
    /// 이미 일치
    Unchanged,
}

/// `reconcile_all` 결과
#[derive(Debug, Default)]
pub struct ReconcileSummary {
    pub reconciled: Vec<(String, Reconciliation)>,
    pub failed: Vec<(String, DbError)>,
}

impl ReconcileSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn outcome(&self, table: &str) -> Option<&Reconciliation> {
        self.reconciled
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, outcome)| outcome)
    }
}

/// 테이블 레지스트리
#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: BTreeMap<String, Arc<TableSchema>>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 스키마 등록 (같은 이름이 있으면 교체하고 이전 것을 반환)
    pub fn register(&mut self, schema: Arc<TableSchema>) -> Option<Arc<TableSchema>> {
        let replaced = self.tables.insert(schema.name().to_string(), schema);
        if let Some(previous) = &replaced {
            tracing::warn!("Table {} registered twice; keeping the latest", previous.name());
        }
        replaced
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<TableSchema>> {
        self.tables.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn schemas(&self) -> impl Iterator<Item = &Arc<TableSchema>> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// 모든 테이블 동기화
///
/// 한 테이블의 실패는 로그만 남기고 나머지 테이블은 계속 진행합니다.
pub async fn reconcile_all(tables: &[Table]) -> ReconcileSummary {
    let mut summary = ReconcileSummary::default();
    for table in tables {
        match table.reconcile().await {
            Ok(outcome) => {
                tracing::info!("Reconciled table {}: {:?}", table.name(), outcome);
                summary.reconciled.push((table.name().to_string(), outcome));
            }
            Err(e) => {
                tracing::error!("Failed to reconcile table {}: {}", table.name(), e);
                summary.failed.push((table.name().to_string(), e));
            }
        }
    }
    summary
}
