//! 데이터베이스 컨텍스트
//!
//! 레지스트리, 연결 관리자, 에러 정책을 한곳에 묶은 명시적 컨텍스트입니다.
//! 테이블 핸들은 이 컨텍스트를 복제해 들고 다닙니다.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};

use tabula_core::TableSchema;

use crate::config::Config;
use crate::connection::ConnectionManager;
use crate::error::{DbError, Result};
use crate::policy::ErrorPolicy;
use crate::registry::{self, ReconcileSummary, TableRegistry};
use crate::table::Table;

/// 데이터베이스 컨텍스트 (복제 비용이 싼 핸들)
#[derive(Clone)]
pub struct Database {
    inner: Arc<Inner>,
}

struct Inner {
    registry: RwLock<TableRegistry>,
    connection: Mutex<Option<ConnectionManager>>,
    policy: ErrorPolicy,
}

impl Database {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: RwLock::new(TableRegistry::new()),
                connection: Mutex::new(None),
                policy,
            }),
        }
    }

    /// 설정에서 컨텍스트와 (아직 연결하지 않은) 연결 관리자 생성
    pub fn from_config(config: &Config) -> (Self, ConnectionManager) {
        (
            Self::new(config.error_policy),
            ConnectionManager::new(config.backend.clone()),
        )
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.inner.policy
    }

    /// 테이블 등록
    pub fn register(&self, schema: TableSchema) -> Table {
        let schema = Arc::new(schema);
        self.inner.registry.write().register(schema.clone());
        Table::new(schema, self.clone())
    }

    pub fn lookup(&self, name: &str) -> Option<Table> {
        let schema = self.inner.registry.read().lookup(name)?;
        Some(Table::new(schema, self.clone()))
    }

    pub fn table_names(&self) -> Vec<String> {
        self.inner
            .registry
            .read()
            .names()
            .map(str::to_string)
            .collect()
    }

    /// 연결 관리자 설치 후 등록된 모든 테이블 동기화
    ///
    /// 연결은 첫 문장 실행 시 맺어집니다. 테이블별 동기화 실패는 요약에 담기고
    /// 이 함수 자체는 실패하지 않습니다.
    pub async fn init(&self, manager: ConnectionManager) -> Result<ReconcileSummary> {
        {
            let mut slot = self.inner.connection.lock().await;
            if slot.is_some() {
                return Err(DbError::AlreadyInitialized);
            }
            *slot = Some(manager);
        }

        tracing::info!("Database context initialized");
        Ok(self.reconcile_all().await)
    }

    /// 연결 종료 후 미초기화 상태로 복귀
    pub async fn teardown(&self) -> Result<()> {
        let manager = self.inner.connection.lock().await.take();
        match manager {
            Some(mut manager) => {
                manager.close().await?;
                tracing::info!("Database context torn down");
                Ok(())
            }
            None => Err(DbError::NotInitialized),
        }
    }

    pub async fn is_initialized(&self) -> bool {
        self.inner.connection.lock().await.is_some()
    }

    /// 등록된 모든 테이블 동기화
    pub async fn reconcile_all(&self) -> ReconcileSummary {
        let tables: Vec<Table> = {
            let registry = self.inner.registry.read();
            registry
                .schemas()
                .map(|schema| Table::new(schema.clone(), self.clone()))
                .collect()
        };
        registry::reconcile_all(&tables).await
    }

    /// 연결 관리자 독점 사용 (문장 하나 단위로 잡음)
    pub(crate) async fn session(&self) -> Result<MappedMutexGuard<'_, ConnectionManager>> {
        let guard = self.inner.connection.lock().await;
        MutexGuard::try_map(guard, |slot| slot.as_mut()).map_err(|_| DbError::NotInitialized)
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new(ErrorPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use tabula_core::Column;

    use super::*;

    fn people() -> TableSchema {
        TableSchema::new(
            "people",
            vec![
                Column::bigint("id", None).primary().nullable(false),
                Column::string("full_name", None, 64),
            ],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_operations_before_init_fail() {
        let db = Database::default();
        let table = db.register(people());

        assert!(!db.is_initialized().await);
        let err = table.exists_by_key(1).await.unwrap_err();
        assert!(matches!(err, DbError::NotInitialized));
        assert!(matches!(db.teardown().await, Err(DbError::NotInitialized)));
    }

    #[tokio::test]
    async fn test_double_init_fails() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::default();
        db.register(people());

        let summary = db
            .init(ConnectionManager::sqlite(dir.path().join("app.db")))
            .await
            .unwrap();
        assert!(summary.is_clean());

        let err = db
            .init(ConnectionManager::sqlite(dir.path().join("other.db")))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ALREADY_INITIALIZED");

        db.teardown().await.unwrap();
        assert!(!db.is_initialized().await);

        // teardown 후에는 다시 init 가능
        db.init(ConnectionManager::sqlite(dir.path().join("app.db")))
            .await
            .unwrap();
        db.teardown().await.unwrap();
    }

    #[tokio::test]
    async fn test_lookup_registered_table() {
        let db = Database::default();
        db.register(people());

        assert_eq!(db.table_names(), vec!["people".to_string()]);
        let table = db.lookup("people").unwrap();
        assert_eq!(table.schema().primary_key(), Some("id"));
        assert!(db.lookup("students").is_none());
    }
}
