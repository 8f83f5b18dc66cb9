//! 테이블 CRUD 엔진
//!
//! 스키마를 기반으로 SQL을 생성하고 실행합니다. 모든 연산은 컬럼 이름과 값
//! 종류를 먼저 검증하므로, 잘못된 호출은 DB에 닿기 전에 실패합니다.
//!
//! # 동시성
//!
//! 연결은 문장 하나 단위로 잠깁니다. `update`(upsert)는 존재 확인, INSERT,
//! UPDATE를 각각 따로 잠그므로 원자적이지 않습니다. 다른 작성자가 그 사이에
//! 끼어들면 중복 행이 생기거나 갱신이 유실될 수 있습니다.

use std::collections::HashSet;
use std::sync::Arc;

use tabula_core::{Error as CoreError, PredicateSet, ScalarKind, TableSchema, Value};
use tabula_sql::{
    DdlGenerator, DeleteBuilder, Dialect, InsertBuilder, ParameterBinder, Projection,
    SelectBuilder, UpdateBuilder,
};

use crate::connection::{BackendConnection, Executed};
use crate::database::Database;
use crate::error::{DbError, Result};
use crate::policy::ErrorPolicy;
use crate::registry::Reconciliation;

/// 테이블 핸들
///
/// [`Database::register`]로 얻습니다. 복제 비용이 싸고, 모든 복제본이 같은
/// 컨텍스트를 공유합니다.
#[derive(Clone)]
pub struct Table {
    schema: Arc<TableSchema>,
    db: Database,
}

impl Table {
    pub(crate) fn new(schema: Arc<TableSchema>, db: Database) -> Self {
        Self { schema, db }
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    // ========================================
    // 조건 집합 기반 연산
    // ========================================

    /// 조건에 맞는 행이 하나라도 있는지 확인
    pub async fn exists(&self, predicates: &PredicateSet) -> Result<bool> {
        let (sql, binder) =
            SelectBuilder::new(&self.schema).build(Projection::All, Some(predicates))?;
        let result = self.run_exists(&sql, binder).await?;
        self.recover(&sql, result, false)
    }

    /// 컬럼 값 갱신 (행이 없으면 조건 쌍으로 먼저 INSERT)
    ///
    /// UPDATE의 영향받은 행 수를 반환합니다. 조건이 여러 행과 맞으면 모두 갱신됩니다.
    pub async fn update(
        &self,
        predicates: &PredicateSet,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<u64> {
        let value = value.into();
        self.upsert(predicates, column, Some(&value)).await
    }

    /// 첫 번째 일치 행의 컬럼 값 (행이 없거나 NULL이면 `None`)
    pub async fn get(&self, column: &str, predicates: &PredicateSet) -> Result<Option<Value>> {
        let kind = self.schema.column(column)?.scalar_kind();
        let (sql, binder) =
            SelectBuilder::new(&self.schema).build(Projection::Column(column), Some(predicates))?;

        let result = self.run_scalar(&sql, binder, kind).await?;
        self.recover(&sql, result, None)
    }

    /// [`Table::get`] 결과를 `i64` / `String` / `bool`로 변환
    pub async fn get_as<T>(&self, column: &str, predicates: &PredicateSet) -> Result<Option<T>>
    where
        T: TryFrom<Value, Error = CoreError>,
    {
        let value = self.get(column, predicates).await?;
        Ok(value.map(T::try_from).transpose()?)
    }

    /// 컬럼 전체 값 (NULL 제외)
    pub async fn get_all(&self, column: &str) -> Result<Vec<Value>> {
        self.scan(column, None).await
    }

    /// 조건에 맞는 행들의 컬럼 값 (NULL 제외)
    pub async fn get_all_where(&self, column: &str, predicates: &PredicateSet) -> Result<Vec<Value>> {
        self.scan(column, Some(predicates)).await
    }

    /// 조건에 맞는 행 삭제 (영향받은 행 수 반환)
    pub async fn delete(&self, predicates: &PredicateSet) -> Result<u64> {
        let (sql, binder) = DeleteBuilder::new(&self.schema).build(predicates)?;
        let result = self.run_execute(&sql, binder).await?;
        self.recover(&sql, result, 0)
    }

    /// 컬럼을 기본값으로 되돌림 (기본값이 없으면 NULL)
    pub async fn reset(&self, predicates: &PredicateSet, column: &str) -> Result<u64> {
        let default = self.schema.column(column)?.default.clone();
        self.upsert(predicates, column, default.as_ref()).await
    }

    // ========================================
    // 기본 키 기반 연산
    // ========================================

    pub async fn exists_by_key(&self, key: impl Into<Value>) -> Result<bool> {
        let predicates = self.schema.key_predicate(key.into())?;
        self.exists(&predicates).await
    }

    /// 기본 키 행의 컬럼 갱신 (행이 없으면 기본 키만 채워 INSERT)
    pub async fn update_by_key(
        &self,
        key: impl Into<Value>,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<u64> {
        let predicates = self.schema.key_predicate(key.into())?;
        self.update(&predicates, column, value).await
    }

    pub async fn get_by_key(&self, key: impl Into<Value>, column: &str) -> Result<Option<Value>> {
        let predicates = self.schema.key_predicate(key.into())?;
        self.get(column, &predicates).await
    }

    pub async fn delete_by_key(&self, key: impl Into<Value>) -> Result<u64> {
        let predicates = self.schema.key_predicate(key.into())?;
        self.delete(&predicates).await
    }

    pub async fn reset_by_key(&self, key: impl Into<Value>, column: &str) -> Result<u64> {
        let predicates = self.schema.key_predicate(key.into())?;
        self.reset(&predicates, column).await
    }

    // ========================================
    // 스키마 동기화
    // ========================================

    /// 백엔드 스키마를 선언된 컬럼에 맞춤
    ///
    /// 테이블이 있으면 누락된 컬럼만 추가하고, 없으면 생성합니다.
    /// 실행 에러는 정책과 무관하게 항상 반환합니다.
    pub async fn reconcile(&self) -> Result<Reconciliation> {
        let mut session = self.db.session().await?;
        let dialect = session.dialect();
        let conn = session.acquire().await?;

        match self.reconcile_on(conn, dialect).await {
            Ok(outcome) => Ok(outcome),
            Err((sql, source)) => {
                session.invalidate_if_broken(&source);
                Err(DbError::Execution { sql, source })
            }
        }
    }

    async fn reconcile_on(
        &self,
        conn: &mut BackendConnection,
        dialect: Dialect,
    ) -> std::result::Result<Reconciliation, (String, sqlx::Error)> {
        let exists_sql = dialect.table_exists_sql();
        tracing::debug!(table = %self.name(), "{}", exists_sql);
        let found = conn
            .exists(exists_sql, self.name_binder())
            .await
            .map_err(|e| (exists_sql.to_string(), e))?;

        if !found {
            let sql = DdlGenerator::create_table(&self.schema, dialect);
            tracing::debug!(table = %self.name(), "{}", sql);
            if let Err(e) = conn.execute(&sql, ParameterBinder::new()).await {
                return Err((sql, e));
            }
            tracing::info!("Created table {}", self.name());
            return Ok(Reconciliation::Created);
        }

        let columns_sql = dialect.column_names_sql();
        tracing::debug!(table = %self.name(), "{}", columns_sql);
        let existing: HashSet<String> = conn
            .fetch_scalars(columns_sql, self.name_binder(), ScalarKind::String)
            .await
            .map_err(|e| (columns_sql.to_string(), e))?
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_ascii_lowercase)
            .collect();

        let mut added = Vec::new();
        for column in self.schema.columns() {
            if existing.contains(&column.name.to_ascii_lowercase()) {
                continue;
            }
            let sql = DdlGenerator::add_column(&self.schema, column);
            tracing::debug!(table = %self.name(), "{}", sql);
            if let Err(e) = conn.execute(&sql, ParameterBinder::new()).await {
                return Err((sql, e));
            }
            tracing::info!("Added column {} to table {}", column.name, self.name());
            added.push(column.name.clone());
        }

        if added.is_empty() {
            Ok(Reconciliation::Unchanged)
        } else {
            Ok(Reconciliation::Altered(added))
        }
    }

    /// 메타데이터 쿼리용 바인더 (1번 슬롯: 테이블 이름)
    fn name_binder(&self) -> ParameterBinder {
        let mut binder = ParameterBinder::new();
        binder.put(1, self.name());
        binder
    }

    // ========================================
    // 내부 헬퍼
    // ========================================

    async fn upsert(
        &self,
        predicates: &PredicateSet,
        column: &str,
        new_value: Option<&Value>,
    ) -> Result<u64> {
        // 두 문장 모두 먼저 만들어 검증 실패 시 DB에 닿지 않게 함
        let (update_sql, update_binder) =
            UpdateBuilder::new(&self.schema).build(column, new_value, predicates)?;
        let (insert_sql, insert_binder) = InsertBuilder::new(&self.schema).build(predicates)?;

        if !self.exists(predicates).await? {
            let result = self.run_execute(&insert_sql, insert_binder).await?;
            self.recover(&insert_sql, result, 0)?;
        }

        let result = self.run_execute(&update_sql, update_binder).await?;
        self.recover(&update_sql, result, 0)
    }

    async fn scan(&self, column: &str, predicates: Option<&PredicateSet>) -> Result<Vec<Value>> {
        let kind = self.schema.column(column)?.scalar_kind();
        let (sql, binder) =
            SelectBuilder::new(&self.schema).build(Projection::Column(column), predicates)?;

        let result = self.run_scalars(&sql, binder, kind).await?;
        self.recover(&sql, result, Vec::new())
    }

    /// 바깥 `Result`는 미초기화/연결 에러, 안쪽은 드라이버 실행 에러
    async fn run_exists(&self, sql: &str, binder: ParameterBinder) -> Result<Executed<bool>> {
        let mut session = self.db.session().await?;
        let conn = session.acquire().await?;
        tracing::debug!(table = %self.name(), "{}", sql);

        let result = conn.exists(sql, binder).await;
        if let Err(e) = &result {
            session.invalidate_if_broken(e);
        }
        Ok(result)
    }

    async fn run_scalar(
        &self,
        sql: &str,
        binder: ParameterBinder,
        kind: ScalarKind,
    ) -> Result<Executed<Option<Value>>> {
        let mut session = self.db.session().await?;
        let conn = session.acquire().await?;
        tracing::debug!(table = %self.name(), "{}", sql);

        let result = conn.fetch_scalar(sql, binder, kind).await;
        if let Err(e) = &result {
            session.invalidate_if_broken(e);
        }
        Ok(result)
    }

    async fn run_scalars(
        &self,
        sql: &str,
        binder: ParameterBinder,
        kind: ScalarKind,
    ) -> Result<Executed<Vec<Value>>> {
        let mut session = self.db.session().await?;
        let conn = session.acquire().await?;
        tracing::debug!(table = %self.name(), "{}", sql);

        let result = conn.fetch_scalars(sql, binder, kind).await;
        if let Err(e) = &result {
            session.invalidate_if_broken(e);
        }
        Ok(result)
    }

    /// 영향받은 행 수 반환
    async fn run_execute(&self, sql: &str, binder: ParameterBinder) -> Result<Executed<u64>> {
        let mut session = self.db.session().await?;
        let conn = session.acquire().await?;
        tracing::debug!(table = %self.name(), "{}", sql);

        let result = conn.execute(sql, binder).await;
        if let Err(e) = &result {
            session.invalidate_if_broken(e);
        }
        Ok(result)
    }

    /// 실행 에러에 정책 적용
    fn recover<T>(&self, sql: &str, result: Executed<T>, fallback: T) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(source) => match self.db.policy() {
                ErrorPolicy::LogAndDefault => {
                    tracing::error!(
                        table = %self.name(),
                        "Failed to execute SQL query: {}: {}",
                        sql,
                        source
                    );
                    Ok(fallback)
                }
                ErrorPolicy::Propagate => Err(DbError::Execution {
                    sql: sql.to_string(),
                    source,
                }),
            },
        }
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table").field("schema", &self.schema).finish()
    }
}
