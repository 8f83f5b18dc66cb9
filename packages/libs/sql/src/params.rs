//! 바인딩 파라미터
//!
//! 1부터 시작하는 바인드 슬롯 번호 → 스칼라 값 매핑입니다.
//! 슬롯 순서는 생성된 SQL의 `?` 순서와 일치해야 합니다.

use std::collections::BTreeMap;

use sqlx::query::Query;
use sqlx::{Database, Encode, Type};
use tabula_core::{ScalarKind, Value};

/// 슬롯에 기록된 값
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bind {
    /// 스칼라 값
    Scalar(Value),
    /// 타입이 있는 NULL (기본값 없는 컬럼 초기화용)
    Null(ScalarKind),
}

/// 스칼라 종류별 바인드 원시 연산을 제공하는 대상
///
/// 드라이버의 prepared statement가 이 트레이트를 구현합니다.
pub trait Bindable: Sized {
    fn bind_integer(self, value: i64) -> Self;
    fn bind_string(self, value: String) -> Self;
    fn bind_boolean(self, value: bool) -> Self;
    fn bind_null(self, kind: ScalarKind) -> Self;
}

/// 백엔드 드라이버(SQLite, MySQL)의 prepared statement
impl<'q, DB> Bindable for Query<'q, DB, <DB as Database>::Arguments<'q>>
where
    DB: Database,
    i64: Encode<'q, DB> + Type<DB>,
    String: Encode<'q, DB> + Type<DB>,
    bool: Encode<'q, DB> + Type<DB>,
    Option<i64>: Encode<'q, DB> + Type<DB>,
    Option<String>: Encode<'q, DB> + Type<DB>,
    Option<bool>: Encode<'q, DB> + Type<DB>,
{
    fn bind_integer(self, value: i64) -> Self {
        self.bind(value)
    }

    fn bind_string(self, value: String) -> Self {
        self.bind(value)
    }

    fn bind_boolean(self, value: bool) -> Self {
        self.bind(value)
    }

    fn bind_null(self, kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Integer => self.bind(Option::<i64>::None),
            ScalarKind::String => self.bind(Option::<String>::None),
            ScalarKind::Boolean => self.bind(Option::<bool>::None),
        }
    }
}

/// 파라미터 바인더
///
/// 문장마다 새로 만들며, [`ParameterBinder::bind`]가 소비하므로 재사용되지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBinder {
    slots: BTreeMap<usize, Bind>,
}

impl ParameterBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 슬롯에 값 기록 (기존 값은 조용히 덮어씀)
    pub fn put(&mut self, index: usize, value: impl Into<Value>) {
        self.slots.insert(index, Bind::Scalar(value.into()));
    }

    /// 슬롯에 NULL 기록
    pub fn put_null(&mut self, index: usize, kind: ScalarKind) {
        self.slots.insert(index, Bind::Null(kind));
    }

    pub fn get(&self, index: usize) -> Option<&Bind> {
        self.slots.get(&index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 슬롯 순서대로 값 순회
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Bind)> {
        self.slots.iter().map(|(i, b)| (*i, b))
    }

    /// 대상 문장에 모든 슬롯을 바인딩
    ///
    /// 1번부터 연속된 슬롯만 바인딩합니다. 빈 슬롯을 만나면 거기서 멈추고,
    /// 드라이버가 파라미터 개수 불일치로 문장을 거부하게 둡니다.
    pub fn bind<B: Bindable>(self, mut target: B) -> B {
        let mut expected = 1;
        for (index, bind) in self.slots {
            if index != expected {
                tracing::warn!(
                    "bind slot {} is unmapped; leaving it and later slots unbound",
                    expected
                );
                break;
            }
            target = match bind {
                Bind::Scalar(Value::Integer(i)) => target.bind_integer(i),
                Bind::Scalar(Value::String(s)) => target.bind_string(s),
                Bind::Scalar(Value::Boolean(b)) => target.bind_boolean(b),
                Bind::Null(kind) => target.bind_null(kind),
            };
            expected += 1;
        }
        target
    }
}
