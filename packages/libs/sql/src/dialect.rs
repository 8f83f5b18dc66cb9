//! 백엔드 방언
//!
//! DDL 키워드와 메타데이터 조회 쿼리가 백엔드마다 다릅니다.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// 임베디드 파일 DB
    Sqlite,
    /// 네트워크 DB
    MySql,
}

impl Dialect {
    /// 자동 증가 키워드
    pub fn auto_increment(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "AUTOINCREMENT",
            Dialect::MySql => "AUTO_INCREMENT",
        }
    }

    /// 테이블 존재 확인 쿼리 (바인드: 테이블 이름, 대소문자 무시)
    pub fn table_exists_sql(&self) -> &'static str {
        match self {
            Dialect::Sqlite => {
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ? COLLATE NOCASE;"
            }
            Dialect::MySql => {
                "SELECT table_name FROM information_schema.tables \
                 WHERE table_schema = DATABASE() AND table_name = ?;"
            }
        }
    }

    /// 테이블의 컬럼 이름 목록 쿼리 (바인드: 테이블 이름)
    pub fn column_names_sql(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "SELECT name FROM pragma_table_info(?);",
            Dialect::MySql => {
                "SELECT column_name FROM information_schema.columns \
                 WHERE table_schema = DATABASE() AND table_name = ?;"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_increment_keyword() {
        assert_eq!(Dialect::Sqlite.auto_increment(), "AUTOINCREMENT");
        assert_eq!(Dialect::MySql.auto_increment(), "AUTO_INCREMENT");
    }

    #[test]
    fn test_metadata_queries_are_parameterized() {
        for dialect in [Dialect::Sqlite, Dialect::MySql] {
            assert!(dialect.table_exists_sql().contains("= ?"));
            assert!(dialect.column_names_sql().contains('?'));
        }
    }

    #[test]
    fn test_sqlite_table_lookup_ignores_case() {
        assert!(Dialect::Sqlite
            .table_exists_sql()
            .ends_with("name = ? COLLATE NOCASE;"));
    }
}
