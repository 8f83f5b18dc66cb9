//! DDL 생성기
//!
//! 테이블 생성(`CREATE TABLE IF NOT EXISTS`)과 컬럼 추가(`ALTER TABLE ... ADD`)
//! 문장을 만듭니다. 기본 키가 없는 테이블에는 방언에 맞는 자동 증가 `auto_id`
//! 컬럼을 앞에 붙입니다.

use tabula_core::{Column, TableSchema};

use crate::dialect::Dialect;

/// 기본 키가 선언되지 않은 테이블에 붙는 합성 키 이름
pub const AUTO_ID_COLUMN: &str = "auto_id";

pub struct DdlGenerator;

impl DdlGenerator {
    /// `CREATE TABLE IF NOT EXISTS <table> (<col defs>);`
    pub fn create_table(table: &TableSchema, dialect: Dialect) -> String {
        let mut defs = Vec::with_capacity(table.columns().len() + 1);
        if table.primary_key().is_none() {
            defs.push(format!(
                "{} INTEGER PRIMARY KEY {}",
                AUTO_ID_COLUMN,
                dialect.auto_increment()
            ));
        }
        defs.extend(table.columns().iter().map(Self::column_def));

        format!(
            "CREATE TABLE IF NOT EXISTS {} ({});",
            table.name(),
            defs.join(", ")
        )
    }

    /// `ALTER TABLE <table> ADD <col> <descriptor>;`
    pub fn add_column(table: &TableSchema, column: &Column) -> String {
        format!("ALTER TABLE {} ADD {};", table.name(), Self::column_def(column))
    }

    fn column_def(column: &Column) -> String {
        format!("{} {}", column.name, column.descriptor())
    }
}
