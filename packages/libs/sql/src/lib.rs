//! tabula-sql: 파라미터화된 SQL 생성 라이브러리
//!
//! 테이블 스키마를 기반으로 런타임에 SQL을 생성합니다.
//! 모든 값은 `?` 바인딩으로만 전달되어 SQL Injection을 원천 차단합니다.
//!
//! # 모듈 구조
//!
//! - `builder`: CRUD SQL 빌더
//! - `ddl`: DDL(CREATE TABLE, ALTER TABLE) 생성기
//! - `dialect`: 백엔드 방언 (키워드, 메타데이터 쿼리)
//! - `params`: 바인드 슬롯 관리 및 문장 바인딩

pub mod builder;
pub mod ddl;
pub mod dialect;
pub mod params;

pub use builder::{DeleteBuilder, InsertBuilder, Projection, SelectBuilder, UpdateBuilder};
pub use ddl::{DdlGenerator, AUTO_ID_COLUMN};
pub use dialect::Dialect;
pub use params::{Bind, Bindable, ParameterBinder};
