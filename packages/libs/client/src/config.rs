//! 연결 설정
//!
//! 환경변수 또는 JSON 설정 파일에서 백엔드 연결 정보와 에러 정책을 읽습니다.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DbError, Result};
use crate::policy::ErrorPolicy;

/// MySQL 서버 시간대 상수
pub mod timezone {
    pub const EST: &str = "EST5EDT";
    pub const CST: &str = "CST6CDT";
    pub const MST: &str = "MST7MDT";
    pub const PST: &str = "PST8PDT";
    pub const UTC: &str = "UTC";
}

const DEFAULT_SQLITE_PATH: &str = "./data/tabula.db";
const DEFAULT_MYSQL_PORT: u16 = 3306;

/// 백엔드별 연결 파라미터
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum BackendConfig {
    /// 임베디드 파일 DB (상위 디렉터리는 연결 시 생성)
    Sqlite { path: PathBuf },

    /// 네트워크 DB
    MySql {
        #[serde(default = "default_host")]
        host: String,
        #[serde(default = "default_port")]
        port: u16,
        user: String,
        #[serde(default)]
        password: String,
        database: String,
        #[serde(default = "default_timezone")]
        timezone: String,
    },
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    DEFAULT_MYSQL_PORT
}

fn default_timezone() -> String {
    timezone::UTC.to_string()
}

// 비밀번호가 로그에 남지 않도록 직접 구현
impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendConfig::Sqlite { path } => f.debug_struct("Sqlite").field("path", path).finish(),
            BackendConfig::MySql {
                host,
                port,
                user,
                database,
                timezone,
                ..
            } => f
                .debug_struct("MySql")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .field("password", &"***")
                .field("database", database)
                .field("timezone", timezone)
                .finish(),
        }
    }
}

/// 전체 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub error_policy: ErrorPolicy,
}

impl Config {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 키 조회 함수로 설정 로드
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let required = |key: &str| {
            lookup(key).ok_or_else(|| DbError::config(format!("{} must be set", key)))
        };

        let backend = match var("TABULA_BACKEND", "sqlite").to_ascii_lowercase().as_str() {
            "sqlite" => BackendConfig::Sqlite {
                path: var("TABULA_SQLITE_PATH", DEFAULT_SQLITE_PATH).into(),
            },
            "mysql" => BackendConfig::MySql {
                host: var("TABULA_MYSQL_HOST", "localhost"),
                port: lookup("TABULA_MYSQL_PORT")
                    .map(|p| {
                        p.parse::<u16>()
                            .map_err(|_| DbError::config(format!("invalid TABULA_MYSQL_PORT '{}'", p)))
                    })
                    .transpose()?
                    .unwrap_or(DEFAULT_MYSQL_PORT),
                user: required("TABULA_MYSQL_USER")?,
                password: var("TABULA_MYSQL_PASSWORD", ""),
                database: required("TABULA_MYSQL_DATABASE")?,
                timezone: var("TABULA_MYSQL_TIMEZONE", timezone::UTC),
            },
            other => {
                return Err(DbError::config(format!("unknown backend '{}'", other)));
            }
        };

        let error_policy = lookup("TABULA_ERROR_POLICY")
            .map(|p| p.parse::<ErrorPolicy>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            backend,
            error_policy,
        })
    }

    /// JSON 설정 파일 로드
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DbError::config(format!("cannot read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| DbError::config(format!("invalid config {}: {}", path.display(), e)))
    }
}
