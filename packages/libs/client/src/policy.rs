//! 실행 에러 처리 정책

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DbError;

/// SQL 실행 실패 시의 처리 방식
///
/// 검증/연결/생명주기 에러에는 적용되지 않습니다 (항상 반환).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// 로그를 남기고 중립 값(`None`, `false`, 빈 목록, `0`)을 반환 (기본값)
    #[default]
    #[serde(alias = "log")]
    LogAndDefault,

    /// `DbError::Execution`으로 반환
    Propagate,
}

impl FromStr for ErrorPolicy {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" | "log_and_default" => Ok(ErrorPolicy::LogAndDefault),
            "propagate" => Ok(ErrorPolicy::Propagate),
            other => Err(DbError::config(format!("unknown error policy '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!("log".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::LogAndDefault);
        assert_eq!("Propagate".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Propagate);
        assert!("retry".parse::<ErrorPolicy>().is_err());
    }
}
