//! 세션 토큰 클레임
use serde::{Deserialize, Serialize};

/// 세션 JWT 의 클레임(Payload)
///
/// 계정 ID 와 등록 클레임(`iat`, `exp`)만 담습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// 계정 ID (ObjectId hex)
    pub id: String,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}
