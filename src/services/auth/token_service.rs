//! 세션 토큰 서비스
//!
//! 계정 ID 하나만 담은 HS256 JWT 를 발급하고 검증합니다.
//! 토큰은 세션 쿠키로 전달됩니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtConfig;
use crate::domain::models::token::SessionClaims;
use crate::errors::{AppError, AppResult, ErrorContext};

pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl SessionTokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl_seconds: config.expiration_seconds(),
        }
    }

    /// 계정 ID로 세션 토큰 발급
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 서명 실패
    pub fn issue(&self, account_id: &str) -> AppResult<String> {
        self.issue_with_ttl(account_id, self.ttl_seconds)
    }

    pub(crate) fn issue_with_ttl(&self, account_id: &str, ttl_seconds: i64) -> AppResult<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            id: account_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("JWT 토큰 생성 실패")
    }

    /// 토큰을 검증하고 계정 ID를 반환합니다.
    ///
    /// 위조, 만료, 형식 오류 모두 [`AppError::InvalidToken`] 입니다.
    pub fn verify(&self, token: &str) -> AppResult<String> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.id)
            .map_err(|e| {
                log::debug!("세션 토큰 거부: {}", e);
                AppError::InvalidToken
            })
    }
}
