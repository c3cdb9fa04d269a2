//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 [`AppConfig`] 하나로 모아
//! 서버 시작 시 한 번만 읽고, 이후에는 명시적으로 전달합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, Redis, 서버, 환경, CORS 관련 설정
//! - [`auth_config`] - OAuth, JWT, 세션 쿠키, 계정 연결 정책
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="5000"
//!
//! # 저장소 (mongodb | memory)
//! export ACCOUNT_STORE="mongodb"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # 환경 설정
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export BCRYPT_COST="12"          # 4-15 범위
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("Server will bind to {}", config.server.bind_address());
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

use std::env;
use std::str::FromStr;

use crate::errors::{AppError, AppResult};

/// 설정 키 조회 함수 (환경 변수 또는 테스트용 맵)
pub type Lookup = dyn Fn(&str) -> Option<String>;

pub(crate) fn lookup_or(lookup: &Lookup, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub(crate) fn lookup_parse<T: FromStr>(lookup: &Lookup, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn lookup_bool(lookup: &Lookup, key: &str, default: bool) -> bool {
    match lookup(key).map(|value| value.trim().to_lowercase()) {
        Some(value) if matches!(value.as_str(), "true" | "1" | "yes" | "on") => true,
        Some(value) if matches!(value.as_str(), "false" | "0" | "no" | "off") => false,
        _ => default,
    }
}

/// 애플리케이션 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub store_backend: StoreBackend,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub password: PasswordConfig,
    pub jwt: JwtConfig,
    pub oauth: OAuthConfig,
    pub google: Option<OAuthClientConfig>,
    pub github: Option<OAuthClientConfig>,
    pub session_cookie: SessionCookieConfig,
    pub reconciler: ReconcilerConfig,
    pub cors: CorsConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// 프로세스 환경 변수에서 설정을 읽습니다.
    pub fn from_env() -> AppResult<Self> {
        let lookup = |key: &str| env::var(key).ok();
        Self::from_lookup(&lookup)
    }

    pub fn from_lookup(lookup: &Lookup) -> AppResult<Self> {
        let environment = Environment::from_lookup(lookup);
        let jwt = JwtConfig::from_lookup(lookup, &environment).map_err(AppError::InternalError)?;
        let oauth = OAuthConfig::from_lookup(lookup);
        let session_cookie = SessionCookieConfig::from_lookup(lookup, &environment, &jwt);
        let cors = CorsConfig::from_lookup(lookup, &oauth.frontend_url);

        Ok(Self {
            server: ServerConfig::from_lookup(lookup),
            store_backend: StoreBackend::from_lookup(lookup),
            database: DatabaseConfig::from_lookup(lookup),
            redis: RedisConfig::from_lookup(lookup),
            password: PasswordConfig::from_lookup(lookup, &environment),
            google: OAuthClientConfig::from_lookup(lookup, AuthProvider::Google),
            github: OAuthClientConfig::from_lookup(lookup, AuthProvider::GitHub),
            reconciler: ReconcilerConfig::from_lookup(lookup),
            rate_limit: RateLimitConfig::from_lookup(lookup),
            environment,
            jwt,
            oauth,
            session_cookie,
            cors,
        })
    }

    /// 프로바이더의 클라이언트 설정 (비활성화된 경우 `None`)
    pub fn oauth_client(&self, provider: AuthProvider) -> Option<&OAuthClientConfig> {
        match provider {
            AuthProvider::Google => self.google.as_ref(),
            AuthProvider::GitHub => self.github.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_bool_variants() {
        let lookup = |key: &str| match key {
            "A" => Some("YES".to_string()),
            "B" => Some("0".to_string()),
            "C" => Some("maybe".to_string()),
            _ => None,
        };

        assert!(lookup_bool(&lookup, "A", false));
        assert!(!lookup_bool(&lookup, "B", true));
        assert!(lookup_bool(&lookup, "C", true));
        assert!(!lookup_bool(&lookup, "missing", false));
    }

    #[test]
    fn test_app_config_for_test_environment() {
        let lookup = |key: &str| match key {
            "ENVIRONMENT" => Some("test".to_string()),
            "ACCOUNT_STORE" => Some("memory".to_string()),
            "GITHUB_CLIENT_ID" => Some("gh".to_string()),
            "GITHUB_CLIENT_SECRET" => Some("secret".to_string()),
            _ => None,
        };

        let config = AppConfig::from_lookup(&lookup).unwrap();

        assert_eq!(config.environment, Environment::Test);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.password.bcrypt_cost, 4);
        assert!(config.oauth_client(AuthProvider::Google).is_none());
        assert!(config.oauth_client(AuthProvider::GitHub).is_some());
        assert!(!config.session_cookie.secure);
    }

    #[test]
    fn test_app_config_refuses_default_secret_in_production() {
        let lookup = |_: &str| -> Option<String> { None };
        assert!(AppConfig::from_lookup(&lookup).is_err());
    }
}
