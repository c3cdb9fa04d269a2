//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, Redis, 서버, 환경, CORS, Rate Limiting 관련 설정을 관리합니다.

use super::{lookup_or, lookup_parse, Lookup};

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` (없으면 `NODE_ENV`) 값으로 환경을 결정합니다.
    ///
    /// 값이 없거나 알 수 없는 경우 안전하게 `Production`으로 간주합니다.
    pub fn from_lookup(lookup: &Lookup) -> Self {
        let raw = lookup("ENVIRONMENT")
            .or_else(|| lookup("NODE_ENV"))
            .unwrap_or_else(|| "production".to_string());
        Self::parse(&raw)
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 비밀번호 해싱 설정
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// bcrypt cost (4-15)
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    /// `BCRYPT_COST`가 유효 범위(4-15)면 사용하고, 아니면 환경별 기본값을 사용합니다.
    pub fn from_lookup(lookup: &Lookup, environment: &Environment) -> Self {
        let bcrypt_cost = lookup("BCRYPT_COST")
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(environment));

        Self { bcrypt_cost }
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn from_lookup(lookup: &Lookup) -> Self {
        Self {
            host: lookup_or(lookup, "HOST", "0.0.0.0"),
            port: lookup_parse(lookup, "PORT", 5000),
            workers: lookup_parse(lookup, "WORKERS", 4),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 계정 저장소 백엔드 선택
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    /// MongoDB 컬렉션 + Redis OAuth state
    MongoDb,
    /// 프로세스 메모리 (개발/테스트 전용)
    Memory,
}

impl StoreBackend {
    pub fn from_lookup(lookup: &Lookup) -> Self {
        match lookup_or(lookup, "ACCOUNT_STORE", "mongodb").to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => StoreBackend::Memory,
            _ => StoreBackend::MongoDb,
        }
    }
}

/// MongoDB 연결 설정
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database_name: String,
    pub app_name: String,
}

impl DatabaseConfig {
    pub fn from_lookup(lookup: &Lookup) -> Self {
        Self {
            uri: lookup("MONGODB_URI")
                .or_else(|| lookup("MONGODB_URL"))
                .unwrap_or_else(|| "mongodb://localhost:27017".to_string()),
            database_name: lookup_or(lookup, "DATABASE_NAME", "authify_dev"),
            app_name: "authify".to_string(),
        }
    }
}

/// Redis 연결 설정
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

impl RedisConfig {
    pub fn from_lookup(lookup: &Lookup) -> Self {
        Self {
            url: lookup_or(lookup, "REDIS_URL", "redis://localhost:6379"),
        }
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn from_lookup(lookup: &Lookup) -> Self {
        Self {
            per_second: lookup_parse(lookup, "RATE_LIMIT_PER_SECOND", 100),
            burst_size: lookup_parse(lookup, "RATE_LIMIT_BURST_SIZE", 200),
        }
    }
}

/// CORS 허용 Origin 설정
///
/// 프론트엔드가 쿠키를 포함한 요청을 보내므로 credentials를 허용합니다.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// `CORS_ALLOWED_ORIGINS` (쉼표 구분) + 프론트엔드 URL
    pub fn from_lookup(lookup: &Lookup, frontend_url: &str) -> Self {
        let mut allowed_origins: Vec<String> = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().trim_end_matches('/').to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let frontend = frontend_url.trim_end_matches('/').to_string();
        if !allowed_origins.contains(&frontend) {
            allowed_origins.push(frontend);
        }

        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::parse("development"), Environment::Development);
        assert_eq!(Environment::parse("test"), Environment::Test);
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("unknown"), Environment::Production);
    }

    #[test]
    fn test_environment_falls_back_to_node_env() {
        let lookup = lookup_from(&[("NODE_ENV", "dev")]);
        assert_eq!(Environment::from_lookup(&lookup), Environment::Development);

        let lookup = lookup_from(&[]);
        assert_eq!(Environment::from_lookup(&lookup), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }

    #[test]
    fn test_bcrypt_cost_out_of_range_uses_environment_default() {
        let lookup = lookup_from(&[("BCRYPT_COST", "31")]);
        let config = PasswordConfig::from_lookup(&lookup, &Environment::Staging);
        assert_eq!(config.bcrypt_cost, 10);

        let lookup = lookup_from(&[("BCRYPT_COST", "6")]);
        let config = PasswordConfig::from_lookup(&lookup, &Environment::Production);
        assert_eq!(config.bcrypt_cost, 6);
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::from_lookup(&lookup_from(&[]));
        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_store_backend_selection() {
        assert_eq!(StoreBackend::from_lookup(&lookup_from(&[])), StoreBackend::MongoDb);
        assert_eq!(
            StoreBackend::from_lookup(&lookup_from(&[("ACCOUNT_STORE", "memory")])),
            StoreBackend::Memory
        );
    }

    #[test]
    fn test_cors_includes_frontend_once() {
        let lookup = lookup_from(&[(
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:5173/, https://app.example.com",
        )]);
        let config = CorsConfig::from_lookup(&lookup, "http://localhost:5173");

        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:5173".to_string(), "https://app.example.com".to_string()]
        );
    }
}
