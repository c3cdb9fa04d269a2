//! 캐싱 계층 모듈
//!
//! Redis 클라이언트와, 그 위에서 동작하는 OAuth state nonce 저장소를 제공합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::{redis::RedisClient, oauth_state::RedisOAuthStateStore};
//!
//! let redis = RedisClient::connect(&config.redis).await?;
//! let states = RedisOAuthStateStore::new(redis, config.oauth.state_ttl_seconds);
//! let state = states.issue(AuthProvider::Google).await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod oauth_state;
pub mod redis;

pub use oauth_state::{InMemoryOAuthStateStore, OAuthStateStore, RedisOAuthStateStore};
