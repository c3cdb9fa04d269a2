//! OAuth `state` nonce 저장소
//!
//! 프로바이더 동의 화면으로 보내기 전에 발급한 state 를 콜백에서 한 번만
//! 소비할 수 있도록 보관합니다. state 는 발급한 프로바이더에 묶이며
//! TTL 이 지나면 무효가 됩니다.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::redis::RedisClient;
use crate::config::AuthProvider;
use crate::errors::{AppError, AppResult};

/// 허용하는 state 문자열 최대 길이
const MAX_STATE_LEN: usize = 128;

/// state nonce 발급/소비 인터페이스
#[async_trait]
pub trait OAuthStateStore: Send + Sync {
    /// 새 state 를 발급하고 TTL 과 함께 저장합니다.
    async fn issue(&self, provider: AuthProvider) -> AppResult<String>;

    /// state 를 소비합니다.
    ///
    /// 존재하고, 같은 프로바이더로 발급되었고, 만료되지 않은 경우에만 `true`.
    /// 결과와 관계없이 해당 state 는 다시 사용할 수 없습니다.
    async fn consume(&self, provider: AuthProvider, state: &str) -> AppResult<bool>;
}

fn new_state() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn is_well_formed(state: &str) -> bool {
    !state.is_empty() && state.len() <= MAX_STATE_LEN
}

/// Redis 기반 state 저장소 (`oauth_state:{state}` → provider)
pub struct RedisOAuthStateStore {
    redis: RedisClient,
    ttl_seconds: u64,
}

impl RedisOAuthStateStore {
    pub fn new(redis: RedisClient, ttl_seconds: u64) -> Self {
        Self { redis, ttl_seconds }
    }

    fn key(state: &str) -> String {
        format!("oauth_state:{}", state)
    }
}

#[async_trait]
impl OAuthStateStore for RedisOAuthStateStore {
    async fn issue(&self, provider: AuthProvider) -> AppResult<String> {
        let state = new_state();
        self.redis
            .set_with_expiry(&Self::key(&state), &provider, self.ttl_seconds)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;
        Ok(state)
    }

    async fn consume(&self, provider: AuthProvider, state: &str) -> AppResult<bool> {
        if !is_well_formed(state) {
            return Ok(false);
        }

        let stored: Option<AuthProvider> = self
            .redis
            .get_del(&Self::key(state))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        Ok(stored == Some(provider))
    }
}

/// 프로세스 메모리 기반 state 저장소 (개발/테스트용)
pub struct InMemoryOAuthStateStore {
    entries: Mutex<HashMap<String, (AuthProvider, Instant)>>,
    ttl: Duration,
}

impl InMemoryOAuthStateStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<String, (AuthProvider, Instant)>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::InternalError("OAuth state store lock poisoned".to_string()))
    }
}

#[async_trait]
impl OAuthStateStore for InMemoryOAuthStateStore {
    async fn issue(&self, provider: AuthProvider) -> AppResult<String> {
        let state = new_state();
        let now = Instant::now();
        let mut entries = self.lock()?;

        // 만료된 항목 정리
        entries.retain(|_, (_, expires_at)| *expires_at > now);
        entries.insert(state.clone(), (provider, now + self.ttl));

        Ok(state)
    }

    async fn consume(&self, provider: AuthProvider, state: &str) -> AppResult<bool> {
        if !is_well_formed(state) {
            return Ok(false);
        }

        let removed = self.lock()?.remove(state);
        Ok(matches!(
            removed,
            Some((issued_for, expires_at)) if issued_for == provider && Instant::now() < expires_at
        ))
    }
}
