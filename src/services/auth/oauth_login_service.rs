//! OAuth 로그인 흐름 조율
//!
//! 1. `begin`: state 발급 후 동의 화면 URL 반환
//! 2. `complete`: state 소비 → 신원 조회 → 계정 연결 → 세션 토큰 발급

use std::collections::HashMap;
use std::sync::Arc;

use super::identity_provider::IdentityProviderClient;
use super::token_service::SessionTokenService;
use crate::caching::OAuthStateStore;
use crate::config::AuthProvider;
use crate::domain::entities::accounts::Account;
use crate::errors::{AppError, AppResult};
use crate::services::accounts::IdentityReconciler;

/// 로그인 성공 결과
#[derive(Debug, Clone)]
pub struct SessionGrant {
    pub account: Account,
    pub token: String,
}

pub struct OAuthLoginService {
    providers: HashMap<AuthProvider, Arc<dyn IdentityProviderClient>>,
    states: Arc<dyn OAuthStateStore>,
    reconciler: Arc<IdentityReconciler>,
    tokens: Arc<SessionTokenService>,
}

impl OAuthLoginService {
    pub fn new(
        providers: Vec<Arc<dyn IdentityProviderClient>>,
        states: Arc<dyn OAuthStateStore>,
        reconciler: Arc<IdentityReconciler>,
        tokens: Arc<SessionTokenService>,
    ) -> Self {
        let providers = providers
            .into_iter()
            .map(|client| (client.provider(), client))
            .collect();

        Self {
            providers,
            states,
            reconciler,
            tokens,
        }
    }

    pub fn is_enabled(&self, provider: AuthProvider) -> bool {
        self.providers.contains_key(&provider)
    }

    fn client(&self, provider: AuthProvider) -> AppResult<&Arc<dyn IdentityProviderClient>> {
        self.providers
            .get(&provider)
            .ok_or_else(|| AppError::NotFound(format!("{} login is not configured", provider)))
    }

    /// state 를 발급하고 동의 화면 URL 을 반환합니다.
    pub async fn begin(&self, provider: AuthProvider) -> AppResult<String> {
        let client = self.client(provider)?;
        let state = self.states.issue(provider).await?;
        Ok(client.authorization_url(&state))
    }

    /// 콜백을 처리하고 세션 토큰을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AuthenticationError` - state 가 없거나 만료/재사용/다른 프로바이더용
    /// * `ExternalServiceError` - 프로바이더 통신 실패
    /// * `ConflictError` / `StoreUnavailable` - 계정 연결 실패
    pub async fn complete(&self, provider: AuthProvider, code: &str, state: &str) -> AppResult<SessionGrant> {
        let client = self.client(provider)?;

        if !self.states.consume(provider, state).await? {
            return Err(AppError::AuthenticationError("Invalid OAuth state".to_string()));
        }

        let identity = client.fetch_identity(code).await?;
        let account = self.reconciler.resolve(&identity).await?;

        let account_id = account
            .id_string()
            .ok_or_else(|| AppError::InternalError("Resolved account has no id".to_string()))?;
        let token = self.tokens.issue(&account_id)?;

        log::info!("✅ {} 로그인 완료: {}", provider, account.email);
        Ok(SessionGrant { account, token })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;

    use crate::config::AuthProvider;
    use crate::domain::models::identity::ProviderIdentity;
    use crate::errors::{AppError, AppResult};
    use crate::services::auth::IdentityProviderClient;

    pub const GOOD_CODE: &str = "good-code";

    /// `GOOD_CODE` 에 대해서만 고정된 신원을 돌려주는 프로바이더
    pub struct FakeProvider {
        pub identity: ProviderIdentity,
    }

    impl FakeProvider {
        pub fn new(identity: ProviderIdentity) -> Self {
            Self { identity }
        }
    }

    #[async_trait]
    impl IdentityProviderClient for FakeProvider {
        fn provider(&self) -> AuthProvider {
            self.identity.provider
        }

        fn authorization_url(&self, state: &str) -> String {
            format!("https://{}.test/authorize?state={}", self.identity.provider, state)
        }

        async fn fetch_identity(&self, code: &str) -> AppResult<ProviderIdentity> {
            if code == GOOD_CODE {
                Ok(self.identity.clone())
            } else {
                Err(AppError::ExternalServiceError("bad code".to_string()))
            }
        }
    }
}
