//! # Service Registry
//!
//! 설정과 인프라(계정 저장소, OAuth state 저장소)로부터 모든 서비스를
//! 한 번에 생성하고 actix-web `app_data` 로 등록합니다.
//!
//! ## 의존성 그래프
//!
//! ```text
//! AppConfig ─┬─► SessionTokenService
//!            ├─► CredentialService ──► AccountStore
//!            ├─► AccountService ─────► AccountStore
//!            ├─► IdentityReconciler ─► AccountStore
//!            └─► OAuthLoginService ──┬► IdentityProviderClient (Google, GitHub)
//!                                    ├► OAuthStateStore
//!                                    ├► IdentityReconciler
//!                                    └► SessionTokenService
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let registry = ServiceRegistry::build(config, store, states)?;
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .configure(|cfg| registry.register(cfg))
//!         .configure(routes::configure_all_routes)
//! })
//! ```
//!
//! 핸들러는 `web::Data<CredentialService>` 처럼 필요한 서비스만 받습니다.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;

use crate::caching::OAuthStateStore;
use crate::config::{AppConfig, AuthProvider};
use crate::errors::{AppResult, ErrorContext};
use crate::repositories::accounts::AccountStore;
use crate::services::accounts::{AccountService, CredentialService, IdentityReconciler};
use crate::services::auth::{
    GitHubAuthService, GoogleAuthService, IdentityProviderClient, OAuthLoginService, SessionTokenService,
};

/// 외부 프로바이더 HTTP 요청 타임아웃
const PROVIDER_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct ServiceRegistry {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn AccountStore>,
    pub credentials: Arc<CredentialService>,
    pub accounts: Arc<AccountService>,
    pub reconciler: Arc<IdentityReconciler>,
    pub tokens: Arc<SessionTokenService>,
    pub oauth: Arc<OAuthLoginService>,
}

impl ServiceRegistry {
    /// 설정에 자격 증명이 있는 프로바이더만 활성화하여 레지스트리를 생성합니다.
    pub fn build(
        config: AppConfig,
        store: Arc<dyn AccountStore>,
        states: Arc<dyn OAuthStateStore>,
    ) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(PROVIDER_HTTP_TIMEOUT)
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        let mut providers: Vec<Arc<dyn IdentityProviderClient>> = Vec::new();
        if let Some(google) = config.oauth_client(AuthProvider::Google) {
            providers.push(Arc::new(GoogleAuthService::new(google.clone(), http.clone())));
        }
        if let Some(github) = config.oauth_client(AuthProvider::GitHub) {
            providers.push(Arc::new(GitHubAuthService::new(github.clone(), http)));
        }

        Ok(Self::with_providers(config, store, states, providers))
    }

    /// 프로바이더 클라이언트를 직접 지정하여 생성합니다.
    pub fn with_providers(
        config: AppConfig,
        store: Arc<dyn AccountStore>,
        states: Arc<dyn OAuthStateStore>,
        providers: Vec<Arc<dyn IdentityProviderClient>>,
    ) -> Self {
        let tokens = Arc::new(SessionTokenService::new(&config.jwt));
        let reconciler = Arc::new(IdentityReconciler::new(store.clone(), config.reconciler.clone()));
        let credentials = Arc::new(CredentialService::new(store.clone(), config.password.clone()));
        let accounts = Arc::new(AccountService::new(store.clone()));

        for provider in &providers {
            log::info!("🔐 {} 로그인 활성화", provider.provider());
        }
        let oauth = Arc::new(OAuthLoginService::new(
            providers,
            states,
            reconciler.clone(),
            tokens.clone(),
        ));

        Self {
            config: Arc::new(config),
            store,
            credentials,
            accounts,
            reconciler,
            tokens,
            oauth,
        }
    }

    /// 모든 서비스를 `app_data` 로 등록합니다.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.config.clone()))
            .app_data(web::Data::from(self.credentials.clone()))
            .app_data(web::Data::from(self.accounts.clone()))
            .app_data(web::Data::from(self.tokens.clone()))
            .app_data(web::Data::from(self.oauth.clone()));
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::time::Duration;

    use super::ServiceRegistry;
    use crate::caching::InMemoryOAuthStateStore;
    use crate::config::AppConfig;
    use crate::repositories::accounts::InMemoryAccountStore;
    use crate::services::auth::IdentityProviderClient;

    /// 테스트 환경 설정 (bcrypt cost 4, 비보안 쿠키)
    pub fn test_config() -> AppConfig {
        let lookup = |key: &str| match key {
            "ENVIRONMENT" => Some("test".to_string()),
            "JWT_SECRET" => Some("test-secret".to_string()),
            "FRONTEND_URL" => Some("http://frontend.test".to_string()),
            _ => None,
        };
        AppConfig::from_lookup(&lookup).unwrap()
    }

    /// 인메모리 저장소와 지정한 프로바이더로 구성된 레지스트리
    pub fn test_registry(providers: Vec<Arc<dyn IdentityProviderClient>>) -> ServiceRegistry {
        ServiceRegistry::with_providers(
            test_config(),
            Arc::new(InMemoryAccountStore::new()),
            Arc::new(InMemoryOAuthStateStore::new(Duration::from_secs(600))),
            providers,
        )
    }
}
