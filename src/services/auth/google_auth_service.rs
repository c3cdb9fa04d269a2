//! # Google OAuth 2.0 클라이언트
//!
//! ## 사용하는 Google API 엔드포인트
//!
//! | 용도 | 엔드포인트 | 메서드 |
//! |------|------------|--------|
//! | **Authorization** | `https://accounts.google.com/o/oauth2/v2/auth` | GET |
//! | **Token Exchange** | `https://oauth2.googleapis.com/token` | POST |
//! | **User Info** | `https://www.googleapis.com/oauth2/v2/userinfo` | GET |
//!
//! ### 필요한 OAuth 스코프
//!
//! - `openid`: OpenID Connect 식별자
//! - `email`: 사용자 이메일 주소와 검증 여부
//! - `profile`: 이름

use async_trait::async_trait;

use super::identity_provider::{build_authorization_url, exchange_code, fetch_json, IdentityProviderClient};
use crate::config::{AuthProvider, OAuthClientConfig};
use crate::domain::models::identity::ProviderIdentity;
use crate::domain::models::oauth::GoogleUserInfo;
use crate::errors::AppResult;

const GOOGLE_SCOPE: &str = "openid email profile";

pub struct GoogleAuthService {
    config: OAuthClientConfig,
    http: reqwest::Client,
}

impl GoogleAuthService {
    pub fn new(config: OAuthClientConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }
}

#[async_trait]
impl IdentityProviderClient for GoogleAuthService {
    fn provider(&self) -> AuthProvider {
        AuthProvider::Google
    }

    fn authorization_url(&self, state: &str) -> String {
        build_authorization_url(
            &self.config,
            GOOGLE_SCOPE,
            state,
            &[("response_type", "code"), ("prompt", "select_account")],
        )
    }

    async fn fetch_identity(&self, code: &str) -> AppResult<ProviderIdentity> {
        let access_token = exchange_code(&self.http, &self.config, code).await?;

        let user = fetch_json::<GoogleUserInfo>(
            &self.http,
            AuthProvider::Google,
            &self.config.userinfo_uri,
            &access_token,
        )
        .await?;

        log::debug!("Google 사용자 정보 조회: {}", user.id);
        Ok(user.into())
    }
}
