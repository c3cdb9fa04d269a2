//! OAuth 2.0 Authorization Code 플로우 공통 인터페이스
//!
//! ```text
//! authorization_url(state) ──► 프로바이더 동의 화면
//!                                    │
//!                    callback?code=..&state=..
//!                                    ▼
//! fetch_identity(code) ──► 토큰 교환 ──► 프로필 조회 ──► ProviderIdentity
//! ```

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::config::{AuthProvider, OAuthClientConfig};
use crate::domain::models::identity::ProviderIdentity;
use crate::domain::models::oauth::OAuthTokenResponse;
use crate::errors::{AppError, AppResult};

const CLIENT_USER_AGENT: &str = concat!("authify/", env!("CARGO_PKG_VERSION"));

/// 외부 신원 프로바이더 클라이언트
#[async_trait]
pub trait IdentityProviderClient: Send + Sync {
    fn provider(&self) -> AuthProvider;

    /// 동의 화면 URL
    fn authorization_url(&self, state: &str) -> String;

    /// 인가 코드를 교환하고 사용자 신원을 조회합니다.
    async fn fetch_identity(&self, code: &str) -> AppResult<ProviderIdentity>;
}

/// `auth_uri?client_id=..&redirect_uri=..&scope=..&state=..` 형태의 URL 생성
pub(crate) fn build_authorization_url(
    config: &OAuthClientConfig,
    scope: &str,
    state: &str,
    extra: &[(&str, &str)],
) -> String {
    let mut params: Vec<(&str, &str)> = vec![
        ("client_id", config.client_id.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("scope", scope),
        ("state", state),
    ];
    params.extend_from_slice(extra);

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", config.auth_uri, query_string)
}

/// 인가 코드를 액세스 토큰으로 교환합니다.
pub(crate) async fn exchange_code(
    client: &reqwest::Client,
    config: &OAuthClientConfig,
    code: &str,
) -> AppResult<String> {
    let params = [
        ("code", code),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("grant_type", "authorization_code"),
    ];

    let response = client
        .post(&config.token_uri)
        .header(ACCEPT, "application/json")
        .header(USER_AGENT, CLIENT_USER_AGENT)
        .form(&params)
        .send()
        .await
        .map_err(|e| {
            AppError::ExternalServiceError(format!("{} 토큰 요청 실패: {}", config.provider, e))
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(AppError::ExternalServiceError(format!(
            "{} 토큰 교환 실패 ({}): {}",
            config.provider, status, error_text
        )));
    }

    response
        .json::<OAuthTokenResponse>()
        .await
        .map_err(|e| {
            AppError::ExternalServiceError(format!("{} 토큰 응답 파싱 실패: {}", config.provider, e))
        })?
        .into_access_token()
}

/// Bearer 토큰으로 JSON 리소스를 조회합니다.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    provider: AuthProvider,
    url: &str,
    access_token: &str,
) -> AppResult<T> {
    let response = client
        .get(url)
        .header(AUTHORIZATION, format!("Bearer {}", access_token))
        .header(ACCEPT, "application/json")
        .header(USER_AGENT, CLIENT_USER_AGENT)
        .send()
        .await
        .map_err(|e| AppError::ExternalServiceError(format!("{} 요청 실패: {}", provider, e)))?;

    if !response.status().is_success() {
        return Err(AppError::ExternalServiceError(format!(
            "{} 사용자 정보 조회 실패: {}",
            provider,
            response.status()
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::ExternalServiceError(format!("{} 응답 파싱 실패: {}", provider, e)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::{AuthProvider, OAuthClientConfig};

    /// 모든 엔드포인트가 `base` 를 가리키는 테스트용 설정
    pub fn client_config(provider: AuthProvider, base: &str) -> OAuthClientConfig {
        OAuthClientConfig {
            provider,
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            redirect_uri: format!("http://localhost:5000/auth/{}/callback", provider),
            auth_uri: format!("{}/authorize", base),
            token_uri: format!("{}/token", base),
            userinfo_uri: format!("{}/user", base),
            emails_uri: Some(format!("{}/user/emails", base)),
        }
    }
}
