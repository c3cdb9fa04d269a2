//! # GitHub OAuth 클라이언트
//!
//! GitHub 는 비공개 이메일을 `/user` 에 노출하지 않으므로 `user:email` 스코프로
//! `/user/emails` 를 함께 조회하여 검증된 주소를 고릅니다.
//! 이메일 목록 조회가 실패하면 공개 프로필 정보만으로 진행합니다.

use async_trait::async_trait;

use super::identity_provider::{build_authorization_url, exchange_code, fetch_json, IdentityProviderClient};
use crate::config::{AuthProvider, OAuthClientConfig};
use crate::domain::models::identity::ProviderIdentity;
use crate::domain::models::oauth::{GitHubEmail, GitHubUser};
use crate::errors::AppResult;

const GITHUB_SCOPE: &str = "user:email";

pub struct GitHubAuthService {
    config: OAuthClientConfig,
    http: reqwest::Client,
}

impl GitHubAuthService {
    pub fn new(config: OAuthClientConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    async fn fetch_emails(&self, access_token: &str) -> Vec<GitHubEmail> {
        let Some(emails_uri) = self.config.emails_uri.as_deref() else {
            return Vec::new();
        };

        match fetch_json::<Vec<GitHubEmail>>(&self.http, AuthProvider::GitHub, emails_uri, access_token).await {
            Ok(emails) => emails,
            Err(e) => {
                log::warn!("⚠️ GitHub 이메일 목록 조회 실패, 프로필 이메일 사용: {}", e);
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl IdentityProviderClient for GitHubAuthService {
    fn provider(&self) -> AuthProvider {
        AuthProvider::GitHub
    }

    fn authorization_url(&self, state: &str) -> String {
        build_authorization_url(&self.config, GITHUB_SCOPE, state, &[])
    }

    async fn fetch_identity(&self, code: &str) -> AppResult<ProviderIdentity> {
        let access_token = exchange_code(&self.http, &self.config, code).await?;

        let user = fetch_json::<GitHubUser>(
            &self.http,
            AuthProvider::GitHub,
            &self.config.userinfo_uri,
            &access_token,
        )
        .await?;
        let emails = self.fetch_emails(&access_token).await;

        log::debug!("GitHub 사용자 정보 조회: {} ({})", user.login, user.id);
        Ok(user.into_identity(&emails))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::services::auth::identity_provider::test_support::client_config;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_token(mock_server: &MockServer, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(mock_server)
            .await;
    }

    fn service(mock_server: &MockServer) -> GitHubAuthService {
        GitHubAuthService::new(
            client_config(AuthProvider::GitHub, &mock_server.uri()),
            reqwest::Client::new(),
        )
    }

    #[test]
    fn test_authorization_url_requests_email_scope() {
        let service = GitHubAuthService::new(
            client_config(AuthProvider::GitHub, "https://github.com/login/oauth"),
            reqwest::Client::new(),
        );
        let url = service.authorization_url("s");

        assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(url.contains("scope=user%3Aemail"));
    }

    #[tokio::test]
    async fn test_fetch_identity_prefers_primary_verified_email() {
        let mock_server = MockServer::start().await;
        mount_token(&mock_server, json!({"access_token": "gho_x", "token_type": "bearer"})).await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("authorization", "Bearer gho_x"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 583231,
                "login": "octocat",
                "name": null,
                "email": null
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/user/emails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"email": "old@example.com", "primary": false, "verified": true},
                {"email": "octo@example.com", "primary": true, "verified": true}
            ])))
            .mount(&mock_server)
            .await;

        let identity = service(&mock_server).fetch_identity("code").await.unwrap();

        assert_eq!(identity.provider_user_id, "583231");
        assert_eq!(identity.candidate_email(true).as_deref(), Some("octo@example.com"));
        assert_eq!(identity.display_name.as_deref(), Some("octocat"));
    }

    #[tokio::test]
    async fn test_emails_failure_falls_back_to_unverified_profile_email() {
        let mock_server = MockServer::start().await;
        mount_token(&mock_server, json!({"access_token": "gho_x"})).await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "login": "ghost",
                "email": "ghost@example.com"
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/user/emails"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let identity = service(&mock_server).fetch_identity("code").await.unwrap();

        assert_eq!(identity.email.as_deref(), Some("ghost@example.com"));
        assert!(!identity.email_verified);
        assert!(identity.candidate_email(true).is_none());
    }

    #[tokio::test]
    async fn test_error_payload_with_200_is_rejected() {
        let mock_server = MockServer::start().await;
        mount_token(&mock_server, json!({
            "error": "bad_verification_code",
            "error_description": "The code passed is incorrect or expired."
        }))
        .await;

        let result = service(&mock_server).fetch_identity("stale").await;

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }
}
