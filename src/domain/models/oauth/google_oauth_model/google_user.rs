//! # Google OAuth 사용자 정보 모델
//!
//! `https://www.googleapis.com/oauth2/v2/userinfo` 응답을 역직렬화합니다.

use serde::Deserialize;

use crate::config::AuthProvider;
use crate::domain::models::identity::ProviderIdentity;
use crate::utils::string_utils::deserialize_optional_string;

/// Google OAuth 2.0 사용자 정보 응답 구조체
///
/// ## OAuth 2.0 스코프 요구사항
///
/// | 필드 | 필수 스코프 |
/// |------|-------------|
/// | `id` | `openid` |
/// | `email`, `verified_email` | `email` |
/// | `name` | `profile` |
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    /// Google 계정 고유 ID (숫자 문자열)
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default)]
    pub verified_email: bool,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
}

impl From<GoogleUserInfo> for ProviderIdentity {
    fn from(user: GoogleUserInfo) -> Self {
        ProviderIdentity::new(AuthProvider::Google, user.id)
            .with_email(user.email, user.verified_email)
            .with_display_name(user.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_user_into_identity() {
        let json = r#"{
            "id": "108234567890",
            "email": "jane@gmail.com",
            "verified_email": true,
            "name": "Jane Doe",
            "picture": "https://example.com/a.png"
        }"#;
        let user: GoogleUserInfo = serde_json::from_str(json).unwrap();
        let identity = ProviderIdentity::from(user);

        assert_eq!(identity.provider, AuthProvider::Google);
        assert_eq!(identity.provider_user_id, "108234567890");
        assert_eq!(identity.email.as_deref(), Some("jane@gmail.com"));
        assert!(identity.email_verified);
        assert_eq!(identity.display_name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_google_user_without_email_scope() {
        let user: GoogleUserInfo = serde_json::from_str(r#"{"id": "1", "name": ""}"#).unwrap();
        let identity = ProviderIdentity::from(user);

        assert_eq!(identity.email, None);
        assert!(!identity.email_verified);
        assert_eq!(identity.display_name, None);
    }
}
