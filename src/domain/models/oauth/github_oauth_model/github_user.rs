//! # GitHub OAuth 사용자 정보 모델
//!
//! `GET /user` 와 `GET /user/emails` 응답을 역직렬화합니다.

use serde::Deserialize;

use crate::config::AuthProvider;
use crate::domain::models::identity::ProviderIdentity;
use crate::utils::string_utils::deserialize_optional_string;

/// `GET /user` 응답
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    /// GitHub 계정 고유 ID (숫자)
    pub id: u64,
    pub login: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    /// 공개 프로필 이메일 (비공개 설정 시 null)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
}

/// `GET /user/emails` 응답 항목 (`user:email` 스코프 필요)
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubEmail {
    pub email: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub verified: bool,
}

impl GitHubUser {
    /// 이메일 목록과 함께 [`ProviderIdentity`] 로 변환합니다.
    ///
    /// 이메일 선택 순서:
    /// 1. primary + verified
    /// 2. 아무 verified
    /// 3. 공개 프로필 이메일 (검증되지 않은 것으로 표시)
    ///
    /// 표시 이름이 없으면 `login` 을 사용합니다.
    pub fn into_identity(self, emails: &[GitHubEmail]) -> ProviderIdentity {
        let verified = emails
            .iter()
            .find(|e| e.primary && e.verified)
            .or_else(|| emails.iter().find(|e| e.verified))
            .map(|e| e.email.clone());

        let (email, email_verified) = match verified {
            Some(email) => (Some(email), true),
            None => (self.email, false),
        };

        let display_name = self.name.or(Some(self.login));

        ProviderIdentity::new(AuthProvider::GitHub, self.id.to_string())
            .with_email(email, email_verified)
            .with_display_name(display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn octocat(email: Option<&str>) -> GitHubUser {
        GitHubUser {
            id: 583231,
            login: "octocat".to_string(),
            name: None,
            email: email.map(str::to_string),
        }
    }

    fn email(address: &str, primary: bool, verified: bool) -> GitHubEmail {
        GitHubEmail {
            email: address.to_string(),
            primary,
            verified,
        }
    }

    #[test]
    fn test_prefers_primary_verified_email() {
        let emails = vec![
            email("old@example.com", false, true),
            email("main@example.com", true, true),
        ];
        let identity = octocat(None).into_identity(&emails);

        assert_eq!(identity.provider_user_id, "583231");
        assert_eq!(identity.email.as_deref(), Some("main@example.com"));
        assert!(identity.email_verified);
        assert_eq!(identity.display_name.as_deref(), Some("octocat"));
    }

    #[test]
    fn test_falls_back_to_any_verified_email() {
        let emails = vec![
            email("primary@example.com", true, false),
            email("verified@example.com", false, true),
        ];
        let identity = octocat(None).into_identity(&emails);

        assert_eq!(identity.email.as_deref(), Some("verified@example.com"));
        assert!(identity.email_verified);
    }

    #[test]
    fn test_profile_email_is_marked_unverified() {
        let identity = octocat(Some("public@example.com")).into_identity(&[]);

        assert_eq!(identity.email.as_deref(), Some("public@example.com"));
        assert!(!identity.email_verified);
    }

    #[test]
    fn test_no_email_at_all() {
        let identity = octocat(None).into_identity(&[email("x@example.com", true, false)]);

        assert_eq!(identity.email, None);
    }

    #[test]
    fn test_deserialize_user_payload() {
        let json = r#"{"login":"octocat","id":583231,"name":"The Octocat","email":null,"avatar_url":"x"}"#;
        let user: GitHubUser = serde_json::from_str(json).unwrap();

        assert_eq!(user.id, 583231);
        assert_eq!(user.name.as_deref(), Some("The Octocat"));
        assert_eq!(user.email, None);
    }
}
